//! The map + form data collector: one controller owning the picked
//! location, the active category, per-category form data and the
//! submission state, rendered through a serializable view model.

pub mod controller;
pub mod map_view;
pub mod state;
pub mod view;

pub use controller::*;
pub use map_view::*;
pub use state::*;
pub use view::*;
