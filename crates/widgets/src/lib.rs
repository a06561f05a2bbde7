//! Form widgets for the map collector.
//!
//! Widgets own only presentation state (popover open, filter text); the
//! values they display belong to the caller, and selections are returned to
//! the caller instead of being stored.

pub mod category_form;
pub mod location_panel;
pub mod searchable_select;
pub mod tab_switcher;

pub use category_form::*;
pub use location_panel::*;
pub use searchable_select::*;
pub use tab_switcher::*;
