pub mod click_outside;
pub mod event_bus;
pub mod node;

pub use click_outside::*;
pub use event_bus::*;
pub use node::*;
