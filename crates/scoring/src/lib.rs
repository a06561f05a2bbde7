//! Client side of the `/predict/{category}` scoring contract.
//!
//! Wire types live in [`protocol`]; [`Scorer`] is the seam the controller
//! submits through. Native builds get the reqwest-backed [`HttpScorer`];
//! the browser host supplies its own implementation on top of
//! [`decode_response`].

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;

pub use client::*;
pub use config::*;
pub use error::*;
pub use protocol::*;
