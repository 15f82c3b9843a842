//! Network layer - HTTP probe execution
//!
//! The Network actor receives probe commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
