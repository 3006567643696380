//! Shared pieces of the vitrine showcase: the control socket protocol, the
//! appearance preferences both sides agree on, and a small client.

pub mod appearance;
pub mod client;
pub mod macros;
pub mod protocol;
