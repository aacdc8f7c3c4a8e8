//! Application layer: the provider protocol itself.
//!
//! `LeasingGateway` is the entry point. It owns a `Transport`, which builds
//! authenticated calls and hands them to whichever `HttpSender` the gateway was
//! built with, and it delegates the token exchange to `SessionManager`.

pub mod gateway;
pub mod parameters;
pub mod sanitizer;
pub mod session;
pub mod transport;
