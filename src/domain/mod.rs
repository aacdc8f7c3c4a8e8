//! Domain layer: provider-independent value types and the ports the
//! application layer talks through.

pub mod credentials;
pub mod error_code;
pub mod payment;
pub mod ports;
pub mod provider;
pub mod session;
