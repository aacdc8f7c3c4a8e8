//! `HttpSender` adapters: the real network client and the offline emulator.

pub mod emulator;
pub mod http;
