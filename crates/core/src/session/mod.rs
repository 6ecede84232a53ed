//! Session state and its ports

pub mod memory;
pub mod ports;
pub mod store;
