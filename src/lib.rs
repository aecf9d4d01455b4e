//! Natgw - NAT table for a userspace VPN gateway
//!
//! Tracks the binding between internal source endpoints and translated
//! ports or addresses, and resolves translated replies back to their origin.
//! Packet I/O and the event loop live in the surrounding gateway.

pub mod config;
pub mod error;
pub mod nat;
pub mod telemetry;

pub use error::{Error, Result};
