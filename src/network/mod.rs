//! Network Module
//!
//! TCP client handling.
//!
//! ## Architecture
//! - One `Client` owns one connection and one exchange at a time
//! - `SharedClient` serializes exchanges for callers sharing a connection
//! - Encoding and parsing are delegated to `protocol`

mod client;
mod shared;

pub use client::Client;
pub use shared::SharedClient;
