//! # amcp
//!
//! Client for the AMCP media server control protocol:
//! - Command encoding with whitespace-driven quoting and escaping
//! - Reply parsing where the status code alone picks the body shape
//! - Blocking TCP client with per-exchange deadlines
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Client / SharedClient                     │
//! │             (one request/response cycle at a time)           │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │ Command                      ▲ Response
//!                ▼                              │
//!   ┌─────────────────────────┐   ┌─────────────────────────────┐
//!   │     encode_command      │   │        read_response        │
//!   │  (name + typed args)    │   │ (status line → 200/201 body)│
//!   └────────────┬────────────┘   └──────────────▲──────────────┘
//!                │ "PLAY 1-1 AMB\r\n"            │ "202 PLAY OK\r\n"
//!                ▼                               │
//!   ┌─────────────────────────────────────────────────────────────┐
//!   │                        TcpStream                             │
//!   └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use amcp::{Client, ClientConfig, Command};
//!
//! # fn main() -> amcp::Result<()> {
//! let mut client = Client::connect(ClientConfig::default())?;
//! let reply = client.execute(&Command::new("PLAY").arg("1-1").arg("#FFFFFF"))?;
//! println!("{} {}", reply.code(), reply.message());
//! client.close()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{AmcpError, Result};
pub use config::ClientConfig;
pub use network::{Client, SharedClient};
pub use protocol::{Argument, Command, Payload, Response, StatusCode};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
