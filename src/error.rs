//! Error types for the AMCP client
//!
//! Provides a unified error type for encoding, parsing and transport.

use std::io;

use thiserror::Error;

use crate::protocol::StatusCode;

/// Result type alias using AmcpError
pub type Result<T> = std::result::Result<T, AmcpError>;

/// Unified error type for AMCP operations
#[derive(Debug, Error)]
pub enum AmcpError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// I/O failure, timeout or premature end of stream
    #[error("Transport error: {0}")]
    Transport(#[from] io::Error),

    /// A previous exchange failed mid-flight; the stream position is unknown
    #[error("Connection is broken by an earlier failure and must be reopened")]
    ConnectionBroken,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// The status line does not have the `<code> <message>` shape
    #[error("Malformed response ({reason}): {line:?}")]
    MalformedResponse { reason: &'static str, line: String },

    /// An argument the encoder cannot put on the wire
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Server answered with a 4xx or 5xx code
    #[error("Server returned {code}: {message}")]
    Status { code: StatusCode, message: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AmcpError {
    pub(crate) fn malformed(reason: &'static str, line: &[u8]) -> Self {
        AmcpError::MalformedResponse {
            reason,
            line: String::from_utf8_lossy(line).into_owned(),
        }
    }

    pub(crate) fn unexpected_eof(context: &str) -> Self {
        AmcpError::Transport(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("stream ended {}", context),
        ))
    }

    /// True if the error is a read or write deadline expiring.
    ///
    /// Unix reports socket timeouts as `WouldBlock`, Windows as `TimedOut`.
    pub fn is_timeout(&self) -> bool {
        match self {
            AmcpError::Transport(e) => matches!(
                e.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }

    /// True if the connection must not be reused after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AmcpError::Transport(_)
                | AmcpError::ConnectionBroken
                | AmcpError::MalformedResponse { .. }
        )
    }
}
