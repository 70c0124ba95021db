//! Protocol Module
//!
//! Defines the AMCP wire protocol: a line-oriented text protocol where each
//! request is one CRLF-terminated line and each reply starts with a status line.
//!
//! ## Request Format
//! ```text
//! PLAY 1-1 "demo file 124.mp3" SLIDE 10 LEFT\r\n
//! ```
//!
//! ## Response Format
//! ```text
//! ┌──────────┬───────┬──────────────────────────────┐
//! │ Code (3) │ ' '   │ Message                 \r\n │
//! └──────────┴───────┴──────────────────────────────┘
//! ```
//!
//! ### Status Codes
//! - 1xx: informational
//! - 200: list body, ends with an empty line
//! - 201: data body, ends with the first CRLF-terminated line
//! - 202: plain acknowledgement
//! - 4xx: client error
//! - 5xx: server error

mod command;
mod response;
mod codec;

pub use command::{Argument, Command};
pub use response::{BodyShape, Payload, Response, StatusClass, StatusCode};
pub use codec::{
    encode_argument, encode_command, parse_status_line, read_response, write_command,
    LINE_TERMINATOR, MIN_STATUS_LINE,
};
