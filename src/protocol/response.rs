//! Response definitions
//!
//! Status codes and the structured reply produced by the parser.

use std::fmt;

use crate::error::{AmcpError, Result};

/// Three-digit AMCP return code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusCode(u16);

impl StatusCode {
    pub const INFO: StatusCode = StatusCode(100);
    pub const INFO_DATA: StatusCode = StatusCode(101);

    /// Multi-line list terminated by an empty line
    pub const OK_MULTI: StatusCode = StatusCode(200);
    /// Data block terminated by the first CRLF line
    pub const OK_DATA: StatusCode = StatusCode(201);
    pub const OK: StatusCode = StatusCode(202);

    pub const CLIENT_ERROR: StatusCode = StatusCode(400);
    pub const ILLEGAL_VIDEO_CHANNEL: StatusCode = StatusCode(401);
    pub const PARAMETER_MISSING: StatusCode = StatusCode(402);
    pub const ILLEGAL_PARAMETER: StatusCode = StatusCode(403);
    pub const MEDIA_NOT_FOUND: StatusCode = StatusCode(404);

    pub const SERVER_ERROR: StatusCode = StatusCode(500);
    pub const COMMAND_FAILED: StatusCode = StatusCode(501);
    pub const MEDIA_UNREACHABLE: StatusCode = StatusCode(502);
    pub const ACCESS_ERROR: StatusCode = StatusCode(503);

    /// Wrap a raw code. Returns `None` outside `100..=999`.
    pub fn from_u16(code: u16) -> Option<Self> {
        (100..=999).contains(&code).then_some(StatusCode(code))
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }

    pub fn class(self) -> StatusClass {
        match self.0 / 100 {
            1 => StatusClass::Informational,
            2 => StatusClass::Success,
            4 => StatusClass::ClientError,
            5 => StatusClass::ServerError,
            _ => StatusClass::Unknown,
        }
    }

    /// How many lines follow the status line for this code
    pub fn body(self) -> BodyShape {
        match self {
            StatusCode::OK_MULTI => BodyShape::List,
            StatusCode::OK_DATA => BodyShape::Block,
            _ => BodyShape::Line,
        }
    }

    pub fn is_success(self) -> bool {
        self.class() == StatusClass::Success
    }

    pub fn is_error(self) -> bool {
        matches!(
            self.class(),
            StatusClass::ClientError | StatusClass::ServerError
        )
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric class of a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Informational,
    Success,
    ClientError,
    ServerError,
    /// 3xx and 6xx-9xx; parsed, but carry no defined meaning
    Unknown,
}

/// Reply body shape selected by the status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// Lines until an empty line (200)
    List,
    /// Lines until one ends with CRLF (201)
    Block,
    /// Status line only
    Line,
}

/// Reply payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Payload {
    #[default]
    Empty,
    Single(String),
    List(Vec<String>),
}

/// A parsed server reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    code: StatusCode,
    message: String,
    payload: Payload,
}

impl Response {
    pub(crate) fn new(code: StatusCode, message: String, payload: Payload) -> Self {
        Self {
            code,
            message,
            payload,
        }
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    /// Text following the code on the status line
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Body lines of a 200/201 reply; empty for every other code
    pub fn lines(&self) -> &[String] {
        match &self.payload {
            Payload::List(lines) => lines,
            _ => &[],
        }
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Turn a 4xx/5xx reply into `AmcpError::Status`
    pub fn error_for_status(self) -> Result<Self> {
        if self.code.is_error() {
            return Err(AmcpError::Status {
                code: self.code,
                message: self.message,
            });
        }
        Ok(self)
    }
}
