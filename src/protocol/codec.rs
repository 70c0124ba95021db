//! Protocol codec
//!
//! Encoding of command lines and parsing of server replies.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! <COMMAND>( <argument>)*\r\n
//! ```
//! Text arguments are wrapped in double quotes when they contain whitespace.
//! `"`, `\` and newline are always escaped as `\"`, `\\` and `\n`.
//!
//! ### Response
//! ```text
//! <code> <message>\r\n          every reply
//! <line>\r\n ... \r\n           200: lines until an empty line
//! <line>\n ... <line>\r\n       201: lines until one ends with CRLF
//! ```

use std::fmt::Write as _;
use std::io::{BufRead, Write};

use bytes::{BufMut, Bytes, BytesMut};

use super::{Argument, BodyShape, Command, Payload, Response, StatusCode};
use crate::error::{AmcpError, Result};

/// Line terminator for every request and reply line
pub const LINE_TERMINATOR: &[u8] = b"\r\n";

/// Shortest valid status line: three digits and a space
pub const MIN_STATUS_LINE: usize = 4;

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command to its wire line, terminator included
pub fn encode_command(command: &Command) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(
        command.name().len() + 8 * command.arguments().len() + LINE_TERMINATOR.len(),
    );
    buf.put_slice(command.name().as_bytes());

    for arg in command.arguments() {
        buf.put_u8(b' ');
        encode_argument(arg, &mut buf)?;
    }

    buf.put_slice(LINE_TERMINATOR);
    Ok(buf.freeze())
}

/// Append the wire form of a single argument to `buf`
pub fn encode_argument(arg: &Argument, buf: &mut BytesMut) -> Result<()> {
    match arg {
        Argument::Integer(n) => write!(buf, "{}", n).map_err(fmt_error)?,
        Argument::Float32(v) => {
            check_finite(v.is_finite(), arg)?;
            // Display is the shortest round-trip form and never uses exponents
            write!(buf, "{}", v).map_err(fmt_error)?
        }
        Argument::Float64(v) => {
            check_finite(v.is_finite(), arg)?;
            write!(buf, "{}", v).map_err(fmt_error)?
        }
        Argument::Text(s) => encode_text(s, buf),
    }
    Ok(())
}

fn encode_text(s: &str, buf: &mut BytesMut) {
    let quote = s.chars().any(char::is_whitespace);
    if quote {
        buf.put_u8(b'"');
    }

    // CR passes through unescaped
    for c in s.chars() {
        match c {
            '"' => buf.put_slice(b"\\\""),
            '\\' => buf.put_slice(b"\\\\"),
            '\n' => buf.put_slice(b"\\n"),
            _ => {
                let mut utf8 = [0u8; 4];
                buf.put_slice(c.encode_utf8(&mut utf8).as_bytes());
            }
        }
    }

    if quote {
        buf.put_u8(b'"');
    }
}

fn check_finite(finite: bool, arg: &Argument) -> Result<()> {
    if finite {
        Ok(())
    } else {
        Err(AmcpError::Encoding(format!(
            "non-finite float argument {} has no decimal form",
            arg
        )))
    }
}

fn fmt_error(e: std::fmt::Error) -> AmcpError {
    AmcpError::Encoding(e.to_string())
}

/// Encode a command and write it to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let bytes = encode_command(command)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Response Parsing
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    CrLf,
    Lf,
}

/// One physical line with its terminator stripped
struct Line {
    bytes: Vec<u8>,
    terminator: Terminator,
}

impl Line {
    fn into_text(self) -> String {
        match String::from_utf8(self.bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }
}

/// Read one LF-terminated line. A zero-byte read or a line cut off by end of
/// stream is a transport error, never a short line.
fn read_line<R: BufRead>(reader: &mut R, context: &str) -> Result<Line> {
    let mut bytes = Vec::new();
    let n = reader.read_until(b'\n', &mut bytes)?;
    if n == 0 || bytes.last() != Some(&b'\n') {
        return Err(AmcpError::unexpected_eof(context));
    }

    bytes.pop();
    let terminator = if bytes.last() == Some(&b'\r') {
        bytes.pop();
        Terminator::CrLf
    } else {
        Terminator::Lf
    };

    Ok(Line { bytes, terminator })
}

/// Parse `<code> <message>` (terminator already stripped)
pub fn parse_status_line(line: &[u8]) -> Result<(StatusCode, String)> {
    if line.len() < MIN_STATUS_LINE || line[3] != b' ' {
        return Err(AmcpError::malformed("short response", line));
    }

    let digits = &line[..3];
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(AmcpError::malformed("non-numeric status code", line));
    }
    let value = digits
        .iter()
        .fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0'));

    let code = StatusCode::from_u16(value)
        .ok_or_else(|| AmcpError::malformed("status code below 100", line))?;

    let message = String::from_utf8_lossy(&line[MIN_STATUS_LINE..]).into_owned();
    Ok((code, message))
}

/// Body sentinel being waited for
#[derive(Debug, Clone, Copy)]
enum Sentinel {
    /// 200: an empty line, which is not part of the body
    EmptyLine,
    /// 201: the first line terminated by CRLF, which is part of the body
    CrLf,
}

enum ParseState {
    AwaitStatusLine,
    Accumulating {
        code: StatusCode,
        message: String,
        sentinel: Sentinel,
        lines: Vec<String>,
    },
    Done(Response),
}

/// Read exactly one reply from a stream
///
/// Consumes the status line and, for 200/201, the body lines up to and
/// including the terminating line. Never reads past the reply. Any read
/// failure discards what was accumulated.
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Response> {
    let mut state = ParseState::AwaitStatusLine;

    loop {
        state = match state {
            ParseState::AwaitStatusLine => {
                let line = read_line(reader, "before the status line")?;
                let (code, message) = parse_status_line(&line.bytes)?;

                match code.body() {
                    BodyShape::Line => {
                        let payload = Payload::Single(message.clone());
                        ParseState::Done(Response::new(code, message, payload))
                    }
                    BodyShape::List => ParseState::Accumulating {
                        code,
                        message,
                        sentinel: Sentinel::EmptyLine,
                        lines: Vec::new(),
                    },
                    BodyShape::Block => ParseState::Accumulating {
                        code,
                        message,
                        sentinel: Sentinel::CrLf,
                        lines: Vec::new(),
                    },
                }
            }

            ParseState::Accumulating {
                code,
                message,
                sentinel,
                mut lines,
            } => {
                let line = read_line(reader, "inside a multi-line reply")?;

                let finished = match sentinel {
                    Sentinel::EmptyLine => {
                        let end = line.bytes.is_empty();
                        if !end {
                            lines.push(line.into_text());
                        }
                        end
                    }
                    Sentinel::CrLf => {
                        let end = line.terminator == Terminator::CrLf;
                        lines.push(line.into_text());
                        end
                    }
                };

                if finished {
                    ParseState::Done(Response::new(code, message, Payload::List(lines)))
                } else {
                    ParseState::Accumulating {
                        code,
                        message,
                        sentinel,
                        lines,
                    }
                }
            }

            ParseState::Done(response) => {
                tracing::trace!(
                    code = %response.code(),
                    lines = response.lines().len(),
                    "parsed reply"
                );
                return Ok(response);
            }
        };
    }
}
