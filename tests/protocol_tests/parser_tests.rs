//! Parser Tests
//!
//! Tests for reading structured replies from a byte stream.

use std::io::{BufRead, Cursor, ErrorKind};

use amcp::protocol::{parse_status_line, read_response, Payload, StatusCode};
use amcp::AmcpError;

fn parse(wire: &[u8]) -> Result<amcp::Response, AmcpError> {
    read_response(&mut Cursor::new(wire.to_vec()))
}

fn assert_malformed(wire: &[u8]) {
    match parse(wire) {
        Err(AmcpError::MalformedResponse { .. }) => {}
        other => panic!("Expected malformed response for {:?}, got {:?}", wire, other),
    }
}

fn assert_eof(result: Result<amcp::Response, AmcpError>) {
    match result {
        Err(AmcpError::Transport(e)) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
        other => panic!("Expected unexpected EOF, got {:?}", other),
    }
}

// =============================================================================
// Single-Line Replies
// =============================================================================

#[test]
fn test_plain_ok() {
    let resp = parse(b"202 OK\r\n").unwrap();
    assert_eq!(resp.code(), StatusCode::OK);
    assert_eq!(resp.message(), "OK");
    assert_eq!(resp.payload(), &Payload::Single("OK".to_string()));
}

#[test]
fn test_message_keeps_inner_spaces() {
    let resp = parse(b"202 PLAY OK\r\n").unwrap();
    assert_eq!(resp.payload(), &Payload::Single("PLAY OK".to_string()));
}

#[test]
fn test_empty_message_is_single_empty() {
    let resp = parse(b"202 \r\n").unwrap();
    assert_eq!(resp.payload(), &Payload::Single(String::new()));
}

#[test]
fn test_error_codes_are_single_line() {
    for (wire, code) in [
        (&b"400 ERROR\r\n"[..], StatusCode::CLIENT_ERROR),
        (&b"404 PLAY FAILED\r\n"[..], StatusCode::MEDIA_NOT_FOUND),
        (&b"501 CG FAILED\r\n"[..], StatusCode::COMMAND_FAILED),
        (&b"101 INFO\r\n"[..], StatusCode::INFO_DATA),
    ] {
        let resp = parse(wire).unwrap();
        assert_eq!(resp.code(), code);
        assert!(matches!(resp.payload(), Payload::Single(_)));
        assert!(resp.lines().is_empty());
    }
}

#[test]
fn test_lf_only_status_line_is_accepted() {
    let resp = parse(b"202 OK\n").unwrap();
    assert_eq!(resp.message(), "OK");
}

// =============================================================================
// 200: Multi-Line List
// =============================================================================

#[test]
fn test_multi_line_list() {
    let resp = parse(b"200 OK\r\na\r\nb\r\n\r\n").unwrap();
    assert_eq!(resp.code(), StatusCode::OK_MULTI);
    assert_eq!(resp.message(), "OK");
    assert_eq!(
        resp.payload(),
        &Payload::List(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn test_empty_list() {
    let resp = parse(b"200 CLS OK\r\n\r\n").unwrap();
    assert_eq!(resp.payload(), &Payload::List(Vec::new()));
}

#[test]
fn test_list_lines_keep_quotes_and_spaces() {
    let resp = parse(b"200 CLS OK\r\n\"AMB\"  MOVIE  6445960 20170413\r\n\r\n").unwrap();
    assert_eq!(resp.lines(), &["\"AMB\"  MOVIE  6445960 20170413".to_string()]);
}

#[test]
fn test_list_ends_at_bare_lf_empty_line() {
    let resp = parse(b"200 OK\r\nx\r\n\n").unwrap();
    assert_eq!(resp.lines(), &["x".to_string()]);
}

#[test]
fn test_list_does_not_read_next_reply() {
    let mut cursor = Cursor::new(b"200 OK\r\na\r\n\r\n202 NEXT\r\n".to_vec());

    let first = read_response(&mut cursor).unwrap();
    assert_eq!(first.lines(), &["a".to_string()]);

    let second = read_response(&mut cursor).unwrap();
    assert_eq!(second.code(), StatusCode::OK);
    assert_eq!(second.message(), "NEXT");

    assert!(cursor.fill_buf().unwrap().is_empty());
}

#[test]
fn test_list_truncated_is_transport_error() {
    assert_eof(parse(b"200 OK\r\na\r\nb\r\n"));
}

#[test]
fn test_list_cut_mid_line_is_transport_error() {
    assert_eof(parse(b"200 OK\r\na\r\nb"));
}

// =============================================================================
// 201: Single Data Block
// =============================================================================

#[test]
fn test_data_block_single_line() {
    let resp = parse(b"201 OK\r\n<xml/>\r\n").unwrap();
    assert_eq!(resp.code(), StatusCode::OK_DATA);
    assert_eq!(resp.payload(), &Payload::List(vec!["<xml/>".to_string()]));
}

#[test]
fn test_data_block_stops_after_crlf_line() {
    let mut cursor = Cursor::new(b"201 DATA RETRIEVE OK\r\nvalue\r\n202 OK\r\n".to_vec());

    let first = read_response(&mut cursor).unwrap();
    assert_eq!(first.lines(), &["value".to_string()]);

    let second = read_response(&mut cursor).unwrap();
    assert_eq!(second.code(), StatusCode::OK);
}

#[test]
fn test_data_block_spans_lf_lines() {
    let resp = parse(b"201 INFO OK\r\n<channel>\n  <id>1</id>\n</channel>\r\n").unwrap();
    assert_eq!(
        resp.lines(),
        &[
            "<channel>".to_string(),
            "  <id>1</id>".to_string(),
            "</channel>".to_string(),
        ]
    );
}

#[test]
fn test_data_block_empty_crlf_line_is_content() {
    let resp = parse(b"201 OK\r\n\r\n").unwrap();
    assert_eq!(resp.payload(), &Payload::List(vec![String::new()]));
}

#[test]
fn test_data_block_without_crlf_is_transport_error() {
    assert_eof(parse(b"201 OK\r\nfirst\nsecond\n"));
}

// =============================================================================
// Malformed Status Lines
// =============================================================================

#[test]
fn test_short_status_line() {
    assert_malformed(b"202\r\n");
    assert_malformed(b"20\r\n");
    assert_malformed(b"\r\n");
}

#[test]
fn test_missing_separator() {
    assert_malformed(b"202OK\r\n");
    assert_malformed(b"2020 OK\r\n");
}

#[test]
fn test_non_numeric_code() {
    assert_malformed(b"ABC OK\r\n");
    assert_malformed(b"+12 OK\r\n");
    assert_malformed(b"-12 OK\r\n");
}

#[test]
fn test_code_below_100() {
    assert_malformed(b"099 OK\r\n");
    assert_malformed(b"000 OK\r\n");
}

#[test]
fn test_malformed_carries_raw_line() {
    match parse(b"HELLO\r\n") {
        Err(AmcpError::MalformedResponse { line, .. }) => assert_eq!(line, "HELLO"),
        other => panic!("Expected malformed response, got {:?}", other),
    }
}

#[test]
fn test_parse_status_line_directly() {
    let (code, message) = parse_status_line(b"403 PLAY FAILED").unwrap();
    assert_eq!(code, StatusCode::ILLEGAL_PARAMETER);
    assert_eq!(message, "PLAY FAILED");

    let (code, message) = parse_status_line(b"100 ").unwrap();
    assert_eq!(code, StatusCode::INFO);
    assert_eq!(message, "");
}

// =============================================================================
// Stream Errors
// =============================================================================

#[test]
fn test_empty_stream_is_transport_error() {
    assert_eof(parse(b""));
}

#[test]
fn test_status_line_without_terminator_is_transport_error() {
    assert_eof(parse(b"202 OK"));
}
