use thiserror::Error;

use crate::http::headers::parse_headers;
use crate::http::request::{Method, Request, split_path};
use crate::http::response::StatusCode;

/// Longest accepted request line plus header section, without the blank line.
pub const MAX_HEADER_BYTES: usize = 16 * 1024;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed request line")]
    InvalidRequest,
    #[error("header line without ':'")]
    InvalidHeader,
    #[error("content-length is not a number")]
    InvalidContentLength,
    #[error("request exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("header section exceeds {limit} bytes")]
    HeadersTooLarge { limit: usize },
    #[error("request is incomplete")]
    Incomplete,
}

impl ParseError {
    /// Status to answer with, or `None` when more input is needed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ParseError::Incomplete => None,
            _ => Some(StatusCode::BadRequest),
        }
    }
}

/// Parses one request from the front of `buf`.
///
/// Returns the request and the number of bytes it occupied. The body is the
/// exact `content-length` slice following the blank line; if fewer bytes are
/// buffered the result is [`ParseError::Incomplete`].
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {

    // Look for header/body separator
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;
    let header_bytes = &buf[..headers_end];
    let body_bytes = &buf[headers_end + 4..];

    let headers_str = std::str::from_utf8(header_bytes)
        .map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let mut parts = request_line.split_whitespace();

    let method_str = parts.next().ok_or(ParseError::InvalidRequest)?;
    let path = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().ok_or(ParseError::InvalidRequest)?;

    if parts.next().is_some() || !path.starts_with('/') {
        return Err(ParseError::InvalidRequest);
    }

    let method = Method::from_token(method_str);

    let headers = parse_headers(lines)?;

    // Body
    let content_length = headers
        .get("content-length")
        .map(|v| v.parse::<usize>().map_err(|_| ParseError::InvalidContentLength))
        .transpose()?
        .unwrap_or(0);

    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    let body = body_bytes[..content_length].to_vec();

    let request = Request {
        method,
        path: path.to_string(),
        segments: split_path(path),
        version: version.to_string(),
        headers,
        body,
    };

    let total_consumed = headers_end + 4 + content_length;
    Ok((request, total_consumed))

}

/// Offset of the `\r\n\r\n` separator, if `buf` contains one.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.segments, vec!["/"]);
        assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn incomplete_maps_to_no_status() {
        assert_eq!(ParseError::Incomplete.status(), None);
        assert_eq!(ParseError::InvalidHeader.status(), Some(StatusCode::BadRequest));
    }
}
