//! Response content encoding.
//!
//! Only gzip is offered. The client's `Accept-Encoding` header is split on
//! commas; each coding is matched case-insensitively with its `;q=` parameter
//! stripped. A coding listed with `q=0` counts as refused.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
}

impl ContentEncoding {
    /// Token used in `Content-Encoding`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
        }
    }

    /// Applies the encoding to `body`.
    pub fn encode(&self, body: &[u8]) -> std::io::Result<Vec<u8>> {
        match self {
            ContentEncoding::Gzip => gzip(body),
        }
    }
}

/// Picks the encoding to use for a response given the request's
/// `Accept-Encoding` value.
///
/// ```
/// # use skiff::http::encoding::{negotiate, ContentEncoding};
/// assert_eq!(negotiate(Some("deflate, gzip")), Some(ContentEncoding::Gzip));
/// assert_eq!(negotiate(Some("br")), None);
/// assert_eq!(negotiate(None), None);
/// ```
pub fn negotiate(accept_encoding: Option<&str>) -> Option<ContentEncoding> {
    let header = accept_encoding?;

    header
        .split(',')
        .filter_map(|item| {
            let mut params = item.split(';');
            let coding = params.next()?.trim();
            let refused = params.any(|p| is_zero_quality(p.trim()));
            (!refused).then_some(coding)
        })
        .any(|coding| coding.eq_ignore_ascii_case("gzip"))
        .then_some(ContentEncoding::Gzip)
}

fn is_zero_quality(param: &str) -> bool {
    match param.split_once('=') {
        Some((name, value)) if name.trim().eq_ignore_ascii_case("q") => value
            .trim()
            .parse::<f32>()
            .map(|q| q == 0.0)
            .unwrap_or(false),
        _ => false,
    }
}

/// Gzip-compresses `body` in memory.
pub fn gzip(body: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn q_zero_refuses_gzip() {
        assert_eq!(negotiate(Some("gzip;q=0, identity")), None);
        assert_eq!(negotiate(Some("gzip; q=0.5")), Some(ContentEncoding::Gzip));
    }

    #[test]
    fn gzip_has_magic_header() {
        let out = gzip(b"abc").unwrap();
        assert_eq!(&out[..2], &[0x1f, 0x8b]);
    }
}
