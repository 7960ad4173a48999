use std::io::Read;

use flate2::read::GzDecoder;
use skiff::http::encoding::{ContentEncoding, gzip, negotiate};

fn gunzip(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut out).unwrap();
    out
}

#[test]
fn test_gzip_round_trips_through_decoder() {
    let compressed = gzip(b"raspberry").unwrap();
    assert_eq!(gunzip(&compressed), b"raspberry".to_vec());
}

#[test]
fn test_encode_uses_gzip() {
    let compressed = ContentEncoding::Gzip.encode(b"abc").unwrap();
    assert_eq!(gunzip(&compressed), b"abc".to_vec());
    assert_eq!(ContentEncoding::Gzip.as_str(), "gzip");
}

#[test]
fn test_negotiate_single_token() {
    assert_eq!(negotiate(Some("gzip")), Some(ContentEncoding::Gzip));
}

#[test]
fn test_negotiate_token_list_with_whitespace() {
    assert_eq!(
        negotiate(Some("encoding-1, gzip, encoding-2")),
        Some(ContentEncoding::Gzip)
    );
}

#[test]
fn test_negotiate_is_case_insensitive() {
    assert_eq!(negotiate(Some("GZIP")), Some(ContentEncoding::Gzip));
}

#[test]
fn test_negotiate_rejects_unknown_codings() {
    assert_eq!(negotiate(Some("invalid-encoding")), None);
    assert_eq!(negotiate(Some("deflate, br")), None);
    assert_eq!(negotiate(Some("")), None);
}

#[test]
fn test_negotiate_ignores_substring_matches() {
    assert_eq!(negotiate(Some("x-gzipped")), None);
}
