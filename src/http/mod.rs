//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per connection, no
//! keep-alive, no chunked bodies.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine that reads, dispatches and writes
//! - **`parser`**: Parses an incoming request from a byte buffer
//! - **`headers`**: Header line parsing into a lowercased map
//! - **`request`**: Request representation and path segmentation
//! - **`response`**: Response representation with builder pattern
//! - **`writer`**: Serializes and writes responses to the client
//! - **`encoding`**: gzip content encoding negotiated from `Accept-Encoding`
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Buffer until headers and body are complete
//!        └──────┬──────┘
//!               │ Request parsed ──────────────┐ Malformed → 400
//!               ▼                              │
//!        ┌──────────────────┐                  │
//!        │   Processing     │ ← Route + handle │
//!        └──────┬───────────┘                  │
//!               │ Response ready               │
//!               ▼                              │
//!        ┌──────────────────┐                  │
//!        │    Writing       │ ◄────────────────┘
//!        └──────┬───────────┘
//!               ▼
//!            Closed   (also reached directly on EOF or a dropped request)
//! ```

pub mod connection;
pub mod encoding;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
