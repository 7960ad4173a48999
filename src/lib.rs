//! skiff - minimal HTTP/1.1 echo and file server
//!
//! Core library: request parsing, routing, handlers and response writing.

pub mod config;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
