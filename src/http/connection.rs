use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::http::parser::{MAX_HEADER_BYTES, ParseError, find_headers_end, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router;

/// Bytes requested from the socket per read.
const READ_CHUNK: usize = 1024;

/// One client connection. Exactly one request is read and at most one
/// response written, after which the stream is dropped.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    /// Prefix of `buffer` already searched for the header terminator
    scanned: usize,
    headers_complete: bool,
    config: Arc<Config>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Arc<Config>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            scanned: 0,
            headers_complete: false,
            config,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_with_deadline().await? {
                        Ok(Some(req)) => ConnectionState::Processing(req),
                        Ok(None) => ConnectionState::Closed,
                        Err(e) => {
                            warn!(error = %e, "rejecting malformed request");
                            match e.status() {
                                Some(status) => ConnectionState::Writing(ResponseWriter::new(&Response::empty(status))),
                                None => ConnectionState::Closed,
                            }
                        }
                    };
                }

                ConnectionState::Processing(req) => {
                    self.state = match Self::handle_request(req, &self.config).await {
                        Some(response) => ConnectionState::Writing(ResponseWriter::new(&response)),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_with_deadline(&mut self) -> anyhow::Result<Result<Option<Request>, ParseError>> {
        let deadline = self.config.read_timeout;
        match deadline {
            Some(limit) => tokio::time::timeout(limit, self.read_request())
                .await
                .map_err(|_| anyhow::anyhow!("timed out after {:?} waiting for request", limit))?,
            None => self.read_request().await,
        }
    }

    /// Reads until a full request (headers plus `content-length` body bytes)
    /// is buffered.
    ///
    /// The outer error is an I/O failure; the inner one a request that can be
    /// answered with 400. `Ok(Ok(None))` means the client went away first.
    pub async fn read_request(&mut self) -> anyhow::Result<Result<Option<Request>, ParseError>> {
        loop {
            if self.headers_complete || self.scan_for_headers_end() {
                match parse_http_request(&self.buffer) {
                    Ok((request, consumed)) => {
                        if consumed < self.buffer.len() {
                            debug!(extra = self.buffer.len() - consumed, "ignoring bytes after request");
                        }
                        return Ok(Ok(Some(request)));
                    }

                    Err(ParseError::Incomplete) => {
                        // Body still arriving → fall through to read
                    }

                    Err(e) => return Ok(Err(e)),
                }
            } else if self.buffer.len() > MAX_HEADER_BYTES {
                return Ok(Err(ParseError::HeadersTooLarge { limit: MAX_HEADER_BYTES }));
            }

            let limit = self.config.max_request_bytes;
            if self.buffer.len() >= limit {
                return Ok(Err(ParseError::TooLarge { limit }));
            }

            self.buffer.reserve(READ_CHUNK);
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                if !self.buffer.is_empty() {
                    debug!(buffered = self.buffer.len(), "client closed mid-request");
                }
                return Ok(Ok(None));
            }
        }
    }

    /// Searches only the bytes that arrived since the last call, backing up
    /// three bytes so a terminator split across reads is still found.
    fn scan_for_headers_end(&mut self) -> bool {
        let from = self.scanned.saturating_sub(3);
        self.headers_complete = find_headers_end(&self.buffer[from..]).is_some();
        self.scanned = self.buffer.len();
        self.headers_complete
    }

    async fn handle_request(req: &Request, config: &Config) -> Option<Response> {
        match router::route(req, config).await {
            Ok(Some(response)) => {
                info!(
                    method = ?req.method,
                    path = %req.path,
                    status = response.status.as_u16(),
                    "request handled"
                );
                Some(response)
            }
            Ok(None) => None,
            Err(e) => {
                error!(method = ?req.method, path = %req.path, error = %e, "handler failed");
                Some(Response::internal_error())
            }
        }
    }
}
