use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a response to its wire form.
///
/// The blank line and body are only emitted for a non-empty body; the final
/// CRLF is always emitted. A bodiless 200 is therefore `HTTP/1.1 200 OK\r\n\r\n`.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    if !resp.body.is_empty() {
        buf.extend_from_slice(b"\r\n");
        buf.extend_from_slice(&resp.body);
    }

    buf.extend_from_slice(b"\r\n");

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream
                .write(&self.buffer[self.written..])
                .await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::{ResponseBuilder, StatusCode};

    #[test]
    fn empty_body_ends_with_single_extra_crlf() {
        let resp = ResponseBuilder::new(StatusCode::Created)
            .header("X-Id", "7")
            .build();
        assert_eq!(
            serialize_response(&resp),
            b"HTTP/1.1 201 Created\r\nX-Id: 7\r\n\r\n".to_vec()
        );
    }

    #[tokio::test]
    async fn writer_sends_whole_buffer() {
        let resp = Response::not_found();
        let mut out = Vec::new();
        ResponseWriter::new(&resp).write_to_stream(&mut out).await.unwrap();
        assert_eq!(out, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
    }
}
