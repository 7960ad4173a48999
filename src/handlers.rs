//! Built-in endpoints.
//!
//! Each handler turns a parsed request into a single [`Response`]. Filesystem
//! failures past the initial lookup come back as [`HandlerError`] and are
//! answered with 500 by the connection; they never take the process down.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tokio::fs;

use crate::config::Config;
use crate::http::encoding;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("reading {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("writing {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("encoding response body: {0}")]
    Encoding(#[source] io::Error),
}

pub type HandlerResult = Result<Response, HandlerError>;

/// `GET /`: status line only.
pub fn root() -> HandlerResult {
    Ok(Response::empty(StatusCode::Ok))
}

/// `GET /echo/{text}`: returns `text`, gzipped when the client accepts it.
pub fn echo(req: &Request) -> HandlerResult {
    let Some(text) = req.segment(1) else {
        return Ok(Response::not_found());
    };

    let builder = ResponseBuilder::new(StatusCode::Ok).header("Content-Type", "text/plain");

    let response = match encoding::negotiate(req.header("accept-encoding")) {
        Some(enc) => {
            let body = enc
                .encode(text.as_bytes())
                .map_err(HandlerError::Encoding)?;
            builder
                .header("Content-Encoding", enc.as_str())
                .header("Content-Length", body.len())
                .body(body)
        }
        None => builder
            .header("Content-Length", text.len())
            .body(text.as_bytes().to_vec()),
    };

    Ok(response.build())
}

/// `GET /user-agent`: returns the `User-Agent` header verbatim.
pub fn user_agent(req: &Request) -> HandlerResult {
    match req.header("user-agent") {
        Some(agent) => Ok(ResponseBuilder::new(StatusCode::Ok)
            .content("text/plain", agent.as_bytes().to_vec())
            .build()),
        None => {
            tracing::warn!(path = %req.path, "user-agent header missing");
            Ok(Response::bad_request())
        }
    }
}

/// `GET /files/{name}`: serves a file from the configured directory.
pub async fn get_file(req: &Request, cfg: &Config) -> HandlerResult {
    let Some(path) = file_path(req, cfg) else {
        return Ok(Response::not_found());
    };

    if let Err(e) = fs::metadata(&path).await {
        tracing::debug!(path = %path.display(), error = %e, "file not found");
        return Ok(Response::not_found());
    }

    let contents = fs::read(&path)
        .await
        .map_err(|source| HandlerError::Read { path: path.clone(), source })?;

    Ok(ResponseBuilder::new(StatusCode::Ok)
        .content("application/octet-stream", contents)
        .build())
}

/// `POST /files/{name}`: creates or truncates the file and writes the body.
pub async fn post_file(req: &Request, cfg: &Config) -> HandlerResult {
    let Some(path) = file_path(req, cfg) else {
        return Ok(Response::not_found());
    };

    fs::write(&path, &req.body)
        .await
        .map_err(|source| HandlerError::Write { path: path.clone(), source })?;

    tracing::info!(path = %path.display(), bytes = req.body.len(), "file written");
    Ok(Response::empty(StatusCode::Created))
}

fn file_path(req: &Request, cfg: &Config) -> Option<PathBuf> {
    req.segment(1)
        .filter(|name| !name.is_empty())
        .map(|name| cfg.file_path(name))
}
