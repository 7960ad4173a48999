//! Request routing.
//!
//! Routes are plain data: an ordered table of (method, first path segment,
//! endpoint). The first matching row wins. GET and POST requests that match
//! nothing get 404; requests with any other method get no response at all.

use crate::config::Config;
use crate::handlers::{self, HandlerResult};
use crate::http::request::{Method, Request};
use crate::http::response::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Root,
    Echo,
    UserAgent,
    GetFile,
    PostFile,
}

/// Matcher for the first path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// The bare `/` path
    Root,
    Literal(&'static str),
}

impl Segment {
    fn matches(&self, segment: Option<&str>) -> bool {
        match self {
            Segment::Root => segment == Some("/"),
            Segment::Literal(name) => segment == Some(*name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub segment: Segment,
    pub endpoint: Endpoint,
}

pub static ROUTES: [Route; 5] = [
    Route { method: Method::GET, segment: Segment::Root, endpoint: Endpoint::Root },
    Route { method: Method::GET, segment: Segment::Literal("user-agent"), endpoint: Endpoint::UserAgent },
    Route { method: Method::GET, segment: Segment::Literal("files"), endpoint: Endpoint::GetFile },
    Route { method: Method::GET, segment: Segment::Literal("echo"), endpoint: Endpoint::Echo },
    Route { method: Method::POST, segment: Segment::Literal("files"), endpoint: Endpoint::PostFile },
];

/// Outcome of routing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Endpoint(Endpoint),
    NotFound,
    /// Unsupported method; nothing is written back.
    Drop,
}

/// Selects the endpoint for `req` from [`ROUTES`].
pub fn resolve(req: &Request) -> Dispatch {
    if !matches!(req.method, Method::GET | Method::POST) {
        return Dispatch::Drop;
    }

    let first = req.segment(0);
    ROUTES
        .iter()
        .find(|r| r.method == req.method && r.segment.matches(first))
        .map_or(Dispatch::NotFound, |r| Dispatch::Endpoint(r.endpoint))
}

impl Endpoint {
    pub async fn handle(self, req: &Request, cfg: &Config) -> HandlerResult {
        match self {
            Endpoint::Root => handlers::root(),
            Endpoint::Echo => handlers::echo(req),
            Endpoint::UserAgent => handlers::user_agent(req),
            Endpoint::GetFile => handlers::get_file(req, cfg).await,
            Endpoint::PostFile => handlers::post_file(req, cfg).await,
        }
    }
}

/// Routes and handles `req`. `Ok(None)` means the request is dropped.
pub async fn route(req: &Request, cfg: &Config) -> Result<Option<Response>, handlers::HandlerError> {
    match resolve(req) {
        Dispatch::Endpoint(endpoint) => endpoint.handle(req, cfg).await.map(Some),
        Dispatch::NotFound => Ok(Some(Response::not_found())),
        Dispatch::Drop => {
            tracing::warn!(method = ?req.method, path = %req.path, "unsupported method, dropping request");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::RequestBuilder;

    fn request(method: Method, path: &str) -> Request {
        RequestBuilder::new().method(method).path(path).build().unwrap()
    }

    #[test]
    fn table_resolves_each_route() {
        assert_eq!(resolve(&request(Method::GET, "/")), Dispatch::Endpoint(Endpoint::Root));
        assert_eq!(resolve(&request(Method::GET, "/echo/x")), Dispatch::Endpoint(Endpoint::Echo));
        assert_eq!(resolve(&request(Method::GET, "/user-agent")), Dispatch::Endpoint(Endpoint::UserAgent));
        assert_eq!(resolve(&request(Method::GET, "/files/a")), Dispatch::Endpoint(Endpoint::GetFile));
        assert_eq!(resolve(&request(Method::POST, "/files/a")), Dispatch::Endpoint(Endpoint::PostFile));
    }

    #[test]
    fn post_only_routes_files() {
        assert_eq!(resolve(&request(Method::POST, "/echo/x")), Dispatch::NotFound);
        assert_eq!(resolve(&request(Method::POST, "/")), Dispatch::NotFound);
    }

    #[test]
    fn other_methods_are_dropped() {
        assert_eq!(resolve(&request(Method::PUT, "/files/a")), Dispatch::Drop);
        assert_eq!(resolve(&request(Method::DELETE, "/")), Dispatch::Drop);
        assert_eq!(resolve(&request(Method::Other("CONNECT".into()), "/")), Dispatch::Drop);
        assert_eq!(resolve(&request(Method::Other("get".into()), "/")), Dispatch::Drop);
    }
}
