use std::collections::HashMap;

/// HTTP request methods.
///
/// Only GET and POST are routed. Every other token, known or not, still
/// parses so that a well-formed request line never turns into a 400; the
/// router drops those requests without answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
    /// Any other token, kept verbatim
    Other(String),
}

/// Represents a parsed HTTP request from a client.
///
/// Header names are stored lowercased, so lookups through [`Request::header`]
/// are case-insensitive. The map belongs to this request alone.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request path as received (e.g., "/echo/abc")
    pub path: String,
    /// `/`-separated components of `path`; the root path is `["/"]`
    pub segments: Vec<String>,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
    /// Request headers, keyed by lowercased name
    pub headers: HashMap<String, String>,
    /// Exactly `content-length` bytes of request body
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Method {
    /// Parses an HTTP method token. Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use skiff::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::Other("get".to_string()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Other(other.to_string()),
        }
    }
}

/// Splits a request path into segments.
///
/// `/` yields `["/"]`. Any other path loses its leading slash and is split on
/// `/`, keeping empty segments, so `/files/` yields `["files", ""]`.
///
/// ```
/// # use skiff::http::request::split_path;
/// assert_eq!(split_path("/"), vec!["/"]);
/// assert_eq!(split_path("/echo/abc"), vec!["echo", "abc"]);
/// ```
pub fn split_path(path: &str) -> Vec<String> {
    if path == "/" {
        return vec!["/".to_string()];
    }

    path.strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .map(str::to_string)
        .collect()
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: None,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Adds a header; the name is lowercased the same way the parser does it.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.as_ref().trim().to_ascii_lowercase(), value.into());
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let path = self.path.ok_or("path missing")?;
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            segments: split_path(&path),
            path,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Returns the path segment at `index`, if present.
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(|s| s.as_str())
    }
}
