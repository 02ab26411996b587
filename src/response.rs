//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! The view layer emits exactly one HTML string per request; this module is
//! where that string becomes an HTTP response hyper can write.

use bytes::Bytes;
use http_body_util::Full;

// ── Status ───────────────────────────────────────────────────────────────────

/// The status codes the scaffold actually produces.
///
/// Routing is total and dispatch degrades to not-found actions, so the
/// interesting range is small. Anything fancier belongs to the proxy in
/// front of the app.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,                  // 200
    NotFound,            // 404
    InternalServerError, // 500
    ServiceUnavailable,  // 503
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok => 200,
            Status::NotFound => 404,
            Status::InternalServerError => 500,
            Status::ServiceUnavailable => 503,
        }
    }
}

// ── ContentType ──────────────────────────────────────────────────────────────

/// Body content types for use with [`ResponseBuilder::bytes`].
pub enum ContentType {
    Html, // text/html; charset=utf-8
    Text, // text/plain; charset=utf-8
}

impl ContentType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "text/html; charset=utf-8",
            Self::Text => "text/plain; charset=utf-8",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK)
///
/// ```rust
/// use plinth::{Response, Status};
///
/// Response::html("<h1>hello</h1>");
/// Response::text("hello");
/// Response::status(Status::NotFound);
/// ```
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: u16,
}

impl Response {
    /// `200 OK` — `text/html; charset=utf-8`.
    pub fn html(body: impl Into<String>) -> Self {
        Self::bytes_raw(ContentType::Html.as_str(), body.into().into_bytes())
    }

    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::bytes_raw(ContentType::Text.as_str(), body.into().into_bytes())
    }

    /// Response with no body.
    pub fn status(code: Status) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code.into() }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok.into() }
    }

    /// Replaces the status code, keeping headers and body.
    pub fn with_status(mut self, code: Status) -> Self {
        self.status = code.into();
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    fn bytes_raw(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            body,
            headers: vec![("content-type".to_owned(), content_type.to_owned())],
            status: Status::Ok.into(),
        }
    }

    pub(crate) fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(Full::new(Bytes::from(self.body))).unwrap_or_else(|e| {
            tracing::error!("malformed response: {e}");
            let mut res = http::Response::new(Full::new(Bytes::new()));
            *res.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
            res
        })
    }
}

// ── ResponseBuilder ──────────────────────────────────────────────────────────

/// Fluent builder for [`Response`]. Obtain via [`Response::builder()`].
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: u16,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code.into();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with an HTML body.
    pub fn html(self, body: impl Into<String>) -> Response {
        self.finish(ContentType::Html.as_str(), body.into().into_bytes())
    }

    /// Terminate with a typed body.
    pub fn bytes(self, content_type: ContentType, body: Vec<u8>) -> Response {
        self.finish(content_type.as_str(), body)
    }

    /// Terminate with no body.
    pub fn no_body(self) -> Response {
        Response { body: Vec::new(), headers: self.headers, status: self.status }
    }

    fn finish(self, content_type: &str, body: Vec<u8>) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response { body, headers, status: self.status }
    }
}

// ── IntoResponse ─────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implemented for the types an action is allowed to return. Strings render
/// as HTML — the scaffold's views produce markup, not plain text.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        Response::html(self)
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        Response::html(self)
    }
}

/// Return a [`Status`] directly from an action: `return Status::NotFound`.
impl IntoResponse for Status {
    fn into_response(self) -> Response {
        Response::status(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_shortcut_sets_content_type() {
        let res = Response::html("<p>ok</p>");
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"<p>ok</p>");
        assert!(res.headers.iter().any(|(k, v)| k == "content-type" && v.starts_with("text/html")));
    }

    #[test]
    fn with_status_keeps_body() {
        let res = Response::html("gone").with_status(Status::NotFound);
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.body(), b"gone");
    }

    #[test]
    fn into_http_carries_headers() {
        let res = Response::builder()
            .status(Status::NotFound)
            .header("x-request-id", "abc")
            .html("missing")
            .into_http();
        assert_eq!(res.status(), http::StatusCode::NOT_FOUND);
        assert_eq!(res.headers().get("x-request-id").unwrap(), "abc");
    }
}
