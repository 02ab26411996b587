//! Output view.
//!
//! The final stop of every page render: one HTML string in, one HTTP
//! response out. Controllers obtain a view via
//! [`Context::view`](crate::Context::view) rather than constructing
//! responses themselves, keeping the output surface in one place.

use crate::response::Response;

#[derive(Clone, Copy, Debug, Default)]
pub struct View;

impl View {
    pub fn new() -> Self {
        Self
    }

    /// Emits `html` as a `200 OK` `text/html` response.
    pub fn render(&self, html: impl Into<String>) -> Response {
        Response::html(html)
    }
}
