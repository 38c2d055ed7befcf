//! Parsed response input
//!
//! The engine never performs I/O: the fetch layer hands it an
//! already-parsed response body plus the headers of the just-completed
//! request, wrapped in a [`ResponsePage`].

use serde_json::Value;

/// One fetched page: parsed JSON body plus response headers.
#[derive(Debug, Clone)]
pub struct ResponsePage {
    body: Value,
    headers: Vec<(String, String)>,
}

impl ResponsePage {
    /// Wrap a parsed response body with no headers.
    pub fn new(body: Value) -> Self {
        Self {
            body,
            headers: Vec::new(),
        }
    }

    /// Attach a response header, builder style.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The parsed response body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Look up a header value by case-insensitive name.
    ///
    /// Returns the first matching header when several are present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
