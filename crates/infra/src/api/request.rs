//! Request descriptor and response envelope
//!
//! A descriptor is built fresh for every call and carries its attempt flag,
//! which is what bounds the refresh-and-retry loop to one retry.

use reqwest::Method;
use serde_json::Value;

/// Which send of a logical call this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    First,
    /// Re-issue after a successful token refresh; never refreshes again
    Retry,
}

/// One API call: path, method, optional JSON body and attempt flag
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    path: String,
    method: Method,
    body: Option<Value>,
    attempt: Attempt,
}

impl RequestDescriptor {
    /// First attempt without a body. The path gains a leading `/` if missing.
    pub fn new(method: Method, path: impl AsRef<str>) -> Self {
        Self { path: normalize_path(path.as_ref()), method, body: None, attempt: Attempt::First }
    }

    /// `GET` request for `path`
    pub fn get(path: impl AsRef<str>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` request for `path`
    pub fn post(path: impl AsRef<str>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PATCH` request for `path`
    pub fn patch(path: impl AsRef<str>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// `DELETE` request for `path`
    pub fn delete(path: impl AsRef<str>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Same request, flagged as the post-refresh retry
    #[must_use]
    pub fn into_retry(mut self) -> Self {
        self.attempt = Attempt::Retry;
        self
    }

    /// Normalized path, always starting with `/`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// HTTP method
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// JSON body, if any
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Whether this is the first send or the retry
    pub const fn attempt(&self) -> Attempt {
        self.attempt
    }

    /// True for the post-refresh retry
    pub fn is_retry(&self) -> bool {
        self.attempt == Attempt::Retry
    }

    /// Absolute URL under `base_url` (which carries no trailing slash)
    pub fn url(&self, base_url: &str) -> String {
        format!("{base_url}{}", self.path)
    }
}

/// Prefix `/` unless already present
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Interpret a response body
///
/// Empty → `null`; valid JSON → the parsed value; anything else → the raw
/// text as a JSON string, so non-JSON error pages still reach the caller.
pub fn parse_envelope(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn normalizes_leading_slash() {
        assert_eq!(RequestDescriptor::get("jobs").path(), "/jobs");
        assert_eq!(RequestDescriptor::get("/jobs").path(), "/jobs");
        assert_eq!(
            RequestDescriptor::get("auth/login").url("https://api.example.com"),
            "https://api.example.com/auth/login"
        );
    }

    #[test]
    fn retry_keeps_path_method_and_body() {
        let original = RequestDescriptor::post("/jobs").with_body(json!({ "title": "Cook" }));
        let retry = original.clone().into_retry();

        assert_eq!(original.attempt(), Attempt::First);
        assert!(retry.is_retry());
        assert_eq!(retry.path(), original.path());
        assert_eq!(retry.method(), original.method());
        assert_eq!(retry.body(), original.body());
    }

    #[test]
    fn envelope_parsing() {
        assert_eq!(parse_envelope(""), Value::Null);
        assert_eq!(parse_envelope("  \n"), Value::Null);
        assert_eq!(parse_envelope(r#"{"ok":true}"#), json!({ "ok": true }));
        assert_eq!(parse_envelope("<h1>Bad Gateway</h1>"), json!("<h1>Bad Gateway</h1>"));
    }
}
