//! Request descriptors
//!
//! A [`RequestDescriptor`] is the caller's description of one outbound call.
//! The gateway turns it into a transport request every time it sends, so a
//! retry after a session refresh is byte-for-byte the same request.

use super::error::ClientError;
use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

/// Content type sent unless the caller overrides it
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Description of an outbound request
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    target: String,
    method: Method,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl RequestDescriptor {
    /// Describe a `GET` of `target`, a path under the base URL or an absolute URL
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            method: Method::GET,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(target: impl Into<String>) -> Self {
        Self::new(target)
    }

    pub fn post(target: impl Into<String>) -> Self {
        Self::new(target).with_method(Method::POST)
    }

    pub fn patch(target: impl Into<String>) -> Self {
        Self::new(target).with_method(Method::PATCH)
    }

    pub fn delete(target: impl Into<String>) -> Self {
        Self::new(target).with_method(Method::DELETE)
    }

    /// Set the HTTP method
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set a header, replacing any earlier value under the same name
    ///
    /// Names compare case-insensitively, as HTTP requires.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Append a query parameter
    pub fn query_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Set a raw body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, ClientError> {
        let body = serde_json::to_vec(value)?;
        Ok(self.body(body))
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Caller-supplied headers, without the defaults
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body_bytes(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Default headers with the caller's headers merged over them
    pub fn merged_headers(&self) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::InvalidHeader(format!("{name}: {e}")))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}
