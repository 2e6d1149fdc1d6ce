use std::borrow::Cow;
use std::collections::TryReserveError;

use crate::http::stats::HandlerStats;

/// HTTP request methods.
///
/// Only `GET` carries meaning for the responder, the rest are recognised so
/// the request-line tokenizer can tell "unknown method" from "not HTTP".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// Matching is case-sensitive, as the method token is on the wire.
    ///
    /// # Example
    ///
    /// ```
    /// # use button_web::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }
}

/// Owned copy of one data event's payload.
///
/// The copy is exactly `len + 1` bytes: the payload followed by a NUL
/// terminator. Creating one counts as a buffer acquisition in
/// [`HandlerStats`]; dropping it counts as the matching release, so every
/// exit path of the handler releases it exactly once.
#[derive(Debug)]
pub struct InboundRequest<'a> {
    text: Vec<u8>,
    stats: &'a HandlerStats,
}

impl<'a> InboundRequest<'a> {
    /// Copies `payload` into a freshly allocated, NUL-terminated buffer.
    ///
    /// Fails instead of aborting when the allocation cannot be satisfied.
    pub fn copy_from(payload: &[u8], stats: &'a HandlerStats) -> Result<Self, TryReserveError> {
        let mut text = Vec::new();
        text.try_reserve_exact(payload.len() + 1)?;
        text.extend_from_slice(payload);
        text.push(0);

        stats.buffer_acquired();
        Ok(Self { text, stats })
    }

    /// Payload bytes, without the terminator.
    pub fn bytes(&self) -> &[u8] {
        &self.text[..self.text.len() - 1]
    }

    /// Payload bytes including the trailing NUL.
    pub fn bytes_with_nul(&self) -> &[u8] {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Payload as text for logging. Invalid UTF-8 is replaced.
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.bytes())
    }
}

impl Drop for InboundRequest<'_> {
    fn drop(&mut self) {
        self.stats.buffer_released();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_is_nul_terminated() {
        let stats = HandlerStats::new();
        let req = InboundRequest::copy_from(b"GET / HTTP/1.1", &stats).unwrap();

        assert_eq!(req.len(), 14);
        assert_eq!(req.bytes(), b"GET / HTTP/1.1");
        assert_eq!(req.bytes_with_nul().last(), Some(&0));
        assert_eq!(req.bytes_with_nul().len(), 15);
    }

    #[test]
    fn drop_releases_buffer() {
        let stats = HandlerStats::new();
        {
            let _req = InboundRequest::copy_from(b"abc", &stats).unwrap();
            assert_eq!(stats.buffers_outstanding(), 1);
        }
        let snap = stats.snapshot();
        assert_eq!(snap.buffers_acquired, 1);
        assert_eq!(snap.buffers_released, 1);
    }

    #[test]
    fn empty_payload_still_terminated() {
        let stats = HandlerStats::new();
        let req = InboundRequest::copy_from(b"", &stats).unwrap();
        assert!(req.is_empty());
        assert_eq!(req.bytes_with_nul(), b"\0");
    }

    #[test]
    fn invalid_utf8_is_replaced_for_logging() {
        let stats = HandlerStats::new();
        let req = InboundRequest::copy_from(b"GET /\xff", &stats).unwrap();
        assert!(req.text_lossy().starts_with("GET /"));
    }
}
