//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Shorthand for a 200 response with a JSON body.
    pub fn ok_json(body: impl Into<Vec<u8>>) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(200, headers, body.into())
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::Decode(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let message = self.text().unwrap_or_else(|_| "Unknown error".to_string());
            Err(FetchError::Status {
                status: self.status,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct CartReply {
        success: bool,
        message: Option<String>,
    }

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    // === Status Tests ===

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(302, b"").is_success());
        assert!(!make_response(403, b"").is_success());
    }

    #[test]
    fn test_error_for_status_keeps_body_as_message() {
        let err = make_response(403, b"CSRF verification failed")
            .error_for_status()
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                status: 403,
                message: "CSRF verification failed".to_string()
            }
        );
        assert_eq!(err.status(), Some(403));
    }

    // === Body Tests ===

    #[test]
    fn test_json_with_optional_message() {
        let resp = Response::ok_json(br#"{"success": false, "message": "Out of stock"}"#.to_vec());
        let reply: CartReply = resp.json().unwrap();
        assert_eq!(
            reply,
            CartReply {
                success: false,
                message: Some("Out of stock".to_string())
            }
        );

        let resp = Response::ok_json(br#"{"success": true}"#.to_vec());
        let reply: CartReply = resp.json().unwrap();
        assert!(reply.success);
        assert_eq!(reply.message, None);
    }

    #[test]
    fn test_json_rejects_html_error_page() {
        let resp = make_response(200, b"<html>Server Error</html>");
        let result: Result<CartReply, _> = resp.json();
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_text_invalid_utf8() {
        assert!(make_response(200, &[0xff, 0xfe]).text().is_err());
    }

    #[test]
    fn test_header_case_insensitive() {
        let resp = Response::ok_json(Vec::new());
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.header("X-Missing"), None);
    }
}
