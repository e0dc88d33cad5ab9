//! HTTP request builder.

use std::collections::BTreeMap;

/// Content type for URL-encoded form submissions.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A fully described outbound request, handed to a [`Transport`](crate::Transport).
///
/// Headers are kept in a sorted map so transports and tests see a stable order.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the request body as URL-encoded form fields, in the given order.
    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.headers
            .insert("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string());
        self.body = Some(encode_form(fields).into_bytes());
        self
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// The request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The absolute or relative request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// All request headers.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Look up a header by exact name.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// The request body, if any.
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Encode key/value pairs as `application/x-www-form-urlencoded`.
pub fn encode_form<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fields
        .into_iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                encode_component(k.as_ref()),
                encode_component(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

// Form encoding uses '+' for spaces rather than %20.
fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_body_sets_content_type() {
        let req = RequestBuilder::new(Method::Post, "/cart/add/42/")
            .form([("quantity", "2"), ("csrfmiddlewaretoken", "abc")]);

        assert_eq!(req.header_value("Content-Type"), Some(FORM_CONTENT_TYPE));
        assert_eq!(
            req.body_bytes(),
            Some("quantity=2&csrfmiddlewaretoken=abc".as_bytes())
        );
    }

    #[test]
    fn test_form_encoding_escapes_reserved_characters() {
        let encoded = encode_form([("note", "gift wrap & bow"), ("size", "10/12")]);
        assert_eq!(encoded, "note=gift+wrap+%26+bow&size=10%2F12");
    }

    #[test]
    fn test_method_strings() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
