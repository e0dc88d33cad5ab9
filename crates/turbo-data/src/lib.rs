//! HTTP client utilities for TurboCommerce storefront widgets.
//!
//! Requests are described with a [`RequestBuilder`] and handed to a
//! [`Transport`]. In the browser that is [`BrowserTransport`] (the `browser`
//! feature); tests and server-side renderers supply their own.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_data::{BrowserTransport, FetchClient};
//!
//! let client = FetchClient::new(BrowserTransport);
//!
//! let response = client
//!     .post("/cart/add/42/")
//!     .header("X-CSRFToken", token)
//!     .form([("quantity", "1")])
//!     .send()
//!     .await?;
//! ```

mod error;
mod request;
mod response;

#[cfg(feature = "browser")]
mod browser;

use std::collections::BTreeMap;
use std::rc::Rc;

use async_trait::async_trait;

pub use error::FetchError;
pub use request::{encode_form, Method, RequestBuilder, FORM_CONTENT_TYPE};
pub use response::Response;

#[cfg(feature = "browser")]
pub use browser::BrowserTransport;

/// Something that can carry a request to a server and bring back the reply.
///
/// Futures are not `Send`: storefront widgets run on the single browser
/// event loop.
#[async_trait(?Send)]
pub trait Transport {
    /// Send a request and wait for the full response.
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Rc<T> {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        (**self).send(request).await
    }
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        (**self).send(request).await
    }
}

/// HTTP client for making outbound requests.
#[derive(Debug, Clone)]
pub struct FetchClient<T> {
    transport: T,
    base_url: Option<String>,
    default_headers: BTreeMap<String, String>,
}

impl<T: Transport> FetchClient<T> {
    /// Create a new HTTP client over a transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: BTreeMap::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to relative requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a, T> {
    client: &'a FetchClient<T>,
    builder: RequestBuilder,
}

impl<'a, T: Transport> ClientRequestBuilder<'a, T> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as URL-encoded form fields.
    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.builder = self.builder.form(fields);
        self
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// Inspect the request without sending it.
    pub fn build(self) -> RequestBuilder {
        self.builder
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.client.transport.send(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, RequestBuilder, Response, Transport};
}
