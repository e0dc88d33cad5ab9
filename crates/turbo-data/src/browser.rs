//! Browser `fetch` transport.

use std::collections::HashMap;

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::{FetchError, RequestBuilder, Response, Transport};

/// Sends requests through `window.fetch` with same-origin credentials, so the
/// session and CSRF cookies travel with cart submissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let window = web_sys::window().ok_or(FetchError::Unsupported("no window"))?;

        let init = web_sys::RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_credentials(web_sys::RequestCredentials::SameOrigin);

        let headers = web_sys::Headers::new().map_err(js_error)?;
        for (key, value) in &request.headers {
            headers.append(key, value).map_err(js_error)?;
        }
        init.set_headers(&headers);

        if let Some(body) = &request.body {
            let bytes = js_sys::Uint8Array::from(body.as_slice());
            init.set_body(&bytes.into());
        }

        let js_request = web_sys::Request::new_with_str_and_init(&request.url, &init)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {:?}", request.url, e)))?;

        let value = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(js_error)?;
        let js_response: web_sys::Response = value.dyn_into().map_err(js_error)?;

        let mut response_headers = HashMap::new();
        if let Ok(Some(content_type)) = js_response.headers().get("content-type") {
            response_headers.insert("Content-Type".to_string(), content_type);
        }

        let buffer = JsFuture::from(js_response.array_buffer().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();

        Ok(Response::new(js_response.status(), response_headers, body))
    }
}

fn js_error(value: JsValue) -> FetchError {
    FetchError::Network(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}
