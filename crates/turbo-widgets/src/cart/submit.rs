//! Asynchronous add-to-cart submission and cart badge refresh.

use serde::{Deserialize, Serialize};
use turbo_data::{FetchClient, Transport};
use web_time::{Duration, Instant};

use super::control::SubmitControl;
use super::form::AddToCartForm;
use crate::error::WidgetError;
use crate::notify::{NotificationCenter, NotificationKind};

/// Cart endpoint tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Delay between a successful add and the page reload.
    pub reload_delay_ms: u64,
    pub count_url: String,
    pub success_message: String,
    pub error_message: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            reload_delay_ms: 700,
            count_url: "/cart/count/".to_string(),
            success_message: "Added to cart".to_string(),
            error_message: "Error adding to cart".to_string(),
        }
    }
}

/// JSON body returned by the add endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct CartCount {
    count: u64,
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    Added { message: Option<String> },
    Rejected { message: Option<String> },
    /// Network failure or an unreadable reply.
    Failed { reason: String },
}

/// Follow-up work for the host after an outcome was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartEffects {
    /// Reload the page at this instant.
    pub reload_at: Option<Instant>,
    /// Refresh the cart count badge.
    pub refresh_count: bool,
}

/// POST the form and decode the reply. The body is read as JSON whatever the
/// status code, since the backend reports refusals in-band.
pub async fn post_add_to_cart<T: Transport>(
    client: &FetchClient<T>,
    form: &AddToCartForm,
) -> Result<CartResponse, WidgetError> {
    let response = client
        .post(form.action())
        .header("X-Requested-With", "XMLHttpRequest")
        .header("X-CSRFToken", form.csrf_token().unwrap_or_default())
        .accept("application/json")
        .form(form.fields().iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .send()
        .await?;

    response
        .json::<CartResponse>()
        .map_err(|e| WidgetError::MalformedResponse(e.to_string()))
}

/// Submit the form and classify the result. Never fails; failures become
/// [`CartOutcome::Failed`]. There is no retry.
pub async fn send_add_to_cart<T: Transport>(
    client: &FetchClient<T>,
    form: &AddToCartForm,
) -> CartOutcome {
    match post_add_to_cart(client, form).await {
        Ok(CartResponse {
            success: true,
            message,
        }) => CartOutcome::Added { message },
        Ok(CartResponse {
            success: false,
            message,
        }) => {
            tracing::warn!(action = form.action(), ?message, "add to cart rejected");
            CartOutcome::Rejected { message }
        }
        Err(e) => {
            tracing::warn!(action = form.action(), error = %e, "add to cart failed");
            CartOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Reflect an outcome on the button and in the notification area.
pub fn apply_outcome(
    outcome: &CartOutcome,
    control: &mut SubmitControl,
    notices: &mut NotificationCenter,
    config: &CartConfig,
    now: Instant,
) -> CartEffects {
    match outcome {
        CartOutcome::Added { message } => {
            let text = non_empty(message).unwrap_or(&config.success_message);
            notices.show(NotificationKind::Success, text, now);
            control.mark_added();
            CartEffects {
                reload_at: Some(now + Duration::from_millis(config.reload_delay_ms)),
                refresh_count: true,
            }
        }
        CartOutcome::Rejected { message } => {
            let text = non_empty(message).unwrap_or(&config.error_message);
            notices.show(NotificationKind::Danger, text, now);
            control.restore();
            CartEffects::default()
        }
        CartOutcome::Failed { .. } => {
            notices.show(NotificationKind::Danger, config.error_message.as_str(), now);
            control.restore();
            CartEffects::default()
        }
    }
}

fn non_empty(message: &Option<String>) -> Option<&String> {
    message.as_ref().filter(|m| !m.trim().is_empty())
}

/// Current number of items in the cart, for the header badge.
pub async fn fetch_cart_count<T: Transport>(
    client: &FetchClient<T>,
    config: &CartConfig,
) -> Result<u64, WidgetError> {
    let response = client
        .get(config.count_url.as_str())
        .accept("application/json")
        .send()
        .await?
        .error_for_status()?;
    let body: CartCount = response
        .json()
        .map_err(|e| WidgetError::MalformedResponse(e.to_string()))?;
    Ok(body.count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationConfig;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::collections::HashMap;
    use turbo_data::{FetchError, RequestBuilder, Response};

    struct Fixed(Result<Response, FetchError>);

    #[async_trait(?Send)]
    impl Transport for Fixed {
        async fn send(&self, _request: RequestBuilder) -> Result<Response, FetchError> {
            self.0.clone()
        }
    }

    fn form() -> AddToCartForm {
        AddToCartForm::new("/cart/add/7/")
            .field("csrfmiddlewaretoken", "abc")
            .field("quantity", "1")
    }

    fn outcome_for(reply: Result<Response, FetchError>) -> CartOutcome {
        let client = FetchClient::new(Fixed(reply));
        block_on(send_add_to_cart(&client, &form()))
    }

    // === Classification Tests ===

    #[test]
    fn test_success() {
        let outcome = outcome_for(Ok(Response::ok_json(r#"{"success": true}"#)));
        assert_eq!(outcome, CartOutcome::Added { message: None });
    }

    #[test]
    fn test_rejection_with_error_status_still_read() {
        let reply = Response::new(
            400,
            HashMap::new(),
            br#"{"success": false, "message": "Out of stock"}"#.to_vec(),
        );
        assert_eq!(
            outcome_for(Ok(reply)),
            CartOutcome::Rejected {
                message: Some("Out of stock".to_string())
            }
        );
    }

    #[test]
    fn test_transport_and_parse_failures() {
        assert!(matches!(
            outcome_for(Err(FetchError::Network("offline".into()))),
            CartOutcome::Failed { .. }
        ));
        assert!(matches!(
            outcome_for(Ok(Response::ok_json("<html>"))),
            CartOutcome::Failed { .. }
        ));
    }

    // === Effects Tests ===

    #[test]
    fn test_apply_success_uses_default_message() {
        let t0 = Instant::now();
        let mut control = SubmitControl::new("Add");
        let mut notices = NotificationCenter::new(&NotificationConfig::default());
        control.begin();

        let effects = apply_outcome(
            &CartOutcome::Added {
                message: Some(" ".to_string()),
            },
            &mut control,
            &mut notices,
            &CartConfig::default(),
            t0,
        );

        assert_eq!(effects.reload_at, Some(t0 + Duration::from_millis(700)));
        assert!(effects.refresh_count);
        assert!(control.disabled());
        let note = notices.current().unwrap();
        assert_eq!(note.kind, NotificationKind::Success);
        assert_eq!(note.message, "Added to cart");
    }

    #[test]
    fn test_apply_failure_restores_control() {
        let t0 = Instant::now();
        let mut control = SubmitControl::new("Add");
        let mut notices = NotificationCenter::new(&NotificationConfig::default());
        control.begin();

        let effects = apply_outcome(
            &CartOutcome::Failed {
                reason: "offline".to_string(),
            },
            &mut control,
            &mut notices,
            &CartConfig::default(),
            t0,
        );

        assert_eq!(effects, CartEffects::default());
        assert!(!control.disabled());
        assert_eq!(notices.current().unwrap().message, "Error adding to cart");
        assert_eq!(notices.current().unwrap().kind, NotificationKind::Danger);
    }

    // === Count Tests ===

    #[test]
    fn test_fetch_cart_count() {
        let client = FetchClient::new(Fixed(Ok(Response::ok_json(r#"{"count": 4}"#))));
        let count = block_on(fetch_cart_count(&client, &CartConfig::default())).unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_fetch_cart_count_http_error() {
        let client = FetchClient::new(Fixed(Ok(Response::new(500, HashMap::new(), Vec::new()))));
        let err = block_on(fetch_cart_count(&client, &CartConfig::default())).unwrap_err();
        assert!(matches!(err, WidgetError::Fetch(ref e) if e.status() == Some(500)));
    }
}
