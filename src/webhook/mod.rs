//! Sales webhook receiver.
//!
//! Accepts payment notifications from the store, acknowledges them immediately and
//! processes each one on a background task: fetch the invoice, add its total to the
//! buyer's lifetime spend and post a purchase announcement to Discord.

/// Purchase announcement embed
pub mod announcement;

use crate::{
    commerce::SellAuthClient,
    config::settings::WebhookSettings,
    core::buyers::BuyerTotals,
    errors::Result,
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use poise::serenity_prelude as serenity;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Key used for invoices without a buyer email.
pub const DEFAULT_BUYER: &str = "customer";

/// Shared state of the webhook server.
pub struct WebhookState {
    /// Commerce API client used to fetch invoices
    pub sellauth: SellAuthClient,
    /// Lifetime spend per buyer
    pub buyers: BuyerTotals,
    /// Discord REST client
    pub discord: Arc<serenity::Http>,
    /// Channel receiving announcements
    pub channel_id: serenity::ChannelId,
    /// Shop name shown in announcements
    pub shop_name: String,
}

impl WebhookState {
    /// Builds the state from settings, opening the buyer totals file.
    pub fn from_settings(settings: &WebhookSettings) -> Result<Self> {
        Ok(Self {
            sellauth: SellAuthClient::new(&settings.sellauth)?,
            buyers: BuyerTotals::open(&settings.buyers_file)?,
            discord: Arc::new(serenity::Http::new(&settings.discord_token)),
            channel_id: serenity::ChannelId::new(settings.channel_id),
            shop_name: settings.shop_name.clone(),
        })
    }
}

/// Pulls `json.data.invoice_id` out of a notification. Accepts strings and numbers.
#[must_use]
pub fn extract_invoice_id(payload: &Value) -> Option<String> {
    match payload.get("json")?.get("data")?.get("invoice_id")? {
        Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Fetches an invoice, records the purchase and posts the announcement.
///
/// Returns the buyer's new lifetime total.
#[instrument(skip(state))]
pub async fn process_invoice(state: &WebhookState, invoice_id: &str) -> Result<f64> {
    let invoice = state.sellauth.get_invoice(invoice_id).await?;
    let buyer = invoice
        .buyer_email
        .as_deref()
        .filter(|email| !email.trim().is_empty())
        .unwrap_or(DEFAULT_BUYER);

    let lifetime_total = state.buyers.record_purchase(buyer, invoice.total).await?;

    let embed = announcement::announcement_embed(&invoice, lifetime_total, &state.shop_name);
    state
        .channel_id
        .send_message(&*state.discord, serenity::CreateMessage::new().embed(embed))
        .await?;

    info!(
        total = invoice.total,
        lifetime_total, "Purchase announced"
    );
    Ok(lifetime_total)
}

async fn health() -> &'static str {
    "NuvixMarket x SellAuth webhook ✅"
}

async fn receive_webhook(
    State(state): State<Arc<WebhookState>>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    debug!(%payload, "Webhook received");

    let Some(invoice_id) = extract_invoice_id(&payload) else {
        warn!("Webhook without invoice_id");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invoice_id not found" })),
        );
    };

    tokio::spawn(async move {
        if let Err(e) = process_invoice(&state, &invoice_id).await {
            error!(%invoice_id, "Failed to process invoice: {e}");
        }
    });

    (StatusCode::OK, Json(json!({ "ok": true })))
}

/// HTTP routes of the webhook receiver.
pub fn router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/webhook", post(receive_webhook))
        .with_state(state)
}

/// Binds `0.0.0.0:<port>` and serves until the process exits.
#[instrument(skip_all, fields(port = settings.port))]
pub async fn serve(settings: &WebhookSettings) -> Result<()> {
    let state = Arc::new(WebhookState::from_settings(settings)?);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", settings.port)).await?;
    info!("Sales webhook listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::settings::SellAuthSettings;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request},
    };
    use std::path::Path;
    use tower::ServiceExt;

    fn test_state(dir: &Path) -> Result<Arc<WebhookState>> {
        let sellauth = SellAuthClient::new(&SellAuthSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            shop_id: "1".to_string(),
            api_key: "test".to_string(),
        })?;
        Ok(Arc::new(WebhookState {
            sellauth,
            buyers: BuyerTotals::open(dir.join("buyers.json"))?,
            discord: Arc::new(serenity::Http::new("test-token")),
            channel_id: serenity::ChannelId::new(1),
            shop_name: "TestShop".to_string(),
        }))
    }

    fn post_webhook(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Result<Value> {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| crate::errors::Error::config(e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    #[test]
    fn test_extract_invoice_id() {
        assert_eq!(
            extract_invoice_id(&json!({"json": {"data": {"invoice_id": "inv_9"}}})),
            Some("inv_9".to_string())
        );
        assert_eq!(
            extract_invoice_id(&json!({"json": {"data": {"invoice_id": 42}}})),
            Some("42".to_string())
        );
        assert_eq!(extract_invoice_id(&json!({"json": {"data": {"invoice_id": ""}}})), None);
        assert_eq!(extract_invoice_id(&json!({"data": {"invoice_id": "x"}})), None);
        assert_eq!(extract_invoice_id(&Value::Null), None);
    }

    #[tokio::test]
    async fn test_health() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let request = Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = router(test_state(dir.path())?)
            .oneshot(request)
            .await
            .map_err(|e| crate::errors::Error::config(e.to_string()))?;
        assert_eq!(response.status(), StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_invoice_id_is_rejected_without_side_effects() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let state = test_state(dir.path())?;

        for body in [r#"{"json": {"data": {}}}"#, "not json", ""] {
            let response = router(Arc::clone(&state))
                .oneshot(post_webhook(body))
                .await
                .map_err(|e| crate::errors::Error::config(e.to_string()))?;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await?, json!({"error": "invoice_id not found"}));
        }

        assert!(state.buyers.snapshot().await.is_empty());
        assert!(!dir.path().join("buyers.json").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_valid_notification_is_acknowledged() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let response = router(test_state(dir.path())?)
            .oneshot(post_webhook(r#"{"json": {"data": {"invoice_id": 7}}}"#))
            .await
            .map_err(|e| crate::errors::Error::config(e.to_string()))?;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await?, json!({"ok": true}));
        Ok(())
    }
}
