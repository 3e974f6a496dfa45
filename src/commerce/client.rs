//! `SellAuth` REST client.

use crate::{
    commerce::types::{Checkout, Customer, Invoice, Product},
    config::settings::SellAuthSettings,
    errors::{Error, Result},
};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

/// Public `SellAuth` API root
pub const DEFAULT_BASE_URL: &str = "https://api.sellauth.com/v1";

const ANALYTICS_OVERVIEW_PATH: &str = "analytics/overview";

/// Authenticated client scoped to one shop.
#[derive(Debug, Clone)]
pub struct SellAuthClient {
    http: reqwest::Client,
    base_url: String,
    shop_id: String,
}

impl SellAuthClient {
    /// Builds a client sending bearer auth and JSON headers on every request.
    ///
    /// # Errors
    /// Returns an error if the API key is not a valid header value or the HTTP client
    /// cannot be built.
    pub fn new(settings: &SellAuthSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
            .map_err(|e| Error::config(format!("SELLAUTH_API_KEY is not a valid header: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            shop_id: settings.shop_id.clone(),
        })
    }

    /// Full URL of a shop-scoped resource.
    #[must_use]
    pub fn shop_url(&self, path: &str) -> String {
        format!(
            "{}/shops/{}/{}",
            self.base_url,
            self.shop_id,
            path.trim_start_matches('/')
        )
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = self.shop_url(path);
        debug!(%url, "GET");
        let response = self.http.get(&url).query(query).send().await?;
        read_response(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.shop_url(path);
        debug!(%url, "POST");
        let response = self.http.post(&url).json(body).send().await?;
        read_response(response).await
    }

    /// Lists every product of the shop.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status or a malformed item.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let value = self.get("products", &[]).await?;
        decode_items(value, "products")
    }

    /// Fetches one product.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: &str) -> Result<Product> {
        let value = self.get(&format!("products/{product_id}"), &[]).await?;
        Ok(serde_json::from_value(unwrap_data(value))?)
    }

    /// Creates a checkout session and returns its payment link.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self, email))]
    pub async fn create_checkout(
        &self,
        product_id: &str,
        quantity: u32,
        email: Option<&str>,
        discord_id: Option<u64>,
    ) -> Result<Checkout> {
        let body = checkout_payload(product_id, quantity, email, discord_id);
        let value = self.post("checkout", &body).await?;
        Ok(serde_json::from_value(unwrap_data(value))?)
    }

    /// Lists the most recent invoices.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status or a malformed item.
    #[instrument(skip(self))]
    pub async fn list_invoices(&self, limit: u32) -> Result<Vec<Invoice>> {
        let limit = limit.to_string();
        let value = self.get("invoices", &[("limit", limit.as_str())]).await?;
        decode_items(value, "invoices")
    }

    /// Fetches one invoice.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn get_invoice(&self, invoice_id: &str) -> Result<Invoice> {
        let value = self.get(&format!("invoices/{invoice_id}"), &[]).await?;
        Ok(serde_json::from_value(unwrap_data(value))?)
    }

    /// Refunds an invoice, returning the raw API answer.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn refund_invoice(&self, invoice_id: &str) -> Result<Value> {
        self.post(&format!("invoices/{invoice_id}/refund"), &json!({}))
            .await
    }

    /// Lists wallet transactions as raw JSON objects.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn wallet_transactions(&self, limit: u32) -> Result<Vec<Value>> {
        let limit = limit.to_string();
        let value = self
            .get("wallet/transactions", &[("limit", limit.as_str())])
            .await?;
        Ok(extract_items(value, "transactions"))
    }

    /// Fetches the analytics overview as a raw JSON object.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn analytics_overview(&self) -> Result<Value> {
        let value = self.get(ANALYTICS_OVERVIEW_PATH, &[]).await?;
        Ok(unwrap_data(value))
    }

    /// Looks a customer up by email. `Ok(None)` if the shop has no such customer.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success status.
    #[instrument(skip(self, email))]
    pub async fn get_customer_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let value = self
            .get("customers", &[("email", email), ("perPage", "1")])
            .await?;
        first_customer(value)
            .map(serde_json::from_value)
            .transpose()
            .map_err(Error::from)
    }
}

async fn read_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(commerce_error(status.as_u16(), text));
    }
    Ok(decode_body(&text))
}

/// Builds the error for a non-success answer. JSON bodies are normalized, anything else
/// is kept verbatim.
#[must_use]
pub fn commerce_error(status: u16, body: String) -> Error {
    let message = match serde_json::from_str::<Value>(&body) {
        Ok(value) => value.to_string(),
        Err(_) => body,
    };
    Error::Commerce { status, message }
}

/// Parses a success body. Empty or non-JSON bodies become an empty object.
#[must_use]
pub fn decode_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Pulls a list of items out of a response that is either a bare array or an object
/// holding the array under `key` or `data`.
#[must_use]
pub fn extract_items(value: Value, key: &str) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(key).or_else(|| map.remove("data")) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn decode_items<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>> {
    extract_items(value, key)
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(Error::from))
        .collect()
}

// Single resources are sometimes wrapped in `{"data": {...}}`.
fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_))) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn first_customer(value: Value) -> Option<Value> {
    match value {
        Value::Array(items) => items.into_iter().next(),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items.into_iter().next(),
            Some(customer @ Value::Object(_)) => Some(customer),
            _ => None,
        },
        _ => None,
    }
}

fn checkout_payload(
    product_id: &str,
    quantity: u32,
    email: Option<&str>,
    discord_id: Option<u64>,
) -> Value {
    json!({
        "line_items": [{ "product_id": product_id, "quantity": quantity }],
        "customer_email": email,
        "metadata": { "discord_id": discord_id.map(|id| id.to_string()) },
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn settings(base_url: &str) -> SellAuthSettings {
        SellAuthSettings {
            base_url: base_url.to_string(),
            shop_id: "42".to_string(),
            api_key: "secret".to_string(),
        }
    }

    #[test]
    fn test_shop_url_joins_segments() {
        let client = SellAuthClient::new(&settings("https://api.example.com/v1/")).unwrap();
        assert_eq!(
            client.shop_url("/invoices/7"),
            "https://api.example.com/v1/shops/42/invoices/7"
        );
    }

    #[test]
    fn test_analytics_overview_url() {
        let client = SellAuthClient::new(&settings("https://api.example.com/v1")).unwrap();
        assert_eq!(
            client.shop_url(ANALYTICS_OVERVIEW_PATH),
            "https://api.example.com/v1/shops/42/analytics/overview"
        );
    }

    #[test]
    fn test_rejects_unprintable_api_key() {
        let mut bad = settings(DEFAULT_BASE_URL);
        bad.api_key = "line\nbreak".to_string();
        assert!(matches!(SellAuthClient::new(&bad), Err(Error::Config { .. })));
    }

    #[test]
    fn test_commerce_error_keeps_body() {
        let err = commerce_error(401, r#"{ "message": "Unauthenticated" }"#.to_string());
        assert_eq!(err.to_string(), r#"401 | {"message":"Unauthenticated"}"#);

        let err = commerce_error(502, "Bad Gateway".to_string());
        assert_eq!(err.to_string(), "502 | Bad Gateway");
    }

    #[test]
    fn test_decode_body_tolerates_empty() {
        assert_eq!(decode_body(""), json!({}));
        assert_eq!(decode_body("<html>"), json!({}));
        assert_eq!(decode_body(r#"{"ok":true}"#), json!({"ok": true}));
    }

    #[test]
    fn test_extract_items_shapes() {
        assert_eq!(extract_items(json!([1, 2]), "products").len(), 2);
        assert_eq!(extract_items(json!({"products": [1]}), "products").len(), 1);
        assert_eq!(extract_items(json!({"data": [1, 2, 3]}), "products").len(), 3);
        assert!(extract_items(json!({"data": {"id": 1}}), "products").is_empty());
        assert!(extract_items(json!("nope"), "products").is_empty());
    }

    #[test]
    fn test_decode_items_into_products() {
        let products: Vec<Product> = decode_items(
            json!({"data": [{"id": 1, "name": "Spotify", "price": "2.99", "stock": 5}]}),
            "products",
        )
        .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_deref(), Some("1"));
        assert_eq!(products[0].stock.as_deref(), Some("5"));
    }

    #[test]
    fn test_first_customer_shapes() {
        assert!(first_customer(json!({"data": []})).is_none());
        assert!(first_customer(json!({"total": 0})).is_none());
        assert_eq!(
            first_customer(json!({"data": [{"id": 3}]})),
            Some(json!({"id": 3}))
        );
        assert_eq!(first_customer(json!({"data": {"id": 4}})), Some(json!({"id": 4})));
    }

    #[test]
    fn test_unwrap_data() {
        assert_eq!(unwrap_data(json!({"data": {"id": 1}})), json!({"id": 1}));
        assert_eq!(unwrap_data(json!({"id": 2})), json!({"id": 2}));
    }

    #[test]
    fn test_checkout_payload() {
        let body = checkout_payload("p1", 2, Some("a@b.c"), Some(99));
        assert_eq!(body["line_items"][0]["quantity"], 2);
        assert_eq!(body["metadata"]["discord_id"], "99");

        let anonymous = checkout_payload("p1", 1, None, None);
        assert!(anonymous["metadata"]["discord_id"].is_null());
        assert!(anonymous["customer_email"].is_null());
    }
}
