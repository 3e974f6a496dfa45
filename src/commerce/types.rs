//! Response payloads returned by the `SellAuth` API.
//!
//! The API is loose about types (ids and prices arrive as numbers or strings, fields go
//! missing), so every field is optional or has a default and numeric-looking values are
//! accepted in either form.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// Deserializers tolerant to numbers-as-strings and strings-as-numbers.
pub mod lenient {
    use super::{Deserialize, Deserializer, Value, de};

    /// Any scalar as a display string; `null` or missing as `None`.
    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        })
    }

    /// A monetary amount given as a number or a numeric string; `null` or missing as 0.
    pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(0.0),
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| de::Error::custom("amount is not representable as f64")),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|e| de::Error::custom(format!("invalid amount '{s}': {e}"))),
            Some(other) => Err(de::Error::custom(format!("invalid amount: {other}"))),
        }
    }
}

/// A shop product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Product identifier
    #[serde(deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Price as reported by the API
    #[serde(deserialize_with = "lenient::opt_string")]
    pub price: Option<String>,
    /// Units in stock as reported by the API
    #[serde(deserialize_with = "lenient::opt_string")]
    pub stock: Option<String>,
}

/// Product summary embedded in an invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceProduct {
    /// Product name
    pub name: Option<String>,
}

/// An invoice (completed or pending transaction).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    /// Invoice identifier
    #[serde(deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    /// Payment status
    pub status: Option<String>,
    /// Amount charged
    #[serde(deserialize_with = "lenient::amount")]
    pub total: f64,
    /// ISO currency code
    pub currency: Option<String>,
    /// Units bought
    #[serde(deserialize_with = "lenient::opt_string")]
    pub quantity: Option<String>,
    /// Product bought
    pub product: Option<InvoiceProduct>,
    /// Payment method
    pub gateway: Option<String>,
    /// Buyer email
    pub buyer_email: Option<String>,
}

impl Invoice {
    /// Name of the product bought, or a generic placeholder.
    #[must_use]
    pub fn product_name(&self) -> &str {
        self.product
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .unwrap_or("Product")
    }

    /// Currency code, defaulting to EUR.
    #[must_use]
    pub fn currency_code(&self) -> &str {
        self.currency.as_deref().unwrap_or("EUR")
    }
}

/// A shop customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    /// Customer identifier
    #[serde(deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    /// Alternative identifier field used by some endpoints
    #[serde(deserialize_with = "lenient::opt_string")]
    pub customer_id: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Store balance as reported by the API
    #[serde(deserialize_with = "lenient::opt_string")]
    pub balance: Option<String>,
}

impl Customer {
    /// Whichever identifier the API returned.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref().or(self.customer_id.as_deref())
    }
}

/// A created checkout session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Checkout {
    /// Payment link
    pub url: Option<String>,
    /// Payment link under its alternative name
    pub checkout_url: Option<String>,
}

impl Checkout {
    /// The payment link, whichever field carried it.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().or(self.checkout_url.as_deref())
    }
}
