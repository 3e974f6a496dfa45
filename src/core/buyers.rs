//! Cumulative spend per buyer, persisted as a flat JSON object.
//!
//! Keys are lower-cased buyer emails, values are running totals. Updates go through
//! a mutex so concurrent webhook deliveries cannot lose increments, and the whole
//! map is rewritten after every purchase.

use crate::errors::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// JSON-file backed buyer totals.
#[derive(Debug)]
pub struct BuyerTotals {
    path: PathBuf,
    totals: Mutex<BTreeMap<String, f64>>,
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

impl BuyerTotals {
    /// Opens the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let totals = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let totals: BTreeMap<String, f64> = serde_json::from_str(&contents)?;
            info!("Loaded {} buyer totals from {}", totals.len(), path.display());
            totals
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            totals: Mutex::new(totals),
        })
    }

    /// Current total for `email` (0 for unknown buyers).
    pub async fn total_for(&self, email: &str) -> f64 {
        self.totals
            .lock()
            .await
            .get(&normalize(email))
            .copied()
            .unwrap_or(0.0)
    }

    /// Adds `amount` to the buyer's total, persists the store and returns the new total.
    ///
    /// The in-memory totals only change once the file has been written.
    pub async fn record_purchase(&self, email: &str, amount: f64) -> Result<f64> {
        let key = normalize(email);
        let mut totals = self.totals.lock().await;

        let new_total = totals.get(&key).copied().unwrap_or(0.0) + amount;
        let mut updated = totals.clone();
        updated.insert(key.clone(), new_total);

        let contents = serde_json::to_string_pretty(&updated)?;
        tokio::fs::write(&self.path, contents).await?;
        *totals = updated;
        debug!("Buyer {key} total is now {new_total:.2}");

        Ok(new_total)
    }

    /// Snapshot of all totals.
    pub async fn snapshot(&self) -> BTreeMap<String, f64> {
        self.totals.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[tokio::test]
    async fn test_accumulates_case_insensitively() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = BuyerTotals::open(dir.path().join("buyers.json"))?;

        assert_eq!(store.record_purchase("Ana@Example.com", 2.5).await?, 2.5);
        assert_eq!(store.record_purchase("ana@example.com ", 1.0).await?, 3.5);
        assert_eq!(store.total_for("ANA@EXAMPLE.COM").await, 3.5);
        assert_eq!(store.total_for("nobody@example.com").await, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_persists_across_reopen() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("buyers.json");

        {
            let store = BuyerTotals::open(&path)?;
            store.record_purchase("a@x.com", 4.0).await?;
            store.record_purchase("b@x.com", 1.25).await?;
        }

        let reopened = BuyerTotals::open(&path)?;
        let snapshot = reopened.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["a@x.com"], 4.0);

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(raw["b@x.com"], 1.25);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_write_leaves_totals_unchanged() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = BuyerTotals::open(dir.path().join("missing").join("buyers.json"))?;

        assert!(store.record_purchase("a@x.com", 5.0).await.is_err());
        assert_eq!(store.total_for("a@x.com").await, 0.0);
        assert!(store.snapshot().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("buyers.json");
        std::fs::write(&path, "not json")?;
        assert!(BuyerTotals::open(&path).is_err());
        Ok(())
    }
}
