//! Role configuration loading from environment variables.
//!
//! Reads `OWNER_ID` plus the comma-separated `ADMIN_ROLE_IDS`, `STAFF_ROLE_IDS` and
//! `USER_ROLE_IDS` lists. Parts that are not plain digits are ignored so a stray space
//! or typo never locks the whole guild out.

use crate::{
    core::privilege::RoleConfig,
    errors::{Error, Result},
};

/// Parses a comma-separated list of Discord IDs, skipping anything that is not a number.
#[must_use]
pub fn parse_ids(value: &str) -> Vec<u64> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|part| part.parse().ok())
        .collect()
}

/// Builds a [`RoleConfig`] from an arbitrary key lookup.
///
/// `OWNER_ID` is required; every role list defaults to empty.
pub fn load_role_config<F>(lookup: F) -> Result<RoleConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let owner_raw = lookup("OWNER_ID").ok_or_else(|| Error::config("OWNER_ID is not set"))?;
    let owner_id = owner_raw
        .trim()
        .parse::<u64>()
        .map_err(|e| Error::config(format!("OWNER_ID is not a valid Discord ID: {e}")))?;

    let ids = |key: &str| lookup(key).map(|v| parse_ids(&v)).unwrap_or_default();

    Ok(RoleConfig::new(
        owner_id,
        ids("ADMIN_ROLE_IDS"),
        ids("STAFF_ROLE_IDS"),
        ids("USER_ROLE_IDS"),
    ))
}

/// Builds a [`RoleConfig`] from the process environment.
pub fn load_role_config_from_env() -> Result<RoleConfig> {
    load_role_config(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_ids_skips_garbage() {
        assert_eq!(parse_ids("1, 2,abc, ,3x,4"), vec![1, 2, 4]);
        assert!(parse_ids("").is_empty());
        assert!(parse_ids("-5").is_empty());
    }

    #[test]
    fn test_load_role_config() {
        let config = load_role_config(lookup_from(&[
            ("OWNER_ID", "42"),
            ("ADMIN_ROLE_IDS", "100,101"),
            ("STAFF_ROLE_IDS", "200"),
        ]))
        .unwrap();

        assert_eq!(config.owner_id(), 42);
        assert!(config.admin_roles().contains(&101));
        assert!(config.staff_roles().contains(&200));
        assert!(config.user_roles().is_empty());
    }

    #[test]
    fn test_missing_owner_is_an_error() {
        let result = load_role_config(lookup_from(&[("ADMIN_ROLE_IDS", "1")]));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_invalid_owner_is_an_error() {
        let result = load_role_config(lookup_from(&[("OWNER_ID", "owner")]));
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
