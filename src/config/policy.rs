//! Command policy loading from policy.toml
//!
//! The policy table is declarative configuration: one list of command names per
//! category. A copy of the repository's `policy.toml` is compiled into the binary
//! and used whenever no file is found at the configured path.

use crate::{
    core::policy::{AccessPolicy, CommandCategory, CommandDescriptor, UnknownCommandPolicy},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Policy table shipped with the bot.
pub const DEFAULT_POLICY: &str = include_str!("../../policy.toml");

/// Structure of the policy.toml file
#[derive(Debug, Deserialize)]
pub struct PolicyFile {
    /// Posture for commands missing from the table
    #[serde(default)]
    pub unknown_command: UnknownCommandPolicy,
    /// Command lists per category
    pub commands: CategoryLists,
}

/// Command names grouped by category
#[derive(Debug, Default, Deserialize)]
pub struct CategoryLists {
    /// Owner-only bot control commands
    #[serde(default)]
    pub owner_only: Vec<String>,
    /// Owner-only announcement commands
    #[serde(default)]
    pub announcement: Vec<String>,
    /// Admin commands
    #[serde(default)]
    pub admin: Vec<String>,
    /// Staff commands
    #[serde(default)]
    pub staff: Vec<String>,
    /// Commands open to everyone
    #[serde(default)]
    pub member: Vec<String>,
}

impl PolicyFile {
    /// Turns the file contents into an [`AccessPolicy`].
    pub fn into_policy(self) -> Result<AccessPolicy> {
        let CategoryLists {
            owner_only,
            announcement,
            admin,
            staff,
            member,
        } = self.commands;

        let tag = |names: Vec<String>, category: CommandCategory| {
            names
                .into_iter()
                .map(move |name| CommandDescriptor::new(name, category))
        };

        let descriptors = tag(owner_only, CommandCategory::OwnerOnly)
            .chain(tag(announcement, CommandCategory::Announcement))
            .chain(tag(admin, CommandCategory::Admin))
            .chain(tag(staff, CommandCategory::Staff))
            .chain(tag(member, CommandCategory::Member));

        AccessPolicy::new(descriptors, self.unknown_command)
    }
}

/// Parses a policy table from TOML text.
pub fn parse_policy(contents: &str) -> Result<AccessPolicy> {
    let file: PolicyFile = toml::from_str(contents)
        .map_err(|e| Error::config(format!("Failed to parse policy table: {e}")))?;
    file.into_policy()
}

/// Loads the policy table from `path`.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML is invalid, or a
/// command is listed under two categories.
pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<AccessPolicy> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::config(format!(
            "Failed to read policy file {}: {e}",
            path.as_ref().display()
        ))
    })?;
    parse_policy(&contents)
}

/// Loads `path` if it exists, otherwise the embedded default table.
pub fn load_policy_or_default<P: AsRef<Path>>(path: P) -> Result<AccessPolicy> {
    let path = path.as_ref();
    if path.exists() {
        info!("Loading command policy from {}", path.display());
        load_policy(path)
    } else {
        info!(
            "No policy file at {}, using the built-in command policy",
            path.display()
        );
        parse_policy(DEFAULT_POLICY)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::privilege::PrivilegeTier;

    #[test]
    fn test_default_policy_parses() {
        let policy = parse_policy(DEFAULT_POLICY).unwrap();
        assert_eq!(policy.unknown_command_policy(), UnknownCommandPolicy::Allow);
        assert_eq!(policy.member_commands(), vec!["vouch"]);
        assert_eq!(policy.category("shutdown"), Some(CommandCategory::OwnerOnly));
        assert_eq!(policy.category("flashsale"), Some(CommandCategory::Announcement));
        assert_eq!(policy.category("blacklist"), Some(CommandCategory::Admin));
        assert_eq!(policy.category("warn"), Some(CommandCategory::Staff));
    }

    #[test]
    fn test_default_policy_matrix() {
        let policy = parse_policy(DEFAULT_POLICY).unwrap();
        assert!(policy.is_allowed(PrivilegeTier::Member, "vouch"));
        assert!(!policy.is_allowed(PrivilegeTier::Member, "blacklist"));
        assert!(!policy.is_allowed(PrivilegeTier::Staff, "announce"));
        assert!(policy.is_allowed(PrivilegeTier::Staff, "myvouches"));
        assert!(!policy.is_allowed(PrivilegeTier::Admin, "restart"));
        assert!(policy.is_allowed(PrivilegeTier::Admin, "refund"));
        assert!(policy.is_allowed(PrivilegeTier::Owner, "restart"));
    }

    #[test]
    fn test_parse_deny_posture_and_missing_lists() {
        let policy = parse_policy(
            r#"
            unknown_command = "deny"

            [commands]
            member = ["vouch"]
            "#,
        )
        .unwrap();
        assert_eq!(policy.unknown_command_policy(), UnknownCommandPolicy::Deny);
        assert_eq!(policy.len(), 1);
        assert!(!policy.is_allowed(PrivilegeTier::Admin, "stock"));
    }

    #[test]
    fn test_duplicate_across_categories_is_rejected() {
        let result = parse_policy(
            r#"
            [commands]
            admin = ["warn"]
            staff = ["warn"]
            "#,
        );
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_invalid_posture_is_rejected() {
        let result = parse_policy(
            r#"
            unknown_command = "maybe"
            [commands]
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let policy = load_policy_or_default("definitely/not/here/policy.toml").unwrap();
        assert!(!policy.is_empty());
    }
}
