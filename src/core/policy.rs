//! Command access policy - decides whether a privilege tier may run a command.
//!
//! The policy is a static table mapping command names to a [`CommandCategory`],
//! loaded once at startup (see [`crate::config::policy`]) and never mutated.
//! Evaluation is a pure function of the tier and the command name.

use crate::{
    core::privilege::PrivilegeTier,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Category a command belongs to. Each command has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCategory {
    /// Bot control, only the owner
    OwnerOnly,
    /// Announcements and flash sales, only the owner
    Announcement,
    /// Shop and blacklist management, admins and the owner
    Admin,
    /// Tickets, warnings and vouch browsing, staff and above
    Staff,
    /// Available to everyone (leaving a vouch)
    Member,
}

impl CommandCategory {
    /// Tiers that may invoke a command of this category.
    #[must_use]
    pub const fn permitted_tiers(self) -> &'static [PrivilegeTier] {
        use crate::core::privilege::PrivilegeTier::{Admin, Member, Owner, Staff};
        match self {
            Self::OwnerOnly | Self::Announcement => &[Owner],
            Self::Admin => &[Owner, Admin],
            Self::Staff => &[Owner, Admin, Staff],
            Self::Member => &[Owner, Admin, Staff, Member],
        }
    }
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OwnerOnly => write!(f, "owner_only"),
            Self::Announcement => write!(f, "announcement"),
            Self::Admin => write!(f, "admin"),
            Self::Staff => write!(f, "staff"),
            Self::Member => write!(f, "member"),
        }
    }
}

/// A command name together with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Slash command name without the leading `/`
    pub name: String,
    /// Category deciding who may run it
    pub category: CommandCategory,
}

impl CommandDescriptor {
    /// Creates a descriptor.
    pub fn new(name: impl Into<String>, category: CommandCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// Tiers allowed to invoke this command.
    #[must_use]
    pub const fn permitted_tiers(&self) -> &'static [PrivilegeTier] {
        self.category.permitted_tiers()
    }
}

/// What Admins get for a command that has no entry in the table.
///
/// Staff and Members only ever run commands on their allow-lists, so this only
/// matters for Admins (the owner may run anything).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCommandPolicy {
    /// Unregistered commands are allowed (fail-open)
    #[default]
    Allow,
    /// Unregistered commands are denied
    Deny,
}

/// Why a command was refused. Selects the wording of the denial message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// Admin tried an owner-only or announcement command
    OwnerOnly,
    /// Generic refusal
    NoPermission,
    /// A member tried anything outside the member commands
    MemberRestricted,
}

/// Outcome of evaluating the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The command may run
    Allowed,
    /// The command must not run
    Denied(DenialReason),
}

impl AccessDecision {
    /// `true` for [`AccessDecision::Allowed`].
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Immutable command access table.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    // Keys are stored normalized, see `normalize_name`.
    commands: HashMap<String, CommandCategory>,
    unknown: UnknownCommandPolicy,
}

/// Command names are compared without surrounding whitespace or a leading `/`.
fn normalize_name(name: &str) -> &str {
    name.trim().trim_start_matches('/')
}

impl AccessPolicy {
    /// Builds a policy from descriptors.
    ///
    /// Fails if a command name is listed twice, since a command must belong to
    /// exactly one category.
    pub fn new<I>(descriptors: I, unknown: UnknownCommandPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = CommandDescriptor>,
    {
        let mut commands = HashMap::new();
        for descriptor in descriptors {
            let name = normalize_name(&descriptor.name).to_string();
            if let Some(existing) = commands.insert(name.clone(), descriptor.category) {
                return Err(Error::config(format!(
                    "command '{name}' is listed as both '{existing}' and '{}'",
                    descriptor.category
                )));
            }
        }
        Ok(Self { commands, unknown })
    }

    /// Category of `command`, or `None` if it is not in the table.
    #[must_use]
    pub fn category(&self, command: &str) -> Option<CommandCategory> {
        self.commands.get(normalize_name(command)).copied()
    }

    /// Posture for unregistered commands.
    #[must_use]
    pub const fn unknown_command_policy(&self) -> UnknownCommandPolicy {
        self.unknown
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// `true` if the table has no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All registered commands, sorted by name.
    #[must_use]
    pub fn descriptors(&self) -> Vec<CommandDescriptor> {
        let mut all: Vec<_> = self
            .commands
            .iter()
            .map(|(name, category)| CommandDescriptor::new(name.clone(), *category))
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Names of the member commands, sorted.
    #[must_use]
    pub fn member_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .commands
            .iter()
            .filter(|(_, category)| **category == CommandCategory::Member)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Returns the names from `names` that have no entry in the table.
    pub fn unregistered<'a, I>(&self, names: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter(|name| !self.commands.contains_key(normalize_name(name)))
            .collect()
    }

    /// Decides whether `tier` may run `command`.
    ///
    /// Owner short-circuits everything. For Staff the deny-list (owner-only,
    /// announcement, admin) is checked before the allow-list.
    #[must_use]
    pub fn evaluate(&self, tier: PrivilegeTier, command: &str) -> AccessDecision {
        use CommandCategory as C;

        let category = self.category(command);
        match tier {
            PrivilegeTier::Owner => AccessDecision::Allowed,
            PrivilegeTier::Admin => match category {
                Some(C::OwnerOnly | C::Announcement) => {
                    AccessDecision::Denied(DenialReason::OwnerOnly)
                }
                Some(C::Admin | C::Staff | C::Member) => AccessDecision::Allowed,
                None => match self.unknown {
                    UnknownCommandPolicy::Allow => AccessDecision::Allowed,
                    UnknownCommandPolicy::Deny => {
                        AccessDecision::Denied(DenialReason::NoPermission)
                    }
                },
            },
            PrivilegeTier::Staff => match category {
                Some(C::OwnerOnly | C::Announcement | C::Admin) | None => {
                    AccessDecision::Denied(DenialReason::NoPermission)
                }
                Some(C::Staff | C::Member) => AccessDecision::Allowed,
            },
            PrivilegeTier::Member => match category {
                Some(C::Member) => AccessDecision::Allowed,
                _ => AccessDecision::Denied(DenialReason::MemberRestricted),
            },
        }
    }

    /// Boolean form of [`AccessPolicy::evaluate`].
    #[must_use]
    pub fn is_allowed(&self, tier: PrivilegeTier, command: &str) -> bool {
        self.evaluate(tier, command).is_allowed()
    }

    /// User-facing text for a denial.
    #[must_use]
    pub fn denial_message(&self, reason: DenialReason) -> String {
        match reason {
            DenialReason::OwnerOnly => "❌ This command is for the bot owner only.".to_string(),
            DenialReason::NoPermission => {
                "❌ You don't have permission to use this command.".to_string()
            }
            DenialReason::MemberRestricted => {
                let allowed = self
                    .member_commands()
                    .iter()
                    .map(|name| format!("**/{name}**"))
                    .collect::<Vec<_>>()
                    .join(", ");
                if allowed.is_empty() {
                    "❌ You don't have permission to use this command.".to_string()
                } else {
                    format!("❌ You don't have permission to use this command. You can only use {allowed}.")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::privilege::PrivilegeTier::{Admin, Member, Owner, Staff};

    fn policy(unknown: UnknownCommandPolicy) -> AccessPolicy {
        let table = [
            ("shutdown", CommandCategory::OwnerOnly),
            ("announce", CommandCategory::Announcement),
            ("blacklist", CommandCategory::Admin),
            ("stock", CommandCategory::Admin),
            ("warn", CommandCategory::Staff),
            ("vouchlist", CommandCategory::Staff),
            ("vouch", CommandCategory::Member),
        ];
        AccessPolicy::new(
            table
                .into_iter()
                .map(|(name, category)| CommandDescriptor::new(name, category)),
            unknown,
        )
        .unwrap()
    }

    #[test]
    fn test_decision_matrix() {
        let policy = policy(UnknownCommandPolicy::Allow);
        let cases = [
            (Owner, "shutdown", true),
            (Owner, "announce", true),
            (Owner, "not_registered", true),
            (Admin, "shutdown", false),
            (Admin, "announce", false),
            (Admin, "blacklist", true),
            (Admin, "warn", true),
            (Admin, "vouch", true),
            (Staff, "shutdown", false),
            (Staff, "announce", false),
            (Staff, "stock", false),
            (Staff, "warn", true),
            (Staff, "vouch", true),
            (Member, "vouch", true),
            (Member, "vouchlist", false),
            (Member, "blacklist", false),
            (Member, "shutdown", false),
        ];

        for (tier, command, expected) in cases {
            assert_eq!(
                policy.is_allowed(tier, command),
                expected,
                "{tier} running /{command}"
            );
        }
    }

    #[test]
    fn test_lookups_ignore_slash_and_whitespace() {
        let policy = policy(UnknownCommandPolicy::Deny);
        assert_eq!(policy.category("/vouch "), policy.category("vouch"));
        assert!(policy.category(" /shutdown").is_some());
        assert!(policy.is_allowed(Member, "/vouch"));
        assert!(!policy.is_allowed(Admin, " /shutdown "));
        assert_eq!(policy.unregistered(["/vouch", " warn", "/nope"]), vec!["/nope"]);
    }

    #[test]
    fn test_descriptor_tiers_agree_with_evaluation() {
        let policy = policy(UnknownCommandPolicy::Allow);
        for descriptor in policy.descriptors() {
            for tier in [Owner, Admin, Staff, Member] {
                assert_eq!(
                    descriptor.permitted_tiers().contains(&tier),
                    policy.is_allowed(tier, &descriptor.name),
                    "{tier} running /{}",
                    descriptor.name
                );
            }
        }
    }

    #[test]
    fn test_denial_reasons() {
        let policy = policy(UnknownCommandPolicy::Allow);
        assert_eq!(
            policy.evaluate(Admin, "shutdown"),
            AccessDecision::Denied(DenialReason::OwnerOnly)
        );
        assert_eq!(
            policy.evaluate(Staff, "announce"),
            AccessDecision::Denied(DenialReason::NoPermission)
        );
        assert_eq!(
            policy.evaluate(Member, "stock"),
            AccessDecision::Denied(DenialReason::MemberRestricted)
        );
    }

    #[test]
    fn test_unknown_commands() {
        let open = policy(UnknownCommandPolicy::Allow);
        assert!(open.is_allowed(Admin, "mystery"));
        assert!(!open.is_allowed(Staff, "mystery"));
        assert!(!open.is_allowed(Member, "mystery"));

        let closed = policy(UnknownCommandPolicy::Deny);
        assert!(!closed.is_allowed(Admin, "mystery"));
        assert!(closed.is_allowed(Owner, "mystery"));
    }

    #[test]
    fn test_duplicate_command_is_rejected() {
        let result = AccessPolicy::new(
            [
                CommandDescriptor::new("warn", CommandCategory::Staff),
                CommandDescriptor::new("warn", CommandCategory::Admin),
            ],
            UnknownCommandPolicy::Allow,
        );
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_member_denial_lists_member_commands() {
        let policy = policy(UnknownCommandPolicy::Allow);
        assert_eq!(policy.member_commands(), vec!["vouch"]);
        let message = policy.denial_message(DenialReason::MemberRestricted);
        assert!(message.contains("**/vouch**"));
        assert!(
            policy
                .denial_message(DenialReason::OwnerOnly)
                .contains("owner only")
        );
    }

    #[test]
    fn test_unregistered_names() {
        let policy = policy(UnknownCommandPolicy::Allow);
        let missing = policy.unregistered(["vouch", "ping", "stock", "about"]);
        assert_eq!(missing, vec!["ping", "about"]);
    }
}
