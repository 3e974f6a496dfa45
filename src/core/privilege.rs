//! Authorization classifier - assigns exactly one privilege tier to a principal.
//!
//! Resolution order:
//! 1. The configured owner identity is `Owner`, whatever roles it holds
//! 2. Any configured admin role makes the principal `Admin`
//! 3. Any configured staff role makes the principal `Staff`
//! 4. Everyone else (no roles, or only the generic user role) is `Member`

use std::collections::HashSet;
use std::fmt;

/// Privilege tier used for access decisions. Ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrivilegeTier {
    /// No elevated role
    Member,
    /// Holds a staff role
    Staff,
    /// Holds an admin role
    Admin,
    /// The bot owner
    Owner,
}

impl fmt::Display for PrivilegeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member => write!(f, "member"),
            Self::Staff => write!(f, "staff"),
            Self::Admin => write!(f, "admin"),
            Self::Owner => write!(f, "owner"),
        }
    }
}

/// The identity invoking a command or sending a message.
///
/// Derived per event from the chat platform, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    /// Discord user ID
    pub user_id: u64,
    /// Discord role IDs held in the current guild (empty outside a guild)
    pub roles: Vec<u64>,
}

impl Principal {
    /// Creates a principal from a user ID and its role IDs.
    pub fn new(user_id: u64, roles: impl IntoIterator<Item = u64>) -> Self {
        Self {
            user_id,
            roles: roles.into_iter().collect(),
        }
    }

    /// A principal without guild membership data.
    #[must_use]
    pub const fn without_roles(user_id: u64) -> Self {
        Self {
            user_id,
            roles: Vec::new(),
        }
    }
}

/// Owner identity plus the configured role sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleConfig {
    owner_id: u64,
    admin_roles: HashSet<u64>,
    staff_roles: HashSet<u64>,
    user_roles: HashSet<u64>,
}

impl RoleConfig {
    /// Creates a role configuration.
    pub fn new(
        owner_id: u64,
        admin_roles: impl IntoIterator<Item = u64>,
        staff_roles: impl IntoIterator<Item = u64>,
        user_roles: impl IntoIterator<Item = u64>,
    ) -> Self {
        Self {
            owner_id,
            admin_roles: admin_roles.into_iter().collect(),
            staff_roles: staff_roles.into_iter().collect(),
            user_roles: user_roles.into_iter().collect(),
        }
    }

    /// The single owner identity.
    #[must_use]
    pub const fn owner_id(&self) -> u64 {
        self.owner_id
    }

    /// Role IDs granting `Admin`.
    #[must_use]
    pub const fn admin_roles(&self) -> &HashSet<u64> {
        &self.admin_roles
    }

    /// Role IDs granting `Staff`.
    #[must_use]
    pub const fn staff_roles(&self) -> &HashSet<u64> {
        &self.staff_roles
    }

    /// Generic user role IDs. They grant nothing beyond `Member`.
    #[must_use]
    pub const fn user_roles(&self) -> &HashSet<u64> {
        &self.user_roles
    }
}

fn holds_any(principal: &Principal, roles: &HashSet<u64>) -> bool {
    principal.roles.iter().any(|role| roles.contains(role))
}

/// Classifies `principal` into exactly one tier.
#[must_use]
pub fn classify(principal: &Principal, config: &RoleConfig) -> PrivilegeTier {
    if principal.user_id == config.owner_id {
        PrivilegeTier::Owner
    } else if holds_any(principal, &config.admin_roles) {
        PrivilegeTier::Admin
    } else if holds_any(principal, &config.staff_roles) {
        PrivilegeTier::Staff
    } else {
        PrivilegeTier::Member
    }
}
