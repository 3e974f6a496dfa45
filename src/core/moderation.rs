//! Moderation filter - detects invite links and drives the remediation steps.
//!
//! Owners and admins are never moderated. For everyone else a message containing an
//! invite link triggers a remediation: delete the message, restrict the sender for an
//! hour and post an audit line. The three steps are independent and best-effort; each
//! reports its own [`StepOutcome`] and a failure never stops the remaining steps.

use crate::{
    core::privilege::PrivilegeTier,
    errors::{Error, Result},
};
use chrono::{DateTime, TimeDelta, Utc};
use regex::Regex;
use std::fmt;
use std::future::Future;

/// Invite links such as `discord.gg/abc` or `https://www.discord.com/invite/abc`.
pub const INVITE_PATTERN: &str =
    r"(https?://)?(www\.)?(discord\.gg|discord\.com/invite)/[A-Za-z0-9]+";

/// How long an offending sender stays restricted.
pub const RESTRICTION_DURATION: TimeDelta = TimeDelta::hours(1);

/// Audit reason attached to the restriction.
pub const REMEDIATION_REASON: &str = "Invite / spam detected";

/// Compiled invite-link matcher.
#[derive(Debug, Clone)]
pub struct InviteFilter {
    pattern: Regex,
}

impl InviteFilter {
    /// Compiles [`INVITE_PATTERN`].
    pub fn new() -> Result<Self> {
        Self::with_pattern(INVITE_PATTERN)
    }

    /// Compiles a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::config(format!("Invalid moderation pattern: {e}")))?;
        Ok(Self { pattern })
    }

    /// `true` if `text` contains an invite link anywhere.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Parameters of a remediation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remediation {
    /// How long the sender is restricted
    pub restrict_for: TimeDelta,
    /// Reason recorded with the restriction
    pub reason: &'static str,
}

impl Default for Remediation {
    fn default() -> Self {
        Self {
            restrict_for: RESTRICTION_DURATION,
            reason: REMEDIATION_REASON,
        }
    }
}

/// What the filter wants done with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    /// Leave the message alone
    None,
    /// Delete, restrict and log
    Remediate(Remediation),
}

/// Decides whether a message from a sender of `tier` must be moderated.
#[must_use]
pub fn should_moderate(filter: &InviteFilter, text: &str, tier: PrivilegeTier) -> ModerationAction {
    if matches!(tier, PrivilegeTier::Owner | PrivilegeTier::Admin) {
        return ModerationAction::None;
    }
    if filter.matches(text) {
        ModerationAction::Remediate(Remediation::default())
    } else {
        ModerationAction::None
    }
}

/// Platform operations a remediation needs.
///
/// Implemented by the bot layer on top of the Discord API, and by fakes in tests.
pub trait RemediationTarget {
    /// Deletes the offending message.
    fn delete_message(&self) -> impl Future<Output = Result<()>> + Send;

    /// Restricts the sender from talking until `until`.
    fn restrict_sender(
        &self,
        until: DateTime<Utc>,
        reason: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Sends `text` to the audit log. Returns `Ok(false)` when no log destination is configured.
    fn send_log(&self, text: &str) -> impl Future<Output = Result<bool>> + Send;

    /// Mention string for the sender, used in the log line.
    fn sender_mention(&self) -> String;
}

/// Result of one remediation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step succeeded
    Done,
    /// The step did not apply (e.g. no log channel)
    Skipped,
    /// The step failed; the error text is kept for logging only
    Failed(String),
}

impl StepOutcome {
    fn from_result(result: Result<()>) -> Self {
        match result {
            Ok(()) => Self::Done,
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    /// `true` for [`StepOutcome::Failed`].
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => write!(f, "done"),
            Self::Skipped => write!(f, "skipped"),
            Self::Failed(reason) => write!(f, "failed ({reason})"),
        }
    }
}

/// Per-step outcomes of a remediation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationReport {
    /// Message deletion
    pub deleted: StepOutcome,
    /// Communication restriction
    pub restricted: StepOutcome,
    /// Audit log line
    pub logged: StepOutcome,
}

impl RemediationReport {
    /// `true` if every step either succeeded or was skipped.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        !(self.deleted.is_failed() || self.restricted.is_failed() || self.logged.is_failed())
    }
}

/// Audit log line posted after a remediation.
#[must_use]
pub fn remediation_log_line(mention: &str, remediation: &Remediation) -> String {
    let hours = remediation.restrict_for.num_hours();
    let duration = if hours >= 1 {
        format!("{hours}h")
    } else {
        format!("{}m", remediation.restrict_for.num_minutes())
    };
    format!(
        "🚫 {mention} has been **muted {duration}** for posting invites/spam.\n\
         Message removed automatically."
    )
}

/// Runs all three remediation steps against `target`.
///
/// Steps run in order (delete, restrict, log) and every step is attempted even if an
/// earlier one failed.
pub async fn remediate<T>(target: &T, remediation: &Remediation, now: DateTime<Utc>) -> RemediationReport
where
    T: RemediationTarget + Sync,
{
    let deleted = StepOutcome::from_result(target.delete_message().await);

    let restricted = StepOutcome::from_result(
        target
            .restrict_sender(now + remediation.restrict_for, remediation.reason)
            .await,
    );

    let line = remediation_log_line(&target.sender_mention(), remediation);
    let logged = match target.send_log(&line).await {
        Ok(true) => StepOutcome::Done,
        Ok(false) => StepOutcome::Skipped,
        Err(e) => StepOutcome::Failed(e.to_string()),
    };

    RemediationReport {
        deleted,
        restricted,
        logged,
    }
}
