//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Announcement commands
pub mod announce;

/// Blacklist commands
pub mod blacklist;

/// Owner control commands (reload, shutdown, restart)
pub mod control;

/// General utility commands
pub mod general;

/// Warnings and case history
pub mod moderation;

/// Guild channel overrides
pub mod setchannel;

/// Commerce proxy commands
pub mod shop;

/// Ticket commands
pub mod ticket;

/// Vouch commands
pub mod vouch;

use crate::{
    bot::BotData,
    errors::{Error, Result},
};

// Export commands
pub use announce::*;
pub use blacklist::*;
pub use control::*;
pub use general::*;
pub use moderation::*;
pub use setchannel::*;
pub use shop::*;
pub use ticket::*;
pub use vouch::*;

/// Longest message body Discord accepts.
pub const MESSAGE_LIMIT: usize = 2000;

/// Every slash command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        // member
        vouch(),
        // staff
        vouchlist(),
        myvouches(),
        ticket(),
        ticketban(),
        ticketunban(),
        warn(),
        case(),
        // admin
        vouchdelete(),
        blacklist(),
        unblacklist(),
        blacklistlist(),
        stock(),
        productinfo(),
        buy(),
        invoiceinfo(),
        lastinvoices(),
        bal(),
        refund(),
        wallet(),
        analytics(),
        setchannel(),
        ping(),
        about(),
        status(),
        // announcement
        announce(),
        flashsale(),
        // owner only
        reloadcmds(),
        shutdown(),
        restart(),
    ]
}

/// Sends `content` visible only to the invoking user.
pub async fn reply_ephemeral(
    ctx: poise::Context<'_, BotData, Error>,
    content: impl Into<String>,
) -> Result<()> {
    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// The invoking guild's id as stored in the database.
pub fn guild_key(ctx: poise::Context<'_, BotData, Error>) -> Result<String> {
    ctx.guild_id()
        .map(|id| id.to_string())
        .ok_or(Error::GuildOnly)
}

/// Cuts `text` to fit in one message, marking the cut with an ellipsis line.
#[must_use]
pub fn fit_message(text: String) -> String {
    if text.chars().count() <= MESSAGE_LIMIT {
        return text;
    }
    let marker = "\n…";
    let keep = MESSAGE_LIMIT - marker.chars().count();
    let mut cut: String = text.chars().take(keep).collect();
    if let Some(last_newline) = cut.rfind('\n') {
        cut.truncate(last_newline);
    }
    cut.push_str(marker);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::policy::{DEFAULT_POLICY, parse_policy};

    #[test]
    fn test_fit_message_short_text_untouched() {
        assert_eq!(fit_message("hello".to_string()), "hello");
    }

    #[test]
    fn test_fit_message_cuts_at_line_boundary() {
        let text = "line of text\n".repeat(400);
        let fitted = fit_message(text);
        assert!(fitted.chars().count() <= MESSAGE_LIMIT);
        assert!(fitted.ends_with("line of text\n…"));
    }

    #[test]
    fn test_every_command_has_a_policy_entry() -> Result<()> {
        let policy = parse_policy(DEFAULT_POLICY)?;
        let commands = all();
        let missing = policy.unregistered(commands.iter().map(|c| c.name.as_str()));
        assert!(missing.is_empty(), "missing policy entries: {missing:?}");
        assert_eq!(commands.len(), policy.len());
        Ok(())
    }
}
