//! Purchase announcement embed.

use crate::{commerce::Invoice, core::rank::rank_for};
use poise::serenity_prelude as serenity;

/// Embed colour of purchase announcements.
pub const ANNOUNCEMENT_COLOUR: u32 = 0x2E_CC_71;

/// Announcement text for `invoice`, given the buyer's lifetime spend including it.
#[must_use]
pub fn purchase_description(invoice: &Invoice, lifetime_total: f64, shop_name: &str) -> String {
    let rank = rank_for(lifetime_total);
    let currency = invoice.currency_code();
    format!(
        "» A **{} {}** just bought **{}x {}** using **{}**.\n\
         Current purchase: **{:.2} {currency}**\n\
         Customer lifetime spend: **{lifetime_total:.2} {currency}**\n\
         Thanks for trusting **{shop_name}** 💕",
        rank.name,
        rank.emoji,
        invoice.quantity.as_deref().unwrap_or("1"),
        invoice.product_name(),
        invoice.gateway.as_deref().unwrap_or("Method"),
        invoice.total,
    )
}

/// Embed posted to the sales channel.
#[must_use]
pub fn announcement_embed(
    invoice: &Invoice,
    lifetime_total: f64,
    shop_name: &str,
) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .description(purchase_description(invoice, lifetime_total, shop_name))
        .colour(serenity::Colour::new(ANNOUNCEMENT_COLOUR))
        .footer(serenity::CreateEmbedFooter::new(shop_name))
}
