//! Commerce proxy commands - thin wrappers over the `SellAuth` API.
//!
//! Every command defers ephemerally before calling the API. API failures propagate to
//! the framework error hook, which shows them as "❌ Error in /cmd: `status | body`".

use crate::commerce::{Invoice, Product};
use serde_json::Value;

/// Most products listed by `/stock`.
pub const STOCK_LISTING_LIMIT: usize = 20;

/// Wallet transactions shown by `/wallet`.
pub const WALLET_LISTING_LIMIT: u32 = 10;

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or("?")
}

/// One `/stock` line.
#[must_use]
pub fn format_stock_line(product: &Product) -> String {
    format!(
        "- **{}** — `{}` units (ID: `{}`)",
        or_unknown(product.name.as_deref()),
        or_unknown(product.stock.as_deref()),
        or_unknown(product.id.as_deref()),
    )
}

/// One `/lastinvoices` line.
#[must_use]
pub fn format_invoice_line(invoice: &Invoice) -> String {
    format!(
        "- `{}` | {} | {:.2} {}",
        or_unknown(invoice.id.as_deref()),
        or_unknown(invoice.status.as_deref()),
        invoice.total,
        invoice.currency_code(),
    )
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One `/wallet` line from a raw transaction object.
#[must_use]
pub fn format_wallet_line(transaction: &Value) -> String {
    let field = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| transaction.get(*key).and_then(scalar))
            .unwrap_or_else(|| "?".to_string())
    };
    format!(
        "- `{}` | {} | {} {}",
        field(&["id"]),
        field(&["type", "description", "status"]),
        field(&["amount", "total"]),
        field(&["currency"]),
    )
}

/// `/analytics` body: every scalar field of the overview as `**key:** value`.
#[must_use]
pub fn format_analytics(overview: &Value) -> String {
    let Some(fields) = overview.as_object() else {
        return "No analytics available.".to_string();
    };
    let lines: Vec<String> = fields
        .iter()
        .filter_map(|(key, value)| scalar(value).map(|v| format!("**{key}:** {v}")))
        .collect();
    if lines.is_empty() {
        "No analytics available.".to_string()
    } else {
        format!("📈 **Shop analytics:**\n{}", lines.join("\n"))
    }
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{
        STOCK_LISTING_LIMIT, WALLET_LISTING_LIMIT, format_analytics, format_invoice_line,
        format_stock_line, format_wallet_line,
    };
    use crate::{
        bot::{
            BotData,
            commands::{fit_message, reply_ephemeral},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    fn ephemeral_embed(embed: serenity::CreateEmbed) -> poise::CreateReply {
        poise::CreateReply::default().embed(embed).ephemeral(true)
    }

    /// Show product stock.
    #[poise::command(slash_command)]
    pub async fn stock(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let products = ctx.data().sellauth.list_products().await?;

        if products.is_empty() {
            return reply_ephemeral(ctx, "No products.").await;
        }

        let mut text = String::from("📦 **Available stock:**\n");
        for product in products.iter().take(STOCK_LISTING_LIMIT) {
            writeln!(&mut text, "{}", format_stock_line(product))?;
        }
        reply_ephemeral(ctx, fit_message(text)).await
    }

    /// Show details of a product.
    #[poise::command(slash_command)]
    pub async fn productinfo(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product ID"] product_id: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let product = ctx.data().sellauth.get_product(&product_id).await?;

        let embed = serenity::CreateEmbed::new()
            .title(product.name.clone().unwrap_or_else(|| "Product".to_string()))
            .description(product.description.clone().unwrap_or_default())
            .colour(serenity::Colour::BLURPLE)
            .field("ID", product.id.clone().unwrap_or_else(|| product_id.clone()), true)
            .field("Price", product.price.clone().unwrap_or_else(|| "?".to_string()), true)
            .field("Stock", product.stock.clone().unwrap_or_else(|| "?".to_string()), true);
        ctx.send(ephemeral_embed(embed)).await?;
        Ok(())
    }

    /// Create a checkout link for a product.
    #[poise::command(slash_command)]
    pub async fn buy(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product ID"] product_id: String,
        #[description = "Quantity"]
        #[min = 1]
        quantity: u32,
        #[description = "Buyer email"] email: Option<String>,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let checkout = ctx
            .data()
            .sellauth
            .create_checkout(
                &product_id,
                quantity,
                email.as_deref(),
                Some(ctx.author().id.get()),
            )
            .await?;

        let link = checkout.link().unwrap_or("The API did not return a URL.");
        reply_ephemeral(ctx, format!("🧾 Checkout created:\n{link}")).await
    }

    /// Show an invoice.
    #[poise::command(slash_command)]
    pub async fn invoiceinfo(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Invoice ID"] invoice_id: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let invoice = ctx.data().sellauth.get_invoice(&invoice_id).await?;

        let embed = serenity::CreateEmbed::new()
            .title(format!("Invoice {invoice_id}"))
            .colour(serenity::Colour::new(0x2E_CC_71))
            .field("Status", invoice.status.clone().unwrap_or_else(|| "?".to_string()), true)
            .field("Total", format!("{:.2}", invoice.total), true)
            .field("Currency", invoice.currency_code().to_string(), true);
        ctx.send(ephemeral_embed(embed)).await?;
        Ok(())
    }

    /// Show the latest invoices.
    #[poise::command(slash_command)]
    pub async fn lastinvoices(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "How many invoices (default 10)"]
        #[min = 1]
        #[max = 50]
        limit: Option<u32>,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let limit = limit.unwrap_or(10);
        let invoices = ctx.data().sellauth.list_invoices(limit).await?;

        if invoices.is_empty() {
            return reply_ephemeral(ctx, "No invoices.").await;
        }

        let mut text = String::from("📊 **Latest invoices:**\n");
        for invoice in invoices.iter().take(usize::try_from(limit).unwrap_or(usize::MAX)) {
            writeln!(&mut text, "{}", format_invoice_line(invoice))?;
        }
        reply_ephemeral(ctx, fit_message(text)).await
    }

    /// Show a customer's balance.
    #[poise::command(slash_command)]
    pub async fn bal(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Customer email"] email: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let Some(customer) = ctx.data().sellauth.get_customer_by_email(&email).await? else {
            return reply_ephemeral(ctx, format!("❌ No customer found with email `{email}`."))
                .await;
        };

        let mut embed = serenity::CreateEmbed::new()
            .title("💳 Customer balance")
            .description(format!("Email: **{email}**"))
            .colour(serenity::Colour::BLURPLE);
        if let Some(id) = customer.identifier() {
            embed = embed.field("Customer ID", id.to_string(), false);
        }
        embed = embed.field(
            "Balance",
            format!("`{}`", customer.balance.as_deref().unwrap_or("0")),
            true,
        );
        ctx.send(ephemeral_embed(embed)).await?;
        Ok(())
    }

    /// Refund an invoice.
    #[poise::command(slash_command)]
    pub async fn refund(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Invoice ID"] invoice_id: String,
    ) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let response = ctx.data().sellauth.refund_invoice(&invoice_id).await?;
        reply_ephemeral(
            ctx,
            fit_message(format!("✅ Invoice refunded. Response: `{response}`")),
        )
        .await
    }

    /// Show recent wallet transactions.
    #[poise::command(slash_command)]
    pub async fn wallet(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let transactions = ctx
            .data()
            .sellauth
            .wallet_transactions(WALLET_LISTING_LIMIT)
            .await?;

        if transactions.is_empty() {
            return reply_ephemeral(ctx, "No wallet transactions.").await;
        }

        let mut text = String::from("👛 **Wallet transactions:**\n");
        for transaction in &transactions {
            writeln!(&mut text, "{}", format_wallet_line(transaction))?;
        }
        reply_ephemeral(ctx, fit_message(text)).await
    }

    /// Show shop analytics.
    #[poise::command(slash_command)]
    pub async fn analytics(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer_ephemeral().await?;
        let overview = ctx.data().sellauth.analytics_overview().await?;
        reply_ephemeral(ctx, fit_message(format_analytics(&overview))).await
    }
}

// Re-export all commands
pub use inner::*;
