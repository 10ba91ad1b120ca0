// Slash commands for configuring the moderation rules.

use crate::core::moderation::WordChange;
use crate::discord::commands::{reply_ephemeral, Context, Error};
use poise::serenity_prelude as serenity;

/// Add a word to the censor list.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn censor(
    ctx: Context<'_>,
    #[description = "Word to censor"] word: String,
) -> Result<(), Error> {
    let display = word.trim().to_lowercase();
    match ctx.data().moderation.add_banned_word(&word).await {
        Ok(WordChange::Changed) => {
            reply_ephemeral(ctx, format!("Added `{display}` to censored words.")).await
        }
        Ok(WordChange::NoOp) => {
            reply_ephemeral(ctx, format!("`{display}` is already censored.")).await
        }
        Err(e) => reply_ephemeral(ctx, e.to_string()).await,
    }
}

/// Remove a word from the censor list.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn removecensor(
    ctx: Context<'_>,
    #[description = "Word to remove from the censor list"] word: String,
) -> Result<(), Error> {
    let display = word.trim().to_lowercase();
    match ctx.data().moderation.remove_banned_word(&word).await {
        Ok(WordChange::Changed) => {
            reply_ephemeral(ctx, format!("Removed `{display}` from censored words.")).await
        }
        Ok(WordChange::NoOp) => {
            reply_ephemeral(ctx, format!("`{display}` is not in censored words.")).await
        }
        Err(e) => reply_ephemeral(ctx, e.to_string()).await,
    }
}

/// List all censored words.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn censorlist(ctx: Context<'_>) -> Result<(), Error> {
    let words = ctx.data().moderation.banned_words().await;
    if words.is_empty() {
        reply_ephemeral(ctx, "No censored words set.").await
    } else {
        reply_ephemeral(ctx, format!("Censored words:\n{}", words.join(", "))).await
    }
}

/// Toggle the anti-link filter.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn antilink(ctx: Context<'_>) -> Result<(), Error> {
    let enabled = ctx.data().moderation.toggle_link_filter().await;
    reply_ephemeral(ctx, format!("Anti-link filter set to {enabled}")).await
}

/// Toggle the anti-spam filter.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn antispam(ctx: Context<'_>) -> Result<(), Error> {
    let enabled = ctx.data().moderation.toggle_spam_filter().await;
    reply_ephemeral(ctx, format!("Anti-spam filter set to {enabled}")).await
}

/// Set the anti-spam delay in seconds.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn setantispamdelay(
    ctx: Context<'_>,
    #[description = "Minimum seconds between messages"] seconds: u64,
) -> Result<(), Error> {
    ctx.data()
        .moderation
        .set_spam_min_interval_secs(seconds)
        .await;
    reply_ephemeral(ctx, format!("Anti-spam delay set to {seconds} seconds")).await
}

/// Set how many repeated messages are allowed before suppression.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn setspamrepeatlimit(
    ctx: Context<'_>,
    #[description = "Number of repeated messages allowed"] limit: u32,
) -> Result<(), Error> {
    match ctx.data().moderation.set_spam_repeat_limit(limit).await {
        Ok(()) => {
            reply_ephemeral(ctx, format!("Spam repeated message limit set to {limit}")).await
        }
        Err(e) => reply_ephemeral(ctx, e.to_string()).await,
    }
}

/// Show the current moderation configuration.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn modstatus(ctx: Context<'_>) -> Result<(), Error> {
    let config = ctx.data().moderation.config().await;
    let tracked = ctx.data().moderation.tracked_users();

    let embed = serenity::CreateEmbed::new()
        .title("🛡️ Moderation Status")
        .color(0xDAA520)
        .field(
            "Censored words",
            if config.banned_words.is_empty() {
                "none".to_string()
            } else {
                format!("{} configured", config.banned_words.len())
            },
            true,
        )
        .field(
            "Anti-link",
            if config.link_filter_enabled { "✅ Enabled" } else { "❌ Disabled" },
            true,
        )
        .field(
            "Anti-spam",
            if config.spam_filter_enabled { "✅ Enabled" } else { "❌ Disabled" },
            true,
        )
        .field(
            "Spam thresholds",
            format!(
                "min interval: {}s\nrepeat limit: {} identical messages",
                config.spam_min_interval_secs, config.spam_repeat_limit
            ),
            false,
        )
        .field("Tracked users", tracked.to_string(), true);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}
