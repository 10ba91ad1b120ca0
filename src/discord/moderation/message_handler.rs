// Discord-specific moderation handling - feeds message events into the core
// pipeline and executes its decisions.

use crate::core::moderation::{Decision, MessageEvent};
use crate::discord::Data;
use anyhow::Result;
use poise::serenity_prelude as serenity;
use std::time::Duration;

/// How long a suppression notice stays visible before we delete it.
const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Run one message through the moderation pipeline and, if it is suppressed,
/// delete it and post a transient notice to the author.
///
/// Returns `true` if the message was suppressed. Delete/notify failures
/// (message already gone, missing permission) are logged and swallowed so a
/// failed action never halts event processing.
pub async fn handle_message(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
) -> Result<bool> {
    // Only guild messages are moderated.
    if msg.guild_id.is_none() {
        return Ok(false);
    }

    let event = MessageEvent {
        author_id: msg.author.id.get(),
        is_bot: msg.author.bot,
        content: msg.content.clone(),
        created_at: *msg.timestamp,
    };

    let reason = match data.moderation.evaluate(&event).await {
        Decision::NoAction => return Ok(false),
        Decision::Suppress { reason } => reason,
    };

    tracing::info!(
        user_id = event.author_id,
        reason = reason.tag(),
        "Suppressing message"
    );

    if let Err(e) = msg.delete(&ctx.http).await {
        tracing::warn!("Failed to delete suppressed message: {}", e);
    }

    let notice = format!("<@{}> {}", msg.author.id, reason);
    match msg.channel_id.say(&ctx.http, &notice).await {
        Ok(sent) => {
            // Transient notice: remove it again after a few seconds.
            let http = ctx.http.clone();
            tokio::spawn(async move {
                tokio::time::sleep(NOTICE_TTL).await;
                if let Err(e) = sent.delete(&http).await {
                    tracing::debug!("Failed to delete suppression notice: {}", e);
                }
            });
        }
        Err(e) => {
            tracing::warn!("Failed to send suppression notice: {}", e);
        }
    }

    Ok(true)
}
