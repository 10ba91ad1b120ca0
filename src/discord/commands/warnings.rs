// Warning commands - issue, list and clear warnings for members.

use crate::discord::commands::{reply_ephemeral, Context, Error};
use poise::serenity_prelude as serenity;

/// Warn a member.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "Member to warn"] user: serenity::User,
    #[description = "Reason for the warning"] reason: Option<String>,
) -> Result<(), Error> {
    let total = ctx.data().warnings.warn(user.id.get(), reason);
    reply_ephemeral(
        ctx,
        format!("Warned <@{}>. Total warnings: {}", user.id, total),
    )
    .await
}

/// View warnings for a member.
#[poise::command(slash_command, guild_only)]
pub async fn warnings(
    ctx: Context<'_>,
    #[description = "Member to view warnings for"] user: serenity::User,
) -> Result<(), Error> {
    let entries = ctx.data().warnings.list(user.id.get());
    if entries.is_empty() {
        return reply_ephemeral(ctx, format!("<@{}> has no warnings.", user.id)).await;
    }

    let mut msg = format!("Warnings for <@{}>:\n", user.id);
    for (i, warning) in entries.iter().enumerate() {
        msg.push_str(&format!("{}. {}\n", i + 1, warning));
    }
    reply_ephemeral(ctx, msg).await
}

/// Clear all warnings for a member.
#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
pub async fn clearwarnings(
    ctx: Context<'_>,
    #[description = "Member to clear warnings for"] user: serenity::User,
) -> Result<(), Error> {
    if ctx.data().warnings.clear(user.id.get()) {
        reply_ephemeral(ctx, format!("Cleared warnings for <@{}>.", user.id)).await
    } else {
        reply_ephemeral(ctx, format!("<@{}> has no warnings.", user.id)).await
    }
}
