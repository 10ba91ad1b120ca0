// General administration commands - autorole, purge, slowmode, kick, ban.

use crate::discord::commands::{reply_ephemeral, Context, Error};
use poise::serenity_prelude as serenity;

/// Set the role automatically applied to new members.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_ROLES")]
pub async fn setautorole(
    ctx: Context<'_>,
    #[description = "Role to assign on member join"] role: serenity::Role,
) -> Result<(), Error> {
    *ctx.data().autorole.write().await = Some(role.name.clone());
    reply_ephemeral(ctx, format!("Autorole set to {}.", role.name)).await
}

/// Show the currently configured autorole.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_ROLES")]
pub async fn autorole(ctx: Context<'_>) -> Result<(), Error> {
    match ctx.data().autorole.read().await.as_deref() {
        Some(name) => reply_ephemeral(ctx, format!("Autorole is set to {name}.")).await,
        None => reply_ephemeral(ctx, "No autorole configured.").await,
    }
}

/// Delete a number of recent messages from this channel.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn purge(
    ctx: Context<'_>,
    #[description = "Number of messages to delete (max 100)"]
    #[min = 1]
    #[max = 100]
    amount: u8,
) -> Result<(), Error> {
    let channel_id = ctx.channel_id();
    let messages = channel_id
        .messages(ctx.http(), serenity::GetMessages::new().limit(amount))
        .await?;

    let ids: Vec<serenity::MessageId> = messages.iter().map(|m| m.id).collect();
    let deleted = ids.len();

    // Bulk delete needs at least two messages; fall back to a single delete.
    if ids.len() >= 2 {
        channel_id.delete_messages(ctx.http(), ids).await?;
    } else if let Some(id) = ids.first() {
        channel_id.delete_message(ctx.http(), *id).await?;
    }

    reply_ephemeral(ctx, format!("Deleted {deleted} messages.")).await
}

/// Set the slowmode delay for this channel.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_CHANNELS")]
pub async fn slowmode(
    ctx: Context<'_>,
    #[description = "Seconds between messages (0 disables)"] seconds: u16,
) -> Result<(), Error> {
    ctx.channel_id()
        .edit(
            ctx.http(),
            serenity::EditChannel::new().rate_limit_per_user(seconds),
        )
        .await?;
    reply_ephemeral(ctx, format!("Slowmode set to {seconds} seconds.")).await
}

/// Kick a member.
#[poise::command(slash_command, guild_only, required_permissions = "KICK_MEMBERS")]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "Member to kick"] user: serenity::User,
    #[description = "Reason for the kick"] reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    match reason {
        Some(reason) => {
            guild_id
                .kick_with_reason(ctx.http(), user.id, &reason)
                .await?
        }
        None => guild_id.kick(ctx.http(), user.id).await?,
    }

    reply_ephemeral(ctx, format!("Kicked <@{}>.", user.id)).await
}

/// Ban a member.
#[poise::command(slash_command, guild_only, required_permissions = "BAN_MEMBERS")]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "Member to ban"] user: serenity::User,
    #[description = "Reason for the ban"] reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be used in a server")?;

    match reason {
        Some(reason) => {
            guild_id
                .ban_with_reason(ctx.http(), user.id, 0, &reason)
                .await?
        }
        None => guild_id.ban(ctx.http(), user.id, 0).await?,
    }

    reply_ephemeral(ctx, format!("Banned <@{}>.", user.id)).await
}
