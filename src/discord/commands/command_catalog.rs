// Discord commands module.
// Each feature gets its own command file.

pub mod admin;
pub mod moderation;
pub mod warnings;

use crate::core::moderation::ModerationService;
use crate::core::warnings::WarningLedger;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared state handed to every command and event handler.
pub struct Data {
    pub moderation: Arc<ModerationService>,
    pub warnings: Arc<WarningLedger>,
    /// Role name applied to new members, if configured.
    pub autorole: Arc<RwLock<Option<String>>>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Send an ephemeral text reply - the default for admin feedback.
pub(crate) async fn reply_ephemeral(
    ctx: Context<'_>,
    text: impl Into<String>,
) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(text.into())
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
