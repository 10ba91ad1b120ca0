// This is the entry point of the Discord moderation bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `discord/` = Discord-specific adapters (commands, events)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with a pile of mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;

use crate::core::moderation::{ModerationConfig, ModerationService};
use crate::core::warnings::WarningLedger;
use crate::discord::{message_handler, Data, Error};
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// How often the background sweep evicts stale spam-tracker state.
const SWEEP_INTERVAL_SECS: u64 = 600;
/// Spam-tracker entries idle for longer than this get evicted.
const STALE_AFTER_SECS: i64 = 3600;

/// Event handler for non-command Discord events.
/// Messages go through the moderation pipeline; member joins get the autorole.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            // Ignore bot messages (including our own)
            if new_message.author.bot {
                return Ok(());
            }

            // A failed moderation action must never halt the event loop.
            if let Err(e) = message_handler::handle_message(ctx, new_message, data).await {
                tracing::error!("Error moderating message: {}", e);
            }
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            if let Err(e) = apply_autorole(ctx, new_member, data).await {
                tracing::warn!(
                    "Failed to apply autorole to {}: {}",
                    new_member.user.id,
                    e
                );
            }
        }
        _ => {}
    }

    Ok(())
}

/// Give a newly joined member the configured autorole, if any.
async fn apply_autorole(
    ctx: &serenity::Context,
    member: &serenity::Member,
    data: &Data,
) -> anyhow::Result<()> {
    let role_name = match data.autorole.read().await.clone() {
        Some(name) => name,
        None => return Ok(()),
    };

    let roles = member.guild_id.roles(&ctx.http).await?;
    let role_id = roles
        .iter()
        .find(|(_, role)| role.name == role_name)
        .map(|(id, _)| *id);

    match role_id {
        Some(role_id) => {
            member.add_role(&ctx.http, role_id).await?;
            tracing::info!(
                user_id = member.user.id.get(),
                role = %role_name,
                "Applied autorole"
            );
        }
        None => {
            tracing::warn!(
                "Autorole '{}' does not exist in guild {}",
                role_name,
                member.guild_id
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Get Discord bot token from environment
    let token = std::env::var("DISCORD_TOKEN").expect(
        "Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token.",
    );

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create our services with their dependencies.
    // This is the "composition root" where we wire everything together.

    let moderation_service = Arc::new(ModerationService::new(ModerationConfig::default()));
    let warning_ledger = Arc::new(WarningLedger::new());

    let data = Data {
        moderation: Arc::clone(&moderation_service),
        warnings: Arc::clone(&warning_ledger),
        autorole: Arc::new(tokio::sync::RwLock::new(None)),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================
    // Configure the poise framework with our commands and settings.

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            // Register all our commands here
            commands: vec![
                discord::commands::moderation::censor(),
                discord::commands::moderation::removecensor(),
                discord::commands::moderation::censorlist(),
                discord::commands::moderation::antilink(),
                discord::commands::moderation::antispam(),
                discord::commands::moderation::setantispamdelay(),
                discord::commands::moderation::setspamrepeatlimit(),
                discord::commands::moderation::modstatus(),
                discord::commands::warnings::warn(),
                discord::commands::warnings::warnings(),
                discord::commands::warnings::clearwarnings(),
                discord::commands::admin::setautorole(),
                discord::commands::admin::autorole(),
                discord::commands::admin::purge(),
                discord::commands::admin::slowmode(),
                discord::commands::admin::kick(),
                discord::commands::admin::ban(),
            ],
            // Event handler for messages and member joins
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                println!("🤖 Bot is starting up...");

                // Register slash commands globally (can take up to an hour to propagate)
                // For faster development, use register_in_guild instead.
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                println!("✅ Commands registered!");
                println!("🚀 Bot is ready!");

                // Background sweep so spam-tracker memory stays proportional
                // to recently active users, not all users ever seen.
                let moderation = Arc::clone(&data.moderation);
                tokio::spawn(async move {
                    use std::time::Duration as StdDuration;
                    use tokio::time::sleep;

                    loop {
                        sleep(StdDuration::from_secs(SWEEP_INTERVAL_SECS)).await;

                        let cutoff =
                            chrono::Utc::now() - chrono::Duration::seconds(STALE_AFTER_SECS);
                        let removed = moderation.prune_stale_spam_state(cutoff);
                        if removed > 0 {
                            tracing::debug!(
                                removed,
                                remaining = moderation.tracked_users(),
                                "Evicted stale spam-tracker entries"
                            );
                        }
                    }
                });

                Ok(data)
            })
        })
        .build();

    // Create the client and start the bot
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .expect("Error creating client");

    client.start().await.expect("Error running bot");
}
