use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::http::Http;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use remindme::commands::CommandHandler;
use remindme::core::Config;
use remindme::features::reminders::{ReminderScheduler, ReminderService, ReminderStore};
use remindme::features::time_extract::RelativeTimeExtractor;
use remindme::gateway::DiscordGateway;

struct Handler {
    command_handler: CommandHandler,
    service: Arc<ReminderService>,
    save_file: PathBuf,
    restored: AtomicBool,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, _ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        match self
            .command_handler
            .handle_message(msg.author.id.0, msg.channel_id.0, msg.id.0, &msg.content)
            .await
        {
            Ok(false) => {}
            Ok(true) => info!("handled message {} from user {}", msg.id.0, msg.author.id.0),
            Err(e) => error!("error handling message {}: {e}", msg.id.0),
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());

        // The gateway can reconnect and fire ready again; reminders are
        // only restored once per process.
        if self.restored.swap(true, Ordering::SeqCst) {
            return;
        }
        match self.service.restore(&self.save_file) {
            Ok(count) => info!("restored {count} saved reminder(s)"),
            Err(e) => warn!("could not restore saved reminders: {e}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting RemindMe Discord bot...");

    // Standalone HTTP client so the gateway exists before the Discord
    // client is built.
    let http = Arc::new(Http::new(&config.discord_token));
    let gateway = Arc::new(DiscordGateway::new(http));

    let service = Arc::new(ReminderService::new(
        Arc::new(ReminderStore::new()),
        Arc::new(ReminderScheduler::new()),
        gateway.clone(),
        Arc::new(RelativeTimeExtractor::new()),
    ));

    let command_handler = CommandHandler::new(
        service.clone(),
        gateway,
        config.command_prefixes.clone(),
    );

    let save_file = PathBuf::from(&config.save_file);
    let handler = Handler {
        command_handler,
        service: service.clone(),
        save_file: save_file.clone(),
        restored: AtomicBool::new(false),
    };

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    // Orderly shutdown: persist pending reminders, then drop the gateway
    // connection.
    let shard_manager = client.shard_manager.clone();
    let shutdown_service = service.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {e}");
            return;
        }
        info!("Shutdown signal received; saving pending reminders...");
        if let Err(e) = shutdown_service.save(&save_file) {
            error!("Failed to save pending reminders: {e}");
        }
        shard_manager.lock().await.shutdown_all().await;
    });

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
