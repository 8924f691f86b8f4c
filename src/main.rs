//! Standup Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use tracing::{info, warn, error};

use standup_bot::{
    config::Settings,
    utils::logging,
    database::{DatabaseService, Storage, create_pool, run_migrations, connection::DatabaseConfig},
    services::{BotIdentity, GithubClient, PullRequestSource, ServiceFactory, TeamRegistry, TelegramMessenger},
    handlers::{EventRouter, telegram},
    i18n::I18n,
    models::InboundUpdate,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", standup_bot::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&DatabaseConfig::from(&settings.database)).await?;

    // Run database migrations
    info!("Running database migrations...");
    run_migrations(&db_pool).await?;

    let storage: Arc<dyn Storage> = Arc::new(DatabaseService::new(db_pool));

    // Initialize i18n system
    info!("Loading translations...");
    let i18n = Arc::new(I18n::load(&settings.i18n).await?);

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);
    let me = bot.get_me().await?;
    let username = settings
        .bot
        .username
        .clone()
        .filter(|name| !name.is_empty())
        .or_else(|| me.username.clone())
        .unwrap_or_default();
    if username.is_empty() {
        warn!("Bot has no username, mentions cannot be recognized");
    }
    let identity = BotIdentity::new(me.id.0 as i64, &username);
    info!(bot_id = identity.id, username = %identity.username, "Bot identity resolved");

    // Start the team registry and restore teams for known groups
    let (teams, team_queue) = TeamRegistry::new();
    tokio::spawn(Arc::clone(&teams).run(team_queue));
    let groups = storage.list_groups().await?;
    info!("Restoring {} teams...", groups.len());
    for group in groups {
        teams.watch(group)?;
    }

    let pull_requests: Option<Arc<dyn PullRequestSource>> = if settings.features.pull_request_review {
        Some(Arc::new(GithubClient::new(&settings.github)?))
    } else {
        None
    };

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(
        &settings,
        identity,
        storage,
        Arc::new(TelegramMessenger::new(bot.clone())),
        teams,
        i18n,
        pull_requests,
    );
    let router = Arc::new(EventRouter::new(services, &settings.i18n));

    // Create dispatcher with dependencies registered
    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![router])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.kind);
        })
        .enable_ctrlc_handler()
        .build();

    info!("Starting bot with polling mode...");
    dispatcher.dispatch().await;

    info!("Standup bot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_edited_message().endpoint(handle_edited_message))
}

/// Handle new messages
async fn handle_message(msg: Message, router: Arc<EventRouter>) -> HandlerResult {
    route(&router, telegram::new_message(&msg)).await
}

/// Handle edited messages
async fn handle_edited_message(msg: Message, router: Arc<EventRouter>) -> HandlerResult {
    route(&router, telegram::edited_message(&msg)).await
}

async fn route(router: &EventRouter, update: InboundUpdate) -> HandlerResult {
    if let Err(e) = router.handle_update(&update).await {
        let chat_id = update.message().map(|m| m.chat.id);
        if e.is_recoverable() && !e.is_storage() {
            warn!(error = %e, severity = %e.severity(), chat_id = ?chat_id, "Update handled with errors");
        } else {
            error!(error = %e, severity = %e.severity(), chat_id = ?chat_id, "Error handling update");
        }
        return Err(e.into());
    }

    Ok(())
}
