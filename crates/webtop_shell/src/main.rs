use std::io;
use std::sync::Arc;

use chat_api::{ChatApiClient, ChatApiConfig};
use chat_session::{ChatSession, ConversationCache, StreamOutcome};
use tracing::{info, warn};
use webtop::{AppKind, ScreenConfig, WindowManager};

mod report;

const PROMPT_ENV: &str = "WEBTOP_CHAT_PROMPT";
const DEFAULT_PROMPT: &str = "Hello! What can you do?";

#[tokio::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let screen = ScreenConfig::from_env().map_err(io::Error::other)?;
    let mut manager = WindowManager::new(screen.geometry);
    for app_kind in AppKind::ALL {
        manager.launch(app_kind);
    }
    manager.tile(screen.tile_mode);
    info!(windows = manager.len(), mode = %screen.tile_mode, "desktop ready");

    for line in report::stacking_lines(&manager.stacking_order()) {
        println!("{line}");
    }
    println!("{}", report::taskbar_line(&manager.taskbar_entries()));

    let Some(config) = ChatApiConfig::from_env() else {
        info!("no chat server configured; skipping chat session");
        return Ok(());
    };
    run_chat(config).await
}

async fn run_chat(config: ChatApiConfig) -> io::Result<()> {
    let client = Arc::new(ChatApiClient::new(config).map_err(io::Error::other)?);
    info!(
        base_url = %client.base_url(),
        timeout = ?client.config().timeout,
        "chat server configured"
    );
    let cache = Arc::new(ConversationCache::new());

    let conversation = client
        .create_conversation("")
        .await
        .map_err(io::Error::other)?;
    info!(id = conversation.id, title = %conversation.title, "conversation created");

    let session = Arc::new(ChatSession::new(
        conversation.id,
        client.clone(),
        cache.clone(),
    ));
    let prompt = std::env::var(PROMPT_ENV).unwrap_or_else(|_| DEFAULT_PROMPT.to_string());

    let send = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.send_message(prompt, None).await }
    });
    let stopper = tokio::spawn({
        let session = Arc::clone(&session);
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                session.stop_stream();
            }
        }
    });

    let outcome = send
        .await
        .map_err(io::Error::other)?
        .map_err(io::Error::other)?;
    stopper.abort();

    println!("{}", report::outcome_line(&outcome, &session.state()));

    if outcome == StreamOutcome::Completed {
        match cache.conversation_or_fetch(client.as_ref(), conversation.id).await {
            Ok(refreshed) => info!(
                messages = refreshed.messages().len(),
                title = %refreshed.title,
                "conversation refreshed"
            ),
            Err(error) => warn!(%error, "failed to refresh conversation"),
        }
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();
}
