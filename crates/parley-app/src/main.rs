//! Parley application binary - composition root.
//!
//! Ties together the Parley crates:
//! 1. Load configuration from TOML
//! 2. Build the HTTP clients for the dialogue and translation backends
//! 3. Wrap them in the translation gateway
//! 4. Serve the gateway over HTTP, or run a terminal chat session
//!
//! `parley` starts the gateway server; `parley chat` opens an interactive
//! conversation in the terminal instead.

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use parley_backend::{HttpDialogueClient, HttpTranslationClient};
use parley_chat::ChatOrchestrator;
use parley_core::config::ParleyConfig;
use parley_gateway::{create_router, AppState, MessageGateway};

/// Resolve the config file path (PARLEY_CONFIG env, or ~/.parley/config.toml).
fn config_path() -> PathBuf {
    if let Ok(p) = std::env::var("PARLEY_CONFIG") {
        return PathBuf::from(p);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".parley").join("config.toml");
    }
    PathBuf::from("config.toml")
}

fn build_gateway(config: &ParleyConfig) -> MessageGateway {
    let dialogue = Arc::new(HttpDialogueClient::new(
        &config.dialogue.endpoint_url,
        config.dialogue.api_key.clone(),
    ));
    tracing::info!(endpoint = %config.dialogue.endpoint_url, "Dialogue client ready");

    let translator = Arc::new(HttpTranslationClient::new(
        &config.translation.endpoint_url,
        config.translation.api_key.clone(),
    ));
    tracing::info!(
        endpoint = %config.translation.endpoint_url,
        pivot = %config.translation.pivot_lang,
        "Translation client ready"
    );

    MessageGateway::new(dialogue, translator, config.translation.pivot_lang.clone())
}

/// Run the gateway as an HTTP server.
async fn run_server(config: ParleyConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(Arc::new(build_gateway(&config)));

    let port = std::env::var("PARLEY_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(config.server.port);
    let addr = format!("127.0.0.1:{}", port);

    let router = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind — is another instance running?");
            tracing::error!("Try: PARLEY_PORT={} cargo run -p parley-app", port + 1);
            return Err(e.into());
        }
    };

    tracing::info!(addr = %addr, "Gateway listening");

    axum::serve(listener, router).await?;
    Ok(())
}

/// Run an interactive conversation in the terminal.
///
/// `PARLEY_LANG` picks the locale of the person typing; anything other
/// than the pivot locale goes through the translation gateway both ways.
async fn run_chat(config: ParleyConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source_lang =
        std::env::var("PARLEY_LANG").unwrap_or_else(|_| config.translation.pivot_lang.clone());
    let channel = Arc::new(build_gateway(&config));
    let orchestrator = ChatOrchestrator::new(channel, config.chat.clone(), source_lang);

    let mut printed = 0;
    if orchestrator.open_conversation().await {
        printed = print_new_replies(&orchestrator, printed);
    } else {
        tracing::warn!("No welcome reply; continuing anyway");
    }

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        if text.is_empty() || text == "/quit" {
            break;
        }

        // Everything typed counts as one transcript entry, including the
        // user's own line.
        printed = orchestrator.messages().len() + 1;
        orchestrator.submit(text).await;
        printed = print_new_replies(&orchestrator, printed);
    }
    Ok(())
}

/// Print transcript entries past `from`, returning the new high-water mark.
fn print_new_replies(orchestrator: &ChatOrchestrator, from: usize) -> usize {
    let messages = orchestrator.messages();
    for message in &messages[from.min(messages.len())..] {
        if !message.text.is_empty() {
            println!("{}", message.text);
        }
    }
    messages.len()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Parley v{}", env!("CARGO_PKG_VERSION"));

    let config_file = config_path();
    let config = ParleyConfig::load_or_default(&config_file);
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    if config.dialogue.api_key.is_empty() {
        tracing::warn!("No dialogue API key configured; backend calls will be rejected");
    }

    match std::env::args().nth(1).as_deref() {
        Some("chat") => run_chat(config).await,
        Some(other) => {
            eprintln!("Unknown command: {} (expected `chat` or no argument)", other);
            std::process::exit(2);
        }
        None => run_server(config).await,
    }
}
