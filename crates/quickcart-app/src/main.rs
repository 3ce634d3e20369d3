//! QuickCart application binary - composition root.
//!
//! Ties together the QuickCart crates into a single executable:
//! 1. Load configuration from TOML and apply CLI/env overrides
//! 2. Load language resources and the intent catalog
//! 3. Open the SQLite database (and optionally seed products)
//! 4. Start the axum REST API server

mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;

use quickcart_api::routes;
use quickcart_api::state::AppState;
use quickcart_chat::{ChatEngine, ChatError, IntentCatalog, LanguageResources};
use quickcart_core::config::{ChatConfig, QuickCartConfig};
use quickcart_core::error::QuickCartError;
use quickcart_core::types::Product;
use quickcart_storage::{Database, ProductRepository};

use crate::cli::CliArgs;

/// Expand a leading `~/` to the user's home directory.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

/// Build the chat engine from configured resource paths.
///
/// Empty paths select the built-in English resources and intent catalog.
fn build_engine(config: &ChatConfig) -> Result<ChatEngine, ChatError> {
    let resources = if config.language_path.is_empty() {
        LanguageResources::english()?
    } else {
        LanguageResources::load(Path::new(&config.language_path))?
    };

    let catalog = if config.intents_path.is_empty() {
        IntentCatalog::builtin()?
    } else {
        IntentCatalog::load(Path::new(&config.intents_path))?
    };

    Ok(ChatEngine::new(Arc::new(resources), catalog, config))
}

/// Load a JSON array of products into the database.
fn seed_products(db: &Arc<Database>, path: &Path) -> Result<usize, QuickCartError> {
    let content = std::fs::read_to_string(path)?;
    let products: Vec<Product> = serde_json::from_str(&content)?;

    let repo = ProductRepository::new(Arc::clone(db));
    for product in &products {
        repo.insert(product)?;
    }
    Ok(products.len())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let (mut config, config_error) = match QuickCartConfig::load(&config_file) {
        Ok(config) => (config, None),
        Err(e) => (QuickCartConfig::default(), Some(e)),
    };
    config.general.port = args.resolve_port(config.general.port);
    if let Some(dir) = args.resolve_data_dir() {
        config.general.data_dir = dir;
    }
    if let Some(level) = args.resolve_log_level() {
        config.general.log_level = level;
    }

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting QuickCart assistant v{}", env!("CARGO_PKG_VERSION"));
    match config_error {
        None => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load config, using defaults"
        ),
    }

    // Intent engine. Bad resources or a bad catalog are fatal.
    let engine = match build_engine(&config.chat) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize intent engine");
            return Err(e.into());
        }
    };
    tracing::info!(
        intents = engine.catalog().len(),
        "Intent catalog loaded"
    );

    // Storage.
    let data_dir = resolve_data_dir(&config.general.data_dir);
    let db = Arc::new(Database::open_in_dir(&data_dir)?);
    tracing::info!(path = ?db.path(), "SQLite database ready");

    if let Some(ref seed_file) = args.seed_products {
        let count = seed_products(&db, seed_file)?;
        tracing::info!(count, path = %seed_file.display(), "Products seeded");
    }

    // === API server ===

    let port = config.general.port;
    let addr = format!("127.0.0.1:{}", port);

    let state = AppState::new(config, engine, db);
    let router = routes::create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind - is another instance running?");
            tracing::error!("Try: quickcart --port {}", port.saturating_add(1));
            return Err(e.into());
        }
    };

    tracing::info!(addr = %addr, "API server listening");

    axum::serve(listener, router).await?;

    Ok(())
}
