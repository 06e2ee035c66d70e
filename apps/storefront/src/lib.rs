//! # Storefront App Library
//!
//! Startup, state wiring and the command layer for the storefront.
//!
//! ## Module Organization
//! ```text
//! storefront_app_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Subcommands → command functions
//! ├── catalog.rs      ◄─── The bundled mock catalog
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── cart.rs     ◄─── Persisted cart
//! │   ├── checkout.rs ◄─── In-memory checkout wizard
//! │   ├── order.rs    ◄─── Persisted order list
//! │   ├── wishlist.rs ◄─── Persisted wishlist
//! │   ├── catalog.rs  ◄─── Read-only products
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/       ◄─── One module per concern
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use directories::ProjectDirs;
use serde_json::Value;
use storefront_store::{Database, DbConfig, KeyValueStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::ApiError;
use state::{CartState, CatalogState, CheckoutState, ConfigState, DbState, OrderState, WishlistState};

/// Every state the commands use, hydrated from one key-value store.
pub struct Storefront<S> {
    pub config: ConfigState,
    pub catalog: CatalogState,
    pub cart: CartState<S>,
    pub checkout: CheckoutState,
    pub orders: OrderState<S>,
    pub wishlist: WishlistState<S>,
}

impl<S: KeyValueStore + Clone> Storefront<S> {
    /// Loads the persisted stores from `kv`. The checkout starts blank.
    pub async fn load(config: ConfigState, catalog: CatalogState, kv: S) -> Self {
        let cart = CartState::load(kv.clone()).await;
        let orders = OrderState::load(kv.clone()).await;
        let wishlist = WishlistState::load(kv).await;

        Storefront {
            config,
            catalog,
            cart,
            checkout: CheckoutState::new(),
            orders,
            wishlist,
        }
    }
}

/// Runs one CLI invocation and returns its JSON output.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load configuration ─────── defaults + STOREFRONT_* overrides       │
/// │                                                                         │
/// │  2. Determine database path ── STOREFRONT_DB_PATH or the platform      │
/// │                                data directory                           │
/// │                                                                         │
/// │  3. Connect to database ────── SQLite with WAL, pending migrations     │
/// │                                                                         │
/// │  4. Hydrate stores ─────────── cart, orders, wishlist from kv_store    │
/// │                                                                         │
/// │  5. Execute subcommand ─────── JSON on stdout                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<Value, ApiError> {
    let config = ConfigState::from_env();
    info!(store = %config.store_name, "Starting storefront");

    let db_path = get_database_path(&config)?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    let db_state = DbState::new(db);
    info!("Database connected and migrations applied");

    let app = Storefront::load(config, CatalogState::mock(), db_state.kv()).await;
    let result = cli::execute(&app, cli.command).await;

    db_state.inner().close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only command output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_store=trace` - Trace the persistence layer only
/// - Default: `info,storefront=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.storefront.shop/storefront.db`
/// - **Windows**: `%APPDATA%\storefront\shop\data\storefront.db`
/// - **Linux**: `~/.local/share/shop/storefront.db`
///
/// ## Override
/// `STOREFRONT_DB_PATH` (already folded into `config.database_path`).
pub fn get_database_path(config: &ConfigState) -> Result<PathBuf, ApiError> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "storefront", "shop")
        .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .map_err(|e| ApiError::internal(format!("Could not create {}: {e}", data_dir.display())))?;

    Ok(data_dir.join("storefront.db"))
}
