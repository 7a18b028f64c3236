//! Bootstrap binary: initializes the database schema and seeds configured
//! pools. The library crate is the product; this binary prepares a store for
//! the UI layers that consume it.

use dotenvy::dotenv;
use promo_ledger::{
    config,
    errors::{Error, Result},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; non-fatal, env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load seed configuration; a missing config.toml means nothing to seed
    let seed_config = match config::seed::load_default_config() {
        Ok(cfg) => Some(cfg),
        Err(Error::Config { message }) => {
            info!("No usable config.toml ({message}); skipping seed.");
            None
        }
        Err(e) => return Err(e),
    };

    // 4. Initialize the database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|()| info!("Database tables created."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Seed configured pools (idempotent)
    if let Some(cfg) = seed_config {
        let created = config::seed::seed_initial_pools(&db, &cfg).await?;
        info!(
            created,
            reconcile_mode = ?cfg.ledger.reconcile_mode,
            "Pool seeding complete."
        );
    }

    info!("Promo ledger store is ready.");
    Ok(())
}
