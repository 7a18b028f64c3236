//! Seed configuration loading from config.toml.
//!
//! The pools defined in config.toml are used to seed the registry on first
//! run or when pools are missing; the `[ledger]` section selects the balance
//! reconciliation policy. Seeding is idempotent: pools that already exist
//! are left untouched.

use crate::{
    core::ledger::ReconcileMode,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Ledger settings
    #[serde(default)]
    pub ledger: LedgerSettings,
    /// List of pool seeds
    #[serde(default)]
    pub pools: Vec<PoolConfig>,
}

/// Ledger-wide settings from the `[ledger]` section
#[derive(Debug, Deserialize, Default)]
pub struct LedgerSettings {
    /// Balance reconciliation policy: `"compat"` (legacy absolute-difference)
    /// or `"signed"` (corrected sign-preserving subtraction)
    #[serde(default)]
    pub reconcile_mode: ReconcileMode,
}

/// Configuration for a single budget pool seed
#[derive(Debug, Deserialize, Clone)]
pub struct PoolConfig {
    /// Pool code (e.g., "COVER-2024-1")
    pub code: String,
    /// Approved grant amount
    pub approved_amount: f64,
}

/// Loads seed configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads seed configuration from the default location (./config.toml).
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

/// Seeds the pool registry with any configured pools that do not exist yet.
///
/// Returns the number of pools created. Safe to run on every startup.
pub async fn seed_initial_pools(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let mut created = 0;
    for pool in &config.pools {
        match crate::core::pool::create_pool(db, pool.code.clone(), pool.approved_amount).await {
            Ok(model) => {
                info!(code = model.code, amount = model.approved_amount, "seeded pool");
                created += 1;
            }
            Err(Error::DuplicatePool { .. }) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_parse_seed_config() {
        let toml_str = r#"
            [ledger]
            reconcile_mode = "signed"

            [[pools]]
            code = "COVER-2024-1"
            approved_amount = 10000.0

            [[pools]]
            code = "COVER-2024-2"
            approved_amount = 2500.0
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ledger.reconcile_mode, ReconcileMode::Signed);
        assert_eq!(config.pools.len(), 2);
        assert_eq!(config.pools[0].code, "COVER-2024-1");
        assert_eq!(config.pools[0].approved_amount, 10_000.0);
    }

    #[test]
    fn test_parse_minimal_config_defaults_to_compat() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.ledger.reconcile_mode, ReconcileMode::Compat);
        assert!(config.pools.is_empty());
    }

    #[tokio::test]
    async fn test_seed_initial_pools_idempotent() -> Result<()> {
        let db = setup_test_db().await?;

        let config: Config = toml::from_str(
            r#"
            [[pools]]
            code = "COVER-2024-1"
            approved_amount = 10000.0
        "#,
        )
        .unwrap();

        assert_eq!(seed_initial_pools(&db, &config).await?, 1);
        // Re-running creates nothing and changes nothing
        assert_eq!(seed_initial_pools(&db, &config).await?, 0);

        let pool = crate::core::pool::get_pool(&db, "COVER-2024-1").await?;
        assert_eq!(pool.approved_amount, 10_000.0);

        Ok(())
    }
}
