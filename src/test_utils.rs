//! Shared test utilities for the promo ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{directory, ledger::CostLineInput, pool},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test pool with the default approved amount of 10000.0.
pub async fn create_test_pool(
    db: &DatabaseConnection,
    code: &str,
) -> Result<entities::pool::Model> {
    pool::create_pool(db, code.to_string(), 10_000.0).await
}

/// Creates a test pool with a custom approved amount.
pub async fn create_custom_pool(
    db: &DatabaseConnection,
    code: &str,
    approved_amount: f64,
) -> Result<entities::pool::Model> {
    pool::create_pool(db, code.to_string(), approved_amount).await
}

/// Creates a test approval plan with fixed organizational attributes.
pub async fn create_test_plan(db: &DatabaseConnection) -> Result<entities::approval_plan::Model> {
    directory::create_plan(db, "Sales", "Manager", "Acme Foods", "Trade Promo", "L1").await
}

/// A one-line cost breakdown: 2 × 100 at 10% discount, totaling 180.00.
#[must_use]
pub fn test_lines() -> Vec<CostLineInput> {
    vec![CostLineInput {
        description: "Test line".to_string(),
        quantity: 2.0,
        unit_cost: 100.0,
        discount_percent: 10.0,
    }]
}

/// Sets up a complete test environment with a pool.
/// Returns (db, pool) for common test scenarios.
pub async fn setup_with_pool() -> Result<(DatabaseConnection, entities::pool::Model)> {
    let db = setup_test_db().await?;
    let pool = create_test_pool(&db, "COVER-2024-1").await?;
    Ok((db, pool))
}
