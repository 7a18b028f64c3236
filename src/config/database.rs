//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables
//! are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! struct definitions without hand-written SQL.

use crate::entities::{
    Allocation, ApprovalPlan, ApproverAssignment, CostLine, HistoryEntry, LicenseKey,
    PlanAssignment, Pool, SingleApproval,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the `DATABASE_URL` environment variable or
/// returns the default local `SQLite` path.
pub fn get_database_url() -> Result<String> {
    Ok(std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/promo_ledger.sqlite".to_string()))
}

/// Establishes a connection to the database using [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url()?;
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let pool_table = schema.create_table_from_entity(Pool);
    let allocation_table = schema.create_table_from_entity(Allocation);
    let cost_line_table = schema.create_table_from_entity(CostLine);
    let history_table = schema.create_table_from_entity(HistoryEntry);
    let approver_table = schema.create_table_from_entity(ApproverAssignment);
    let plan_table = schema.create_table_from_entity(ApprovalPlan);
    let plan_assignment_table = schema.create_table_from_entity(PlanAssignment);
    let single_approval_table = schema.create_table_from_entity(SingleApproval);
    let license_table = schema.create_table_from_entity(LicenseKey);

    db.execute(builder.build(&pool_table)).await?;
    db.execute(builder.build(&allocation_table)).await?;
    db.execute(builder.build(&cost_line_table)).await?;
    db.execute(builder.build(&history_table)).await?;
    db.execute(builder.build(&approver_table)).await?;
    db.execute(builder.build(&plan_table)).await?;
    db.execute(builder.build(&plan_assignment_table)).await?;
    db.execute(builder.build(&single_approval_table)).await?;
    db.execute(builder.build(&license_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        allocation::Model as AllocationModel, license_key::Model as LicenseKeyModel,
        pool::Model as PoolModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Tables exist and are queryable
        let _: Vec<PoolModel> = Pool::find().limit(1).all(&db).await?;
        let _: Vec<AllocationModel> = Allocation::find().limit(1).all(&db).await?;
        let _: Vec<LicenseKeyModel> = LicenseKey::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[test]
    fn test_default_database_url() -> Result<()> {
        // Uses the env var when present, falls back to the sqlite file path
        let url = get_database_url()?;
        assert!(!url.is_empty());
        Ok(())
    }
}
