//! Budget pool registry - Handles all pool-related operations.
//!
//! Provides functions for creating, retrieving, and adjusting promotional
//! funding pools. The registry is the single point of truth for a pool's
//! remaining balance; the allocation ledger mutates balances only through
//! the helpers in this module. All functions are async and return Result
//! types for error handling.

use crate::{
    entities::{Pool, pool},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Tri-state approval status of a budget pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalStatus {
    /// Awaiting sign-off
    Pending,
    /// Signed off and usable
    Approved,
    /// Declined
    Rejected,
}

impl ApprovalStatus {
    /// Returns the string stored in the `approval_status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Creates a new budget pool with the given code and approved amount.
///
/// The pool starts with `remaining == approved_amount` and status "pending".
/// Validates that the code is non-empty and the amount is a finite,
/// non-negative number, and rejects duplicate codes.
pub async fn create_pool(
    db: &DatabaseConnection,
    code: String,
    approved_amount: f64,
) -> Result<pool::Model> {
    if code.trim().is_empty() {
        return Err(Error::Validation {
            message: "Pool code cannot be empty".to_string(),
        });
    }

    if !approved_amount.is_finite() || approved_amount < 0.0 {
        return Err(Error::InvalidAmount {
            amount: approved_amount,
        });
    }

    let code = code.trim().to_string();
    let existing = Pool::find()
        .filter(pool::Column::Code.eq(code.clone()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::DuplicatePool { code });
    }

    let pool = pool::ActiveModel {
        code: Set(code),
        approved_amount: Set(approved_amount),
        remaining: Set(approved_amount),
        approval_status: Set(ApprovalStatus::Pending.as_str().to_string()),
        is_deleted: Set(false),
        ..Default::default()
    };

    let result = pool.insert(db).await?;
    Ok(result)
}

/// Finds an active (non-retired) pool by its code.
///
/// Returns `PoolNotFound` if no pool exists under the code or the pool has
/// been retired. A missing pool aborts the whole allocation at the caller.
pub async fn get_pool<C>(db: &C, code: &str) -> Result<pool::Model>
where
    C: ConnectionTrait,
{
    Pool::find()
        .filter(pool::Column::Code.eq(code))
        .filter(pool::Column::IsDeleted.eq(false))
        .one(db)
        .await?
        .ok_or_else(|| Error::PoolNotFound {
            code: code.to_string(),
        })
}

/// Applies a delta to a pool's remaining balance at the database level.
///
/// This is the single mutation point for pool balances. The update is issued
/// as `UPDATE pools SET remaining = remaining + delta WHERE code = ?` so
/// concurrent adjustments never lose each other's writes. If the resulting
/// balance would be negative the adjustment is rejected with `Underflow`
/// unless `allow_negative` is set.
///
/// # Arguments
/// * `db` - Database connection or transaction
/// * `code` - Code of the pool to adjust
/// * `delta` - Amount to add to the balance (negative for draws)
/// * `allow_negative` - Permit the balance to go below zero
///
/// # Returns
/// The new remaining balance
pub async fn adjust_remaining<C>(
    db: &C,
    code: &str,
    delta: f64,
    allow_negative: bool,
) -> Result<f64>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    if !delta.is_finite() {
        return Err(Error::InvalidAmount { amount: delta });
    }

    let pool = get_pool(db, code).await?;

    let would_be = pool.remaining + delta;
    if would_be < 0.0 && !allow_negative {
        return Err(Error::Underflow {
            code: code.to_string(),
            remaining: pool.remaining,
            delta,
        });
    }

    Pool::update_many()
        .col_expr(
            pool::Column::Remaining,
            Expr::col(pool::Column::Remaining).add(delta),
        )
        .filter(pool::Column::Code.eq(code))
        .exec(db)
        .await?;

    let updated = get_pool(db, code).await?;
    Ok(updated.remaining)
}

/// Overwrites a pool's remaining balance with a reconciled value.
///
/// Used by the allocation ledger, whose reconciliation policy recomputes the
/// remaining balance from the latest grant rather than applying a delta.
pub(crate) async fn set_remaining<C>(db: &C, code: &str, remaining: f64) -> Result<()>
where
    C: ConnectionTrait,
{
    let pool = get_pool(db, code).await?;
    let mut active: pool::ActiveModel = pool.into();
    active.remaining = Set(remaining);
    active.update(db).await?;
    Ok(())
}

/// Sets the tri-state approval status of a pool.
pub async fn set_approval_status(
    db: &DatabaseConnection,
    code: &str,
    status: ApprovalStatus,
) -> Result<pool::Model> {
    let pool = get_pool(db, code).await?;
    let mut active: pool::ActiveModel = pool.into();
    active.approval_status = Set(status.as_str().to_string());
    active.update(db).await.map_err(Into::into)
}

/// Retires a pool. Pools are never physically deleted; retirement hides the
/// pool from lookups while preserving its history.
pub async fn retire_pool(db: &DatabaseConnection, code: &str) -> Result<()> {
    let pool = get_pool(db, code).await?;
    let mut active: pool::ActiveModel = pool.into();
    active.is_deleted = Set(true);
    active.update(db).await?;
    Ok(())
}

/// Retrieves all active pools ordered by code, for display collaborators.
/// Read-only; callers must not mutate pool state through this view.
pub async fn list_active_pools(db: &DatabaseConnection) -> Result<Vec<pool::Model>> {
    Pool::find()
        .filter(pool::Column::IsDeleted.eq(false))
        .order_by_asc(pool::Column::Code)
        .all(db)
        .await
        .map_err(Into::into)
}
