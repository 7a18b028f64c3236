//! Allocation ledger business logic.
//!
//! Accepts a draw request (a cost/volume breakdown) against a budget pool,
//! computes the total cost and the pool's reconciled remaining balance, and
//! persists the allocation, its cost lines, an immutable history entry, and
//! the balance update as one database transaction. If any step of that unit
//! fails the whole commit rolls back and a reconciliation error is surfaced;
//! the store is never left with an allocation that has no matching balance
//! update.

use crate::{
    entities::{allocation, cost_line, history_entry},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::warn;

/// Action type recorded on every ledger-written history entry.
const HISTORY_ACTION: &str = "update";

/// One line of a draw's cost breakdown, as received from the caller.
///
/// Validation happens at this boundary: every numeric field must be finite,
/// quantity and unit cost non-negative, and the discount within [0, 100].
#[derive(Debug, Clone, PartialEq)]
pub struct CostLineInput {
    /// Human-readable description of the line item
    pub description: String,
    /// Requested quantity
    pub quantity: f64,
    /// Unit cost in currency units
    pub unit_cost: f64,
    /// Discount percentage in [0, 100]
    pub discount_percent: f64,
}

/// Balance reconciliation policy applied when committing a draw to a pool.
///
/// The administration system this ledger replaces recomputed the remaining
/// balance as `|total − approved_amount|` on every commit, because the
/// pool's approved amount is itself periodically replaced with the latest
/// grant. The absolute value masks the sign of an overspend. `Compat`
/// reproduces that behavior verbatim; `Signed` is the corrected mode that
/// keeps the sign (`approved_amount − total`, possibly negative). Both modes
/// flag the underflow on the result so callers can tell them apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileMode {
    /// Remaining = |total − approved_amount| (legacy behavior)
    #[default]
    Compat,
    /// Remaining = approved_amount − total (sign-preserving)
    Signed,
}

/// Result of a committed draw: the persisted records plus the reconciled
/// balance and the underflow flag.
#[derive(Debug, Clone)]
pub struct CommittedAllocation {
    /// The persisted allocation record
    pub allocation: allocation::Model,
    /// The persisted cost lines, in submission order
    pub lines: Vec<cost_line::Model>,
    /// The persisted history entry
    pub history: history_entry::Model,
    /// Pool remaining balance after the commit, None for standalone draws
    pub remaining: Option<f64>,
    /// Whether the draw exceeded the pool's approved amount
    pub underflow: bool,
}

/// Rounds a currency amount half-up to 2 decimal places.
#[must_use]
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Validates a cost breakdown, rejecting malformed lines before any total is
/// computed.
pub fn validate_lines(lines: &[CostLineInput]) -> Result<()> {
    if lines.is_empty() {
        return Err(Error::Validation {
            message: "Cost breakdown must contain at least one line".to_string(),
        });
    }

    for (i, line) in lines.iter().enumerate() {
        for value in [line.quantity, line.unit_cost, line.discount_percent] {
            if !value.is_finite() {
                return Err(Error::Validation {
                    message: format!("Cost line {i} contains a non-numeric value"),
                });
            }
        }
        if line.quantity < 0.0 {
            return Err(Error::InvalidAmount {
                amount: line.quantity,
            });
        }
        if line.unit_cost < 0.0 {
            return Err(Error::InvalidAmount {
                amount: line.unit_cost,
            });
        }
        if !(0.0..=100.0).contains(&line.discount_percent) {
            return Err(Error::Validation {
                message: format!(
                    "Cost line {i} discount {} is outside 0-100",
                    line.discount_percent
                ),
            });
        }
    }

    Ok(())
}

/// Computes the total cost of a breakdown:
/// Σ quantity × unit cost × (1 − discount/100), rounded to 2 decimals.
///
/// Each line is rounded before summation so the stored total matches what a
/// line-by-line display would add up to.
pub fn total_cost(lines: &[CostLineInput]) -> Result<f64> {
    validate_lines(lines)?;

    let total = lines
        .iter()
        .map(|l| round_to_cents(l.quantity * l.unit_cost * (1.0 - l.discount_percent / 100.0)))
        .sum();

    Ok(round_to_cents(total))
}

/// Submits a draw and commits it to the ledger.
///
/// For pool-backed draws this is one logical unit executed inside a database
/// transaction: insert the allocation and its cost lines, append a history
/// entry carrying the remaining-balance snapshot, and update the pool's
/// remaining balance. A missing pool aborts with `PoolNotFound` before any
/// write. A draw that exceeds the approved amount is committed anyway and
/// reported through the `underflow` flag, matching the administration
/// system's observed behavior; use [`crate::core::pool::adjust_remaining`]
/// for hard-failing balance checks.
///
/// Each call creates a new allocation. Submitting identical lines twice
/// creates two ledger entries; the operation is deliberately not idempotent.
///
/// # Arguments
/// * `db` - Database connection
/// * `pool_code` - Target pool, or None for a standalone draw
/// * `lines` - Cost breakdown, validated at this boundary
/// * `requester` - Explicit identity of the submitting user
/// * `mode` - Balance reconciliation policy
pub async fn submit_allocation(
    db: &DatabaseConnection,
    pool_code: Option<&str>,
    lines: &[CostLineInput],
    requester: &str,
    mode: ReconcileMode,
) -> Result<CommittedAllocation> {
    let total = total_cost(lines)?;

    let txn = db.begin().await?;

    // Resolve the pool and the reconciled balance before writing anything.
    let reconciled = match pool_code {
        Some(code) => {
            let pool = crate::core::pool::get_pool(&txn, code).await?;
            let signed = round_to_cents(pool.approved_amount - total);
            let underflow = signed < 0.0;
            if underflow {
                warn!(
                    pool = code,
                    total, signed, "draw exceeds the pool's approved amount"
                );
            }
            let remaining = match mode {
                ReconcileMode::Compat => signed.abs(),
                ReconcileMode::Signed => signed,
            };
            Some((code.to_string(), remaining, underflow))
        }
        None => None,
    };

    let now = chrono::Utc::now();
    let allocation = allocation::ActiveModel {
        pool_code: Set(pool_code.map(ToString::to_string)),
        total_cost: Set(total),
        requester: Set(requester.to_string()),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut persisted_lines = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let row = cost_line::ActiveModel {
            allocation_id: Set(allocation.id),
            line_no: Set(i32::try_from(i).map_err(|_| Error::Validation {
                message: "Too many cost lines".to_string(),
            })?),
            description: Set(line.description.clone()),
            quantity: Set(line.quantity),
            unit_cost: Set(line.unit_cost),
            discount_percent: Set(line.discount_percent),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        persisted_lines.push(row);
    }

    let history = history_entry::ActiveModel {
        allocation_id: Set(allocation.id),
        pool_code: Set(reconciled.as_ref().map(|(code, _, _)| code.clone())),
        remaining_after: Set(reconciled.as_ref().map(|&(_, remaining, _)| remaining)),
        total_cost: Set(total),
        actor: Set(requester.to_string()),
        action: Set(HISTORY_ACTION.to_string()),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if let Some((code, remaining, _)) = &reconciled {
        crate::core::pool::set_remaining(&txn, code, *remaining).await?;
    }

    // The allocation, history entry, and balance update stand or fall
    // together; a commit failure rolls all three back.
    txn.commit().await.map_err(|e| Error::Reconciliation {
        code: pool_code.unwrap_or("<standalone>").to_string(),
        message: e.to_string(),
    })?;

    let (remaining, underflow) = reconciled
        .map_or((None, false), |(_, remaining, underflow)| {
            (Some(remaining), underflow)
        });

    Ok(CommittedAllocation {
        allocation,
        lines: persisted_lines,
        history,
        remaining,
        underflow,
    })
}

/// Retrieves an allocation by its id.
pub async fn get_allocation_by_id(
    db: &DatabaseConnection,
    allocation_id: i64,
) -> Result<Option<allocation::Model>> {
    crate::entities::Allocation::find_by_id(allocation_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the ordered cost lines of an allocation.
pub async fn get_cost_lines(
    db: &DatabaseConnection,
    allocation_id: i64,
) -> Result<Vec<cost_line::Model>> {
    crate::entities::CostLine::find()
        .filter(cost_line::Column::AllocationId.eq(allocation_id))
        .order_by_asc(cost_line::Column::LineNo)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the append-only history of a pool in replay (oldest-first)
/// order. Read-only; the crate exposes no way to mutate or delete entries.
pub async fn get_history_for_pool(
    db: &DatabaseConnection,
    pool_code: &str,
) -> Result<Vec<history_entry::Model>> {
    crate::entities::HistoryEntry::find()
        .filter(history_entry::Column::PoolCode.eq(pool_code))
        .order_by_asc(history_entry::Column::CreatedAt)
        .order_by_asc(history_entry::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
