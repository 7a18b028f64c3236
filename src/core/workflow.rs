//! Workflow coordinator - composes the ledger, directory, and registry.
//!
//! A draw moves through `Draft → Submitted → ChainResolved → Committed`
//! or terminates in `Rejected`. Drafts are assembled client-side and never
//! persisted; submission validates the cost breakdown, resolves the
//! requester's approver chain, and only then asks the allocation ledger to
//! commit. A failed commit is never retried automatically; the caller must
//! resubmit a fresh draft. The requester identity is an explicit parameter
//! on every call, never read from ambient state.

use crate::{
    core::{
        directory::{self, ResolvedChain},
        ledger::{self, CostLineInput, ReconcileMode},
    },
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use tracing::info;

/// State of a draw within the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStatus {
    /// Client-side assembly, nothing persisted
    Draft,
    /// Cost breakdown validated, submission in flight
    Submitted,
    /// Approver chain resolved for the requester
    ChainResolved,
    /// Terminal success
    Committed,
    /// Terminal failure; no pool mutation is retried
    Rejected,
}

/// Why a draw was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No plan, manual tier, or single-approval record resolves for the
    /// requester; a draw cannot proceed without a resolvable chain.
    NoApproverConfigured,
}

/// Outcome of a draw submission, returned to the submission form.
#[derive(Debug, Clone)]
pub struct DrawReceipt {
    /// Terminal status: `Committed` or `Rejected`
    pub status: DrawStatus,
    /// Id of the committed allocation, None when rejected
    pub allocation_id: Option<i64>,
    /// Pool remaining balance after the commit, None for standalone draws
    /// or rejections
    pub remaining: Option<f64>,
    /// Whether the committed draw exceeded the pool's approved amount
    pub underflow: bool,
    /// The approver chain resolved for the requester, None when rejected
    pub chain: Option<ResolvedChain>,
    /// Reason for rejection, None when committed
    pub reject_reason: Option<RejectReason>,
}

/// Submits a draw through the full workflow.
///
/// Validation failures and a missing pool abort with the corresponding
/// error, surfaced verbatim. An unresolvable approver chain is a state
/// transition rather than an error: the receipt comes back `Rejected` with
/// `NoApproverConfigured` and no pool has been touched.
///
/// # Arguments
/// * `db` - Database connection
/// * `pool_code` - Target pool, or None for a standalone draw
/// * `lines` - Cost breakdown assembled by the draft
/// * `requester` - Explicit identity of the submitting user
/// * `mode` - Balance reconciliation policy for the ledger
pub async fn submit_draw(
    db: &DatabaseConnection,
    pool_code: Option<&str>,
    lines: &[CostLineInput],
    requester: &str,
    mode: ReconcileMode,
) -> Result<DrawReceipt> {
    // Submitted: reject malformed input before touching the directory.
    ledger::validate_lines(lines)?;

    // ChainResolved | Rejected(NoApproverConfigured)
    let chain = match directory::resolve_chain(db, requester).await {
        Ok(chain) => chain,
        Err(Error::NoApproverConfigured { user }) => {
            info!(user, "draw rejected: no approver chain configured");
            return Ok(DrawReceipt {
                status: DrawStatus::Rejected,
                allocation_id: None,
                remaining: None,
                underflow: false,
                chain: None,
                reject_reason: Some(RejectReason::NoApproverConfigured),
            });
        }
        Err(e) => return Err(e),
    };

    // Committed
    let committed = ledger::submit_allocation(db, pool_code, lines, requester, mode).await?;
    info!(
        allocation = committed.allocation.id,
        pool = pool_code.unwrap_or("<standalone>"),
        requester,
        total = committed.allocation.total_cost,
        "draw committed"
    );

    Ok(DrawReceipt {
        status: DrawStatus::Committed,
        allocation_id: Some(committed.allocation.id),
        remaining: committed.remaining,
        underflow: committed.underflow,
        chain: Some(chain),
        reject_reason: None,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::directory::ApproverTier;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_submit_draw_committed() -> Result<()> {
        let (db, pool) = setup_with_pool().await?;
        directory::add_approver(&db, "alice", ApproverTier::Primary, "Bob").await?;

        let receipt = submit_draw(
            &db,
            Some(pool.code.as_str()),
            &test_lines(),
            "alice",
            ReconcileMode::Compat,
        )
        .await?;

        assert_eq!(receipt.status, DrawStatus::Committed);
        assert!(receipt.allocation_id.is_some());
        // approved 10000, total 180 → |180 − 10000| = 9820
        assert_eq!(receipt.remaining, Some(9_820.0));
        assert!(!receipt.underflow);
        assert!(matches!(receipt.chain, Some(ResolvedChain::Tiers { .. })));
        assert_eq!(receipt.reject_reason, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_draw_rejected_without_chain() -> Result<()> {
        let (db, pool) = setup_with_pool().await?;

        let receipt = submit_draw(
            &db,
            Some(pool.code.as_str()),
            &test_lines(),
            "nobody",
            ReconcileMode::Compat,
        )
        .await?;

        assert_eq!(receipt.status, DrawStatus::Rejected);
        assert_eq!(
            receipt.reject_reason,
            Some(RejectReason::NoApproverConfigured)
        );
        assert_eq!(receipt.allocation_id, None);

        // The pool was never touched
        let reread = crate::core::pool::get_pool(&db, &pool.code).await?;
        assert_eq!(reread.remaining, 10_000.0);
        let history = ledger::get_history_for_pool(&db, &pool.code).await?;
        assert!(history.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_draw_validation_aborts() -> Result<()> {
        let (db, pool) = setup_with_pool().await?;
        directory::add_approver(&db, "alice", ApproverTier::Primary, "Bob").await?;

        let result = submit_draw(
            &db,
            Some(pool.code.as_str()),
            &[],
            "alice",
            ReconcileMode::Compat,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_draw_missing_pool_aborts() -> Result<()> {
        let db = setup_test_db().await?;
        directory::set_single_approval(&db, "alice", true).await?;

        let result = submit_draw(
            &db,
            Some("NO-SUCH-POOL"),
            &test_lines(),
            "alice",
            ReconcileMode::Compat,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::PoolNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_draw_single_approval_chain() -> Result<()> {
        let (db, pool) = setup_with_pool().await?;
        directory::set_single_approval(&db, "alice", true).await?;

        let receipt = submit_draw(
            &db,
            Some(pool.code.as_str()),
            &test_lines(),
            "alice",
            ReconcileMode::Compat,
        )
        .await?;

        assert_eq!(receipt.status, DrawStatus::Committed);
        assert_eq!(receipt.chain, Some(ResolvedChain::Single(true)));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_draw_standalone() -> Result<()> {
        let db = setup_test_db().await?;
        directory::set_single_approval(&db, "bob", true).await?;

        let receipt = submit_draw(&db, None, &test_lines(), "bob", ReconcileMode::Compat).await?;

        assert_eq!(receipt.status, DrawStatus::Committed);
        assert_eq!(receipt.remaining, None);
        assert!(!receipt.underflow);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_draw_flags_underflow() -> Result<()> {
        let (db, pool) = setup_with_pool().await?;
        directory::set_single_approval(&db, "alice", true).await?;

        let overspend = [CostLineInput {
            description: "Big campaign".to_string(),
            quantity: 120.0,
            unit_cost: 100.0,
            discount_percent: 0.0,
        }];
        let receipt = submit_draw(
            &db,
            Some(pool.code.as_str()),
            &overspend,
            "alice",
            ReconcileMode::Compat,
        )
        .await?;

        // Committed anyway, with the overspend flagged
        assert_eq!(receipt.status, DrawStatus::Committed);
        assert!(receipt.underflow);
        assert_eq!(receipt.remaining, Some(2_000.0));

        Ok(())
    }
}
