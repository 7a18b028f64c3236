//! Unified error types for the promo ledger core.
//!
//! Every storage failure is translated into one of these variants before it
//! reaches a caller; no raw `DbErr` escapes the core operations except through
//! the `Database` wrapper.

use thiserror::Error;

/// Crate-wide error type covering the ledger, directory, registrar and
/// workflow operations plus ambient configuration/IO failures.
#[derive(Debug, Error)]
pub enum Error {
    /// No pool exists (or it has been retired) under the given code.
    #[error("Budget pool not found: {code}")]
    PoolNotFound {
        /// The pool code that failed to resolve
        code: String,
    },

    /// A pool with this code already exists.
    #[error("Budget pool already exists: {code}")]
    DuplicatePool {
        /// The conflicting pool code
        code: String,
    },

    /// No approval plan exists with the given id.
    #[error("Approval plan not found: {plan_id}")]
    PlanNotFound {
        /// The plan id that failed to resolve
        plan_id: i64,
    },

    /// The (user, tier, approver) triple is already present.
    #[error("Approver '{approver_name}' already assigned to {user} at tier {tier}")]
    DuplicateApprover {
        /// User the approver was being added for
        user: String,
        /// Tier name ("primary"/"secondary"/"tertiary")
        tier: String,
        /// The approver that was already present
        approver_name: String,
    },

    /// The plan is already bound to this user.
    #[error("Plan {plan_id} already assigned to user {user}")]
    AlreadyAssigned {
        /// User the plan was being bound to
        user: String,
        /// The plan id already bound
        plan_id: i64,
    },

    /// The license key is held by another account.
    #[error("License key '{key}' is already bound to user {holder}")]
    DuplicateKey {
        /// The contested key
        key: String,
        /// The user currently holding it
        holder: String,
    },

    /// No plan, manual tier, or single-approval record resolves for the user.
    #[error("No approver chain configured for user {user}")]
    NoApproverConfigured {
        /// The requester whose chain could not be resolved
        user: String,
    },

    /// Applying the delta would make the pool's remaining balance negative.
    #[error("Pool {code} remaining balance {remaining} cannot absorb {delta}")]
    Underflow {
        /// The pool whose balance would underflow
        code: String,
        /// Balance before the attempted adjustment
        remaining: f64,
        /// The rejected delta
        delta: f64,
    },

    /// A numeric input was not a usable amount (NaN, infinite, out of range).
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending value
        amount: f64,
    },

    /// Malformed input rejected at the boundary before any total is computed.
    #[error("Validation error: {message}")]
    Validation {
        /// What failed validation
        message: String,
    },

    /// A multi-step commit left the store inconsistent and was rolled back.
    #[error("Ledger reconciliation failed for pool {code}: {message}")]
    Reconciliation {
        /// Pool involved in the failed commit
        code: String,
        /// What went wrong
        message: String,
    },

    /// Configuration file or settings problem.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration failure
        message: String,
    },

    /// Underlying SeaORM/storage error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
