//! Approver directory business logic.
//!
//! Manages per-user approver assignments (primary/secondary/tertiary tiers),
//! reusable approval plans keyed by organizational attributes, and the
//! single-approver override. Chain resolution is deterministic: plans take
//! precedence over manual tiers, which take precedence over the single
//! approval flag; a user with none of the three has no resolvable chain and
//! cannot submit a draw.

use crate::{
    entities::{
        ApprovalPlan, ApproverAssignment, PlanAssignment, SingleApproval, approval_plan,
        approver_assignment, plan_assignment, single_approval,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Approver tier within a user's manual chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproverTier {
    /// First required sign-off
    Primary,
    /// Second required sign-off
    Secondary,
    /// Third required sign-off
    Tertiary,
}

impl ApproverTier {
    /// Returns the string stored in the `tier` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
        }
    }
}

/// The approver chain resolved for a requester.
///
/// Resolution order is part of the contract: plan assignments win over
/// manual tiers, which win over the single-approval override.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedChain {
    /// The union of the user's assigned plans, ordered by plan id
    Plans(Vec<approval_plan::Model>),
    /// The user's manual tiered approver lists
    Tiers {
        /// Primary-tier approver names, ordered alphabetically
        primary: Vec<String>,
        /// Secondary-tier approver names, ordered alphabetically
        secondary: Vec<String>,
        /// Tertiary-tier approver names, ordered alphabetically
        tertiary: Vec<String>,
    },
    /// The single-approval override flag for the user
    Single(bool),
}

/// Adds a manual approver for a user at a tier.
///
/// Rejects the exact `(user, tier, approver_name)` triple if it already
/// exists; the same approver may appear at a different tier.
pub async fn add_approver(
    db: &DatabaseConnection,
    user: &str,
    tier: ApproverTier,
    approver_name: &str,
) -> Result<approver_assignment::Model> {
    if user.trim().is_empty() || approver_name.trim().is_empty() {
        return Err(Error::Validation {
            message: "User and approver name cannot be empty".to_string(),
        });
    }

    let existing = ApproverAssignment::find()
        .filter(approver_assignment::Column::User.eq(user))
        .filter(approver_assignment::Column::Tier.eq(tier.as_str()))
        .filter(approver_assignment::Column::ApproverName.eq(approver_name))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::DuplicateApprover {
            user: user.to_string(),
            tier: tier.as_str().to_string(),
            approver_name: approver_name.to_string(),
        });
    }

    approver_assignment::ActiveModel {
        user: Set(user.to_string()),
        tier: Set(tier.as_str().to_string()),
        approver_name: Set(approver_name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Removes a manual approver assignment. Succeeds whether or not the
/// assignment existed.
pub async fn remove_approver(
    db: &DatabaseConnection,
    user: &str,
    tier: ApproverTier,
    approver_name: &str,
) -> Result<()> {
    ApproverAssignment::delete_many()
        .filter(approver_assignment::Column::User.eq(user))
        .filter(approver_assignment::Column::Tier.eq(tier.as_str()))
        .filter(approver_assignment::Column::ApproverName.eq(approver_name))
        .exec(db)
        .await?;
    Ok(())
}

/// Creates a reusable approval plan keyed by organizational attributes.
pub async fn create_plan(
    db: &DatabaseConnection,
    department: &str,
    position: &str,
    principal: &str,
    charged_to: &str,
    approver_level: &str,
) -> Result<approval_plan::Model> {
    approval_plan::ActiveModel {
        department: Set(department.to_string()),
        position: Set(position.to_string()),
        principal: Set(principal.to_string()),
        charged_to: Set(charged_to.to_string()),
        approver_level: Set(approver_level.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Finds an approval plan by its id.
pub async fn get_plan_by_id(
    db: &DatabaseConnection,
    plan_id: i64,
) -> Result<Option<approval_plan::Model>> {
    ApprovalPlan::find_by_id(plan_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Binds a plan to a user.
///
/// The plan must exist, and a given plan can be bound to a user at most
/// once; a duplicate pair is rejected with `AlreadyAssigned` and leaves the
/// existing assignment untouched.
pub async fn assign_plan(
    db: &DatabaseConnection,
    user: &str,
    plan_id: i64,
) -> Result<plan_assignment::Model> {
    get_plan_by_id(db, plan_id)
        .await?
        .ok_or(Error::PlanNotFound { plan_id })?;

    let existing = PlanAssignment::find()
        .filter(plan_assignment::Column::User.eq(user))
        .filter(plan_assignment::Column::PlanId.eq(plan_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::AlreadyAssigned {
            user: user.to_string(),
            plan_id,
        });
    }

    plan_assignment::ActiveModel {
        user: Set(user.to_string()),
        plan_id: Set(plan_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Sets (or replaces) the single-approval override for a username.
pub async fn set_single_approval(
    db: &DatabaseConnection,
    username: &str,
    allowed_to_approve: bool,
) -> Result<single_approval::Model> {
    let existing = SingleApproval::find()
        .filter(single_approval::Column::Username.eq(username))
        .one(db)
        .await?;

    match existing {
        Some(record) => {
            let mut active: single_approval::ActiveModel = record.into();
            active.allowed_to_approve = Set(allowed_to_approve);
            active.update(db).await.map_err(Into::into)
        }
        None => single_approval::ActiveModel {
            username: Set(username.to_string()),
            allowed_to_approve: Set(allowed_to_approve),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(Into::into),
    }
}

/// Resolves the approver chain for a user.
///
/// Resolution order: (1) plan assignments, returned as the union of the
/// user's plans ordered by plan id; (2) manual tiered assignments, names
/// ordered alphabetically within each tier; (3) the single-approval record;
/// (4) none of the three → `NoApproverConfigured`. The result is a pure
/// function of the directory's stored state, so two calls with no
/// intervening writes return identical chains.
pub async fn resolve_chain(db: &DatabaseConnection, user: &str) -> Result<ResolvedChain> {
    let assignments = PlanAssignment::find()
        .filter(plan_assignment::Column::User.eq(user))
        .order_by_asc(plan_assignment::Column::PlanId)
        .all(db)
        .await?;
    if !assignments.is_empty() {
        let mut plans = Vec::with_capacity(assignments.len());
        for assignment in &assignments {
            let plan = get_plan_by_id(db, assignment.plan_id).await?.ok_or(
                Error::PlanNotFound {
                    plan_id: assignment.plan_id,
                },
            )?;
            plans.push(plan);
        }
        return Ok(ResolvedChain::Plans(plans));
    }

    let manual = ApproverAssignment::find()
        .filter(approver_assignment::Column::User.eq(user))
        .order_by_asc(approver_assignment::Column::ApproverName)
        .all(db)
        .await?;
    if !manual.is_empty() {
        let names_at = |tier: ApproverTier| -> Vec<String> {
            manual
                .iter()
                .filter(|a| a.tier == tier.as_str())
                .map(|a| a.approver_name.clone())
                .collect()
        };
        return Ok(ResolvedChain::Tiers {
            primary: names_at(ApproverTier::Primary),
            secondary: names_at(ApproverTier::Secondary),
            tertiary: names_at(ApproverTier::Tertiary),
        });
    }

    let single = SingleApproval::find()
        .filter(single_approval::Column::Username.eq(user))
        .one(db)
        .await?;
    if let Some(record) = single {
        return Ok(ResolvedChain::Single(record.allowed_to_approve));
    }

    Err(Error::NoApproverConfigured {
        user: user.to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_approver_duplicate_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        add_approver(&db, "u1", ApproverTier::Primary, "Alice").await?;
        let result = add_approver(&db, "u1", ApproverTier::Primary, "Alice").await;

        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateApprover { .. }
        ));

        // Exactly one assignment survives
        let all = ApproverAssignment::find().all(&db).await?;
        assert_eq!(all.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_same_approver_allowed_at_different_tier() -> Result<()> {
        let db = setup_test_db().await?;

        add_approver(&db, "u1", ApproverTier::Primary, "Alice").await?;
        add_approver(&db, "u1", ApproverTier::Secondary, "Alice").await?;

        let all = ApproverAssignment::find().all(&db).await?;
        assert_eq!(all.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_approver_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = add_approver(&db, "", ApproverTier::Primary, "Alice").await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = add_approver(&db, "u1", ApproverTier::Primary, "  ").await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_approver_idempotent() -> Result<()> {
        let db = setup_test_db().await?;

        add_approver(&db, "u1", ApproverTier::Primary, "Alice").await?;
        remove_approver(&db, "u1", ApproverTier::Primary, "Alice").await?;
        // Removing again is still Ok
        remove_approver(&db, "u1", ApproverTier::Primary, "Alice").await?;

        let all = ApproverAssignment::find().all(&db).await?;
        assert!(all.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_plan_duplicate_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let plan = create_test_plan(&db).await?;

        assign_plan(&db, "u1", plan.id).await?;
        let result = assign_plan(&db, "u1", plan.id).await;

        assert!(matches!(result.unwrap_err(), Error::AlreadyAssigned { .. }));

        // Exactly one assignment survives
        let all = PlanAssignment::find().all(&db).await?;
        assert_eq!(all.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_plan_missing_plan() -> Result<()> {
        let db = setup_test_db().await?;

        let result = assign_plan(&db, "u1", 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::PlanNotFound { plan_id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_chain_none_configured() -> Result<()> {
        let db = setup_test_db().await?;

        let result = resolve_chain(&db, "nobody").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NoApproverConfigured { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_chain_manual_tiers() -> Result<()> {
        let db = setup_test_db().await?;

        add_approver(&db, "u1", ApproverTier::Primary, "Bob").await?;
        add_approver(&db, "u1", ApproverTier::Primary, "Alice").await?;
        add_approver(&db, "u1", ApproverTier::Secondary, "Carol").await?;

        let chain = resolve_chain(&db, "u1").await?;
        assert_eq!(
            chain,
            ResolvedChain::Tiers {
                primary: vec!["Alice".to_string(), "Bob".to_string()],
                secondary: vec!["Carol".to_string()],
                tertiary: vec![],
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_chain_single_approval() -> Result<()> {
        let db = setup_test_db().await?;

        set_single_approval(&db, "u1", true).await?;

        let chain = resolve_chain(&db, "u1").await?;
        assert_eq!(chain, ResolvedChain::Single(true));

        Ok(())
    }

    #[tokio::test]
    async fn test_plans_take_precedence_over_tiers_and_single() -> Result<()> {
        let db = setup_test_db().await?;

        // Configure all three sources for the same user
        let plan = create_test_plan(&db).await?;
        assign_plan(&db, "u1", plan.id).await?;
        add_approver(&db, "u1", ApproverTier::Primary, "Alice").await?;
        set_single_approval(&db, "u1", true).await?;

        let chain = resolve_chain(&db, "u1").await?;
        assert_eq!(chain, ResolvedChain::Plans(vec![plan]));

        Ok(())
    }

    #[tokio::test]
    async fn test_tiers_take_precedence_over_single() -> Result<()> {
        let db = setup_test_db().await?;

        add_approver(&db, "u1", ApproverTier::Tertiary, "Dave").await?;
        set_single_approval(&db, "u1", false).await?;

        let chain = resolve_chain(&db, "u1").await?;
        assert!(matches!(chain, ResolvedChain::Tiers { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_chain_deterministic() -> Result<()> {
        let db = setup_test_db().await?;

        let plan_a = create_test_plan(&db).await?;
        let plan_b = create_test_plan(&db).await?;
        // Assign in reverse id order; resolution still orders by plan id
        assign_plan(&db, "u1", plan_b.id).await?;
        assign_plan(&db, "u1", plan_a.id).await?;

        let first = resolve_chain(&db, "u1").await?;
        let second = resolve_chain(&db, "u1").await?;
        assert_eq!(first, second);
        assert_eq!(first, ResolvedChain::Plans(vec![plan_a, plan_b]));

        Ok(())
    }

    #[tokio::test]
    async fn test_set_single_approval_upsert() -> Result<()> {
        let db = setup_test_db().await?;

        set_single_approval(&db, "u1", true).await?;
        set_single_approval(&db, "u1", false).await?;

        let all = SingleApproval::find().all(&db).await?;
        assert_eq!(all.len(), 1);
        assert!(!all[0].allowed_to_approve);

        Ok(())
    }
}
