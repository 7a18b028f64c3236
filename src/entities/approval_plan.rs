//! Approval plan entity - a reusable approver-chain template.
//!
//! Plans are keyed by organizational attributes and bound to users through
//! plan assignments.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Approval plan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "approval_plans")]
pub struct Model {
    /// Unique identifier for the plan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Department the plan applies to
    pub department: String,
    /// Position the plan applies to
    pub position: String,
    /// Principal (organization) the plan applies to
    pub principal: String,
    /// Charged-to expense category
    pub charged_to: String,
    /// Approver level within the plan
    pub approver_level: String,
}

/// Defines relationships between ApprovalPlan and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One plan is bound to many users via plan assignments
    #[sea_orm(has_many = "super::plan_assignment::Entity")]
    PlanAssignments,
}

impl Related<super::plan_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlanAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
