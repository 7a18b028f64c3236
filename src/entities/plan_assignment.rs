//! Plan assignment entity - binds an approval plan to a user.
//!
//! The `(user, plan_id)` pair is unique; assigning the same plan twice to the
//! same user is rejected by the directory.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plan assignment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plan_assignments")]
pub struct Model {
    /// Unique identifier for the assignment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User the plan is bound to
    pub user: String,
    /// ID of the bound approval plan
    pub plan_id: i64,
}

/// Defines relationships between PlanAssignment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each assignment references one approval plan
    #[sea_orm(
        belongs_to = "super::approval_plan::Entity",
        from = "Column::PlanId",
        to = "super::approval_plan::Column::Id"
    )]
    ApprovalPlan,
}

impl Related<super::approval_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApprovalPlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
