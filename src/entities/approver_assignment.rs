//! Approver assignment entity - a manual per-user approver at a given tier.
//!
//! The `(user, tier, approver_name)` triple is unique; duplicates are
//! rejected by the directory before insertion.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Approver assignment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "approver_assignments")]
pub struct Model {
    /// Unique identifier for the assignment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User the approver signs off for
    pub user: String,
    /// Tier: `"primary"`, `"secondary"`, or `"tertiary"`
    pub tier: String,
    /// Name of the assigned approver
    pub approver_name: String,
}

/// Approver assignments have no relations to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
