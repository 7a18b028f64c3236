//! Single approval entity - a per-user override bypassing the tiered chain.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Single approval database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "single_approvals")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Username the override applies to, unique across the system
    #[sea_orm(unique)]
    pub username: String,
    /// Whether the user is allowed to approve on their own
    pub allowed_to_approve: bool,
}

/// Single approvals have no relations to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
