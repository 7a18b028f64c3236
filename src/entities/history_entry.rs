//! History entry entity - the append-only audit trail of the ledger.
//!
//! One entry is written per committed allocation. Entries are never mutated
//! or deleted; replaying them in `created_at` order reconstructs the ledger.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// History entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "history_entries")]
pub struct Model {
    /// Unique identifier for the history entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the allocation that produced this entry
    pub allocation_id: i64,
    /// Pool affected by the change, None for standalone draws
    pub pool_code: Option<String>,
    /// Remaining-balance snapshot after the change, None for standalone draws
    pub remaining_after: Option<f64>,
    /// Total cost of the originating allocation
    pub total_cost: f64,
    /// Identity of the actor who triggered the change
    pub actor: String,
    /// Action type (e.g., `"update"`)
    pub action: String,
    /// When the entry was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between HistoryEntry and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each history entry references one allocation
    #[sea_orm(
        belongs_to = "super::allocation::Entity",
        from = "Column::AllocationId",
        to = "super::allocation::Column::Id"
    )]
    Allocation,
    /// Each history entry may reference one pool
    #[sea_orm(
        belongs_to = "super::pool::Entity",
        from = "Column::PoolCode",
        to = "super::pool::Column::Code"
    )]
    Pool,
}

impl Related<super::allocation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Allocation.def()
    }
}

impl Related<super::pool::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pool.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
