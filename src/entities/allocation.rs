//! Allocation entity - a committed draw against a budget pool.
//!
//! An allocation may be standalone (`pool_code = None`) or charged to a pool.
//! Once committed it is immutable; corrections are superseding allocations
//! that go through the same validation path.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Allocation database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "allocations")]
pub struct Model {
    /// Unique identifier for the allocation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning pool code, None for standalone draws
    pub pool_code: Option<String>,
    /// Total cost computed from the cost lines, rounded to 2 decimals
    pub total_cost: f64,
    /// Identity of the user who submitted the draw
    pub requester: String,
    /// When the allocation was committed
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Allocation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each allocation may belong to one pool
    #[sea_orm(
        belongs_to = "super::pool::Entity",
        from = "Column::PoolCode",
        to = "super::pool::Column::Code"
    )]
    Pool,
    /// One allocation owns many ordered cost lines
    #[sea_orm(has_many = "super::cost_line::Entity")]
    CostLines,
    /// One allocation produces exactly one history entry
    #[sea_orm(has_many = "super::history_entry::Entity")]
    HistoryEntries,
}

impl Related<super::pool::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pool.def()
    }
}

impl Related<super::cost_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CostLines.def()
    }
}

impl Related<super::history_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HistoryEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
