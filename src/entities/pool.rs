//! Budget pool entity - the authoritative record of a promotional funding pool.
//!
//! A pool ("cover") funds one or more allocation draws. Pools are never
//! physically deleted; retirement is a soft-delete flag.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget pool database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pools")]
pub struct Model {
    /// Unique identifier for the pool row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Pool code, unique across the system (e.g., "COVER-2024-1")
    #[sea_orm(unique)]
    pub code: String,
    /// Latest approved grant amount in currency units
    pub approved_amount: f64,
    /// Current remaining balance
    pub remaining: f64,
    /// Approval status: `"pending"`, `"approved"`, or `"rejected"`
    pub approval_status: String,
    /// Soft delete flag - retired pools are hidden but data is preserved
    pub is_deleted: bool,
}

/// Defines relationships between Pool and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One pool funds many allocations
    #[sea_orm(has_many = "super::allocation::Entity")]
    Allocations,
    /// One pool accumulates many history entries
    #[sea_orm(has_many = "super::history_entry::Entity")]
    HistoryEntries,
}

impl Related<super::allocation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Allocations.def()
    }
}

impl Related<super::history_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HistoryEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
