//! Cost line entity - one row of an allocation's cost breakdown.
//!
//! Lines are ordered within their allocation by `line_no`. The allocation's
//! `total_cost` is a pure function of its lines.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cost line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cost_lines")]
pub struct Model {
    /// Unique identifier for the cost line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the allocation this line belongs to
    pub allocation_id: i64,
    /// Position of the line within the allocation (0-based)
    pub line_no: i32,
    /// Human-readable description of the line item
    pub description: String,
    /// Requested quantity
    pub quantity: f64,
    /// Unit cost in currency units
    pub unit_cost: f64,
    /// Discount percentage in [0, 100]
    pub discount_percent: f64,
}

/// Defines relationships between CostLine and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each cost line belongs to one allocation
    #[sea_orm(
        belongs_to = "super::allocation::Entity",
        from = "Column::AllocationId",
        to = "super::allocation::Column::Id"
    )]
    Allocation,
}

impl Related<super::allocation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Allocation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
