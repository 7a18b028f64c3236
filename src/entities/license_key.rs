//! License key entity - a unique token granting an account active status.
//!
//! A non-null `bound_user` implies `status = "active"` and exactly one
//! holder. Keys are created unbound, bound at user creation/edit time, and
//! unbound (status `"inactive"`, holder cleared) on explicit revocation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// License key database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "license_keys")]
pub struct Model {
    /// Unique identifier for the row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The license key string, unique across the system
    #[sea_orm(unique)]
    pub key: String,
    /// User currently holding the key, None when unassigned/reclaimed
    pub bound_user: Option<String>,
    /// Key status: `"active"` or `"inactive"`
    pub status: String,
    /// End of the validity window, None when open-ended
    pub valid_until: Option<DateTimeUtc>,
}

/// License keys have no relations to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
