//! Core business logic - framework-agnostic ledger, directory, registrar,
//! and workflow operations. No module here knows about any UI or wire
//! protocol; everything operates on a `DatabaseConnection` and the entity
//! models.

pub mod directory;
pub mod ledger;
pub mod license;
pub mod pool;
pub mod workflow;
