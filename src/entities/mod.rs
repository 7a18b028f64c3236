//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod allocation;
pub mod approval_plan;
pub mod approver_assignment;
pub mod cost_line;
pub mod history_entry;
pub mod license_key;
pub mod plan_assignment;
pub mod pool;
pub mod single_approval;

// Re-export specific types to avoid conflicts
pub use allocation::{Column as AllocationColumn, Entity as Allocation, Model as AllocationModel};
pub use approval_plan::{
    Column as ApprovalPlanColumn, Entity as ApprovalPlan, Model as ApprovalPlanModel,
};
pub use approver_assignment::{
    Column as ApproverAssignmentColumn, Entity as ApproverAssignment,
    Model as ApproverAssignmentModel,
};
pub use cost_line::{Column as CostLineColumn, Entity as CostLine, Model as CostLineModel};
pub use history_entry::{
    Column as HistoryEntryColumn, Entity as HistoryEntry, Model as HistoryEntryModel,
};
pub use license_key::{Column as LicenseKeyColumn, Entity as LicenseKey, Model as LicenseKeyModel};
pub use plan_assignment::{
    Column as PlanAssignmentColumn, Entity as PlanAssignment, Model as PlanAssignmentModel,
};
pub use pool::{Column as PoolColumn, Entity as Pool, Model as PoolModel};
pub use single_approval::{
    Column as SingleApprovalColumn, Entity as SingleApproval, Model as SingleApprovalModel,
};
