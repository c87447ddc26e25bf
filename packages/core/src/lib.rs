// ABOUTME: Core domain types and validation for Taskdeck
// ABOUTME: Foundational package shared by every other Taskdeck package

pub mod types;
pub mod validation;

// Re-export main types
pub use types::{
    ChatMessage, Designation, DesignationRole, OrgSummary, OrgUser, PerUserSummary, Report,
    ReportStatus, Role, Target, TargetPeriod, TargetStatus, Task, TaskStatus, User,
};

// Re-export validation
pub use validation::{
    clamp_progress, report_transition_allowed, validate_manager, validate_parent_task,
    validate_priority, ValidationError,
};
