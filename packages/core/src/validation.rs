// ABOUTME: Pure validation helpers for the Taskdeck data model
// ABOUTME: Progress clamping, report lifecycle ordering, manager and subtask references

use thiserror::Error;

use crate::types::{OrgUser, ReportStatus, Role, Task};

/// Validation errors
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Priority must be between 1 and 5, got {0}")]
    PriorityOutOfRange(i64),
    #[error("Manager {0} is not a senior")]
    ManagerNotSenior(String),
    #[error("Manager {0} does not exist")]
    ManagerNotFound(String),
    #[error("Parent task {0} does not exist")]
    ParentNotFound(String),
    #[error("Parent task {0} is itself a subtask")]
    NestedSubtask(String),
}

/// Clamp a target progress value into [0,100]
pub fn clamp_progress(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}

/// Reports only move forward: REQUESTED -> SUBMITTED -> REVIEWED
pub fn report_transition_allowed(from: ReportStatus, to: ReportStatus) -> bool {
    matches!(
        (from, to),
        (ReportStatus::Requested, ReportStatus::Submitted)
            | (ReportStatus::Submitted, ReportStatus::Reviewed)
    )
}

/// Task priority is a 1-5 scale
pub fn validate_priority(priority: i64) -> Result<u8, ValidationError> {
    if (1..=5).contains(&priority) {
        Ok(priority as u8)
    } else {
        Err(ValidationError::PriorityOutOfRange(priority))
    }
}

/// A junior's manager must reference an existing senior
pub fn validate_manager(org_users: &[OrgUser], manager_id: &str) -> Result<(), ValidationError> {
    let manager = org_users
        .iter()
        .find(|u| u.id == manager_id)
        .ok_or_else(|| ValidationError::ManagerNotFound(manager_id.to_string()))?;
    if manager.role == Role::Senior {
        Ok(())
    } else {
        Err(ValidationError::ManagerNotSenior(manager_id.to_string()))
    }
}

/// A subtask's parent must exist and must not be a subtask itself
pub fn validate_parent_task(tasks: &[Task], parent_id: &str) -> Result<(), ValidationError> {
    let parent = tasks
        .iter()
        .find(|t| t.id == parent_id)
        .ok_or_else(|| ValidationError::ParentNotFound(parent_id.to_string()))?;
    if parent.parent_task_id.is_some() {
        return Err(ValidationError::NestedSubtask(parent_id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskStatus;

    fn org_user(id: &str, role: Role, manager_id: Option<&str>) -> OrgUser {
        OrgUser {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            name: id.to_string(),
            role,
            org_id: "org1".to_string(),
            manager_id: manager_id.map(str::to_string),
            designation_id: None,
        }
    }

    fn task(id: &str, parent: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            description: None,
            status: TaskStatus::Todo,
            due_date: "2026-01-01".to_string(),
            priority: None,
            assigned_to: None,
            is_completed: false,
            org_id: "org1".to_string(),
            parent_task_id: parent.map(str::to_string),
            estimated_hours: None,
        }
    }

    #[test]
    fn progress_clamps_both_ends() {
        assert_eq!(clamp_progress(150), 100);
        assert_eq!(clamp_progress(-5), 0);
        assert_eq!(clamp_progress(42), 42);
    }

    #[test]
    fn report_lifecycle_never_moves_backward() {
        assert!(report_transition_allowed(
            ReportStatus::Requested,
            ReportStatus::Submitted
        ));
        assert!(report_transition_allowed(
            ReportStatus::Submitted,
            ReportStatus::Reviewed
        ));
        assert!(!report_transition_allowed(
            ReportStatus::Submitted,
            ReportStatus::Requested
        ));
        assert!(!report_transition_allowed(
            ReportStatus::Reviewed,
            ReportStatus::Submitted
        ));
        assert!(!report_transition_allowed(
            ReportStatus::Requested,
            ReportStatus::Reviewed
        ));
    }

    #[test]
    fn priority_must_be_one_to_five() {
        assert_eq!(validate_priority(3), Ok(3));
        assert!(validate_priority(0).is_err());
        assert!(validate_priority(6).is_err());
    }

    #[test]
    fn manager_must_be_an_existing_senior() {
        let users = vec![
            org_user("s1", Role::Senior, None),
            org_user("j1", Role::Junior, Some("s1")),
        ];
        assert!(validate_manager(&users, "s1").is_ok());
        assert_eq!(
            validate_manager(&users, "j1"),
            Err(ValidationError::ManagerNotSenior("j1".to_string()))
        );
        assert_eq!(
            validate_manager(&users, "ghost"),
            Err(ValidationError::ManagerNotFound("ghost".to_string()))
        );
    }

    #[test]
    fn subtasks_nest_one_level_only() {
        let tasks = vec![task("t1", None), task("t2", Some("t1"))];
        assert!(validate_parent_task(&tasks, "t1").is_ok());
        assert_eq!(
            validate_parent_task(&tasks, "t2"),
            Err(ValidationError::NestedSubtask("t2".to_string()))
        );
        assert_eq!(
            validate_parent_task(&tasks, "missing"),
            Err(ValidationError::ParentNotFound("missing".to_string()))
        );
    }
}
