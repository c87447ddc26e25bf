// ABOUTME: Request and response models for the Taskdeck backend REST contract
// ABOUTME: Bodies use the backend's camelCase spellings; decoding happens here only

use serde::{Deserialize, Serialize};
use taskdeck_core::{
    clamp_progress, DesignationRole, Role, TargetPeriod, TargetStatus, Task, TaskStatus, User,
};

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

/// Owner + organization registration request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub org_name: String,
}

/// Server-side task filtering; an empty filter means "no constraint"
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub search: Option<String>,
}

impl TaskFilter {
    /// Query parameters for the task-list endpoint
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            // Status serializes to its wire spelling, e.g. IN_PROGRESS
            if let Ok(value) = serde_json::to_value(status) {
                if let Some(s) = value.as_str() {
                    params.push(("status", s.to_string()));
                }
            }
        }
        if let Some(search) = self.search.as_deref() {
            if !search.is_empty() {
                params.push(("search", search.to_string()));
            }
        }
        params
    }
}

/// The task-list endpoint either wraps its payload or returns a bare array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TaskListEnvelope {
    Wrapped { data: Vec<Task> },
    Bare(Vec<Task>),
}

impl TaskListEnvelope {
    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            TaskListEnvelope::Wrapped { data } => data,
            TaskListEnvelope::Bare(tasks) => tasks,
        }
    }
}

/// Task creation request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
}

/// Employee creation request; owner only
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreateInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

/// Junior-to-senior assignment request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignManagerRequest {
    pub manager_id: String,
}

/// Designation creation request
#[derive(Debug, Clone, Serialize)]
pub struct DesignationCreateInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub role: DesignationRole,
}

/// Target creation request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetCreateInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub period: TargetPeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Partial target update; progress is clamped to [0,100] before it is sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct TargetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TargetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

impl TargetUpdate {
    pub fn status(status: TargetStatus) -> Self {
        Self {
            status: Some(status),
            progress: None,
        }
    }

    /// Attach a progress value, clamping whatever the caller supplied
    pub fn with_progress(mut self, raw: i64) -> Self {
        self.progress = Some(clamp_progress(raw));
        self
    }
}

/// Chat send request; a missing recipient broadcasts to the organization
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSendInput {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
}

/// Report request creation body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequestInput {
    pub responder_id: String,
    pub request_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

/// Report submission body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSubmitRequest {
    pub response_message: String,
}

/// Report review body; the grade is any number, unbounded client-side
#[derive(Debug, Serialize)]
pub struct ReportReviewRequest {
    pub grade: f64,
}
