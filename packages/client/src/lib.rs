// ABOUTME: API gateway for the Taskdeck backend REST contract
// ABOUTME: Attaches bearer auth, normalizes wire records, and forces logout on 401

pub mod api;
pub mod client;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use api::{
    ChatSendInput, DesignationCreateInput, EmployeeCreateInput, LoginResponse, ReportRequestInput,
    TargetCreateInput, TargetUpdate, TaskCreateInput, TaskFilter,
};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
