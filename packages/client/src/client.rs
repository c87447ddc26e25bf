// ABOUTME: The API gateway: one reqwest client, bearer auth on every request
// ABOUTME: A 401 anywhere forces the session to ANONYMOUS and fails the call

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use taskdeck_core::{ChatMessage, Designation, OrgSummary, OrgUser, Report, Target, Task, User};
use taskdeck_session::SessionStore;
use tracing::{debug, warn};

use crate::api::{
    AssignManagerRequest, ChatSendInput, DesignationCreateInput, EmployeeCreateInput, LoginRequest,
    LoginResponse, RegisterRequest, ReportRequestInput, ReportReviewRequest, ReportSubmitRequest,
    TargetCreateInput, TargetUpdate, TaskCreateInput, TaskFilter, TaskListEnvelope,
};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Typed client for the Taskdeck backend.
///
/// This is the sole path by which the session store is forced to ANONYMOUS
/// outside an explicit logout.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Create a new client over the given backend and session store
    pub fn new(config: &ClientConfig, session: SessionStore) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            session,
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send an authenticated request and translate failure statuses.
    ///
    /// `tolerate_forbidden` marks the read endpoints where a role-based 403
    /// is an expected answer rather than a broken session.
    async fn execute(
        &self,
        builder: RequestBuilder,
        tolerate_forbidden: bool,
    ) -> ClientResult<reqwest::Response> {
        let mut builder = builder.header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.token().await {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        match response.status() {
            StatusCode::UNAUTHORIZED => {
                warn!("Authorization failed, clearing session");
                let _ = self.session.clear_session().await;
                Err(ClientError::Unauthorized)
            }
            StatusCode::FORBIDDEN if tolerate_forbidden => {
                let body = response.text().await.unwrap_or_default();
                Err(ClientError::Forbidden(body))
            }
            StatusCode::FORBIDDEN => {
                warn!("Forbidden on a protected endpoint, clearing session");
                let _ = self.session.clear_session().await;
                Err(ClientError::Unauthorized)
            }
            status if !status.is_success() => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| status.to_string());
                Err(ClientError::Api(body))
            }
            _ => Ok(response),
        }
    }

    // --- Auth ---

    /// Log in and persist the returned session.
    ///
    /// Uses a plain request: a 401 here means bad credentials, not an
    /// expired session.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::api("Invalid credentials"));
        }
        let login: LoginResponse = response.json().await?;
        self.session
            .set_session(login.access_token, login.user.clone())
            .await
            .map_err(|e| ClientError::Session(e.to_string()))?;
        debug!("Logged in as {}", login.user.email);
        Ok(login.user)
    }

    /// Register a new owner and organization; does not log in
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        org_name: &str,
    ) -> ClientResult<()> {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            org_name: org_name.to_string(),
        };
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&request)
            .send()
            .await?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                "Registration failed".to_string()
            } else {
                body
            };
            return Err(ClientError::Api(message));
        }
        Ok(())
    }

    // --- Tasks ---

    /// List tasks, optionally filtered server-side by status and search term
    pub async fn list_tasks(&self, filter: &TaskFilter) -> ClientResult<Vec<Task>> {
        let response = self
            .execute(
                self.http.get(self.url("/tasks")).query(&filter.query()),
                false,
            )
            .await?;
        let envelope: TaskListEnvelope = response.json().await?;
        Ok(envelope.into_tasks())
    }

    pub async fn create_task(&self, input: &TaskCreateInput) -> ClientResult<()> {
        self.execute(self.http.post(self.url("/tasks")).json(input), false)
            .await?;
        Ok(())
    }

    /// Org-wide task summary; owner only, 403 tolerated
    pub async fn org_task_summary(&self) -> ClientResult<OrgSummary> {
        let response = self
            .execute(self.http.get(self.url("/tasks/summary/org")), true)
            .await?;
        Ok(response.json().await?)
    }

    // --- Org users ---

    /// Organization roster; 403 tolerated for roles without visibility
    pub async fn org_users(&self) -> ClientResult<Vec<OrgUser>> {
        let response = self
            .execute(self.http.get(self.url("/users/org")), true)
            .await?;
        Ok(response.json().await?)
    }

    pub async fn create_employee(&self, input: &EmployeeCreateInput) -> ClientResult<()> {
        self.execute(self.http.post(self.url("/users")).json(input), false)
            .await?;
        Ok(())
    }

    /// Pair a junior under a senior
    pub async fn assign_junior(&self, junior_id: &str, manager_id: &str) -> ClientResult<()> {
        let body = AssignManagerRequest {
            manager_id: manager_id.to_string(),
        };
        self.execute(
            self.http
                .patch(self.url(&format!("/users/assign/{junior_id}")))
                .json(&body),
            false,
        )
        .await?;
        Ok(())
    }

    // --- Designations ---

    /// Designations of the organization; 403 tolerated
    pub async fn designations(&self, org_id: &str) -> ClientResult<Vec<Designation>> {
        let response = self
            .execute(
                self.http.get(self.url(&format!("/designations/org/{org_id}"))),
                true,
            )
            .await?;
        Ok(response.json().await?)
    }

    pub async fn create_designation(&self, input: &DesignationCreateInput) -> ClientResult<()> {
        self.execute(self.http.post(self.url("/designations")).json(input), false)
            .await?;
        Ok(())
    }

    // --- Targets ---

    pub async fn targets(&self) -> ClientResult<Vec<Target>> {
        let response = self.execute(self.http.get(self.url("/targets")), false).await?;
        Ok(response.json().await?)
    }

    pub async fn create_target(&self, input: &TargetCreateInput) -> ClientResult<()> {
        self.execute(self.http.post(self.url("/targets")).json(input), false)
            .await?;
        Ok(())
    }

    /// Patch a target; any progress in the update has already been clamped
    pub async fn update_target(&self, id: &str, update: &TargetUpdate) -> ClientResult<()> {
        self.execute(
            self.http
                .patch(self.url(&format!("/targets/{id}")))
                .json(update),
            false,
        )
        .await?;
        Ok(())
    }

    // --- Chat ---

    pub async fn chat_messages(&self) -> ClientResult<Vec<ChatMessage>> {
        let response = self.execute(self.http.get(self.url("/chat")), false).await?;
        Ok(response.json().await?)
    }

    pub async fn send_message(&self, input: &ChatSendInput) -> ClientResult<()> {
        self.execute(self.http.post(self.url("/chat")).json(input), false)
            .await?;
        Ok(())
    }

    // --- Reports ---

    pub async fn reports(&self) -> ClientResult<Vec<Report>> {
        let response = self
            .execute(self.http.get(self.url("/reports")), false)
            .await?;
        Ok(response.json().await?)
    }

    pub async fn request_report(&self, input: &ReportRequestInput) -> ClientResult<()> {
        self.execute(self.http.post(self.url("/reports")).json(input), false)
            .await?;
        Ok(())
    }

    pub async fn submit_report(&self, id: &str, response_message: &str) -> ClientResult<()> {
        let body = ReportSubmitRequest {
            response_message: response_message.to_string(),
        };
        self.execute(
            self.http
                .patch(self.url(&format!("/reports/{id}/submit")))
                .json(&body),
            false,
        )
        .await?;
        Ok(())
    }

    pub async fn review_report(&self, id: &str, grade: f64) -> ClientResult<()> {
        let body = ReportReviewRequest { grade };
        self.execute(
            self.http
                .patch(self.url(&format!("/reports/{id}/review")))
                .json(&body),
            false,
        )
        .await?;
        Ok(())
    }
}
