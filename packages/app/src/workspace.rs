// ABOUTME: Orchestrates the session, gateway and collections for one signed-in workspace
// ABOUTME: Bootstrap fans out all refreshes in parallel; every mutation re-fetches in full

use std::future::Future;

use taskdeck_client::{
    ApiClient, ChatSendInput, ClientResult, DesignationCreateInput, EmployeeCreateInput,
    ReportRequestInput, TargetCreateInput, TargetUpdate, TaskCreateInput, TaskFilter,
};
use taskdeck_core::{
    validate_manager, validate_parent_task, validate_priority, ChatMessage, Designation,
    OrgSummary, OrgUser, Report, Role, Target, TargetStatus, Task, User,
};
use taskdeck_policy as policy;
use taskdeck_session::SessionStore;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::banner::Banners;
use crate::collection::Collection;
use crate::error::{AppError, AppResult};

/// The signed-in workspace: all domain collections plus the banners.
///
/// Collections are only ever written by their own refresh path; every write
/// to the backend is followed by a full re-fetch of the affected collection.
pub struct Workspace {
    client: ApiClient,
    session: SessionStore,
    tasks: Collection<Task>,
    org_users: Collection<OrgUser>,
    designations: Collection<Designation>,
    targets: Collection<Target>,
    messages: Collection<ChatMessage>,
    reports: Collection<Report>,
    summary: RwLock<OrgSummary>,
    task_filter: RwLock<TaskFilter>,
    banners: Mutex<Banners>,
}

impl Workspace {
    pub fn new(client: ApiClient, session: SessionStore) -> Self {
        Self {
            client,
            session,
            tasks: Collection::new(),
            org_users: Collection::new(),
            designations: Collection::new(),
            targets: Collection::new(),
            messages: Collection::new(),
            reports: Collection::new(),
            summary: RwLock::new(OrgSummary::default()),
            task_filter: RwLock::new(TaskFilter::default()),
            banners: Mutex::new(Banners::new()),
        }
    }

    // --- Session lifecycle ---

    /// Restore a persisted session and, if one exists, bootstrap from it
    pub async fn restore(&self) -> AppResult<()> {
        self.session
            .restore()
            .await
            .map_err(|e| AppError::Session(e.to_string()))?;
        if self.session.is_authenticated().await {
            self.bootstrap().await?;
        }
        Ok(())
    }

    /// Log in, then fan out the initial collection fetches
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        match self.client.login(email, password).await {
            Ok(user) => {
                self.bootstrap().await?;
                self.banners.lock().await.succeed("Logged in");
                Ok(user)
            }
            Err(e) => {
                self.banners.lock().await.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Register a new owner and organization; the caller still logs in
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        org_name: &str,
    ) -> AppResult<()> {
        match self.client.register(email, password, name, org_name).await {
            Ok(()) => {
                self.banners
                    .lock()
                    .await
                    .succeed("Registered! Please login.");
                Ok(())
            }
            Err(e) => {
                self.banners.lock().await.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Explicit logout: clear the session and empty every collection
    pub async fn logout(&self) -> AppResult<()> {
        self.session
            .clear_session()
            .await
            .map_err(|e| AppError::Session(e.to_string()))?;
        self.clear_collections().await;
        self.banners.lock().await.succeed("Logged out");
        Ok(())
    }

    async fn clear_collections(&self) {
        self.tasks.clear().await;
        self.org_users.clear().await;
        self.designations.clear().await;
        self.targets.clear().await;
        self.messages.clear().await;
        self.reports.clear().await;
        *self.summary.write().await = OrgSummary::default();
    }

    // --- Refresh ---

    /// Fetch every collection concurrently, with no ordering dependency.
    ///
    /// An authorization failure in any branch has already cleared the
    /// session; the session-epoch guard keeps the other in-flight results
    /// from landing afterwards.
    pub async fn bootstrap(&self) -> AppResult<()> {
        let filter = self.task_filter.read().await.clone();
        let results = tokio::join!(
            self.refresh_tasks_with(&filter),
            self.refresh_org_users(),
            self.refresh_designations(),
            self.refresh_targets(),
            self.refresh_messages(),
            self.refresh_reports(),
            self.refresh_summary(),
        );
        let results = [
            results.0, results.1, results.2, results.3, results.4, results.5, results.6,
        ];
        for result in results {
            if let Err(e) = result {
                if e.is_auth_error() {
                    self.clear_collections().await;
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Replace the task collection, remembering the filter for later refreshes
    pub async fn refresh_tasks(&self, filter: TaskFilter) -> AppResult<()> {
        *self.task_filter.write().await = filter.clone();
        self.refresh_tasks_with(&filter).await
    }

    async fn refresh_tasks_with(&self, filter: &TaskFilter) -> AppResult<()> {
        let epoch = self.session.epoch().await;
        let token = self.tasks.begin_refresh();
        match self.client.list_tasks(filter).await {
            Ok(items) => {
                if self.session.epoch().await == epoch {
                    self.tasks.commit(token, items).await;
                }
                Ok(())
            }
            Err(e) => {
                let message = if e.is_auth_error() {
                    "Session expired. Please log in again.".to_string()
                } else {
                    e.to_string()
                };
                self.banners.lock().await.fail(message);
                Err(e.into())
            }
        }
    }

    /// Apply one secondary refresh: full replace on success, previous
    /// contents kept (with a warning) on non-auth failure.
    async fn apply_refresh<T>(
        &self,
        name: &str,
        collection: &Collection<T>,
        forbidden_note: Option<&str>,
        fetch: impl Future<Output = ClientResult<Vec<T>>>,
    ) -> AppResult<()> {
        let epoch = self.session.epoch().await;
        let token = collection.begin_refresh();
        match fetch.await {
            Ok(items) => {
                if self.session.epoch().await == epoch {
                    collection.commit(token, items).await;
                } else {
                    debug!("Discarding {name} refresh from a previous session");
                }
                Ok(())
            }
            Err(e) if e.is_auth_error() => Err(e.into()),
            Err(e) if e.is_forbidden() && forbidden_note.is_some() => {
                if let Some(note) = forbidden_note {
                    self.banners.lock().await.note(note);
                }
                Ok(())
            }
            Err(e) => {
                // Non-blocking: the previous contents stay usable
                warn!("Failed to refresh {name}: {e}");
                Ok(())
            }
        }
    }

    pub async fn refresh_org_users(&self) -> AppResult<()> {
        self.apply_refresh(
            "org users",
            &self.org_users,
            Some("Only owner or senior can load users."),
            self.client.org_users(),
        )
        .await
    }

    pub async fn refresh_designations(&self) -> AppResult<()> {
        let Some(user) = self.session.user().await else {
            debug!("Skipping designation refresh without a user profile");
            return Ok(());
        };
        self.apply_refresh(
            "designations",
            &self.designations,
            Some("Only owner or senior can view designations."),
            self.client.designations(&user.org_id),
        )
        .await
    }

    pub async fn refresh_targets(&self) -> AppResult<()> {
        self.apply_refresh("targets", &self.targets, None, self.client.targets())
            .await
    }

    pub async fn refresh_messages(&self) -> AppResult<()> {
        self.apply_refresh("messages", &self.messages, None, self.client.chat_messages())
            .await
    }

    pub async fn refresh_reports(&self) -> AppResult<()> {
        self.apply_refresh("reports", &self.reports, None, self.client.reports())
            .await
    }

    /// Owner-only org summary; silently skipped for other roles
    pub async fn refresh_summary(&self) -> AppResult<()> {
        let Some(user) = self.session.user().await else {
            return Ok(());
        };
        if !policy::can_view_summary(&user) {
            return Ok(());
        }
        let epoch = self.session.epoch().await;
        match self.client.org_task_summary().await {
            Ok(summary) => {
                if self.session.epoch().await == epoch {
                    *self.summary.write().await = summary;
                }
                Ok(())
            }
            Err(e) if e.is_auth_error() => Err(e.into()),
            Err(e) => {
                warn!("Failed to refresh org summary: {e}");
                Ok(())
            }
        }
    }

    // --- Mutations (each re-fetches the affected collection in full) ---

    async fn require_user(&self) -> AppResult<User> {
        self.session
            .user()
            .await
            .ok_or_else(|| AppError::not_permitted("Not signed in"))
    }

    pub async fn create_task(&self, input: TaskCreateInput) -> AppResult<()> {
        let user = self.require_user().await?;
        if !policy::can_create_task(&user) {
            return Err(AppError::not_permitted(
                "Only owners and seniors can create tasks",
            ));
        }
        self.banners.lock().await.clear();
        if let Some(priority) = input.priority {
            if let Err(e) = validate_priority(i64::from(priority)) {
                self.banners.lock().await.fail(e.to_string());
                return Err(AppError::Validation(e.to_string()));
            }
        }
        if let Some(parent_id) = input.parent_task_id.as_deref() {
            let tasks = self.tasks.snapshot().await;
            if let Err(e) = validate_parent_task(&tasks, parent_id) {
                self.banners.lock().await.fail(e.to_string());
                return Err(AppError::Validation(e.to_string()));
            }
        }
        if let Some(assignee) = input.assigned_to.as_deref() {
            let roster = self.org_users.snapshot().await;
            if !policy::allowed_assignees(&user, &roster)
                .iter()
                .any(|u| u.id == assignee)
            {
                return Err(AppError::not_permitted(
                    "That junior is not in your assignable set",
                ));
            }
        }
        match self.client.create_task(&input).await {
            Ok(()) => {
                let filter = self.task_filter.read().await.clone();
                self.refresh_tasks_with(&filter).await?;
                self.banners.lock().await.succeed("Task created");
                Ok(())
            }
            Err(e) => {
                self.banners.lock().await.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    pub async fn create_designation(&self, input: DesignationCreateInput) -> AppResult<()> {
        let user = self.require_user().await?;
        if !policy::can_manage_org_structure(&user) {
            return Err(AppError::not_permitted(
                "Only the owner can manage designations",
            ));
        }
        self.banners.lock().await.clear();
        match self.client.create_designation(&input).await {
            Ok(()) => {
                self.refresh_designations().await?;
                self.banners.lock().await.succeed("Designation created");
                Ok(())
            }
            Err(e) => {
                self.banners.lock().await.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    pub async fn create_employee(&self, input: EmployeeCreateInput) -> AppResult<()> {
        let user = self.require_user().await?;
        if !policy::can_manage_org_structure(&user) {
            return Err(AppError::not_permitted(
                "Only the owner can create employees",
            ));
        }
        self.banners.lock().await.clear();
        if input.designation_id.is_none() {
            let message = "Select a designation first";
            self.banners.lock().await.fail(message);
            return Err(AppError::Validation(message.to_string()));
        }
        if let Some(manager_id) = input.manager_id.as_deref() {
            let roster = self.org_users.snapshot().await;
            if let Err(e) = validate_manager(&roster, manager_id) {
                self.banners.lock().await.fail(e.to_string());
                return Err(AppError::Validation(e.to_string()));
            }
        }
        match self.client.create_employee(&input).await {
            Ok(()) => {
                self.refresh_org_users().await?;
                self.banners.lock().await.succeed("Employee created");
                Ok(())
            }
            Err(e) => {
                self.banners.lock().await.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Pair a junior under a senior; owner only
    pub async fn assign_junior(&self, junior_id: &str, manager_id: &str) -> AppResult<()> {
        let user = self.require_user().await?;
        if !policy::can_manage_org_structure(&user) {
            return Err(AppError::not_permitted(
                "Only the owner can assign juniors to seniors",
            ));
        }
        self.banners.lock().await.clear();
        let roster = self.org_users.snapshot().await;
        if let Err(e) = validate_manager(&roster, manager_id) {
            self.banners.lock().await.fail(e.to_string());
            return Err(AppError::Validation(e.to_string()));
        }
        match self.client.assign_junior(junior_id, manager_id).await {
            Ok(()) => {
                self.refresh_org_users().await?;
                self.banners.lock().await.succeed("Assignment updated");
                Ok(())
            }
            Err(e) => {
                self.banners.lock().await.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    pub async fn create_target(&self, input: TargetCreateInput) -> AppResult<()> {
        let user = self.require_user().await?;
        if !policy::can_manage_org_structure(&user) {
            return Err(AppError::not_permitted("Only the owner can create targets"));
        }
        self.banners.lock().await.clear();
        match self.client.create_target(&input).await {
            Ok(()) => {
                self.refresh_targets().await?;
                self.banners.lock().await.succeed("Target created");
                Ok(())
            }
            Err(e) => {
                self.banners.lock().await.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Update a target's status and, optionally, progress (clamped to [0,100])
    pub async fn update_target(
        &self,
        id: &str,
        status: TargetStatus,
        progress: Option<i64>,
    ) -> AppResult<()> {
        self.banners.lock().await.clear();
        let mut update = TargetUpdate::status(status);
        if let Some(raw) = progress {
            update = update.with_progress(raw);
        }
        match self.client.update_target(id, &update).await {
            Ok(()) => self.refresh_targets().await,
            Err(e) => {
                self.banners.lock().await.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Send a chat message; blank content is silently ignored
    pub async fn send_message(&self, content: &str, recipient_id: Option<String>) -> AppResult<()> {
        if content.trim().is_empty() {
            return Ok(());
        }
        self.banners.lock().await.clear();
        let input = ChatSendInput {
            content: content.to_string(),
            recipient_id,
        };
        match self.client.send_message(&input).await {
            Ok(()) => self.refresh_messages().await,
            Err(e) => {
                self.banners.lock().await.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    pub async fn request_report(
        &self,
        responder_id: &str,
        request_message: &str,
        task_id: Option<String>,
    ) -> AppResult<()> {
        let user = self.require_user().await?;
        let roster = self.org_users.snapshot().await;
        if !policy::can_request_report(&user, responder_id, &roster) {
            return Err(AppError::not_permitted(
                "Reports can only be requested from your own juniors",
            ));
        }
        self.banners.lock().await.clear();
        let input = ReportRequestInput {
            responder_id: responder_id.to_string(),
            request_message: request_message.to_string(),
            task_id,
        };
        match self.client.request_report(&input).await {
            Ok(()) => self.refresh_reports().await,
            Err(e) => {
                self.banners.lock().await.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    pub async fn submit_report(&self, report_id: &str, response_message: &str) -> AppResult<()> {
        let user = self.require_user().await?;
        let report = self.find_report(report_id).await?;
        if !policy::can_submit_report(&user, &report) {
            return Err(AppError::not_permitted(
                "Only the responder can submit, and only while the report is requested",
            ));
        }
        self.banners.lock().await.clear();
        match self.client.submit_report(report_id, response_message).await {
            Ok(()) => self.refresh_reports().await,
            Err(e) => {
                self.banners.lock().await.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    pub async fn review_report(&self, report_id: &str, grade: f64) -> AppResult<()> {
        let user = self.require_user().await?;
        let report = self.find_report(report_id).await?;
        if !policy::can_review_report(&user, &report) {
            return Err(AppError::not_permitted(
                "Only the requester can review, and only once the report is submitted",
            ));
        }
        self.banners.lock().await.clear();
        match self.client.review_report(report_id, grade).await {
            Ok(()) => self.refresh_reports().await,
            Err(e) => {
                self.banners.lock().await.fail(e.to_string());
                Err(e.into())
            }
        }
    }

    async fn find_report(&self, report_id: &str) -> AppResult<Report> {
        self.reports
            .snapshot()
            .await
            .into_iter()
            .find(|r| r.id == report_id)
            .ok_or_else(|| AppError::Validation(format!("Unknown report: {report_id}")))
    }

    // --- Snapshots ---

    pub async fn tasks(&self) -> Vec<Task> {
        self.tasks.snapshot().await
    }

    pub async fn org_users(&self) -> Vec<OrgUser> {
        self.org_users.snapshot().await
    }

    pub async fn designations(&self) -> Vec<Designation> {
        self.designations.snapshot().await
    }

    pub async fn targets(&self) -> Vec<Target> {
        self.targets.snapshot().await
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.snapshot().await
    }

    pub async fn reports(&self) -> Vec<Report> {
        self.reports.snapshot().await
    }

    pub async fn summary(&self) -> OrgSummary {
        self.summary.read().await.clone()
    }

    pub async fn banners(&self) -> Banners {
        self.banners.lock().await.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.session.user().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.is_authenticated().await
    }

    /// Juniors the current user may assign tasks to
    pub async fn allowed_assignees(&self) -> Vec<OrgUser> {
        let Some(user) = self.session.user().await else {
            return Vec::new();
        };
        let roster = self.org_users.snapshot().await;
        policy::allowed_assignees(&user, &roster)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Which role the workspace renders for; `Role::Junior` menus without a
    /// decoded profile
    pub async fn role(&self) -> Option<Role> {
        self.session.user().await.map(|u| u.role)
    }
}
