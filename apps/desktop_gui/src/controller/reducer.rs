//! Application state and the reducer that folds backend events into it.
//!
//! Every transition returns the follow-up commands it needs (page loads,
//! re-fetches after a mutation); the caller queues them in order.

use std::time::Instant;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        credentials::CredentialsForm,
        department_details::DepartmentDetails,
        departments::DepartmentsPage,
        events::{UiError, UiErrorCategory, UiErrorContext, UiEvent},
        notifications::Notifications,
        router::{guard, Route},
    },
};

pub const SESSION_EXPIRED_BANNER: &str = "Session expired or invalid. Please sign in again.";

#[derive(Debug)]
pub struct AppState {
    route: Route,
    authenticated: bool,
    username: Option<String>,
    pub login: CredentialsForm,
    pub register: CredentialsForm,
    pub departments: DepartmentsPage,
    pub details: Option<DepartmentDetails>,
    pub toasts: Notifications,
    banner: Option<String>,
    pub status: String,
}

impl AppState {
    /// `authenticated` reflects the token restored at startup.
    pub fn new(authenticated: bool) -> Self {
        Self {
            route: Route::Login,
            authenticated,
            username: None,
            login: CredentialsForm::default(),
            register: CredentialsForm::default(),
            departments: DepartmentsPage::default(),
            details: None,
            toasts: Notifications::default(),
            banner: None,
            status: String::new(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn navigate(&mut self, path: &str) -> Vec<BackendCommand> {
        self.enter(Route::parse(path))
    }

    pub fn enter(&mut self, route: Route) -> Vec<BackendCommand> {
        let route = guard(route, self.authenticated);
        self.route = route;
        match route {
            Route::Departments => {
                self.details = None;
                vec![self.departments.on_enter()]
            }
            Route::DepartmentDetails(id) => {
                let mut details = DepartmentDetails::new(id);
                let cmds = details.on_enter();
                self.details = Some(details);
                cmds
            }
            Route::Login | Route::Register => {
                self.details = None;
                Vec::new()
            }
        }
    }

    pub fn submit_login(&mut self) -> Option<BackendCommand> {
        let (username, password) = self.login.submit()?;
        Some(BackendCommand::Login { username, password })
    }

    pub fn submit_register(&mut self) -> Option<BackendCommand> {
        let (username, password) = self.register.submit()?;
        Some(BackendCommand::Register { username, password })
    }

    /// Drops local user state right away; the worker clears the stored token.
    pub fn logout(&mut self) -> Vec<BackendCommand> {
        self.sign_out();
        let mut cmds = vec![BackendCommand::Logout];
        cmds.extend(self.enter(Route::Login));
        cmds
    }

    fn sign_out(&mut self) {
        self.authenticated = false;
        self.username = None;
        self.departments = DepartmentsPage::default();
        self.details = None;
        self.login.clear();
        self.register.clear();
    }

    fn details_for(
        &mut self,
        department_id: shared::domain::DepartmentId,
    ) -> Option<&mut DepartmentDetails> {
        self.details
            .as_mut()
            .filter(|details| details.department_id() == department_id)
    }

    pub fn apply(&mut self, event: UiEvent, now: Instant) -> Vec<BackendCommand> {
        match event {
            UiEvent::BackendReady => {
                self.status = "Backend worker ready".to_string();
                Vec::new()
            }
            UiEvent::LoggedIn { username } => {
                self.login.clear();
                self.authenticated = true;
                self.username = Some(username);
                self.banner = None;
                self.toasts.success("Login successful!", now);
                self.enter(Route::Departments)
            }
            UiEvent::Registered(user) => {
                self.register.clear();
                tracing::info!(username = %user.username, "registration accepted");
                self.toasts
                    .success("Registration successful! Please sign in.", now);
                self.enter(Route::Login)
            }
            UiEvent::LoggedOut => Vec::new(),
            UiEvent::DepartmentsLoaded { request, page } => {
                self.departments.on_loaded(request, page).into_iter().collect()
            }
            UiEvent::DepartmentLoaded { id, department } => {
                if let Some(details) = self.details_for(id) {
                    details.on_department_loaded(department);
                }
                Vec::new()
            }
            UiEvent::SubDepartmentsLoaded {
                department_id,
                request,
                page,
            } => self
                .details_for(department_id)
                .and_then(|details| details.on_sub_departments_loaded(request, page))
                .into_iter()
                .collect(),
            UiEvent::DepartmentCreated(_) => {
                self.toasts.success("Department created successfully!", now);
                vec![self.departments.on_created()]
            }
            UiEvent::DepartmentUpdated(department) => {
                self.toasts.success("Department updated successfully!", now);
                self.details_for(department.id)
                    .map(DepartmentDetails::on_department_updated)
                    .unwrap_or_default()
            }
            UiEvent::DepartmentDeleted(_) => {
                self.toasts.success("Department deleted successfully!", now);
                vec![self.departments.on_deleted()]
            }
            UiEvent::SubDepartmentCreated { department_id, .. } => {
                self.toasts
                    .success("Sub-department created successfully!", now);
                self.details_for(department_id)
                    .map(DepartmentDetails::on_sub_created)
                    .into_iter()
                    .collect()
            }
            UiEvent::SubDepartmentUpdated {
                department_id,
                sub_department,
            } => {
                self.toasts
                    .success("Sub-department updated successfully!", now);
                self.details_for(department_id)
                    .map(|details| details.on_sub_updated(sub_department.id))
                    .into_iter()
                    .collect()
            }
            UiEvent::SubDepartmentDeleted {
                department_id,
                deleted,
            } => {
                self.toasts
                    .success("Sub-department deleted successfully!", now);
                self.details_for(department_id)
                    .map(|details| details.on_sub_deleted(deleted.id))
                    .into_iter()
                    .collect()
            }
            UiEvent::Error(err) => self.on_error(err, now),
        }
    }

    fn on_error(&mut self, err: UiError, now: Instant) -> Vec<BackendCommand> {
        if err.requires_reauth() {
            tracing::warn!(context = ?err.context(), "session rejected; returning to login");
            self.sign_out();
            self.banner = Some(SESSION_EXPIRED_BANNER.to_string());
            self.toasts.error(err.message(), now);
            let mut cmds = vec![BackendCommand::Logout];
            cmds.extend(self.enter(Route::Login));
            return cmds;
        }

        let message = err.message().to_string();
        match err.context() {
            UiErrorContext::Login => {
                self.login.finish();
                if err.category() == UiErrorCategory::Auth {
                    self.toasts.error("Invalid username or password", now);
                } else {
                    self.toasts.error(format!("Login failed: {message}"), now);
                }
            }
            UiErrorContext::Register => {
                self.register.finish();
                self.toasts.error(message, now);
            }
            UiErrorContext::LoadDepartments => self.departments.on_failed(err),
            UiErrorContext::LoadDepartment(id) => {
                if let Some(details) = self.details_for(id) {
                    details.on_department_failed(err);
                }
            }
            UiErrorContext::LoadSubDepartments(id) => {
                if let Some(details) = self.details_for(id) {
                    details.on_sub_departments_failed(err);
                }
            }
            UiErrorContext::CreateDepartment => {
                self.departments.on_create_failed();
                self.toasts
                    .error(format!("Failed to create department: {message}"), now);
            }
            UiErrorContext::UpdateDepartment => self
                .toasts
                .error(format!("Failed to update department: {message}"), now),
            UiErrorContext::DeleteDepartment => self
                .toasts
                .error(format!("Failed to delete department: {message}"), now),
            UiErrorContext::CreateSubDepartment => {
                if let Some(details) = self.details.as_mut() {
                    details.on_sub_create_failed();
                }
                self.toasts
                    .error(format!("Failed to create sub-department: {message}"), now);
            }
            UiErrorContext::UpdateSubDepartment => self
                .toasts
                .error(format!("Failed to update sub-department: {message}"), now),
            UiErrorContext::DeleteSubDepartment => self
                .toasts
                .error(format!("Failed to delete sub-department: {message}"), now),
            UiErrorContext::Logout => self.toasts.error(message, now),
            UiErrorContext::BackendStartup | UiErrorContext::General => {
                self.banner = Some(message.clone());
                self.toasts.error(message, now);
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
