//! UI/backend events and error modeling for desktop GUI controller.

use client_core::ClientError;
use shared::{
    domain::{Department, DepartmentId, SubDepartment, User},
    error::ErrorCode,
    pagination::{Page, PageRequest},
    protocol::{DeletedDepartment, DeletedSubDepartment},
};

#[derive(Debug, Clone)]
pub enum UiEvent {
    BackendReady,
    LoggedIn {
        username: String,
    },
    Registered(User),
    LoggedOut,
    DepartmentsLoaded {
        request: PageRequest,
        page: Page<Department>,
    },
    DepartmentLoaded {
        id: DepartmentId,
        department: Option<Department>,
    },
    SubDepartmentsLoaded {
        department_id: DepartmentId,
        request: PageRequest,
        page: Page<SubDepartment>,
    },
    DepartmentCreated(Department),
    DepartmentUpdated(Department),
    DepartmentDeleted(DeletedDepartment),
    SubDepartmentCreated {
        department_id: DepartmentId,
        sub_department: SubDepartment,
    },
    SubDepartmentUpdated {
        department_id: DepartmentId,
        sub_department: SubDepartment,
    },
    SubDepartmentDeleted {
        department_id: DepartmentId,
        deleted: DeletedSubDepartment,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    Unknown,
}

/// What the failed request was doing; queries carry the department they were for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Login,
    Register,
    Logout,
    LoadDepartments,
    LoadDepartment(DepartmentId),
    LoadSubDepartments(DepartmentId),
    CreateDepartment,
    UpdateDepartment,
    DeleteDepartment,
    CreateSubDepartment,
    UpdateSubDepartment,
    DeleteSubDepartment,
    General,
}

impl UiErrorContext {
    pub fn is_credential_exchange(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        // Forbidden leaves the session intact; only a rejected token is an auth failure.
        let category = if err.is_unauthenticated() {
            UiErrorCategory::Auth
        } else {
            match err {
                ClientError::Transport(_) | ClientError::Http { .. } => UiErrorCategory::Transport,
                ClientError::Validation(_) | ClientError::InvalidPagination(_) => {
                    UiErrorCategory::Validation
                }
                _ if err.has_code(ErrorCode::Validation) => UiErrorCategory::Validation,
                _ => UiErrorCategory::Unknown,
            }
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("unauthorized")
            || lower.contains("unauthenticated")
            || lower.contains("not signed in")
        {
            UiErrorCategory::Auth
        } else if lower.contains("connection")
            || lower.contains("timed out")
            || lower.contains("disconnected")
            || lower.contains("queue is full")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };
        Self {
            category,
            context,
            message,
        }
    }

    /// A rejected session anywhere except the credential pages sends the user back to login.
    pub fn requires_reauth(&self) -> bool {
        self.category == UiErrorCategory::Auth && !self.context.is_credential_exchange()
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
