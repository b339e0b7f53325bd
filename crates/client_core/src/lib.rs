use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    domain::{Department, DepartmentId, SubDepartment, SubDepartmentId, User},
    pagination::{Page, PageRequest},
    protocol::{CreateDepartmentInput, DeletedDepartment, DeletedSubDepartment},
};
use tokio::sync::RwLock;
use tracing::warn;

mod auth;
pub mod config;
mod departments;
pub mod error;
pub mod graphql;
pub mod operations;
pub mod session;

pub use config::{load_settings, ClientSettings};
pub use error::{ClientError, Result};
pub use graphql::{GraphqlTransport, HttpTransport};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};

use operations::Operation;

/// Everything the UI and CLI need from the department API.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<()>;
    async fn register(&self, username: &str, password: &str) -> Result<User>;
    async fn logout(&self) -> Result<()>;
    async fn is_authenticated(&self) -> bool;
    async fn current_user(&self) -> Option<User>;

    async fn list_departments(&self, request: PageRequest) -> Result<Page<Department>>;
    async fn get_department(&self, id: DepartmentId) -> Result<Option<Department>>;
    async fn create_department(&self, input: CreateDepartmentInput) -> Result<Department>;
    async fn update_department(&self, id: DepartmentId, name: &str) -> Result<Department>;
    async fn delete_department(&self, id: DepartmentId) -> Result<DeletedDepartment>;

    async fn list_sub_departments(
        &self,
        department_id: DepartmentId,
        request: PageRequest,
    ) -> Result<Page<SubDepartment>>;
    async fn create_sub_department(
        &self,
        department_id: DepartmentId,
        name: &str,
    ) -> Result<SubDepartment>;
    async fn update_sub_department(&self, id: SubDepartmentId, name: &str)
        -> Result<SubDepartment>;
    async fn delete_sub_department(&self, id: SubDepartmentId) -> Result<DeletedSubDepartment>;
}

pub struct AdminClient {
    transport: Arc<dyn GraphqlTransport>,
    session: RwLock<Session>,
}

impl AdminClient {
    pub fn new(transport: Arc<dyn GraphqlTransport>, session: Session) -> Self {
        Self {
            transport,
            session: RwLock::new(session),
        }
    }

    /// HTTP transport against the configured endpoint, token kept in the data dir.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let transport = HttpTransport::new(settings.endpoint()?);
        let session = Session::start(Box::new(FileTokenStore::new(settings.token_path()?)))?;
        Ok(Self::new(Arc::new(transport), session))
    }

    async fn run<T: DeserializeOwned>(&self, op: &Operation, variables: Value) -> Result<T> {
        let bearer = if op.requires_auth {
            let session = self.session.read().await;
            match session.token() {
                Some(token) => Some(token.to_string()),
                None => return Err(ClientError::NotAuthenticated),
            }
        } else {
            None
        };

        let result = self
            .transport
            .execute(&op.request(variables), bearer.as_deref())
            .await
            .and_then(|response| response.into_field(op.name, op.field));

        if let Err(err) = &result {
            if op.requires_auth && err.is_unauthenticated() {
                warn!(
                    operation = op.name,
                    "server rejected the session token; signing out"
                );
                if let Err(clear_err) = self.session.write().await.clear() {
                    warn!("failed to clear rejected session: {clear_err}");
                }
            }
        }
        result
    }
}

#[async_trait]
impl AdminApi for AdminClient {
    async fn login(&self, username: &str, password: &str) -> Result<()> {
        self.login_impl(username, password).await
    }

    async fn register(&self, username: &str, password: &str) -> Result<User> {
        self.register_impl(username, password).await
    }

    async fn logout(&self) -> Result<()> {
        self.logout_impl().await
    }

    async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    async fn current_user(&self) -> Option<User> {
        self.session.read().await.user().cloned()
    }

    async fn list_departments(&self, request: PageRequest) -> Result<Page<Department>> {
        self.list_departments_impl(request).await
    }

    async fn get_department(&self, id: DepartmentId) -> Result<Option<Department>> {
        self.get_department_impl(id).await
    }

    async fn create_department(&self, input: CreateDepartmentInput) -> Result<Department> {
        self.create_department_impl(input).await
    }

    async fn update_department(&self, id: DepartmentId, name: &str) -> Result<Department> {
        self.update_department_impl(id, name).await
    }

    async fn delete_department(&self, id: DepartmentId) -> Result<DeletedDepartment> {
        self.delete_department_impl(id).await
    }

    async fn list_sub_departments(
        &self,
        department_id: DepartmentId,
        request: PageRequest,
    ) -> Result<Page<SubDepartment>> {
        self.list_sub_departments_impl(department_id, request).await
    }

    async fn create_sub_department(
        &self,
        department_id: DepartmentId,
        name: &str,
    ) -> Result<SubDepartment> {
        self.create_sub_department_impl(department_id, name).await
    }

    async fn update_sub_department(
        &self,
        id: SubDepartmentId,
        name: &str,
    ) -> Result<SubDepartment> {
        self.update_sub_department_impl(id, name).await
    }

    async fn delete_sub_department(&self, id: SubDepartmentId) -> Result<DeletedSubDepartment> {
        self.delete_sub_department_impl(id).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
