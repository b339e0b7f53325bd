use serde_json::json;
use shared::{
    domain::User,
    protocol::{AuthPayload, Credentials},
};
use tracing::info;

use crate::{
    error::Result,
    operations::{LOGIN, REGISTER},
    AdminClient,
};

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials {
        username: username.to_string(),
        password: password.to_string(),
    }
}

impl AdminClient {
    pub(crate) async fn login_impl(&self, username: &str, password: &str) -> Result<()> {
        let payload: AuthPayload = self
            .run(&LOGIN, json!({ "input": credentials(username, password) }))
            .await?;
        let mut session = self.session.write().await;
        let known = session
            .user()
            .filter(|user| user.username == username)
            .cloned();
        session.establish(payload.access_token)?;
        if let Some(user) = known {
            session.remember_user(user);
        }
        info!(username, "signed in");
        Ok(())
    }

    /// Creates the account without signing in.
    pub(crate) async fn register_impl(&self, username: &str, password: &str) -> Result<User> {
        let user: User = self
            .run(&REGISTER, json!({ "input": credentials(username, password) }))
            .await?;
        self.session.write().await.remember_user(user.clone());
        info!(username = %user.username, "registered account");
        Ok(user)
    }

    pub(crate) async fn logout_impl(&self) -> Result<()> {
        self.session.write().await.clear()?;
        info!("signed out");
        Ok(())
    }
}
