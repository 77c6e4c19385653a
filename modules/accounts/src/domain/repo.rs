use async_trait::async_trait;
use fsm_security::Role;
use uuid::Uuid;

use super::model::{Credentials, Organization, User};

#[async_trait]
pub trait AccountsRepository: Send + Sync {
    /// Insert a user, creating `organization` first when given, in one
    /// transaction. Returns `false` (and writes nothing) if the email is taken.
    async fn insert_user(
        &self,
        organization: Option<&Organization>,
        user: &User,
        password_hash: &str,
    ) -> anyhow::Result<bool>;

    async fn insert_organization(&self, organization: &Organization) -> anyhow::Result<()>;

    async fn find_organization(&self, id: Uuid) -> anyhow::Result<Option<Organization>>;

    async fn update_organization(&self, organization: &Organization) -> anyhow::Result<()>;

    async fn find_user(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<Credentials>>;

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;

    async fn list_users(&self, organization_id: Uuid) -> anyhow::Result<Vec<User>>;

    /// Returns `false` if the user no longer exists.
    async fn update_role(&self, id: Uuid, role: Role) -> anyhow::Result<bool>;

    /// Returns `false` if the user no longer exists.
    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool>;

    /// Remove every user and organization.
    async fn purge(&self) -> anyhow::Result<()>;
}
