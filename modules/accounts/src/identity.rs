use std::sync::Arc;

use async_trait::async_trait;
use fsm_auth::IdentityResolver;
use fsm_security::SecurityContext;
use uuid::Uuid;

use crate::domain::service::AccountsService;

/// Resolves token subjects for the auth middleware.
#[derive(Clone)]
pub struct AccountsIdentity(Arc<AccountsService>);

impl AccountsIdentity {
    #[must_use]
    pub fn new(svc: Arc<AccountsService>) -> Self {
        Self(svc)
    }
}

#[async_trait]
impl IdentityResolver for AccountsIdentity {
    async fn resolve(&self, user_id: Uuid) -> anyhow::Result<Option<SecurityContext>> {
        Ok(self.0.resolve(user_id).await?)
    }
}
