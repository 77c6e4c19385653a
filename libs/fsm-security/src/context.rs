use uuid::Uuid;

use crate::role::Role;

/// Authorization failures raised by the guards.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("Access denied")]
    ForeignTenant,
    #[error("Admin access required")]
    AdminRequired,
}

/// Identity of the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SecurityContext {
    subject_id: Uuid,
    organization_id: Uuid,
    role: Role,
}

impl SecurityContext {
    #[must_use]
    pub fn new(subject_id: Uuid, organization_id: Uuid, role: Role) -> Self {
        Self {
            subject_id,
            organization_id,
            role,
        }
    }

    /// Id of the authenticated user.
    #[must_use]
    pub fn subject_id(&self) -> Uuid {
        self.subject_id
    }

    /// Organization (tenant) the caller acts in.
    #[must_use]
    pub fn organization_id(&self) -> Uuid {
        self.organization_id
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fails unless `record_org` is the caller's organization.
    ///
    /// # Errors
    /// Returns [`AccessError::ForeignTenant`] when the record belongs to
    /// another organization.
    pub fn ensure_owns(&self, record_org: Uuid) -> Result<(), AccessError> {
        if record_org == self.organization_id {
            Ok(())
        } else {
            Err(AccessError::ForeignTenant)
        }
    }

    /// # Errors
    /// Returns [`AccessError::AdminRequired`] for non-admin callers.
    pub fn require_admin(&self) -> Result<(), AccessError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AccessError::AdminRequired)
        }
    }
}
