use fsm_security::Role;
use serde_json::{Map, Value};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// A tenant. Every domain record belongs to exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub subscription_tier: Role,
    pub trial_expires_at: Option<OffsetDateTime>,
    pub settings: Map<String, Value>,
    pub created_at: OffsetDateTime,
}

impl Organization {
    /// A fresh organization on the given tier. Trial organizations expire
    /// `trial_days` after creation.
    #[must_use]
    pub fn new(name: impl Into<String>, tier: Role, trial_days: i64) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            subscription_tier: tier,
            trial_expires_at: (tier == Role::Trial).then(|| now + Duration::days(trial_days)),
            settings: Map::new(),
            created_at: now,
        }
    }
}

/// Public view of a user; the password hash never leaves the repository
/// except inside [`Credentials`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub organization_id: Uuid,
    pub created_at: OffsetDateTime,
}

impl User {
    #[must_use]
    pub fn new(email: String, name: String, role: Role, organization_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            role,
            organization_id,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: User,
    pub password_hash: String,
}

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub user: User,
    pub organization: Organization,
}

#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub organization_id: Option<Uuid>,
    pub organization_name: Option<String>,
    pub role: Option<String>,
}

/// A user added to the caller's organization by an admin.
#[derive(Debug, Clone, Default)]
pub struct NewMember {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OrganizationUpdate {
    pub name: String,
    pub settings: Option<Map<String, Value>>,
}

/// Lower-cased, trimmed email used as the global lookup key.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn trial_organization_expires_after_trial_period() {
        let org = Organization::new("Acme", Role::Trial, 14);
        let expires = org.trial_expires_at.unwrap();
        assert_eq!((expires - org.created_at).whole_days(), 14);
    }

    #[test]
    fn paid_tier_has_no_expiry() {
        let org = Organization::new("Acme", Role::Admin, 14);
        assert!(org.trial_expires_at.is_none());
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  Ola.Nordmann@Example.NO "), "ola.nordmann@example.no");
    }
}
