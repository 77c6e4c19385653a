use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::model::{
    NewMember, Organization, OrganizationUpdate, Registration, Session, User,
};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub organization_id: Option<Uuid>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(r: RegisterRequest) -> Self {
        Self {
            email: r.email,
            password: r.password,
            name: r.name,
            organization_id: r.organization_id,
            organization_name: r.organization_name,
            role: r.role,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub organization_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role.as_str().to_owned(),
            organization_id: u.organization_id,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationDto {
    pub id: Uuid,
    pub name: String,
    pub subscription_tier: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub trial_expires_at: Option<OffsetDateTime>,
    pub settings: Map<String, Value>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Organization> for OrganizationDto {
    fn from(o: Organization) -> Self {
        Self {
            id: o.id,
            name: o.name,
            subscription_tier: o.subscription_tier.as_str().to_owned(),
            trial_expires_at: o.trial_expires_at,
            settings: o.settings,
            created_at: o.created_at,
        }
    }
}

/// Returned by register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDto {
    pub access_token: String,
    pub token_type: String,
    pub user: UserDto,
    pub organization: OrganizationDto,
}

impl From<Session> for TokenDto {
    fn from(s: Session) -> Self {
        Self {
            access_token: s.access_token,
            token_type: "bearer".to_owned(),
            user: s.user.into(),
            organization: s.organization.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrganizationRequest {
    pub name: String,
    #[serde(default)]
    pub settings: Option<Map<String, Value>>,
}

impl From<UpdateOrganizationRequest> for OrganizationUpdate {
    fn from(r: UpdateOrganizationRequest) -> Self {
        Self {
            name: r.name,
            settings: r.settings,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<CreateUserRequest> for NewMember {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            email: r.email,
            password: r.password,
            name: r.name,
            role: r.role,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleQuery {
    pub role: String,
}
