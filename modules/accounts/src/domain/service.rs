use std::sync::Arc;

use fsm_auth::{TokenService, hash_password, verify_password};
use fsm_security::{Role, SecurityContext};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::error::DomainError;
use super::model::{
    NewMember, Organization, OrganizationUpdate, Registration, Session, User, normalize_email,
};
use super::repo::AccountsRepository;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Length of the trial period of newly registered organizations.
    pub trial_days: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { trial_days: 14 }
    }
}

pub struct AccountsService {
    repo: Arc<dyn AccountsRepository>,
    tokens: Arc<TokenService>,
    config: ServiceConfig,
}

fn parse_role(role: Option<&str>) -> Result<Option<Role>, DomainError> {
    Ok(role.map(str::parse::<Role>).transpose()?)
}

fn required(value: &str, field: &str) -> Result<String, DomainError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(v.to_owned())
}

fn validate_email(email: &str) -> Result<String, DomainError> {
    let email = normalize_email(email);
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(DomainError::validation("Invalid email address")),
    }
}

fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.is_empty() {
        return Err(DomainError::validation("Password must not be empty"));
    }
    Ok(())
}

async fn hash_blocking(password: String) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| anyhow::anyhow!("password hashing task failed: {e}"))?
        .map_err(DomainError::from)
}

async fn verify_blocking(password: String, hash: String) -> Result<bool, DomainError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| anyhow::anyhow!("password verification task failed: {e}"))?
        .map_err(DomainError::from)
}

impl AccountsService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn AccountsRepository>,
        tokens: Arc<TokenService>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    fn session(&self, user: User, organization: Organization) -> Result<Session, DomainError> {
        let access_token = self.tokens.issue(user.id)?;
        Ok(Session {
            access_token,
            user,
            organization,
        })
    }

    /// Create a user and sign them in.
    ///
    /// - `organization_id`: join that organization with the requested role
    ///   (default `user`)
    /// - `organization_name`: create a trial organization, user becomes admin
    /// - neither: create a personal organization named after the user
    ///
    /// # Errors
    /// `EmailTaken` if the email is registered, `OrganizationNotFound` for an
    /// unknown `organization_id`, `InvalidRole`/`Validation` for bad input.
    #[instrument(skip(self, reg), fields(email = %reg.email))]
    pub async fn register(&self, reg: Registration) -> Result<Session, DomainError> {
        let email = validate_email(&reg.email)?;
        let name = required(&reg.name, "Name")?;
        validate_password(&reg.password)?;
        let requested_role = parse_role(reg.role.as_deref())?;

        if self.repo.email_exists(&email).await? {
            return Err(DomainError::EmailTaken);
        }

        let org_name = reg
            .organization_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        let (organization, role, is_new) = if let Some(org_id) = reg.organization_id {
            let org = self
                .repo
                .find_organization(org_id)
                .await?
                .ok_or(DomainError::OrganizationNotFound)?;
            (org, requested_role.unwrap_or_default(), false)
        } else {
            let org = Organization::new(
                org_name.unwrap_or(&name),
                Role::Trial,
                self.config.trial_days,
            );
            (org, Role::Admin, true)
        };

        let hash = hash_blocking(reg.password).await?;
        let user = User::new(email, name, role, organization.id);
        if !self
            .repo
            .insert_user(is_new.then_some(&organization), &user, &hash)
            .await?
        {
            return Err(DomainError::EmailTaken);
        }

        info!(user_id = %user.id, org_id = %organization.id, %role, new_org = is_new, "user registered");
        self.session(user, organization)
    }

    /// # Errors
    /// `InvalidCredentials` for an unknown email or a wrong password; both
    /// look the same to the caller.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let email = normalize_email(email);
        let Some(creds) = self.repo.find_credentials(&email).await? else {
            debug!("unknown email");
            return Err(DomainError::InvalidCredentials);
        };
        if !verify_blocking(password.to_owned(), creds.password_hash).await? {
            warn!(user_id = %creds.user.id, "wrong password");
            return Err(DomainError::InvalidCredentials);
        }
        let organization = self
            .repo
            .find_organization(creds.user.organization_id)
            .await?
            .ok_or(DomainError::OrganizationNotFound)?;
        self.session(creds.user, organization)
    }

    /// # Errors
    /// `UserNotFound` if the caller's user no longer exists.
    pub async fn me(&self, ctx: &SecurityContext) -> Result<User, DomainError> {
        self.repo
            .find_user(ctx.subject_id())
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    /// # Errors
    /// `OrganizationNotFound` if the caller's organization no longer exists.
    pub async fn organization(&self, ctx: &SecurityContext) -> Result<Organization, DomainError> {
        self.repo
            .find_organization(ctx.organization_id())
            .await?
            .ok_or(DomainError::OrganizationNotFound)
    }

    /// Rename the caller's organization and replace its settings if given.
    ///
    /// # Errors
    /// `Forbidden` for non-admins, `Validation` for an empty name,
    /// `OrganizationNotFound` if the organization is gone.
    #[instrument(skip(self, ctx, update), fields(org_id = %ctx.organization_id()))]
    pub async fn update_organization(
        &self,
        ctx: &SecurityContext,
        update: OrganizationUpdate,
    ) -> Result<Organization, DomainError> {
        ctx.require_admin()?;
        let mut org = self.organization(ctx).await?;
        org.name = required(&update.name, "Name")?;
        if let Some(settings) = update.settings {
            org.settings = settings;
        }
        self.repo.update_organization(&org).await?;
        info!("organization updated");
        Ok(org)
    }

    /// # Errors
    /// `Forbidden` for non-admins.
    pub async fn list_users(&self, ctx: &SecurityContext) -> Result<Vec<User>, DomainError> {
        ctx.require_admin()?;
        Ok(self.repo.list_users(ctx.organization_id()).await?)
    }

    /// Create a user in the caller's organization.
    ///
    /// # Errors
    /// `Forbidden` for non-admins, `Validation` or `InvalidRole` for bad
    /// input, `EmailTaken` if the address is registered.
    #[instrument(skip(self, ctx, member), fields(org_id = %ctx.organization_id(), email = %member.email))]
    pub async fn add_member(
        &self,
        ctx: &SecurityContext,
        member: NewMember,
    ) -> Result<User, DomainError> {
        ctx.require_admin()?;
        let email = validate_email(&member.email)?;
        let name = required(&member.name, "Name")?;
        validate_password(&member.password)?;
        let role = parse_role(member.role.as_deref())?.unwrap_or_default();

        if self.repo.email_exists(&email).await? {
            return Err(DomainError::EmailTaken);
        }
        let hash = hash_blocking(member.password).await?;
        let user = User::new(email, name, role, ctx.organization_id());
        if !self.repo.insert_user(None, &user, &hash).await? {
            return Err(DomainError::EmailTaken);
        }
        info!(user_id = %user.id, %role, "member added");
        Ok(user)
    }

    /// # Errors
    /// `Forbidden` for non-admins and users of other organizations,
    /// `InvalidRole`, `CannotChangeOwnRole`, `UserNotFound`.
    #[instrument(skip(self, ctx), fields(org_id = %ctx.organization_id()))]
    pub async fn change_role(
        &self,
        ctx: &SecurityContext,
        user_id: Uuid,
        role: &str,
    ) -> Result<User, DomainError> {
        ctx.require_admin()?;
        let role: Role = role.parse()?;
        if user_id == ctx.subject_id() {
            return Err(DomainError::CannotChangeOwnRole);
        }
        let mut user = self
            .repo
            .find_user(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        ctx.ensure_owns(user.organization_id)?;
        if !self.repo.update_role(user_id, role).await? {
            return Err(DomainError::UserNotFound);
        }
        info!(from = %user.role, to = %role, "role changed");
        user.role = role;
        Ok(user)
    }

    /// # Errors
    /// `Forbidden` for non-admins and users of other organizations,
    /// `CannotRemoveSelf`, `UserNotFound`.
    #[instrument(skip(self, ctx), fields(org_id = %ctx.organization_id()))]
    pub async fn remove_user(
        &self,
        ctx: &SecurityContext,
        user_id: Uuid,
    ) -> Result<(), DomainError> {
        ctx.require_admin()?;
        if user_id == ctx.subject_id() {
            return Err(DomainError::CannotRemoveSelf);
        }
        let user = self
            .repo
            .find_user(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        ctx.ensure_owns(user.organization_id)?;
        if !self.repo.delete_user(user_id).await? {
            return Err(DomainError::UserNotFound);
        }
        info!("user removed");
        Ok(())
    }

    /// Security context for a token subject, `None` if the user is gone.
    ///
    /// # Errors
    /// `Internal` if the user table cannot be read.
    pub async fn resolve(&self, user_id: Uuid) -> Result<Option<SecurityContext>, DomainError> {
        Ok(self
            .repo
            .find_user(user_id)
            .await?
            .map(|u| SecurityContext::new(u.id, u.organization_id, u.role)))
    }

    /// Create an organization outside the registration flow.
    ///
    /// # Errors
    /// `Validation` for an empty name, `Internal` on storage failures.
    pub async fn provision_organization(
        &self,
        name: &str,
        tier: Role,
    ) -> Result<Organization, DomainError> {
        let org = Organization::new(required(name, "Name")?, tier, self.config.trial_days);
        self.repo.insert_organization(&org).await?;
        Ok(org)
    }

    /// Create a user in `organization` outside the registration flow.
    ///
    /// # Errors
    /// `Validation` for bad input, `EmailTaken` if the address is registered.
    pub async fn provision_user(
        &self,
        organization: &Organization,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> Result<User, DomainError> {
        let email = validate_email(email)?;
        validate_password(password)?;
        let hash = hash_blocking(password.to_owned()).await?;
        let user = User::new(email, required(name, "Name")?, role, organization.id);
        if !self.repo.insert_user(None, &user, &hash).await? {
            return Err(DomainError::EmailTaken);
        }
        Ok(user)
    }

    /// Delete every user and organization.
    ///
    /// # Errors
    /// `Internal` on storage failures.
    pub async fn purge(&self) -> Result<(), DomainError> {
        self.repo.purge().await?;
        warn!("all organizations and users deleted");
        Ok(())
    }
}
