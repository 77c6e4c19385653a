use std::sync::Arc;

use accounts::AccountsService;
use anyhow::Context as _;
use economy::EconomyService;
use fsm_db::DocumentStore;
use fsm_security::SecurityContext;
use hse::HseService;
use operations::OperationsService;
use serde::Serialize;
use subtle::ConstantTimeEq as _;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::error::SeedError;
use super::fixtures::{self, TENANTS, TenantFixture};

/// Constant-time comparison; no configured secret matches nothing.
fn secret_matches(expected: Option<&str>, given: Option<&str>) -> bool {
    match (expected, given) {
        (Some(expected), Some(given)) => expected.as_bytes().ct_eq(given.as_bytes()).into(),
        _ => false,
    }
}

/// Services the reset writes through.
pub struct Targets {
    pub accounts: Arc<AccountsService>,
    pub operations: Arc<OperationsService>,
    pub hse: Arc<HseService>,
    pub economy: Arc<EconomyService>,
    pub documents: DocumentStore,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeededCounts {
    pub users: usize,
    pub employees: usize,
    pub customers: usize,
    pub workorders: usize,
    pub internalorders: usize,
    pub products: usize,
    pub routes: usize,
    pub hms_records: usize,
    pub services: usize,
    pub supplier_pricing: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeededOrganization {
    pub id: Uuid,
    pub name: String,
    pub counts: SeededCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
    pub role: String,
    pub organization: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub message: String,
    pub organizations: Vec<SeededOrganization>,
    pub credentials: Vec<Credential>,
}

pub struct SeedService {
    secret: Option<String>,
    targets: Targets,
}

impl SeedService {
    /// Without a secret the endpoint rejects every call.
    #[must_use]
    pub fn new(secret: Option<String>, targets: Targets) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
            targets,
        }
    }

    fn authorize(&self, given: Option<&str>) -> Result<(), SeedError> {
        if secret_matches(self.secret.as_deref(), given) {
            Ok(())
        } else {
            Err(SeedError::InvalidSecret)
        }
    }

    /// Wipe everything and load the demo fixtures.
    ///
    /// # Errors
    /// `InvalidSecret` unless `secret` matches the configured one; `Failed`
    /// if any write fails, in which case the store may be partially seeded.
    #[instrument(skip_all)]
    pub async fn reseed(&self, secret: Option<&str>) -> Result<SeedSummary, SeedError> {
        if let Err(e) = self.authorize(secret) {
            warn!("seed request with invalid secret");
            return Err(e);
        }

        let removed = self
            .targets
            .documents
            .purge()
            .await
            .context("failed to purge records")?;
        self.targets
            .accounts
            .purge()
            .await
            .context("failed to purge accounts")?;
        info!(removed, "store wiped");

        let today = OffsetDateTime::now_utc().date();
        let mut organizations = Vec::with_capacity(TENANTS.len());
        let mut credentials = Vec::new();
        for tenant in &TENANTS {
            let (org, counts) = self
                .seed_tenant(tenant, today)
                .await
                .with_context(|| format!("failed to seed {}", tenant.name))?;
            credentials.extend(tenant.users.iter().map(|u| Credential {
                email: u.email.to_owned(),
                password: u.password.to_owned(),
                role: u.role.as_str().to_owned(),
                organization: tenant.name.to_owned(),
            }));
            organizations.push(SeededOrganization {
                id: org,
                name: tenant.name.to_owned(),
                counts,
            });
        }
        info!(organizations = organizations.len(), "database seeded");

        Ok(SeedSummary {
            message: "Database seeded successfully".to_owned(),
            organizations,
            credentials,
        })
    }

    async fn seed_tenant(
        &self,
        tenant: &TenantFixture,
        today: time::Date,
    ) -> anyhow::Result<(Uuid, SeededCounts)> {
        let Targets {
            accounts,
            operations: ops,
            hse,
            economy,
            ..
        } = &self.targets;

        let org = accounts.provision_organization(tenant.name, tenant.tier).await?;
        let mut owner = None;
        for u in tenant.users {
            let user = accounts
                .provision_user(&org, u.email, u.password, u.name, u.role)
                .await?;
            owner = owner.or(Some(user.id));
        }
        let owner = owner.context("tenant fixture without users")?;
        let ctx = SecurityContext::new(owner, org.id, fsm_security::Role::Admin);

        let mut counts = SeededCounts {
            users: tenant.users.len(),
            ..SeededCounts::default()
        };

        let mut employee_ids = Vec::new();
        let mut employee_names = Vec::new();
        for e in fixtures::employees(tenant) {
            let rec = ops.employees().create(&ctx, e).await?;
            employee_ids.push(rec.id);
            employee_names.push(rec.data.navn);
        }
        counts.employees = employee_ids.len();

        let register = fixtures::customers(tenant);
        let mut customer_ids = Vec::with_capacity(register.len());
        for c in register.iter().cloned() {
            customer_ids.push(ops.customers().create(&ctx, c).await?.id);
        }
        counts.customers = customer_ids.len();

        counts.workorders = ops
            .work_orders()
            .replace_all(&ctx, fixtures::work_orders(&customer_ids, &employee_ids, today))
            .await?;
        counts.internalorders = ops
            .internal_orders()
            .replace_all(&ctx, fixtures::internal_orders(&employee_ids, today))
            .await?;
        counts.products = ops.products().replace_all(&ctx, fixtures::products()).await?;
        counts.routes = ops
            .routes()
            .replace_all(&ctx, fixtures::routes(&register, today))
            .await?;

        counts.hms_records = hse
            .risk_assessments()
            .replace_all(&ctx, fixtures::risk_assessments(&employee_names, today))
            .await?
            + hse
                .incidents()
                .replace_all(&ctx, fixtures::incidents(today))
                .await?
            + hse
                .training()
                .replace_all(&ctx, fixtures::training(&employee_ids, today))
                .await?
            + hse
                .equipment()
                .replace_all(&ctx, fixtures::equipment(today))
                .await?;

        counts.services = economy.services().replace_all(&ctx, fixtures::services()).await?;
        counts.supplier_pricing = economy
            .supplier_pricing()
            .replace_all(&ctx, fixtures::supplier_pricing())
            .await?;

        info!(org = %org.id, name = tenant.name, "tenant seeded");
        Ok((org.id, counts))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn secret_must_match_exactly() {
        assert!(secret_matches(Some("let-me-seed"), Some("let-me-seed")));
        assert!(!secret_matches(Some("let-me-seed"), Some("let-me-seeD")));
        assert!(!secret_matches(Some("let-me-seed"), Some("let-me")));
        assert!(!secret_matches(Some("let-me-seed"), Some("")));
        assert!(!secret_matches(Some("let-me-seed"), None));
        assert!(!secret_matches(None, Some("anything")));
        assert!(!secret_matches(None, None));
    }
}
