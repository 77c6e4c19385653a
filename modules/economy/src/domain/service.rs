use fsm_db::{Collection, DocumentStore, Record};
use fsm_security::SecurityContext;
use fsm_sheets::SheetFormat;
use operations::Customer;
use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::error::DomainError;
use super::import::services_from_sheet;
use super::model::{Payout, Service, SupplierPricing};

/// Result of pricing a customer site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServicePricing {
    pub customer: Record<Customer>,
    pub service: Option<Record<Service>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typenr: Option<String>,
    pub message: String,
}

pub struct EconomyService {
    payouts: Collection<Payout>,
    services: Collection<Service>,
    supplier_pricing: Collection<SupplierPricing>,
    customers: Collection<Customer>,
}

impl EconomyService {
    #[must_use]
    pub fn new(store: DocumentStore) -> Self {
        Self {
            payouts: Collection::new(store.clone()),
            services: Collection::new(store.clone()),
            supplier_pricing: Collection::new(store.clone()),
            customers: Collection::new(store),
        }
    }

    #[must_use]
    pub fn payouts(&self) -> &Collection<Payout> {
        &self.payouts
    }

    #[must_use]
    pub fn services(&self) -> &Collection<Service> {
        &self.services
    }

    #[must_use]
    pub fn supplier_pricing(&self) -> &Collection<SupplierPricing> {
        &self.supplier_pricing
    }

    /// Replace the caller's price list with the rows of a spreadsheet.
    ///
    /// # Errors
    /// `InvalidFileFormat` for anything but `.xlsx`/`.xls`, `ImportFailed`
    /// when the workbook cannot be read or stored.
    #[instrument(skip(self, ctx, bytes), fields(org_id = %ctx.organization_id(), size = bytes.len()))]
    pub async fn import_services(
        &self,
        ctx: &SecurityContext,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<usize, DomainError> {
        if SheetFormat::from_filename(filename).is_none() {
            return Err(DomainError::InvalidFileFormat);
        }
        let sheet = fsm_sheets::read_first_sheet(bytes)
            .await
            .map_err(|e| DomainError::ImportFailed(e.to_string()))?;
        let services = services_from_sheet(&sheet);
        let imported = self
            .services
            .replace_all(ctx, services)
            .await
            .map_err(|e| DomainError::ImportFailed(e.to_string()))?;
        info!(imported, "service price list imported");
        Ok(imported)
    }

    /// Store a supplier price, stamping `updated_at`.
    ///
    /// # Errors
    /// `Internal` on storage failures.
    pub async fn create_supplier_pricing(
        &self,
        ctx: &SecurityContext,
        pricing: SupplierPricing,
    ) -> Result<Record<SupplierPricing>, DomainError> {
        Ok(self.supplier_pricing.create(ctx, pricing.touched()).await?)
    }

    /// Replace a supplier price, stamping `updated_at`.
    ///
    /// # Errors
    /// `NotFound`/`Forbidden` for the record, `Internal` on storage failures.
    pub async fn update_supplier_pricing(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        pricing: SupplierPricing,
    ) -> Result<Record<SupplierPricing>, DomainError> {
        Ok(self
            .supplier_pricing
            .update(ctx, id, pricing.touched())
            .await?)
    }

    /// Find the customer with this site id and the price list entry for its
    /// service type (`typenr`, falling back to `tjeneste_nr`).
    ///
    /// A missing service type or price list entry is reported in the
    /// message, not as an error.
    ///
    /// # Errors
    /// `NotFound("Customer")` if no customer of the caller has this site id.
    #[instrument(skip(self, ctx), fields(org_id = %ctx.organization_id()))]
    pub async fn service_pricing(
        &self,
        ctx: &SecurityContext,
        anleggsnr: &str,
    ) -> Result<ServicePricing, DomainError> {
        let customer = self
            .customers
            .find_first(ctx, |c| c.anleggsnr == anleggsnr)
            .await?
            .ok_or(DomainError::NotFound("Customer"))?;

        let service_nr = [&customer.data.typenr, &customer.data.tjeneste_nr]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_owned);
        let Some(service_nr) = service_nr else {
            return Ok(ServicePricing {
                customer,
                service: None,
                typenr: None,
                message: "No service type (typenr) assigned to customer".to_owned(),
            });
        };

        let service = self
            .services
            .find_first(ctx, |s| s.tjenestenr == service_nr)
            .await?;
        debug!(%service_nr, found = service.is_some(), "service lookup");
        let pricing = match service {
            Some(service) => ServicePricing {
                customer,
                service: Some(service),
                typenr: Some(service_nr),
                message: "Service pricing found".to_owned(),
            },
            None => ServicePricing {
                customer,
                service: None,
                typenr: None,
                message: format!("Service with tjenestenr {service_nr} not found"),
            },
        };
        Ok(pricing)
    }
}
