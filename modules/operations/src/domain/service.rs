use fsm_db::{Collection, DocumentStore, Record};
use fsm_security::SecurityContext;
use fsm_sheets::SheetFormat;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dashboard::DashboardStats;
use super::error::DomainError;
use super::import::customers_from_sheet;
use super::model::{
    Customer, Employee, InternalOrder, InternalOrderFilter, NewRoute, Product, Route, WorkOrder,
    WorkOrderFilter,
};
use super::route_optimizer;
use crate::infra::images::{ImageStore, content_type_for};

/// MIME types accepted for product images.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Public path under which stored product images are served.
pub const IMAGE_URL_PREFIX: &str = "/api/uploads/products";

pub struct OperationsService {
    customers: Collection<Customer>,
    employees: Collection<Employee>,
    work_orders: Collection<WorkOrder>,
    internal_orders: Collection<InternalOrder>,
    products: Collection<Product>,
    routes: Collection<Route>,
    images: ImageStore,
}

/// Extension of the uploaded file name, `jpg` when absent or unusable.
fn image_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map_or_else(|| "jpg".to_owned(), str::to_ascii_lowercase)
}

impl OperationsService {
    #[must_use]
    pub fn new(store: DocumentStore, images: ImageStore) -> Self {
        Self {
            customers: Collection::new(store.clone()),
            employees: Collection::new(store.clone()),
            work_orders: Collection::new(store.clone()),
            internal_orders: Collection::new(store.clone()),
            products: Collection::new(store.clone()),
            routes: Collection::new(store),
            images,
        }
    }

    #[must_use]
    pub fn customers(&self) -> &Collection<Customer> {
        &self.customers
    }

    #[must_use]
    pub fn employees(&self) -> &Collection<Employee> {
        &self.employees
    }

    #[must_use]
    pub fn work_orders(&self) -> &Collection<WorkOrder> {
        &self.work_orders
    }

    #[must_use]
    pub fn internal_orders(&self) -> &Collection<InternalOrder> {
        &self.internal_orders
    }

    #[must_use]
    pub fn products(&self) -> &Collection<Product> {
        &self.products
    }

    #[must_use]
    pub fn routes(&self) -> &Collection<Route> {
        &self.routes
    }

    /// Customers of the caller's organization, optionally narrowed by a
    /// free-text search.
    ///
    /// # Errors
    /// `Internal` if the store cannot be read.
    pub async fn list_customers(
        &self,
        ctx: &SecurityContext,
        search: Option<&str>,
    ) -> Result<Vec<Record<Customer>>, DomainError> {
        let needle = search.map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase);
        let customers = match needle {
            Some(n) => self.customers.list_where(ctx, |c| c.matches(&n)).await?,
            None => self.customers.list(ctx).await?,
        };
        Ok(customers)
    }

    /// Replace the caller's customer register with the rows of a spreadsheet.
    ///
    /// The file is decoded completely before anything is written; the old
    /// register is swapped for the new one in a single transaction.
    ///
    /// # Errors
    /// `InvalidFileFormat` for anything but `.xlsx`/`.xls`, `ImportFailed`
    /// when the workbook cannot be read or stored.
    #[instrument(skip(self, ctx, bytes), fields(org_id = %ctx.organization_id(), size = bytes.len()))]
    pub async fn import_customers(
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
        let customers = customers_from_sheet(&sheet);
        let imported = self
            .customers
            .replace_all(ctx, customers)
            .await
            .map_err(|e| DomainError::ImportFailed(e.to_string()))?;
        info!(imported, "customer register imported");
        Ok(imported)
    }

    /// # Errors
    /// `Internal` if the store cannot be read.
    pub async fn list_work_orders(
        &self,
        ctx: &SecurityContext,
        filter: &WorkOrderFilter,
    ) -> Result<Vec<Record<WorkOrder>>, DomainError> {
        Ok(self.work_orders.list_where(ctx, |wo| filter.accepts(wo)).await?)
    }

    /// # Errors
    /// `Internal` if the store cannot be read.
    pub async fn list_internal_orders(
        &self,
        ctx: &SecurityContext,
        filter: &InternalOrderFilter,
    ) -> Result<Vec<Record<InternalOrder>>, DomainError> {
        Ok(self
            .internal_orders
            .list_where(ctx, |o| filter.accepts(o))
            .await?)
    }

    /// Products, optionally narrowed to one category (case-insensitive).
    ///
    /// # Errors
    /// `Internal` if the store cannot be read.
    pub async fn list_products(
        &self,
        ctx: &SecurityContext,
        kategori: Option<&str>,
    ) -> Result<Vec<Record<Product>>, DomainError> {
        let products = match kategori.filter(|k| !k.is_empty()) {
            Some(k) => {
                self.products
                    .list_where(ctx, |p| {
                        p.kategori.as_deref().is_some_and(|pk| pk.eq_ignore_ascii_case(k))
                    })
                    .await?
            }
            None => self.products.list(ctx).await?,
        };
        Ok(products)
    }

    /// Store an image for a product and point its `image_url` at it. A
    /// previous image stored under another extension is deleted.
    ///
    /// # Errors
    /// `NotFound`/`Forbidden` for the product, `InvalidImageType` for a
    /// content type outside [`ALLOWED_IMAGE_TYPES`].
    #[instrument(skip(self, ctx, bytes), fields(org_id = %ctx.organization_id(), size = bytes.len()))]
    pub async fn upload_product_image(
        &self,
        ctx: &SecurityContext,
        product_id: Uuid,
        filename: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, DomainError> {
        let product = self.products.get(ctx, product_id).await?;
        if !content_type.is_some_and(|ct| ALLOWED_IMAGE_TYPES.contains(&ct)) {
            return Err(DomainError::InvalidImageType);
        }

        let stored = format!("{product_id}.{}", image_extension(filename));
        self.images
            .save(&stored, bytes)
            .await
            .map_err(|e| anyhow::anyhow!("failed to store image {stored}: {e}"))?;

        let image_url = format!("{IMAGE_URL_PREFIX}/{stored}");
        let mut data = product.data;
        let previous = data.image_url.replace(image_url.clone());
        self.products.update(ctx, product_id, data).await?;
        info!(%image_url, "product image uploaded");

        let stale = previous
            .as_deref()
            .and_then(|url| url.strip_prefix(IMAGE_URL_PREFIX))
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|old| *old != stored);
        if let Some(old) = stale
            && let Err(e) = self.images.remove(old).await
        {
            warn!(error = %e, file = old, "failed to remove replaced image");
        }
        Ok(image_url)
    }

    /// Bytes and content type of a stored product image.
    ///
    /// # Errors
    /// `ImageNotFound` if no such file exists or the name is not a bare file
    /// name.
    pub async fn product_image(
        &self,
        filename: &str,
    ) -> Result<(mime::Mime, Vec<u8>), DomainError> {
        let bytes = self
            .images
            .load(filename)
            .await
            .map_err(|e| anyhow::anyhow!("failed to read image {filename}: {e}"))?
            .ok_or(DomainError::ImageNotFound)?;
        Ok((content_type_for(filename), bytes))
    }

    async fn optimized_route(
        &self,
        ctx: &SecurityContext,
        req: NewRoute,
    ) -> Result<Route, DomainError> {
        let customers: Vec<Customer> = self
            .customers
            .list(ctx)
            .await?
            .into_iter()
            .map(|r| r.data)
            .collect();
        let anleggsnr_list = route_optimizer::optimize(&customers, &req.anleggsnr_list);
        Ok(Route {
            date: req.date,
            anleggsnr_list,
            optimized: true,
        })
    }

    /// Create a route whose sites are put in visiting order.
    ///
    /// # Errors
    /// `Internal` on storage failures.
    #[instrument(skip(self, ctx, req), fields(org_id = %ctx.organization_id(), requested = req.anleggsnr_list.len()))]
    pub async fn create_route(
        &self,
        ctx: &SecurityContext,
        req: NewRoute,
    ) -> Result<Record<Route>, DomainError> {
        let route = self.optimized_route(ctx, req).await?;
        Ok(self.routes.create(ctx, route).await?)
    }

    /// Replace a route's date and sites, re-running the optimizer.
    ///
    /// # Errors
    /// `NotFound`/`Forbidden` for the route, `Internal` on storage failures.
    pub async fn update_route(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        req: NewRoute,
    ) -> Result<Record<Route>, DomainError> {
        self.routes.get(ctx, id).await?;
        let route = self.optimized_route(ctx, req).await?;
        Ok(self.routes.update(ctx, id, route).await?)
    }

    /// # Errors
    /// `Internal` if the store cannot be read.
    pub async fn dashboard(&self, ctx: &SecurityContext) -> Result<DashboardStats, DomainError> {
        let total_customers = self.customers.count(ctx).await?;
        let total_products = self.products.count(ctx).await?;
        let work_orders = self.work_orders.list(ctx).await?;
        Ok(DashboardStats::from_work_orders(
            work_orders.iter().map(|r| &r.data),
            total_customers,
            total_products,
        ))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn image_extension_falls_back_to_jpg() {
        assert_eq!(image_extension("photo.PNG"), "png");
        assert_eq!(image_extension("photo"), "jpg");
        assert_eq!(image_extension("photo."), "jpg");
        assert_eq!(image_extension("x./../../etc"), "jpg");
        assert_eq!(image_extension("archive.tar.webp"), "webp");
    }
}
