use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use super::entity::{self, Entity as Documents};
use crate::{Db, DbError};

/// Rows per INSERT statement when bulk loading.
const INSERT_CHUNK: usize = 500;

/// Raw access to the `documents` table.
///
/// Lookups by id are deliberately unscoped: callers apply the tenant guard so
/// that "absent" and "foreign" stay distinguishable.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    db: Db,
}

impl DocumentStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// # Errors
    /// Returns `DbError` if the statement fails.
    pub async fn insert(&self, model: entity::Model) -> Result<entity::Model, DbError> {
        let active: entity::ActiveModel = model.into();
        Ok(active.insert(self.db.conn()).await?)
    }

    /// # Errors
    /// Returns `DbError` if the statement fails.
    pub async fn find(&self, collection: &str, id: Uuid) -> Result<Option<entity::Model>, DbError> {
        Ok(Documents::find_by_id(id)
            .filter(entity::Column::Collection.eq(collection))
            .one(self.db.conn())
            .await?)
    }

    /// All documents of `collection` owned by `organization_id`, oldest first.
    ///
    /// # Errors
    /// Returns `DbError` if the statement fails.
    pub async fn list(
        &self,
        collection: &str,
        organization_id: Uuid,
    ) -> Result<Vec<entity::Model>, DbError> {
        Ok(Documents::find()
            .filter(entity::Column::Collection.eq(collection))
            .filter(entity::Column::OrganizationId.eq(organization_id))
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .all(self.db.conn())
            .await?)
    }

    /// # Errors
    /// Returns `DbError` if the statement fails.
    pub async fn count(&self, collection: &str, organization_id: Uuid) -> Result<u64, DbError> {
        Ok(Documents::find()
            .filter(entity::Column::Collection.eq(collection))
            .filter(entity::Column::OrganizationId.eq(organization_id))
            .count(self.db.conn())
            .await?)
    }

    /// Overwrite the body of one document. Returns `false` if it no longer exists.
    ///
    /// # Errors
    /// Returns `DbError` if the statement fails.
    pub async fn replace_body(
        &self,
        collection: &str,
        id: Uuid,
        body: String,
    ) -> Result<bool, DbError> {
        let res = Documents::update_many()
            .col_expr(entity::Column::Body, sea_orm::sea_query::Expr::value(body))
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::Collection.eq(collection))
            .exec(self.db.conn())
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Returns `false` if nothing was deleted.
    ///
    /// # Errors
    /// Returns `DbError` if the statement fails.
    pub async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, DbError> {
        let res = Documents::delete_many()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::Collection.eq(collection))
            .exec(self.db.conn())
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Atomically swap an organization's whole collection for `models`.
    ///
    /// Returns the number of rows removed.
    ///
    /// # Errors
    /// Returns `DbError` if the statement fails.
    pub async fn replace_collection(
        &self,
        collection: &str,
        organization_id: Uuid,
        models: Vec<entity::Model>,
    ) -> Result<u64, DbError> {
        let txn = self.db.conn().begin().await?;

        let removed = Documents::delete_many()
            .filter(entity::Column::Collection.eq(collection))
            .filter(entity::Column::OrganizationId.eq(organization_id))
            .exec(&txn)
            .await?
            .rows_affected;

        let inserted = models.len();
        let mut rows = models.into_iter().map(entity::ActiveModel::from).peekable();
        while rows.peek().is_some() {
            let chunk: Vec<_> = rows.by_ref().take(INSERT_CHUNK).collect();
            Documents::insert_many(chunk).exec(&txn).await?;
        }

        txn.commit().await?;
        debug!(collection, %organization_id, removed, inserted, "collection replaced");
        Ok(removed)
    }

    /// Delete every document of every organization.
    ///
    /// # Errors
    /// Returns `DbError` if the statement fails.
    pub async fn purge(&self) -> Result<u64, DbError> {
        Ok(Documents::delete_many()
            .exec(self.db.conn())
            .await?
            .rows_affected)
    }
}
