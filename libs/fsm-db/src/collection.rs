//! Typed, tenant-scoped CRUD over one document collection.
//!
//! Contract shared by every entity repository:
//! - `create` binds the record to the caller's organization
//! - `list` only ever sees the caller's organization
//! - `get`/`update`/`delete` fetch by id first (404 if absent), then apply
//!   the tenant guard (403 if foreign)
//! - `update` is a full replace that keeps id, organization and creation time

use std::marker::PhantomData;

use fsm_security::{AccessError, SecurityContext};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::document::{DocumentStore, entity};
use crate::error::DbError;

/// An entity stored as a document.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection discriminator in the `documents` table.
    const COLLECTION: &'static str;
    /// Human name used in messages, e.g. `"Customer"`.
    const LABEL: &'static str;
}

/// A stored entity together with its server-assigned envelope.
///
/// Serializes flat: `{"id", "organization_id", "created_at", ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: Uuid,
    pub organization_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(flatten)]
    pub data: T,
}

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sea_orm::DbErr> for RepoError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Db(DbError::Sea(e))
    }
}

pub struct Collection<T> {
    store: DocumentStore,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    #[must_use]
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    fn decode(model: entity::Model) -> Result<Record<T>, RepoError> {
        let data: T = serde_json::from_str(&model.body).map_err(DbError::from)?;
        Ok(Record {
            id: model.id,
            organization_id: model.organization_id,
            created_at: model.created_at,
            data,
        })
    }

    fn encode(organization_id: Uuid, data: &T) -> Result<entity::Model, RepoError> {
        Ok(entity::Model {
            id: Uuid::new_v4(),
            collection: T::COLLECTION.to_owned(),
            organization_id,
            created_at: OffsetDateTime::now_utc(),
            body: serde_json::to_string(data).map_err(DbError::from)?,
        })
    }

    /// # Errors
    /// Returns `RepoError::Db` if the insert fails.
    #[instrument(skip_all, fields(collection = T::COLLECTION, org = %ctx.organization_id()))]
    pub async fn create(&self, ctx: &SecurityContext, data: T) -> Result<Record<T>, RepoError> {
        let model = Self::encode(ctx.organization_id(), &data)?;
        let stored = self.store.insert(model).await?;
        debug!(id = %stored.id, "record created");
        Ok(Record {
            id: stored.id,
            organization_id: stored.organization_id,
            created_at: stored.created_at,
            data,
        })
    }

    /// Every record of the caller's organization, oldest first.
    ///
    /// # Errors
    /// Returns `RepoError::Db` if the query fails or a stored body is corrupt.
    pub async fn list(&self, ctx: &SecurityContext) -> Result<Vec<Record<T>>, RepoError> {
        self.store
            .list(T::COLLECTION, ctx.organization_id())
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    /// Records of the caller's organization matching `pred`, oldest first.
    ///
    /// # Errors
    /// Same as [`Collection::list`].
    pub async fn list_where<F>(
        &self,
        ctx: &SecurityContext,
        pred: F,
    ) -> Result<Vec<Record<T>>, RepoError>
    where
        F: Fn(&T) -> bool + Send,
    {
        let mut all = self.list(ctx).await?;
        all.retain(|r| pred(&r.data));
        Ok(all)
    }

    /// Oldest record of the caller's organization matching `pred`.
    ///
    /// # Errors
    /// Same as [`Collection::list`].
    pub async fn find_first<F>(
        &self,
        ctx: &SecurityContext,
        pred: F,
    ) -> Result<Option<Record<T>>, RepoError>
    where
        F: Fn(&T) -> bool + Send,
    {
        Ok(self.list(ctx).await?.into_iter().find(|r| pred(&r.data)))
    }

    /// # Errors
    /// Returns `RepoError::Db` if the query fails.
    pub async fn count(&self, ctx: &SecurityContext) -> Result<u64, RepoError> {
        Ok(self
            .store
            .count(T::COLLECTION, ctx.organization_id())
            .await?)
    }

    /// # Errors
    /// `NotFound` if no record has this id, `Forbidden` if it belongs to
    /// another organization.
    pub async fn get(&self, ctx: &SecurityContext, id: Uuid) -> Result<Record<T>, RepoError> {
        let model = self
            .store
            .find(T::COLLECTION, id)
            .await?
            .ok_or(RepoError::NotFound(T::LABEL))?;
        ctx.ensure_owns(model.organization_id)?;
        Self::decode(model)
    }

    /// Full replace of the entity fields.
    ///
    /// # Errors
    /// `NotFound`/`Forbidden` as for [`Collection::get`]; `NotFound` also when
    /// the record disappears between the check and the write.
    #[instrument(skip_all, fields(collection = T::COLLECTION, %id))]
    pub async fn update(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        data: T,
    ) -> Result<Record<T>, RepoError> {
        let existing = self.get(ctx, id).await?;
        let body = serde_json::to_string(&data).map_err(DbError::from)?;
        if !self.store.replace_body(T::COLLECTION, id, body).await? {
            return Err(RepoError::NotFound(T::LABEL));
        }
        debug!("record replaced");
        Ok(Record { data, ..existing })
    }

    /// # Errors
    /// `NotFound`/`Forbidden` as for [`Collection::get`].
    #[instrument(skip_all, fields(collection = T::COLLECTION, %id))]
    pub async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), RepoError> {
        let model = self
            .store
            .find(T::COLLECTION, id)
            .await?
            .ok_or(RepoError::NotFound(T::LABEL))?;
        ctx.ensure_owns(model.organization_id)?;
        if !self.store.delete(T::COLLECTION, id).await? {
            return Err(RepoError::NotFound(T::LABEL));
        }
        debug!("record deleted");
        Ok(())
    }

    /// Replace the caller's whole collection with `items` in one transaction.
    ///
    /// # Errors
    /// Returns `RepoError::Db` if encoding or any statement fails; nothing is
    /// changed in that case.
    #[instrument(skip_all, fields(collection = T::COLLECTION, org = %ctx.organization_id(), count = items.len()))]
    pub async fn replace_all(
        &self,
        ctx: &SecurityContext,
        items: Vec<T>,
    ) -> Result<usize, RepoError> {
        let org = ctx.organization_id();
        let models = items
            .iter()
            .map(|item| Self::encode(org, item))
            .collect::<Result<Vec<_>, _>>()?;
        let inserted = models.len();
        let removed = self
            .store
            .replace_collection(T::COLLECTION, org, models)
            .await?;
        debug!(removed, inserted, "collection replaced");
        Ok(inserted)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use fsm_security::Role;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
        #[serde(default)]
        pinned: bool,
    }

    impl Document for Note {
        const COLLECTION: &'static str = "notes";
        const LABEL: &'static str = "Note";
    }

    fn note(text: &str) -> Note {
        Note {
            text: text.to_owned(),
            pinned: false,
        }
    }

    async fn notes() -> Collection<Note> {
        let db = crate::connect_in_memory().await.unwrap();
        Collection::new(DocumentStore::new(db))
    }

    fn ctx() -> SecurityContext {
        SecurityContext::new(Uuid::new_v4(), Uuid::new_v4(), Role::User)
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let coll = notes().await;
        let me = ctx();

        let created = coll.create(&me, note("hello")).await.unwrap();
        assert_eq!(created.organization_id, me.organization_id());

        let fetched = coll.get(&me, created.id).await.unwrap();
        assert_eq!(fetched.data, note("hello"));
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn foreign_records_are_forbidden_missing_are_not_found() {
        let coll = notes().await;
        let (owner, other) = (ctx(), ctx());
        let rec = coll.create(&owner, note("secret")).await.unwrap();

        assert!(matches!(
            coll.get(&other, rec.id).await,
            Err(RepoError::Forbidden(_))
        ));
        assert!(matches!(
            coll.update(&other, rec.id, note("pwned")).await,
            Err(RepoError::Forbidden(_))
        ));
        assert!(matches!(
            coll.delete(&other, rec.id).await,
            Err(RepoError::Forbidden(_))
        ));
        assert!(matches!(
            coll.get(&other, Uuid::new_v4()).await,
            Err(RepoError::NotFound("Note"))
        ));

        assert!(coll.list(&other).await.unwrap().is_empty());
        assert_eq!(coll.get(&owner, rec.id).await.unwrap().data.text, "secret");
    }

    #[tokio::test]
    async fn update_keeps_envelope() {
        let coll = notes().await;
        let me = ctx();
        let rec = coll.create(&me, note("v1")).await.unwrap();

        let updated = coll
            .update(
                &me,
                rec.id,
                Note {
                    text: "v2".to_owned(),
                    pinned: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, rec.id);
        assert_eq!(updated.created_at, rec.created_at);

        let fetched = coll.get(&me, rec.id).await.unwrap();
        assert_eq!(fetched.data.text, "v2");
        assert!(fetched.data.pinned);
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let coll = notes().await;
        let me = ctx();
        let rec = coll.create(&me, note("x")).await.unwrap();

        coll.delete(&me, rec.id).await.unwrap();
        assert!(matches!(
            coll.delete(&me, rec.id).await,
            Err(RepoError::NotFound(_))
        ));
        assert!(matches!(
            coll.update(&me, rec.id, note("y")).await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn replace_all_swaps_only_callers_records() {
        let coll = notes().await;
        let (me, other) = (ctx(), ctx());
        for i in 0..3 {
            coll.create(&me, note(&format!("old {i}"))).await.unwrap();
        }
        coll.create(&other, note("theirs")).await.unwrap();

        let n = coll
            .replace_all(&me, vec![note("new a"), note("new b")])
            .await
            .unwrap();
        assert_eq!(n, 2);

        let mine = coll.list(&me).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.data.text.starts_with("new")));
        assert_eq!(coll.count(&other).await.unwrap(), 1);
    }

    #[test]
    fn record_serializes_flat() {
        let rec = Record {
            id: Uuid::nil(),
            organization_id: Uuid::nil(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            data: note("flat"),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["text"], "flat");
        assert_eq!(json["created_at"], "1970-01-01T00:00:00Z");
        assert!(json.get("data").is_none());
    }
}
