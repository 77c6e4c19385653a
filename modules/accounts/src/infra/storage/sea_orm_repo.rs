use async_trait::async_trait;
use fsm_db::Db;
use fsm_security::Role;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, SqlErr, TransactionTrait, sea_query::Expr,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::model::{Credentials, Organization, User};
use crate::domain::repo::AccountsRepository;

use super::entity::{organization, user};

pub struct SeaOrmAccountsRepository {
    db: Db,
}

impl SeaOrmAccountsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

fn org_to_model(org: &Organization) -> anyhow::Result<organization::Model> {
    Ok(organization::Model {
        id: org.id,
        name: org.name.clone(),
        subscription_tier: org.subscription_tier.as_str().to_owned(),
        trial_expires_at: org.trial_expires_at,
        settings: serde_json::to_string(&org.settings)?,
        created_at: org.created_at,
    })
}

fn org_from_model(m: organization::Model) -> anyhow::Result<Organization> {
    let settings: Map<String, Value> = match serde_json::from_str(&m.settings)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Ok(Organization {
        id: m.id,
        name: m.name,
        subscription_tier: m.subscription_tier.parse()?,
        trial_expires_at: m.trial_expires_at,
        settings,
        created_at: m.created_at,
    })
}

fn user_from_model(m: user::Model) -> anyhow::Result<Credentials> {
    Ok(Credentials {
        user: User {
            id: m.id,
            email: m.email,
            name: m.name,
            role: m.role.parse()?,
            organization_id: m.organization_id,
            created_at: m.created_at,
        },
        password_hash: m.password_hash,
    })
}

fn user_active_model(u: &User, password_hash: &str) -> user::ActiveModel {
    user::ActiveModel {
        id: ActiveValue::Set(u.id),
        email: ActiveValue::Set(u.email.clone()),
        name: ActiveValue::Set(u.name.clone()),
        role: ActiveValue::Set(u.role.as_str().to_owned()),
        organization_id: ActiveValue::Set(u.organization_id),
        password_hash: ActiveValue::Set(password_hash.to_owned()),
        created_at: ActiveValue::Set(u.created_at),
    }
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl AccountsRepository for SeaOrmAccountsRepository {
    async fn insert_user(
        &self,
        organization: Option<&Organization>,
        user: &User,
        password_hash: &str,
    ) -> anyhow::Result<bool> {
        let txn = self.db.conn().begin().await?;
        if let Some(org) = organization {
            let am: organization::ActiveModel = org_to_model(org)?.into();
            organization::Entity::insert(am).exec(&txn).await?;
        }
        match user::Entity::insert(user_active_model(user, password_hash))
            .exec(&txn)
            .await
        {
            Ok(_) => {
                txn.commit().await?;
                Ok(true)
            }
            Err(e) if is_unique_violation(&e) => {
                txn.rollback().await?;
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn insert_organization(&self, org: &Organization) -> anyhow::Result<()> {
        let am: organization::ActiveModel = org_to_model(org)?.into();
        organization::Entity::insert(am).exec(self.db.conn()).await?;
        Ok(())
    }

    async fn find_organization(&self, id: Uuid) -> anyhow::Result<Option<Organization>> {
        organization::Entity::find_by_id(id)
            .one(self.db.conn())
            .await?
            .map(org_from_model)
            .transpose()
    }

    async fn update_organization(&self, org: &Organization) -> anyhow::Result<()> {
        let am = organization::ActiveModel {
            id: ActiveValue::Unchanged(org.id),
            name: ActiveValue::Set(org.name.clone()),
            settings: ActiveValue::Set(serde_json::to_string(&org.settings)?),
            ..<organization::ActiveModel as ActiveModelTrait>::default()
        };
        am.update(self.db.conn()).await?;
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(user::Entity::find_by_id(id)
            .one(self.db.conn())
            .await?
            .map(user_from_model)
            .transpose()?
            .map(|c| c.user))
    }

    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<Credentials>> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.conn())
            .await?
            .map(user_from_model)
            .transpose()
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        let n = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(self.db.conn())
            .await?;
        Ok(n > 0)
    }

    async fn list_users(&self, organization_id: Uuid) -> anyhow::Result<Vec<User>> {
        user::Entity::find()
            .filter(user::Column::OrganizationId.eq(organization_id))
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .all(self.db.conn())
            .await?
            .into_iter()
            .map(|m| user_from_model(m).map(|c| c.user))
            .collect()
    }

    async fn update_role(&self, id: Uuid, role: Role) -> anyhow::Result<bool> {
        let res = user::Entity::update_many()
            .col_expr(user::Column::Role, Expr::value(role.as_str()))
            .filter(user::Column::Id.eq(id))
            .exec(self.db.conn())
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = user::Entity::delete_by_id(id).exec(self.db.conn()).await?;
        Ok(res.rows_affected > 0)
    }

    async fn purge(&self) -> anyhow::Result<()> {
        let txn = self.db.conn().begin().await?;
        user::Entity::delete_many().exec(&txn).await?;
        organization::Entity::delete_many().exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }
}
