// ABOUTME: SQLite storage layer for users, acronyms, categories and session tokens
// ABOUTME: Handles connection setup, migrations and the create/read/update/delete operations

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, Unchanged,
};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use crate::entities::{
    acronym, acronym_category_pivot, category, token, user, Acronym, AcronymCategoryPivot,
    Category, Token, User,
};
use crate::error::{AppError, Result};
use crate::migration::Migrator;
use crate::types::AcronymPayload;

mod queries;
mod relations;

pub struct Storage {
    pub db: DatabaseConnection,
}

impl Storage {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let db = Database::connect(database_url).await?;
        Migrator::up(&db, None).await?;

        tracing::info!("Database ready at {}", database_url);
        Ok(Self { db })
    }

    // Users

    pub async fn create_user(
        &self,
        name: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<user::Model> {
        let user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        user.insert(&self.db).await.map_err(|err| {
            AppError::conflict_on_unique(err, format!("Username {username} is already taken"))
        })
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<user::Model> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<user::Model> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {username} not found")))
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>> {
        Ok(User::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await?)
    }

    /// An acronym's owner must exist when it is written; a dangling id is the caller's mistake.
    async fn ensure_owner_exists(&self, user_id: Uuid) -> Result<()> {
        match self.get_user(user_id).await {
            Ok(_) => Ok(()),
            Err(AppError::NotFound(_)) => Err(AppError::BadRequest(format!(
                "userID {user_id} does not refer to an existing user"
            ))),
            Err(err) => Err(err),
        }
    }

    // Acronyms

    pub async fn create_acronym(&self, payload: &AcronymPayload) -> Result<acronym::Model> {
        payload.validate()?;
        self.ensure_owner_exists(payload.user_id).await?;

        let acronym = acronym::ActiveModel {
            short: Set(payload.short.clone()),
            long: Set(payload.long.clone()),
            user_id: Set(payload.user_id),
            ..Default::default()
        };

        Ok(acronym.insert(&self.db).await?)
    }

    pub async fn get_acronym(&self, acronym_id: i32) -> Result<acronym::Model> {
        Acronym::find_by_id(acronym_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Acronym {acronym_id} not found")))
    }

    /// Replaces short, long and owner in one write. Partial updates are not supported.
    pub async fn update_acronym(
        &self,
        acronym_id: i32,
        payload: &AcronymPayload,
    ) -> Result<acronym::Model> {
        payload.validate()?;
        self.ensure_owner_exists(payload.user_id).await?;

        let acronym = acronym::ActiveModel {
            id: Unchanged(acronym_id),
            short: Set(payload.short.clone()),
            long: Set(payload.long.clone()),
            user_id: Set(payload.user_id),
        };

        acronym.update(&self.db).await.map_err(|err| match err {
            DbErr::RecordNotUpdated => {
                AppError::NotFound(format!("Acronym {acronym_id} not found"))
            }
            err => AppError::Database(err),
        })
    }

    /// Removes the acronym together with its category links.
    pub async fn delete_acronym(&self, acronym_id: i32) -> Result<()> {
        self.get_acronym(acronym_id).await?;

        let txn = self.db.begin().await?;

        AcronymCategoryPivot::delete_many()
            .filter(acronym_category_pivot::Column::AcronymId.eq(acronym_id))
            .exec(&txn)
            .await?;

        Acronym::delete_by_id(acronym_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    // Categories

    pub async fn create_category(&self, name: &str) -> Result<category::Model> {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be empty".to_string()));
        }

        let category = category::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        category.insert(&self.db).await.map_err(|err| {
            AppError::conflict_on_unique(err, format!("Category {name} already exists"))
        })
    }

    pub async fn get_category(&self, category_id: i32) -> Result<category::Model> {
        Category::find_by_id(category_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {category_id} not found")))
    }

    pub async fn list_categories(&self) -> Result<Vec<category::Model>> {
        Ok(Category::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?)
    }

    // Tokens

    pub async fn store_token(&self, user_id: Uuid, value: &str) -> Result<token::Model> {
        let token = token::ActiveModel {
            id: Set(Uuid::new_v4()),
            value: Set(value.to_string()),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        Ok(token.insert(&self.db).await?)
    }

    pub async fn find_token(&self, value: &str) -> Result<Option<token::Model>> {
        Ok(Token::find()
            .filter(token::Column::Value.eq(value))
            .one(&self.db)
            .await?)
    }

    pub async fn remove_token(&self, value: &str) -> Result<()> {
        Token::delete_many()
            .filter(token::Column::Value.eq(value))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// Deletes tokens older than `max_age_secs` and returns how many were dropped.
    pub async fn purge_expired_tokens(&self, max_age_secs: i64) -> Result<u64> {
        let cutoff = chrono::Utc::now().timestamp() - max_age_secs;

        let result = Token::delete_many()
            .filter(token::Column::CreatedAt.lte(cutoff))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
