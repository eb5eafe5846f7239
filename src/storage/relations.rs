// ABOUTME: Relationship operations linking acronyms to categories and to their owning users
// ABOUTME: Category links are idempotent and listings follow the order links were made

use sea_orm::{sea_query::OnConflict, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::Storage;
use crate::entities::{
    acronym, acronym_category_pivot, category, user, Acronym, AcronymCategoryPivot, Category,
    User,
};
use crate::error::{AppError, Result};

impl Storage {
    /// Links a category to an acronym. Linking a pair that is already linked
    /// returns the existing link instead of creating a second one.
    pub async fn attach_category(
        &self,
        acronym_id: i32,
        category_id: i32,
    ) -> Result<acronym_category_pivot::Model> {
        self.get_acronym(acronym_id).await?;
        self.get_category(category_id).await?;

        let link = acronym_category_pivot::ActiveModel {
            acronym_id: Set(acronym_id),
            category_id: Set(category_id),
            ..Default::default()
        };

        // Concurrent attaches of the same pair race on the unique index; the loser inserts nothing
        let inserted = AcronymCategoryPivot::insert(link)
            .on_conflict(
                OnConflict::columns([
                    acronym_category_pivot::Column::AcronymId,
                    acronym_category_pivot::Column::CategoryId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        if inserted == 0 {
            tracing::debug!(acronym_id, category_id, "category already attached");
        }

        self.find_link(acronym_id, category_id).await?.ok_or_else(|| {
            AppError::Internal(format!(
                "Link between acronym {acronym_id} and category {category_id} vanished after insert"
            ))
        })
    }

    /// Unlinks a category from an acronym. Unlinking a pair that was never linked is a no-op.
    pub async fn detach_category(&self, acronym_id: i32, category_id: i32) -> Result<()> {
        self.get_acronym(acronym_id).await?;
        self.get_category(category_id).await?;

        AcronymCategoryPivot::delete_many()
            .filter(acronym_category_pivot::Column::AcronymId.eq(acronym_id))
            .filter(acronym_category_pivot::Column::CategoryId.eq(category_id))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    async fn find_link(
        &self,
        acronym_id: i32,
        category_id: i32,
    ) -> Result<Option<acronym_category_pivot::Model>> {
        Ok(AcronymCategoryPivot::find()
            .filter(acronym_category_pivot::Column::AcronymId.eq(acronym_id))
            .filter(acronym_category_pivot::Column::CategoryId.eq(category_id))
            .one(&self.db)
            .await?)
    }

    pub async fn acronym_categories(&self, acronym_id: i32) -> Result<Vec<category::Model>> {
        self.get_acronym(acronym_id).await?;

        Ok(Category::find()
            .inner_join(AcronymCategoryPivot)
            .filter(acronym_category_pivot::Column::AcronymId.eq(acronym_id))
            .order_by_asc(acronym_category_pivot::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn category_acronyms(&self, category_id: i32) -> Result<Vec<acronym::Model>> {
        self.get_category(category_id).await?;

        Ok(Acronym::find()
            .inner_join(AcronymCategoryPivot)
            .filter(acronym_category_pivot::Column::CategoryId.eq(category_id))
            .order_by_asc(acronym_category_pivot::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn acronym_owner(&self, acronym_id: i32) -> Result<user::Model> {
        let acronym = self.get_acronym(acronym_id).await?;

        User::find_by_id(acronym.user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Owner {} of acronym {acronym_id} no longer exists",
                    acronym.user_id
                ))
            })
    }

    pub async fn user_acronyms(&self, user_id: Uuid) -> Result<Vec<acronym::Model>> {
        self.get_user(user_id).await?;

        Ok(Acronym::find()
            .filter(acronym::Column::UserId.eq(user_id))
            .order_by_asc(acronym::Column::Id)
            .all(&self.db)
            .await?)
    }
}
