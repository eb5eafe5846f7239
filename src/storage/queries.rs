// ABOUTME: Read-side queries over the acronym collection: list, search, first and sorted
// ABOUTME: Search treats the term as a literal substring of either the short or long form

use sea_orm::{
    sea_query::LikeExpr, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder,
};

use super::Storage;
use crate::entities::{acronym, Acronym};
use crate::error::{AppError, Result};

const LIKE_ESCAPE: char = '!';

/// Wraps `term` in `%` wildcards, escaping any LIKE metacharacters it contains.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl Storage {
    /// All acronyms in insertion order.
    pub async fn list_acronyms(&self) -> Result<Vec<acronym::Model>> {
        Ok(Acronym::find()
            .order_by_asc(acronym::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Acronyms whose short or long form contains `term`. ASCII letters match
    /// case-insensitively, following SQLite's LIKE.
    pub async fn search_acronyms(&self, term: &str) -> Result<Vec<acronym::Model>> {
        let pattern = like_pattern(term);

        Ok(Acronym::find()
            .filter(
                Condition::any()
                    .add(acronym::Column::Short.like(LikeExpr::new(&pattern).escape(LIKE_ESCAPE)))
                    .add(acronym::Column::Long.like(LikeExpr::new(&pattern).escape(LIKE_ESCAPE))),
            )
            .order_by_asc(acronym::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn first_acronym(&self) -> Result<acronym::Model> {
        Acronym::find()
            .order_by_asc(acronym::Column::Id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("No acronyms exist yet".to_string()))
    }

    /// All acronyms ordered by short form, ties broken by insertion order.
    pub async fn sorted_acronyms(&self) -> Result<Vec<acronym::Model>> {
        Ok(Acronym::find()
            .order_by_asc(acronym::Column::Short)
            .order_by_asc(acronym::Column::Id)
            .all(&self.db)
            .await?)
    }
}
