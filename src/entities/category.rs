// ABOUTME: Category entity, a uniquely named tag applied to acronyms through the pivot table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::acronym_category_pivot::Entity")]
    AcronymLinks,
}

impl Related<super::acronym_category_pivot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AcronymLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
