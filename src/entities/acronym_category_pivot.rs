// ABOUTME: Join entity recording one acronym/category association
// ABOUTME: Row ids grow with each attachment, which gives listings their attachment order

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "acronym_category_pivot")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[serde(rename = "acronymID")]
    pub acronym_id: i32,
    #[serde(rename = "categoryID")]
    pub category_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::acronym::Entity",
        from = "Column::AcronymId",
        to = "super::acronym::Column::Id",
        on_delete = "Cascade"
    )]
    Acronym,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::acronym::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Acronym.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
