// ABOUTME: Acronym entity pairing a short form with its long form, owned by one user
// ABOUTME: Serializes directly as the API's acronym shape with a camel-cased owner field

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "acronyms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub short: String,
    pub long: String,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::acronym_category_pivot::Entity")]
    CategoryLinks,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::acronym_category_pivot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CategoryLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
