// ABOUTME: User entity definition for SeaORM with UUID identity and Argon2 password hash
// ABOUTME: A user owns acronyms and holds the session tokens issued at login

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::acronym::Entity")]
    Acronyms,
    #[sea_orm(has_many = "super::token::Entity")]
    Tokens,
}

impl Related<super::acronym::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Acronyms.def()
    }
}

impl Related<super::token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tokens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
