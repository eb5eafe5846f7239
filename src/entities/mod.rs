// ABOUTME: SeaORM entities module for database models and relationships
// ABOUTME: Exports the user, acronym, category, pivot and token entity definitions

pub mod acronym;
pub mod acronym_category_pivot;
pub mod category;
pub mod token;
pub mod user;

pub use acronym::Entity as Acronym;
pub use acronym_category_pivot::Entity as AcronymCategoryPivot;
pub use category::Entity as Category;
pub use token::Entity as Token;
pub use user::Entity as User;
