pub use super::cafes::Entity as Cafes;
pub use super::users::Entity as Users;
