pub use crate::entities::users::Role;

/// User data returned from the repository (without the password hash).
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

impl UserAccount {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
