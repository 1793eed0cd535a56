use super::UserRole;

/// Input for persisting a new account. `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub password_hash: String,
}
