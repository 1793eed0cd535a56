//! Password hashing and session token signing

pub mod jwt;
pub mod password;

pub use jwt::{create_session_token, verify_session_token, SessionClaims, SessionTokenConfig};
pub use password::{hash_password, hash_password_with_cost, verify_password};
