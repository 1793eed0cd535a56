//! User domain entity

use chrono::{DateTime, Utc};

/// User role
///
/// `Admin` is the privileged role that may see the dashboard and register
/// accounts; every other account is a marketplace vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserRole {
    Admin,
    #[default]
    Vendor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Vendor => "vendor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "vendor" => Some(Self::Vendor),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Vendor => "Vendor",
        }
    }

    pub fn all() -> [UserRole; 2] {
        [Self::Admin, Self::Vendor]
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_vendor(&self) -> bool {
        self.role == UserRole::Vendor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_roundtrip() {
        for role in UserRole::all() {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(UserRole::parse(" ADMIN "), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("Vendor"), Some(UserRole::Vendor));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!(UserRole::parse("operator"), None);
        assert_eq!(UserRole::parse(""), None);
    }

    #[test]
    fn default_role_is_vendor() {
        assert_eq!(UserRole::default(), UserRole::Vendor);
    }
}
