//! Identity module: accounts and authentication
//!
//! Contains the `IdentityService` which orchestrates the account
//! use-cases: login, logout, registration and session lookup.

pub mod forms;
pub mod password_policy;
pub mod service;

pub use forms::{FormErrors, LoginForm, RegisterForm};
pub use password_policy::PasswordPolicy;
pub use service::{IdentityError, IdentityService, IdentitySettings, LoginSuccess};
