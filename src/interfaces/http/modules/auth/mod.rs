//! Accounts: login, logout and admin-only registration

pub mod handlers;

pub use handlers::*;
