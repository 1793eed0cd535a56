pub mod analytics;
pub mod identity;

// Re-export key types for convenience
pub use analytics::AnalyticsService;
pub use identity::{
    FormErrors, IdentityError, IdentityService, IdentitySettings, LoginForm, LoginSuccess,
    PasswordPolicy, RegisterForm,
};
