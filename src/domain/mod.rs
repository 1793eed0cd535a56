pub mod activity;
pub mod analytics;
pub mod catalog;
pub mod repositories;
pub mod user;

// Re-export commonly used types
pub use activity::{ActivityRepository, ActivityWindow, SessionRecord, UserActivity};
pub use analytics::{AnalyticsRepository, CalendarWindows, RankedCount, ReportPeriod};
pub use catalog::{CatalogRepository, Product};
pub use repositories::{DomainResult, RepositoryProvider};
pub use user::{CreateUserDto, User, UserRepositoryInterface, UserRole};

pub use crate::shared::errors::DomainError;
