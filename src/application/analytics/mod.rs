//! Reporting use-cases behind the dashboard and the analytics pages.

pub mod service;

pub use service::AnalyticsService;
