//! Activity aggregate: one row per login session.

pub mod model;
pub mod repository;

pub use model::{session_duration, ActivityWindow, SessionRecord, UserActivity};
pub use repository::ActivityRepository;
