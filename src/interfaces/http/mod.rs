//! Server-rendered HTTP interface
//!
//! - `middleware`: session resolution and the admin guard
//! - `modules`: page handlers grouped by area
//! - `views`: askama page templates
//! - `router`: route table and shared state

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod views;

pub use router::{create_router, AppState};
