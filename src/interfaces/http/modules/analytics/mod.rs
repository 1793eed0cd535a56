//! Admin analytics pages: vendor lists, session averages, product and
//! support rankings

pub mod handlers;

pub use handlers::*;
