//! REST API for the herd dashboard

#[cfg(feature = "server")]
pub mod routes;

#[cfg(feature = "server")]
pub use routes::{create_herd_router, AppState};
