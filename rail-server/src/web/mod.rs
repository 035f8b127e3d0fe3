//! Web layer for the rail route server.
//!
//! Provides JSON endpoints for route search and for browsing the catalog.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
