//! Web layer for the Masarak route planner.
//!
//! JSON endpoints for trip suggestions, ratings, nearby stations and the
//! full network listing.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
