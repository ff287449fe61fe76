//! Web layer for the transit gateway.
//!
//! Provides the trip-plan endpoint and the transit index (route listings).

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, GatewayPlanner};
