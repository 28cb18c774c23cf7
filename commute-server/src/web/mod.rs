//! Web layer for the commute planner.
//!
//! JSON endpoints for route candidates, route choices and emission stats.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, LivePipeline};
