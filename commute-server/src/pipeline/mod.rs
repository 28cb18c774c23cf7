//! Route candidate pipeline.
//!
//! Turns an origin/destination pair and a list of travel modes into one
//! route candidate per mode. Each candidate goes through three steps:
//!
//! 1. route geometry from the directions provider, or an offline simulation
//! 2. delay prediction from the ML service, or an average-speed estimate
//! 3. emissions from the static per-kilometre factor table
//!
//! Upstream failures are retried a bounded number of times and then
//! replaced by a local fallback, so candidate generation itself never fails
//! once both endpoints are known.

mod assemble;
mod config;
mod outcome;
mod provider;
mod resolve;

pub use assemble::{Pipeline, PlanError};
pub use config::{DEFAULT_MODES, PipelineConfig, RetryPolicy};
pub use outcome::Outcome;
pub use provider::{DelayPredictor, DirectionsProvider, Geocoder};
pub use resolve::{DelayAdapter, FALLBACK_SPEED_KMH, RouteResolver, fallback_duration_min};
