//! Eco-commute route planner server.
//!
//! For an origin, a destination and a set of travel modes, proposes one
//! route per mode with distance, duration, a delay-adjusted duration and an
//! estimated CO₂ figure. Upstream directions, geocoding and delay
//! prediction services are optional at runtime: when they fail, candidates
//! are still produced from local fallbacks.

pub mod cache;
pub mod config;
pub mod directions;
pub mod domain;
pub mod geocode;
pub mod pipeline;
pub mod predictor;
pub mod store;
pub mod web;
