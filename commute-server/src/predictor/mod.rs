//! Travel-time prediction service client.
//!
//! The service takes `{distance_km, hour_of_day, mode}` and answers with a
//! predicted duration in minutes. It may answer without a prediction, which
//! callers treat the same as no answer at all.

mod client;
mod error;

pub use client::{DEFAULT_PREDICT_URL, DelayFeatures, MlClient, MlConfig, Prediction};
pub use error::PredictorError;
