//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedGeocoder;
use crate::directions::OrsClient;
use crate::geocode::NominatimClient;
use crate::pipeline::Pipeline;
use crate::predictor::MlClient;
use crate::store::RouteStore;

/// The pipeline as wired by the server.
pub type LivePipeline = Pipeline<CachedGeocoder<NominatimClient>, OrsClient, MlClient>;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route candidate pipeline
    pub pipeline: Arc<LivePipeline>,

    /// Saved routes and choices
    pub store: Arc<RouteStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(pipeline: LivePipeline, store: RouteStore) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            store: Arc::new(store),
        }
    }
}
