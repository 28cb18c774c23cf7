use commute_server::cache::{CacheConfig, CachedGeocoder};
use commute_server::config::AppConfig;
use commute_server::directions::{OrsClient, OrsConfig};
use commute_server::geocode::{NominatimClient, NominatimConfig};
use commute_server::pipeline::{Pipeline, PipelineConfig};
use commute_server::predictor::{MlClient, MlConfig};
use commute_server::store::RouteStore;
use commute_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Directions client (optional: without a key every route is simulated)
    let directions = match &config.ors_api_key {
        Some(key) => {
            let ors_config = OrsConfig::new(key).with_base_url(&config.ors_base_url);
            Some(OrsClient::new(ors_config).expect("Failed to create directions client"))
        }
        None => {
            warn!("ORS_API_KEY not set, routes will be simulated");
            None
        }
    };

    let predictor = MlClient::new(MlConfig::new(&config.ml_service_url))
        .expect("Failed to create predictor client");

    let geocoder_config = NominatimConfig::new().with_search_url(&config.geocoder_url);
    let geocoder = NominatimClient::new(geocoder_config).expect("Failed to create geocoder client");
    let geocoder = CachedGeocoder::new(geocoder, &CacheConfig::default());

    let pipeline = Pipeline::new(geocoder, directions, predictor, PipelineConfig::default());

    let store = match &config.route_store_path {
        Some(path) => RouteStore::open(path).expect("Failed to open route store"),
        None => {
            info!("ROUTE_STORE_PATH not set, saved routes are kept in memory");
            RouteStore::in_memory()
        }
    };

    let state = AppState::new(pipeline, store);
    let app = create_router(state);

    let addr = config.listen_addr();
    info!(%addr, "commute server listening");
    info!("  GET  /health                    - Health check");
    info!("  GET  /api/routes                - Route candidates");
    info!("  POST /api/choose                - Save a chosen route");
    info!("  GET  /api/routes/user           - Saved routes for a user");
    info!("  GET  /api/stats/city-savings    - City-wide emissions");
    info!("  GET  /api/stats/user-savings    - Emissions for a user");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
