//! Candidate assembly.
//!
//! For each requested mode: route geometry, then delay prediction, then
//! emissions. Modes are independent; a degraded upstream only degrades the
//! candidates that used it.

use chrono::{Local, Timelike};
use futures::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    Coordinate, Place, Provenance, RouteCandidate, Source, TravelMode, estimate_emission,
    round_to,
};
use crate::predictor::DelayFeatures;

use super::config::PipelineConfig;
use super::provider::{DelayPredictor, DirectionsProvider, Geocoder};
use super::resolve::{DelayAdapter, RouteResolver, is_usable};

/// Error from [`Pipeline::plan`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// A place name could not be resolved to a coordinate
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// Origin or destination missing or unparseable
    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

/// A resolved endpoint with the name to show for it, if any.
struct Endpoint {
    coordinate: Coordinate,
    name: Option<String>,
}

/// Route candidate generator.
pub struct Pipeline<G, D, P> {
    geocoder: G,
    routes: RouteResolver<D>,
    delays: DelayAdapter<P>,
    config: PipelineConfig,
}

impl<G, D, P> Pipeline<G, D, P>
where
    G: Geocoder,
    D: DirectionsProvider,
    P: DelayPredictor,
{
    /// Create a new pipeline. Without a directions provider every route is
    /// simulated.
    pub fn new(geocoder: G, directions: Option<D>, predictor: P, config: PipelineConfig) -> Self {
        Self {
            geocoder,
            routes: RouteResolver::new(directions, config.directions_retry),
            delays: DelayAdapter::new(predictor, config.predictor_retry),
            config,
        }
    }

    /// Generate one candidate per requested mode, using the local hour.
    pub async fn generate_candidates(
        &self,
        origin: Coordinate,
        dest: Coordinate,
        modes: &[String],
    ) -> Vec<RouteCandidate> {
        let hour = Local::now().hour();
        self.generate_candidates_at(origin, dest, modes, hour).await
    }

    /// Generate one candidate per requested mode for a given hour of day.
    ///
    /// Blank mode entries are skipped; an empty list means the configured
    /// default modes. Candidates come back in request order.
    pub async fn generate_candidates_at(
        &self,
        origin: Coordinate,
        dest: Coordinate,
        modes: &[String],
        hour_of_day: u32,
    ) -> Vec<RouteCandidate> {
        let modes = self.effective_modes(modes);

        let candidates = if self.config.concurrent_modes {
            join_all(
                modes
                    .iter()
                    .map(|mode| self.candidate(origin, dest, mode, hour_of_day)),
            )
            .await
        } else {
            let mut out = Vec::with_capacity(modes.len());
            for mode in &modes {
                out.push(self.candidate(origin, dest, mode, hour_of_day).await);
            }
            out
        };

        let degraded = candidates
            .iter()
            .filter(|c| c.provenance.is_degraded())
            .count();
        info!(
            modes = candidates.len(),
            degraded,
            live_directions = self.routes.is_live(),
            "generated route candidates"
        );

        candidates
    }

    /// Resolve both places, then generate candidates between them.
    pub async fn plan(
        &self,
        origin: &Place,
        dest: &Place,
        modes: &[String],
    ) -> Result<Vec<RouteCandidate>, PlanError> {
        let origin = self.resolve_place(origin).await?;
        let dest = self.resolve_place(dest).await?;

        let mut candidates = self
            .generate_candidates(origin.coordinate, dest.coordinate, modes)
            .await;
        for candidate in &mut candidates {
            candidate.origin_name = origin.name.clone();
            candidate.dest_name = dest.name.clone();
        }

        Ok(candidates)
    }

    fn effective_modes(&self, requested: &[String]) -> Vec<TravelMode> {
        let modes: Vec<TravelMode> = requested
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .map(TravelMode::new)
            .collect();

        if modes.is_empty() {
            self.config
                .default_modes
                .iter()
                .map(|m| TravelMode::new(m.as_str()))
                .collect()
        } else {
            modes
        }
    }

    async fn resolve_place(&self, place: &Place) -> Result<Endpoint, PlanError> {
        let name = match place {
            Place::Coordinates(coordinate) => {
                return Ok(Endpoint {
                    coordinate: *coordinate,
                    name: None,
                });
            }
            Place::Name(name) => name.trim(),
        };

        if name.is_empty() {
            return Err(PlanError::MalformedRequest("empty place name".to_string()));
        }

        match self.geocoder.geocode(name).await {
            Ok(Some(found)) => Ok(Endpoint {
                coordinate: found.coordinate,
                name: Some(found.display_name),
            }),
            Ok(None) => Err(PlanError::InvalidLocation(name.to_string())),
            Err(e) => {
                warn!(place = name, error = %e, "geocoding failed");
                Err(PlanError::InvalidLocation(name.to_string()))
            }
        }
    }

    async fn candidate(
        &self,
        origin: Coordinate,
        dest: Coordinate,
        mode: &TravelMode,
        hour_of_day: u32,
    ) -> RouteCandidate {
        let route = self.routes.resolve(origin, dest, mode).await;
        let route_source = route.source();
        let route = route.into_inner();

        let features = DelayFeatures {
            distance_km: route.distance_km,
            hour_of_day,
            mode: mode.id().to_string(),
        };
        let delay = self.delays.predict(&features).await;
        let delay_source = delay.source();
        let predicted = delay.into_inner().filter(|v| is_usable(*v));

        let (predicted_duration_min, delay_source) = match predicted {
            Some(v) => (v, delay_source),
            None => (route.duration_min, Source::Fallback),
        };

        let emission_g = estimate_emission(route.distance_km, mode.class().vehicle_category());

        RouteCandidate {
            route_id: Uuid::new_v4(),
            mode: mode.id().to_string(),
            distance_km: round_to(route.distance_km, 3),
            duration_min: round_to(route.duration_min, 2),
            predicted_duration_min: round_to(predicted_duration_min, 2),
            emission_g: round_to(emission_g, 2),
            polyline: route.geometry,
            origin,
            origin_name: None,
            dest,
            dest_name: None,
            provenance: Provenance {
                route: route_source,
                delay: delay_source,
            },
        }
    }
}

#[cfg(test)]
#[path = "assemble_tests.rs"]
mod tests;
