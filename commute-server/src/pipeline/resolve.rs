//! Retry and fallback around the upstream collaborators.
//!
//! Neither resolver ever fails: after the retry budget is spent the route
//! step falls back to the offline simulation and the delay step to a fixed
//! average speed. Every failed attempt and every fallback is logged.

use std::fmt::Display;
use std::future::Future;

use tracing::{debug, warn};

use crate::directions::simulate_route;
use crate::domain::{Coordinate, RouteResult, TravelMode};
use crate::predictor::DelayFeatures;

use super::config::RetryPolicy;
use super::outcome::Outcome;
use super::provider::{DelayPredictor, DirectionsProvider};

/// Average speed assumed when the delay predictor is unavailable, in km/h.
pub const FALLBACK_SPEED_KMH: f64 = 40.0;

/// Duration estimate used when the delay predictor cannot be reached.
pub fn fallback_duration_min(distance_km: f64) -> f64 {
    distance_km / FALLBACK_SPEED_KMH * 60.0
}

/// Run `call` up to `policy.max_attempts` times, pausing `policy.delay`
/// between attempts. Returns the last error if every attempt fails.
pub(crate) async fn with_retry<T, E, F, Fut>(
    policy: RetryPolicy,
    upstream: &str,
    mode: &str,
    mut call: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        let err = match call().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        warn!(upstream, mode, attempt, attempts, error = %err, "upstream call failed");
        if attempt >= attempts {
            return Err(err);
        }
        drop(err);

        if !policy.delay.is_zero() {
            tokio::time::sleep(policy.delay).await;
        }
        attempt += 1;
    }
}

/// Route geometry step: live directions with a simulated fallback.
pub struct RouteResolver<D> {
    provider: Option<D>,
    retry: RetryPolicy,
}

impl<D: DirectionsProvider> RouteResolver<D> {
    /// `None` means no provider is configured; every route is simulated.
    pub fn new(provider: Option<D>, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    pub fn is_live(&self) -> bool {
        self.provider.is_some()
    }

    #[cfg(test)]
    pub(crate) fn provider(&self) -> Option<&D> {
        self.provider.as_ref()
    }

    /// Resolve a route. Never fails.
    pub async fn resolve(
        &self,
        origin: Coordinate,
        dest: Coordinate,
        mode: &TravelMode,
    ) -> Outcome<RouteResult> {
        let Some(provider) = &self.provider else {
            warn!(mode = %mode, "no directions provider configured, simulating route");
            return Outcome::Fallback(simulate_route(origin, dest, mode.class()));
        };

        let result = with_retry(self.retry, "directions", mode.id(), || {
            provider.route(origin, dest, mode)
        })
        .await;

        match result {
            Ok(mut route) => {
                route.distance_km = route.distance_km.max(0.0);
                route.duration_min = route.duration_min.max(0.0);
                debug!(mode = %mode, distance_km = route.distance_km, "live route");
                Outcome::Live(route)
            }
            Err(e) => {
                warn!(mode = %mode, error = %e, "directions unavailable, simulating route");
                Outcome::Fallback(simulate_route(origin, dest, mode.class()))
            }
        }
    }
}

/// Delay prediction step: live predictor with an average-speed fallback.
pub struct DelayAdapter<P> {
    predictor: P,
    retry: RetryPolicy,
}

impl<P: DelayPredictor> DelayAdapter<P> {
    pub fn new(predictor: P, retry: RetryPolicy) -> Self {
        Self { predictor, retry }
    }

    #[cfg(test)]
    pub(crate) fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Predict a duration. Never fails.
    ///
    /// `Live(None)` means the predictor answered without a value; the
    /// fallback always carries one.
    pub async fn predict(&self, features: &DelayFeatures) -> Outcome<Option<f64>> {
        let result = with_retry(self.retry, "predictor", &features.mode, || {
            self.predictor.predict(features)
        })
        .await;

        match result {
            Ok(predicted) => Outcome::Live(predicted),
            Err(e) => {
                let fallback = fallback_duration_min(features.distance_km);
                warn!(
                    mode = %features.mode,
                    error = %e,
                    fallback_min = fallback,
                    "predictor unavailable, using average speed"
                );
                Outcome::Fallback(Some(fallback))
            }
        }
    }
}

/// A predicted duration the caller may use in place of the route duration.
pub(crate) fn is_usable(predicted_min: f64) -> bool {
    predicted_min.is_finite() && predicted_min >= 0.0
}
