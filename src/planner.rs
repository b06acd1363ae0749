//! Route computation to a single destination, with geometry compaction.

use crate::cancel::CancelSignal;
use crate::error::PlanError;
use crate::haversine::round_to_tenth;
use crate::models::{Route, SafeSpot, SafeSpotType};
use crate::polyline::Polyline;
use crate::traits::{RouteGeometry, RouteSource};

/// Colour used when no destination type is known.
pub const DEFAULT_ROUTE_COLOR: &str = "#3b82f6";

/// Route colour for a destination type.
pub fn route_color(kind: Option<SafeSpotType>) -> &'static str {
    match kind {
        Some(SafeSpotType::Hospital) => "#ef4444",
        Some(SafeSpotType::Shelter) => "#f59e0b",
        Some(SafeSpotType::School) => "#8b5cf6",
        Some(SafeSpotType::Airport) => "#3b82f6",
        Some(SafeSpotType::Park) => "#22c55e",
        None => DEFAULT_ROUTE_COLOR,
    }
}

/// Requests a drivable route and compacts its geometry.
#[derive(Debug, Clone)]
pub struct RoutePlanner<R> {
    source: R,
}

impl<R: RouteSource> RoutePlanner<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Route from the crisis location to `destination`.
    ///
    /// `Ok(None)` means no route is available: the service failed, timed
    /// out or returned an unusable payload.
    pub async fn route(
        &self,
        crisis_id: &str,
        from: (f64, f64),
        destination: &SafeSpot,
        sample_interval: usize,
        cancel: &CancelSignal,
    ) -> Result<Option<Route>, PlanError> {
        let to = (destination.latitude, destination.longitude);
        let geometry = match cancel.guard(self.source.compute_route(from, to)).await? {
            Ok(geometry) => geometry,
            Err(err) => {
                tracing::warn!(error = %err, destination = %destination.id, "Route computation failed");
                return Ok(None);
            }
        };

        let route = compact_route(crisis_id, destination, geometry, sample_interval);
        if let Some(route) = &route {
            tracing::debug!(
                destination = %destination.id,
                original = route.original_point_count,
                sampled = route.coordinates.len(),
                "Route compacted"
            );
        }
        Ok(route)
    }
}

/// Build a [`Route`] from raw geometry. Returns `None` for empty geometry or
/// non-finite metrics.
pub fn compact_route(
    crisis_id: &str,
    destination: &SafeSpot,
    geometry: RouteGeometry,
    sample_interval: usize,
) -> Option<Route> {
    if geometry.coordinates.is_empty()
        || !geometry.distance_meters.is_finite()
        || !geometry.duration_seconds.is_finite()
    {
        return None;
    }

    let original = Polyline::new(geometry.coordinates);
    let original_point_count = original.len();
    let sampled = original.sample(sample_interval);

    Some(Route {
        id: format!("route-{}-{}", crisis_id, destination.id),
        destination_id: destination.id.clone(),
        coordinates: sampled.into_points(),
        original_point_count,
        distance_km: round_to_tenth(geometry.distance_meters.max(0.0) / 1000.0),
        duration_min: (geometry.duration_seconds.max(0.0) / 60.0).round() as u32,
        color: route_color(Some(destination.kind)).to_string(),
    })
}
