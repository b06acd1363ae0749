//! Seams to the external collaborators of the planning pipeline.
//!
//! The HTTP adapters in [`crate::overpass`] and [`crate::osrm`] implement the
//! source traits; tests substitute in-process fakes.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::error::UpstreamError;
use crate::models::SafeSpotType;
use crate::tags::TagRule;

/// A raw geographic feature as returned by the facility query service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawFeature {
    /// Source identity, e.g. `node/123`.
    pub id: String,
    /// The feature's own point (lat, lon), for point features.
    pub point: Option<(f64, f64)>,
    /// Service-provided centroid (lat, lon), for area features.
    pub centroid: Option<(f64, f64)>,
    /// Free-form tag map.
    pub tags: HashMap<String, String>,
    /// Set when the feature came out of a query branch for one specific type.
    pub category: Option<SafeSpotType>,
}

impl RawFeature {
    /// Representative point: the feature's own point, else its centroid.
    pub fn location(&self) -> Option<(f64, f64)> {
        self.point.or(self.centroid)
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// Routed geometry as reported by the route computation service.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    /// `[longitude, latitude]` pairs in travel order.
    pub coordinates: Vec<[f64; 2]>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Queries candidate facilities around a point.
pub trait FacilitySource {
    fn query_facilities(
        &self,
        lat: f64,
        lon: f64,
        radius_meters: u32,
        categories: &[TagRule],
    ) -> impl Future<Output = Result<Vec<RawFeature>, UpstreamError>> + Send;
}

/// Computes one drivable route between two points.
pub trait RouteSource {
    fn compute_route(
        &self,
        from: (f64, f64),
        to: (f64, f64),
    ) -> impl Future<Output = Result<RouteGeometry, UpstreamError>> + Send;
}

/// Daily call budget for a rate-limited upstream.
///
/// Storage and day rollover belong to the implementor.
pub trait QuotaGuard {
    /// Whether another call is allowed today.
    fn check_quota(&self) -> bool;

    /// Record one issued call.
    fn increment_quota(&self);

    /// Check and record in one step. Implementations shared between
    /// concurrent requests override this so the pair cannot interleave.
    fn try_acquire(&self) -> bool {
        let allowed = self.check_quota();
        if allowed {
            self.increment_quota();
        }
        allowed
    }

    /// The daily budget, if the guard has one.
    fn limit(&self) -> Option<u32> {
        None
    }
}

impl<T: FacilitySource + Sync> FacilitySource for &T {
    fn query_facilities(
        &self,
        lat: f64,
        lon: f64,
        radius_meters: u32,
        categories: &[TagRule],
    ) -> impl Future<Output = Result<Vec<RawFeature>, UpstreamError>> + Send {
        (**self).query_facilities(lat, lon, radius_meters, categories)
    }
}

impl<T: FacilitySource + Send + Sync> FacilitySource for Arc<T> {
    fn query_facilities(
        &self,
        lat: f64,
        lon: f64,
        radius_meters: u32,
        categories: &[TagRule],
    ) -> impl Future<Output = Result<Vec<RawFeature>, UpstreamError>> + Send {
        (**self).query_facilities(lat, lon, radius_meters, categories)
    }
}

impl<T: RouteSource + Sync> RouteSource for &T {
    fn compute_route(
        &self,
        from: (f64, f64),
        to: (f64, f64),
    ) -> impl Future<Output = Result<RouteGeometry, UpstreamError>> + Send {
        (**self).compute_route(from, to)
    }
}

impl<T: RouteSource + Send + Sync> RouteSource for Arc<T> {
    fn compute_route(
        &self,
        from: (f64, f64),
        to: (f64, f64),
    ) -> impl Future<Output = Result<RouteGeometry, UpstreamError>> + Send {
        (**self).compute_route(from, to)
    }
}

impl<T: QuotaGuard + ?Sized> QuotaGuard for &T {
    fn check_quota(&self) -> bool {
        (**self).check_quota()
    }

    fn increment_quota(&self) {
        (**self).increment_quota()
    }

    fn try_acquire(&self) -> bool {
        (**self).try_acquire()
    }

    fn limit(&self) -> Option<u32> {
        (**self).limit()
    }
}

impl<T: QuotaGuard + ?Sized> QuotaGuard for Arc<T> {
    fn check_quota(&self) -> bool {
        (**self).check_quota()
    }

    fn increment_quota(&self) {
        (**self).increment_quota()
    }

    fn try_acquire(&self) -> bool {
        (**self).try_acquire()
    }

    fn limit(&self) -> Option<u32> {
        (**self).limit()
    }
}
