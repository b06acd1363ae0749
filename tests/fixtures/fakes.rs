//! In-process stand-ins for the upstream services.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use evac_planner::error::UpstreamError;
use evac_planner::tags::TagRule;
use evac_planner::traits::{FacilitySource, RawFeature, RouteGeometry, RouteSource};

/// Facility service returning canned features, an error, or hanging.
#[derive(Debug, Default)]
pub struct FakeFacilities {
    features: Option<Vec<RawFeature>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeFacilities {
    pub fn returning(features: Vec<RawFeature>) -> Self {
        Self {
            features: Some(features),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn slow(delay: Duration, features: Vec<RawFeature>) -> Self {
        Self {
            features: Some(features),
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FacilitySource for FakeFacilities {
    async fn query_facilities(
        &self,
        _lat: f64,
        _lon: f64,
        _radius_meters: u32,
        _categories: &[TagRule],
    ) -> Result<Vec<RawFeature>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.features
            .clone()
            .ok_or_else(|| UpstreamError::Status(504))
    }
}

/// Route service returning a canned geometry or an error.
#[derive(Debug, Default)]
pub struct FakeRoutes {
    geometry: Option<RouteGeometry>,
    delay: Option<Duration>,
    requests: Mutex<Vec<((f64, f64), (f64, f64))>>,
}

impl FakeRoutes {
    pub fn returning(geometry: RouteGeometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn slow(delay: Duration, geometry: RouteGeometry) -> Self {
        Self {
            geometry: Some(geometry),
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<((f64, f64), (f64, f64))> {
        self.requests.lock().unwrap().clone()
    }
}

impl RouteSource for FakeRoutes {
    async fn compute_route(
        &self,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Result<RouteGeometry, UpstreamError> {
        self.requests.lock().unwrap().push((from, to));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.geometry
            .clone()
            .ok_or_else(|| UpstreamError::Malformed("NoRoute".to_string()))
    }
}
