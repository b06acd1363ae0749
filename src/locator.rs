//! Safe-spot discovery and ranking.

use std::cmp::Ordering;

use crate::cancel::CancelSignal;
use crate::error::PlanError;
use crate::haversine::{distance_km, round_to_tenth};
use crate::models::{SafeSpot, SafeSpotType};
use crate::tags::{FACILITY_RULES, TagRule, classify};
use crate::traits::{FacilitySource, QuotaGuard, RawFeature};

/// Default cap on ranked candidates returned to the assembler.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Finds and ranks evacuation destinations around a crisis location.
///
/// Calls to the facility source are gated by the injected quota guard.
#[derive(Debug, Clone)]
pub struct Locator<F, Q> {
    source: F,
    quota: Q,
    rules: &'static [TagRule],
    max_results: usize,
}

impl<F, Q> Locator<F, Q>
where
    F: FacilitySource,
    Q: QuotaGuard,
{
    pub fn new(source: F, quota: Q) -> Self {
        Self {
            source,
            quota,
            rules: FACILITY_RULES,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Ranked safe spots within `radius_meters` of `(lat, lon)`.
    ///
    /// Upstream failures and timeouts yield an empty list. Only an exhausted
    /// quota or cancellation is reported as an error.
    pub async fn locate(
        &self,
        lat: f64,
        lon: f64,
        radius_meters: u32,
        cancel: &CancelSignal,
    ) -> Result<Vec<SafeSpot>, PlanError> {
        if cancel.is_cancelled() {
            return Err(PlanError::Cancelled);
        }
        if !self.quota.try_acquire() {
            let limit = self.quota.limit();
            tracing::warn!(?limit, "Facility query quota exhausted");
            return Err(PlanError::QuotaExceeded { limit });
        }

        let query = self
            .source
            .query_facilities(lat, lon, radius_meters, self.rules);
        let features = match cancel.guard(query).await? {
            Ok(features) => features,
            Err(err) => {
                tracing::warn!(error = %err, lat, lon, "Facility query failed");
                return Ok(Vec::new());
            }
        };

        let spots = rank_features(&features, lat, lon, self.rules, self.max_results);
        tracing::debug!(
            raw = features.len(),
            ranked = spots.len(),
            radius_m = radius_meters,
            "Safe spots located"
        );
        Ok(spots)
    }
}

/// Classify, measure, rank and cap raw features.
pub fn rank_features(
    features: &[RawFeature],
    lat: f64,
    lon: f64,
    rules: &[TagRule],
    max_results: usize,
) -> Vec<SafeSpot> {
    let mut spots: Vec<SafeSpot> = features
        .iter()
        .filter_map(|feature| to_safe_spot(feature, lat, lon, rules))
        .collect();
    rank(&mut spots);
    spots.truncate(max_results);
    spots
}

/// Sort by priority tier, then distance, then id.
pub fn rank(spots: &mut [SafeSpot]) {
    spots.sort_by(compare);
}

fn compare(a: &SafeSpot, b: &SafeSpot) -> Ordering {
    a.kind
        .priority_rank()
        .cmp(&b.kind.priority_rank())
        .then_with(|| a.distance_km.total_cmp(&b.distance_km))
        .then_with(|| a.id.cmp(&b.id))
}

fn to_safe_spot(feature: &RawFeature, lat: f64, lon: f64, rules: &[TagRule]) -> Option<SafeSpot> {
    let (spot_lat, spot_lon) = feature.location()?;
    let kind = classify(feature, rules)?;

    Some(SafeSpot {
        id: spot_id(&feature.id),
        name: spot_name(feature, kind),
        kind,
        latitude: spot_lat,
        longitude: spot_lon,
        distance_km: round_to_tenth(distance_km(lat, lon, spot_lat, spot_lon)),
        capacity: feature.tag("capacity").map(str::to_string),
        address: spot_address(feature),
        phone: feature
            .tag("phone")
            .or_else(|| feature.tag("contact:phone"))
            .map(str::to_string),
    })
}

fn spot_id(source_id: &str) -> String {
    source_id.replace('/', "-")
}

fn spot_name(feature: &RawFeature, kind: SafeSpotType) -> String {
    feature
        .tag("name")
        .or_else(|| feature.tag("name:en"))
        .unwrap_or(kind.label())
        .to_string()
}

fn spot_address(feature: &RawFeature) -> Option<String> {
    if let Some(full) = feature.tag("addr:full") {
        return Some(full.to_string());
    }

    let street = match (feature.tag("addr:housenumber"), feature.tag("addr:street")) {
        (Some(number), Some(street)) => Some(format!("{} {}", number, street)),
        (None, Some(street)) => Some(street.to_string()),
        _ => None,
    };

    match (street, feature.tag("addr:city")) {
        (Some(street), Some(city)) => Some(format!("{}, {}", street, city)),
        (Some(street), None) => Some(street),
        (None, Some(city)) => Some(city.to_string()),
        (None, None) => None,
    }
}
