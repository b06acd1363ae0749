//! Data model for one evacuation planning request.
//!
//! Field names on the wire are camelCase and are consumed as-is by the map
//! renderer, so they must stay stable.

use serde::{Deserialize, Serialize};

/// Default search radius around the crisis location.
pub const DEFAULT_SEARCH_RADIUS_METERS: u32 = 30_000;

/// Default stride used to thin route geometry.
pub const DEFAULT_SAMPLE_INTERVAL: usize = 10;

/// Destination category, declared in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeSpotType {
    Hospital,
    Shelter,
    School,
    Airport,
    Park,
}

impl SafeSpotType {
    /// All types, highest priority first.
    pub const ALL: [SafeSpotType; 5] = [
        SafeSpotType::Hospital,
        SafeSpotType::Shelter,
        SafeSpotType::School,
        SafeSpotType::Airport,
        SafeSpotType::Park,
    ];

    /// Priority tier: lower ranks are preferred regardless of distance.
    pub fn priority_rank(self) -> u8 {
        match self {
            SafeSpotType::Hospital => 0,
            SafeSpotType::Shelter => 1,
            SafeSpotType::School => 2,
            SafeSpotType::Airport => 3,
            SafeSpotType::Park => 4,
        }
    }

    /// Wire name, e.g. `hospital`.
    pub fn as_str(self) -> &'static str {
        match self {
            SafeSpotType::Hospital => "hospital",
            SafeSpotType::Shelter => "shelter",
            SafeSpotType::School => "school",
            SafeSpotType::Airport => "airport",
            SafeSpotType::Park => "park",
        }
    }

    /// Capitalized label, also the fallback name for unnamed facilities.
    pub fn label(self) -> &'static str {
        match self {
            SafeSpotType::Hospital => "Hospital",
            SafeSpotType::Shelter => "Shelter",
            SafeSpotType::School => "School",
            SafeSpotType::Airport => "Airport",
            SafeSpotType::Park => "Park",
        }
    }

    fn plural(self) -> &'static str {
        match self {
            SafeSpotType::Hospital => "hospitals",
            SafeSpotType::Shelter => "shelters",
            SafeSpotType::School => "schools",
            SafeSpotType::Airport => "airports",
            SafeSpotType::Park => "parks",
        }
    }

    /// `"1 hospital"`, `"3 parks"`.
    pub fn count_phrase(self, count: usize) -> String {
        if count == 1 {
            format!("1 {}", self.as_str())
        } else {
            format!("{} {}", count, self.plural())
        }
    }
}

/// A candidate evacuation destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeSpot {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SafeSpotType,
    pub latitude: f64,
    pub longitude: f64,
    /// Great-circle distance from the crisis, one decimal place.
    pub distance_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A compacted drivable path to one safe spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub destination_id: String,
    /// `[longitude, latitude]` pairs, a subsequence of the routed geometry.
    pub coordinates: Vec<[f64; 2]>,
    pub original_point_count: usize,
    pub distance_km: f64,
    pub duration_min: u32,
    pub color: String,
}

/// Terminal output of one planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub crisis_id: String,
    pub crisis_title: String,
    pub crisis_latitude: f64,
    pub crisis_longitude: f64,
    pub all_safe_spots: Vec<SafeSpot>,
    pub best_safe_spot: Option<SafeSpot>,
    pub primary_route: Option<Route>,
    pub summary: String,
}

/// Pipeline input as sent by the orchestration layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub crisis_id: String,
    pub crisis_title: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_search_radius")]
    pub search_radius_meters: u32,
    #[serde(default = "default_sample_interval")]
    pub sample_interval: usize,
}

fn default_search_radius() -> u32 {
    DEFAULT_SEARCH_RADIUS_METERS
}

fn default_sample_interval() -> usize {
    DEFAULT_SAMPLE_INTERVAL
}

impl PlanRequest {
    pub fn new(
        crisis_id: impl Into<String>,
        crisis_title: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            crisis_id: crisis_id.into(),
            crisis_title: crisis_title.into(),
            latitude,
            longitude,
            search_radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
        }
    }

    pub fn with_search_radius(mut self, meters: u32) -> Self {
        self.search_radius_meters = meters;
        self
    }

    pub fn with_sample_interval(mut self, interval: usize) -> Self {
        self.sample_interval = interval;
        self
    }
}
