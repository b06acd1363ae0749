//! Overpass API adapter for facility discovery over OpenStreetMap data.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::error::UpstreamError;
use crate::models::SafeSpotType;
use crate::tags::TagRule;
use crate::traits::{FacilitySource, RawFeature};

#[derive(Debug, Clone)]
pub struct OverpassConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Upper bound on elements returned per query.
    pub element_limit: usize,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: "https://overpass-api.de/api".to_string(),
            timeout_secs: 25,
            element_limit: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    config: OverpassConfig,
    client: reqwest::Client,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

/// Derived element emitted ahead of each branch's results.
const BRANCH_MARKER: &str = "branch";

/// Overpass QL with one union per rule, each capped by its own `out center`.
///
/// Each branch is preceded by a `make branch kind=<type>` element that
/// attributes the results following it.
pub fn build_query(
    lat: f64,
    lon: f64,
    radius_meters: u32,
    categories: &[TagRule],
    timeout_secs: u64,
    element_limit: usize,
) -> String {
    let around = format!("(around:{},{:.6},{:.6})", radius_meters, lat, lon);
    let mut query = format!("[out:json][timeout:{}];\n", timeout_secs);
    for rule in categories {
        query.push_str(&format!(
            "make {} kind=\"{}\";\nout;\n(\n",
            BRANCH_MARKER,
            rule.kind.as_str()
        ));
        for (key, value) in rule.matches {
            query.push_str(&format!("  nwr[\"{}\"=\"{}\"]{};\n", key, value, around));
        }
        query.push_str(&format!(");\nout center {};\n", element_limit));
    }
    query
}

impl FacilitySource for OverpassClient {
    async fn query_facilities(
        &self,
        lat: f64,
        lon: f64,
        radius_meters: u32,
        categories: &[TagRule],
    ) -> Result<Vec<RawFeature>, UpstreamError> {
        let query = build_query(
            lat,
            lon,
            radius_meters,
            categories,
            self.config.timeout_secs,
            self.config.element_limit,
        );
        let url = format!("{}/interpreter", self.config.base_url.trim_end_matches('/'));
        tracing::debug!(url = %url, radius_m = radius_meters, "Querying Overpass");

        let response = self
            .client
            .post(url)
            .form(&[("data", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let body: OverpassResponse = response.json().await?;
        body.into_features()
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
    remark: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassResponse {
    /// Features in response order, attributed to the branch that returned them.
    /// An element matched by several branches is kept once, under the first.
    fn into_features(self) -> Result<Vec<RawFeature>, UpstreamError> {
        if let Some(remark) = self.remark.filter(|remark| remark.contains("error")) {
            return Err(UpstreamError::Malformed(remark));
        }

        let mut seen = HashSet::new();
        let mut branch: Option<SafeSpotType> = None;
        let mut features = Vec::with_capacity(self.elements.len());
        for element in self.elements {
            if element.kind == BRANCH_MARKER {
                branch = element.tags.get("kind").and_then(|kind| {
                    SafeSpotType::ALL
                        .into_iter()
                        .find(|t| t.as_str() == kind.as_str())
                });
                continue;
            }

            let id = format!("{}/{}", element.kind, element.id);
            if !seen.insert(id.clone()) {
                continue;
            }
            features.push(RawFeature {
                id,
                point: element.lat.zip(element.lon),
                centroid: element.center.map(|center| (center.lat, center.lon)),
                tags: element.tags,
                category: branch,
            });
        }
        Ok(features)
    }
}
