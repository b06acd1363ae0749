//! OSRM HTTP adapter for single drivable routes.

use serde::Deserialize;

use crate::error::UpstreamError;
use crate::traits::{RouteGeometry, RouteSource};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, from: (f64, f64), to: (f64, f64)) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            from.1,
            from.0,
            to.1,
            to.0
        )
    }
}

impl RouteSource for OsrmClient {
    async fn compute_route(
        &self,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Result<RouteGeometry, UpstreamError> {
        let url = self.route_url(from, to);
        tracing::debug!(url = %url, "Requesting OSRM route");

        let response = self
            .client
            .get(url)
            .query(&[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("alternatives", "false"),
                ("steps", "false"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let body: OsrmRouteResponse = response.json().await?;
        body.into_geometry()
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

impl OsrmRouteResponse {
    fn into_geometry(self) -> Result<RouteGeometry, UpstreamError> {
        if self.code != "Ok" {
            return Err(UpstreamError::Malformed(format!("OSRM code {}", self.code)));
        }
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::Malformed("no routes".to_string()))?;
        if route.geometry.coordinates.is_empty() {
            return Err(UpstreamError::Malformed("empty geometry".to_string()));
        }

        Ok(RouteGeometry {
            coordinates: route.geometry.coordinates,
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
    }
}
