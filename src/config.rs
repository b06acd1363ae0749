//! Configuration loaded from environment variables.
//!
//! Every value has a default, so an empty environment yields a working
//! configuration against the public Overpass and OSRM instances.

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::osrm::OsrmConfig;
use crate::overpass::OverpassConfig;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub overpass: OverpassConfig,
    pub osrm: OsrmConfig,
    /// Daily cap on facility queries; `None` means unlimited.
    pub daily_quota: Option<u32>,
}

impl Config {
    /// Load configuration from the environment, reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let overpass_defaults = OverpassConfig::default();
        let osrm_defaults = OsrmConfig::default();

        Ok(Self {
            overpass: OverpassConfig {
                base_url: lookup("EVAC_OVERPASS_URL").unwrap_or(overpass_defaults.base_url),
                timeout_secs: parse(&lookup, "EVAC_OVERPASS_TIMEOUT_SECS")?
                    .unwrap_or(overpass_defaults.timeout_secs),
                element_limit: parse(&lookup, "EVAC_OVERPASS_ELEMENT_LIMIT")?
                    .unwrap_or(overpass_defaults.element_limit),
            },
            osrm: OsrmConfig {
                base_url: lookup("EVAC_OSRM_URL").unwrap_or(osrm_defaults.base_url),
                profile: lookup("EVAC_OSRM_PROFILE").unwrap_or(osrm_defaults.profile),
                timeout_secs: parse(&lookup, "EVAC_OSRM_TIMEOUT_SECS")?
                    .unwrap_or(osrm_defaults.timeout_secs),
            },
            daily_quota: parse(&lookup, "EVAC_DAILY_QUOTA")?,
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
