//! evac-planner: evacuation planning for a single crisis location.
//!
//! Discovers nearby safe destinations from OpenStreetMap, ranks them, routes
//! to the best one and compacts the result for streaming to a map client.

pub mod assembler;
pub mod cancel;
pub mod config;
pub mod error;
pub mod haversine;
pub mod locator;
pub mod models;
pub mod osrm;
pub mod overpass;
pub mod planner;
pub mod polyline;
pub mod projector;
pub mod quota;
pub mod tags;
pub mod traits;
