//! Real San Francisco facilities for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API.

use std::collections::HashMap;

use evac_planner::traits::RawFeature;

/// Crisis location: Civic Center Plaza.
pub const CIVIC_CENTER: (f64, f64) = (37.7793, -122.4193);

fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn node(id: u64, lat: f64, lon: f64, pairs: &[(&str, &str)]) -> RawFeature {
    RawFeature {
        id: format!("node/{}", id),
        point: Some((lat, lon)),
        centroid: None,
        tags: tags(pairs),
        category: None,
    }
}

pub fn way(id: u64, center: Option<(f64, f64)>, pairs: &[(&str, &str)]) -> RawFeature {
    RawFeature {
        id: format!("way/{}", id),
        point: None,
        centroid: center,
        tags: tags(pairs),
        category: None,
    }
}

/// A mixed neighbourhood: one of each type plus two unusable features.
pub fn civic_center_features() -> Vec<RawFeature> {
    vec![
        way(
            202,
            Some((37.7694, -122.4862)),
            &[("leisure", "park"), ("name", "Golden Gate Park")],
        ),
        node(
            101,
            37.7557,
            -122.4049,
            &[
                ("amenity", "hospital"),
                ("name", "Zuckerberg San Francisco General Hospital"),
                ("addr:housenumber", "1001"),
                ("addr:street", "Potrero Avenue"),
                ("phone", "+1 628 206 8000"),
            ],
        ),
        way(
            505,
            Some((37.6213, -122.3790)),
            &[("aeroway", "aerodrome"), ("name", "San Francisco International Airport")],
        ),
        node(
            303,
            37.7785,
            -122.4056,
            &[("amenity", "shelter"), ("capacity", "340")],
        ),
        node(
            404,
            37.7617,
            -122.4270,
            &[("amenity", "school"), ("name", "Mission High School")],
        ),
        node(606, 37.7790, -122.4180, &[("amenity", "cafe"), ("name", "Blue Bottle")]),
        way(707, None, &[("amenity", "hospital"), ("name", "Unresolved Campus")]),
    ]
}

/// Three shelters at increasing distance.
pub fn three_shelters() -> Vec<RawFeature> {
    vec![
        node(1, 37.7800, -122.4190, &[("amenity", "shelter"), ("name", "Near")]),
        node(2, 37.7900, -122.4190, &[("amenity", "shelter"), ("name", "Middle")]),
        node(3, 37.8000, -122.4190, &[("amenity", "shelter"), ("name", "Far")]),
    ]
}

/// A straight road geometry of `n` points in `[lon, lat]` order.
pub fn road(from: (f64, f64), to: (f64, f64), n: usize) -> Vec<[f64; 2]> {
    let steps = (n.max(2) - 1) as f64;
    (0..n)
        .map(|i| {
            let t = i as f64 / steps;
            [from.1 + (to.1 - from.1) * t, from.0 + (to.0 - from.0) * t]
        })
        .collect()
}
