//! Projection of plan entities into map primitives for the renderer.

use serde::{Deserialize, Serialize};

use crate::models::{Plan, Route, SafeSpot};

/// Stroke width for drawn routes, in pixels.
pub const ROUTE_WIDTH: u32 = 5;

/// Marker severity classification understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    High,
}

/// A point marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub category: String,
}

/// A polyline the renderer can draw as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawableRoute {
    pub id: String,
    pub coordinates: Vec<[f64; 2]>,
    pub color: String,
    pub width: u32,
    pub label: String,
}

/// Everything the renderer needs for one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayers {
    pub crisis: Marker,
    pub safe_spots: Vec<Marker>,
    pub routes: Vec<DrawableRoute>,
}

pub fn safe_spot_markers(spots: &[SafeSpot]) -> Vec<Marker> {
    spots.iter().map(safe_spot_marker).collect()
}

fn safe_spot_marker(spot: &SafeSpot) -> Marker {
    let mut description = format!("{} - {:.1} km away", spot.kind.label(), spot.distance_km);
    if let Some(address) = &spot.address {
        description.push_str(&format!(". {}", address));
    }
    if let Some(phone) = &spot.phone {
        description.push_str(&format!(". Phone: {}", phone));
    }

    Marker {
        id: spot.id.clone(),
        latitude: spot.latitude,
        longitude: spot.longitude,
        title: spot.name.clone(),
        description,
        severity: Severity::Low,
        category: spot.kind.as_str().to_string(),
    }
}

pub fn drawable_route(route: &Route, origin: &str, destination: &str) -> DrawableRoute {
    DrawableRoute {
        id: route.id.clone(),
        coordinates: route.coordinates.clone(),
        color: route.color.clone(),
        width: ROUTE_WIDTH,
        label: format!(
            "{} to {}: {:.1} km, {} min",
            origin, destination, route.distance_km, route.duration_min
        ),
    }
}

/// Crisis marker, safe-spot markers and the primary route, if any.
pub fn project_plan(plan: &Plan) -> MapLayers {
    let crisis = Marker {
        id: plan.crisis_id.clone(),
        latitude: plan.crisis_latitude,
        longitude: plan.crisis_longitude,
        title: plan.crisis_title.clone(),
        description: plan.summary.clone(),
        severity: Severity::High,
        category: "crisis".to_string(),
    };

    let routes = match (&plan.primary_route, &plan.best_safe_spot) {
        (Some(route), Some(best)) => vec![drawable_route(route, &plan.crisis_title, &best.name)],
        _ => Vec::new(),
    };

    MapLayers {
        crisis,
        safe_spots: safe_spot_markers(&plan.all_safe_spots),
        routes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SafeSpotType;

    fn spot() -> SafeSpot {
        SafeSpot {
            id: "node-3".to_string(),
            name: "Mission High".to_string(),
            kind: SafeSpotType::School,
            latitude: 37.76,
            longitude: -122.43,
            distance_km: 2.0,
            capacity: None,
            address: Some("3750 18th St".to_string()),
            phone: Some("415-555-0199".to_string()),
        }
    }

    fn route() -> Route {
        Route {
            id: "route-c1-node-3".to_string(),
            destination_id: "node-3".to_string(),
            coordinates: vec![[-122.41, 37.77], [-122.43, 37.76]],
            original_point_count: 40,
            distance_km: 2.6,
            duration_min: 7,
            color: "#8b5cf6".to_string(),
        }
    }

    #[test]
    fn test_marker_description() {
        let markers = safe_spot_markers(&[spot()]);
        assert_eq!(markers.len(), 1);
        let marker = &markers[0];
        assert_eq!(marker.severity, Severity::Low);
        assert_eq!(marker.title, "Mission High");
        assert_eq!(marker.category, "school");
        assert_eq!(
            marker.description,
            "School - 2.0 km away. 3750 18th St. Phone: 415-555-0199"
        );
    }

    #[test]
    fn test_marker_without_contact() {
        let mut bare = spot();
        bare.address = None;
        bare.phone = None;
        assert_eq!(safe_spot_marker(&bare).description, "School - 2.0 km away");
    }

    #[test]
    fn test_drawable_route() {
        let drawn = drawable_route(&route(), "Gas Leak", "Mission High");
        assert_eq!(drawn.width, ROUTE_WIDTH);
        assert_eq!(drawn.color, "#8b5cf6");
        assert_eq!(drawn.coordinates, route().coordinates);
        assert_eq!(drawn.label, "Gas Leak to Mission High: 2.6 km, 7 min");
    }

    #[test]
    fn test_project_plan_without_route() {
        let plan = Plan {
            crisis_id: "c1".to_string(),
            crisis_title: "Gas Leak".to_string(),
            crisis_latitude: 37.77,
            crisis_longitude: -122.41,
            all_safe_spots: vec![spot()],
            best_safe_spot: Some(spot()),
            primary_route: None,
            summary: "summary".to_string(),
        };
        let layers = project_plan(&plan);
        assert_eq!(layers.crisis.severity, Severity::High);
        assert_eq!(layers.safe_spots.len(), 1);
        assert!(layers.routes.is_empty());
    }

    #[test]
    fn test_project_plan_with_route() {
        let plan = Plan {
            crisis_id: "c1".to_string(),
            crisis_title: "Gas Leak".to_string(),
            crisis_latitude: 37.77,
            crisis_longitude: -122.41,
            all_safe_spots: vec![spot()],
            best_safe_spot: Some(spot()),
            primary_route: Some(route()),
            summary: "summary".to_string(),
        };
        let layers = project_plan(&plan);
        assert_eq!(layers.routes.len(), 1);
        assert_eq!(layers.routes[0].id, "route-c1-node-3");
    }
}
