//! Plan assembly: locate, route the best candidate, summarize.
//!
//! At most one facility query and one route request are made per plan.

use tracing::Instrument;

use crate::cancel::CancelSignal;
use crate::error::PlanError;
use crate::locator::Locator;
use crate::models::{Plan, PlanRequest, Route, SafeSpot, SafeSpotType};
use crate::planner::RoutePlanner;
use crate::traits::{FacilitySource, QuotaGuard, RouteSource};

/// The evacuation planning pipeline.
#[derive(Debug, Clone)]
pub struct EvacuationPlanner<F, R, Q> {
    locator: Locator<F, Q>,
    router: RoutePlanner<R>,
}

impl<F, R, Q> EvacuationPlanner<F, R, Q>
where
    F: FacilitySource,
    R: RouteSource,
    Q: QuotaGuard,
{
    pub fn new(locator: Locator<F, Q>, router: RoutePlanner<R>) -> Self {
        Self { locator, router }
    }

    /// Plan an evacuation for one crisis location.
    pub async fn plan(&self, request: &PlanRequest, cancel: &CancelSignal) -> Result<Plan, PlanError> {
        let span = tracing::info_span!("plan", crisis = %request.crisis_id);
        self.run(request, cancel).instrument(span).await
    }

    async fn run(&self, request: &PlanRequest, cancel: &CancelSignal) -> Result<Plan, PlanError> {
        let spots = self
            .locator
            .locate(
                request.latitude,
                request.longitude,
                request.search_radius_meters,
                cancel,
            )
            .await?;

        let route = match spots.first() {
            Some(best) => {
                self.router
                    .route(
                        &request.crisis_id,
                        (request.latitude, request.longitude),
                        best,
                        request.sample_interval,
                        cancel,
                    )
                    .await?
            }
            None => None,
        };

        let plan = assemble_plan(request, spots, route);
        tracing::info!(
            candidates = plan.all_safe_spots.len(),
            routed = plan.primary_route.is_some(),
            "Evacuation plan assembled"
        );
        Ok(plan)
    }
}

/// Merge locator and planner output into a [`Plan`].
///
/// A route whose destination is not the top-ranked spot is discarded.
pub fn assemble_plan(request: &PlanRequest, spots: Vec<SafeSpot>, route: Option<Route>) -> Plan {
    let best = spots.first().cloned();
    let route = match &best {
        Some(best) => route.filter(|route| route.destination_id == best.id),
        None => None,
    };
    let summary = summarize(&request.crisis_title, &spots, route.as_ref());

    Plan {
        crisis_id: request.crisis_id.clone(),
        crisis_title: request.crisis_title.clone(),
        crisis_latitude: request.latitude,
        crisis_longitude: request.longitude,
        all_safe_spots: spots,
        best_safe_spot: best,
        primary_route: route,
        summary,
    }
}

/// Human-readable plan summary.
pub fn summarize(crisis_title: &str, spots: &[SafeSpot], route: Option<&Route>) -> String {
    let Some(best) = spots.first() else {
        return format!(
            "No evacuation routes available for {}. Contact emergency services immediately.",
            crisis_title
        );
    };

    let found = match spots.len() {
        1 => "1 safe location".to_string(),
        n => format!("{} safe locations", n),
    };

    match route {
        Some(route) => format!(
            "Evacuate from {} to {} ({}): {:.1} km, about {} min by car. Found {}: {}.",
            crisis_title,
            best.name,
            best.kind.label(),
            route.distance_km,
            route.duration_min,
            found,
            type_breakdown(spots),
        ),
        None => format!(
            "Found {} near {}: {}. Best option is {} ({}), but no driving route could be \
             computed. Follow local emergency guidance.",
            found,
            crisis_title,
            type_breakdown(spots),
            best.name,
            best.kind.label(),
        ),
    }
}

/// `"2 hospitals, 1 shelter"`, in priority order.
fn type_breakdown(spots: &[SafeSpot]) -> String {
    SafeSpotType::ALL
        .iter()
        .filter_map(|kind| {
            let count = spots.iter().filter(|spot| spot.kind == *kind).count();
            (count > 0).then(|| kind.count_phrase(count))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
