//! evac-plan: plan an evacuation for one crisis location and print it as JSON.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use evac_planner::{
    assembler::EvacuationPlanner,
    cancel::CancelSignal,
    config::Config,
    error::PlanError,
    locator::Locator,
    models::{DEFAULT_SAMPLE_INTERVAL, DEFAULT_SEARCH_RADIUS_METERS, PlanRequest},
    osrm::OsrmClient,
    overpass::OverpassClient,
    planner::RoutePlanner,
    projector::project_plan,
    quota::{DailyQuota, Unlimited},
    traits::QuotaGuard,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Crisis latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Crisis longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Crisis title used in the summary
    #[arg(long, default_value = "Crisis")]
    title: String,

    /// Crisis identifier
    #[arg(long, default_value = "crisis")]
    id: String,

    /// Search radius in meters
    #[arg(long, default_value_t = DEFAULT_SEARCH_RADIUS_METERS)]
    radius: u32,

    /// Keep every Nth route point
    #[arg(long, default_value_t = DEFAULT_SAMPLE_INTERVAL)]
    sample_interval: usize,

    /// Print map layers instead of the plan
    #[arg(long)]
    layers: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.json_logs);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Planning failed");
            match err.downcast_ref::<PlanError>() {
                Some(PlanError::QuotaExceeded { .. }) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;
    tracing::info!(
        overpass = %config.overpass.base_url,
        osrm = %config.osrm.base_url,
        "Starting evacuation planner"
    );

    let quota: Arc<dyn QuotaGuard + Send + Sync> = match config.daily_quota {
        Some(limit) => Arc::new(DailyQuota::new(limit)),
        None => Arc::new(Unlimited),
    };
    let locator = Locator::new(OverpassClient::new(config.overpass.clone())?, quota);
    let router = RoutePlanner::new(OsrmClient::new(config.osrm.clone())?);
    let planner = EvacuationPlanner::new(locator, router);

    let request = PlanRequest::new(args.id, args.title, args.lat, args.lon)
        .with_search_radius(args.radius)
        .with_sample_interval(args.sample_interval);

    let (handle, cancel) = CancelSignal::new();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            handle.cancel();
        }
    });

    let plan = planner.plan(&request, &cancel).await?;
    let output = if args.layers {
        serde_json::to_string_pretty(&project_plan(&plan))?
    } else {
        serde_json::to_string_pretty(&plan)?
    };
    println!("{}", output);
    Ok(())
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("evac_planner=debug,info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
