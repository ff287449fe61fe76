use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use transit_gateway::cache::{CacheConfig, CachedGeocoder};
use transit_gateway::config::GatewayConfig;
use transit_gateway::content::{ContentClient, ContentSources};
use transit_gateway::geocoder::{GeocoderConfig, SolrGeocoder};
use transit_gateway::otp::{OtpClient, OtpConfig};
use transit_gateway::planner::{PlannerConfig, TripPlanner};
use transit_gateway::transit::{InMemoryRepository, TransitRepository, TransitSnapshot};
use transit_gateway::web::{AppState, create_router};

/// How often to recompute the current route tables (24 hours).
const ROUTE_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = GatewayConfig::from_env()?;
    let timeout_secs = config.http_timeout.as_secs();

    // Geocoder with cache
    let geocoder = SolrGeocoder::new(
        GeocoderConfig::new(config.geocoder_url.as_str()).with_timeout(timeout_secs),
    )?;
    let cache_config = CacheConfig {
        ttl: config.geocode_cache_ttl,
        ..CacheConfig::default()
    };
    let geocoder = CachedGeocoder::new(geocoder, &cache_config);

    let otp = OtpClient::new(OtpConfig::new(config.otp_url.as_str()).with_timeout(timeout_secs))?;

    // Optional content, loaded once
    let content_client = ContentClient::new(timeout_secs)?;
    let content = ContentSources::load(&content_client, &config.content).await;
    info!(?content, "content sources ready");

    let planner = TripPlanner::new(
        geocoder,
        otp,
        content,
        PlannerConfig::new(config.otp_url.clone()).with_pretty(config.pretty),
    );

    // Transit index; empty when no snapshot is configured
    let today = Local::now().date_naive();
    let snapshot = match &config.routes_data {
        Some(path) => {
            let snapshot = TransitSnapshot::load(path)?;
            info!(
                path = %path.display(),
                routes = snapshot.routes.len(),
                "loaded transit snapshot"
            );
            snapshot
        }
        None => {
            warn!("ROUTES_DATA not set, transit index will be empty");
            TransitSnapshot::default()
        }
    };
    let repository = Arc::new(InMemoryRepository::new(snapshot, today));

    let transit: Arc<dyn TransitRepository> = repository.clone();
    let state = AppState::new(planner, transit, config.agency_id.clone());

    // Recompute the current tables daily
    let planner = state.planner.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(ROUTE_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            repository.refresh_current(Local::now().date_naive());
            info!(
                geocode_cache_entries = planner.geocoder().cache_entry_count(),
                "daily refresh done"
            );
        }
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "transit gateway listening");
    info!("  GET /health");
    info!("  GET /plan");
    info!("  GET /ti/routes, /ti/routes/:id, /ti/stops/:stop/routes, /ti/mock/routes");

    axum::serve(listener, app).await?;
    Ok(())
}
