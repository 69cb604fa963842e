use std::net::SocketAddr;
use std::sync::Arc;

use gtm_apify::ApifyClient;
use gtm_core::links::ConsoleLinks;
use gtm_core::platform::ActorPlatform;
use gtm_core::service::ConsultationService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gtm_api::config::ServerConfig;
use gtm_api::router::build_app_router;
use gtm_api::state::AppState;

const DEFAULT_LOG_FILTER: &str = "gtm_api=debug,gtm_core=debug,gtm_apify=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid configuration");
    tracing::info!(
        host = %config.host,
        port = %config.port,
        app_env = %config.app_env,
        actor_id = %config.apify.actor_id,
        "Loaded server configuration",
    );

    // --- Platform client ---
    let apify = ApifyClient::new(config.apify.base_url.clone(), config.apify.token.clone())
        .expect("Failed to build Apify HTTP client");
    if apify.has_token() {
        tracing::info!("Apify token configured");
    } else {
        tracing::warn!("APIFY_API_TOKEN is not set; platform calls will be rejected");
    }
    let platform: Arc<dyn ActorPlatform> = Arc::new(apify);

    // --- Consultation service ---
    let consultations = Arc::new(ConsultationService::new(
        platform,
        config.apify.actor_settings(),
        ConsoleLinks::new(config.apify.console_url.clone()),
        config.confirm_new_consultation_default,
    ));

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        consultations,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting GTM Alpha backend");
    tracing::info!("Health check: GET http://{addr}/health");
    tracing::info!("GTM consultation: POST http://{addr}/api/gtm-consultation");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Install the global subscriber. `LOG_FORMAT=json` selects JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). In-flight
/// consultations are allowed to finish; their remote runs keep going
/// regardless.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
