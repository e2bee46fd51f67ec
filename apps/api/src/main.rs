use std::sync::Arc;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod dashboard;
mod router;

use doctor_cell::services::DoctorCatalogService;
use shared_config::AppConfig;
use shared_store::{AppState, JsonFileBackend, RecordStore, SharedStore};

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting DocSpot API server");

    // Load configuration and open the record store
    let config = AppConfig::from_env();

    let store = if config.is_persistent() {
        let record_store =
            RecordStore::open(Box::new(JsonFileBackend::new(&config.data_path))).unwrap();
        SharedStore::new(record_store)
    } else {
        SharedStore::in_memory()
    };

    if config.seed_catalog {
        let catalog = DoctorCatalogService::new(store.clone());
        if let Err(e) = catalog.seed_demo_catalog("docspot-demo") {
            warn!("demo catalog seeding failed: {}", e);
        }
    }

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Create shared state
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config, store));

    // Build the application router
    let app = router::create_router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new()
                    .level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new()
                    .level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    info!("Listening on {}", bind_addr);

    let listener = TcpListener::bind(&bind_addr).await.unwrap();
    axum::serve(listener, app)
        .await
        .unwrap();
}
