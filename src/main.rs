mod api;
mod config;
mod domain;
mod infrastructure;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use api::handlers::teams;
use config::AppConfig;
use infrastructure::repositories::PostgresTeamRepository;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = config
        .database
        .connect()
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connected successfully");

    // Create the teams table if this is a fresh database
    PostgresTeamRepository::ensure_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    tracing::info!("Database schema ready");

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(teams::health_check))
        // Team progress routes
        .route("/create_team", post(teams::create_team))
        .route("/update_score", post(teams::update_score))
        .route("/get_team_status", get(teams::get_team_status))
        .route("/validate_step", post(teams::validate_step))
        .route("/get_spectator_data", get(teams::get_spectator_data))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(pool);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
