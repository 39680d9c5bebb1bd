use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use evomedi_server::ai::{EvolutionGenerator, OpenAiClient};
use evomedi_server::config::AppConfig;
use evomedi_server::db::{migrations, Database};
use evomedi_server::{handlers, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    migrations::run_migrations(&pool, "migrations").await?;
    tracing::info!("database connected and migrated");

    if config.ai.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; evolution generation will be unavailable");
    }

    let backend = Arc::new(OpenAiClient::new(&config.ai)?);
    let generator = Arc::new(EvolutionGenerator::new(&config.ai, backend));

    let state = AppState {
        db: Arc::new(Database::new(pool)),
        generator,
    };

    // Build our application with routes
    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/units", get(handlers::list_units))
        .route("/api/units/:id/shifts", get(handlers::list_shifts))
        .route("/api/beds/:id/status", put(handlers::update_bed_status))
        .route(
            "/api/patients",
            post(handlers::create_patient).get(handlers::list_patients),
        )
        .route("/api/patients/:id", get(handlers::get_patient))
        .route(
            "/api/patients/:id/status",
            put(handlers::update_patient_status),
        )
        .route(
            "/api/patients/:id/evolutions",
            post(handlers::create_evolution).get(handlers::list_evolutions),
        )
        .route(
            "/api/patients/:id/tasks",
            get(handlers::list_tasks),
        )
        .route(
            "/api/patients/:id/labs",
            post(handlers::create_laboratory).get(handlers::list_laboratories),
        )
        .route("/api/tasks", post(handlers::create_task))
        .route("/api/tasks/:id/status", put(handlers::update_task_status))
        .route("/api/shifts", post(handlers::create_shift))
        .route("/api/users", get(handlers::list_users))
        .route(
            "/api/generate-evolution",
            post(handlers::generate_evolution),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("server running on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
