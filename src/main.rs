use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tour_match::config::{LoggingSettings, Settings};
use tour_match::core::Recommender;
use tour_match::routes::{self, recommendations::AppState};
use tour_match::services::PostgresClient;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize logging; RUST_LOG overrides the configured level
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Configuration error: {}", e))
    })?;

    init_tracing(&settings.logging);
    info!("Configuration loaded successfully");

    let store = PostgresClient::from_settings(&settings.database, &settings.catalog)
        .await
        .map_err(|e| {
            error!("Failed to connect to PostgreSQL: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
        })?;

    info!(
        "PostgreSQL client initialized (max: {} connections)",
        settings.database.max_connections.unwrap_or(10)
    );

    let scoring = settings.scoring_config();
    let w = scoring.weights;
    if w.budget_fit + w.preferences + w.travel_style <= 0.0 {
        warn!("Criteria weights are all zero; scores will fall back to rating only");
    }

    let recommender = Recommender::new(scoring);

    info!("Recommender initialized with config: {:?}", scoring);

    let app_state = AppState {
        store: Arc::new(store),
        recommender,
        limits: settings.recommendations.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
