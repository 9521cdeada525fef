//! Field service server - main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{App, HttpRequest, HttpServer, Result as ActixResult, http::header, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use field_service_lib::api::{self, ApiDoc};
use field_service_lib::auth::SessionKeys;
use field_service_lib::config::Config;
use field_service_lib::db::DbPool;
use field_service_lib::middleware;
use field_service_lib::services::{DistanceEstimator, RandomDistance};

/// SPA fallback handler - serves index.html for client-side routing.
async fn spa_fallback(req: HttpRequest) -> ActixResult<NamedFile> {
    let static_dir = req
        .app_data::<web::Data<PathBuf>>()
        .ok_or_else(|| actix_web::error::ErrorNotFound("Static dir not configured"))?;
    Ok(NamedFile::open(static_dir.join("index.html"))?)
}

/// Perform health check (for Docker healthcheck).
fn health_check() -> bool {
    Config::from_env().is_ok()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    if std::env::args().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        std::process::exit(if health_check() { 0 } else { 1 });
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL and FS_SESSION_SECRET must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Field Service Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
        info!("Using development defaults for DATABASE_URL and FS_SESSION_SECRET");
    }
    if config.allow_signup {
        warn!("Public sign-up is enabled (FS_ALLOW_SIGNUP)");
    }

    let pool = match DbPool::new(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };
    info!("Database connection established");

    if let Err(e) = pool.run_migrations().await {
        error!("Failed to run migrations: {}", e);
        std::process::exit(1);
    }
    info!("Database migrations complete");

    // Prepare shared state
    let bind_address = config.bind_address();
    let session_keys = SessionKeys::from_settings(&config.session);
    let estimator: Arc<dyn DistanceEstimator> = Arc::new(RandomDistance);
    let static_dir = config.static_dir.clone();
    let is_development = config.is_development();
    let openapi = ApiDoc::openapi();
    let shared_config = web::Data::new(config);

    if let Some(dir) = &static_dir {
        info!("Static file serving enabled from {:?}", dir);
    }

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    // Start HTTP server
    let server = HttpServer::new(move || {
        let cors = if is_development {
            // Frontend dev server on another port, with cookies
            Cors::default()
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
                .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                .allowed_headers(vec![
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::CONTENT_TYPE,
                ])
                .supports_credentials()
                .max_age(3600)
        } else {
            // Same-origin only
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                .allowed_headers(vec![
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::CONTENT_TYPE,
                ])
                .max_age(3600)
        };

        let mut app = App::new()
            .wrap(middleware::RequestLogger)
            // Registered last, so CORS wraps outermost
            .wrap(cors)
            .app_data(web::Data::new(pool.clone()))
            .app_data(shared_config.clone())
            .app_data(web::Data::new(session_keys.clone()))
            .app_data(web::Data::from(estimator.clone()))
            .service(web::scope("/api/v1").configure(api::configure_api))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            );

        // Serve the built frontend when FS_STATIC_DIR is set
        if let Some(ref dir) = static_dir {
            app = app
                .app_data(web::Data::new(dir.clone()))
                .service(Files::new("/assets", dir.join("assets")).prefer_utf8(true))
                .service(Files::new("/favicon", dir.clone()).index_file("favicon.ico"))
                .default_service(web::route().to(spa_fallback));
        }

        app
    });

    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
