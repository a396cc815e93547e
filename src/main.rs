use actix_web::{App, HttpServer, middleware::Logger};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic::{
  adapters::http::{ApiDependencies, RequestIdMiddleware, configure_app},
  infrastructure::{
    config::Config,
    persistence::postgres::{
      PostgresMedicineRepository, PostgresPatientRepository, PostgresTransactor,
      PostgresUserRepository,
    },
    security::{Argon2PasswordHasher, JwtTokenService},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "clinic=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting clinic backend");

  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      format!("Invalid configuration: {}", e),
    )
  })?;
  tracing::info!("Configuration loaded successfully");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?",
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to run database migrations: {}", e);
      std::io::Error::other(format!("Migration error: {}", e))
    })?;
  tracing::info!("Database migrations completed");

  let hasher = Argon2PasswordHasher::new().map_err(|e| {
    tracing::error!("Failed to initialize password hasher: {}", e);
    std::io::Error::other(e.to_string())
  })?;
  let tokens = JwtTokenService::new(
    &config.security.jwt_secret,
    config.security.app_name.clone(),
    config.security.token_ttl_seconds,
  );

  let deps = ApiDependencies::new(
    Arc::new(PostgresTransactor::new(db_pool)),
    Arc::new(PostgresUserRepository::new()),
    Arc::new(PostgresPatientRepository::new()),
    Arc::new(PostgresMedicineRepository::new()),
    Arc::new(hasher),
    Arc::new(tokens),
    config.security.medicine_role_id,
  );

  if let Some(role_id) = config.security.medicine_role_id {
    tracing::info!("Medicine endpoints restricted to role {}", role_id);
  }

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    let deps = deps.clone();
    App::new()
      .wrap(Logger::default())
      .wrap(RequestIdMiddleware::new())
      .configure(|cfg| configure_app(cfg, &deps))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}
