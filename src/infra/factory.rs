use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
use rand::rngs::OsRng;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{info, warn};
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::models::admin::Admin;
use crate::domain::services::token_service::TokenService;
use crate::infra::repositories::{
    postgres_admin_repo::PostgresAdminRepo, postgres_booking_repo::PostgresBookingRepo,
    postgres_customer_repo::PostgresCustomerRepo,
    sqlite_admin_repo::SqliteAdminRepo, sqlite_booking_repo::SqliteBookingRepo,
    sqlite_customer_repo::SqliteCustomerRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let token_service = Arc::new(TokenService::new(config));

    let state = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            customer_repo: Arc::new(PostgresCustomerRepo::new(pool.clone())),
            admin_repo: Arc::new(PostgresAdminRepo::new(pool.clone())),
            booking_repo: Arc::new(PostgresBookingRepo::new(pool.clone())),
            token_service,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            customer_repo: Arc::new(SqliteCustomerRepo::new(pool.clone())),
            admin_repo: Arc::new(SqliteAdminRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            token_service,
        }
    };

    seed_bootstrap_admin(&state).await;

    state
}

/// Creates the configured initial administrator account if it does not exist
/// yet, so a fresh deployment has a working admin login.
async fn seed_bootstrap_admin(state: &AppState) {
    let (email, password) = match (
        state.config.bootstrap_admin_email.as_ref(),
        state.config.bootstrap_admin_password.as_ref(),
    ) {
        (Some(email), Some(password)) => (email, password),
        _ => return,
    };

    match state.admin_repo.find_by_email(email).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            let salt = SaltString::generate(&mut OsRng);
            let password_hash = match Argon2::default().hash_password(password.as_bytes(), &salt) {
                Ok(hash) => hash.to_string(),
                Err(e) => {
                    warn!("Failed to hash bootstrap admin password: {}", e);
                    return;
                }
            };

            let admin = Admin::new(email.clone(), password_hash);
            match state.admin_repo.create(&admin).await {
                Ok(created) => info!("Bootstrap admin created: {}", created.email),
                Err(e) => warn!("Failed to create bootstrap admin: {:?}", e),
            }
        }
        Err(e) => warn!("Bootstrap admin lookup failed: {:?}", e),
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
