pub mod entities;
mod feedback_repository;
mod guest_repository;
mod settings_repository;
mod song_repository;

pub use feedback_repository::FeedbackRepository;
pub use guest_repository::GuestRepository;
pub use settings_repository::SettingsRepository;
pub use song_repository::SongRepository;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::time::Duration;
use wedding_errors::AppError;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let migration = include_str!("../../../../migrations/001_initial.sql");

    // Statements are idempotent (IF NOT EXISTS), so failures are logged and skipped.
    for statement in migration.split(';') {
        let statement = statement.trim();
        if !statement.is_empty() {
            if let Err(e) = db
                .execute(Statement::from_string(
                    sea_orm::DatabaseBackend::Postgres,
                    statement.to_string(),
                ))
                .await
            {
                tracing::warn!("Migration statement skipped: {}", e);
            }
        }
    }

    Ok(())
}

pub(crate) fn persistence(err: DbErr) -> AppError {
    tracing::error!("Database error: {}", err);
    AppError::Persistence(err.to_string())
}
