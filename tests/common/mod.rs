//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use roomescape::domain::{RepositoryProvider, ReservationTime, Theme};
use roomescape::infrastructure::database::migrator::Migrator;
use roomescape::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tempfile::TempDir;

/// A migrated SQLite database in a temporary directory.
///
/// Keep the value alive for the duration of the test; dropping it removes
/// the database file.
pub struct TestDb {
    pub db: DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    _dir: TempDir,
}

pub async fn sqlite() -> TestDb {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roomescape.db");
    let config = DatabaseConfig::sqlite(path.to_str().unwrap());

    let db = init_database(&config).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    TestDb {
        repos: Arc::new(SeaOrmRepositoryProvider::new(db.clone())),
        db,
        _dir: dir,
    }
}

pub async fn theme(repos: &dyn RepositoryProvider, name: &str) -> Theme {
    repos
        .themes()
        .save(Theme::create(name, "desc", "thumb").unwrap())
        .await
        .unwrap()
}

pub async fn time(repos: &dyn RepositoryProvider, start_at: &str) -> ReservationTime {
    repos
        .times()
        .save(ReservationTime::parse(start_at).unwrap())
        .await
        .unwrap()
}
