//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{ReservationRepository, ReservationTimeRepository, ThemeRepository};

use super::reservation_repository::SeaOrmReservationRepository;
use super::reservation_time_repository::SeaOrmReservationTimeRepository;
use super::theme_repository::SeaOrmThemeRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let theme = repos.themes().find_by_id(ThemeId(1)).await?;
/// let booked = repos.reservations().find_all_by_date_and_theme(date, ThemeId(1)).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    reservations: SeaOrmReservationRepository,
    themes: SeaOrmThemeRepository,
    times: SeaOrmReservationTimeRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            reservations: SeaOrmReservationRepository::new(db.clone()),
            themes: SeaOrmThemeRepository::new(db.clone()),
            times: SeaOrmReservationTimeRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn themes(&self) -> &dyn ThemeRepository {
        &self.themes
    }

    fn times(&self) -> &dyn ReservationTimeRepository {
        &self.times
    }
}
