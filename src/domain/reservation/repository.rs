//! Reservation repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Reservation, ReservationId};
use crate::domain::reservation_time::TimeId;
use crate::domain::theme::ThemeId;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// All reservations, hydrated with theme and time, id ascending
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    async fn find_by_id(&self, id: ReservationId) -> DomainResult<Option<Reservation>>;

    async fn find_all_by_date_and_theme(
        &self,
        date: NaiveDate,
        theme_id: ThemeId,
    ) -> DomainResult<Vec<Reservation>>;

    async fn exists_by_date_and_time_and_theme(
        &self,
        date: NaiveDate,
        time_id: TimeId,
        theme_id: ThemeId,
    ) -> DomainResult<bool>;

    async fn exists_by_time_id(&self, time_id: TimeId) -> DomainResult<bool>;

    async fn exists_by_theme_id(&self, theme_id: ThemeId) -> DomainResult<bool>;

    /// Persist a new reservation and return it with its assigned id.
    ///
    /// The store enforces (date, time, theme) uniqueness itself and reports a
    /// violation as `Conflict(DuplicateBooking)`.
    async fn save(&self, reservation: Reservation) -> DomainResult<Reservation>;

    /// Returns `false` when no reservation had this id.
    async fn delete_by_id(&self, id: ReservationId) -> DomainResult<bool>;
}
