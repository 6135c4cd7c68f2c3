//! Reservation time repository interface

use async_trait::async_trait;
use chrono::NaiveTime;

use super::model::{ReservationTime, TimeId};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationTimeRepository: Send + Sync {
    async fn find_by_id(&self, id: TimeId) -> DomainResult<Option<ReservationTime>>;

    /// All times, start ascending
    async fn find_all(&self) -> DomainResult<Vec<ReservationTime>>;

    async fn exists_by_id(&self, id: TimeId) -> DomainResult<bool>;

    async fn exists_by_start_at(&self, start_at: NaiveTime) -> DomainResult<bool>;

    /// Persist a new time and return it with its assigned id
    async fn save(&self, time: ReservationTime) -> DomainResult<ReservationTime>;

    /// Delete a time that no reservation references.
    ///
    /// Returns `false` when no time had this id. Fails with
    /// `Conflict(TimeInUse)` if a reservation references it at delete time.
    async fn delete_by_id(&self, id: TimeId) -> DomainResult<bool>;
}
