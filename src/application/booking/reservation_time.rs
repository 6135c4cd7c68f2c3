//! Reservation time use-cases

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{
    ConflictKind, DomainError, DomainResult, EntityKind, RepositoryProvider, ReservationTime,
    ThemeId, TimeAvailability, TimeId,
};

pub struct ReservationTimeService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReservationTimeService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_times(&self) -> DomainResult<Vec<ReservationTime>> {
        self.repos.times().find_all().await
    }

    /// Every time slot, flagged with whether `theme_id` is booked then on `date`
    pub async fn list_availability(
        &self,
        date: NaiveDate,
        theme_id: ThemeId,
    ) -> DomainResult<Vec<TimeAvailability>> {
        if !self.repos.themes().exists_by_id(theme_id).await? {
            return Err(DomainError::not_found(EntityKind::Theme, theme_id));
        }

        let booked: HashSet<TimeId> = self
            .repos
            .reservations()
            .find_all_by_date_and_theme(date, theme_id)
            .await?
            .iter()
            .map(|r| r.time_id())
            .collect();

        let times = self.repos.times().find_all().await?;
        Ok(times
            .into_iter()
            .map(|time| {
                let already_booked = time.id().is_some_and(|id| booked.contains(&id));
                TimeAvailability {
                    time,
                    already_booked,
                }
            })
            .collect())
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn create_time(&self, start_at: &str) -> DomainResult<ReservationTime> {
        let time = ReservationTime::parse(start_at)?;
        if self.repos.times().exists_by_start_at(time.start_at()).await? {
            return Err(DomainError::Conflict(ConflictKind::DuplicateTime));
        }

        let saved = self.repos.times().save(time).await?;
        if let Some(id) = saved.id() {
            info!(time_id = %id, start_at = %saved.start_at(), "Reservation time created");
        }
        Ok(saved)
    }

    /// Fails with `Conflict(TimeInUse)` while any reservation references it
    pub async fn delete_time(&self, id: TimeId) -> DomainResult<()> {
        if !self.repos.times().delete_by_id(id).await? {
            return Err(DomainError::not_found(EntityKind::Time, id));
        }
        info!(time_id = %id, "Reservation time deleted");
        Ok(())
    }
}
