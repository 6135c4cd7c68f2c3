//! Reservation use-cases

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::domain::{
    ClientName, ConflictKind, DomainError, DomainResult, EntityKind, RepositoryProvider,
    Reservation, ReservationDate, ReservationId, ThemeId, TimeId,
};

/// Whether bookings dated before today are accepted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PastDatePolicy {
    #[default]
    Allow,
    Reject,
}

impl PastDatePolicy {
    pub fn from_reject_flag(reject: bool) -> Self {
        if reject {
            Self::Reject
        } else {
            Self::Allow
        }
    }
}

/// Reservation service: booking, listing and cancellation.
pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    past_dates: PastDatePolicy,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            past_dates: PastDatePolicy::default(),
        }
    }

    pub fn with_past_date_policy(mut self, policy: PastDatePolicy) -> Self {
        self.past_dates = policy;
        self
    }

    // ── Queries ─────────────────────────────────────────────────

    /// All reservations with theme and time attached, id ascending
    pub async fn list_reservations(&self) -> DomainResult<Vec<Reservation>> {
        self.repos.reservations().find_all().await
    }

    pub async fn list_reservations_filtered(
        &self,
        date: NaiveDate,
        theme_id: ThemeId,
    ) -> DomainResult<Vec<Reservation>> {
        self.repos
            .reservations()
            .find_all_by_date_and_theme(date, theme_id)
            .await
    }

    // ── Commands ────────────────────────────────────────────────

    /// Book `theme_id` at `time_id` on `date` for `client_name`.
    ///
    /// References are resolved before the raw inputs are validated, so an
    /// unknown time or theme is reported even when the name is invalid.
    pub async fn create_reservation(
        &self,
        date: &str,
        client_name: &str,
        time_id: TimeId,
        theme_id: ThemeId,
    ) -> DomainResult<Reservation> {
        let time = self
            .repos
            .times()
            .find_by_id(time_id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Time, time_id))?;
        let theme = self
            .repos
            .themes()
            .find_by_id(theme_id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Theme, theme_id))?;

        let client_name = ClientName::new(client_name)?;
        let date = ReservationDate::parse(date)?;
        if self.past_dates == PastDatePolicy::Reject && date.is_before(Local::now().date_naive()) {
            return Err(DomainError::Validation(format!(
                "Reservation date {} is in the past",
                date.value()
            )));
        }

        let already_booked = self
            .repos
            .reservations()
            .exists_by_date_and_time_and_theme(date.value(), time_id, theme_id)
            .await?;
        if already_booked {
            warn!(date = %date.value(), time_id = %time_id, theme_id = %theme_id, "Slot already booked");
            return Err(DomainError::Conflict(ConflictKind::DuplicateBooking));
        }

        let saved = self
            .repos
            .reservations()
            .save(Reservation::new(client_name, date, time, theme)?)
            .await?;

        if let Some(id) = saved.id() {
            info!(
                reservation_id = %id,
                date = %date.value(),
                time_id = %time_id,
                theme_id = %theme_id,
                "Reservation created"
            );
        }
        Ok(saved)
    }

    pub async fn delete_reservation(&self, id: ReservationId) -> DomainResult<()> {
        if !self.repos.reservations().delete_by_id(id).await? {
            return Err(DomainError::not_found(EntityKind::Reservation, id));
        }
        info!(reservation_id = %id, "Reservation deleted");
        Ok(())
    }
}
