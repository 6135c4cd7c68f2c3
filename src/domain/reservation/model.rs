//! Reservation domain entity

use std::fmt;

use chrono::NaiveDate;

use crate::domain::reservation_time::{ReservationTime, TimeId};
use crate::domain::theme::{Theme, ThemeId};
use crate::domain::{DomainError, DomainResult};

pub const CLIENT_NAME_MAX_LENGTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReservationId(pub i32);

impl ReservationId {
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ReservationId {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Name the booking is made under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientName(String);

impl ClientName {
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("client name must not be blank".into()));
        }
        if trimmed.chars().count() > CLIENT_NAME_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "client name must be at most {} characters",
                CLIENT_NAME_MAX_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Calendar date of a reservation. Any date is representable; whether past
/// dates are bookable is decided by the reservation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReservationDate(NaiveDate);

impl ReservationDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse an ISO `YYYY-MM-DD` date.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DomainError::Validation(format!("invalid reservation date: '{}'", raw)))
    }

    pub fn value(&self) -> NaiveDate {
        self.0
    }

    pub fn is_before(&self, other: NaiveDate) -> bool {
        self.0 < other
    }
}

impl From<NaiveDate> for ReservationDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Booking of one theme at one time slot on one date.
///
/// Holds hydrated copies of the referenced theme and time; their lifecycle is
/// managed by their own repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    id: Option<ReservationId>,
    client_name: ClientName,
    date: ReservationDate,
    time: ReservationTime,
    theme: Theme,
    time_id: TimeId,
    theme_id: ThemeId,
}

impl Reservation {
    /// Build an unsaved reservation. Both references must already be persisted.
    pub fn new(
        client_name: ClientName,
        date: ReservationDate,
        time: ReservationTime,
        theme: Theme,
    ) -> DomainResult<Self> {
        let time_id = time.persisted_id()?;
        let theme_id = theme.persisted_id()?;
        Ok(Self {
            id: None,
            client_name,
            date,
            time,
            theme,
            time_id,
            theme_id,
        })
    }

    /// Rehydrate a persisted reservation.
    pub fn of(
        id: ReservationId,
        client_name: ClientName,
        date: ReservationDate,
        time: ReservationTime,
        theme: Theme,
    ) -> DomainResult<Self> {
        Ok(Self::new(client_name, date, time, theme)?.with_id(id))
    }

    pub fn with_id(&self, id: ReservationId) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    pub fn id(&self) -> Option<ReservationId> {
        self.id
    }

    pub fn client_name(&self) -> &ClientName {
        &self.client_name
    }

    pub fn date(&self) -> ReservationDate {
        self.date
    }

    pub fn time(&self) -> &ReservationTime {
        &self.time
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn time_id(&self) -> TimeId {
        self.time_id
    }

    pub fn theme_id(&self) -> ThemeId {
        self.theme_id
    }

    /// The (date, time, theme) triple that must be unique across reservations
    pub fn slot(&self) -> BookingSlot {
        BookingSlot {
            date: self.date.value(),
            time_id: self.time_id(),
            theme_id: self.theme_id(),
        }
    }
}

/// Unique booking key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookingSlot {
    pub date: NaiveDate,
    pub time_id: TimeId,
    pub theme_id: ThemeId,
}

// ── Tests ──────────────────────────────────────────────────────
