//! Reservation time slot entity

use std::fmt;

use chrono::NaiveTime;

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeId(pub i32);

impl TimeId {
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for TimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for TimeId {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Parse `HH:MM` or `HH:MM:SS` into a time of day.
pub fn parse_start_at(raw: &str) -> DomainResult<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| DomainError::Validation(format!("invalid time of day: '{}'", raw)))
}

/// Bookable start time shared by all themes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationTime {
    id: Option<TimeId>,
    start_at: NaiveTime,
}

impl ReservationTime {
    pub fn new(start_at: NaiveTime) -> Self {
        Self { id: None, start_at }
    }

    pub fn parse(raw: &str) -> DomainResult<Self> {
        Ok(Self::new(parse_start_at(raw)?))
    }

    pub fn of(id: TimeId, start_at: NaiveTime) -> Self {
        Self {
            id: Some(id),
            start_at,
        }
    }

    pub fn with_id(&self, id: TimeId) -> Self {
        Self::of(id, self.start_at)
    }

    pub fn id(&self) -> Option<TimeId> {
        self.id
    }

    pub fn persisted_id(&self) -> DomainResult<TimeId> {
        self.id
            .ok_or_else(|| DomainError::Validation("reservation time has not been saved".into()))
    }

    pub fn start_at(&self) -> NaiveTime {
        self.start_at
    }
}

/// A time slot and whether it is taken for a given date and theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeAvailability {
    pub time: ReservationTime,
    pub already_booked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hours_and_minutes() {
        let t = ReservationTime::parse("10:00").unwrap();
        assert_eq!(t.start_at(), NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(t.id(), None);
    }

    #[test]
    fn parses_seconds_form() {
        let t = parse_start_at("02:22:00").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(2, 22, 0).unwrap());
    }

    #[test]
    fn rejects_malformed_time() {
        assert!(matches!(
            ReservationTime::parse("25:99"),
            Err(DomainError::Validation(_))
        ));
        assert!(ReservationTime::parse("ten o'clock").is_err());
    }

    #[test]
    fn with_id_keeps_start() {
        let t = ReservationTime::parse("10:00").unwrap().with_id(TimeId(4));
        assert_eq!(t.id(), Some(TimeId(4)));
        assert_eq!(t.start_at(), NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    }
}
