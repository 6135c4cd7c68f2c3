use std::fmt;

use thiserror::Error;

/// Entity kinds a lookup can miss on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Reservation,
    Theme,
    Time,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reservation => "Reservation",
            Self::Theme => "Theme",
            Self::Time => "ReservationTime",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which consistency rule a rejected mutation would have broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// (date, time, theme) is already reserved
    DuplicateBooking,
    /// Theme is still referenced by at least one reservation
    ThemeInUse,
    /// Reservation time is still referenced by at least one reservation
    TimeInUse,
    /// Another reservation time starts at the same moment
    DuplicateTime,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateBooking => "DuplicateBooking",
            Self::ThemeInUse => "ThemeInUse",
            Self::TimeInUse => "TimeInUse",
            Self::DuplicateTime => "DuplicateTime",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::DuplicateBooking => "this date, time and theme are already reserved",
            Self::ThemeInUse => "theme is referenced by existing reservations",
            Self::TimeInUse => "reservation time is referenced by existing reservations",
            Self::DuplicateTime => "a reservation time with this start already exists",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation: {0}")]
    Validation(String),

    #[error("Not found: {kind} with id={id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Conflict ({0}): {msg}", msg = .0.message())]
    Conflict(ConflictKind),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried by the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }

    pub fn is_conflict(&self, kind: ConflictKind) -> bool {
        matches!(self, DomainError::Conflict(k) if *k == kind)
    }

    pub fn is_not_found(&self, kind: EntityKind) -> bool {
        matches!(self, DomainError::NotFound { kind: k, .. } if *k == kind)
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
