pub mod repositories;
pub mod reservation;
pub mod reservation_time;
pub mod theme;

// Re-export commonly used types
pub use repositories::RepositoryProvider;
pub use reservation::{
    BookingSlot, ClientName, Reservation, ReservationDate, ReservationId, ReservationRepository,
};
pub use reservation_time::{ReservationTime, ReservationTimeRepository, TimeAvailability, TimeId};
pub use theme::{Theme, ThemeDescription, ThemeId, ThemeName, ThemeRepository};

pub use crate::shared::errors::{ConflictKind, DomainError, DomainResult, EntityKind};
