//! Booking use-cases: reservations, themes and time slots
//!
//! HTTP handlers are thin wrappers that delegate to these services.

mod reservation;
mod reservation_time;
mod theme;

pub use reservation::{PastDatePolicy, ReservationService};
pub use reservation_time::ReservationTimeService;
pub use theme::{ThemeService, POPULAR_THEME_LIMIT, POPULAR_WINDOW_DAYS};
