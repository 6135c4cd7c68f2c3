//! Database entities module

pub mod reservation;
pub mod reservation_time;
pub mod theme;

pub use reservation::Entity as Reservation;
pub use reservation_time::Entity as ReservationTime;
pub use theme::Entity as Theme;
