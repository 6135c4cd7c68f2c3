//! Reservation time aggregate

pub mod model;
pub mod repository;

pub use model::{parse_start_at, ReservationTime, TimeAvailability, TimeId};
pub use repository::ReservationTimeRepository;
