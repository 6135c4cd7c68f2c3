//! Reservation aggregate
//!
//! Contains the Reservation entity, its value objects, and repository interface.

pub mod model;
pub mod repository;

pub use model::{BookingSlot, ClientName, Reservation, ReservationDate, ReservationId};
pub use repository::ReservationRepository;
