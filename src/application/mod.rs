//! Application layer - use-case orchestration over the domain repositories

pub mod booking;

pub use booking::{
    PastDatePolicy, ReservationService, ReservationTimeService, ThemeService,
};
