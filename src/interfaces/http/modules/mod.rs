//! Per-resource HTTP modules

pub mod health;
pub mod reservations;
pub mod themes;
pub mod times;

use std::sync::Arc;

use crate::application::{ReservationService, ReservationTimeService, ThemeService};

/// Shared state for every booking route
#[derive(Clone)]
pub struct BookingState {
    pub reservations: Arc<ReservationService>,
    pub themes: Arc<ThemeService>,
    pub times: Arc<ReservationTimeService>,
}
