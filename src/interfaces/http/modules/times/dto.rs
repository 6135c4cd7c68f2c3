//! Reservation time DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{ReservationTime, TimeAvailability};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimeDto {
    pub id: i32,
    /// Start of the slot, `HH:MM`
    pub start_at: String,
}

impl From<&ReservationTime> for TimeDto {
    fn from(t: &ReservationTime) -> Self {
        Self {
            id: t.id().map(|id| id.value()).unwrap_or_default(),
            start_at: t.start_at().format("%H:%M").to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTimeRequest {
    /// `HH:MM` or `HH:MM:SS`
    #[validate(length(min = 1, message = "start_at must not be empty"))]
    pub start_at: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// `YYYY-MM-DD`
    pub date: String,
    pub theme_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailableTimeDto {
    pub time_id: i32,
    pub start_at: String,
    pub already_booked: bool,
}

impl From<&TimeAvailability> for AvailableTimeDto {
    fn from(a: &TimeAvailability) -> Self {
        let time = TimeDto::from(&a.time);
        Self {
            time_id: time.id,
            start_at: time.start_at,
            already_booked: a.already_booked,
        }
    }
}
