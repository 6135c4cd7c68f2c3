//! Reservation DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Reservation;
use crate::interfaces::http::modules::themes::ThemeDto;
use crate::interfaces::http::modules::times::TimeDto;

/// Reservation with its theme and time slot attached
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub time: TimeDto,
    pub theme: ThemeDto,
}

impl From<&Reservation> for ReservationDto {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id().map(|id| id.value()).unwrap_or_default(),
            name: r.client_name().value().to_string(),
            date: r.date().value().format("%Y-%m-%d").to_string(),
            time: TimeDto::from(r.time()),
            theme: ThemeDto::from(r.theme()),
        }
    }
}

/// Request to book a theme at a time slot
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Client name, at most 20 characters
    pub name: String,
    #[validate(range(min = 1, message = "time_id must be positive"))]
    pub time_id: i32,
    #[validate(range(min = 1, message = "theme_id must be positive"))]
    pub theme_id: i32,
}

/// Optional filter; `date` and `theme_id` go together
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReservationFilter {
    pub date: Option<String>,
    pub theme_id: Option<i32>,
}
