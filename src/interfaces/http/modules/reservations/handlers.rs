//! Reservation HTTP handlers

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::Json;

use crate::domain::{ReservationDate, ReservationId, ThemeId, TimeId};
use crate::interfaces::http::common::{
    bad_request, domain_error, ApiError, ApiResponse, ValidatedJson,
};
use crate::interfaces::http::modules::BookingState;

use super::dto::*;

#[utoipa::path(
    get,
    path = "/reservations",
    tag = "Reservations",
    params(ReservationFilter),
    responses(
        (status = 200, description = "Reservations, id ascending", body = ApiResponse<Vec<ReservationDto>>),
        (status = 400, description = "Incomplete or malformed filter")
    )
)]
pub async fn list_reservations(
    State(state): State<BookingState>,
    Query(filter): Query<ReservationFilter>,
) -> Result<Json<ApiResponse<Vec<ReservationDto>>>, ApiError> {
    let reservations = match (filter.date, filter.theme_id) {
        (None, None) => state.reservations.list_reservations().await,
        (Some(date), Some(theme_id)) => {
            let date = ReservationDate::parse(&date).map_err(domain_error)?;
            state
                .reservations
                .list_reservations_filtered(date.value(), ThemeId(theme_id))
                .await
        }
        _ => return Err(bad_request("date and theme_id must be given together")),
    }
    .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        reservations.iter().map(ReservationDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid name or date"),
        (status = 404, description = "Theme or time slot not found"),
        (status = 409, description = "Slot already booked")
    )
)]
pub async fn create_reservation(
    State(state): State<BookingState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<
    (
        StatusCode,
        [(header::HeaderName, String); 1],
        Json<ApiResponse<ReservationDto>>,
    ),
    ApiError,
> {
    let reservation = state
        .reservations
        .create_reservation(
            &request.date,
            &request.name,
            TimeId(request.time_id),
            ThemeId(request.theme_id),
        )
        .await
        .map_err(domain_error)?;

    let dto = ReservationDto::from(&reservation);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/reservations/{}", dto.id))],
        Json(ApiResponse::success(dto)),
    ))
}

#[utoipa::path(
    delete,
    path = "/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 204, description = "Reservation cancelled"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn delete_reservation(
    State(state): State<BookingState>,
    Path(reservation_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .reservations
        .delete_reservation(ReservationId(reservation_id))
        .await
        .map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
