//! Reservation time HTTP handlers

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::Json;

use crate::domain::{ReservationDate, ThemeId, TimeId};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::BookingState;

use super::dto::*;

#[utoipa::path(
    get,
    path = "/times",
    tag = "Times",
    responses(
        (status = 200, description = "All time slots, start ascending", body = ApiResponse<Vec<TimeDto>>)
    )
)]
pub async fn list_times(
    State(state): State<BookingState>,
) -> Result<Json<ApiResponse<Vec<TimeDto>>>, ApiError> {
    let times = state.times.list_times().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        times.iter().map(TimeDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/times/available",
    tag = "Times",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Time slots with booking state", body = ApiResponse<Vec<AvailableTimeDto>>),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Theme not found")
    )
)]
pub async fn list_available_times(
    State(state): State<BookingState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<Vec<AvailableTimeDto>>>, ApiError> {
    let date = ReservationDate::parse(&query.date).map_err(domain_error)?;
    let slots = state
        .times
        .list_availability(date.value(), ThemeId(query.theme_id))
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        slots.iter().map(AvailableTimeDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/times",
    tag = "Times",
    request_body = CreateTimeRequest,
    responses(
        (status = 201, description = "Time slot created", body = ApiResponse<TimeDto>),
        (status = 400, description = "Malformed time"),
        (status = 409, description = "A slot with this start already exists")
    )
)]
pub async fn create_time(
    State(state): State<BookingState>,
    ValidatedJson(request): ValidatedJson<CreateTimeRequest>,
) -> Result<
    (
        StatusCode,
        [(header::HeaderName, String); 1],
        Json<ApiResponse<TimeDto>>,
    ),
    ApiError,
> {
    let time = state
        .times
        .create_time(&request.start_at)
        .await
        .map_err(domain_error)?;
    let dto = TimeDto::from(&time);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/times/{}", dto.id))],
        Json(ApiResponse::success(dto)),
    ))
}

#[utoipa::path(
    delete,
    path = "/times/{time_id}",
    tag = "Times",
    params(("time_id" = i32, Path, description = "Reservation time ID")),
    responses(
        (status = 204, description = "Time slot deleted"),
        (status = 404, description = "Time slot not found"),
        (status = 409, description = "Time slot is referenced by reservations")
    )
)]
pub async fn delete_time(
    State(state): State<BookingState>,
    Path(time_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .times
        .delete_time(TimeId(time_id))
        .await
        .map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
