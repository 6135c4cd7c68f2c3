//! Theme HTTP handlers

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::Json;

use crate::domain::ThemeId;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::BookingState;

use super::dto::*;

#[utoipa::path(
    get,
    path = "/themes",
    tag = "Themes",
    responses(
        (status = 200, description = "All themes, id ascending", body = ApiResponse<Vec<ThemeDto>>)
    )
)]
pub async fn list_themes(
    State(state): State<BookingState>,
) -> Result<Json<ApiResponse<Vec<ThemeDto>>>, ApiError> {
    let themes = state.themes.list_themes().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        themes.iter().map(ThemeDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/themes/popular",
    tag = "Themes",
    responses(
        (status = 200, description = "Most booked themes of the last seven days", body = ApiResponse<Vec<ThemeDto>>)
    )
)]
pub async fn list_popular_themes(
    State(state): State<BookingState>,
) -> Result<Json<ApiResponse<Vec<ThemeDto>>>, ApiError> {
    let themes = state
        .themes
        .list_popular_themes()
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        themes.iter().map(ThemeDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/themes/{theme_id}",
    tag = "Themes",
    params(("theme_id" = i32, Path, description = "Theme ID")),
    responses(
        (status = 200, description = "Theme", body = ApiResponse<ThemeDto>),
        (status = 404, description = "Theme not found")
    )
)]
pub async fn get_theme(
    State(state): State<BookingState>,
    Path(theme_id): Path<i32>,
) -> Result<Json<ApiResponse<ThemeDto>>, ApiError> {
    let theme = state
        .themes
        .get_theme(ThemeId(theme_id))
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(ThemeDto::from(&theme))))
}

#[utoipa::path(
    post,
    path = "/themes",
    tag = "Themes",
    request_body = CreateThemeRequest,
    responses(
        (status = 201, description = "Theme created", body = ApiResponse<ThemeDto>),
        (status = 400, description = "Invalid theme"),
        (status = 422, description = "Request body failed validation")
    )
)]
pub async fn create_theme(
    State(state): State<BookingState>,
    ValidatedJson(request): ValidatedJson<CreateThemeRequest>,
) -> Result<
    (
        StatusCode,
        [(header::HeaderName, String); 1],
        Json<ApiResponse<ThemeDto>>,
    ),
    ApiError,
> {
    let theme = state
        .themes
        .create_theme(&request.name, &request.description, &request.thumbnail)
        .await
        .map_err(domain_error)?;
    let dto = ThemeDto::from(&theme);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/themes/{}", dto.id))],
        Json(ApiResponse::success(dto)),
    ))
}

#[utoipa::path(
    delete,
    path = "/themes/{theme_id}",
    tag = "Themes",
    params(("theme_id" = i32, Path, description = "Theme ID")),
    responses(
        (status = 204, description = "Theme deleted"),
        (status = 404, description = "Theme not found"),
        (status = 409, description = "Theme is referenced by reservations")
    )
)]
pub async fn delete_theme(
    State(state): State<BookingState>,
    Path(theme_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .themes
        .delete_theme(ThemeId(theme_id))
        .await
        .map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
