//! API Router with Swagger UI

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::modules::{health, reservations, themes, times, BookingState};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Reservations
        reservations::list_reservations,
        reservations::create_reservation,
        reservations::delete_reservation,
        // Themes
        themes::list_themes,
        themes::list_popular_themes,
        themes::get_theme,
        themes::create_theme,
        themes::delete_theme,
        // Times
        times::list_times,
        times::list_available_times,
        times::create_time,
        times::delete_time,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            reservations::ReservationDto,
            reservations::CreateReservationRequest,
            themes::ThemeDto,
            themes::CreateThemeRequest,
            times::TimeDto,
            times::CreateTimeRequest,
            times::AvailableTimeDto,
        )
    ),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Reservations", description = "Booking a theme at a date and time slot"),
        (name = "Themes", description = "Escape room themes and weekly popularity"),
        (name = "Times", description = "Bookable time slots and their availability"),
    ),
    info(
        title = "Room Escape Booking API",
        version = "1.0.0",
        description = "REST API for booking room escape themes"
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: BookingState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let reservation_routes = Router::new()
        .route(
            "/",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route("/{reservation_id}", delete(reservations::delete_reservation));

    let theme_routes = Router::new()
        .route("/", get(themes::list_themes).post(themes::create_theme))
        .route("/popular", get(themes::list_popular_themes))
        .route(
            "/{theme_id}",
            get(themes::get_theme).delete(themes::delete_theme),
        );

    let time_routes = Router::new()
        .route("/", get(times::list_times).post(times::create_time))
        .route("/available", get(times::list_available_times))
        .route("/{time_id}", delete(times::delete_time));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/reservations", reservation_routes)
        .nest("/themes", theme_routes)
        .nest("/times", time_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
