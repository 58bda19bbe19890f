use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use http::header;
use tracing::info;

use crate::{
    AppState,
    error::ApiError,
    models::{
        BookClassRequest, BookingConfirmation, BookingRecord, ChangeTimezoneRequest, ClassRecord,
        ErrorResponse, MessageResponse, TimezoneResponse,
    },
    validation::{validate_booking, validate_email_query, validate_timezone_change},
};

#[derive(Debug, serde::Deserialize)]
pub struct BookingsQuery {
    pub email: Option<String>,
}

#[utoipa::path(get, path = "/", tag = "booking")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Welcome to the Fitness Booking API!",
        "endpoints": {
            "/classes": "List all fitness classes",
            "/classes.ical": "Download the class schedule as iCal file",
            "/book": "Book a slot in a class",
            "/bookings?email=": "List bookings made by an email address",
            "/admin/change_timezone": "Move the class schedule into another timezone"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "booking")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "booking")]
pub async fn healthz_ready(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "classes": state.bookings.catalog().list().len(),
        "bookings": state.bookings.ledger().len(),
    }))
}

#[utoipa::path(
    get,
    path = "/classes",
    responses(
        (status = 200, description = "All classes in insertion order", body = [ClassRecord])
    ),
    tag = "booking"
)]
pub async fn get_classes(State(state): State<AppState>) -> impl IntoResponse {
    info!("Fetching all classes");
    Json(state.bookings.catalog().list())
}

#[utoipa::path(
    get,
    path = "/classes/{id}",
    params(("id" = String, Path, description = "Class identifier")),
    responses(
        (status = 200, description = "The class", body = ClassRecord),
        (status = 404, description = "Unknown class", body = ErrorResponse)
    ),
    tag = "booking"
)]
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClassRecord>, ApiError> {
    state
        .bookings
        .catalog()
        .get_by_id(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Class with ID '{id}' not found.")))
}

#[utoipa::path(
    get,
    path = "/classes.ical",
    responses(
        (status = 200, description = "iCal file", content_type = "text/calendar")
    ),
    tag = "booking"
)]
pub async fn get_classes_ical(State(state): State<AppState>) -> impl IntoResponse {
    let classes = state.bookings.catalog().list();
    let body = state.exporter.generate(&classes);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/calendar"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=fitness_classes.ics",
            ),
        ],
        body,
    )
}

#[utoipa::path(
    post,
    path = "/book",
    request_body = BookClassRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingConfirmation),
        (status = 400, description = "Invalid request or class is full", body = ErrorResponse),
        (status = 404, description = "Unknown class", body = ErrorResponse)
    ),
    tag = "booking"
)]
pub async fn book_class(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<BookClassRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = validate_booking(request)?;
    info!(
        class_id = %booking.class_id,
        client_email = %booking.client_email,
        "Attempting to book class"
    );

    let confirmation = state.bookings.book(
        &booking.class_id,
        &booking.client_name,
        &booking.client_email,
    )?;

    Ok((StatusCode::CREATED, Json(confirmation)))
}

#[utoipa::path(
    get,
    path = "/bookings",
    params(("email" = String, Query, description = "Client email, matched case-insensitively")),
    responses(
        (status = 200, description = "Bookings made with this email", body = [BookingRecord]),
        (status = 400, description = "Missing or malformed email", body = ErrorResponse),
        (status = 404, description = "No bookings found", body = MessageResponse)
    ),
    tag = "booking"
)]
pub async fn get_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let email = validate_email_query(query.email.as_deref())?;
    info!(client_email = email, "Fetching bookings");

    let bookings = state.bookings.ledger().find_by_email(email);
    if bookings.is_empty() && state.settings.empty_bookings_not_found {
        let body = MessageResponse {
            message: format!("No bookings found for {email}."),
        };
        return Ok((StatusCode::NOT_FOUND, Json(body)).into_response());
    }

    Ok(Json(bookings).into_response())
}

#[utoipa::path(
    post,
    path = "/admin/change_timezone",
    request_body = ChangeTimezoneRequest,
    responses(
        (status = 200, description = "Schedule moved to the new timezone", body = MessageResponse),
        (status = 400, description = "Invalid timezone identifier", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn change_timezone(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<ChangeTimezoneRequest>, ApiError>,
) -> Result<Json<MessageResponse>, ApiError> {
    let new_timezone = validate_timezone_change(request)?;
    info!(timezone = %new_timezone, "Attempting to change timezone");

    let tz = state.timezones.apply(&new_timezone)?;

    Ok(Json(MessageResponse {
        message: format!("Timezone successfully changed to {tz} for all classes."),
    }))
}

#[utoipa::path(
    get,
    path = "/admin/timezone",
    responses(
        (status = 200, description = "Zone the schedule is expressed in", body = TimezoneResponse)
    ),
    tag = "admin"
)]
pub async fn get_timezone(State(state): State<AppState>) -> Json<TimezoneResponse> {
    Json(TimezoneResponse {
        timezone: state.timezones.current().name().to_string(),
    })
}
