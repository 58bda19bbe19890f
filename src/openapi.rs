use utoipa::OpenApi;

use crate::models::{
    BookClassRequest, BookingConfirmation, BookingRecord, ChangeTimezoneRequest, ClassRecord,
    ErrorResponse, MessageResponse, TimezoneResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::get_classes,
        crate::handlers::get_class,
        crate::handlers::get_classes_ical,
        crate::handlers::book_class,
        crate::handlers::get_bookings,
        crate::handlers::change_timezone,
        crate::handlers::get_timezone
    ),
    components(schemas(
        ClassRecord,
        BookingRecord,
        BookingConfirmation,
        BookClassRequest,
        ChangeTimezoneRequest,
        MessageResponse,
        TimezoneResponse,
        ErrorResponse
    )),
    tags(
        (name = "booking", description = "Fitness class listing and booking"),
        (name = "admin", description = "Schedule administration")
    ),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_booking_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in ["/classes", "/book", "/bookings", "/admin/change_timezone"] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }
}
