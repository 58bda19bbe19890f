pub mod booking;
pub mod catalog;
pub mod error;
pub mod handlers;
pub mod ical;
pub mod ledger;
pub mod models;
pub mod openapi;
pub mod seed;
pub mod settings;
pub mod timezone;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use handlers::{
    book_class, change_timezone, get_bookings, get_class, get_classes, get_classes_ical,
    get_timezone, healthz_live, healthz_ready, root,
};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::booking::BookingService;
use crate::catalog::{ClassCatalog, parse_timezone};
use crate::ical::ICalExporter;
use crate::ledger::BookingLedger;
use crate::openapi::ApiDoc;
use crate::seed::seed_classes;
use crate::settings::Settings;
use crate::timezone::TimezoneRewriter;

#[derive(Clone)]
pub struct AppState {
    pub(crate) settings: Settings,
    pub(crate) bookings: BookingService,
    pub(crate) timezones: TimezoneRewriter,
    pub(crate) exporter: Arc<ICalExporter>,
}

impl AppState {
    /// Builds the stores from seed data. Fails on timezone names the tz database does not know.
    pub fn new(settings: Settings) -> Result<Self, Box<dyn std::error::Error>> {
        let seed_tz = parse_timezone(&settings.seed_timezone)?;
        let booking_tz = parse_timezone(&settings.booking_timezone)?;

        let catalog = Arc::new(ClassCatalog::new(seed_tz, seed_classes(seed_tz)?));
        let ledger = Arc::new(BookingLedger::new(booking_tz));

        Ok(Self {
            settings,
            bookings: BookingService::new(catalog.clone(), ledger),
            timezones: TimezoneRewriter::new(catalog),
            exporter: Arc::new(ICalExporter::new()),
        })
    }

    pub fn bookings(&self) -> &BookingService {
        &self.bookings
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let state = AppState::new(settings)?;
    info!(
        timezone = %state.timezones.current(),
        classes = state.bookings.catalog().list().len(),
        "Seeded class catalog"
    );

    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!("Starting Fitness Booking API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/classes", get(get_classes))
        .route("/classes.ical", get(get_classes_ical))
        .route("/classes/{id}", get(get_class))
        .route("/book", post(book_class))
        .route("/bookings", get(get_bookings))
        .route("/admin/change_timezone", post(change_timezone))
        .route("/admin/timezone", get(get_timezone))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(trace_layer)
}
