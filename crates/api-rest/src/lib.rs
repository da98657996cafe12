//! # API REST
//!
//! Web front end and REST API for AstroLogic.
//!
//! Handles:
//! - the server-rendered intake form and result pages
//! - JSON endpoints for parsing readings and requesting syntheses
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, status mapping)
//!
//! Uses `api-shared` for wire types and `astrologic-client` to reach the synthesis service.

#![warn(rust_2018_idioms)]

pub mod view;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Form, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    BirthDataReq, ErrorRes, HealthRes, HealthService, ParseReadingReq, ParseReadingRes,
    PhaseRes, PhasesRes, ReadingRes, ReadingSectionRes,
};
use astrologic_client::SynthesisClient;
use astrologic_core::ReadingParser;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    parser: Arc<ReadingParser>,
    client: Arc<SynthesisClient>,
}

impl AppState {
    pub fn new(parser: ReadingParser, client: SynthesisClient) -> Self {
        Self {
            parser: Arc::new(parser),
            client: Arc::new(client),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_phases, parse_reading, create_reading),
    components(schemas(
        HealthRes,
        ErrorRes,
        BirthDataReq,
        ParseReadingReq,
        ParseReadingRes,
        ReadingSectionRes,
        ReadingRes,
        PhaseRes,
        PhasesRes,
    ))
)]
pub struct ApiDoc;

/// Builds the full router: HTML pages, JSON API and Swagger UI.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/reading", post(submit_reading))
        .route("/health", get(health))
        .route("/api/phases", get(list_phases))
        .route("/api/reading", post(create_reading))
        .route("/api/reading/sections", post(parse_reading))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Intake form page.
async fn index() -> Html<String> {
    Html(view::intake_page(None, None))
}

/// Handles an intake form submission.
///
/// Invalid input re-renders the form with the validation message (`400`). A failed synthesis
/// request renders the error page (`502`). A missing narrative is not an error: the result page
/// shows the fixed note instead of sections.
#[axum::debug_handler]
async fn submit_reading(
    State(state): State<AppState>,
    Form(req): Form<BirthDataReq>,
) -> (StatusCode, Html<String>) {
    let data = match req.validate() {
        Ok(data) => data,
        Err(e) => {
            tracing::info!("rejected intake form: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Html(view::intake_page(Some(&req), Some(&e.to_string()))),
            );
        }
    };

    match state.client.synthesise(&data).await {
        Ok(resp) => {
            let outcome = resp.reading_outcome(&state.parser);
            (
                StatusCode::OK,
                Html(view::result_page(data.name(), &resp.synthesis, &outcome)),
            )
        }
        Err(e) => {
            tracing::error!("synthesis request failed: {:?}", e);
            (StatusCode::BAD_GATEWAY, Html(view::error_page(&e.to_string())))
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/phases",
    responses(
        (status = 200, description = "Narrative phases in table order", body = PhasesRes)
    )
)]
/// Lists the narrative phases the parser recognises, in tie-break order.
#[axum::debug_handler]
async fn list_phases(State(state): State<AppState>) -> Json<PhasesRes> {
    Json(PhasesRes {
        phases: state
            .parser
            .table()
            .entries()
            .iter()
            .map(PhaseRes::from)
            .collect(),
    })
}

#[utoipa::path(
    post,
    path = "/api/reading/sections",
    request_body = ParseReadingReq,
    responses(
        (status = 200, description = "Reading split into display sections", body = ParseReadingRes)
    )
)]
/// Parses a raw reading into display sections. Never fails for any string.
#[axum::debug_handler]
async fn parse_reading(
    State(state): State<AppState>,
    Json(req): Json<ParseReadingReq>,
) -> Json<ParseReadingRes> {
    let sections = state.parser.parse(&req.reading);
    Json(ParseReadingRes::from_sections(&sections))
}

#[utoipa::path(
    post,
    path = "/api/reading",
    request_body = BirthDataReq,
    responses(
        (status = 200, description = "Charts with parsed reading or no-reading note", body = ReadingRes),
        (status = 400, description = "Invalid birth data", body = ErrorRes),
        (status = 502, description = "Synthesis service failed", body = ErrorRes)
    )
)]
/// Requests a synthesis and returns the charts with the parsed reading.
#[axum::debug_handler]
async fn create_reading(
    State(state): State<AppState>,
    Json(req): Json<BirthDataReq>,
) -> Result<Json<ReadingRes>, (StatusCode, Json<ErrorRes>)> {
    let data = req.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorRes {
                error: e.to_string(),
            }),
        )
    })?;

    match state.client.synthesise(&data).await {
        Ok(resp) => {
            let outcome = resp.reading_outcome(&state.parser);
            Ok(Json(ReadingRes::new(resp.synthesis, &outcome)))
        }
        Err(e) => {
            tracing::error!("synthesis request failed: {:?}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorRes {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
