//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use tracing::warn;

use crate::domain::{PlanError, Route, RouteDetail, message};
use crate::planner::TripPlanOutput;
use crate::transit::{DEFAULT_MOCK_AGENCY, all_routes, mock, route_by_id, routes_at_stop};

use super::dto::*;
use super::state::{AppState, requested_agency};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/plan", get(plan_trip))
        .route("/ti/routes", get(list_routes))
        .route("/ti/routes/:route_id", get(route_detail))
        .route("/ti/stops/:stop_id/routes", get(stop_routes))
        .route("/ti/mock/routes", get(mock_routes))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan a trip.
///
/// Always answers 200 with a trip-plan body: invalid parameters become a
/// `413` plan error, upstream trouble a `500` plan error or `{}`.
async fn plan_trip(State(state): State<AppState>, Query(query): Query<PlanTripQuery>) -> Response {
    let pretty = state.planner.wants_pretty(query.wants_pretty());

    let body = match query.into_request(Local::now().naive_local()) {
        Ok(request) => state.planner.plan_trip_json(request).await,
        Err(e) => {
            warn!(error = %e, "rejected trip request");
            let error = PlanError::new(message::BOGUS_PARAMETER, e.to_string());
            TripPlanOutput::from_error(error).render(pretty)
        }
    };

    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// All routes, optionally as of a date.
async fn list_routes(
    State(state): State<AppState>,
    Query(query): Query<RoutesQuery>,
) -> Result<Json<Vec<Route>>, AppError> {
    let as_of = query.as_of()?;
    let agency = state.agency_override(query.agency.as_deref());
    Ok(Json(all_routes(state.transit.as_ref(), as_of, agency)))
}

/// One route with its agency, or `null`.
async fn route_detail(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> Json<Option<RouteDetail>> {
    Json(route_by_id(
        state.transit.as_ref(),
        &route_id,
        state.agency_override(None),
    ))
}

/// Routes serving a stop.
async fn stop_routes(
    State(state): State<AppState>,
    Path(stop_id): Path<String>,
    Query(query): Query<RoutesQuery>,
) -> Result<Json<Vec<Route>>, AppError> {
    let as_of = query.as_of()?;
    let requested = query.agency.as_deref();
    Ok(Json(routes_at_stop(
        state.transit.as_ref(),
        &stop_id,
        as_of,
        requested_agency(requested),
        state.agency_override(requested),
    )))
}

/// Synthetic routes for client development.
async fn mock_routes(Query(query): Query<MockRoutesQuery>) -> Json<Vec<Route>> {
    let agency = query
        .agency
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(DEFAULT_MOCK_AGENCY);
    Json(mock(agency))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl From<InvalidParameter> for AppError {
    fn from(e: InvalidParameter) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
