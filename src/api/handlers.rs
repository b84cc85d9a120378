//! HTTP request handlers for the Timesheet Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{ModeOutcome, generate_compliance_report};
use crate::error::EngineError;

use super::request::{
    CalculateRequest, ComplianceReportRequest, NightShiftRequest, PeriodStatsRequest,
    RestCheckRequest, ShiftGapRequest, StatsQuery,
};
use super::response::{
    ApiError, ApiErrorResponse, HealthResponse, LegalLimitError, NightShiftResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/shift-gap", post(shift_gap_handler))
        .route("/api/rest-check", post(rest_check_handler))
        .route("/api/night-shift", post(night_shift_handler))
        .route("/api/period-stats", post(period_stats_handler))
        .route("/api/compliance-report", post(compliance_report_handler))
        .route(
            "/api/records",
            get(list_records_handler)
                .post(save_record_handler)
                .delete(clear_records_handler),
        )
        .route("/api/records/stats", get(record_stats_handler))
        .fallback(not_found_handler)
        .with_state(state)
}

/// Serializes `body` with an explicit JSON content type.
fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a body rejection to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, e.g. "missing field `entryTime`"
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {err}"))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Unwraps a JSON body or returns the rejection response.
macro_rules! json_body {
    ($payload:expr, $correlation_id:expr) => {
        match $payload {
            Ok(Json(body)) => body,
            Err(rejection) => return rejection_response($correlation_id, rejection),
        }
    };
}

/// Handler for GET /api/health.
async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "OK".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

/// Runs the selected calculator and maps its outcome to a response.
///
/// Statutory hard limits render as `{erro, mensagem}` with 422.
fn run_calculation(
    state: &AppState,
    correlation_id: Uuid,
    request: &CalculateRequest,
) -> Result<ModeOutcome, Response> {
    let start_time = Instant::now();

    match state.engine().calculate(request.mode, &request.punch) {
        Ok(outcome) => {
            let summary = outcome.summary();
            info!(
                correlation_id = %correlation_id,
                mode = ?request.mode,
                overtime = %summary.overtime,
                overtime_pay = %summary.overtime_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed"
            );
            Ok(outcome)
        }
        Err(err @ EngineError::DailySpanExceeded { .. }) => {
            warn!(correlation_id = %correlation_id, error = %err, "Legal limit exceeded");
            Err(json_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                LegalLimitError::new(err.to_string()),
            ))
        }
        Err(err) => Err(error_response(correlation_id, err)),
    }
}

/// Handler for POST /api/calculate.
///
/// Standard results are returned with 200 even when invalid (`isValid` is
/// false); CLT validation failures are 400.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = json_body!(payload, correlation_id);

    match run_calculation(&state, correlation_id, &request) {
        Ok(outcome) => json_response(StatusCode::OK, outcome),
        Err(response) => response,
    }
}

/// Handler for POST /api/shift-gap.
async fn shift_gap_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftGapRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = json_body!(payload, correlation_id);

    let gap = state.engine().standard().calculate_shift_gap(
        &request.prev_exit_date,
        &request.prev_exit_time,
        &request.curr_entry_date,
        &request.curr_entry_time,
    );
    json_response(StatusCode::OK, gap)
}

/// Handler for POST /api/rest-check.
async fn rest_check_handler(
    State(state): State<AppState>,
    payload: Result<Json<RestCheckRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = json_body!(payload, correlation_id);

    let check = state
        .engine()
        .clt()
        .check_rest_between_shifts(request.previous_exit, request.current_entry);
    json_response(StatusCode::OK, check)
}

/// Handler for POST /api/night-shift.
async fn night_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<NightShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = json_body!(payload, correlation_id);

    let is_night_shift = state
        .engine()
        .standard()
        .is_night_shift(request.start, request.end);
    json_response(StatusCode::OK, NightShiftResponse { is_night_shift })
}

/// Handler for POST /api/period-stats.
async fn period_stats_handler(
    State(state): State<AppState>,
    payload: Result<Json<PeriodStatsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = json_body!(payload, correlation_id);

    let stats = state.engine().standard().calculate_period_stats(
        &request.records,
        request.start_date,
        request.end_date,
    );
    info!(
        correlation_id = %correlation_id,
        records = stats.total_records,
        days = stats.total_days,
        "Period statistics computed"
    );
    json_response(StatusCode::OK, stats)
}

/// Handler for POST /api/compliance-report.
async fn compliance_report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComplianceReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = json_body!(payload, correlation_id);

    let engine = state.engine();
    let summary = generate_compliance_report(&request.records, engine.clt(), engine.calendar());
    info!(
        correlation_id = %correlation_id,
        records = summary.total_records,
        with_errors = summary.with_errors,
        with_warnings = summary.with_warnings,
        "Compliance report generated"
    );
    json_response(StatusCode::OK, summary)
}

/// Handler for GET /api/records.
async fn list_records_handler(State(state): State<AppState>) -> Response {
    match state.store().load() {
        Ok(records) => json_response(StatusCode::OK, records),
        Err(err) => error_response(Uuid::new_v4(), err),
    }
}

/// Handler for POST /api/records.
///
/// Calculates the punch and stores it with its totals. Invalid punches are
/// rejected in both modes.
async fn save_record_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing save request");

    let request = json_body!(payload, correlation_id);

    let outcome = match run_calculation(&state, correlation_id, &request) {
        Ok(outcome) => outcome,
        Err(response) => return response,
    };

    if let ModeOutcome::Standard(result) = &outcome {
        if !result.is_valid {
            return error_response(
                correlation_id,
                EngineError::InvalidPunch {
                    report: result.field_errors.clone(),
                },
            );
        }
    }

    let mut record = outcome.into_record(request.punch);
    record.user_id = request.user_id;

    if let Err(err) = state.store().append(record.clone()) {
        return error_response(correlation_id, err);
    }

    info!(correlation_id = %correlation_id, record_id = %record.id, "Record saved");
    json_response(StatusCode::CREATED, record)
}

/// Handler for DELETE /api/records.
async fn clear_records_handler(State(state): State<AppState>) -> Response {
    match state.store().clear() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(Uuid::new_v4(), err),
    }
}

/// Handler for GET /api/records/stats.
async fn record_stats_handler(
    State(state): State<AppState>,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Bad stats query");
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(rejection.body_text()),
            );
        }
    };

    match state.store().load() {
        Ok(records) => json_response(
            StatusCode::OK,
            state
                .engine()
                .standard()
                .calculate_period_stats(&records, query.start_date, query.end_date),
        ),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Fallback for unknown routes.
async fn not_found_handler(uri: Uri) -> Response {
    json_response(StatusCode::NOT_FOUND, ApiError::not_found(uri.path()))
}
