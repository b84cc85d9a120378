//! HTTP API module for the Timesheet Engine.
//!
//! This module provides the REST API endpoints for calculating punches in
//! standard or CLT mode, checking rest gaps, aggregating periods and keeping
//! saved records.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculateRequest, ComplianceReportRequest, NightShiftRequest, PeriodStatsRequest,
    RestCheckRequest, ShiftGapRequest, StatsQuery,
};
pub use response::{
    ApiError, ApiErrorResponse, HealthResponse, LegalLimitError, NightShiftResponse,
};
pub use state::AppState;
