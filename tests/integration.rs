//! Integration tests for the Timesheet Engine HTTP API.
//!
//! This test suite covers:
//! - Standard calculations (overtime, overnight, invalid input)
//! - CLT calculations (night premium, Sunday/holiday premium, compliance)
//! - Statutory hard limits with a custom policy
//! - Shift gap, rest check and night shift helpers
//! - Period statistics and compliance reports
//! - The record store endpoints
//! - Error cases

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use timesheet_engine::api::{AppState, create_router};
use timesheet_engine::config::{CltPolicy, ConfigLoader, EngineConfig};
use timesheet_engine::models::{HolidayCalendar, Minutes};
use timesheet_engine::store::InMemoryRecordStore;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/br-clt").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal field that may be serialized as a string or a number.
fn decimal_field(value: &Value) -> Decimal {
    match value {
        Value::String(s) => decimal(s),
        other => decimal(&other.to_string()),
    }
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    send(router, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

fn punch(entry_date: &str, entry_time: &str, exit_date: &str, exit_time: &str) -> Value {
    json!({
        "entryDate": entry_date,
        "entryTime": entry_time,
        "exitDate": exit_date,
        "exitTime": exit_time
    })
}

fn with(mut base: Value, extra: Value) -> Value {
    if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    base
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = get(create_router_for_test(), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// Standard Mode
// =============================================================================

#[tokio::test]
async fn test_standard_ten_hour_day_with_lunch() {
    let body = with(
        punch("2025-03-10", "08:00", "2025-03-10", "19:00"),
        json!({"lunchStart": "12:00", "lunchEnd": "13:00", "hourlyRate": "20.00"}),
    );
    let (status, result) = post(create_router_for_test(), "/api/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["grossTotal"], "11:00");
    assert_eq!(result["lunchDuration"], "01:00");
    assert_eq!(result["netTotal"], "10:00");
    assert_eq!(result["overtimeDuration"], "02:00");
    assert_eq!(decimal_field(&result["overtimePay"]), decimal("60.00"));
    assert_eq!(result["isValid"], true);
}

#[tokio::test]
async fn test_standard_overnight_without_exit_date_change() {
    let body = punch("2025-03-10", "22:00", "2025-03-10", "06:00");
    let (status, result) = post(create_router_for_test(), "/api/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["grossTotal"], "08:00");
    assert_eq!(result["overtimeDuration"], "00:00");
}

#[tokio::test]
async fn test_standard_custom_baseline() {
    let body = with(
        punch("2025-03-10", "08:00", "2025-03-10", "15:00"),
        json!({"baselineHours": "06:00", "hourlyRate": 10}),
    );
    let (_, result) = post(create_router_for_test(), "/api/calculate", body).await;

    assert_eq!(result["overtimeDuration"], "01:00");
    assert_eq!(decimal_field(&result["overtimePay"]), decimal("15.00"));
}

#[tokio::test]
async fn test_standard_half_lunch_reported_per_field() {
    let body = with(
        punch("2025-03-10", "08:00", "2025-03-10", "17:00"),
        json!({"lunchStart": "12:00"}),
    );
    let (status, result) = post(create_router_for_test(), "/api/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["isValid"], false);
    assert_eq!(
        result["fieldErrors"]["lunchEnd"],
        "Lunch start and lunch end must be provided together"
    );
}

#[tokio::test]
async fn test_standard_span_over_a_day() {
    let body = punch("2025-03-10", "08:00", "2025-03-11", "09:00");
    let (_, result) = post(create_router_for_test(), "/api/calculate", body).await;

    assert_eq!(result["isValid"], false);
    assert_eq!(
        result["fieldErrors"]["span"],
        "Time between entry and exit cannot exceed 24 hours"
    );
}

// =============================================================================
// CLT Mode
// =============================================================================

#[tokio::test]
async fn test_clt_night_shift() {
    let body = with(
        punch("2025-03-10", "23:00", "2025-03-11", "07:00"),
        json!({"mode": "clt", "hourlyRate": "10.00"}),
    );
    let (status, result) = post(create_router_for_test(), "/api/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["nightShiftDuration"], "06:00");
    assert_eq!(result["nightPaidDuration"], "06:51");
    assert_eq!(decimal_field(&result["nightShiftPremium"]), decimal("13.71"));
    assert_eq!(decimal_field(&result["nightPremiumPercent"]), decimal("20"));
    assert_eq!(decimal_field(&result["totalPay"]), decimal("93.71"));
}

#[tokio::test]
async fn test_clt_sunday_from_explicit_flag() {
    let body = with(
        punch("2025-03-10", "08:00", "2025-03-10", "19:00"),
        json!({
            "mode": "clt",
            "lunchStart": "12:00",
            "lunchEnd": "13:00",
            "hourlyRate": 20,
            "isSundayOrHoliday": true
        }),
    );
    let (_, result) = post(create_router_for_test(), "/api/calculate", body).await;

    assert_eq!(result["isSundayOrHoliday"], true);
    assert_eq!(decimal_field(&result["overtimePay"]), decimal("80.00"));
    assert_eq!(decimal_field(&result["overtimeRatePercent"]), decimal("100"));
}

#[tokio::test]
async fn test_clt_sunday_resolved_from_date() {
    // 2025-03-09 is a Sunday
    let body = with(
        punch("2025-03-09", "08:00", "2025-03-09", "19:00"),
        json!({"mode": "clt", "lunchStart": "12:00", "lunchEnd": "13:00", "hourlyRate": 20}),
    );
    let (_, result) = post(create_router_for_test(), "/api/calculate", body).await;

    assert_eq!(result["isSundayOrHoliday"], true);
    assert_eq!(decimal_field(&result["overtimePay"]), decimal("80.00"));
}

#[tokio::test]
async fn test_clt_overtime_cap_reported() {
    let body = with(
        punch("2025-03-10", "07:00", "2025-03-10", "19:00"),
        json!({"mode": "clt", "lunchStart": "12:00", "lunchEnd": "13:00", "hourlyRate": 10}),
    );
    let (status, result) = post(create_router_for_test(), "/api/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["overtimeDuration"], "02:00");
    assert_eq!(result["complianceReport"]["compliant"], false);
    assert_eq!(
        result["complianceReport"]["errors"]
            .as_array()
            .map(Vec::len),
        Some(2)
    );
}

#[tokio::test]
async fn test_clt_missing_break_is_warning() {
    let body = with(
        punch("2025-03-10", "08:00", "2025-03-10", "15:00"),
        json!({"mode": "clt"}),
    );
    let (_, result) = post(create_router_for_test(), "/api/calculate", body).await;

    assert_eq!(result["complianceReport"]["compliant"], true);
    assert_eq!(
        result["complianceReport"]["warnings"][0],
        "Workday over 6h requires a minimum break of 1h (CLT Art. 71)"
    );
}

#[tokio::test]
async fn test_clt_daily_span_hard_error() {
    let defaults = ConfigLoader::statutory().into_config();
    let custom = EngineConfig::new(
        defaults.standard().clone(),
        CltPolicy {
            normal_workday: Minutes::from_hours(9),
            ..CltPolicy::default()
        },
        HolidayCalendar::default(),
    );
    let router = create_router(AppState::with_store(
        ConfigLoader::from_config(custom),
        Arc::new(InMemoryRecordStore::new()),
    ));

    let body = with(
        punch("2025-03-10", "07:00", "2025-03-10", "19:00"),
        json!({"mode": "clt"}),
    );
    let (status, result) = post(router, "/api/calculate", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["erro"], true);
    assert_eq!(
        result["mensagem"],
        "Workday exceeds the legal limit of 10h per day"
    );
}

#[tokio::test]
async fn test_clt_invalid_input_is_400() {
    let body = with(
        punch("2025-03-10", "08:00", "2025-03-10", "08:00"),
        json!({"mode": "clt"}),
    );
    let (status, result) = post(create_router_for_test(), "/api/calculate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
    assert_eq!(result["fields"]["span"], "Exit must be after entry");
}

// =============================================================================
// Helpers: shift gap, rest check, night shift
// =============================================================================

#[tokio::test]
async fn test_shift_gap_boundary() {
    let (_, legal) = post(
        create_router_for_test(),
        "/api/shift-gap",
        json!({
            "prevExitDate": "2025-03-10", "prevExitTime": "22:00",
            "currEntryDate": "2025-03-11", "currEntryTime": "09:00"
        }),
    )
    .await;
    assert_eq!(legal["gap"], "11:00");
    assert_eq!(legal["isLegal"], true);

    let (_, short) = post(
        create_router_for_test(),
        "/api/shift-gap",
        json!({
            "prevExitDate": "2025-03-10", "prevExitTime": "22:00",
            "currEntryDate": "2025-03-11", "currEntryTime": "08:59"
        }),
    )
    .await;
    assert_eq!(short["gap"], "10:59");
    assert_eq!(short["isLegal"], false);
}

#[tokio::test]
async fn test_shift_gap_null_when_not_after() {
    let (status, body) = post(
        create_router_for_test(),
        "/api/shift-gap",
        json!({
            "prevExitDate": "2025-03-11", "prevExitTime": "08:00",
            "currEntryDate": "2025-03-10", "currEntryTime": "22:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn test_rest_check() {
    let (status, body) = post(
        create_router_for_test(),
        "/api/rest-check",
        json!({"previousExit": "23:00", "currentEntry": "08:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["interval"], "09:00");
    assert_eq!(body["compliant"], false);
    assert_eq!(body["minimum"], "11:00");
}

#[tokio::test]
async fn test_night_shift_detection() {
    let (_, evening) = post(
        create_router_for_test(),
        "/api/night-shift",
        json!({"start": "18:00", "end": "23:00"}),
    )
    .await;
    assert_eq!(evening["isNightShift"], true);

    let (_, day) = post(
        create_router_for_test(),
        "/api/night-shift",
        json!({"start": "08:00", "end": "17:00"}),
    )
    .await;
    assert_eq!(day["isNightShift"], false);
}

// =============================================================================
// Aggregates
// =============================================================================

#[tokio::test]
async fn test_period_stats() {
    let record = |date: &str, net: &str, overtime: &str, pay: &str| {
        with(
            punch(date, "08:00", date, "18:00"),
            json!({"netTotal": net, "overtimeDuration": overtime, "overtimePay": pay}),
        )
    };
    let body = json!({
        "startDate": "2025-03-10",
        "endDate": "2025-03-14",
        "records": [
            record("2025-03-10", "09:00", "01:00", "30.00"),
            record("2025-03-10", "02:00", "00:00", "0"),
            record("2025-03-11", "08:00", "00:00", "0"),
            record("2025-03-20", "08:00", "00:00", "0")
        ]
    });

    let (status, stats) = post(create_router_for_test(), "/api/period-stats", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalRecords"], 3);
    assert_eq!(stats["totalDays"], 2);
    assert_eq!(stats["totalWorkedTime"], "19:00");
    assert_eq!(stats["totalOvertimeTime"], "01:00");
    assert_eq!(decimal_field(&stats["totalOvertimeValue"]), decimal("30.00"));
    assert_eq!(stats["averageHoursPerDay"], "09:30");
}

#[tokio::test]
async fn test_compliance_report() {
    let body = json!({
        "records": [
            with(
                punch("2025-03-10", "08:00", "2025-03-10", "17:00"),
                json!({"lunchStart": "12:00", "lunchEnd": "13:00"})
            ),
            punch("2025-03-11", "08:00", "2025-03-11", "15:00"),
            with(
                punch("2025-03-12", "07:00", "2025-03-12", "19:00"),
                json!({"lunchStart": "12:00", "lunchEnd": "13:00", "hourlyRate": 10})
            )
        ]
    });

    let (status, summary) = post(create_router_for_test(), "/api/compliance-report", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalRecords"], 3);
    assert_eq!(summary["compliant"], 1);
    assert_eq!(summary["withWarnings"], 1);
    assert_eq!(summary["withErrors"], 1);
    assert_eq!(summary["violations"][0]["record"], 2);
    assert_eq!(summary["violations"][0]["kind"], "warning");
    assert_eq!(summary["statistics"]["daysWithOvertime"], 1);
    assert_eq!(
        decimal_field(&summary["statistics"]["totalOvertimeValue"]),
        decimal("30.00")
    );
}

// =============================================================================
// Record Store
// =============================================================================

#[tokio::test]
async fn test_record_lifecycle() {
    let router = create_router_for_test();

    let body = with(
        punch("2025-03-10", "08:00", "2025-03-10", "19:00"),
        json!({"lunchStart": "12:00", "lunchEnd": "13:00", "hourlyRate": 20, "userId": "u-1"}),
    );
    let (status, saved) = post(router.clone(), "/api/records", body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["userId"], "u-1");
    assert_eq!(saved["netTotal"], "10:00");
    assert_eq!(saved["cltMode"], false);

    let body = with(
        punch("2025-03-11", "23:00", "2025-03-12", "07:00"),
        json!({"mode": "clt", "hourlyRate": 10}),
    );
    let (status, saved) = post(router.clone(), "/api/records", body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["cltMode"], true);
    assert_eq!(decimal_field(&saved["nightShiftPremium"]), decimal("13.71"));

    let (_, records) = get(router.clone(), "/api/records").await;
    assert_eq!(records.as_array().map(Vec::len), Some(2));

    let (status, stats) = get(
        router.clone(),
        "/api/records/stats?startDate=2025-03-01&endDate=2025-03-31",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalRecords"], 2);
    assert_eq!(stats["totalWorkedTime"], "18:00");

    let (status, _) = send(
        router.clone(),
        Request::builder()
            .method("DELETE")
            .uri("/api/records")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, records) = get(router, "/api/records").await;
    assert_eq!(records.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_invalid_record_not_saved() {
    let router = create_router_for_test();

    let body = punch("2025-03-10", "08:00", "2025-03-10", "8h");
    let (status, error) = post(router.clone(), "/api/records", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["fields"]["exitTime"], "Exit time must be in HH:MM format");

    let (_, records) = get(router, "/api/records").await;
    assert_eq!(records.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_record_stats_requires_dates() {
    let (status, error) = get(create_router_for_test(), "/api/records/stats?startDate=2025-03-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_missing_required_field() {
    let body = json!({"entryDate": "2025-03-10", "entryTime": "08:00", "exitDate": "2025-03-10"});
    let (status, error) = post(create_router_for_test(), "/api/calculate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_mode_is_malformed() {
    let body = with(
        punch("2025-03-10", "08:00", "2025-03-10", "17:00"),
        json!({"mode": "weekly"}),
    );
    let (status, error) = post(create_router_for_test(), "/api/calculate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, error) = get(create_router_for_test(), "/calculate").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "NOT_FOUND");
}
