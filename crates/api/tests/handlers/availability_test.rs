use axum::{http::StatusCode, Json};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use mockall::predicate;
use nailsync_core::{
    availability::SlotConfig,
    errors::CrmError,
    models::availability::{SlotResponse, SlotsResponse},
};
use nailsync_db::models::{DbAppointment, DbBlockedDay};
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

use crate::test_utils::TestContext;
use nailsync_api::{
    handlers::availability::*,
    middleware::error_handling::AppError,
};

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).unwrap() + chrono::Duration::days(offset)
}

fn at(offset: i64, hour: u32, minute: u32) -> NaiveDateTime {
    day(offset).and_hms_opt(hour, minute, 0).unwrap()
}

fn row(start: NaiveDateTime, minutes: Option<i32>, status: &str) -> DbAppointment {
    DbAppointment {
        id: Uuid::new_v4(),
        client_id: Some(Uuid::new_v4()),
        service_id: minutes.map(|_| Uuid::new_v4()),
        scheduled_at: start,
        end_time: None,
        status: status.to_string(),
        service_duration_minutes: minutes,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// Mirrors `free_slots` with the repositories swapped for mocks
async fn test_free_slots_wrapper(
    ctx: &TestContext,
    query: SlotQuery,
    now: NaiveDateTime,
) -> Result<Json<SlotsResponse>, AppError> {
    let window = SlotWindow::resolve(&query, now.date())?;
    let (from, to) = window.bounds()?;

    let appointments = ctx.appointment_repo.get_appointments_between(from, to).await?;
    let blocked_days = ctx
        .blocked_day_repo
        .get_blocked_days_between(from.date(), to.date())
        .await?;

    let (appointments, blocked_days) = into_snapshot(appointments, blocked_days)?;

    Ok(Json(build_slots_response(
        window,
        &appointments,
        &blocked_days,
        now,
        &ctx.slot_config,
    )))
}

#[rstest]
#[case(SlotQuery::default(), day(0), 2, None)]
#[case(SlotQuery { from: Some(day(3)), days: Some(7), limit: Some(3) }, day(3), 7, Some(3))]
#[case(SlotQuery { from: None, days: Some(0), limit: None }, day(0), 0, None)]
fn test_window_defaults(
    #[case] query: SlotQuery,
    #[case] reference_day: NaiveDate,
    #[case] horizon_days: u32,
    #[case] limit: Option<usize>,
) {
    let window = SlotWindow::resolve(&query, day(0)).expect("Failed to resolve window");

    assert_eq!(
        window,
        SlotWindow {
            reference_day,
            horizon_days,
            limit,
        }
    );
}

#[test]
fn test_window_bounds_cover_whole_days() {
    let window = SlotWindow {
        reference_day: day(0),
        horizon_days: 2,
        limit: None,
    };

    assert_eq!(
        window.bounds().expect("Failed to compute bounds"),
        (at(0, 0, 0), at(2, 0, 0))
    );
}

#[rstest]
#[case(Some(1))]
#[case(None)]
fn test_window_past_last_date_is_rejected(#[case] days: Option<u32>) {
    let query: SlotQuery =
        serde_json::from_value(serde_json::json!({ "from": NaiveDate::MAX, "days": days }))
            .expect("Failed to deserialize query");
    assert_eq!(query.from, Some(NaiveDate::MAX));

    let result = SlotWindow::resolve(&query, day(0));

    assert!(matches!(result, Err(CrmError::Validation(_))));
}

#[test]
fn test_window_ending_on_last_date() {
    let last_start = NaiveDate::MAX.pred_opt().unwrap();
    let window = SlotWindow::resolve(
        &SlotQuery {
            from: Some(last_start),
            days: Some(1),
            limit: None,
        },
        day(0),
    )
    .expect("Failed to resolve window");

    let (from, to) = window.bounds().expect("Failed to compute bounds");
    assert_eq!(from.date(), last_start);
    assert_eq!(to.date(), NaiveDate::MAX);
}

#[tokio::test]
async fn test_free_slots_invalid_horizon() {
    let mut ctx = TestContext::new();
    ctx.appointment_repo.expect_get_appointments_between().never();

    let query = SlotQuery {
        from: None,
        days: Some(MAX_HORIZON_DAYS + 1),
        limit: None,
    };

    let result = test_free_slots_wrapper(&ctx, query, at(0, 6, 0)).await;

    match result.unwrap_err().0 {
        CrmError::Validation(_) => {} // Expected
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_free_slots_single_booking() {
    let mut ctx = TestContext::new();

    ctx.appointment_repo
        .expect_get_appointments_between()
        .with(predicate::eq(at(1, 0, 0)), predicate::eq(at(2, 0, 0)))
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                row(at(1, 10, 0), Some(60), "confirmed"),
                row(at(1, 14, 0), Some(180), "canceled"),
            ])
        });
    ctx.blocked_day_repo
        .expect_get_blocked_days_between()
        .with(predicate::eq(day(1)), predicate::eq(day(2)))
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let query = SlotQuery {
        from: Some(day(1)),
        days: Some(1),
        limit: None,
    };

    let Json(response) = test_free_slots_wrapper(&ctx, query, at(0, 18, 0))
        .await
        .expect("Failed to compute slots");

    assert_eq!(response.reference_day, day(1));
    assert_eq!(response.horizon_days, 1);
    assert_eq!(
        response.slots,
        vec![
            SlotResponse {
                start: at(1, 8, 0),
                end: at(1, 10, 0),
                duration_minutes: 120,
            },
            SlotResponse {
                start: at(1, 11, 0),
                end: at(1, 19, 0),
                duration_minutes: 480,
            },
        ]
    );
}

#[tokio::test]
async fn test_free_slots_limit_and_today_floor() {
    let mut ctx = TestContext::new();

    ctx.appointment_repo
        .expect_get_appointments_between()
        .returning(|_, _| {
            Ok(vec![
                row(at(0, 13, 0), None, "pending"),
                row(at(1, 9, 0), Some(90), "confirmed"),
            ])
        });
    ctx.blocked_day_repo
        .expect_get_blocked_days_between()
        .returning(|_, _| Ok(vec![]));

    let query = SlotQuery {
        from: None,
        days: None,
        limit: Some(3),
    };

    // 10:05 rounds up to 10:30
    let Json(response) = test_free_slots_wrapper(&ctx, query, at(0, 10, 5))
        .await
        .expect("Failed to compute slots");

    let starts: Vec<_> = response.slots.iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![at(0, 10, 30), at(0, 14, 0), at(1, 10, 30)]);
}

#[tokio::test]
async fn test_free_slots_blocked_day() {
    let mut ctx = TestContext::new();

    ctx.appointment_repo
        .expect_get_appointments_between()
        .returning(|_, _| Ok(vec![]));
    ctx.blocked_day_repo
        .expect_get_blocked_days_between()
        .returning(|from, _| {
            Ok(vec![DbBlockedDay {
                id: Uuid::new_v4(),
                blocked_on: from,
                reason: Some("Nail art workshop".to_string()),
                created_at: Utc::now(),
            }])
        });

    let query = SlotQuery {
        from: Some(day(1)),
        days: Some(1),
        limit: None,
    };

    let Json(response) = test_free_slots_wrapper(&ctx, query, at(0, 6, 0))
        .await
        .expect("Failed to compute slots");

    assert!(response.slots.is_empty());
}

#[tokio::test]
async fn test_free_slots_unknown_status() {
    let mut ctx = TestContext::new();

    ctx.appointment_repo
        .expect_get_appointments_between()
        .returning(|_, _| Ok(vec![row(at(1, 10, 0), None, "no-show")]));
    ctx.blocked_day_repo
        .expect_get_blocked_days_between()
        .returning(|_, _| Ok(vec![]));

    let result = test_free_slots_wrapper(&ctx, SlotQuery::default(), at(0, 6, 0)).await;

    let error = result.unwrap_err();
    assert_eq!(error.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_free_slots_database_error() {
    let mut ctx = TestContext::new();

    ctx.appointment_repo
        .expect_get_appointments_between()
        .returning(|_, _| Err(eyre::eyre!("connection reset")));
    ctx.blocked_day_repo.expect_get_blocked_days_between().never();

    let result = test_free_slots_wrapper(&ctx, SlotQuery::default(), at(0, 6, 0)).await;

    match result.unwrap_err().0 {
        CrmError::Database(_) => {} // Expected
        e => panic!("Expected Database error, got: {:?}", e),
    }
}

#[test]
fn test_build_response_with_custom_config() {
    let config = SlotConfig {
        average_service_minutes: 120,
        ..SlotConfig::default()
    };
    let window = SlotWindow {
        reference_day: day(1),
        horizon_days: 1,
        limit: None,
    };
    let (appointments, blocked_days) =
        into_snapshot(vec![row(at(1, 9, 0), Some(60), "pending")], vec![]).unwrap();

    let response = build_slots_response(window, &appointments, &blocked_days, at(0, 9, 0), &config);

    // 08:00-09:00 is too short for a two hour threshold
    assert_eq!(response.slots.len(), 1);
    assert_eq!(response.slots[0].start, at(1, 10, 0));
}
