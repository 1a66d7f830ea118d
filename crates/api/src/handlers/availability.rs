//! # Availability Handlers
//!
//! Handlers that turn the salon's appointment book into bookable slot
//! suggestions. Data is loaded from the database for the requested window,
//! converted into core models and handed to the availability engine in
//! `nailsync_core::availability`.
//!
//! ## Endpoints
//!
//! - `GET /api/availability/config`: active slot settings
//! - `GET /api/availability/slots`: ranked free slots for an explicit window
//! - `GET /api/availability/suggestions`: the cached top suggestions for
//!   today and tomorrow

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime};
use nailsync_core::{
    availability::{suggest_slots, SlotConfig, DEFAULT_HORIZON_DAYS},
    errors::{CrmError, CrmResult},
    models::{
        appointment::Appointment,
        availability::{SlotResponse, SlotsResponse},
        blocked_day::BlockedDay,
        time_slot::TimeSlot,
    },
};
use nailsync_db::{
    models::{DbAppointment, DbBlockedDay},
    DbPool,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// Longest window a single slot query may scan.
pub const MAX_HORIZON_DAYS: u32 = 31;

/// Query parameters for the free slot endpoint
///
/// # Fields
///
/// * `from` - First day to scan (`YYYY-MM-DD`, default: today)
/// * `days` - Number of consecutive days to scan (default: 2)
/// * `limit` - Maximum number of slots to return (default: all)
#[derive(Debug, Default, Deserialize)]
pub struct SlotQuery {
    pub from: Option<NaiveDate>,
    pub days: Option<u32>,
    pub limit: Option<usize>,
}

/// A validated [`SlotQuery`] with defaults applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub reference_day: NaiveDate,
    pub horizon_days: u32,
    pub limit: Option<usize>,
}

impl SlotWindow {
    /// Validates the query and fills in defaults relative to `today`.
    ///
    /// # Errors
    ///
    /// * `CrmError::Validation` - `days` above [`MAX_HORIZON_DAYS`], a
    ///   `limit` of zero, or a window that runs past the last calendar day
    pub fn resolve(query: &SlotQuery, today: NaiveDate) -> CrmResult<Self> {
        let horizon_days = query.days.unwrap_or(DEFAULT_HORIZON_DAYS);
        if horizon_days > MAX_HORIZON_DAYS {
            return Err(CrmError::Validation(format!(
                "days must be at most {}",
                MAX_HORIZON_DAYS
            )));
        }

        if query.limit == Some(0) {
            return Err(CrmError::Validation(
                "limit must be at least 1".to_string(),
            ));
        }

        let window = Self {
            reference_day: query.from.unwrap_or(today),
            horizon_days,
            limit: query.limit,
        };
        window.bounds()?;

        Ok(window)
    }

    /// `[first day 00:00, day after the last 00:00)`
    ///
    /// # Errors
    ///
    /// * `CrmError::Validation` - the day after the window is not a
    ///   representable date
    pub fn bounds(&self) -> CrmResult<(NaiveDateTime, NaiveDateTime)> {
        let end_day = self
            .reference_day
            .checked_add_days(Days::new(u64::from(self.horizon_days)))
            .ok_or_else(|| {
                CrmError::Validation(format!(
                    "window starting {} runs past the last supported date",
                    self.reference_day
                ))
            })?;

        Ok((
            self.reference_day.and_time(NaiveTime::MIN),
            end_day.and_time(NaiveTime::MIN),
        ))
    }
}

/// Salon-local wall clock
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Converts database rows into the models the availability engine reads.
///
/// # Errors
///
/// * `CrmError::Validation` - an appointment row carries an unknown status
pub fn into_snapshot(
    appointments: Vec<DbAppointment>,
    blocked_days: Vec<DbBlockedDay>,
) -> CrmResult<(Vec<Appointment>, Vec<BlockedDay>)> {
    let appointments = appointments
        .into_iter()
        .map(Appointment::try_from)
        .collect::<CrmResult<Vec<_>>>()?;
    let blocked_days = blocked_days.into_iter().map(BlockedDay::from).collect();

    Ok((appointments, blocked_days))
}

/// Runs the availability engine over a loaded snapshot and shapes the
/// response.
pub fn build_slots_response(
    window: SlotWindow,
    appointments: &[Appointment],
    blocked_days: &[BlockedDay],
    now: NaiveDateTime,
    config: &SlotConfig,
) -> SlotsResponse {
    let slots = suggest_slots(
        appointments,
        blocked_days,
        window.reference_day,
        window.horizon_days,
        now,
        config,
        window.limit,
    );

    to_response(window.reference_day, window.horizon_days, slots)
}

fn to_response(reference_day: NaiveDate, horizon_days: u32, slots: Vec<TimeSlot>) -> SlotsResponse {
    SlotsResponse {
        reference_day,
        horizon_days,
        slots: slots.into_iter().map(SlotResponse::from).collect(),
    }
}

async fn load_snapshot(
    pool: &DbPool,
    window: &SlotWindow,
) -> Result<(Vec<Appointment>, Vec<BlockedDay>), AppError> {
    let (from, to) = window.bounds()?;

    let appointments =
        nailsync_db::repositories::appointment::get_appointments_between(pool, from, to)
            .await
            .map_err(CrmError::Database)?;

    let blocked_days = nailsync_db::repositories::blocked_day::get_blocked_days_between(
        pool,
        from.date(),
        to.date(),
    )
    .await
    .map_err(CrmError::Database)?;

    Ok(into_snapshot(appointments, blocked_days)?)
}

/// Returns the slot settings the server was started with
pub async fn slot_config(State(state): State<Arc<ApiState>>) -> Json<SlotConfig> {
    Json(state.slot_config.clone())
}

/// Lists ranked free slots for an explicit window
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/slots?from=2024-05-20&days=2&limit=3
/// ```
///
/// The query is validated before the database is touched.
///
/// # Errors
///
/// * `CrmError::Validation` - Invalid window or limit, or a stored
///   appointment with an unknown status
/// * `CrmError::Database` - Database error
#[axum::debug_handler]
pub async fn free_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let now = local_now();
    let window = SlotWindow::resolve(&query, now.date())?;

    let (appointments, blocked_days) = load_snapshot(&state.db_pool, &window).await?;

    let response = build_slots_response(
        window,
        &appointments,
        &blocked_days,
        now,
        &state.slot_config,
    );

    Ok(Json(response))
}

/// Top suggestions for today and tomorrow, as shown on the booking screen
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/suggestions
/// ```
///
/// A data-version fingerprint is read on every call; the appointment book
/// is only reloaded and the suggestions recomputed when the fingerprint or
/// the rounded current time changed since the last call.
///
/// # Errors
///
/// * `CrmError::Database` - Database error
#[axum::debug_handler]
pub async fn suggestions(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<SlotsResponse>, AppError> {
    let now = local_now();

    let generation = nailsync_db::repositories::data_version::get_data_version(&state.db_pool)
        .await
        .map_err(CrmError::Database)?
        .generation();

    // Held across the reload so concurrent callers wait for one recompute
    // instead of each hitting the database.
    let mut cache = state.suggestions.lock().await;
    let horizon_days = cache.horizon_days();

    if cache.is_stale(generation, now) {
        let window = SlotWindow {
            reference_day: now.date(),
            horizon_days,
            limit: None,
        };
        let (appointments, blocked_days) = load_snapshot(&state.db_pool, &window).await?;
        cache.refresh(generation, &appointments, &blocked_days, now);
    }

    let response = to_response(now.date(), horizon_days, cache.slots().to_vec());
    Ok(Json(response))
}
