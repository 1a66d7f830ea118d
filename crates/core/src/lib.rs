//! # NailSync Core
//!
//! Domain models and the appointment availability engine for the NailSync
//! salon CRM. Nothing in this crate performs I/O: callers hand in snapshots
//! of appointments and blocked days together with the current local time,
//! and get back ranked free slots.

/// Free-slot calculation, ranking and the cached suggestion adapter
pub mod availability;
/// Error type shared by every crate in the workspace
pub mod errors;
/// Appointment, service, blocked-day and slot models
pub mod models;
