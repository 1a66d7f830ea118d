//! # Availability
//!
//! Finds free intervals in the salon's day that are long enough to book a
//! typical service, and orders them so the best fitting windows come first.
//!
//! - [`config`]: business hours, rounding granularity and duration threshold
//! - [`gaps`]: the per-day gap walk over appointments
//! - [`ranking`]: closeness-to-ideal ordering and the top-N suggestion helper
//! - [`cache`]: derived-state cache that recomputes only when its inputs change

pub mod cache;
pub mod config;
pub mod gaps;
pub mod ranking;

pub use cache::SuggestionCache;
pub use config::SlotConfig;
pub use gaps::compute_free_slots;
pub use ranking::{rank_slots, suggest_slots, DEFAULT_HORIZON_DAYS, DEFAULT_SUGGESTION_LIMIT};
