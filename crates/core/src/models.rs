pub mod appointment;
pub mod availability;
pub mod blocked_day;
pub mod service;
pub mod time_slot;
