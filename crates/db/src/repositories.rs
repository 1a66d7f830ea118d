pub mod appointment;
pub mod blocked_day;
pub mod data_version;
