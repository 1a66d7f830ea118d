/// Free slot and suggestion endpoints
pub mod availability;
