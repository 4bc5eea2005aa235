use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub driver_id: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl AttendanceRecord {
    /// Clocked in and not yet clocked out.
    pub fn is_active(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_none()
    }
}
