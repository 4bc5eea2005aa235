pub mod access;
#[cfg(test)]
pub mod memory;
pub mod mysql;

use anyhow::Result;
use chrono::NaiveDate;
use std::future::Future;

use crate::model::{
    attendance::AttendanceRecord, car::Car, driver::Driver, earning::EarningRecord,
    expense::ExpenseRecord, owner::Owner,
};
use crate::utils::date_range::DateRange;
use access::Access;

/// Filtered reads the dashboard is computed from.
pub trait RecordStore {
    /// Users with role `driver`.
    fn drivers(&self, access: &Access) -> impl Future<Output = Result<Vec<Driver>>> + Send;

    fn cars(&self, access: &Access) -> impl Future<Output = Result<Vec<Car>>> + Send;

    fn owners(&self, access: &Access) -> impl Future<Output = Result<Vec<Owner>>> + Send;

    /// Earnings dated inside `range`.
    fn earnings(
        &self,
        access: &Access,
        range: DateRange,
    ) -> impl Future<Output = Result<Vec<EarningRecord>>> + Send;

    /// Approved expenses dated inside `range`.
    fn approved_expenses(
        &self,
        access: &Access,
        range: DateRange,
    ) -> impl Future<Output = Result<Vec<ExpenseRecord>>> + Send;

    fn attendance_on(
        &self,
        access: &Access,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<AttendanceRecord>>> + Send;
}
