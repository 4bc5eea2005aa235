use anyhow::{Result, anyhow};
use chrono::NaiveDate;

use super::{RecordStore, access::Access};
use crate::model::{
    attendance::AttendanceRecord, car::Car, driver::Driver, earning::EarningRecord,
    expense::ExpenseRecord, owner::Owner, role::Role,
};
use crate::utils::date_range::DateRange;

/// Vec-backed store applying the same filters as the SQL reads.
#[derive(Default, Clone)]
pub struct MemoryStore {
    pub users: Vec<Driver>,
    pub cars: Vec<Car>,
    pub owners: Vec<Owner>,
    pub earnings: Vec<EarningRecord>,
    pub expenses: Vec<ExpenseRecord>,
    pub attendance: Vec<AttendanceRecord>,
    /// Name of a collection whose read should fail.
    pub fail_on: Option<&'static str>,
}

impl MemoryStore {
    fn check(&self, collection: &'static str) -> Result<()> {
        match self.fail_on {
            Some(name) if name == collection => Err(anyhow!("connection reset reading {}", name)),
            _ => Ok(()),
        }
    }
}

fn within(range: DateRange, date: NaiveDate) -> bool {
    range.start <= date && date <= range.end
}

fn visible(access: &Access, driver_id: &str) -> bool {
    access.driver_scope().is_none_or(|scope| scope == driver_id)
}

impl RecordStore for MemoryStore {
    async fn drivers(&self, access: &Access) -> Result<Vec<Driver>> {
        self.check("drivers")?;
        let driver_role = Role::Driver.to_string();
        Ok(self
            .users
            .iter()
            .filter(|u| u.role == driver_role && visible(access, &u.id))
            .cloned()
            .collect())
    }

    async fn cars(&self, _access: &Access) -> Result<Vec<Car>> {
        self.check("cars")?;
        Ok(self.cars.clone())
    }

    async fn owners(&self, _access: &Access) -> Result<Vec<Owner>> {
        self.check("owners")?;
        Ok(self.owners.clone())
    }

    async fn earnings(&self, access: &Access, range: DateRange) -> Result<Vec<EarningRecord>> {
        self.check("earnings")?;
        Ok(self
            .earnings
            .iter()
            .filter(|e| within(range, e.date) && visible(access, &e.driver_id))
            .cloned()
            .collect())
    }

    async fn approved_expenses(
        &self,
        access: &Access,
        range: DateRange,
    ) -> Result<Vec<ExpenseRecord>> {
        self.check("expenses")?;
        Ok(self
            .expenses
            .iter()
            .filter(|e| e.is_approved() && within(range, e.date) && visible(access, &e.driver_id))
            .cloned()
            .collect())
    }

    async fn attendance_on(
        &self,
        access: &Access,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        self.check("attendance")?;
        Ok(self
            .attendance
            .iter()
            .filter(|a| a.date == date && visible(access, &a.driver_id))
            .cloned()
            .collect())
    }
}
