use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::MySqlPool;

use super::{RecordStore, access::Access};
use crate::model::{
    attendance::AttendanceRecord, car::Car, driver::Driver, earning::EarningRecord,
    expense::{APPROVED, ExpenseRecord},
    owner::Owner,
    role::Role,
};
use crate::utils::date_range::DateRange;

/// `RecordStore` over the application's MySQL schema.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

// Appends the driver restriction for scoped callers. `column` is a literal.
fn scoped(sql: &str, column: &str, access: &Access) -> String {
    match access.driver_scope() {
        Some(_) => format!("{} AND {} = ?", sql, column),
        None => sql.to_string(),
    }
}

impl RecordStore for MySqlStore {
    async fn drivers(&self, access: &Access) -> Result<Vec<Driver>> {
        let sql = format!(
            "{} ORDER BY name",
            scoped(
                "SELECT id, name, assigned_car_id, role FROM users WHERE role = ?",
                "id",
                access,
            )
        );

        let mut query = sqlx::query_as::<_, Driver>(&sql)
            .bind(Role::Driver.to_string());
        if let Some(driver_id) = access.driver_scope() {
            query = query.bind(driver_id);
        }

        query
            .fetch_all(&self.pool)
            .await
            .context("failed to fetch drivers")
    }

    async fn cars(&self, _access: &Access) -> Result<Vec<Car>> {
        sqlx::query_as::<_, Car>(
            r#"
            SELECT id, plate_number, monthly_due, assigned_driver_id
            FROM cars
            ORDER BY plate_number
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to fetch cars")
    }

    async fn owners(&self, _access: &Access) -> Result<Vec<Owner>> {
        sqlx::query_as::<_, Owner>("SELECT id FROM owners")
            .fetch_all(&self.pool)
            .await
            .context("failed to fetch owners")
    }

    async fn earnings(&self, access: &Access, range: DateRange) -> Result<Vec<EarningRecord>> {
        let sql = scoped(
            r#"
            SELECT driver_id, date, uber_cash, uber_account, bolt_cash, bolt_account,
                   individual_rides_cash, individual_rides_account
            FROM driver_earnings
            WHERE date BETWEEN ? AND ?
            "#,
            "driver_id",
            access,
        );

        let sql = format!("{} ORDER BY date", sql);
        let mut query = sqlx::query_as::<_, EarningRecord>(&sql)
            .bind(range.start)
            .bind(range.end);
        if let Some(driver_id) = access.driver_scope() {
            query = query.bind(driver_id);
        }

        query
            .fetch_all(&self.pool)
            .await
            .context("failed to fetch driver earnings")
    }

    async fn approved_expenses(
        &self,
        access: &Access,
        range: DateRange,
    ) -> Result<Vec<ExpenseRecord>> {
        let sql = scoped(
            r#"
            SELECT driver_id, date, expense_type, amount, status
            FROM driver_expenses
            WHERE status = ?
            AND date BETWEEN ? AND ?
            "#,
            "driver_id",
            access,
        );

        let sql = format!("{} ORDER BY date", sql);
        let mut query = sqlx::query_as::<_, ExpenseRecord>(&sql)
            .bind(APPROVED)
            .bind(range.start)
            .bind(range.end);
        if let Some(driver_id) = access.driver_scope() {
            query = query.bind(driver_id);
        }

        query
            .fetch_all(&self.pool)
            .await
            .context("failed to fetch driver expenses")
    }

    async fn attendance_on(
        &self,
        access: &Access,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        let sql = scoped(
            r#"
            SELECT driver_id, date, start_time, end_time
            FROM attendance
            WHERE date = ?
            "#,
            "driver_id",
            access,
        );

        let mut query = sqlx::query_as::<_, AttendanceRecord>(&sql).bind(date);
        if let Some(driver_id) = access.driver_scope() {
            query = query.bind(driver_id);
        }

        query
            .fetch_all(&self.pool)
            .await
            .context("failed to fetch attendance")
    }
}
