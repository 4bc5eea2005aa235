use chrono::NaiveDate;
use derive_more::Display;
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;
use strum::Display as StrumDisplay;
use tracing::{debug, info};
use utoipa::ToSchema;

use super::aggregate::{DashboardInputs, DashboardStats, aggregate};
use crate::store::{RecordStore, access::Access};
use crate::utils::date_range::DateRange;

/// The six reads a dashboard request fans out to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, StrumDisplay)]
pub enum Collection {
    Drivers,
    Cars,
    Owners,
    Earnings,
    Expenses,
    Attendance,
}

#[derive(Debug, Display)]
pub enum DashboardError {
    #[display(fmt = "{} error: {:#}", collection, source)]
    Read {
        collection: Collection,
        source: anyhow::Error,
    },
    #[display(fmt = "Dashboard computation timed out after {:?}", _0)]
    Timeout(Duration),
}

impl std::error::Error for DashboardError {}

fn read_failed(collection: Collection) -> impl FnOnce(anyhow::Error) -> DashboardError {
    move |source| DashboardError::Read { collection, source }
}

/// Summary of one fetched record set, used to check filters end to end.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetMeta {
    #[schema(example = 42)]
    pub count: usize,
    #[schema(example = "2024-01-02", value_type = Option<String>, format = "date")]
    pub min_date: Option<NaiveDate>,
    #[schema(example = "2024-01-30", value_type = Option<String>, format = "date")]
    pub max_date: Option<NaiveDate>,
    #[schema(value_type = f64)]
    pub total: Decimal,
}

impl RecordSetMeta {
    fn from_dates(dates: impl Iterator<Item = NaiveDate> + Clone, count: usize, total: Decimal) -> Self {
        RecordSetMeta {
            count,
            min_date: dates.clone().min(),
            max_date: dates.max(),
            total,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMeta {
    pub date_range: DateRange,
    pub earnings: RecordSetMeta,
    pub expenses: RecordSetMeta,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardPayload {
    pub data: DashboardStats,
    pub meta: DashboardMeta,
}

/// Reads every collection concurrently, then aggregates. Any failed read
/// fails the whole request.
pub async fn build_dashboard<S: RecordStore>(
    store: &S,
    access: &Access,
    range: DateRange,
    today: NaiveDate,
) -> Result<DashboardPayload, DashboardError> {
    debug!(start = %range.start, end = %range.end, scope = %access.cache_scope(), "Fetching dashboard records");

    let (drivers, cars, owners, earnings, expenses, attendance) = futures::try_join!(
        async { store.drivers(access).await.map_err(read_failed(Collection::Drivers)) },
        async { store.cars(access).await.map_err(read_failed(Collection::Cars)) },
        async { store.owners(access).await.map_err(read_failed(Collection::Owners)) },
        async {
            store
                .earnings(access, range)
                .await
                .map_err(read_failed(Collection::Earnings))
        },
        async {
            store
                .approved_expenses(access, range)
                .await
                .map_err(read_failed(Collection::Expenses))
        },
        async {
            store
                .attendance_on(access, today)
                .await
                .map_err(read_failed(Collection::Attendance))
        },
    )?;

    let data = aggregate(&DashboardInputs {
        drivers: &drivers,
        cars: &cars,
        owners: &owners,
        earnings: &earnings,
        expenses: &expenses,
        attendance: &attendance,
    });

    let meta = DashboardMeta {
        date_range: range,
        earnings: RecordSetMeta::from_dates(
            earnings.iter().map(|e| e.date),
            earnings.len(),
            data.company_stats.total_earnings,
        ),
        expenses: RecordSetMeta::from_dates(
            expenses.iter().filter(|e| e.is_approved()).map(|e| e.date),
            expenses.iter().filter(|e| e.is_approved()).count(),
            data.company_stats.total_expenses,
        ),
    };

    info!(
        start = %range.start,
        end = %range.end,
        earnings = meta.earnings.count,
        expenses = meta.expenses.count,
        "Dashboard stats computed"
    );

    Ok(DashboardPayload { data, meta })
}

/// `build_dashboard` bounded by a request-scoped deadline.
pub async fn build_dashboard_with_timeout<S: RecordStore>(
    store: &S,
    access: &Access,
    range: DateRange,
    today: NaiveDate,
    timeout: Duration,
) -> Result<DashboardPayload, DashboardError> {
    actix_web::rt::time::timeout(timeout, build_dashboard(store, access, range, today))
        .await
        .map_err(|_| DashboardError::Timeout(timeout))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::auth::AuthUser;
    use crate::model::{
        attendance::AttendanceRecord, car::Car, driver::Driver, earning::EarningRecord,
        expense::ExpenseRecord, owner::Owner, role::Role,
    };
    use crate::store::memory::MemoryStore;
    use chrono::NaiveTime;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn user(id: &str, name: &str, role: &str, car: Option<&str>) -> Driver {
        Driver {
            id: id.to_string(),
            name: name.to_string(),
            assigned_car_id: car.map(str::to_string),
            role: role.to_string(),
        }
    }

    fn earning(driver_id: &str, day: &str, uber: Decimal) -> EarningRecord {
        EarningRecord {
            driver_id: driver_id.to_string(),
            date: date(day),
            uber_cash: Some(uber),
            uber_account: None,
            bolt_cash: None,
            bolt_account: None,
            individual_rides_cash: None,
            individual_rides_account: None,
        }
    }

    fn expense(driver_id: &str, day: &str, amount: Decimal, status: &str) -> ExpenseRecord {
        ExpenseRecord {
            driver_id: driver_id.to_string(),
            date: date(day),
            expense_type: "fuel".to_string(),
            amount: Some(amount),
            status: status.to_string(),
        }
    }

    fn fleet() -> MemoryStore {
        MemoryStore {
            users: vec![
                user("d1", "Kwame", "driver", Some("c1")),
                user("d2", "Esi", "driver", None),
                user("a1", "Admin", "admin", None),
            ],
            cars: vec![Car {
                id: "c1".to_string(),
                plate_number: "GR-1001-24".to_string(),
                monthly_due: Some(dec!(7500)),
                assigned_driver_id: Some("d1".to_string()),
            }],
            owners: vec![Owner { id: "o1".to_string() }],
            earnings: vec![
                earning("d1", "2024-01-03", dec!(100)),
                earning("d2", "2024-01-10", dec!(60)),
                earning("d1", "2023-12-20", dec!(999)),
            ],
            expenses: vec![
                expense("d1", "2024-01-04", dec!(20), "approved"),
                expense("d2", "2024-01-05", dec!(500), "pending"),
                expense("d2", "2024-01-12", dec!(5), "approved"),
            ],
            attendance: vec![AttendanceRecord {
                driver_id: "d1".to_string(),
                date: date("2024-01-15"),
                start_time: NaiveTime::from_hms_opt(6, 0, 0),
                end_time: None,
            }],
            fail_on: None,
        }
    }

    fn january() -> DateRange {
        DateRange {
            start: date("2024-01-01"),
            end: date("2024-01-31"),
        }
    }

    #[actix_web::test]
    async fn builds_report_and_meta_from_store() {
        let payload = build_dashboard(&fleet(), &Access::ServiceRole, january(), date("2024-01-15"))
            .await
            .unwrap();

        let company = &payload.data.company_stats;
        assert_eq!(company.total_cars, 1);
        assert_eq!(company.total_owners, 1);
        assert_eq!(company.total_active_drivers, 1);
        assert_eq!(company.total_earnings, dec!(160));
        assert_eq!(company.total_expenses, dec!(25));
        assert_eq!(company.net_profit, dec!(-7365));
        assert_eq!(payload.data.driver_level_pl.len(), 2);

        let meta = &payload.meta;
        assert_eq!(meta.date_range, january());
        assert_eq!(meta.earnings.count, 2);
        assert_eq!(meta.earnings.min_date, Some(date("2024-01-03")));
        assert_eq!(meta.earnings.max_date, Some(date("2024-01-10")));
        assert_eq!(meta.earnings.total, dec!(160));
        assert_eq!(meta.expenses.count, 2);
        assert_eq!(meta.expenses.min_date, Some(date("2024-01-04")));
        assert_eq!(meta.expenses.max_date, Some(date("2024-01-12")));
    }

    #[actix_web::test]
    async fn empty_window_has_no_meta_dates() {
        let range = DateRange {
            start: date("2025-01-01"),
            end: date("2025-01-31"),
        };
        let payload = build_dashboard(&fleet(), &Access::ServiceRole, range, date("2025-01-31"))
            .await
            .unwrap();

        assert_eq!(payload.meta.earnings.count, 0);
        assert_eq!(payload.meta.earnings.min_date, None);
        assert_eq!(payload.meta.expenses.max_date, None);
        assert_eq!(payload.data.company_stats.total_active_drivers, 0);
    }

    #[actix_web::test]
    async fn failed_read_names_the_collection() {
        let store = MemoryStore {
            fail_on: Some("expenses"),
            ..fleet()
        };

        let err = build_dashboard(&store, &Access::ServiceRole, january(), date("2024-01-15"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DashboardError::Read {
                collection: Collection::Expenses,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Expenses error: connection reset"));
    }

    #[actix_web::test]
    async fn driver_caller_sees_only_own_figures() {
        let access = Access::Caller(AuthUser {
            user_id: "d2".to_string(),
            name: "Esi".to_string(),
            role: Role::Driver,
        });

        let payload = build_dashboard(&fleet(), &access, january(), date("2024-01-15"))
            .await
            .unwrap();

        assert_eq!(payload.data.driver_level_pl.len(), 1);
        assert_eq!(payload.data.driver_level_pl[0].driver, "Esi");
        assert_eq!(payload.data.company_stats.total_earnings, dec!(60));
        assert_eq!(payload.data.company_stats.total_expenses, dec!(5));
        assert_eq!(payload.data.company_stats.total_active_drivers, 0);
    }

    #[actix_web::test]
    async fn timeout_wrapper_passes_fast_requests_through() {
        let payload = build_dashboard_with_timeout(
            &fleet(),
            &Access::ServiceRole,
            january(),
            date("2024-01-15"),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert_eq!(payload.data.company_stats.total_cars, 1);
    }

    #[test]
    fn timeout_error_message() {
        let err = DashboardError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Dashboard computation timed out after 30s");
    }
}
