use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use utoipa::ToSchema;

use crate::model::{
    attendance::AttendanceRecord, car::Car, driver::Driver, earning::EarningRecord,
    expense::ExpenseRecord, owner::Owner,
};

/// Flat monthly fee charged per car at company level.
pub const MANDATORY_DUE_PER_CAR: Decimal = Decimal::from_parts(7500, 0, 0, false, 0);

pub const UBER_COLOR: &str = "#3b82f6";
pub const BOLT_COLOR: &str = "#10b981";
pub const INDIVIDUAL_COLOR: &str = "#f59e0b";

/// Record sets the report is computed from. Earnings and expenses are
/// expected to be limited to the reporting window already, attendance to today.
pub struct DashboardInputs<'a> {
    pub drivers: &'a [Driver],
    pub cars: &'a [Car],
    pub owners: &'a [Owner],
    pub earnings: &'a [EarningRecord],
    pub expenses: &'a [ExpenseRecord],
    pub attendance: &'a [AttendanceRecord],
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyStats {
    #[schema(example = 12)]
    pub total_cars: usize,
    #[schema(example = 4)]
    pub total_owners: usize,
    #[schema(example = 7)]
    pub total_active_drivers: usize,
    #[schema(example = 90000.0, value_type = f64)]
    pub total_mandatory_dues: Decimal,
    #[schema(example = 152340.5, value_type = f64)]
    pub total_earnings: Decimal,
    #[schema(example = 18200.0, value_type = f64)]
    pub total_expenses: Decimal,
    #[schema(example = 44140.5, value_type = f64)]
    pub net_profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CarProfitLoss {
    #[schema(example = "GR-1234-24")]
    pub car: String,
    #[schema(value_type = f64)]
    pub earnings: Decimal,
    #[schema(value_type = f64)]
    pub expenses: Decimal,
    #[schema(value_type = f64)]
    pub net: Decimal,
    #[schema(example = 7500.0, value_type = f64)]
    pub due: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DriverProfitLoss {
    #[schema(example = "Kwame Mensah")]
    pub driver: String,
    #[schema(value_type = f64)]
    pub earnings: Decimal,
    #[schema(value_type = f64)]
    pub expenses: Decimal,
    #[schema(value_type = f64)]
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PlatformEarnings {
    #[schema(example = "Uber")]
    pub name: String,
    #[schema(value_type = f64)]
    pub value: Decimal,
    #[schema(example = "#3b82f6")]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyEarnings {
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(value_type = f64)]
    pub uber: Decimal,
    #[schema(value_type = f64)]
    pub bolt: Decimal,
    #[schema(value_type = f64)]
    pub individual: Decimal,
    #[schema(value_type = f64)]
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExpenseTypeTotal {
    #[serde(rename = "type")]
    #[schema(example = "fuel")]
    pub expense_type: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[schema(example = 3)]
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub company_stats: CompanyStats,
    #[serde(rename = "carLevelPL")]
    pub car_level_pl: Vec<CarProfitLoss>,
    #[serde(rename = "driverLevelPL")]
    pub driver_level_pl: Vec<DriverProfitLoss>,
    pub earnings_by_platform: Vec<PlatformEarnings>,
    pub earnings_by_date: Vec<DailyEarnings>,
    pub expenses_by_type: Vec<ExpenseTypeTotal>,
}

#[derive(Default, Clone, Copy)]
struct Totals {
    earnings: Decimal,
    expenses: Decimal,
}

impl Totals {
    fn add(&mut self, other: Totals) {
        self.earnings += other.earnings;
        self.expenses += other.expenses;
    }

    fn net(&self) -> Decimal {
        self.earnings - self.expenses
    }
}

/// Sums earnings and approved expenses per driver id in one pass each.
fn index_by_driver<'a>(
    earnings: &'a [EarningRecord],
    expenses: &'a [ExpenseRecord],
) -> HashMap<&'a str, Totals> {
    let mut index: HashMap<&str, Totals> = HashMap::new();

    for earning in earnings {
        index.entry(earning.driver_id.as_str()).or_default().earnings += earning.total();
    }
    for expense in expenses.iter().filter(|e| e.is_approved()) {
        index.entry(expense.driver_id.as_str()).or_default().expenses += expense.amount();
    }

    index
}

pub fn aggregate(inputs: &DashboardInputs) -> DashboardStats {
    let approved: Vec<&ExpenseRecord> = inputs.expenses.iter().filter(|e| e.is_approved()).collect();

    let total_cars = inputs.cars.len();
    let total_mandatory_dues = Decimal::from(total_cars) * MANDATORY_DUE_PER_CAR;
    let total_earnings: Decimal = inputs.earnings.iter().map(EarningRecord::total).sum();
    let total_expenses: Decimal = approved.iter().map(|e| e.amount()).sum();

    let company_stats = CompanyStats {
        total_cars,
        total_owners: inputs.owners.len(),
        total_active_drivers: inputs.attendance.iter().filter(|a| a.is_active()).count(),
        total_mandatory_dues,
        total_earnings,
        total_expenses,
        net_profit: total_earnings - total_mandatory_dues - total_expenses,
    };

    let by_driver = index_by_driver(inputs.earnings, inputs.expenses);
    let driver_totals = |id: &str| by_driver.get(id).copied().unwrap_or_default();

    // A car is credited with every driver currently assigned to it.
    let mut by_car: HashMap<&str, Totals> = HashMap::new();
    for driver in inputs.drivers {
        if let Some(car_id) = driver.assigned_car_id.as_deref() {
            by_car.entry(car_id).or_default().add(driver_totals(&driver.id));
        }
    }

    let car_level_pl = inputs
        .cars
        .iter()
        .map(|car| {
            let totals = by_car.get(car.id.as_str()).copied().unwrap_or_default();
            CarProfitLoss {
                car: car.plate_number.clone(),
                earnings: totals.earnings,
                expenses: totals.expenses,
                net: totals.net(),
                due: car.monthly_due.unwrap_or(Decimal::ZERO),
            }
        })
        .collect();

    let driver_level_pl = inputs
        .drivers
        .iter()
        .map(|driver| {
            let totals = driver_totals(&driver.id);
            DriverProfitLoss {
                driver: driver.name.clone(),
                earnings: totals.earnings,
                expenses: totals.expenses,
                net: totals.net(),
            }
        })
        .collect();

    DashboardStats {
        company_stats,
        car_level_pl,
        driver_level_pl,
        earnings_by_platform: earnings_by_platform(inputs.earnings),
        earnings_by_date: earnings_by_date(inputs.earnings),
        expenses_by_type: expenses_by_type(&approved),
    }
}

fn earnings_by_platform(earnings: &[EarningRecord]) -> Vec<PlatformEarnings> {
    let (uber, bolt, individual) = earnings.iter().fold(
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        |(uber, bolt, individual), e| (uber + e.uber(), bolt + e.bolt(), individual + e.individual()),
    );

    [("Uber", uber, UBER_COLOR), ("Bolt", bolt, BOLT_COLOR), ("Individual", individual, INDIVIDUAL_COLOR)]
        .into_iter()
        .map(|(name, value, color)| PlatformEarnings {
            name: name.to_string(),
            value,
            color: color.to_string(),
        })
        .collect()
}

fn earnings_by_date(earnings: &[EarningRecord]) -> Vec<DailyEarnings> {
    let mut days: BTreeMap<NaiveDate, DailyEarnings> = BTreeMap::new();

    for e in earnings {
        let day = days.entry(e.date).or_insert_with(|| DailyEarnings {
            date: e.date,
            uber: Decimal::ZERO,
            bolt: Decimal::ZERO,
            individual: Decimal::ZERO,
            total: Decimal::ZERO,
        });
        day.uber += e.uber();
        day.bolt += e.bolt();
        day.individual += e.individual();
        day.total += e.total();
    }

    days.into_values().collect()
}

// Keeps the order in which each type first appears.
fn expenses_by_type(expenses: &[&ExpenseRecord]) -> Vec<ExpenseTypeTotal> {
    let mut totals: Vec<ExpenseTypeTotal> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for expense in expenses {
        let idx = *position.entry(expense.expense_type.as_str()).or_insert_with(|| {
            totals.push(ExpenseTypeTotal {
                expense_type: expense.expense_type.clone(),
                amount: Decimal::ZERO,
                count: 0,
            });
            totals.len() - 1
        });
        totals[idx].amount += expense.amount();
        totals[idx].count += 1;
    }

    totals
}
