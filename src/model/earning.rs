use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One driver's takings for one day, split by platform and payment channel.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EarningRecord {
    pub driver_id: String,
    pub date: NaiveDate,
    pub uber_cash: Option<Decimal>,
    pub uber_account: Option<Decimal>,
    pub bolt_cash: Option<Decimal>,
    pub bolt_account: Option<Decimal>,
    pub individual_rides_cash: Option<Decimal>,
    pub individual_rides_account: Option<Decimal>,
}

fn amount(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

impl EarningRecord {
    pub fn uber(&self) -> Decimal {
        amount(self.uber_cash) + amount(self.uber_account)
    }

    pub fn bolt(&self) -> Decimal {
        amount(self.bolt_cash) + amount(self.bolt_account)
    }

    pub fn individual(&self) -> Decimal {
        amount(self.individual_rides_cash) + amount(self.individual_rides_account)
    }

    pub fn total(&self) -> Decimal {
        self.uber() + self.bolt() + self.individual()
    }
}
