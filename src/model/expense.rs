use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const APPROVED: &str = "approved";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExpenseRecord {
    pub driver_id: String,
    pub date: NaiveDate,
    pub expense_type: String,
    pub amount: Option<Decimal>,
    pub status: String,
}

impl ExpenseRecord {
    pub fn is_approved(&self) -> bool {
        self.status == APPROVED
    }

    pub fn amount(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }
}
