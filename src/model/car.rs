use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Car {
    pub id: String,
    pub plate_number: String,
    pub monthly_due: Option<Decimal>,
    pub assigned_driver_id: Option<String>,
}
