use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub assigned_car_id: Option<String>,
    pub role: String,
}
