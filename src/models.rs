use serde::{Deserialize, Serialize};

use crate::model::role::Role;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id of the caller
    pub sub: String,
    pub name: String,
    pub role: Role,
    pub exp: usize,
    pub token_type: TokenType,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenType {
    Access,
    Refresh,
}
