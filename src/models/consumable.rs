//! Consumable supply model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Consumable supply record (film stock, chemistry, paper, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Consumable {
    pub id: i32,
    pub name: String,
    /// Units currently in stock
    pub quantity: i32,
    /// Expiration date, if the supply expires at all
    pub expires: Option<NaiveDate>,
    pub location_id: Option<i32>,
    /// Resolved location name (joined in queries, None when unresolvable)
    pub location_name: Option<String>,
}

impl Consumable {
    /// Location label for notification bodies
    pub fn location_label(&self) -> &str {
        self.location_name.as_deref().unwrap_or("Unknown")
    }
}
