//! Lab equipment model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Lab equipment record with service tracking
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LabEquipment {
    pub id: i32,
    pub name: String,
    /// Date of the most recent service, if any
    pub last_serviced_on: Option<NaiveDate>,
    /// Human-readable service interval, e.g. "monthly", "30 days", "90"
    pub service_frequency: Option<String>,
}
