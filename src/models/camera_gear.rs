//! Camera gear model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Camera gear record with checkout tracking
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CameraGear {
    pub id: i32,
    pub name: String,
    pub is_checked_out: bool,
    pub checked_out_by: Option<i32>,
    pub checked_out_date: Option<NaiveDate>,
    /// Expected return date while checked out
    pub return_date: Option<NaiveDate>,
    pub location_id: Option<i32>,
    /// Resolved location name (joined in queries, None when unresolvable)
    pub location_name: Option<String>,
    /// Email of the borrowing user (joined in queries)
    pub checked_out_by_email: Option<String>,
}

impl CameraGear {
    /// Location label for notification bodies
    pub fn location_label(&self) -> &str {
        self.location_name.as_deref().unwrap_or("Unknown")
    }

    /// Borrower label for notification bodies
    pub fn borrower_label(&self) -> &str {
        self.checked_out_by_email.as_deref().unwrap_or("Unknown")
    }
}
