//! Camera gear repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::camera_gear::CameraGear};

const GEAR_COLUMNS: &str = r#"
    g.id, g.name, g.is_checked_out, g.checked_out_by, g.checked_out_date,
    g.return_date, g.location_id,
    l.name as location_name,
    u.email as checked_out_by_email
"#;

#[derive(Clone)]
pub struct CameraGearRepository {
    pool: Pool<Postgres>,
}

impl CameraGearRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Checked-out gear due back in [start, end] inclusive (pushdown path)
    pub async fn due_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<CameraGear>> {
        let items = sqlx::query_as::<_, CameraGear>(&format!(
            r#"
            SELECT {GEAR_COLUMNS}
            FROM camera_gear g
            LEFT JOIN locations l ON g.location_id = l.id
            LEFT JOIN users u ON g.checked_out_by = u.id
            WHERE g.is_checked_out
              AND g.return_date IS NOT NULL
              AND g.return_date >= $1 AND g.return_date <= $2
            ORDER BY g.return_date, g.name
            "#
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Checked-out gear whose return date has already passed (pushdown path)
    pub async fn overdue_before(&self, today: NaiveDate) -> AppResult<Vec<CameraGear>> {
        let items = sqlx::query_as::<_, CameraGear>(&format!(
            r#"
            SELECT {GEAR_COLUMNS}
            FROM camera_gear g
            LEFT JOIN locations l ON g.location_id = l.id
            LEFT JOIN users u ON g.checked_out_by = u.id
            WHERE g.is_checked_out
              AND g.return_date IS NOT NULL
              AND g.return_date < $1
            ORDER BY g.return_date, g.name
            "#
        ))
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Full table scan, used by the fallback path
    pub async fn list_all(&self) -> AppResult<Vec<CameraGear>> {
        let items = sqlx::query_as::<_, CameraGear>(&format!(
            r#"
            SELECT {GEAR_COLUMNS}
            FROM camera_gear g
            LEFT JOIN locations l ON g.location_id = l.id
            LEFT JOIN users u ON g.checked_out_by = u.id
            ORDER BY g.name
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
