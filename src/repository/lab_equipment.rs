//! Lab equipment repository for database operations

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::lab_equipment::LabEquipment};

#[derive(Clone)]
pub struct LabEquipmentRepository {
    pool: Pool<Postgres>,
}

impl LabEquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Full table scan. Service-due arithmetic depends on a per-record
    /// frequency string, so no pushdown filter is attempted.
    pub async fn list_all(&self) -> AppResult<Vec<LabEquipment>> {
        let items = sqlx::query_as::<_, LabEquipment>(
            r#"
            SELECT id, name, last_serviced_on, service_frequency
            FROM lab_equipment
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
