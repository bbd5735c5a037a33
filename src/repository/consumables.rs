//! Consumables repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::consumable::Consumable};

#[derive(Clone)]
pub struct ConsumablesRepository {
    pool: Pool<Postgres>,
}

impl ConsumablesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Consumables whose expiration date falls in [start, end] inclusive.
    /// This is the pushdown path; callers fall back to `list_all` plus
    /// in-process filtering when it fails.
    pub async fn expiring_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<Consumable>> {
        let items = sqlx::query_as::<_, Consumable>(
            r#"
            SELECT c.id, c.name, c.quantity, c.expires, c.location_id,
                   l.name as location_name
            FROM consumables c
            LEFT JOIN locations l ON c.location_id = l.id
            WHERE c.expires IS NOT NULL AND c.expires >= $1 AND c.expires <= $2
            ORDER BY c.expires, c.name
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Full table scan, used by the fallback path
    pub async fn list_all(&self) -> AppResult<Vec<Consumable>> {
        let items = sqlx::query_as::<_, Consumable>(
            r#"
            SELECT c.id, c.name, c.quantity, c.expires, c.location_id,
                   l.name as location_name
            FROM consumables c
            LEFT JOIN locations l ON c.location_id = l.id
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
