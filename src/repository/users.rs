//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{enums::UserRole, user::User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Users whose role is in the given set (pushdown path)
    pub async fn with_roles(&self, roles: &[UserRole]) -> AppResult<Vec<User>> {
        let codes: Vec<i16> = roles.iter().map(|r| (*r).into()).collect();

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, role
            FROM users
            WHERE role = ANY($1)
            ORDER BY email
            "#,
        )
        .bind(&codes)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Full table scan, used by the fallback path
    pub async fn list_all(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, role
            FROM users
            ORDER BY email
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
