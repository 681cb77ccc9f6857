use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::error::{AppError, AppResult};
use crate::model::parameter::Parameter;

/// Database access for the `parameter` table. No caching at this level.
#[async_trait]
pub trait ParamRepository: Send + Sync {
    async fn find_by_key(&self, key: &str) -> AppResult<Option<Parameter>>;

    async fn find_all(&self) -> AppResult<Vec<Parameter>>;

    /// Fails with `Conflict` when the key already exists.
    async fn insert(&self, param: &Parameter) -> AppResult<()>;

    /// Returns the number of rows matched.
    async fn update(&self, param: &Parameter) -> AppResult<u64>;

    /// Returns the number of rows removed.
    async fn delete(&self, key: &str) -> AppResult<u64>;
}

pub struct MySqlParamRepository {
    pool: MySqlPool,
}

impl MySqlParamRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParamRepository for MySqlParamRepository {
    async fn find_by_key(&self, key: &str) -> AppResult<Option<Parameter>> {
        let param = sqlx::query_as::<_, Parameter>(
            r#"
            SELECT id, value, description, updated_at, updated_by
            FROM parameter
            WHERE id = ?
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(param)
    }

    async fn find_all(&self) -> AppResult<Vec<Parameter>> {
        let params = sqlx::query_as::<_, Parameter>(
            r#"
            SELECT id, value, description, updated_at, updated_by
            FROM parameter
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(params)
    }

    async fn insert(&self, param: &Parameter) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO parameter (id, value, description, updated_at, updated_by)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&param.key)
        .bind(&param.value)
        .bind(&param.description)
        .bind(param.updated_at)
        .bind(&param.updated_by)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::Conflict(format!("Parameter {} already exists", param.key)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, param: &Parameter) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE parameter
            SET value = ?, description = ?, updated_at = ?, updated_by = ?
            WHERE id = ?
            "#,
        )
        .bind(&param.value)
        .bind(&param.description)
        .bind(param.updated_at)
        .bind(&param.updated_by)
        .bind(&param.key)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, key: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM parameter WHERE id = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_pool;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[actix_web::test]
    #[ignore = "requires TEST_DATABASE_URL and a local MySQL"]
    async fn duplicate_key_maps_to_conflict() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let repo = MySqlParamRepository::new(pool);
        let param = Parameter {
            key: format!("test-{}", Uuid::new_v4()),
            value: "1".to_string(),
            description: String::new(),
            updated_at: NaiveDate::from_ymd_opt(2026, 1, 5)
                .unwrap()
                .and_hms_opt(7, 0, 0)
                .unwrap(),
            updated_by: "test".to_string(),
        };

        repo.insert(&param).await.unwrap();
        let err = repo.insert(&param).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        assert_eq!(repo.delete(&param.key).await.unwrap(), 1);
    }
}
