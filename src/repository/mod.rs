pub mod attendance;
pub mod parameter;

#[cfg(test)]
pub mod memory;

pub use attendance::{AttendanceRepository, MySqlAttendanceRepository};
pub use parameter::{MySqlParamRepository, ParamRepository};

/// Migrated pool for the MySQL-backed tests, `None` when `TEST_DATABASE_URL` is unset.
#[cfg(test)]
pub(crate) async fn test_pool() -> Option<sqlx::MySqlPool> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("skipping: TEST_DATABASE_URL not set");
        return None;
    };

    let pool = sqlx::MySqlPool::connect(&url).await.expect("connect test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrate test database");
    Some(pool)
}
