use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::error::AppResult;
use crate::model::attendance::{
    AttendanceQuery, AttendanceScope, AttendanceView, CheckInOutcome, CheckOutAttendance,
    CheckOutOutcome, NewAttendance,
};

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn find_attendances(
        &self,
        scope: &AttendanceScope,
        query: AttendanceQuery,
    ) -> AppResult<Vec<AttendanceView>>;

    async fn find_today(&self, username: &str, today: NaiveDate)
    -> AppResult<Option<AttendanceView>>;

    /// Inserts the day's row unless one already exists for the user.
    async fn check_in(&self, record: &NewAttendance) -> AppResult<CheckInOutcome>;

    /// Closes the user's open row for `today`.
    async fn check_out(
        &self,
        record: &CheckOutAttendance,
        today: NaiveDate,
    ) -> AppResult<CheckOutOutcome>;
}

const SELECT_VIEW: &str = r#"
    SELECT
        a.id, a.username, a.check_in, a.check_out,
        a.status_in, a.status_out, a.remark_in, a.remark_out,
        a.source_in, a.source_out,
        u.fullname, u.shortname, u.email, u.gender, u.phone_number
    FROM attendance AS a
    LEFT JOIN users AS u ON a.username = u.username
"#;

pub struct MySqlAttendanceRepository {
    pool: MySqlPool,
}

impl MySqlAttendanceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for MySqlAttendanceRepository {
    async fn find_attendances(
        &self,
        scope: &AttendanceScope,
        query: AttendanceQuery,
    ) -> AppResult<Vec<AttendanceView>> {
        let mut sql = String::from(SELECT_VIEW);

        let scope_value = match scope {
            AttendanceScope::All => None,
            AttendanceScope::Institution(institution_id) => {
                sql.push_str(" WHERE u.institution_id = ?");
                Some(institution_id.as_str())
            }
            AttendanceScope::User(username) => {
                sql.push_str(" WHERE a.username = ?");
                Some(username.as_str())
            }
        };

        sql.push_str(" ORDER BY a.check_in ");
        sql.push_str(query.sort.as_sql());

        if query.limit.is_some() {
            sql.push_str(" LIMIT ?");
        }

        tracing::debug!(sql = %sql, "Fetching attendances");

        let mut data_q = sqlx::query_as::<_, AttendanceView>(&sql);
        if let Some(value) = scope_value {
            data_q = data_q.bind(value);
        }
        if let Some(limit) = query.limit {
            data_q = data_q.bind(limit);
        }

        Ok(data_q.fetch_all(&self.pool).await?)
    }

    async fn find_today(
        &self,
        username: &str,
        today: NaiveDate,
    ) -> AppResult<Option<AttendanceView>> {
        let sql = format!("{SELECT_VIEW} WHERE a.username = ? AND a.check_in_date = ?");

        let view = sqlx::query_as::<_, AttendanceView>(&sql)
            .bind(username)
            .bind(today)
            .fetch_optional(&self.pool)
            .await?;

        Ok(view)
    }

    async fn check_in(&self, record: &NewAttendance) -> AppResult<CheckInOutcome> {
        // uq_attendance_user_day makes this the only guard needed.
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (id, username, check_in, status_in, remark_in, source_in)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.username)
        .bind(record.check_in)
        .bind(record.status_in.to_string())
        .bind(&record.remark_in)
        .bind(&record.source_in)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(CheckInOutcome::Inserted),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Ok(CheckInOutcome::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn check_out(
        &self,
        record: &CheckOutAttendance,
        today: NaiveDate,
    ) -> AppResult<CheckOutOutcome> {
        let result = sqlx::query(
            r#"
            UPDATE attendance
            SET check_out = ?, status_out = ?, remark_out = ?, source_out = ?
            WHERE username = ?
            AND check_in_date = ?
            AND check_out IS NULL
            "#,
        )
        .bind(record.check_out)
        .bind(record.status_out.to_string())
        .bind(&record.remark_out)
        .bind(&record.source_out)
        .bind(&record.username)
        .bind(today)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(CheckOutOutcome::NoActiveCheckIn);
        }

        Ok(CheckOutOutcome::Updated)
    }
}
