use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Upper bound accepted for `filter.limit`.
pub const MAX_LIMIT: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StatusIn {
    #[strum(serialize = "On Time")]
    OnTime,
    Late,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StatusOut {
    Early,
    Normal,
}

/// Row written by a check-in.
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub id: String,
    pub username: String,
    pub check_in: NaiveDateTime,
    pub status_in: StatusIn,
    pub remark_in: Option<String>,
    pub source_in: Option<String>,
}

/// Columns filled in by a check-out.
#[derive(Debug, Clone)]
pub struct CheckOutAttendance {
    pub username: String,
    pub check_out: NaiveDateTime,
    pub status_out: StatusOut,
    pub remark_out: Option<String>,
    pub source_out: Option<String>,
}

/// Attendance row joined with the owner's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceView {
    #[schema(example = "0f8fad5b-d9cb-469f-a165-70867728950e")]
    pub id: String,
    #[schema(example = "jdoe")]
    pub username: String,
    #[schema(example = "2026-01-01T08:55:00", format = "date-time", value_type = String)]
    pub check_in: NaiveDateTime,
    #[schema(example = "2026-01-01T17:05:00", format = "date-time", value_type = Option<String>)]
    pub check_out: Option<NaiveDateTime>,
    #[schema(example = "On Time")]
    pub status_in: Option<String>,
    #[schema(example = "Normal")]
    pub status_out: Option<String>,
    pub remark_in: Option<String>,
    pub remark_out: Option<String>,
    pub source_in: Option<String>,
    pub source_out: Option<String>,
    #[schema(example = "John Doe")]
    pub fullname: Option<String>,
    #[schema(example = "John")]
    pub shortname: Option<String>,
    #[schema(example = "jdoe@example.com")]
    pub email: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInOutcome {
    Inserted,
    AlreadyExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutOutcome {
    Updated,
    NoActiveCheckIn,
}

/// Which rows a caller is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceScope {
    All,
    Institution(String),
    User(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SortType {
    #[strum(serialize = "ASC")]
    Asc,
    #[default]
    #[strum(serialize = "DESC")]
    Desc,
}

impl SortType {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortType::Asc => "ASC",
            SortType::Desc => "DESC",
        }
    }
}

/// Raw list filter as sent by the client.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AttendanceFilter {
    /// Maximum rows to return, 0 or absent for no limit
    #[schema(example = 30)]
    pub limit: Option<u32>,
    /// `ASC` or `DESC` on check-in time
    #[schema(example = "DESC")]
    pub sort_type: Option<String>,
}

/// Filter after validation; only closed values reach the query text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceQuery {
    pub limit: Option<u32>,
    pub sort: SortType,
}

impl AttendanceFilter {
    pub fn validate(&self) -> AppResult<AttendanceQuery> {
        let limit = match self.limit {
            None | Some(0) => None,
            Some(n) if n > MAX_LIMIT => {
                return Err(AppError::Validation(format!(
                    "limit must not exceed {MAX_LIMIT}"
                )));
            }
            Some(n) => Some(n),
        };

        let sort = match self.sort_type.as_deref().map(str::trim) {
            None | Some("") => SortType::default(),
            Some(raw) => raw.parse::<SortType>().map_err(|_| {
                AppError::Validation("sort_type must be ASC or DESC".to_string())
            })?,
        };

        Ok(AttendanceQuery { limit, sort })
    }
}
