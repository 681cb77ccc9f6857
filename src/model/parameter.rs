use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const CHECKIN_TIME: &str = "checkin-time";
pub const CHECKOUT_TIME: &str = "checkout-time";
pub const ROLE_LEVEL_1: &str = "role-level-1";
pub const ROLE_LEVEL_2: &str = "role-level-2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Parameter {
    #[sqlx(rename = "id")]
    #[schema(example = "checkin-time")]
    pub key: String,
    #[schema(example = "09:00")]
    pub value: String,
    #[schema(example = "Latest on-time check-in (HH:MM, local)")]
    pub description: String,
    #[schema(example = "2026-01-01T08:00:00", format = "date-time", value_type = String)]
    pub updated_at: NaiveDateTime,
    #[schema(example = "admin")]
    pub updated_by: String,
}
