use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::attendance::AttendanceFilter;

/// Uniform body for every response: `{code, message, data}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            data: None,
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AttendanceReq {
    #[schema(example = "WFO")]
    pub remark: Option<String>,
    #[schema(example = "web")]
    pub source: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RfidReq {
    /// Username the badge is registered to
    #[schema(example = "jdoe")]
    pub username: String,
    #[schema(example = "Main gate")]
    pub remark: Option<String>,
    #[schema(example = "rfid")]
    pub source: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ListAttendanceReq {
    #[serde(default)]
    pub filter: AttendanceFilter,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ParamReq {
    #[schema(example = "checkin-time")]
    pub key: String,
    #[schema(example = "09:00")]
    pub value: String,
    #[schema(example = "Latest on-time check-in")]
    pub description: Option<String>,
}
