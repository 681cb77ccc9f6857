use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header::HeaderMap};
use futures::future::{Ready, ready};

use crate::error::AppError;
use crate::utils::sanitize::sanitize;

pub const USERNAME_HEADER: &str = "username";
pub const ROLE_ID_HEADER: &str = "role_id";
pub const INSTITUTION_ID_HEADER: &str = "institution_id";

/// Caller identity forwarded by the gateway as request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataUser {
    pub username: String,
    pub role_id: String,
    pub institution_id: String,
}

impl MetadataUser {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let username = header_value(headers, USERNAME_HEADER);
        if username.is_empty() {
            return Err(AppError::NotFound("session metadata not found".to_string()));
        }

        Ok(Self {
            username,
            role_id: header_value(headers, ROLE_ID_HEADER),
            institution_id: header_value(headers, INSTITUTION_ID_HEADER),
        })
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|h| std::str::from_utf8(h.as_bytes()).ok())
        .map(sanitize)
        .unwrap_or_default()
}

impl FromRequest for MetadataUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req.headers()))
    }
}
