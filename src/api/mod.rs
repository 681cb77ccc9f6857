pub mod attendance;
pub mod parameter;

use actix_web::{HttpResponse, Responder, web};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::ApiResponse;

/// Decodes a JSON body whose fields are all optional. An empty body is the default value.
pub(crate) fn optional_json<T>(body: &web::Bytes) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/public/ping",
    responses(
        (status = 200, description = "Service is up", body = Object, example = json!({
            "code": 200, "message": "pong", "data": null
        }))
    ),
    tag = "Public"
)]
pub async fn ping() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::message("pong"))
}
