use crate::auth::metadata::MetadataUser;
use crate::api::optional_json;
use crate::models::{ApiResponse, AttendanceReq, ListAttendanceReq, RfidReq};
use crate::service::AttendanceService;
use crate::service::attendance::{MSG_CHECK_IN, MSG_CHECK_OUT};
use actix_web::{HttpResponse, Responder, web};
use tracing::instrument;

/// Today's attendance of the caller
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "Today's attendance", body = Object, example = json!({
            "code": 200,
            "message": "Success Get Today Attendances",
            "data": {
                "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
                "username": "jdoe",
                "check_in": "2026-01-05T08:55:00",
                "check_out": null,
                "status_in": "On Time",
                "status_out": null,
                "fullname": "John Doe"
            }
        })),
        (status = 404, description = "No attendance today or no session metadata")
    ),
    params(
        ("username" = String, Header, description = "Caller username"),
    ),
    tag = "Attendance"
)]
#[instrument(name = "http_today_attendance", skip_all, fields(username = %meta.username))]
pub async fn get_today_attendance(
    meta: MetadataUser,
    service: web::Data<AttendanceService>,
) -> actix_web::Result<impl Responder> {
    let today = service.today(&meta.username).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Success Get Today Attendances", today)))
}

/// Attendance history visible to the caller's role level
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body(
        content = ListAttendanceReq,
        description = "Optional limit and sort direction",
        content_type = "application/json"
    ),
    params(
        ("username" = String, Header, description = "Caller username"),
        ("role_id" = Option<String>, Header, description = "Caller role id"),
        ("institution_id" = Option<String>, Header, description = "Caller institution id"),
    ),
    responses(
        (status = 200, description = "Attendance list", body = Object),
        (status = 400, description = "Invalid filter"),
        (status = 404, description = "No session metadata or missing role parameters")
    ),
    tag = "Attendance"
)]
#[instrument(name = "http_list_attendances", skip_all, fields(username = %meta.username))]
pub async fn list_attendances(
    meta: MetadataUser,
    service: web::Data<AttendanceService>,
    body: web::Bytes,
) -> actix_web::Result<impl Responder> {
    // An empty body means "no filter".
    let req: ListAttendanceReq = optional_json(&body)?;

    let rows = service.list(&meta, &req.filter).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Success Get User Attendances", rows)))
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/checkin",
    request_body = AttendanceReq,
    params(
        ("username" = String, Header, description = "Caller username"),
    ),
    responses(
        (status = 200, description = "Checked in", body = Object, example = json!({
            "code": 200, "message": "Success Check In", "data": null
        })),
        (status = 409, description = "Already checked in today", body = Object, example = json!({
            "code": 409, "message": "Already checked in today", "data": null
        })),
        (status = 500, description = "Threshold parameter invalid or database failure")
    ),
    tag = "Attendance"
)]
#[instrument(name = "http_check_in", skip_all, fields(username = %meta.username))]
pub async fn check_in(
    meta: MetadataUser,
    service: web::Data<AttendanceService>,
    body: web::Bytes,
) -> actix_web::Result<impl Responder> {
    let req: AttendanceReq = optional_json(&body)?;
    service.check_in(&meta.username, req).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(MSG_CHECK_IN)))
}

/// Check-out endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/checkout",
    request_body = AttendanceReq,
    params(
        ("username" = String, Header, description = "Caller username"),
    ),
    responses(
        (status = 200, description = "Checked out", body = Object, example = json!({
            "code": 200, "message": "Success Check Out", "data": null
        })),
        (status = 404, description = "No active check-in found for today", body = Object, example = json!({
            "code": 404, "message": "No active check-in found for today", "data": null
        }))
    ),
    tag = "Attendance"
)]
#[instrument(name = "http_check_out", skip_all, fields(username = %meta.username))]
pub async fn check_out(
    meta: MetadataUser,
    service: web::Data<AttendanceService>,
    body: web::Bytes,
) -> actix_web::Result<impl Responder> {
    let req: AttendanceReq = optional_json(&body)?;
    service.check_out(&meta.username, req).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(MSG_CHECK_OUT)))
}

/// Badge swipe: first swipe of the day checks in, second checks out
#[utoipa::path(
    post,
    path = "/public/checkinout-rfid",
    request_body = RfidReq,
    responses(
        (status = 200, description = "Swipe recorded", body = Object, example = json!({
            "code": 200, "message": "Success Check In", "data": null
        })),
        (status = 404, description = "Already checked out today"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Public"
)]
#[instrument(name = "http_rfid", skip_all)]
pub async fn check_in_out_rfid(
    service: web::Data<AttendanceService>,
    payload: web::Json<RfidReq>,
) -> actix_web::Result<impl Responder> {
    let message = service.check_in_out_rfid(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(message)))
}
