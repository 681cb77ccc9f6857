use crate::auth::metadata::MetadataUser;
use crate::models::{ApiResponse, ParamReq};
use crate::service::ParamService;
use actix_web::{HttpResponse, Responder, web};
use tracing::instrument;

/// All parameters, read straight from the database
#[utoipa::path(
    get,
    path = "/api/param",
    params(("username" = String, Header, description = "Caller username")),
    responses((status = 200, description = "Parameter list", body = Object)),
    tag = "Parameter"
)]
#[instrument(name = "http_list_params", skip_all, fields(username = %meta.username))]
pub async fn list_params(
    meta: MetadataUser,
    service: web::Data<ParamService>,
) -> actix_web::Result<impl Responder> {
    let params = service.get_all().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Success Get All Param", params)))
}

/// One parameter by key (served from cache when possible)
#[utoipa::path(
    get,
    path = "/api/param/{key}",
    params(
        ("key" = String, Path, description = "Parameter key"),
        ("username" = String, Header, description = "Caller username"),
    ),
    responses(
        (status = 200, description = "Parameter found", body = Object),
        (status = 404, description = "Parameter not found")
    ),
    tag = "Parameter"
)]
#[instrument(name = "http_get_param", skip_all, fields(username = %meta.username))]
pub async fn get_param(
    meta: MetadataUser,
    service: web::Data<ParamService>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let param = service.get_by_key(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Success Get Param", param)))
}

#[utoipa::path(
    post,
    path = "/api/param",
    request_body = ParamReq,
    params(("username" = String, Header, description = "Caller username")),
    responses(
        (status = 200, description = "Parameter created", body = Object),
        (status = 409, description = "Parameter already exists")
    ),
    tag = "Parameter"
)]
#[instrument(name = "http_create_param", skip_all, fields(username = %meta.username))]
pub async fn create_param(
    meta: MetadataUser,
    service: web::Data<ParamService>,
    payload: web::Json<ParamReq>,
) -> actix_web::Result<impl Responder> {
    let param = service.insert(payload.into_inner(), &meta.username).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Success Insert New Param", param)))
}

#[utoipa::path(
    put,
    path = "/api/param",
    request_body = ParamReq,
    params(("username" = String, Header, description = "Caller username")),
    responses(
        (status = 200, description = "Parameter updated", body = Object),
        (status = 404, description = "Parameter not found")
    ),
    tag = "Parameter"
)]
#[instrument(name = "http_update_param", skip_all, fields(username = %meta.username))]
pub async fn update_param(
    meta: MetadataUser,
    service: web::Data<ParamService>,
    payload: web::Json<ParamReq>,
) -> actix_web::Result<impl Responder> {
    let param = service.update(payload.into_inner(), &meta.username).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Success Update Param", param)))
}

#[utoipa::path(
    delete,
    path = "/api/param/{key}",
    params(
        ("key" = String, Path, description = "Parameter key"),
        ("username" = String, Header, description = "Caller username"),
    ),
    responses(
        (status = 200, description = "Parameter deleted", body = Object),
        (status = 404, description = "Parameter not found")
    ),
    tag = "Parameter"
)]
#[instrument(name = "http_delete_param", skip_all, fields(username = %meta.username))]
pub async fn delete_param(
    meta: MetadataUser,
    service: web::Data<ParamService>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    service.delete(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Success Delete Param")))
}
