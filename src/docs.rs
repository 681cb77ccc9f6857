use crate::model::attendance::{AttendanceFilter, AttendanceView};
use crate::model::parameter::Parameter;
use crate::models::{AttendanceReq, ListAttendanceReq, ParamReq, RfidReq};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Portal API",
        version = "1.0.0",
        description = r#"
## Attendance Portal

Daily check-in/check-out tracking with role-scoped history and cached system parameters.

### Caller identity
Protected endpoints read the caller from the `username`, `role_id` and `institution_id`
headers set by the gateway.

### Role levels
- **1**: role id listed in parameter `role-level-1`, sees every record
- **2**: role id listed in parameter `role-level-2`, sees its institution
- **3**: anyone else, sees only their own records

### Response format
Every response is `{"code": <http status>, "message": "...", "data": ...}`.
"#,
    ),
    paths(
        crate::api::ping,

        crate::api::attendance::get_today_attendance,
        crate::api::attendance::list_attendances,
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::check_in_out_rfid,

        crate::api::parameter::list_params,
        crate::api::parameter::get_param,
        crate::api::parameter::create_param,
        crate::api::parameter::update_param,
        crate::api::parameter::delete_param
    ),
    components(
        schemas(
            AttendanceReq,
            RfidReq,
            ListAttendanceReq,
            AttendanceFilter,
            AttendanceView,
            ParamReq,
            Parameter
        )
    ),
    tags(
        (name = "Attendance", description = "Check-in, check-out and history"),
        (name = "Parameter", description = "Cached system parameters"),
        (name = "Public", description = "Unauthenticated endpoints"),
    )
)]
pub struct ApiDoc;
