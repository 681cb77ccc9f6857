use std::sync::Arc;

use chrono::NaiveTime;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::auth::metadata::MetadataUser;
use crate::error::{AppError, AppResult};
use crate::model::attendance::{
    AttendanceFilter, AttendanceScope, AttendanceView, CheckInOutcome, CheckOutAttendance,
    CheckOutOutcome, NewAttendance, StatusIn, StatusOut,
};
use crate::model::parameter::{CHECKIN_TIME, CHECKOUT_TIME};
use crate::model::role::RoleLevel;
use crate::models::{AttendanceReq, RfidReq};
use crate::repository::AttendanceRepository;
use crate::service::{Clock, ParamService, RoleService};
use crate::utils::sanitize::sanitize;

pub const MSG_CHECK_IN: &str = "Success Check In";
pub const MSG_CHECK_OUT: &str = "Success Check Out";

/// Attendance rules. Per user and day: no record, checked in, checked out.
pub struct AttendanceService {
    repo: Arc<dyn AttendanceRepository>,
    params: Arc<ParamService>,
    roles: RoleService,
    clock: Arc<dyn Clock>,
}

impl AttendanceService {
    pub fn new(
        repo: Arc<dyn AttendanceRepository>,
        params: Arc<ParamService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            roles: RoleService::new(params.clone()),
            params,
            clock,
        }
    }

    #[instrument(
        name = "attendance_list",
        skip(self, caller, filter),
        fields(username = %caller.username, role_id = %caller.role_id)
    )]
    pub async fn list(
        &self,
        caller: &MetadataUser,
        filter: &AttendanceFilter,
    ) -> AppResult<Vec<AttendanceView>> {
        let query = filter.validate()?;
        let level = self.roles.resolve_level(&caller.role_id).await?;

        let scope = match level {
            RoleLevel::Global => AttendanceScope::All,
            RoleLevel::Institution => {
                if caller.institution_id.is_empty() {
                    return Err(AppError::Validation(
                        "institution_id is required for institution-scoped roles".to_string(),
                    ));
                }
                AttendanceScope::Institution(caller.institution_id.clone())
            }
            RoleLevel::Own => AttendanceScope::User(caller.username.clone()),
        };

        debug!(level = level.as_u8(), ?scope, ?query, "Resolved attendance scope");

        self.repo.find_attendances(&scope, query).await
    }

    #[instrument(name = "attendance_today", skip(self))]
    pub async fn today(&self, username: &str) -> AppResult<AttendanceView> {
        let today = self.clock.now().date_naive();

        self.repo
            .find_today(username, today)
            .await?
            .ok_or_else(|| AppError::NotFound("No attendance found for today".to_string()))
    }

    #[instrument(name = "attendance_check_in", skip(self, req))]
    pub async fn check_in(&self, username: &str, req: AttendanceReq) -> AppResult<()> {
        match self.try_check_in(username, &req).await? {
            CheckInOutcome::Inserted => Ok(()),
            CheckInOutcome::AlreadyExists => {
                Err(AppError::Conflict("Already checked in today".to_string()))
            }
        }
    }

    #[instrument(name = "attendance_check_out", skip(self, req))]
    pub async fn check_out(&self, username: &str, req: AttendanceReq) -> AppResult<()> {
        let now = self.clock.now();
        let threshold = self.threshold(CHECKOUT_TIME).await?;

        let record = CheckOutAttendance {
            username: username.to_string(),
            check_out: now.naive_local(),
            status_out: status_out(now.time(), threshold),
            remark_out: req.remark,
            source_out: req.source,
        };

        match self.repo.check_out(&record, now.date_naive()).await? {
            CheckOutOutcome::Updated => {
                info!(status_out = %record.status_out, "Checked out");
                Ok(())
            }
            CheckOutOutcome::NoActiveCheckIn => Err(AppError::NotFound(
                "No active check-in found for today".to_string(),
            )),
        }
    }

    /// Badge swipe: the first swipe of the day checks in, the second checks out.
    #[instrument(name = "attendance_rfid", skip(self, req))]
    pub async fn check_in_out_rfid(&self, req: RfidReq) -> AppResult<&'static str> {
        let username = sanitize(&req.username);
        if username.is_empty() {
            return Err(AppError::Validation("username is required".to_string()));
        }

        let swipe = AttendanceReq {
            remark: req.remark,
            source: req.source,
        };

        match self.try_check_in(&username, &swipe).await? {
            CheckInOutcome::Inserted => Ok(MSG_CHECK_IN),
            CheckInOutcome::AlreadyExists => {
                self.check_out(&username, swipe).await?;
                Ok(MSG_CHECK_OUT)
            }
        }
    }

    async fn try_check_in(&self, username: &str, req: &AttendanceReq) -> AppResult<CheckInOutcome> {
        let now = self.clock.now();
        let threshold = self.threshold(CHECKIN_TIME).await?;

        let record = NewAttendance {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            check_in: now.naive_local(),
            status_in: status_in(now.time(), threshold),
            remark_in: req.remark.clone(),
            source_in: req.source.clone(),
        };

        let outcome = self.repo.check_in(&record).await?;
        debug!(username, ?outcome, status_in = %record.status_in, "Check-in attempted");

        Ok(outcome)
    }

    async fn threshold(&self, key: &str) -> AppResult<NaiveTime> {
        let param = self.params.get_by_key(key).await?;
        parse_threshold(key, &param.value)
    }
}

/// `HH:MM` local time-of-day.
fn parse_threshold(key: &str, raw: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|e| {
        AppError::Configuration(format!("Parameter {key} has invalid time {raw:?}: {e}"))
    })
}

fn status_in(now: NaiveTime, threshold: NaiveTime) -> StatusIn {
    if now < threshold {
        StatusIn::OnTime
    } else {
        StatusIn::Late
    }
}

fn status_out(now: NaiveTime, threshold: NaiveTime) -> StatusOut {
    if now < threshold {
        StatusOut::Early
    } else {
        StatusOut::Normal
    }
}
