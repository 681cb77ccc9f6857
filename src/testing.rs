//! Shared fixtures for unit and handler tests.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::auth::metadata::MetadataUser;
use crate::model::parameter::{
    CHECKIN_TIME, CHECKOUT_TIME, Parameter, ROLE_LEVEL_1, ROLE_LEVEL_2,
};
use crate::repository::memory::{MemoryAttendanceRepository, MemoryParamRepository, UserProfile};
use crate::service::clock::FixedClock;
use crate::service::{AttendanceService, ParamService};
use crate::utils::param_cache::ParamCache;

pub fn param(key: &str, value: &str) -> Parameter {
    Parameter {
        key: key.to_string(),
        value: value.to_string(),
        description: String::new(),
        updated_at: NaiveDateTime::parse_from_str("2026-01-01 00:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap(),
        updated_by: "system".to_string(),
    }
}

/// Thresholds 09:00/17:00, ADMIN is level 1, HR is level 2.
pub fn default_params() -> Vec<Parameter> {
    vec![
        param(CHECKIN_TIME, "09:00"),
        param(CHECKOUT_TIME, "17:00"),
        param(ROLE_LEVEL_1, "ADMIN"),
        param(ROLE_LEVEL_2, "HR"),
    ]
}

pub fn caller(username: &str, role_id: &str, institution_id: &str) -> MetadataUser {
    MetadataUser {
        username: username.to_string(),
        role_id: role_id.to_string(),
        institution_id: institution_id.to_string(),
    }
}

/// In-memory stores shared by services built at different instants.
pub struct Harness {
    pub params: Arc<MemoryParamRepository>,
    pub attendance: Arc<MemoryAttendanceRepository>,
}

impl Harness {
    pub fn new(params: Vec<Parameter>, users: Vec<UserProfile>) -> Self {
        Self {
            params: Arc::new(MemoryParamRepository::with(params)),
            attendance: Arc::new(MemoryAttendanceRepository::with_users(users)),
        }
    }

    pub fn param_service_at(&self, now: &str) -> Arc<ParamService> {
        Arc::new(ParamService::new(
            self.params.clone(),
            ParamCache::new(),
            Arc::new(FixedClock::at(now)),
        ))
    }

    pub fn service_at(&self, now: &str) -> AttendanceService {
        AttendanceService::new(
            self.attendance.clone(),
            self.param_service_at(now),
            Arc::new(FixedClock::at(now)),
        )
    }
}
