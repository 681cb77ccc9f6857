//! In-memory repositories for tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::channel::oneshot;

use crate::error::{AppError, AppResult};
use crate::model::attendance::{
    AttendanceQuery, AttendanceScope, AttendanceView, CheckInOutcome, CheckOutAttendance,
    CheckOutOutcome, NewAttendance, SortType,
};
use crate::model::parameter::Parameter;

use super::{AttendanceRepository, ParamRepository};

#[derive(Default)]
pub struct MemoryParamRepository {
    rows: Mutex<BTreeMap<String, Parameter>>,
    reads: AtomicUsize,
}

impl MemoryParamRepository {
    pub fn with(params: Vec<Parameter>) -> Self {
        let rows = params.into_iter().map(|p| (p.key.clone(), p)).collect();
        Self {
            rows: Mutex::new(rows),
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of `find_by_key` calls that reached the "database".
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn stored(&self, key: &str) -> Option<Parameter> {
        self.rows.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl ParamRepository for MemoryParamRepository {
    async fn find_by_key(&self, key: &str) -> AppResult<Option<Parameter>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().get(key).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Parameter>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn insert(&self, param: &Parameter) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&param.key) {
            return Err(AppError::Conflict(format!(
                "Parameter {} already exists",
                param.key
            )));
        }
        rows.insert(param.key.clone(), param.clone());
        Ok(())
    }

    async fn update(&self, param: &Parameter) -> AppResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&param.key) {
            Some(row) => {
                *row = param.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, key: &str) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().remove(key).map_or(0, |_| 1))
    }
}

/// Parks the first `find_by_key` after it has read its row, until released.
pub struct GatedParamRepository {
    inner: MemoryParamRepository,
    gate: Mutex<Option<(oneshot::Sender<()>, oneshot::Receiver<()>)>>,
}

impl GatedParamRepository {
    pub fn new(
        inner: MemoryParamRepository,
        entered: oneshot::Sender<()>,
        release: oneshot::Receiver<()>,
    ) -> Self {
        Self {
            inner,
            gate: Mutex::new(Some((entered, release))),
        }
    }
}

#[async_trait]
impl ParamRepository for GatedParamRepository {
    async fn find_by_key(&self, key: &str) -> AppResult<Option<Parameter>> {
        let found = self.inner.find_by_key(key).await?;

        let gate = self.gate.lock().unwrap().take();
        if let Some((entered, release)) = gate {
            let _ = entered.send(());
            let _ = release.await;
        }

        Ok(found)
    }

    async fn find_all(&self) -> AppResult<Vec<Parameter>> {
        self.inner.find_all().await
    }

    async fn insert(&self, param: &Parameter) -> AppResult<()> {
        self.inner.insert(param).await
    }

    async fn update(&self, param: &Parameter) -> AppResult<u64> {
        self.inner.update(param).await
    }

    async fn delete(&self, key: &str) -> AppResult<u64> {
        self.inner.delete(key).await
    }
}

#[derive(Debug, Clone)]
pub struct UserProfile {
    pub username: String,
    pub fullname: String,
    pub institution_id: String,
}

impl UserProfile {
    pub fn new(username: &str, institution_id: &str) -> Self {
        Self {
            username: username.to_string(),
            fullname: format!("{username} fullname"),
            institution_id: institution_id.to_string(),
        }
    }
}

#[derive(Default)]
pub struct MemoryAttendanceRepository {
    rows: Mutex<Vec<AttendanceView>>,
    users: HashMap<String, UserProfile>,
}

impl MemoryAttendanceRepository {
    pub fn with_users(users: Vec<UserProfile>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            users: users
                .into_iter()
                .map(|u| (u.username.clone(), u))
                .collect(),
        }
    }

    pub fn rows(&self) -> Vec<AttendanceView> {
        self.rows.lock().unwrap().clone()
    }

    fn joined(&self, row: &AttendanceView) -> AttendanceView {
        let mut view = row.clone();
        if let Some(user) = self.users.get(&row.username) {
            view.fullname = Some(user.fullname.clone());
        }
        view
    }

    fn institution_of(&self, username: &str) -> Option<&str> {
        self.users
            .get(username)
            .map(|u| u.institution_id.as_str())
    }
}

#[async_trait]
impl AttendanceRepository for MemoryAttendanceRepository {
    async fn find_attendances(
        &self,
        scope: &AttendanceScope,
        query: AttendanceQuery,
    ) -> AppResult<Vec<AttendanceView>> {
        let rows = self.rows.lock().unwrap();
        let mut found: Vec<AttendanceView> = rows
            .iter()
            .filter(|row| match scope {
                AttendanceScope::All => true,
                AttendanceScope::Institution(id) => {
                    self.institution_of(&row.username) == Some(id.as_str())
                }
                AttendanceScope::User(username) => &row.username == username,
            })
            .map(|row| self.joined(row))
            .collect();

        found.sort_by_key(|row| row.check_in);
        if query.sort == SortType::Desc {
            found.reverse();
        }
        if let Some(limit) = query.limit {
            found.truncate(limit as usize);
        }

        Ok(found)
    }

    async fn find_today(
        &self,
        username: &str,
        today: NaiveDate,
    ) -> AppResult<Option<AttendanceView>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|row| row.username == username && row.check_in.date() == today)
            .map(|row| self.joined(row)))
    }

    async fn check_in(&self, record: &NewAttendance) -> AppResult<CheckInOutcome> {
        let mut rows = self.rows.lock().unwrap();
        let day = record.check_in.date();

        if rows
            .iter()
            .any(|row| row.username == record.username && row.check_in.date() == day)
        {
            return Ok(CheckInOutcome::AlreadyExists);
        }

        rows.push(AttendanceView {
            id: record.id.clone(),
            username: record.username.clone(),
            check_in: record.check_in,
            check_out: None,
            status_in: Some(record.status_in.to_string()),
            status_out: None,
            remark_in: record.remark_in.clone(),
            remark_out: None,
            source_in: record.source_in.clone(),
            source_out: None,
            fullname: None,
            shortname: None,
            email: None,
            gender: None,
            phone_number: None,
        });

        Ok(CheckInOutcome::Inserted)
    }

    async fn check_out(
        &self,
        record: &CheckOutAttendance,
        today: NaiveDate,
    ) -> AppResult<CheckOutOutcome> {
        let mut rows = self.rows.lock().unwrap();
        let open = rows.iter_mut().find(|row| {
            row.username == record.username
                && row.check_in.date() == today
                && row.check_out.is_none()
        });

        match open {
            Some(row) => {
                row.check_out = Some(record.check_out);
                row.status_out = Some(record.status_out.to_string());
                row.remark_out = record.remark_out.clone();
                row.source_out = record.source_out.clone();
                Ok(CheckOutOutcome::Updated)
            }
            None => Ok(CheckOutOutcome::NoActiveCheckIn),
        }
    }
}
