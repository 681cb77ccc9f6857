use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::error::{AppError, AppResult};
use crate::model::parameter::Parameter;
use crate::models::ParamReq;
use crate::repository::ParamRepository;
use crate::service::Clock;
use crate::utils::param_cache::ParamCache;

/// Cache-aside access to named parameters.
///
/// The database is authoritative. Cache operations never fail a request: a
/// value that cannot be cached is evicted so the next read goes to the
/// database.
pub struct ParamService {
    repo: Arc<dyn ParamRepository>,
    cache: ParamCache,
    clock: Arc<dyn Clock>,
}

impl ParamService {
    pub fn new(repo: Arc<dyn ParamRepository>, cache: ParamCache, clock: Arc<dyn Clock>) -> Self {
        Self { repo, cache, clock }
    }

    #[instrument(name = "param_get_by_key", skip(self))]
    pub async fn get_by_key(&self, key: &str) -> AppResult<Parameter> {
        let key = normalize_key(key)?;

        if let Some(cached) = self.cache.get(key).await {
            match serde_json::from_str::<Parameter>(&cached) {
                Ok(param) => {
                    debug!("Parameter cache hit");
                    return Ok(param);
                }
                Err(e) => warn!(error = %e, "Discarding undecodable cached parameter"),
            }
        }

        let seen = self.cache.epoch();
        let param = self
            .repo
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Parameter {key} not found")))?;

        match serde_json::to_string(&param) {
            Ok(json) => {
                if !self.cache.fill(key, json, seen).await {
                    debug!("Parameter changed during load, not cached");
                }
            }
            Err(e) => warn!(error = %e, "Failed to cache parameter"),
        }

        Ok(param)
    }

    pub async fn get_all(&self) -> AppResult<Vec<Parameter>> {
        self.repo.find_all().await
    }

    #[instrument(name = "param_insert", skip(self, req), fields(key = %req.key))]
    pub async fn insert(&self, req: ParamReq, updated_by: &str) -> AppResult<Parameter> {
        let param = self.stamp(req, updated_by)?;

        self.repo.insert(&param).await?;

        info!("Parameter inserted");
        Ok(param)
    }

    #[instrument(name = "param_update", skip(self, req), fields(key = %req.key))]
    pub async fn update(&self, req: ParamReq, updated_by: &str) -> AppResult<Parameter> {
        let param = self.stamp(req, updated_by)?;

        if self.repo.update(&param).await? == 0 {
            return Err(AppError::NotFound(format!(
                "Parameter {} not found",
                param.key
            )));
        }

        self.cache_write_through(&param).await;

        info!("Parameter updated");
        Ok(param)
    }

    #[instrument(name = "param_delete", skip(self))]
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let key = normalize_key(key)?;

        if self.repo.delete(key).await? == 0 {
            return Err(AppError::NotFound(format!("Parameter {key} not found")));
        }

        self.cache.invalidate(key).await;

        info!("Parameter deleted");
        Ok(())
    }

    fn stamp(&self, req: ParamReq, updated_by: &str) -> AppResult<Parameter> {
        let key = normalize_key(&req.key)?;

        Ok(Parameter {
            key: key.to_string(),
            value: req.value,
            description: req.description.unwrap_or_default(),
            updated_at: self.clock.now().naive_local(),
            updated_by: updated_by.to_string(),
        })
    }

    async fn cache_write_through(&self, param: &Parameter) {
        match serde_json::to_string(param) {
            Ok(json) => self.cache.set(&param.key, json).await,
            Err(e) => {
                warn!(key = %param.key, error = %e, "Failed to cache parameter");
                self.cache.invalidate(&param.key).await;
            }
        }
    }
}

/// Keys are compared trimmed; a blank key is never valid.
fn normalize_key(key: &str) -> AppResult<&str> {
    let key = key.trim();
    if key.is_empty() {
        return Err(AppError::Validation("Parameter key is required".to_string()));
    }
    Ok(key)
}
