use std::sync::Arc;

use crate::error::AppResult;
use crate::model::parameter::{ROLE_LEVEL_1, ROLE_LEVEL_2};
use crate::model::role::RoleLevel;
use crate::service::ParamService;

/// Maps a role id onto a `RoleLevel` using the `role-level-*` allow-lists.
pub struct RoleService {
    params: Arc<ParamService>,
}

impl RoleService {
    pub fn new(params: Arc<ParamService>) -> Self {
        Self { params }
    }

    pub async fn resolve_level(&self, role_id: &str) -> AppResult<RoleLevel> {
        let level_1 = self.params.get_by_key(ROLE_LEVEL_1).await?;
        if in_role_list(&level_1.value, role_id) {
            return Ok(RoleLevel::Global);
        }

        let level_2 = self.params.get_by_key(ROLE_LEVEL_2).await?;
        if in_role_list(&level_2.value, role_id) {
            return Ok(RoleLevel::Institution);
        }

        Ok(RoleLevel::Own)
    }
}

/// `list` is `;`-separated; blank entries never match.
fn in_role_list(list: &str, role_id: &str) -> bool {
    let role_id = role_id.trim();
    !role_id.is_empty() && list.split(';').map(str::trim).any(|r| r == role_id)
}
