//! Secret Manager - 스코프 해석 및 환경 변수 반영
//!
//! - (논리 이름, 스코프) → 물리 키 변환 후 `SecretStorage`에 위임
//! - global / project 목록 분리
//! - 설정(`keyring.set_env_vars`)이 켜져 있으면 환경 변수에도 반영

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::KeyringConfig;
use crate::error::KeyringError;
use crate::secrets::env::{EnvironmentPort, ProcessEnvironment};
use crate::secrets::scope::{decode_key, encode_key, validate_name, Scope};
use crate::secrets::storage::SecretStorage;

/// Secret Manager
///
/// 프로젝트 경로마다 하나씩 만들어 쓰는 가벼운 객체입니다.
/// 저장소는 공유하며, 자체적으로 저장하는 상태는 없습니다.
pub struct SecretManager {
    project_path: PathBuf,
    project_name: String,
    storage: Arc<SecretStorage>,
    config: KeyringConfig,
    env: Arc<dyn EnvironmentPort>,
}

/// 경로의 마지막 구성요소 (확장자 제외)
fn project_name_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl SecretManager {
    pub fn new(
        project_path: impl Into<PathBuf>,
        storage: Arc<SecretStorage>,
        config: KeyringConfig,
        env: Arc<dyn EnvironmentPort>,
    ) -> Self {
        let project_path = project_path.into();
        let project_name = project_name_of(&project_path);
        Self {
            project_path,
            project_name,
            storage,
            config,
            env,
        }
    }

    /// 프로젝트 디렉토리의 설정을 읽어 생성 (실제 프로세스 환경 사용)
    pub fn load(project_path: &Path, storage: Arc<SecretStorage>) -> Result<Self, KeyringError> {
        let project_path = std::fs::canonicalize(project_path)?;
        let config = KeyringConfig::load(&project_path)?;
        debug!(
            project = %project_path.display(),
            set_env_vars = config.set_env_vars,
            "secret manager loaded"
        );
        Ok(Self::new(
            project_path,
            storage,
            config,
            Arc::new(ProcessEnvironment),
        ))
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn config(&self) -> &KeyringConfig {
        &self.config
    }

    pub fn storage(&self) -> &SecretStorage {
        &self.storage
    }

    /// (논리 이름, 스코프) → 물리 키
    pub fn physical_key(&self, name: &str, scope: Scope) -> String {
        encode_key(name, scope, &self.project_name)
    }

    /// 물리 키 → (논리 이름, project 스코프 여부)
    ///
    /// 다른 프로젝트의 키는 접미사를 떼지 않고 그대로 돌려줍니다.
    pub fn logical_name(&self, physical_key: &str) -> (String, bool) {
        let decoded = decode_key(physical_key);
        if decoded.belongs_to(&self.project_name) {
            (decoded.name, true)
        } else if decoded.is_project_scoped() {
            (physical_key.to_string(), true)
        } else {
            (decoded.name, false)
        }
    }

    /// project 표식이 없는 키 목록
    pub fn global_keys(&self) -> Result<Vec<String>, KeyringError> {
        Ok(self
            .storage
            .keys()?
            .into_iter()
            .filter(|k| !decode_key(k).is_project_scoped())
            .collect())
    }

    /// 현재 프로젝트 스코프 키 목록 (접미사 제거)
    pub fn project_keys(&self) -> Result<Vec<String>, KeyringError> {
        Ok(self
            .storage
            .keys()?
            .into_iter()
            .map(|k| decode_key(&k))
            .filter(|decoded| decoded.belongs_to(&self.project_name))
            .map(|decoded| decoded.name)
            .collect())
    }

    /// 다른 프로젝트 스코프의 물리 키 목록
    ///
    /// 이 키들은 global/project 목록 어디에도 나타나지 않고 환경 변수로도 반영되지 않습니다.
    pub fn foreign_keys(&self) -> Result<Vec<String>, KeyringError> {
        Ok(self
            .storage
            .keys()?
            .into_iter()
            .filter(|k| {
                let decoded = decode_key(k);
                decoded.is_project_scoped() && !decoded.belongs_to(&self.project_name)
            })
            .collect())
    }

    pub fn secrets_exist(&self) -> Result<bool, KeyringError> {
        Ok(!self.global_keys()?.is_empty() || !self.project_keys()?.is_empty())
    }

    /// 시크릿 조회 (없으면 빈 문자열)
    pub fn get_secret(&self, name: &str, scope: Scope) -> Result<String, KeyringError> {
        validate_name(name)?;
        let key = self.physical_key(name, scope);
        Ok(self.storage.get_secret(&key)?.unwrap_or_default())
    }

    /// 시크릿 저장
    pub fn store_secret(&self, name: &str, value: &str, scope: Scope) -> Result<(), KeyringError> {
        validate_name(name)?;
        let key = self.physical_key(name, scope);
        self.storage.store_secret(&key, value)?;

        if self.config.set_env_vars && !value.is_empty() {
            self.env.set(name, value);
        }
        Ok(())
    }

    /// 시크릿 삭제
    pub fn delete_secret(&self, name: &str, scope: Scope) -> Result<bool, KeyringError> {
        validate_name(name)?;
        let key = self.physical_key(name, scope);
        let did_delete = self.storage.delete_secret(&key)?;

        if self.config.set_env_vars {
            self.env.unset(name);
        }
        Ok(did_delete)
    }

    /// 저장된 시크릿을 모두 환경 변수로 반영
    ///
    /// 같은 이름이 두 스코프에 모두 있으면 project 값이 우선합니다.
    /// 반영한 변수 개수를 반환합니다. (설정이 꺼져 있으면 0)
    pub fn set_environment_variables(&self) -> Result<usize, KeyringError> {
        if !self.config.set_env_vars {
            return Ok(0);
        }

        let mut global = Vec::new();
        let mut project = Vec::new();
        for (key, value) in self.storage.iter()? {
            let decoded = decode_key(&key);
            if !decoded.is_project_scoped() {
                global.push((decoded.name, value));
            } else if decoded.belongs_to(&self.project_name) {
                project.push((decoded.name, value));
            }
        }

        let count = global.len() + project.len();
        for (name, value) in global.into_iter().chain(project) {
            self.env.set(&name, &value);
        }

        info!(project = %self.project_name, count, "secrets exported to environment");
        Ok(count)
    }
}

impl std::fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretManager")
            .field("project_path", &self.project_path)
            .field("project_name", &self.project_name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
