//! Secure Store
//!
//! 하나의 service 이름 아래에서 get/set/delete 세 가지 동작만 제공하는 어댑터입니다.
//! "값이 없음" 계열 오류는 `None` / `false`로 흡수하고, 저장소 자체의 장애만 전파합니다.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::KeyringError;
use crate::secrets::backend::{BackendError, CredentialBackend};

/// 키체인 서비스 이름
pub const SERVICE_NAME: &str = "eth-ape";

fn map_backend_error(err: BackendError) -> KeyringError {
    KeyringError::Keychain(err.to_string())
}

#[derive(Clone)]
pub struct SecureStore {
    service: String,
    backend: Arc<dyn CredentialBackend>,
}

impl SecureStore {
    pub fn new(backend: Arc<dyn CredentialBackend>) -> Self {
        Self::with_service(SERVICE_NAME, backend)
    }

    pub fn with_service(service: impl Into<String>, backend: Arc<dyn CredentialBackend>) -> Self {
        Self {
            service: service.into(),
            backend,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// 값 조회
    ///
    /// 키가 없거나 읽을 수 없으면 `None`. 저장소 장애만 에러로 반환합니다.
    pub fn get(&self, key: &str) -> Result<Option<String>, KeyringError> {
        if key.is_empty() {
            return Ok(None);
        }

        match self.backend.get_password(&self.service, key) {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(BackendError::NoEntry) => Ok(None),
            Err(BackendError::Lookup(msg)) => {
                warn!(key, "unreadable secure store entry treated as absent: {}", msg);
                Ok(None)
            }
            Err(err) => Err(map_backend_error(err)),
        }
    }

    /// 값 저장 (기존 값은 덮어씀)
    ///
    /// 키 또는 값이 비어 있으면 아무 것도 하지 않습니다.
    pub fn set(&self, key: &str, value: &str) -> Result<(), KeyringError> {
        if key.is_empty() || value.is_empty() {
            debug!(key, "skipping empty secure store write");
            return Ok(());
        }

        self.backend
            .set_password(&self.service, key, value)
            .map_err(map_backend_error)
    }

    /// 값 삭제
    ///
    /// 실제로 삭제했으면 `true`, 삭제할 값이 없었으면 `false`.
    pub fn delete(&self, key: &str) -> Result<bool, KeyringError> {
        if key.is_empty() {
            return Ok(false);
        }

        match self.backend.delete_password(&self.service, key) {
            Ok(()) => Ok(true),
            Err(BackendError::NoEntry) => Ok(false),
            Err(err) => Err(map_backend_error(err)),
        }
    }
}

impl std::fmt::Debug for SecureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureStore")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}
