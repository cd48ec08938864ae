//! Credential Backend
//!
//! (service, key) 단위로 비밀번호를 읽고/쓰고/지우는 저수준 백엔드입니다.
//!
//! - `OsKeyring`: OS 키체인/키링 (`keyring` crate)
//! - `EphemeralBackend`: 테스트용 인메모리 백엔드

use keyring::{Entry, Error as OsKeyringError};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// 백엔드 오류
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// 해당 (service, key)에 저장된 값이 없음
    #[error("No matching entry found in secure storage")]
    NoEntry,

    /// 값은 있지만 읽을 수 없음 (인코딩 오류, 다중 매칭 등)
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// 저장소 자체를 사용할 수 없음
    #[error("Secure storage failure: {0}")]
    Failure(String),
}

/// 비밀번호 저장소 capability
pub trait CredentialBackend: Send + Sync {
    fn get_password(&self, service: &str, key: &str) -> Result<String, BackendError>;

    fn set_password(&self, service: &str, key: &str, password: &str) -> Result<(), BackendError>;

    fn delete_password(&self, service: &str, key: &str) -> Result<(), BackendError>;
}

/// 프로세스 전역 OS 키링 백엔드
static OS_KEYRING: Lazy<Arc<dyn CredentialBackend>> = Lazy::new(|| Arc::new(OsKeyring));

/// 공유 OS 키링 백엔드 핸들
pub fn os_keyring() -> Arc<dyn CredentialBackend> {
    Arc::clone(&OS_KEYRING)
}

/// OS 키체인/키링 백엔드
#[derive(Debug, Default, Clone, Copy)]
pub struct OsKeyring;

fn map_keyring_error(err: OsKeyringError) -> BackendError {
    match err {
        OsKeyringError::NoEntry => BackendError::NoEntry,
        OsKeyringError::BadEncoding(_) | OsKeyringError::Ambiguous(_) => {
            BackendError::Lookup(err.to_string())
        }
        other => BackendError::Failure(other.to_string()),
    }
}

impl CredentialBackend for OsKeyring {
    fn get_password(&self, service: &str, key: &str) -> Result<String, BackendError> {
        let entry = Entry::new(service, key).map_err(map_keyring_error)?;
        entry.get_password().map_err(map_keyring_error)
    }

    fn set_password(&self, service: &str, key: &str, password: &str) -> Result<(), BackendError> {
        let entry = Entry::new(service, key).map_err(map_keyring_error)?;
        entry.set_password(password).map_err(map_keyring_error)
    }

    fn delete_password(&self, service: &str, key: &str) -> Result<(), BackendError> {
        let entry = Entry::new(service, key).map_err(map_keyring_error)?;
        entry.delete_password().map_err(map_keyring_error)
    }
}

/// 인메모리 백엔드 (테스트용)
///
/// 지정된 service 이름 외의 요청은 거부합니다.
/// 존재하지 않는 키를 삭제하면 OS 키링과 마찬가지로 `NoEntry`를 반환합니다.
#[derive(Debug)]
pub struct EphemeralBackend {
    service: String,
    entries: Mutex<HashMap<String, String>>,
}

impl EphemeralBackend {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// 저장된 엔트리 수 (tracker 엔트리 포함)
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// 백엔드에 직접 쓴 원본 값 (tracker 등 내부 엔트리 확인용)
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn require_service(&self, service: &str, action: &str) -> Result<(), BackendError> {
        if service != self.service {
            return Err(BackendError::Failure(format!(
                "{} non-{} secret.",
                action, self.service
            )));
        }
        Ok(())
    }
}

impl CredentialBackend for EphemeralBackend {
    fn get_password(&self, service: &str, key: &str) -> Result<String, BackendError> {
        self.require_service(service, "Requesting")?;
        self.lock().get(key).cloned().ok_or(BackendError::NoEntry)
    }

    fn set_password(&self, service: &str, key: &str, password: &str) -> Result<(), BackendError> {
        self.require_service(service, "Saving")?;
        self.lock().insert(key.to_string(), password.to_string());
        Ok(())
    }

    fn delete_password(&self, service: &str, key: &str) -> Result<(), BackendError> {
        self.require_service(service, "Deleting")?;
        self.lock()
            .remove(key)
            .map(|_| ())
            .ok_or(BackendError::NoEntry)
    }
}
