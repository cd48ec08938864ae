//! Keyring 계정 컨테이너
//!
//! alias → private key 쌍을 `StorageKind::Accounts` 저장소에 보관합니다.
//! 서명/주소 계산은 다루지 않습니다.

use std::sync::Arc;

use tracing::info;

use crate::error::KeyringError;
use crate::secrets::storage::SecretStorage;

#[derive(Debug, Clone)]
pub struct KeyringAccountContainer {
    storage: Arc<SecretStorage>,
}

fn require_alias(alias: &str) -> Result<(), KeyringError> {
    if alias.trim().is_empty() {
        return Err(KeyringError::EmptyIdentifier);
    }
    Ok(())
}

impl KeyringAccountContainer {
    pub fn new(storage: Arc<SecretStorage>) -> Self {
        Self { storage }
    }

    /// 저장된 alias 목록
    pub fn aliases(&self) -> Result<Vec<String>, KeyringError> {
        self.storage.keys()
    }

    pub fn len(&self) -> Result<usize, KeyringError> {
        self.storage.len()
    }

    pub fn is_empty(&self) -> Result<bool, KeyringError> {
        self.storage.is_empty()
    }

    pub fn contains(&self, alias: &str) -> Result<bool, KeyringError> {
        self.storage.contains(alias)
    }

    /// 계정 추가
    ///
    /// 저장 후 다시 읽어서 값이 확인되지 않으면 실패로 처리합니다.
    pub fn create_account(&self, alias: &str, private_key: &str) -> Result<(), KeyringError> {
        require_alias(alias)?;

        self.storage.store_secret(alias, private_key)?;
        if self.storage.get_secret(alias)?.is_none() {
            return Err(KeyringError::AccountCreation(alias.to_string()));
        }

        info!(alias, "keyring account created");
        Ok(())
    }

    /// 계정의 private key 조회
    pub fn private_key(&self, alias: &str) -> Result<String, KeyringError> {
        require_alias(alias)?;
        self.storage
            .get_secret(alias)?
            .ok_or_else(|| KeyringError::MissingSecret(alias.to_string()))
    }

    pub fn delete_account(&self, alias: &str) -> Result<bool, KeyringError> {
        require_alias(alias)?;
        self.storage.delete_secret(alias)
    }

    pub fn delete_all(&self) -> Result<usize, KeyringError> {
        self.storage.delete_all()
    }
}
