//! Tracked Secret Storage
//!
//! 키체인은 "목록 조회"를 지원하지 않으므로, 저장된 키 목록(tracker)을
//! 별도의 키체인 엔트리에 JSON 배열로 함께 보관합니다.
//!
//! - 저장: tracker 먼저 갱신 → 값 저장 (중간에 실패하면 다음 `keys()`에서 정리됨)
//! - 조회: tracker의 각 키가 실제로 읽히는지 확인하고, 사라진 키는 tracker에서 제거

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::KeyringError;
use crate::secrets::store::SecureStore;

/// 계정(alias → private key) tracker 키
pub const ACCOUNTS_TRACKER_KEY: &str = "ape-keyring-aliases";
/// 일반 시크릿 tracker 키
pub const SECRETS_TRACKER_KEY: &str = "ape-keyring-secrets";

/// 저장소 종류 (종류마다 tracker가 하나씩 존재)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Accounts,
    Secrets,
}

impl StorageKind {
    pub fn tracker_key(&self) -> &'static str {
        match self {
            StorageKind::Accounts => ACCOUNTS_TRACKER_KEY,
            StorageKind::Secrets => SECRETS_TRACKER_KEY,
        }
    }
}

/// tracker 값 → 키 목록
///
/// JSON 배열이 아니면 예전 포맷(콤마 구분)으로 읽습니다.
fn decode_tracker(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let keys = match serde_json::from_str::<Vec<String>>(raw) {
        Ok(keys) => keys,
        Err(_) => raw.split(',').map(str::to_string).collect(),
    };

    let mut seen = HashSet::new();
    keys.into_iter()
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.clone()))
        .collect()
}

fn encode_tracker(keys: &[String]) -> Result<String, KeyringError> {
    Ok(serde_json::to_string(keys)?)
}

/// tracker로 키 목록을 관리하는 시크릿 저장소
#[derive(Debug, Clone)]
pub struct SecretStorage {
    tracker_key: String,
    store: SecureStore,
}

impl SecretStorage {
    pub fn new(kind: StorageKind, store: SecureStore) -> Self {
        Self::with_tracker_key(kind.tracker_key(), store)
    }

    pub fn with_tracker_key(tracker_key: impl Into<String>, store: SecureStore) -> Self {
        Self {
            tracker_key: tracker_key.into(),
            store,
        }
    }

    pub fn tracker_key(&self) -> &str {
        &self.tracker_key
    }

    /// tracker에 기록된 키 목록 (값 존재 여부는 확인하지 않음)
    fn read_tracker(&self) -> Result<Vec<String>, KeyringError> {
        let raw = self.store.get(&self.tracker_key)?.unwrap_or_default();
        Ok(decode_tracker(&raw))
    }

    fn write_tracker(&self, keys: &[String]) -> Result<(), KeyringError> {
        if keys.is_empty() {
            self.store.delete(&self.tracker_key)?;
            return Ok(());
        }

        let encoded = encode_tracker(keys)?;
        self.store.set(&self.tracker_key, &encoded)
    }

    /// 현재 저장된 키 목록
    ///
    /// 값을 읽을 수 없는 키(키체인에서 직접 삭제된 경우 등)는 제외합니다.
    /// 정리된 목록이 저장된 tracker 값과 다르면 (제외된 키, 중복, 예전 콤마 포맷)
    /// tracker를 다시 씁니다.
    pub fn keys(&self) -> Result<Vec<String>, KeyringError> {
        let raw = self.store.get(&self.tracker_key)?.unwrap_or_default();
        let candidates = decode_tracker(&raw);

        let mut keys = Vec::with_capacity(candidates.len());
        for key in &candidates {
            if self.store.get(key)?.is_some() {
                keys.push(key.clone());
            }
        }

        let up_to_date = if keys.is_empty() {
            raw.trim().is_empty()
        } else {
            encode_tracker(&keys)? == raw
        };

        if !up_to_date {
            debug!(
                tracker = %self.tracker_key,
                pruned = candidates.len() - keys.len(),
                "rewriting tracker entry"
            );
            self.write_tracker(&keys)?;
        }

        Ok(keys)
    }

    pub fn contains(&self, key: &str) -> Result<bool, KeyringError> {
        Ok(self.keys()?.iter().any(|k| k == key))
    }

    pub fn len(&self) -> Result<usize, KeyringError> {
        Ok(self.keys()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, KeyringError> {
        Ok(self.keys()?.is_empty())
    }

    /// 시크릿 조회
    ///
    /// tracker에 없는 키는 키체인에 값이 있더라도 `None`을 반환합니다.
    pub fn get_secret(&self, key: &str) -> Result<Option<String>, KeyringError> {
        if !self.contains(key)? {
            return Ok(None);
        }
        self.store.get(key)
    }

    /// 시크릿 저장
    pub fn store_secret(&self, key: &str, value: &str) -> Result<(), KeyringError> {
        if key.is_empty() {
            return Err(KeyringError::EmptyIdentifier);
        }
        if key == self.tracker_key {
            return Err(KeyringError::ReservedKey(key.to_string()));
        }
        if value.is_empty() {
            debug!(key, "ignoring empty secret value");
            return Ok(());
        }

        let mut tracked = self.read_tracker()?;
        if !tracked.iter().any(|k| k == key) {
            tracked.push(key.to_string());
            self.write_tracker(&tracked)?;
        }

        self.store.set(key, value)?;
        info!(tracker = %self.tracker_key, key, "secret stored");
        Ok(())
    }

    /// 시크릿 삭제
    ///
    /// tracker에 없는 키는 키체인을 건드리지 않고 `false`를 반환합니다.
    pub fn delete_secret(&self, key: &str) -> Result<bool, KeyringError> {
        if key.is_empty() {
            return Err(KeyringError::EmptyIdentifier);
        }

        let mut tracked = self.read_tracker()?;
        let before = tracked.len();
        tracked.retain(|k| k != key);
        if tracked.len() == before {
            return Ok(false);
        }

        self.write_tracker(&tracked)?;
        let deleted = self.store.delete(key)?;
        info!(tracker = %self.tracker_key, key, deleted, "secret deleted");
        Ok(deleted)
    }

    /// 모든 시크릿과 tracker 삭제
    ///
    /// 실제로 삭제된 값의 개수를 반환합니다.
    pub fn delete_all(&self) -> Result<usize, KeyringError> {
        let mut deleted = 0;
        for key in self.read_tracker()? {
            if self.store.delete(&key)? {
                deleted += 1;
            }
        }
        self.store.delete(&self.tracker_key)?;

        info!(tracker = %self.tracker_key, deleted, "all secrets deleted");
        Ok(deleted)
    }

    /// (키, 값) 순회
    ///
    /// 순회 도중 값이 사라진 키는 건너뜁니다.
    pub fn iter(&self) -> Result<SecretIter<'_>, KeyringError> {
        Ok(SecretIter {
            storage: self,
            keys: self.keys()?.into_iter(),
        })
    }
}

/// `SecretStorage::iter` 결과
pub struct SecretIter<'a> {
    storage: &'a SecretStorage,
    keys: std::vec::IntoIter<String>,
}

impl Iterator for SecretIter<'_> {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        for key in self.keys.by_ref() {
            match self.storage.store.get(&key) {
                Ok(Some(value)) => return Some((key, value)),
                Ok(None) => continue,
                Err(err) => {
                    warn!(key = %key, "skipping unreadable secret: {}", err);
                    continue;
                }
            }
        }
        None
    }
}
