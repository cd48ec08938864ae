//! Secret 저장 모듈
//!
//! OS 키체인을 "목록 조회가 가능한" 키-값 저장소로 감싸고,
//! global / project 스코프를 키 접미사로 구분합니다.
//!
//! - `backend`: (service, key) 단위 비밀번호 백엔드 (OS 키링 / 인메모리)
//! - `store`: 고정 service 이름 아래의 get/set/delete 어댑터
//! - `storage`: tracker 엔트리로 키 목록을 관리하는 저장소
//! - `scope`: (이름, 스코프) ↔ 물리 키 인코딩
//! - `manager`: 스코프 해석 + 환경 변수 반영

pub mod backend;
pub mod env;
pub mod manager;
pub mod scope;
pub mod storage;
pub mod store;

pub use backend::{os_keyring, BackendError, CredentialBackend, EphemeralBackend, OsKeyring};
pub use env::{EnvironmentPort, MemoryEnvironment, ProcessEnvironment};
pub use manager::SecretManager;
pub use scope::{Scope, ScopedName, PROJECT_MARKER};
pub use storage::{SecretIter, SecretStorage, StorageKind};
pub use store::{SecureStore, SERVICE_NAME};

/// OS 키링을 사용하는 기본 저장소
///
/// 세션 시작 시 환경 변수를 채우려면
/// `SecretManager::load(path, Arc::new(default_storage(StorageKind::Secrets)))?.set_environment_variables()`
/// 를 1회 호출합니다.
pub fn default_storage(kind: StorageKind) -> SecretStorage {
    SecretStorage::new(kind, SecureStore::new(os_keyring()))
}

