//! 공개 API 통합 테스트
//!
//! 하나의 인메모리 백엔드를 계정/시크릿 저장소와 여러 프로젝트가 함께 사용하는 상황을 다룹니다.

use std::sync::Arc;

use ape_keyring::accounts::KeyringAccountContainer;
use ape_keyring::config::KeyringConfig;
use ape_keyring::secrets::{
    CredentialBackend, EphemeralBackend, MemoryEnvironment, Scope, SecretManager, SecretStorage,
    SecureStore, StorageKind, SERVICE_NAME,
};

const TEST_ALIAS: &str = "test-alias";
const TEST_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

struct Keyring {
    backend: Arc<EphemeralBackend>,
    secrets: Arc<SecretStorage>,
    accounts: KeyringAccountContainer,
}

fn keyring() -> Keyring {
    let backend = Arc::new(EphemeralBackend::new(SERVICE_NAME));
    let store = SecureStore::new(backend.clone());
    Keyring {
        backend,
        secrets: Arc::new(SecretStorage::new(StorageKind::Secrets, store.clone())),
        accounts: KeyringAccountContainer::new(Arc::new(SecretStorage::new(
            StorageKind::Accounts,
            store,
        ))),
    }
}

fn manager(keyring: &Keyring, project: &str, env: Arc<MemoryEnvironment>) -> SecretManager {
    SecretManager::new(
        format!("/work/{}", project),
        keyring.secrets.clone(),
        KeyringConfig { set_env_vars: true },
        env,
    )
}

#[test]
fn accounts_and_secrets_do_not_mix() {
    let keyring = keyring();
    let env = Arc::new(MemoryEnvironment::new());
    let demo = manager(&keyring, "demo", env.clone());

    keyring.accounts.create_account(TEST_ALIAS, TEST_KEY).unwrap();
    demo.store_secret("RPC_URL", "https://rpc.example", Scope::Global)
        .unwrap();

    assert_eq!(keyring.accounts.aliases().unwrap(), vec![TEST_ALIAS.to_string()]);
    assert_eq!(demo.global_keys().unwrap(), vec!["RPC_URL".to_string()]);

    keyring.accounts.delete_all().unwrap();
    assert!(keyring.accounts.is_empty().unwrap());
    assert_eq!(
        demo.get_secret("RPC_URL", Scope::Global).unwrap(),
        "https://rpc.example"
    );
}

#[test]
fn projects_share_storage_but_not_project_secrets() {
    let keyring = keyring();
    let demo = manager(&keyring, "demo", Arc::new(MemoryEnvironment::new()));
    let other = manager(&keyring, "other", Arc::new(MemoryEnvironment::new()));

    demo.store_secret("SHARED", "global", Scope::Global).unwrap();
    demo.store_secret("TOKEN", "demo-token", Scope::Project)
        .unwrap();
    other
        .store_secret("TOKEN", "other-token", Scope::Project)
        .unwrap();

    assert_eq!(demo.get_secret("TOKEN", Scope::Project).unwrap(), "demo-token");
    assert_eq!(other.get_secret("TOKEN", Scope::Project).unwrap(), "other-token");
    assert_eq!(other.get_secret("SHARED", Scope::Global).unwrap(), "global");

    assert_eq!(demo.project_keys().unwrap(), vec!["TOKEN".to_string()]);
    assert_eq!(demo.global_keys().unwrap(), vec!["SHARED".to_string()]);
    assert_eq!(
        demo.foreign_keys().unwrap(),
        vec!["TOKEN<<project=other>>".to_string()]
    );

    assert!(other.delete_secret("TOKEN", Scope::Project).unwrap());
    assert_eq!(demo.get_secret("TOKEN", Scope::Project).unwrap(), "demo-token");
}

#[test]
fn startup_export_after_external_tampering() {
    let keyring = keyring();
    let writer = manager(&keyring, "demo", Arc::new(MemoryEnvironment::new()));
    writer.store_secret("A", "1", Scope::Global).unwrap();
    writer.store_secret("B", "2", Scope::Project).unwrap();

    // 키체인에서 직접 삭제
    keyring
        .backend
        .delete_password(SERVICE_NAME, "B<<project=demo>>")
        .unwrap();

    let env = Arc::new(MemoryEnvironment::new());
    let session = manager(&keyring, "demo", env.clone());
    assert_eq!(session.set_environment_variables().unwrap(), 1);
    assert_eq!(env.get("A").as_deref(), Some("1"));
    assert_eq!(env.get("B"), None);
    assert!(session.project_keys().unwrap().is_empty());
}
