//! Secrets 명령어
//!
//! `secrets list | set | unset`

use crate::commands::Outcome;
use crate::error::CommandResult;
use crate::secrets::{Scope, SecretManager};

/// 시크릿 목록
///
/// global / project 목록을 나눠 보여주고, 둘 다 비어 있으면 경고를 반환합니다.
pub fn secrets_list(manager: &SecretManager) -> CommandResult<Outcome> {
    let global = manager.global_keys()?;
    let project = manager.project_keys()?;

    if global.is_empty() && project.is_empty() {
        return Ok(Outcome::warning("No secrets found."));
    }

    let mut lines = Vec::new();
    for (header, keys) in [("Global secrets", &global), ("Project secrets", &project)] {
        if keys.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("{}:", header));
        lines.extend(keys.iter().map(|k| format!("  {}", k)));
    }

    Ok(Outcome::info(lines))
}

/// 시크릿 추가 또는 교체
pub fn secrets_set(
    manager: &SecretManager,
    name: &str,
    value: &str,
    scope: Scope,
) -> CommandResult<Outcome> {
    if value.is_empty() {
        return Ok(Outcome::warning(format!(
            "Empty value given, secret '{}' was not set.",
            name
        )));
    }

    manager.store_secret(name, value, scope)?;
    Ok(Outcome::success(format!("Secret '{}' has been set.", name)))
}

/// 시크릿 삭제
pub fn secrets_unset(manager: &SecretManager, name: &str, scope: Scope) -> CommandResult<Outcome> {
    if manager.delete_secret(name, scope)? {
        Ok(Outcome::success(format!("Secret '{}' has been unset.", name)))
    } else {
        Ok(Outcome::warning(format!(
            "Secret '{}' not found in {} scope.",
            name, scope
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::OutcomeLevel;
    use crate::config::KeyringConfig;
    use crate::secrets::{
        EphemeralBackend, MemoryEnvironment, SecretStorage, SecureStore, StorageKind, SERVICE_NAME,
    };
    use std::sync::Arc;

    const SECRET_KEY: &str = "TEST_SECRET";
    const SECRET_VALUE: &str = "this-is-a-test-secret";

    fn manager() -> SecretManager {
        let backend = Arc::new(EphemeralBackend::new(SERVICE_NAME));
        let storage = SecretStorage::new(StorageKind::Secrets, SecureStore::new(backend));
        SecretManager::new(
            "/work/demo",
            Arc::new(storage),
            KeyringConfig::default(),
            Arc::new(MemoryEnvironment::new()),
        )
    }

    #[test]
    fn test_secrets_flow() {
        let manager = manager();

        let outcome = secrets_set(&manager, SECRET_KEY, SECRET_VALUE, Scope::Global).unwrap();
        assert_eq!(outcome.level, OutcomeLevel::Success);

        let listing = secrets_list(&manager).unwrap().to_string();
        assert!(listing.contains(SECRET_KEY));

        let outcome = secrets_unset(&manager, SECRET_KEY, Scope::Global).unwrap();
        assert_eq!(
            outcome.to_string(),
            format!("SUCCESS: Secret '{}' has been unset.", SECRET_KEY)
        );

        let listing = secrets_list(&manager).unwrap();
        assert_eq!(listing.to_string(), "WARNING: No secrets found.");
    }

    #[test]
    fn test_list_sections() {
        let manager = manager();
        secrets_set(&manager, "A", "1", Scope::Global).unwrap();
        secrets_set(&manager, "B", "2", Scope::Project).unwrap();

        let listing = secrets_list(&manager).unwrap();
        assert_eq!(
            listing.lines,
            vec![
                "Global secrets:".to_string(),
                "  A".to_string(),
                String::new(),
                "Project secrets:".to_string(),
                "  B".to_string(),
            ]
        );
    }

    #[test]
    fn test_unset_missing_is_warning() {
        let manager = manager();
        let outcome = secrets_unset(&manager, "NOPE", Scope::Project).unwrap();
        assert_eq!(outcome.level, OutcomeLevel::Warning);
    }

    #[test]
    fn test_empty_name_maps_to_command_error() {
        let manager = manager();
        let err = secrets_set(&manager, "", "value", Scope::Global).unwrap_err();
        assert_eq!(err.code, "EMPTY_IDENTIFIER");
    }
}
