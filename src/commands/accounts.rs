//! Accounts 명령어
//!
//! `accounts list | import | delete | delete-all`

use crate::accounts::KeyringAccountContainer;
use crate::commands::{found_header, Outcome};
use crate::error::{CommandError, CommandResult};

/// 32바이트 hex private key 형식인지 확인 (`0x` 접두사 허용)
fn is_private_key_hex(key: &str) -> bool {
    let hex = key.strip_prefix("0x").unwrap_or(key);
    hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

pub fn accounts_list(accounts: &KeyringAccountContainer) -> CommandResult<Outcome> {
    let aliases = accounts.aliases()?;
    if aliases.is_empty() {
        return Ok(Outcome::warning("No accounts found."));
    }

    let mut lines = vec![found_header(aliases.len(), "account")];
    lines.extend(aliases.iter().map(|alias| format!("  {}", alias)));
    Ok(Outcome::info(lines))
}

pub fn accounts_import(
    accounts: &KeyringAccountContainer,
    alias: &str,
    private_key: &str,
) -> CommandResult<Outcome> {
    let private_key = private_key.trim();
    if !is_private_key_hex(private_key) {
        return Err(CommandError {
            code: "INVALID_KEY".to_string(),
            message: "Key could not be imported.".to_string(),
            details: Some("expected a 32-byte hex private key".to_string()),
        });
    }

    if accounts.contains(alias)? {
        return Err(CommandError {
            code: "ALIAS_EXISTS".to_string(),
            message: format!("Account with alias '{}' already exists.", alias),
            details: None,
        });
    }

    accounts.create_account(alias, private_key)?;
    Ok(Outcome::success(format!(
        "A new account has been added with the ID '{}'.",
        alias
    )))
}

pub fn accounts_delete(accounts: &KeyringAccountContainer, alias: &str) -> CommandResult<Outcome> {
    if accounts.delete_account(alias)? {
        Ok(Outcome::success(format!(
            "Account '{}' removed from keyring.",
            alias
        )))
    } else {
        Ok(Outcome::warning(format!("Account '{}' not found.", alias)))
    }
}

pub fn accounts_delete_all(accounts: &KeyringAccountContainer) -> CommandResult<Outcome> {
    let deleted = accounts.delete_all()?;
    Ok(Outcome::success(format!(
        "Deleted all keyring accounts ({}).",
        deleted
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::OutcomeLevel;
    use crate::secrets::{EphemeralBackend, SecretStorage, SecureStore, StorageKind, SERVICE_NAME};
    use std::sync::Arc;

    const TEST_ALIAS: &str = "test-alias";
    const TEST_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn accounts() -> KeyringAccountContainer {
        let backend = Arc::new(EphemeralBackend::new(SERVICE_NAME));
        let storage = SecretStorage::new(StorageKind::Accounts, SecureStore::new(backend));
        KeyringAccountContainer::new(Arc::new(storage))
    }

    #[test]
    fn test_accounts_flow() {
        let accounts = accounts();

        let outcome = accounts_import(&accounts, TEST_ALIAS, TEST_KEY).unwrap();
        assert_eq!(outcome.level, OutcomeLevel::Success);

        let listing = accounts_list(&accounts).unwrap();
        assert_eq!(
            listing.lines,
            vec!["Found 1 account:".to_string(), format!("  {}", TEST_ALIAS)]
        );

        let outcome = accounts_delete(&accounts, TEST_ALIAS).unwrap();
        assert_eq!(
            outcome.to_string(),
            format!("SUCCESS: Account '{}' removed from keyring.", TEST_ALIAS)
        );

        let listing = accounts_list(&accounts).unwrap();
        assert_eq!(listing.level, OutcomeLevel::Warning);
    }

    #[test]
    fn test_import_rejects_bad_key() {
        let accounts = accounts();
        let err = accounts_import(&accounts, TEST_ALIAS, "not-a-key").unwrap_err();
        assert_eq!(err.code, "INVALID_KEY");
        assert!(accounts.is_empty().unwrap());
    }

    #[test]
    fn test_import_rejects_existing_alias() {
        let accounts = accounts();
        accounts_import(&accounts, TEST_ALIAS, TEST_KEY).unwrap();
        let err = accounts_import(&accounts, TEST_ALIAS, TEST_KEY).unwrap_err();
        assert_eq!(err.code, "ALIAS_EXISTS");
    }

    #[test]
    fn test_private_key_format() {
        assert!(is_private_key_hex(TEST_KEY));
        assert!(is_private_key_hex(&TEST_KEY[2..]));
        assert!(!is_private_key_hex("0x1234"));
        assert!(!is_private_key_hex(&TEST_KEY.replace('4', "g")));
    }
}
