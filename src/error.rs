//! ape-keyring Error Types
//!
//! 라이브러리 전역 에러 타입 정의

use serde::Serialize;
use thiserror::Error;

/// ape-keyring 에러
///
/// "찾을 수 없음"은 에러가 아닙니다. (None / false / 빈 목록으로 표현)
#[derive(Error, Debug)]
pub enum KeyringError {
    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("Name cannot be empty.")]
    EmptyIdentifier,

    #[error("Key '{0}' is reserved for internal tracking.")]
    ReservedKey(String),

    #[error("Failed to create account '{0}'")]
    AccountCreation(String),

    #[error("Secret for '{0}' is missing.")]
    MissingSecret(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<serde_yaml::Error> for KeyringError {
    fn from(err: serde_yaml::Error) -> Self {
        KeyringError::Config(err.to_string())
    }
}

/// 명령 응답용 직렬화 가능한 에러
#[derive(Debug, Serialize)]
pub struct CommandError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl From<KeyringError> for CommandError {
    fn from(error: KeyringError) -> Self {
        let code = match &error {
            KeyringError::Keychain(_) => "SECURE_STORE_ERROR",
            KeyringError::EmptyIdentifier => "EMPTY_IDENTIFIER",
            KeyringError::ReservedKey(_) => "RESERVED_KEY",
            KeyringError::AccountCreation(_) => "ACCOUNT_ERROR",
            KeyringError::MissingSecret(_) => "MISSING_SECRET",
            KeyringError::Config(_) => "CONFIG_ERROR",
            KeyringError::Io(_) => "IO_ERROR",
            KeyringError::Serialization(_) => "SERIALIZATION_ERROR",
        };

        CommandError {
            code: code.to_string(),
            message: error.to_string(),
            details: None,
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// 명령 결과 타입
pub type CommandResult<T> = Result<T, CommandError>;
