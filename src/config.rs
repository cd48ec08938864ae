//! 프로젝트 설정
//!
//! `<project>/ape-config.yaml`의 `keyring` 섹션을 읽습니다.
//!
//! ```yaml
//! keyring:
//!   set_env_vars: true
//! ```

use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use crate::error::KeyringError;

/// 프로젝트 설정 파일 이름
pub const CONFIG_FILE_NAME: &str = "ape-config.yaml";

/// keyring 플러그인 설정
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyringConfig {
    /// 시크릿을 환경 변수로도 반영할지 여부
    pub set_env_vars: bool,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    keyring: Option<RawKeyringSection>,
}

#[derive(Debug, Default, Deserialize)]
struct RawKeyringSection {
    #[serde(default)]
    set_env_vars: Option<Value>,
}

/// "1" / "true" / "t" (대소문자 무시)만 true로 취급
fn is_truthy(value: &Value) -> bool {
    let text = match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return false,
    };
    matches!(text.to_ascii_lowercase().as_str(), "1" | "true" | "t")
}

impl KeyringConfig {
    /// YAML 문자열에서 설정 읽기
    pub fn from_yaml_str(text: &str) -> Result<Self, KeyringError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig = serde_yaml::from_str(text)?;
        let set_env_vars = raw
            .keyring
            .and_then(|section| section.set_env_vars)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);

        Ok(Self { set_env_vars })
    }

    /// 프로젝트 디렉토리에서 설정 읽기
    ///
    /// 설정 파일이 없으면 기본값을 사용합니다.
    pub fn load(project_path: &Path) -> Result<Self, KeyringError> {
        let path = project_path.join(CONFIG_FILE_NAME);
        if !path.exists() {
            debug!(path = %path.display(), "no project config, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)?;
        Self::from_yaml_str(&text).map_err(|e| match e {
            KeyringError::Config(msg) => {
                KeyringError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }
}
