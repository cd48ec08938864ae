//! 시크릿 스코프와 물리 키 인코딩
//!
//! project 스코프 시크릿은 논리 이름 뒤에 `<<project=NAME>>` 접미사를 붙여 저장합니다.
//! 인코딩/디코딩은 이 모듈에서만 수행합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KeyringError;

/// project 접미사 시작 표식
pub const PROJECT_MARKER: &str = "<<project=";
const PROJECT_SUFFIX_END: &str = ">>";

/// 시크릿 스코프
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Global,
    Project,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::Project => "project",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "global" => Ok(Scope::Global),
            "project" => Ok(Scope::Project),
            other => Err(format!("'{}' is not a valid scope (global, project)", other)),
        }
    }
}

/// 물리 키를 해석한 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedName {
    /// 접미사를 제거한 논리 이름
    pub name: String,
    /// project 스코프라면 해당 project 이름
    pub project: Option<String>,
}

impl ScopedName {
    pub fn is_project_scoped(&self) -> bool {
        self.project.is_some()
    }

    pub fn belongs_to(&self, project_name: &str) -> bool {
        self.project.as_deref() == Some(project_name)
    }
}

/// 논리 이름 검증
///
/// 빈 이름과 예약 표식을 포함한 이름은 허용하지 않습니다.
pub fn validate_name(name: &str) -> Result<(), KeyringError> {
    if name.is_empty() {
        return Err(KeyringError::EmptyIdentifier);
    }
    if name.contains(PROJECT_MARKER) {
        return Err(KeyringError::ReservedKey(name.to_string()));
    }
    Ok(())
}

/// (논리 이름, 스코프) → 물리 키
pub fn encode_key(name: &str, scope: Scope, project_name: &str) -> String {
    match scope {
        Scope::Global => name.to_string(),
        Scope::Project => format!(
            "{}{}{}{}",
            name, PROJECT_MARKER, project_name, PROJECT_SUFFIX_END
        ),
    }
}

/// 물리 키 → (논리 이름, project)
///
/// 접미사 형식이 깨진 키(`>>`로 끝나지 않음)는 키 전체를 이름으로 돌려주고,
/// 어느 project에도 속하지 않는 project 스코프(`Some("")`)로 표시합니다.
pub fn decode_key(physical_key: &str) -> ScopedName {
    let Some(idx) = physical_key.rfind(PROJECT_MARKER) else {
        return ScopedName {
            name: physical_key.to_string(),
            project: None,
        };
    };

    let (name, suffix) = physical_key.split_at(idx);
    let project = suffix[PROJECT_MARKER.len()..].strip_suffix(PROJECT_SUFFIX_END);

    match project {
        Some(project) => ScopedName {
            name: name.to_string(),
            project: Some(project.to_string()),
        },
        None => ScopedName {
            name: physical_key.to_string(),
            project: Some(String::new()),
        },
    }
}
