//! 환경 변수 포트
//!
//! 시크릿을 환경 변수로 반영할 때 프로세스 환경을 직접 건드리지 않고 이 포트를 거칩니다.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::warn;

pub trait EnvironmentPort: Send + Sync {
    fn set(&self, name: &str, value: &str);

    /// 없는 변수를 지워도 에러가 아닙니다.
    fn unset(&self, name: &str);
}

/// 실제 프로세스 환경
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

/// 빈 문자열, `=`, NUL이 들어간 이름은 `std::env::set_var`에서 panic합니다.
fn is_valid_var_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['=', '\0'])
}

impl EnvironmentPort for ProcessEnvironment {
    fn set(&self, name: &str, value: &str) {
        if !is_valid_var_name(name) || value.contains('\0') {
            warn!(name, "cannot export secret as environment variable");
            return;
        }
        std::env::set_var(name, value);
    }

    fn unset(&self, name: &str) {
        if is_valid_var_name(name) {
            std::env::remove_var(name);
        }
    }
}

/// 인메모리 환경 (테스트용)
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    vars: Mutex<HashMap<String, String>>,
}

impl MemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.lock().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.vars.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EnvironmentPort for MemoryEnvironment {
    fn set(&self, name: &str, value: &str) {
        self.lock().insert(name.to_string(), value.to_string());
    }

    fn unset(&self, name: &str) {
        self.lock().remove(name);
    }
}
