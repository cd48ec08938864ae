//! Commands Module
//!
//! CLI에서 호출하는 명령어 정의. 각 명령은 출력할 결과(`Outcome`)를 돌려주고,
//! 실패는 `CommandError`로 변환합니다.

pub mod accounts;
pub mod env;
pub mod secrets;

use serde::Serialize;
use std::fmt;

/// 결과 메시지 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeLevel {
    Success,
    Warning,
    Info,
}

/// 명령 실행 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub level: OutcomeLevel,
    pub lines: Vec<String>,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: OutcomeLevel::Success,
            lines: vec![message.into()],
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: OutcomeLevel::Warning,
            lines: vec![message.into()],
        }
    }

    pub fn info(lines: Vec<String>) -> Self {
        Self {
            level: OutcomeLevel::Info,
            lines,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.level {
            OutcomeLevel::Success => "SUCCESS: ",
            OutcomeLevel::Warning => "WARNING: ",
            OutcomeLevel::Info => "",
        };
        for (i, line) in self.lines.iter().enumerate() {
            if i == 0 {
                write!(f, "{}{}", prefix, line)?;
            } else {
                write!(f, "\n{}", line)?;
            }
        }
        Ok(())
    }
}

/// "Found 2 accounts:" 형태의 헤더
pub(crate) fn found_header(count: usize, noun: &str) -> String {
    format!("Found {} {}{}:", count, noun, if count == 1 { "" } else { "s" })
}
