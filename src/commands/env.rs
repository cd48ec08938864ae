//! Env 명령어
//!
//! 환경 변수로 반영되는 시크릿 이름을 보여줍니다. 값은 출력하지 않습니다.

use crate::commands::{found_header, Outcome};
use crate::error::CommandResult;
use crate::secrets::SecretManager;

pub fn env_list(manager: &SecretManager) -> CommandResult<Outcome> {
    if !manager.config().set_env_vars {
        return Ok(Outcome::warning(
            "Environment variables are disabled (set `keyring.set_env_vars: true` in ape-config.yaml).",
        ));
    }

    let mut names = manager.global_keys()?;
    for name in manager.project_keys()? {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    if names.is_empty() {
        return Ok(Outcome::warning("No environment variables found."));
    }

    let mut lines = vec![found_header(names.len(), "env-var")];
    lines.extend(names.iter().map(|name| format!("  {}", name)));
    Ok(Outcome::info(lines))
}
