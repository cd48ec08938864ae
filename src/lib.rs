//! ape-keyring - OS 키체인 기반 계정/시크릿 관리자
//!
//! OS 키체인에 private key와 시크릿을 저장하고, 저장된 키 목록을 별도로 추적합니다.
//! 시크릿은 global / project 두 가지 스코프를 가지며, 설정에 따라 환경 변수로도 반영됩니다.

pub mod accounts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod secrets;

use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use crate::accounts::KeyringAccountContainer;
use crate::cli::{AccountsCommand, Cli, Command, EnvCommand, SecretsCommand};
use crate::commands::{Outcome, OutcomeLevel};
use crate::error::{CommandResult, KeyringError};
use crate::secrets::{default_storage, SecretManager, StorageKind};

/// RUST_LOG가 없으면 warn 이상만 stderr로 출력
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// stdin에서 한 줄 읽기 (줄바꿈 제거)
fn read_secret(prompt: &str) -> Result<Zeroizing<String>, KeyringError> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{}: ", prompt)?;
    stderr.flush()?;

    let mut line = Zeroizing::new(String::new());
    std::io::stdin().lock().read_line(&mut *line)?;
    Ok(Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn secret_manager(cli: &Cli) -> Result<SecretManager, KeyringError> {
    let storage = Arc::new(default_storage(StorageKind::Secrets));
    SecretManager::load(&cli.project, storage)
}

fn account_container() -> KeyringAccountContainer {
    KeyringAccountContainer::new(Arc::new(default_storage(StorageKind::Accounts)))
}

fn dispatch(cli: &Cli) -> CommandResult<Outcome> {
    match &cli.command {
        Command::Secrets(cmd) => {
            let manager = secret_manager(cli)?;
            match cmd {
                SecretsCommand::List => commands::secrets::secrets_list(&manager),
                SecretsCommand::Set { name, scope } => {
                    let value = read_secret(&format!("Enter the secret value for '{}'", name))?;
                    commands::secrets::secrets_set(&manager, name, &value, *scope)
                }
                SecretsCommand::Unset { name, scope } => {
                    commands::secrets::secrets_unset(&manager, name, *scope)
                }
            }
        }
        Command::Accounts(cmd) => {
            let accounts = account_container();
            match cmd {
                AccountsCommand::List => commands::accounts::accounts_list(&accounts),
                AccountsCommand::Import { alias } => {
                    let key = read_secret("Enter the private key")?;
                    commands::accounts::accounts_import(&accounts, alias, &key)
                }
                AccountsCommand::Delete { alias } => {
                    commands::accounts::accounts_delete(&accounts, alias)
                }
                AccountsCommand::DeleteAll => commands::accounts::accounts_delete_all(&accounts),
            }
        }
        Command::Env(EnvCommand::List) => {
            let manager = secret_manager(cli)?;
            commands::env::env_list(&manager)
        }
    }
}

/// CLI 실행
pub fn run() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match dispatch(&cli) {
        Ok(outcome) if outcome.level == OutcomeLevel::Warning => {
            eprintln!("{}", outcome);
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            println!("{}", outcome);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("ERROR: {}", err);
            ExitCode::FAILURE
        }
    }
}
