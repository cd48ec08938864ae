//! CLI 인자 정의

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::secrets::Scope;

#[derive(Parser, Debug)]
#[command(name = "ape-keyring", version, about = "Manage accounts and secrets")]
pub struct Cli {
    /// 프로젝트 디렉토리 (project 스코프 시크릿과 ape-config.yaml 기준)
    #[arg(long, global = true, default_value = ".")]
    pub project: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage secrets
    #[command(subcommand)]
    Secrets(SecretsCommand),

    /// Manage accounts
    #[command(subcommand)]
    Accounts(AccountsCommand),

    /// Manage environment variables
    #[command(subcommand)]
    Env(EnvCommand),
}

#[derive(Subcommand, Debug)]
pub enum SecretsCommand {
    /// List secrets
    List,

    /// Add or replace a secret (value is read from stdin)
    Set {
        name: String,

        /// Set to 'project' to limit the scope to the current project
        #[arg(long, default_value_t = Scope::Global)]
        scope: Scope,
    },

    /// Remove a secret
    #[command(alias = "delete")]
    Unset {
        name: String,

        #[arg(long, default_value_t = Scope::Global)]
        scope: Scope,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountsCommand {
    /// List accounts
    List,

    /// Add a new account (private key is read from stdin)
    Import { alias: String },

    /// Delete an account
    Delete { alias: String },

    /// Delete all keyring accounts
    DeleteAll,
}

#[derive(Subcommand, Debug)]
pub enum EnvCommand {
    /// List secrets exported as environment variables
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_scoped_set() {
        let cli = Cli::try_parse_from([
            "ape-keyring",
            "secrets",
            "set",
            "API_KEY",
            "--scope",
            "project",
            "--project",
            "/work/demo",
        ])
        .unwrap();

        assert_eq!(cli.project, PathBuf::from("/work/demo"));
        match cli.command {
            Command::Secrets(SecretsCommand::Set { name, scope }) => {
                assert_eq!(name, "API_KEY");
                assert_eq!(scope, Scope::Project);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_delete_alias_for_unset() {
        let cli = Cli::try_parse_from(["ape-keyring", "secrets", "delete", "X"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Secrets(SecretsCommand::Unset {
                scope: Scope::Global,
                ..
            })
        ));
    }

    #[test]
    fn test_env_requires_list_subcommand() {
        let cli = Cli::try_parse_from(["ape-keyring", "env", "list"]).unwrap();
        assert!(matches!(cli.command, Command::Env(EnvCommand::List)));
        assert!(Cli::try_parse_from(["ape-keyring", "env"]).is_err());
    }

    #[test]
    fn test_invalid_scope_is_rejected() {
        let result = Cli::try_parse_from(["ape-keyring", "secrets", "set", "X", "--scope", "local"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
