//! Command-line parsing and environment fallback.
//!
//! Credentials and the target environment come from flags first, then from
//! the `HIPAY_*` environment variables (which a `.env` file may provide).
//! Empty values count as missing.
//!
//! # Environment Variables
//!
//! - `HIPAY_USERNAME` - API username, used when `--username` is absent
//! - `HIPAY_PASSWORD` - API password, used when `--password` is absent
//! - `HIPAY_ENVIRONMENT` - `stage` (default) or `production`

use clap::Parser;
use hipay::{Credentials, Environment};
use hipay_mcp::registry;

use crate::error::ConfigError;

/// Environment variable holding the API username.
pub const USERNAME_ENV: &str = "HIPAY_USERNAME";

/// Environment variable holding the API password.
pub const PASSWORD_ENV: &str = "HIPAY_PASSWORD";

/// Environment variable selecting the platform.
pub const ENVIRONMENT_ENV: &str = "HIPAY_ENVIRONMENT";

/// Raw command-line arguments.
#[derive(Clone, Default, Parser)]
#[command(name = "hipay-mcp-server", version)]
#[command(about = "MCP server exposing the HiPay Enterprise payment API over stdio")]
pub struct Cli {
    /// Comma-separated tools to enable: `all` or tool names such as `transactions.get`
    #[arg(long, value_delimiter = ',')]
    pub tools: Option<Vec<String>>,

    /// HiPay API username, falling back to `HIPAY_USERNAME`
    #[arg(long)]
    pub username: Option<String>,

    /// HiPay API password, falling back to `HIPAY_PASSWORD`
    #[arg(long)]
    pub password: Option<String>,

    /// Target platform, `stage` or `production`, falling back to `HIPAY_ENVIRONMENT`
    #[arg(long)]
    pub environment: Option<String>,
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("tools", &self.tools)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("environment", &self.environment)
            .finish()
    }
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Credentials bound to the selected environment.
    pub credentials: Credentials,
    /// Enabled tool selection, trimmed.
    pub tools: Vec<String>,
}

impl ServerConfig {
    /// Parses the process arguments and resolves them against the process
    /// environment.
    ///
    /// Exits the process with a usage message on unrecognized flags.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a value is missing or invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Cli::parse().resolve(|key| std::env::var(key).ok())
    }
}

impl Cli {
    /// Validates the arguments, filling gaps from `env`.
    ///
    /// Checks run in order: tools, username, password, environment.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn resolve<F>(self, env: F) -> Result<ServerConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tools = self.tools.ok_or(ConfigError::MissingTools)?;
        let tools = tools
            .iter()
            .map(|tool| {
                let trimmed = tool.trim();
                if registry::is_accepted(trimmed) {
                    Ok(trimmed.to_owned())
                } else {
                    Err(ConfigError::InvalidTool {
                        tool: tool.clone(),
                        accepted: registry::accepted_names().join(", "),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let username = first_present(self.username, || env(USERNAME_ENV))
            .ok_or(ConfigError::MissingUsername)?;
        let password = first_present(self.password, || env(PASSWORD_ENV))
            .ok_or(ConfigError::MissingPassword)?;
        let environment = match first_present(self.environment, || env(ENVIRONMENT_ENV)) {
            Some(value) => value
                .parse::<Environment>()
                .map_err(|err| ConfigError::InvalidEnvironment(err.0))?,
            None => Environment::default(),
        };

        Ok(ServerConfig {
            credentials: Credentials::new(username, password, environment),
            tools,
        })
    }
}

fn first_present(arg: Option<String>, fallback: impl FnOnce() -> Option<String>) -> Option<String> {
    arg.filter(|value| !value.is_empty())
        .or_else(|| fallback().filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hipay-mcp-server").chain(args.iter().copied()))
            .unwrap()
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn full_arguments_resolve() {
        let config = parse(&[
            "--tools=transactions.get, transactions.update",
            "--username=merchant",
            "--password=s3cret",
            "--environment=production",
        ])
        .resolve(no_env)
        .unwrap();
        assert_eq!(config.tools, ["transactions.get", "transactions.update"]);
        assert_eq!(config.credentials.username(), "merchant");
        assert_eq!(config.credentials.password(), "s3cret");
        assert_eq!(config.credentials.environment(), Environment::Production);
    }

    #[test]
    fn missing_tools_is_fatal() {
        let err = parse(&["--username=u", "--password=p"])
            .resolve(no_env)
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingTools);
    }

    #[test]
    fn unknown_tool_is_fatal() {
        let err = parse(&["--tools=all,transactions.delete", "--username=u", "--password=p"])
            .resolve(no_env)
            .unwrap_err();
        let ConfigError::InvalidTool { tool, accepted } = err else {
            panic!("expected an invalid tool error");
        };
        assert_eq!(tool, "transactions.delete");
        assert!(accepted.starts_with("all, transactions.get"));
    }

    #[test]
    fn tools_are_checked_before_credentials() {
        let err = parse(&["--tools=bogus"]).resolve(no_env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTool { .. }));
    }

    #[test]
    fn credentials_fall_back_to_environment() {
        let env = env_of(&[(USERNAME_ENV, "env-user"), (PASSWORD_ENV, "env-pass")]);
        let config = parse(&["--tools=all"]).resolve(env).unwrap();
        assert_eq!(config.credentials.username(), "env-user");
        assert_eq!(config.credentials.password(), "env-pass");
        assert_eq!(config.credentials.environment(), Environment::Stage);
    }

    #[test]
    fn arguments_take_precedence_over_environment() {
        let env = env_of(&[
            (USERNAME_ENV, "env-user"),
            (PASSWORD_ENV, "env-pass"),
            (ENVIRONMENT_ENV, "stage"),
        ]);
        let config = parse(&[
            "--tools=all",
            "--username=arg-user",
            "--environment=production",
        ])
        .resolve(env)
        .unwrap();
        assert_eq!(config.credentials.username(), "arg-user");
        assert_eq!(config.credentials.password(), "env-pass");
        assert_eq!(config.credentials.environment(), Environment::Production);
    }

    #[test]
    fn empty_argument_falls_back_to_environment() {
        let env = env_of(&[(USERNAME_ENV, "env-user")]);
        let config = parse(&["--tools=all", "--username=", "--password=p"])
            .resolve(env)
            .unwrap();
        assert_eq!(config.credentials.username(), "env-user");
    }

    #[test]
    fn missing_username_is_fatal() {
        let err = parse(&["--tools=all", "--password=p"])
            .resolve(no_env)
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingUsername);
    }

    #[test]
    fn missing_password_is_fatal() {
        let env = env_of(&[(PASSWORD_ENV, "")]);
        let err = parse(&["--tools=all", "--username=u"])
            .resolve(env)
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingPassword);
    }

    #[test]
    fn invalid_environment_is_fatal() {
        let err = parse(&["--tools=all", "--username=u", "--password=p"])
            .resolve(env_of(&[(ENVIRONMENT_ENV, "sandbox")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidEnvironment("sandbox".to_owned()));
    }

    #[test]
    fn debug_redacts_password() {
        let cli = parse(&["--tools=all", "--username=merchant", "--password=s3cret"]);
        let rendered = format!("{cli:?}");
        assert!(rendered.contains("merchant"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn unrecognized_flag_is_a_usage_error() {
        let err = Cli::try_parse_from(["hipay-mcp-server", "--api-key=abc"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
