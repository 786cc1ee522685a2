//! Runtime configuration for the server binary
//!
//! Settings are read from an optional YAML file and the environment. Environment variables win
//! over the file.

mod config;
mod logging;

use std::path::Path;

pub use config::Config;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
pub use logging::setup_logging;

/// Separator to use when drilling down into nested options in the env figment
const ENV_NESTED_SEPARATOR: &str = "__";

/// Prefix of the environment variables that mirror the config file
const ENV_PREFIX: &str = "MONDAY_MCP_";

/// Read configuration from environment variables only
#[allow(clippy::result_large_err)]
pub fn read_config_from_env() -> Result<Config, figment::Error> {
    Figment::new()
        .join(monday_common_env())
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .extract()
}

/// Read in a config from a YAML file, filling in any missing values from the environment
#[allow(clippy::result_large_err)]
pub fn read_config(yaml_path: impl AsRef<Path>) -> Result<Config, figment::Error> {
    Figment::new()
        .join(monday_common_env())
        .join(Env::prefixed(ENV_PREFIX).split(ENV_NESTED_SEPARATOR))
        .join(Yaml::file(yaml_path))
        .extract()
}

/// The variables other monday.com tooling already uses for the token and API version
fn monday_common_env() -> Env {
    Env::prefixed("MONDAY_")
        .only(&["token", "api_token", "api_version"])
        .map(|key| match key.as_str().to_lowercase().as_str() {
            "token" | "api_token" => "API:TOKEN".into(),
            "api_version" => "API:VERSION".into(),
            other => other.to_string().into(),
        })
        .split(":")
}

#[cfg(test)]
mod test {
    use monday_mcp_server::server::Transport;
    use secrecy::ExposeSecret;

    use super::{read_config, read_config_from_env};
    use crate::runtime::config::ApiConfig;

    #[test]
    fn it_prioritizes_env_vars() {
        let config = r#"
            api:
                version: "2024-10"
        "#;

        figment::Jail::expect_with(move |jail| {
            let path = "config.yaml";

            jail.create_file(path, config)?;
            jail.set_env("MONDAY_MCP_API__VERSION", "2025-04");

            let config = read_config(path)?;

            assert_eq!(config.api.version, "2025-04");
            Ok(())
        });
    }

    #[test]
    fn it_maps_common_token_variables() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("MONDAY_TOKEN", "secret-token");
            jail.set_env("MONDAY_API_VERSION", "dev");

            let config = read_config_from_env()?;

            assert_eq!(
                config
                    .api
                    .token
                    .as_ref()
                    .map(|token| token.expose_secret().to_string()),
                Some("secret-token".to_string())
            );
            assert_eq!(config.api.version, "dev");
            Ok(())
        });
    }

    #[test]
    fn it_merges_env_and_file() {
        let config = "
            read_only: true
            tools:
                exclude: [delete_item]
            transport:
                type: streamable_http
                port: 8000
        ";

        figment::Jail::expect_with(move |jail| {
            let path = "config.yaml";

            jail.create_file(path, config)?;
            jail.set_env("MONDAY_MCP_API__TOKEN", "from-env");

            let config = read_config(path)?;

            assert!(config.read_only);
            assert_eq!(config.tools.exclude, vec!["delete_item".to_string()]);
            assert!(matches!(
                config.transport,
                Transport::StreamableHttp { port: 8000, .. }
            ));
            assert!(config.api.token.is_some());
            Ok(())
        });
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = read_config("missing.yaml")?;
            let defaults = ApiConfig::default();

            assert!(config.api.token.is_none());
            assert_eq!(config.api.version, defaults.version);
            assert_eq!(config.api.timeout, defaults.timeout);
            assert!(!config.read_only);
            Ok(())
        });
    }
}
