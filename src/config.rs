//! Application configuration.
//!
//! Values come from CLI flags (which clap also fills from `SCOOPIKA_*`
//! environment variables) and fall back to the defaults below.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cli::{self, Cli};
use crate::engines::OptionsPolicy;
use crate::login::GateConfig;

/// Default listen address for `serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Comma-separated sign-in provider ids.
pub const SIGNIN_PROVIDERS_ENV: &str = "SCOOPIKA_SIGNIN_PROVIDERS";

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub engines_file: PathBuf,
    pub json_options: OptionsPolicy,
    pub bind: SocketAddr,
    pub gate: GateConfig,
}

impl AppConfig {
    /// Build the configuration from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let data_dir = cli::resolve_data_dir(cli.data_dir.as_deref())?;

        let engines_file = match &cli.engines_file {
            Some(path) => PathBuf::from(path),
            None => data_dir.join("engines.json"),
        };

        let json_options = match &cli.json_options {
            Some(raw) => raw.parse::<OptionsPolicy>().map_err(anyhow::Error::msg)?,
            None => OptionsPolicy::default(),
        };

        let mut gate = GateConfig::default();
        if let Ok(raw) = std::env::var(SIGNIN_PROVIDERS_ENV) {
            let providers = parse_provider_list(&raw);
            if !providers.is_empty() {
                gate.sign_in_providers = providers;
            }
        }

        Ok(Self {
            data_dir,
            engines_file,
            json_options,
            bind: parse_bind(DEFAULT_BIND)?,
            gate,
        })
    }

    /// Override the listen address.
    pub fn with_bind(mut self, bind: Option<&str>) -> Result<Self> {
        if let Some(addr) = bind {
            self.bind = parse_bind(addr)?;
        }
        Ok(self)
    }
}

fn parse_bind(addr: &str) -> Result<SocketAddr> {
    addr.parse()
        .with_context(|| format!("Invalid listen address: {}", addr))
}

fn parse_provider_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}
