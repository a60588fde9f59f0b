mod file_config;

pub use file_config::{FileConfig, UpstreamConfig};

use crate::server::RequestsLoggingLevel;
use crate::upstream::{SpotifyCredentials, UpstreamEndpoints};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_UPSTREAM_TIMEOUT_SEC: u64 = 15;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub upstream_timeout_sec: u64,

    // Credentials, normally taken from the environment
    pub tm_api_key: Option<String>,
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub ipinfo_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpstreamCredentials {
    pub tm_api_key: String,
    pub spotify: SpotifyCredentials,
    pub ipinfo_token: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub upstream_timeout_sec: u64,
    pub credentials: UpstreamCredentials,
    pub upstream: UpstreamEndpoints,
}

fn required_credential(value: &Option<String>, env_name: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => bail!("{} must be set", env_name),
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_dir must be specified via --db-dir or in config file")
            })?;

        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let upstream_timeout_sec = file
            .upstream_timeout_sec
            .unwrap_or(cli.upstream_timeout_sec);
        if upstream_timeout_sec == 0 {
            bail!("upstream_timeout_sec must be greater than zero");
        }

        let credentials = UpstreamCredentials {
            tm_api_key: required_credential(&cli.tm_api_key, "TM_API_KEY")?,
            spotify: SpotifyCredentials {
                client_id: required_credential(&cli.spotify_client_id, "SPOTIFY_CLIENT_ID")?,
                client_secret: required_credential(
                    &cli.spotify_client_secret,
                    "SPOTIFY_CLIENT_SECRET",
                )?,
            },
            ipinfo_token: required_credential(&cli.ipinfo_token, "IPINFO_TOKEN")?,
        };

        let upstream_file = file.upstream.unwrap_or_default();
        let defaults = UpstreamEndpoints::default();
        let upstream = UpstreamEndpoints {
            ticketmaster: upstream_file
                .ticketmaster_url
                .unwrap_or(defaults.ticketmaster),
            spotify_accounts: upstream_file
                .spotify_accounts_url
                .unwrap_or(defaults.spotify_accounts),
            spotify_api: upstream_file.spotify_api_url.unwrap_or(defaults.spotify_api),
            ipinfo: upstream_file.ipinfo_url.unwrap_or(defaults.ipinfo),
        };

        Ok(Self {
            db_dir,
            port,
            logging_level,
            frontend_dir_path,
            upstream_timeout_sec,
            credentials,
            upstream,
        })
    }

    pub fn favorites_db_path(&self) -> PathBuf {
        self.db_dir.join("favorites.db")
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
