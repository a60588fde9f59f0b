use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use event_finder_server::config::{AppConfig, CliConfig, FileConfig, DEFAULT_UPSTREAM_TIMEOUT_SEC};
use event_finder_server::favorites::SqliteFavoritesStore;
use event_finder_server::server::{run_server, RequestsLoggingLevel, ServerConfig, ServerState};
use event_finder_server::upstream::{
    build_http_client, IpInfoClient, SpotifyClient, TicketmasterClient,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Optional TOML config file. Its values override the flags below.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory holding the favorites database.
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Timeout in seconds for calls to the proxied APIs.
    #[clap(long, default_value_t = DEFAULT_UPSTREAM_TIMEOUT_SEC)]
    pub upstream_timeout_sec: u64,

    #[clap(long, env = "TM_API_KEY", hide_env_values = true)]
    pub tm_api_key: Option<String>,

    #[clap(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    pub spotify_client_id: Option<String>,

    #[clap(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub spotify_client_secret: Option<String>,

    #[clap(long, env = "IPINFO_TOKEN", hide_env_values = true)]
    pub ipinfo_token: Option<String>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_dir: self.db_dir.clone(),
            port: self.port,
            logging_level: self.logging_level.clone(),
            frontend_dir_path: self.frontend_dir_path.clone(),
            upstream_timeout_sec: self.upstream_timeout_sec,
            tm_api_key: self.tm_api_key.clone(),
            spotify_client_id: self.spotify_client_id.clone(),
            spotify_client_secret: self.spotify_client_secret.clone(),
            ipinfo_token: self.ipinfo_token.clone(),
        }
    }
}

fn build_state(config: &AppConfig) -> Result<ServerState> {
    info!(
        "Opening favorites database at {:?}...",
        config.favorites_db_path()
    );
    let favorites_store = Arc::new(SqliteFavoritesStore::new(config.favorites_db_path())?);

    let http = build_http_client(config.upstream_timeout_sec)?;
    let credentials = &config.credentials;
    let ticketmaster = Arc::new(TicketmasterClient::new(
        http.clone(),
        &config.upstream.ticketmaster,
        credentials.tm_api_key.clone(),
    ));
    let spotify = Arc::new(SpotifyClient::new(
        http.clone(),
        &config.upstream.spotify_accounts,
        &config.upstream.spotify_api,
        credentials.spotify.clone(),
    ));
    let ipinfo = Arc::new(IpInfoClient::new(
        http,
        &config.upstream.ipinfo,
        credentials.ipinfo_token.clone(),
    ));

    let server_config = ServerConfig {
        requests_logging_level: config.logging_level.clone(),
        port: config.port,
        frontend_dir_path: config.frontend_dir_path.clone(),
    };
    Ok(ServerState::new(
        server_config,
        favorites_store,
        ticketmaster,
        spotify,
        ipinfo,
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };

    let config = match AppConfig::resolve(&cli_args.to_cli_config(), file_config) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            return Err(e);
        }
    };

    // The store is ready before the listener binds
    let state = build_state(&config)?;

    info!(
        "Starting event finder server {} on port {}",
        env!("GIT_HASH"),
        config.port
    );
    run_server(state).await
}
