//! Test server lifecycle management
//!
//! Each test gets an isolated gateway with its own favorites database, wired
//! to its own fake upstream.

use super::constants::*;
use super::fixtures::create_test_frontend;
use super::upstream::FakeUpstream;
use event_finder_server::favorites::SqliteFavoritesStore;
use event_finder_server::server::{make_app, RequestsLoggingLevel, ServerConfig, ServerState};
use event_finder_server::upstream::{
    build_http_client, IpInfoClient, SpotifyClient, SpotifyCredentials, TicketmasterClient,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test gateway instance
///
/// When dropped, the gateway and its fake upstream shut down and temp
/// resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Fake third-party APIs behind the gateway
    pub upstream: FakeUpstream,

    // Private fields - keep resources alive until drop
    _temp_db_dir: TempDir,
    _temp_frontend_dir: Option<TempDir>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a gateway without a frontend on a random port.
    pub async fn spawn() -> Self {
        Self::spawn_inner(None).await
    }

    /// Spawns a gateway that also serves a small frontend build.
    pub async fn spawn_with_frontend() -> Self {
        let frontend = create_test_frontend().expect("Failed to create test frontend");
        Self::spawn_inner(Some(frontend)).await
    }

    async fn spawn_inner(frontend: Option<TempDir>) -> Self {
        let upstream = FakeUpstream::spawn().await;

        let temp_db_dir = TempDir::new().expect("Failed to create temp db dir");
        let favorites_store = Arc::new(
            SqliteFavoritesStore::new(temp_db_dir.path().join("favorites.db"))
                .expect("Failed to open favorites store"),
        );

        let http = build_http_client(UPSTREAM_TIMEOUT_SECS).expect("Failed to build http client");
        let ticketmaster = Arc::new(TicketmasterClient::new(
            http.clone(),
            &upstream.ticketmaster_url(),
            TM_API_KEY.to_string(),
        ));
        let spotify = Arc::new(SpotifyClient::new(
            http.clone(),
            &upstream.spotify_accounts_url(),
            &upstream.spotify_api_url(),
            SpotifyCredentials {
                client_id: SPOTIFY_CLIENT_ID.to_string(),
                client_secret: SPOTIFY_CLIENT_SECRET.to_string(),
            },
        ));
        let ipinfo = Arc::new(IpInfoClient::new(
            http,
            &upstream.ipinfo_url(),
            IPINFO_TOKEN.to_string(),
        ));

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            frontend_dir_path: frontend
                .as_ref()
                .map(|dir| dir.path().to_string_lossy().to_string()),
        };
        let state = ServerState::new(config, favorites_store, ticketmaster, spotify, ipinfo);
        let app = make_app(state);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            upstream,
            _temp_db_dir: temp_db_dir,
            _temp_frontend_dir: frontend,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling `/`
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
