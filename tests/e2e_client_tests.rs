//! End-to-end tests for the client application against a live gateway

mod common;

use common::{
    FakeUpstreamState, TestServer, ARTIST_NAME, EGRESS_LAT, EGRESS_LON, EVENT_1_ID, EVENT_2_ID,
    MISSING_EVENT_ID, NO_MATCH_CITY, REQUEST_TIMEOUT_SECS,
};
use event_finder_server::client::{
    ArtistPanel, DetailTab, EventApp, FavoriteToggle, GatewayApi, GatewayClient, SearchError,
    ToastBus, ToastEvent, ToastKind,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn connect(server: &TestServer) -> Arc<dyn GatewayApi> {
    Arc::new(
        GatewayClient::new(&server.base_url, REQUEST_TIMEOUT_SECS)
            .expect("Failed to create gateway client"),
    )
}

fn app(server: &TestServer) -> EventApp {
    EventApp::new(connect(server), ToastBus::new())
}

#[tokio::test]
async fn test_gateway_client_round_trips_favorites() {
    let server = TestServer::spawn().await;
    let api = connect(&server);

    let events = api
        .search_events(&vec![
            ("keyword", "taylor".to_string()),
            ("city", "Los Angeles".to_string()),
        ])
        .await
        .unwrap();
    assert_eq!(events.len(), 2);

    api.add_favorite(&events[0]).await.unwrap();
    let favorites = api.list_favorites().await.unwrap();
    assert_eq!(favorites, vec![events[0].clone()]);

    api.remove_favorite(EVENT_1_ID).await.unwrap();
    assert!(api.list_favorites().await.unwrap().is_empty());

    let err = api.remove_favorite(EVENT_1_ID).await.unwrap_err();
    assert!(err.to_string().contains("Favorite not found"), "{}", err);
}

#[tokio::test]
async fn test_gateway_client_surfaces_error_messages() {
    let server = TestServer::spawn().await;
    let api = connect(&server);

    let err = api.event_details(MISSING_EVENT_ID).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("404"), "{}", message);
    assert!(
        message.contains("Failed to fetch event details from Ticketmaster"),
        "{}",
        message
    );
}

#[tokio::test]
async fn test_search_with_auto_detected_location() {
    let server = TestServer::spawn().await;
    let mut app = app(&server);

    app.form.keyword = "  taylor ".to_string();
    app.form.category = "Music".to_string();
    app.set_auto_detect(true).await;
    assert_eq!(app.form.lat, Some(EGRESS_LAT));
    assert_eq!(app.form.lon, Some(EGRESS_LON));

    let results = app.search().await.unwrap();
    assert_eq!(results.len(), 2);

    let query = server.upstream.state.last_search_query.lock().unwrap().clone();
    assert_eq!(query["keyword"], "taylor");
    assert_eq!(query["segmentId"], "KZFzniwnSyZfZ7v7nJ");
    assert_eq!(query["latlong"], format!("{},{}", EGRESS_LAT, EGRESS_LON));
}

#[tokio::test]
async fn test_failed_location_detection_asks_for_manual_entry() {
    let server = TestServer::spawn().await;
    server
        .upstream
        .state
        .ipinfo_without_loc
        .store(true, Ordering::SeqCst);
    let mut app = app(&server);

    app.form.keyword = "taylor".to_string();
    app.set_auto_detect(true).await;

    assert!(!app.form.auto_detect);
    assert_eq!(
        app.location_error(),
        Some("Failed to auto-detect location. Please enter it manually.")
    );
    assert_eq!(app.search().await.unwrap_err(), SearchError::MissingLocation);
}

#[tokio::test]
async fn test_search_without_matches_is_restorable() {
    let server = TestServer::spawn().await;
    let mut app = app(&server);

    app.form.keyword = "taylor".to_string();
    app.form.city = NO_MATCH_CITY.to_string();
    assert!(app.search().await.unwrap().is_empty());

    app.form.keyword = "something else".to_string();
    assert!(app.restore_search());
    assert_eq!(app.form.keyword, "taylor");
    assert!(app.results().is_empty());
}

#[tokio::test]
async fn test_detail_view_loads_artist_tab_once() {
    let server = TestServer::spawn().await;
    let mut app = app(&server);

    let view = app.open_detail(EVENT_1_ID).await.unwrap();
    assert_eq!(view.detail.name, "Taylor Swift | The Eras Tour");
    assert_eq!(view.detail.artist_team, ARTIST_NAME);
    assert_eq!(view.detail.genres, "Music, Pop");
    assert_eq!(view.detail.ticket_status.label(), "On Sale");
    assert_eq!(
        view.detail.seatmap_url.as_deref(),
        Some("https://img.example.com/sofi_seatmap.png")
    );
    assert!(view.detail.is_music());

    let view = app.set_detail_tab(DetailTab::Artist).await.unwrap();
    match &view.artist {
        ArtistPanel::Loaded {
            artist,
            albums,
            albums_error,
        } => {
            assert_eq!(artist.name, ARTIST_NAME);
            assert_eq!(albums.len(), 2);
            assert!(albums_error.is_none());
        }
        other => panic!("Unexpected artist panel {:?}", other),
    }

    app.set_detail_tab(DetailTab::Venue).await;
    app.set_detail_tab(DetailTab::Artist).await;

    let counters = server.upstream.counters();
    assert_eq!(FakeUpstreamState::count(&counters.artist_search), 1);
    assert_eq!(FakeUpstreamState::count(&counters.albums), 1);
}

#[tokio::test]
async fn test_detail_favorite_toggle_and_undo() {
    let server = TestServer::spawn().await;
    let mut app = app(&server);
    let mut toasts = app.toasts().subscribe();
    app.init().await;

    app.open_detail(EVENT_2_ID).await.unwrap();
    assert_eq!(app.toggle_detail_favorite().await, Some(FavoriteToggle::Added));
    match toasts.recv().await.unwrap() {
        ToastEvent::Show(toast) => {
            assert_eq!(toast.kind, ToastKind::Success);
            assert_eq!(toast.message, "Lakers vs Celtics added to favorites!");
            assert_eq!(
                toast.sub_message.as_deref(),
                Some("You can view it in the Favorites page.")
            );
        }
        other => panic!("Unexpected toast event {:?}", other),
    }

    let outcome = app.toggle_detail_favorite().await;
    assert!(matches!(outcome, Some(FavoriteToggle::Removed(_))));
    assert!(app.refresh_favorites().await.is_empty());

    assert!(app.undo().await);
    assert!(!app.undo().await);

    let favorites = app.refresh_favorites().await;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, EVENT_2_ID);
    assert_eq!(favorites[0].genre, "Sports, Basketball");
}
