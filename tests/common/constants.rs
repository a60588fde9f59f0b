//! Shared constants for end-to-end tests
//!
//! When fake upstream data or credentials change, update only this file.

// ============================================================================
// Upstream Credentials
// ============================================================================

pub const TM_API_KEY: &str = "test-tm-key";

pub const SPOTIFY_CLIENT_ID: &str = "test-spotify-id";

pub const SPOTIFY_CLIENT_SECRET: &str = "test-spotify-secret";

pub const IPINFO_TOKEN: &str = "test-ipinfo-token";

/// Bearer token handed out by the fake accounts service
pub const SPOTIFY_ACCESS_TOKEN: &str = "fake-access-token";

// ============================================================================
// Fake Catalog Data
// ============================================================================

/// "Taylor Swift | The Eras Tour", music, on sale
pub const EVENT_1_ID: &str = "vvG1zZ9KbHcXyz";

/// "Lakers vs Celtics", sports, no images
pub const EVENT_2_ID: &str = "G5vYZ9Lakers01";

/// Event id the fake catalog answers 404 for
pub const MISSING_EVENT_ID: &str = "doesNotExist";

/// City the fake catalog has no events in
pub const NO_MATCH_CITY: &str = "NoSuchCityXYZ";

/// Keyword the fake catalog has no suggestions for
pub const NO_MATCH_KEYWORD: &str = "zzzz";

/// Keyword the fake catalog answers with more distinct names than the gateway keeps
pub const MANY_SUGGESTIONS_KEYWORD: &str = "band";

pub const ARTIST_ID: &str = "06HL4z0CvFAxyc27GXpf02";

pub const ARTIST_NAME: &str = "Taylor Swift";

/// Artist name the fake music service has no match for
pub const UNKNOWN_ARTIST: &str = "Nobody Known";

/// Artist id the fake music service fails album lookups for
pub const BROKEN_ARTIST_ID: &str = "broken-artist";

// ============================================================================
// Fake Geolocation Data
// ============================================================================

pub const EGRESS_LAT: f64 = 34.0522;

pub const EGRESS_LON: f64 = -118.2437;

/// Public address used as a forwarded client IP
pub const CLIENT_PUBLIC_IP: &str = "8.8.8.8";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

/// Upstream timeout configured on the gateway under test (seconds)
pub const UPSTREAM_TIMEOUT_SECS: u64 = 5;
