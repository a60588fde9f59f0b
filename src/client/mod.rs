//! Client application logic, independent of any UI toolkit.

mod api;
mod app;
mod debounce;
mod detail;
mod detail_view;
mod favorites;
mod search;
mod suggestions;
mod toast;

pub use api::{GatewayApi, GatewayClient, SearchParams};
pub use app::{EventApp, SearchError, LOCATION_FAILED_MESSAGE};
pub use debounce::{Debouncer, SUGGEST_DEBOUNCE};
pub use detail::{EventDetail, ShareLinks, VenueSection};
pub use detail_view::{ArtistPanel, DetailTab, DetailView};
pub use favorites::{FavoriteToggle, FavoritesCache};
pub use search::{category_label, date_time_label, SearchForm, SearchSession};
pub use suggestions::{SuggestionBox, SuggestionState, MAX_VISIBLE_SUGGESTIONS};
pub use toast::{Toast, ToastAction, ToastBus, ToastEvent, ToastKind, DEFAULT_TOAST_DURATION};
