use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

mod cli_style;

use cli_style::*;
use event_finder_server::client::{
    category_label, date_time_label, ArtistPanel, DetailTab, DetailView, EventApp, GatewayClient,
    ToastBus, ToastEvent,
};
use event_finder_server::events::EventSummary;

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Root URL of the event finder gateway.
    #[clap(long, default_value = "http://localhost:8080")]
    pub gateway_url: String,

    #[clap(long, default_value_t = 15)]
    pub timeout_sec: u64,
}

#[derive(Parser)]
#[command(styles=get_styles(),name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Searches events around a city, or around you with --auto.
    Search {
        keyword: String,

        /// all, music, sports, "arts & theatre", film or miscellaneous.
        #[clap(long, default_value = "all")]
        category: String,

        /// Radius in miles.
        #[clap(long)]
        distance: Option<u32>,

        #[clap(long)]
        city: Option<String>,

        /// Use the auto-detected location instead of --city.
        #[clap(long)]
        auto: bool,
    },

    /// Shows keyword suggestions.
    Suggest { text: String },

    /// Opens the details of an event, by result number or event id.
    Details { event: String },

    /// Switches tab in the open event details.
    Tab { tab: DetailTab },

    /// Lists favorites, as stored on the server.
    Favorites,

    /// Toggles a favorite, by result number or event id. Without argument
    /// toggles the open event details.
    Fav { event: Option<String> },

    /// Removes a favorite by event id.
    Unfav { id: String },

    /// Undoes the last favorite removal.
    Undo,

    /// Auto-detects your location from your IP address.
    Location,

    /// Shows the last search again.
    Back,

    /// Close this program.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

const SUGGESTION_WAIT_STEP: Duration = Duration::from_millis(50);

fn print_events(events: &[EventSummary], app: &EventApp) {
    if events.is_empty() {
        print_empty_list("No results available");
        return;
    }
    for (i, event) in events.iter().enumerate() {
        let mut line = event.name.clone();
        if let Some(when) = date_time_label(event) {
            line.push_str(&format!(" | {}", when));
        }
        if let Some(category) = category_label(&event.category) {
            line.push_str(&format!(" | {}", category));
        }
        if !event.venue.is_empty() {
            line.push_str(&format!(" @ {}", event.venue));
        }
        print_list_item(i + 1, &line, app.favorites().is_favorite(&event.id));
    }
}

fn print_detail(view: &DetailView) {
    let detail = &view.detail;
    match view.active_tab {
        DetailTab::Info => {
            print_section_header(&detail.name);
            print_key_value("Date", &format!("{} {}", detail.date, detail.time));
            print_key_value("Artist/Team", &detail.artist_team);
            print_key_value("Venue", &detail.venue);
            print_key_value("Genres", &detail.genres);
            print_key_value("Ticket Status", detail.ticket_status.label());
            print_key_value("Buy Tickets", &detail.buy_ticket_url);
            if let Some(seatmap) = &detail.seatmap_url {
                print_key_value("Seat Map", seatmap);
            }
            if let Some(links) = detail.share_links() {
                print_key_value("Share on Facebook", &links.facebook);
                print_key_value("Share on Twitter", &links.twitter);
            }
        }
        DetailTab::Artist => {
            print_section_header("Artist");
            if !detail.is_music() {
                print_info("Not a music event, artist data may not match");
            }
            match &view.artist {
                ArtistPanel::NotLoaded => print_empty_list("Not loaded"),
                ArtistPanel::Failed(message) => print_error(message),
                ArtistPanel::Loaded {
                    artist,
                    albums,
                    albums_error,
                } => {
                    print_key_value("Name", &artist.name);
                    print_key_value("Followers", &artist.followers.to_string());
                    print_key_value(
                        "Popularity",
                        &artist
                            .popularity
                            .map(|p| p.to_string())
                            .unwrap_or_else(|| "N/A".to_string()),
                    );
                    print_key_value("Genres", &artist.genres.join(", "));
                    print_key_value("Spotify", &artist.spotify_url);
                    if let Some(message) = albums_error {
                        print_error(message);
                    }
                    for (i, album) in albums.iter().enumerate() {
                        let line = format!(
                            "{} ({}, {} tracks)",
                            album.name, album.release_date, album.total_tracks
                        );
                        print_list_item(i + 1, &line, false);
                    }
                }
            }
        }
        DetailTab::Venue => {
            let venue = &detail.venue_section;
            print_section_header(&detail.venue);
            print_key_value("Address", &venue.address_line);
            if let Some(url) = &venue.google_maps_url {
                print_key_value("Map", url);
            }
            if let Some(url) = &venue.see_events_url {
                print_key_value("More events", url);
            }
            for (key, value) in [
                ("Parking", &venue.parking),
                ("General Rule", &venue.general_rule),
                ("Child Rule", &venue.child_rule),
            ] {
                if !value.is_empty() {
                    print_key_value(key, value);
                }
            }
        }
    }
}

/// A result number (1-based) picks from the last results; anything else is
/// taken as an event id.
fn resolve_event(app: &EventApp, reference: &str) -> EventSummary {
    reference
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| app.results().get(i))
        .or_else(|| app.favorites().items().iter().find(|e| e.id == reference))
        .or_else(|| app.results().iter().find(|e| e.id == reference))
        .cloned()
        .unwrap_or_else(|| EventSummary {
            id: reference.to_string(),
            name: reference.to_string(),
            ..Default::default()
        })
}

async fn execute_command(line: String, app: &mut EventApp) -> CommandExecutionResult {
    if line.is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    match cli {
        Ok(cli) => match cli.command {
            InnerCommand::Search {
                keyword,
                category,
                distance,
                city,
                auto,
            } => {
                app.form.keyword = keyword;
                app.form.category = category;
                app.form.distance = distance;
                if auto != app.form.auto_detect {
                    app.set_auto_detect(auto).await;
                }
                if let Some(city) = city {
                    app.form.city = city;
                }
                if let Some(message) = app.location_error() {
                    print_error(message);
                }
                match app.search().await {
                    Ok(events) => {
                        let events = events.to_vec();
                        print_section_header("Results");
                        print_events(&events, app);
                    }
                    Err(e) => return CommandExecutionResult::Error(e.to_string()),
                }
            }
            InnerCommand::Suggest { text } => {
                let suggestions = app.suggestions();
                suggestions.on_input(&text);
                while suggestions.is_pending() {
                    tokio::time::sleep(SUGGESTION_WAIT_STEP).await;
                }
                let state = suggestions.snapshot();
                if state.open {
                    for (i, item) in state.items.iter().enumerate() {
                        print_list_item(i + 1, item, false);
                    }
                } else {
                    print_empty_list("No suggestions");
                }
            }
            InnerCommand::Details { event } => {
                let id = resolve_event(app, &event).id;
                match app.open_detail(&id).await {
                    Ok(view) => print_detail(view),
                    Err(e) => {
                        return CommandExecutionResult::Error(format!(
                            "Failed to load event details: {:#}",
                            e
                        ))
                    }
                }
            }
            InnerCommand::Tab { tab } => match app.set_detail_tab(tab).await {
                Some(view) => print_detail(view),
                None => return CommandExecutionResult::Error("No event open".to_string()),
            },
            InnerCommand::Favorites => {
                let favorites = app.refresh_favorites().await.to_vec();
                print_section_header("Favorites");
                print_events(&favorites, app);
            }
            InnerCommand::Fav { event: Some(event) } => {
                let event = resolve_event(app, &event);
                app.toggle_favorite(event).await;
            }
            InnerCommand::Fav { event: None } => {
                if app.toggle_detail_favorite().await.is_none() {
                    return CommandExecutionResult::Error("No event open".to_string());
                }
            }
            InnerCommand::Unfav { id } => {
                if !app.favorites().is_favorite(&id) {
                    return CommandExecutionResult::Error(format!("{} is not a favorite", id));
                }
                let event = resolve_event(app, &id);
                app.toggle_favorite(event).await;
            }
            InnerCommand::Undo => {
                if !app.undo().await {
                    print_empty_list("Nothing to undo");
                }
            }
            InnerCommand::Location => {
                app.set_auto_detect(true).await;
                match (app.form.lat, app.form.lon, app.location_error()) {
                    (Some(lat), Some(lon), _) => {
                        print_success(&format!("Located at {}, {}", lat, lon))
                    }
                    (_, _, Some(message)) => print_error(message),
                    _ => {}
                }
            }
            InnerCommand::Back => {
                if app.restore_search() {
                    let results = app.results().to_vec();
                    print_section_header(&format!("Results for {}", app.form.keyword));
                    print_events(&results, app);
                } else {
                    print_empty_list("No previous search");
                }
            }
            InnerCommand::Exit => return CommandExecutionResult::Exit,
        },
        Err(e) => {
            println!("{}", e);
        }
    }
    CommandExecutionResult::Ok
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

/// Prints toasts as they are published.
fn spawn_toast_printer(bus: &ToastBus) {
    let mut toasts = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match toasts.recv().await {
                Ok(ToastEvent::Show(toast)) => print_toast(&toast),
                Ok(ToastEvent::Clear) => {}
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let api = Arc::new(GatewayClient::new(&cli_args.gateway_url, cli_args.timeout_sec)?);
    let bus = ToastBus::new();
    spawn_toast_printer(&bus);
    let mut app = EventApp::new(api, bus);
    app.init().await;

    print_banner(&cli_args.gateway_url);
    InnerCli::command().print_long_help()?;

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<MyHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(MyHelper::new()));

    let prompt = get_prompt();
    loop {
        let readline = rl.readline(&prompt);

        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(line, &mut app).await {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => {
                        break;
                    }
                    CommandExecutionResult::Error(err) => {
                        print_error(&err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                println!("Error: {:?}", e);
                break;
            }
        }
    }
    Ok(())
}
