mod client;
pub mod models;

pub use client::TicketmasterClient;
pub use models::{pick_cover_image, TmEvent, TmImage, TmVenue};
