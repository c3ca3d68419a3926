pub mod fetch;
pub mod http_client;
pub mod models;
pub mod profile;
pub mod roster;
pub mod urls;

pub use fetch::{HttpPageSource, PageSource};
pub use models::PlayerRecord;
pub use profile::{enrich_ages, parse_age};
pub use roster::extract_players;
