pub mod players;

pub use players::PlayerRecord;
