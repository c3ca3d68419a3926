use serde::{Deserialize, Serialize};

/// A player scraped from the roster listing.
///
/// `number` and `age` are optional because they come from free-form page text;
/// a failed parse leaves them unset instead of dropping the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub number: Option<i32>,
    pub name: String,
    /// Empty when the roster entry lists no position
    pub position: String,
    /// Absolute URL of the player's profile page
    pub profile_url: String,
    pub age: Option<i32>,
}

impl PlayerRecord {
    pub fn new(
        number: Option<i32>,
        name: impl Into<String>,
        position: impl Into<String>,
        profile_url: impl Into<String>,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            position: position.into(),
            profile_url: profile_url.into(),
            age: None,
        }
    }

    /// Returns a copy of this record with the age set
    pub fn with_age(mut self, age: Option<i32>) -> Self {
        self.age = age;
        self
    }
}
