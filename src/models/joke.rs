//! The joke entity as stored and served.

use serde::{Deserialize, Serialize};

/// A joke with its running rating.
///
/// `rating` is the mean of all `votes` cast so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joke {
    pub id: String,
    #[serde(rename = "type")]
    pub joke_type: String,
    pub setup: String,
    pub punchline: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub votes: u64,
}

impl Joke {
    /// Creates an unrated joke.
    pub fn new(id: impl Into<String>, fields: JokeFields) -> Self {
        Self {
            id: id.into(),
            joke_type: fields.joke_type,
            setup: fields.setup,
            punchline: fields.punchline,
            rating: 0.0,
            votes: 0,
        }
    }

    /// Replaces the editable text fields, leaving id and rating untouched.
    pub fn apply_edit(&mut self, fields: JokeFields) {
        self.joke_type = fields.joke_type;
        self.setup = fields.setup;
        self.punchline = fields.punchline;
    }

    /// Case-insensitive substring match on setup, punchline and type.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.setup.to_lowercase().contains(needle)
            || self.punchline.to_lowercase().contains(needle)
            || self.joke_type.to_lowercase().contains(needle)
    }
}

/// The user-editable part of a joke, already validated as non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeFields {
    pub joke_type: String,
    pub setup: String,
    pub punchline: String,
}

impl JokeFields {
    pub fn new(
        joke_type: impl Into<String>,
        setup: impl Into<String>,
        punchline: impl Into<String>,
    ) -> Self {
        Self {
            joke_type: joke_type.into(),
            setup: setup.into(),
            punchline: punchline.into(),
        }
    }
}
