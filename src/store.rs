//! Joke Store Module
//!
//! In-process joke storage, optionally seeded from a JSON flat file.

use std::cmp::Ordering;
use std::path::Path;

use anyhow::{ensure, Context};
use rand::seq::IndexedRandom;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::models::{Joke, JokeFields, JokePage, ListParams, Pagination, SortDirection, SortField};
use crate::rating::{apply_rating, MAX_RATING, MIN_RATING};

/// A joke as it appears in a seed file.
///
/// Seed files may omit ids (or use numeric ones) and rating data.
#[derive(Debug, Deserialize)]
struct SeedJoke {
    #[serde(default)]
    id: Option<Value>,
    #[serde(rename = "type")]
    joke_type: String,
    setup: String,
    punchline: String,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    votes: Option<u64>,
}

impl SeedJoke {
    fn into_joke(self, position: usize) -> anyhow::Result<Joke> {
        let id = match self.id {
            Some(Value::String(id)) => id,
            Some(Value::Number(id)) => id.to_string(),
            _ => (position + 1).to_string(),
        };
        let rating = self.rating.unwrap_or(0.0);
        let votes = self.votes.unwrap_or(0);

        ensure!(
            rating.is_finite() && (MIN_RATING..=MAX_RATING).contains(&rating),
            "joke {} has rating {} outside {}..={}",
            id,
            rating,
            MIN_RATING,
            MAX_RATING
        );
        ensure!(
            votes > 0 || rating == 0.0,
            "joke {} has rating {} but no votes",
            id,
            rating
        );

        Ok(Joke {
            id,
            joke_type: self.joke_type,
            setup: self.setup,
            punchline: self.punchline,
            rating,
            votes,
        })
    }
}

// == Joke Store ==
/// Owns every joke. Jokes are never deleted.
#[derive(Debug, Default)]
pub struct JokeStore {
    jokes: Vec<Joke>,
}

impl JokeStore {
    // == Constructors ==
    pub fn new(jokes: Vec<Joke>) -> Self {
        Self { jokes }
    }

    /// Parses a JSON array of jokes.
    ///
    /// Jokes without an id are numbered `"1"`, `"2"`, ... by position.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let seeds: Vec<SeedJoke> = serde_json::from_str(json).context("Invalid joke seed JSON")?;
        let jokes = seeds
            .into_iter()
            .enumerate()
            .map(|(position, seed)| {
                seed.into_joke(position)
                    .with_context(|| format!("Invalid joke seed at position {}", position))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self::new(jokes))
    }

    /// Loads the seed file at `path`.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read jokes from {}", path.display()))?;
        let store = Self::from_json(&json)
            .with_context(|| format!("Failed to parse jokes from {}", path.display()))?;

        info!(count = store.count(), path = %path.display(), "Loaded jokes");
        Ok(store)
    }

    // == Reads ==
    pub fn count(&self) -> usize {
        self.jokes.len()
    }

    /// Distinct joke types in order of first appearance.
    pub fn types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for joke in &self.jokes {
            if !types.contains(&joke.joke_type) {
                types.push(joke.joke_type.clone());
            }
        }
        types
    }

    pub fn random_one(&self) -> Option<Joke> {
        self.jokes.choose(&mut rand::rng()).cloned()
    }

    /// Up to `n` distinct jokes in random order.
    pub fn random_n(&self, n: usize) -> Vec<Joke> {
        self.jokes
            .choose_multiple(&mut rand::rng(), n)
            .cloned()
            .collect()
    }

    /// Up to `n` distinct random jokes of the given type.
    pub fn by_type(&self, joke_type: &str, n: usize) -> Vec<Joke> {
        let matching: Vec<&Joke> = self
            .jokes
            .iter()
            .filter(|joke| joke.joke_type == joke_type)
            .collect();

        matching
            .choose_multiple(&mut rand::rng(), n)
            .map(|joke| (*joke).clone())
            .collect()
    }

    pub fn by_id(&self, id: &str) -> Option<Joke> {
        self.find(id).cloned()
    }

    /// Case-insensitive substring search over setup, punchline and type.
    pub fn search(&self, query: &str) -> Vec<Joke> {
        let needle = query.to_lowercase();
        self.jokes
            .iter()
            .filter(|joke| joke.matches(&needle))
            .cloned()
            .collect()
    }

    /// Filters, sorts and paginates the jokes.
    pub fn list(&self, params: &ListParams) -> JokePage {
        let mut jokes: Vec<&Joke> = match params.type_filter() {
            Some(joke_type) => self
                .jokes
                .iter()
                .filter(|joke| joke.joke_type == joke_type)
                .collect(),
            None => self.jokes.iter().collect(),
        };

        jokes.sort_by(|a, b| {
            let ordering = compare(a, b, params.sort);
            match params.order {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let page = params.page();
        let page_size = params.page_size();
        let pagination = Pagination::new(page, page_size, jokes.len());
        let jokes = jokes
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect();

        JokePage { jokes, pagination }
    }

    // == Writes ==
    /// Adds a joke with a fresh uuid and no votes.
    pub fn add(&mut self, fields: JokeFields) -> Joke {
        let joke = Joke::new(Uuid::new_v4().to_string(), fields);
        self.jokes.push(joke.clone());
        joke
    }

    /// Replaces the text fields of a joke. Returns None for an unknown id.
    pub fn update(&mut self, id: &str, fields: JokeFields) -> Option<Joke> {
        let joke = self.find_mut(id)?;
        joke.apply_edit(fields);
        Some(joke.clone())
    }

    /// Folds a validated vote into a joke. Returns None for an unknown id.
    pub fn rate(&mut self, id: &str, vote: f64) -> Option<Joke> {
        let joke = self.find_mut(id)?;
        joke.rating = apply_rating(joke.rating, joke.votes, vote);
        joke.votes += 1;
        Some(joke.clone())
    }

    fn find(&self, id: &str) -> Option<&Joke> {
        self.jokes.iter().find(|joke| joke.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Joke> {
        self.jokes.iter_mut().find(|joke| joke.id == id)
    }
}

fn compare(a: &Joke, b: &Joke, field: SortField) -> Ordering {
    match field {
        SortField::Setup => a.setup.to_lowercase().cmp(&b.setup.to_lowercase()),
        SortField::Type => a.joke_type.to_lowercase().cmp(&b.joke_type.to_lowercase()),
        SortField::Rating => a.rating.total_cmp(&b.rating),
    }
}
