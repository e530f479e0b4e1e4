//! Domain and transport models for the joke API
//!
//! `joke` holds the stored entity; `requests`/`responses` are the DTOs
//! (Data Transfer Objects) for HTTP bodies and query strings.

pub mod joke;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use joke::{Joke, JokeFields};
pub use requests::{JokeRequest, ListParams, RateRequest, SearchParams, SortDirection, SortField};
pub use responses::{ClearResponse, HealthResponse, JokePage, Pagination};
