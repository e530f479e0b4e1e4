//! API Module
//!
//! HTTP handlers and routing for the joke REST API.
//!
//! # Endpoints
//! - `GET /random_joke`, `/random_ten`, `/jokes/random`, `/jokes/ten` - Random jokes
//! - `GET /jokes/random/:num` - `num` random jokes
//! - `GET /jokes/:type/random`, `/jokes/:type/ten` - Random jokes of one type
//! - `GET /jokes/search?q=` - Substring search
//! - `GET /jokes` - Filtered, sorted, paginated listing
//! - `GET /jokes/:id`, `POST /jokes`, `PUT /jokes/:id` - Lookup, add, edit
//! - `POST /jokes/:id/rate` - Rate a joke
//! - `GET /types` - Joke type catalog
//! - `GET /cache/stats`, `DELETE /cache` - Response cache inspection
//! - `GET /health`, `GET /ping` - Liveness

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
