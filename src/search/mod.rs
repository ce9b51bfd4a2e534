pub mod client;
pub mod legacy;
pub mod models;
pub mod query;
pub mod web_api;

pub use client::{Catalog, ErrorKind, ParseError, TrackError, TrackSearcher};
pub use legacy::TerritoryMatcher;
pub use models::Track;
pub use query::{build_queries, TrackQuery};
