// Library exports for the binary and integration tests

pub mod config;
pub mod search;

pub use search::{
    build_queries, Catalog, ErrorKind, TerritoryMatcher, Track, TrackError, TrackQuery,
    TrackSearcher,
};
