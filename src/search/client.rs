use crate::search::legacy::{self, TerritoryMatcher};
use crate::search::models::Track;
use crate::search::query::TrackQuery;
use crate::search::web_api;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const WEB_API_SEARCH_URL: &str = "https://api.spotify.com/v1/search";
pub const LEGACY_SEARCH_URL: &str = "http://ws.spotify.com/search/1/track";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("trackmatch/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("A title and at least one of artist and album must be passed as arguments.")]
    MissingFields,
    #[error("Invalid territory code: '{0}'")]
    InvalidTerritory(String),
    #[error("HTTP request failed: {0}")]
    Unexpected(#[from] ReqwestError),
    #[error("GET request returned status {0} rather than 200 or 304")]
    UnexpectedStatus(u16),
    #[error("unable to parse response body")]
    Parse(#[from] ParseError),
    #[error("Rate limit exceeded")]
    RateLimit,
}

/// Broad classification of a `TrackError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed something unusable
    Argument,
    /// Local or transport failure not attributable to the catalog
    Unexpected,
    /// The catalog answered, but not with something we understand
    ExternalService,
    /// The catalog is throttling us
    RateLimit,
}

impl TrackError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackError::MissingFields | TrackError::InvalidTerritory(_) => ErrorKind::Argument,
            TrackError::Unexpected(_) => ErrorKind::Unexpected,
            TrackError::UnexpectedStatus(_) | TrackError::Parse(_) => ErrorKind::ExternalService,
            TrackError::RateLimit => ErrorKind::RateLimit,
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("unexpected root element <{0}>, expected <tracks>")]
    UnexpectedRoot(String),
}

/// Which catalog API the searcher talks to, and how it picks a track
#[derive(Debug, Clone)]
pub enum Catalog {
    /// JSON web API, first result wins
    WebApi,
    /// XML metadata API, first track available in the territory wins
    Legacy(TerritoryMatcher),
}

impl Catalog {
    pub fn legacy(territory: &str) -> Result<Self, TrackError> {
        Ok(Catalog::Legacy(TerritoryMatcher::new(territory)?))
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Catalog::WebApi => WEB_API_SEARCH_URL,
            Catalog::Legacy(_) => LEGACY_SEARCH_URL,
        }
    }

    /// Full request URL for an unencoded search query
    pub fn search_url(&self, base_url: &str, query: &str) -> String {
        let encoded = urlencoding::encode(query);
        match self {
            Catalog::WebApi => format!("{}?q={}&type=track&limit=1", base_url, encoded),
            Catalog::Legacy(_) => format!("{}?q={}", base_url, encoded),
        }
    }

    /// Parse a response body and pick the track to return, if any
    pub fn select_track(&self, body: &str) -> Result<Option<Track>, TrackError> {
        match self {
            Catalog::WebApi => {
                let tracks = web_api::extract_tracks(body)?;
                debug!("Web API returned {} track(s)", tracks.len());
                Ok(web_api::select_track(tracks))
            }
            Catalog::Legacy(matcher) => {
                let tracks = legacy::extract_tracks(body)?;
                debug!(
                    "Legacy API returned {} track(s), matching territory {}",
                    tracks.len(),
                    matcher.territory()
                );
                Ok(matcher.select_track(tracks))
            }
        }
    }
}

/// Resolves a single track from title, artist and album
///
/// Holds only immutable configuration, so clones can be shared freely
/// between tasks.
#[derive(Clone, Debug)]
pub struct TrackSearcher {
    client: Client,
    base_url: String,
    catalog: Catalog,
}

impl TrackSearcher {
    pub fn new(catalog: Catalog) -> Result<Self, TrackError> {
        let base_url = catalog.default_base_url().to_string();
        Self::with_options(catalog, base_url, DEFAULT_TIMEOUT)
    }

    /// Create a searcher against a specific endpoint with a request timeout
    pub fn with_options(
        catalog: Catalog,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TrackError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            catalog,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn search_url(&self, query: &str) -> String {
        self.catalog.search_url(&self.base_url, query)
    }

    /// Find the closest matching track
    ///
    /// Candidate queries are tried most specific first; the first one that
    /// yields a track wins. `Ok(None)` means the catalog had nothing
    /// acceptable for any of them. Errors end the search immediately.
    pub async fn find(
        &self,
        title: &str,
        artist: &str,
        album: &str,
    ) -> Result<Option<Track>, TrackError> {
        let query = TrackQuery::new(title, artist, album)?;
        let candidates = query.candidates();

        info!(
            "🔎 Track search: '{}' (artist: {:?}, album: {:?}), {} candidate queries",
            query.title,
            query.artist,
            query.album,
            candidates.len()
        );

        for (i, candidate) in candidates.iter().enumerate() {
            let url = self.search_url(candidate);
            let body = self.fetch_body(&url).await?;

            if let Some(track) = self.catalog.select_track(&body)? {
                info!("✓ Found '{}' ({}) with query {}", track.name, track.uri, i + 1);
                return Ok(Some(track));
            }

            debug!("No track for query {}: {}", i + 1, candidate);
        }

        info!("No matching track found for '{}'", query.title);
        Ok(None)
    }

    /// GET a URL and return the body, mapping status codes to errors
    pub async fn fetch_body(&self, url: &str) -> Result<String, TrackError> {
        info!("📡 Catalog API: GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == StatusCode::FORBIDDEN {
            warn!("✗ Catalog rate limit exceeded");
            return Err(TrackError::RateLimit);
        }
        if status != StatusCode::OK && status != StatusCode::NOT_MODIFIED {
            warn!("✗ Catalog API error: {}", status);
            return Err(TrackError::UnexpectedStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
