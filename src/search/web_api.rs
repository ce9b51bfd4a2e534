use crate::search::client::ParseError;
use crate::search::models::Track;
use serde::Deserialize;

/// Web API search response wrapper
#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<TrackItem>,
}

#[derive(Debug, Deserialize)]
struct TrackItem {
    uri: String,
    name: String,
    album: AlbumRef,
    #[serde(default)]
    artists: Vec<ArtistRef>,
}

#[derive(Debug, Deserialize)]
struct AlbumRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ArtistRef {
    name: String,
}

impl From<TrackItem> for Track {
    fn from(item: TrackItem) -> Self {
        Track {
            name: item.name,
            artists: item.artists.into_iter().map(|a| a.name).collect(),
            album: item.album.name,
            uri: item.uri,
            territories: None,
        }
    }
}

/// Parse a search response into tracks, in API order
pub fn extract_tracks(body: &str) -> Result<Vec<Track>, ParseError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.tracks.items.into_iter().map(Track::from).collect())
}

/// The web API ranks results itself, so the first one is taken as is
pub fn select_track(tracks: Vec<Track>) -> Option<Track> {
    tracks.into_iter().next().filter(Track::is_complete)
}
