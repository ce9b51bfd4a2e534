use crate::search::client::TrackError;

/// Trimmed search fields for a single track lookup
///
/// Blank fields are stored as `None`. Construction fails unless there is a
/// title and at least one of artist and album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackQuery {
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
}

impl TrackQuery {
    pub fn new(title: &str, artist: &str, album: &str) -> Result<Self, TrackError> {
        let title = title.trim();
        let artist = non_blank(artist);
        let album = non_blank(album);

        if title.is_empty() || (artist.is_none() && album.is_none()) {
            return Err(TrackError::MissingFields);
        }

        Ok(Self {
            title: title.to_string(),
            artist,
            album,
        })
    }

    /// Candidate search queries, most specific first
    ///
    /// With all three fields the artist-only and album-only queries follow
    /// the full one, so callers can fall back when the full query finds
    /// nothing.
    pub fn candidates(&self) -> Vec<String> {
        match (&self.artist, &self.album) {
            (Some(artist), Some(album)) => vec![
                build_query(&self.title, Some(artist), Some(album)),
                build_query(&self.title, Some(artist), None),
                build_query(&self.title, None, Some(album)),
            ],
            (Some(artist), None) => vec![build_query(&self.title, Some(artist), None)],
            (None, Some(album)) => vec![build_query(&self.title, None, Some(album))],
            (None, None) => Vec::new(),
        }
    }
}

/// Build the ordered candidate queries for a title and artist and/or album
pub fn build_queries(title: &str, artist: &str, album: &str) -> Result<Vec<String>, TrackError> {
    Ok(TrackQuery::new(title, artist, album)?.candidates())
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Filter expression in field order track, artist, album
fn build_query(title: &str, artist: Option<&String>, album: Option<&String>) -> String {
    let mut parts = vec![format!("track:\"{}\"", title)];

    if let Some(artist) = artist {
        parts.push(format!("artist:\"{}\"", artist));
    }
    if let Some(album) = album {
        parts.push(format!("album:\"{}\"", album));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::client::ErrorKind;

    const MISSING_FIELDS_MESSAGE: &str =
        "A title and at least one of artist and album must be passed as arguments.";

    #[test]
    fn test_all_fields_give_three_queries_in_order() {
        let queries = build_queries("asdf", "qwer", "ty").unwrap();
        assert_eq!(
            queries,
            vec![
                "track:\"asdf\" artist:\"qwer\" album:\"ty\"".to_string(),
                "track:\"asdf\" artist:\"qwer\"".to_string(),
                "track:\"asdf\" album:\"ty\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_artist_omits_artist() {
        assert_eq!(
            build_queries("asdf", "", "ty").unwrap(),
            vec!["track:\"asdf\" album:\"ty\"".to_string()]
        );
    }

    #[test]
    fn test_empty_album_omits_album() {
        assert_eq!(
            build_queries("asdf", "qwer", "").unwrap(),
            vec!["track:\"asdf\" artist:\"qwer\"".to_string()]
        );
    }

    #[test]
    fn test_fields_are_trimmed() {
        assert_eq!(
            build_queries(" asdf  ", "\t\t ", "  ty").unwrap(),
            build_queries("asdf", "", "ty").unwrap()
        );
    }

    #[test]
    fn test_empty_title_is_argument_error() {
        for title in ["", "   ", "\t\n"] {
            let err = build_queries(title, "qwer", "ty").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Argument);
            assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);
        }
    }

    #[test]
    fn test_title_only_is_argument_error() {
        let err = build_queries("asdf", "", " ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);
        assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);
    }

    #[test]
    fn test_track_query_stores_blank_fields_as_none() {
        let query = TrackQuery::new(" Uncover ", "Zara Larsson", "  ").unwrap();
        assert_eq!(query.title, "Uncover");
        assert_eq!(query.artist.as_deref(), Some("Zara Larsson"));
        assert_eq!(query.album, None);
    }

    #[test]
    fn test_queries_survive_percent_encoding() {
        let queries = build_queries("Hey Jude & Co", "The Beatles", "1 + 1 = 2?").unwrap();
        for query in queries {
            let encoded = urlencoding::encode(&query);
            assert!(!encoded.contains(' '));
            assert!(!encoded.contains('&'));
            assert_eq!(urlencoding::decode(&encoded).unwrap(), query);
        }
    }
}
