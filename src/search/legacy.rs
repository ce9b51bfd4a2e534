//! Legacy XML metadata API
//!
//! Results from this API are gated by territory: every track lists the
//! territories its album is available in, and only tracks playable in the
//! preferred territory (or worldwide) are acceptable.

use crate::search::client::{ParseError, TrackError};
use crate::search::models::Track;
use regex::{Regex, RegexBuilder};
use roxmltree::{Document, Node};

/// Matches a territory list against one preferred territory or "worldwide"
#[derive(Debug, Clone)]
pub struct TerritoryMatcher {
    territory: String,
    pattern: Regex,
}

impl TerritoryMatcher {
    /// Compile the matcher for a two-letter territory code such as "SE"
    pub fn new(territory: &str) -> Result<Self, TrackError> {
        let territory = territory.trim();
        if territory.len() != 2 || !territory.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(TrackError::InvalidTerritory(territory.to_string()));
        }

        let pattern = RegexBuilder::new(&format!(
            r"\b(?:{}|worldwide)\b",
            regex::escape(territory)
        ))
        .case_insensitive(true)
        .build()
        .map_err(|_| TrackError::InvalidTerritory(territory.to_string()))?;

        Ok(Self {
            territory: territory.to_ascii_uppercase(),
            pattern,
        })
    }

    pub fn territory(&self) -> &str {
        &self.territory
    }

    pub fn matches(&self, territories: &str) -> bool {
        self.pattern.is_match(territories)
    }

    /// First complete track available in the territory, in response order
    pub fn select_track(&self, tracks: Vec<Track>) -> Option<Track> {
        tracks.into_iter().find(|track| {
            track.is_complete()
                && track
                    .territories
                    .as_deref()
                    .is_some_and(|territories| self.matches(territories))
        })
    }
}

/// Parse a `<tracks>` document into tracks, in document order
pub fn extract_tracks(body: &str) -> Result<Vec<Track>, ParseError> {
    let doc = Document::parse(body)?;
    let root = doc.root_element();

    if !root.has_tag_name("tracks") {
        return Err(ParseError::UnexpectedRoot(
            root.tag_name().name().to_string(),
        ));
    }

    Ok(root
        .children()
        .filter(|n| n.has_tag_name("track"))
        .map(parse_track)
        .collect())
}

fn parse_track(node: Node) -> Track {
    let album = child(node, "album");

    let territories = album
        .and_then(|a| child(a, "availability"))
        .and_then(|a| child(a, "territories"))
        .map(|t| t.text().unwrap_or_default().trim().to_string());

    Track {
        name: child_text(node, "name"),
        artists: node
            .children()
            .filter(|n| n.has_tag_name("artist"))
            .map(|a| child_text(a, "name"))
            .collect(),
        album: album.map(|a| child_text(a, "name")).unwrap_or_default(),
        uri: node.attribute("href").unwrap_or_default().to_string(),
        territories,
    }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn child_text(node: Node, name: &str) -> String {
    child(node, name)
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}
