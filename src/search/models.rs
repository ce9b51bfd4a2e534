use serde::{Deserialize, Serialize};

/// A single track resolved from the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    /// Artist names in the order the API lists them
    pub artists: Vec<String>,
    pub album: String,
    /// Catalog URI (web API) or href (legacy API)
    pub uri: String,
    /// Space-separated territory codes, only reported by the legacy API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub territories: Option<String>,
}

impl Track {
    /// A track is only handed to callers once it has a name and a URI
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.uri.is_empty()
    }
}
