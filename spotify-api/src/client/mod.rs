use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display};

pub mod album;
pub mod api;
pub mod artist;
pub mod attributes;
pub mod episode;
pub mod options;
pub mod recommendation;
pub mod track;

pub const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1/";

#[derive(Default, Debug, Clone)]
pub struct ApiConfig {
    pub access_token: Option<String>,
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

/// A Spotify base-62 identifier for an artist, track, episode, etc.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Id {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Joins ids the way the API expects them in an `ids` style parameter.
pub fn join_ids(ids: &[Id]) -> String {
    ids.iter().map(Id::as_str).collect::<Vec<&str>>().join(",")
}

/// A JSON number that the API sometimes sends as an integer and sometimes
/// as a float.
#[derive(Default, Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Numeric(pub f64);

impl Numeric {
    pub fn as_u64(&self) -> u64 {
        if self.0.is_sign_negative() {
            0
        } else {
            self.0 as u64
        }
    }
}

impl Display for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type ExternalUrls = HashMap<String, String>;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// One page of a paginated collection.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub href: String,
    pub limit: u32,
    pub offset: u32,
    pub total: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}
