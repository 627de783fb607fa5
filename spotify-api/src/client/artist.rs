use serde::{Deserialize, Serialize};

use crate::client::{ExternalUrls, Id};

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleArtist {
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub href: String,
    pub id: Option<Id>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub uri: String,
}

/// Comma separated artist names, as shown in listings.
pub fn artist_names(artists: &[SimpleArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<&str>>()
        .join(", ")
}
