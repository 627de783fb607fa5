use crate::client::{
    album::SimpleAlbum,
    artist::{artist_names, SimpleArtist},
    ExternalUrls, Id,
};
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleTrack {
    pub album: Option<SimpleAlbum>,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub disc_number: u32,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub href: String,
    pub id: Option<Id>,
    pub is_local: Option<bool>,
    pub is_playable: Option<bool>,
    #[serde(default)]
    pub name: String,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub track_number: u32,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub uri: String,
}

impl SimpleTrack {
    pub fn columns(&self) -> Vec<String> {
        let explicit_icon = if self.explicit { " e" } else { "" };

        vec![
            format!("{}{}", self.name, explicit_icon),
            artist_names(&self.artists),
            self.album
                .as_ref()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            format_duration(self.duration_ms),
            self.id.as_ref().map(Id::to_string).unwrap_or_default(),
        ]
    }
}

/// `m:ss` or `h:mm:ss` for a duration in milliseconds.
pub fn format_duration(duration_ms: u64) -> String {
    let total_seconds = duration_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
