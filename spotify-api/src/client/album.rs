use serde::{Deserialize, Serialize};

use crate::client::{artist::SimpleArtist, ExternalUrls, Id, Image};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleAlbum {
    #[serde(default)]
    pub album_type: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub href: String,
    pub id: Option<Id>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub name: String,
    pub release_date: Option<String>,
    pub release_date_precision: Option<String>,
    pub total_tracks: Option<u32>,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub uri: String,
}
