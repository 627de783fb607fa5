use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    client::{track::format_duration, ExternalUrls, Id, Image, Page},
    Error, Result,
};

pub type SavedEpisodePage = Page<SavedEpisode>;

/// An episode in the current user's library.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEpisode {
    /// When the episode was saved, as an ISO 8601 UTC timestamp
    /// (`YYYY-MM-DDTHH:MM:SSZ`). See [`SavedEpisode::added_at_time`].
    pub added_at: String,
    pub episode: FullEpisode,
}

impl SavedEpisode {
    pub fn added_at_time(&self) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.added_at)
            .map(|time| time.with_timezone(&Utc))
            .map_err(|_| Error::Timestamp {
                value: self.added_at.clone(),
            })
    }

    pub fn columns(&self) -> Vec<String> {
        vec![
            self.episode.name.clone(),
            self.episode.show.name.clone(),
            self.episode.release_date.clone(),
            format_duration(self.episode.duration_ms),
            self.added_at.clone(),
            self.episode.id.to_string(),
        ]
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullEpisode {
    pub audio_preview_url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub html_description: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub is_externally_hosted: bool,
    #[serde(default)]
    pub is_playable: bool,
    pub language: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub release_date_precision: String,
    pub resume_point: Option<ResumePoint>,
    #[serde(default)]
    pub show: SimpleShow,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub uri: String,
}

impl FullEpisode {
    /// The release date, filled out to a full day according to
    /// `release_date_precision`.
    pub fn release_date_time(&self) -> Option<NaiveDate> {
        let date = match self.release_date_precision.as_str() {
            "year" => format!("{}-01-01", self.release_date),
            "month" => format!("{}-01", self.release_date),
            _ => self.release_date.clone(),
        };

        NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok()
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumePoint {
    pub fully_played: bool,
    pub resume_position_ms: u64,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleShow {
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub is_externally_hosted: Option<bool>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub publisher: String,
    pub total_episodes: Option<u32>,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const SAVED_EPISODES: &str = r#"{
        "href": "https://api.spotify.com/v1/me/episodes?offset=0&limit=1",
        "limit": 1,
        "next": "https://api.spotify.com/v1/me/episodes?offset=1&limit=1",
        "offset": 0,
        "previous": null,
        "total": 3,
        "items": [
            {
                "added_at": "2023-04-01T12:30:05Z",
                "episode": {
                    "audio_preview_url": "https://podz-content.spotifycdn.com/audio/clips/preview.mp3",
                    "description": "A Spotify podcast sharing fresh insights on important topics of the moment.",
                    "html_description": "<p>A Spotify podcast sharing fresh insights.</p>",
                    "duration_ms": 1686230,
                    "explicit": false,
                    "external_urls": {"spotify": "https://open.spotify.com/episode/512ojhOuo1ktJprKbVcKyQ"},
                    "href": "https://api.spotify.com/v1/episodes/512ojhOuo1ktJprKbVcKyQ",
                    "id": "512ojhOuo1ktJprKbVcKyQ",
                    "images": [{"url": "https://i.scdn.co/image/ab67656300005f1f", "height": 640, "width": 640}],
                    "is_externally_hosted": false,
                    "is_playable": true,
                    "language": "en",
                    "languages": ["en"],
                    "name": "Starting Your Own Podcast: Tips, Tricks, and Advice",
                    "release_date": "2023-03",
                    "release_date_precision": "month",
                    "resume_point": {"fully_played": false, "resume_position_ms": 60000},
                    "show": {
                        "available_markets": ["SE", "US"],
                        "description": "Spotify Original",
                        "explicit": false,
                        "external_urls": {},
                        "href": "https://api.spotify.com/v1/shows/38bS44xjbVVZ3No3ByF1dJ",
                        "id": "38bS44xjbVVZ3No3ByF1dJ",
                        "images": [],
                        "is_externally_hosted": false,
                        "languages": ["en"],
                        "media_type": "audio",
                        "name": "Spotify Spotlight",
                        "publisher": "Spotify",
                        "total_episodes": 42,
                        "type": "show",
                        "uri": "spotify:show:38bS44xjbVVZ3No3ByF1dJ"
                    },
                    "type": "episode",
                    "uri": "spotify:episode:512ojhOuo1ktJprKbVcKyQ"
                }
            }
        ]
    }"#;

    #[test]
    fn decodes_saved_episode_page() {
        let page: SavedEpisodePage = serde_json::from_str(SAVED_EPISODES).unwrap();

        assert_eq!(page.total, 3);
        assert!(page.has_next());
        assert_eq!(page.items.len(), 1);

        let saved = &page.items[0];
        assert_eq!(saved.episode.id, Id::from("512ojhOuo1ktJprKbVcKyQ"));
        assert_eq!(saved.episode.show.name, "Spotify Spotlight");
        assert_eq!(
            saved.episode.resume_point,
            Some(ResumePoint {
                fully_played: false,
                resume_position_ms: 60000
            })
        );
    }

    #[test]
    fn parses_added_at() {
        let page: SavedEpisodePage = serde_json::from_str(SAVED_EPISODES).unwrap();
        let added_at = page.items[0].added_at_time().unwrap();

        assert_eq!(added_at.year(), 2023);
        assert_eq!(added_at.month(), 4);
        assert_eq!(added_at.hour(), 12);
        assert_eq!(added_at.second(), 5);
    }

    #[test]
    fn rejects_malformed_added_at() {
        let saved = SavedEpisode {
            added_at: "yesterday".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            saved.added_at_time(),
            Err(Error::Timestamp { value }) if value == "yesterday"
        ));
    }

    #[test]
    fn release_date_follows_precision() {
        let mut episode = FullEpisode {
            release_date: "2023".to_string(),
            release_date_precision: "year".to_string(),
            ..Default::default()
        };
        assert_eq!(
            episode.release_date_time(),
            NaiveDate::from_ymd_opt(2023, 1, 1)
        );

        episode.release_date = "2023-03".to_string();
        episode.release_date_precision = "month".to_string();
        assert_eq!(
            episode.release_date_time(),
            NaiveDate::from_ymd_opt(2023, 3, 1)
        );

        episode.release_date = "2023-03-17".to_string();
        episode.release_date_precision = "day".to_string();
        assert_eq!(
            episode.release_date_time(),
            NaiveDate::from_ymd_opt(2023, 3, 17)
        );

        episode.release_date = "soon".to_string();
        assert_eq!(episode.release_date_time(), None);
    }

    #[test]
    fn missing_episode_fields_decode_as_defaults() {
        let saved: SavedEpisode = serde_json::from_str(
            r#"{
                "added_at": "2023-04-01T12:30:05Z",
                "episode": {"release_date": "2023-03-17", "show": {}}
            }"#,
        )
        .unwrap();

        assert_eq!(saved.episode.duration_ms, 0);
        assert_eq!(saved.episode.id, Id::default());
        assert!(saved.episode.name.is_empty());
        assert!(saved.episode.show.name.is_empty());
        assert_eq!(saved.columns()[3], "0:00");
    }
}
