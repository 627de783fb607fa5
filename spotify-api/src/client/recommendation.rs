use serde::{Deserialize, Serialize};

use crate::{
    client::{join_ids, options::Params, track::SimpleTrack, Id, Numeric},
    Error, Result,
};

/// Maximum number of seeds the API accepts for a recommendation request.
pub const MAX_NUMBER_OF_SEEDS: usize = 5;

/// Artists, tracks and genres to base recommendations on.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Seeds {
    pub artists: Vec<Id>,
    pub tracks: Vec<Id>,
    pub genres: Vec<String>,
}

impl Seeds {
    pub fn count(&self) -> usize {
        self.artists.len() + self.tracks.len() + self.genres.len()
    }

    pub fn validate(&self) -> Result<()> {
        match self.count() {
            0 => Err(Error::NoSeeds),
            count if count > MAX_NUMBER_OF_SEEDS => Err(Error::TooManySeeds {
                max: MAX_NUMBER_OF_SEEDS,
                count,
            }),
            _ => Ok(()),
        }
    }

    /// Adds a `seed_*` parameter for each kind of seed that is present.
    pub fn set_values(&self, params: &mut Params) {
        if !self.artists.is_empty() {
            params.set("seed_artists", join_ids(&self.artists));
        }
        if !self.tracks.is_empty() {
            params.set("seed_tracks", join_ids(&self.tracks));
        }
        if !self.genres.is_empty() {
            params.set("seed_genres", self.genres.join(","));
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub seeds: Vec<RecommendationSeed>,
    #[serde(default)]
    pub tracks: Vec<SimpleTrack>,
}

impl From<Recommendations> for Vec<Vec<String>> {
    fn from(recommendations: Recommendations) -> Self {
        recommendations
            .tracks
            .iter()
            .map(SimpleTrack::columns)
            .collect::<Vec<Vec<String>>>()
    }
}

/// A seed as processed by the API, with the size of the candidate pool at
/// each stage.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendationSeed {
    pub after_filtering_size: Numeric,
    pub after_relinking_size: Numeric,
    #[serde(rename = "href")]
    pub endpoint: Option<String>,
    pub id: Id,
    pub initial_pool_size: Numeric,
    #[serde(rename = "type")]
    pub seed_type: SeedType,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeedType {
    Artist,
    Track,
    Genre,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Response of the available genre seeds endpoint.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreSeeds {
    #[serde(default)]
    pub genres: Vec<String>,
}
