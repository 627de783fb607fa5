//! Tunable track attributes used to narrow recommendations.
//!
//! Every attribute can be bounded with a `min_` and `max_` value or aimed at
//! with a `target_` value:
//!
//! ```
//! use spotifyrs_api::client::attributes::TrackAttributes;
//!
//! let attributes = TrackAttributes::new()
//!     .target_tempo(120.0)
//!     .min_energy(0.4)
//!     .max_popularity(50);
//! ```

use std::collections::BTreeMap;

use crate::{client::options::Params, Error, Result};

#[derive(Default, Debug, Clone, PartialEq)]
pub struct TrackAttributes {
    int_attributes: BTreeMap<String, i64>,
    float_attributes: BTreeMap<String, f64>,
}

const BOUNDS: [&str; 3] = ["min_", "max_", "target_"];

macro_rules! int_attributes {
    ($($name:literal => $min:ident, $max:ident, $target:ident;)*) => {
        impl TrackAttributes {
            $(
                #[doc = concat!("Minimum `", $name, "` of recommended tracks.")]
                pub fn $min(self, value: i64) -> Self {
                    self.with_int(concat!("min_", $name), value)
                }

                #[doc = concat!("Maximum `", $name, "` of recommended tracks.")]
                pub fn $max(self, value: i64) -> Self {
                    self.with_int(concat!("max_", $name), value)
                }

                #[doc = concat!("Target `", $name, "` of recommended tracks.")]
                pub fn $target(self, value: i64) -> Self {
                    self.with_int(concat!("target_", $name), value)
                }
            )*
        }

        pub const INT_ATTRIBUTES: &[&str] = &[$($name),*];
    };
}

macro_rules! float_attributes {
    ($($name:literal => $min:ident, $max:ident, $target:ident;)*) => {
        impl TrackAttributes {
            $(
                #[doc = concat!("Minimum `", $name, "` of recommended tracks.")]
                pub fn $min(self, value: f64) -> Self {
                    self.with_float(concat!("min_", $name), value)
                }

                #[doc = concat!("Maximum `", $name, "` of recommended tracks.")]
                pub fn $max(self, value: f64) -> Self {
                    self.with_float(concat!("max_", $name), value)
                }

                #[doc = concat!("Target `", $name, "` of recommended tracks.")]
                pub fn $target(self, value: f64) -> Self {
                    self.with_float(concat!("target_", $name), value)
                }
            )*
        }

        pub const FLOAT_ATTRIBUTES: &[&str] = &[$($name),*];
    };
}

int_attributes! {
    "duration_ms" => min_duration_ms, max_duration_ms, target_duration_ms;
    "key" => min_key, max_key, target_key;
    "mode" => min_mode, max_mode, target_mode;
    "popularity" => min_popularity, max_popularity, target_popularity;
    "time_signature" => min_time_signature, max_time_signature, target_time_signature;
}

float_attributes! {
    "acousticness" => min_acousticness, max_acousticness, target_acousticness;
    "danceability" => min_danceability, max_danceability, target_danceability;
    "energy" => min_energy, max_energy, target_energy;
    "instrumentalness" => min_instrumentalness, max_instrumentalness, target_instrumentalness;
    "liveness" => min_liveness, max_liveness, target_liveness;
    "loudness" => min_loudness, max_loudness, target_loudness;
    "speechiness" => min_speechiness, max_speechiness, target_speechiness;
    "tempo" => min_tempo, max_tempo, target_tempo;
    "valence" => min_valence, max_valence, target_valence;
}

impl TrackAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_int(mut self, name: &str, value: i64) -> Self {
        self.int_attributes.insert(name.to_string(), value);
        self
    }

    fn with_float(mut self, name: &str, value: f64) -> Self {
        self.float_attributes.insert(name.to_string(), value);
        self
    }

    /// Sets an attribute from its query parameter name, e.g.
    /// `("target_tempo", "120")`.
    pub fn with_named(self, name: &str, value: &str) -> Result<Self> {
        let attribute = BOUNDS
            .iter()
            .find_map(|bound| name.strip_prefix(bound))
            .ok_or_else(|| Error::Attribute {
                message: format!("{name} must start with min_, max_ or target_"),
            })?;

        if INT_ATTRIBUTES.contains(&attribute) {
            let value = value.parse::<i64>().map_err(|_| Error::Attribute {
                message: format!("{name} expects an integer, got {value}"),
            })?;

            Ok(self.with_int(name, value))
        } else if FLOAT_ATTRIBUTES.contains(&attribute) {
            let value = value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::Attribute {
                    message: format!("{name} expects a number, got {value}"),
                })?;

            Ok(self.with_float(name, value))
        } else {
            Err(Error::Attribute {
                message: format!("unknown attribute {attribute}"),
            })
        }
    }

    pub fn is_empty(&self) -> bool {
        self.int_attributes.is_empty() && self.float_attributes.is_empty()
    }

    /// Writes every attribute into `params`. Floats use the shortest
    /// representation that round-trips, without an exponent.
    pub fn set_values(&self, params: &mut Params) {
        for (attr, val) in &self.int_attributes {
            params.set(attr.as_str(), val.to_string());
        }
        for (attr, val) in &self.float_attributes {
            params.set(attr.as_str(), val.to_string());
        }
    }
}
