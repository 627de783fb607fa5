use snafu::prelude::*;

#[macro_use]
extern crate tracing;

pub mod client;

pub use client::{
    api::{new, Client},
    ApiConfig, Id,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Authorization missing."))]
    Authorization,
    #[snafu(display("Invalid access token."))]
    InvalidToken,
    #[snafu(display("Failed to create client: {message}"))]
    Create { message: String },
    #[snafu(display("At least one seed is required."))]
    NoSeeds,
    #[snafu(display("Exceeded maximum of {max} seeds (got {count})."))]
    TooManySeeds { max: usize, count: usize },
    #[snafu(display("Invalid track attribute: {message}"))]
    Attribute { message: String },
    #[snafu(display(
        "Rate limited by the API{}.",
        retry_after
            .as_ref()
            .map(|seconds| format!(", retry after {seconds}s"))
            .unwrap_or_default()
    ))]
    RateLimited { retry_after: Option<u64> },
    #[snafu(display("{status}: {message}"))]
    Api { status: u16, message: String },
    #[snafu(display("Request failed: {message}"))]
    Request { message: String },
    #[snafu(display("Failed to deserialize json: {message}"))]
    DeserializeJSON { message: String },
    #[snafu(display("Invalid timestamp: {value}"))]
    Timestamp { value: String },
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Error::Api {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Error calling the API")
                    .to_string(),
            },
            None => Error::Request {
                message: error.to_string(),
            },
        }
    }
}
