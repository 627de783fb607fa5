use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, RETRY_AFTER, USER_AGENT},
    Method, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::{
    client::{
        attributes::TrackAttributes,
        episode::SavedEpisodePage,
        join_ids,
        options::{process_options, RequestOption},
        recommendation::{GenreSeeds, Recommendations, Seeds},
        ApiConfig, Id, Page, DEFAULT_BASE_URL,
    },
    Error, Result,
};

const DEFAULT_USER_AGENT: &str = concat!("spotifyrs/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct Client {
    access_token: String,
    base_url: String,
    client: reqwest::Client,
}

pub fn new(config: ApiConfig) -> Result<Client> {
    let access_token = config.access_token.ok_or(Error::Authorization)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(
            config
                .user_agent
                .as_deref()
                .unwrap_or(DEFAULT_USER_AGENT),
        )
        .map_err(|error| Error::Create {
            message: error.to_string(),
        })?,
    );

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|error| Error::Create {
            message: error.to_string(),
        })?;

    let mut base_url = config
        .base_url
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    if !base_url.ends_with('/') {
        base_url.push('/');
    }

    Ok(Client {
        access_token,
        base_url,
        client,
    })
}

enum Endpoint {
    SavedEpisodes,
    SavedEpisodesContains,
    Recommendations,
    GenreSeeds,
}

impl Endpoint {
    fn as_str(&self) -> &'static str {
        match self {
            Endpoint::SavedEpisodes => "me/episodes",
            Endpoint::SavedEpisodesContains => "me/episodes/contains",
            Endpoint::Recommendations => "recommendations",
            Endpoint::GenreSeeds => "recommendations/available-genre-seeds",
        }
    }
}

macro_rules! call {
    ($self:ident, $endpoint:expr) => {
        match $self.make_call(Method::GET, $endpoint, &[]).await {
            Ok(response) => match serde_json::from_str(response.as_str()) {
                Ok(item) => Ok(item),
                Err(error) => Err(Error::DeserializeJSON {
                    message: error.to_string(),
                }),
            },
            Err(error) => Err(error),
        }
    };
}

/// Error object the API returns alongside non-success statuses.
#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorObject,
}

#[derive(Deserialize)]
struct ErrorObject {
    #[serde(default)]
    message: String,
}

impl Client {
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    // Set a user access token for authentication
    pub fn set_token(&mut self, token: String) {
        self.access_token = token;
    }

    /// Save one or more episodes to the current user's library.
    pub async fn save_episodes(&self, ids: &[Id]) -> Result<()> {
        let endpoint = self.ids_endpoint(Endpoint::SavedEpisodes, ids);

        info!("saving {} episodes to the library", ids.len());
        self.make_call(Method::PUT, endpoint, &[])
            .await
            .map(|_| ())
    }

    /// Remove one or more episodes from the current user's library.
    pub async fn remove_saved_episodes(&self, ids: &[Id]) -> Result<()> {
        let endpoint = self.ids_endpoint(Endpoint::SavedEpisodes, ids);

        info!("removing {} episodes from the library", ids.len());
        self.make_call(Method::DELETE, endpoint, &[])
            .await
            .map(|_| ())
    }

    /// Check whether each episode is saved in the current user's library.
    pub async fn contains_saved_episodes(&self, ids: &[Id]) -> Result<Vec<bool>> {
        let endpoint = self.ids_endpoint(Endpoint::SavedEpisodesContains, ids);

        call!(self, endpoint)
    }

    /// Retrieve the episodes saved in the current user's library.
    ///
    /// Supported options: `Limit`, `Offset`, `Market`.
    pub async fn saved_episodes(&self, opts: &[RequestOption]) -> Result<SavedEpisodePage> {
        let endpoint = self.saved_episodes_endpoint(opts);

        call!(self, endpoint)
    }

    /// Retrieve tracks recommended from the given seeds, optionally narrowed
    /// by track attributes.
    ///
    /// Supported options: `Limit`, `Market`, `Country`.
    pub async fn recommendations(
        &self,
        seeds: &Seeds,
        attributes: Option<&TrackAttributes>,
        opts: &[RequestOption],
    ) -> Result<Recommendations> {
        let endpoint = self.recommendations_endpoint(seeds, attributes, opts)?;

        call!(self, endpoint)
    }

    /// Retrieve the genres that can be used as recommendation seeds.
    pub async fn available_genre_seeds(&self) -> Result<Vec<String>> {
        let endpoint = format!("{}{}", self.base_url, Endpoint::GenreSeeds.as_str());
        let seeds: GenreSeeds = call!(self, endpoint)?;

        Ok(seeds.genres)
    }

    /// Fetch the page after `page`, or `None` if it is the last one.
    pub async fn next_page<T: DeserializeOwned>(&self, page: &Page<T>) -> Result<Option<Page<T>>> {
        match &page.next {
            Some(next) => call!(self, next.clone()).map(Some),
            None => Ok(None),
        }
    }

    /// Fetch the page before `page`, or `None` if it is the first one.
    pub async fn previous_page<T: DeserializeOwned>(
        &self,
        page: &Page<T>,
    ) -> Result<Option<Page<T>>> {
        match &page.previous {
            Some(previous) => call!(self, previous.clone()).map(Some),
            None => Ok(None),
        }
    }

    fn ids_endpoint(&self, endpoint: Endpoint, ids: &[Id]) -> String {
        format!("{}{}?ids={}", self.base_url, endpoint.as_str(), join_ids(ids))
    }

    fn saved_episodes_endpoint(&self, opts: &[RequestOption]) -> String {
        let mut endpoint = format!("{}{}", self.base_url, Endpoint::SavedEpisodes.as_str());

        let params = process_options(opts).encode();
        if !params.is_empty() {
            endpoint.push('?');
            endpoint.push_str(&params);
        }

        endpoint
    }

    fn recommendations_endpoint(
        &self,
        seeds: &Seeds,
        attributes: Option<&TrackAttributes>,
        opts: &[RequestOption],
    ) -> Result<String> {
        let mut params = process_options(opts);

        seeds.validate()?;
        seeds.set_values(&mut params);

        if let Some(attributes) = attributes {
            attributes.set_values(&mut params);
        }

        Ok(format!(
            "{}{}?{}",
            self.base_url,
            Endpoint::Recommendations.as_str(),
            params.encode()
        ))
    }

    // Call the api and retrieve the response body
    async fn make_call(
        &self,
        method: Method,
        endpoint: String,
        expected: &[StatusCode],
    ) -> Result<String> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(format!("Bearer {}", self.access_token).as_str())
                .map_err(|_| Error::InvalidToken)?,
        );

        debug!("calling {} {}", method, endpoint);
        let response = self
            .client
            .request(method, endpoint)
            .headers(headers)
            .send()
            .await?;

        self.handle_response(response, expected).await
    }

    // Handle a response retrieved from the api
    async fn handle_response(&self, response: Response, expected: &[StatusCode]) -> Result<String> {
        let status = response.status();

        if status.is_success() || expected.contains(&status) {
            return Ok(response.text().await?);
        }

        warn!("{} returned {}", response.url().path(), status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok());

            return Err(Error::RateLimited { retry_after });
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .map(|error| error.error.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Error calling the API")
                    .to_string()
            });

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}
