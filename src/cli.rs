use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use spotifyrs_api::{
    client::{
        api::{self, Client},
        attributes::TrackAttributes,
        episode::SavedEpisode,
        options::RequestOption,
        recommendation::Seeds,
    },
    ApiConfig, Id,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, prelude::*};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// OAuth access token sent with every request.
    #[clap(short, long, env = "SPOTIFY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Use a different Web API base url.
    #[clap(long, env = "SPOTIFY_API_URL")]
    pub api_url: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the podcast episodes saved in your library
    Episodes {
        #[clap(subcommand)]
        command: EpisodeCommands,
    },
    /// Recommend tracks based on seed artists, tracks and genres.
    /// At most five seeds can be given in total.
    Recommendations {
        /// Seed artist id
        #[clap(long = "artist")]
        artists: Vec<String>,
        /// Seed track id
        #[clap(long = "track")]
        tracks: Vec<String>,
        /// Seed genre, see `genre-seeds`
        #[clap(long = "genre")]
        genres: Vec<String>,
        /// Tunable track attribute, e.g. target_tempo=120 or max_popularity=40
        #[clap(short, long = "attribute", value_parser = parse_attribute)]
        attributes: Vec<(String, String)>,
        #[clap(long, short)]
        limit: Option<u32>,
        #[clap(long, short)]
        market: Option<String>,
        #[clap(short, long = "output", value_enum)]
        output_format: Option<OutputFormat>,
    },
    /// List the genres available as recommendation seeds
    GenreSeeds {
        #[clap(short, long = "output", value_enum)]
        output_format: Option<OutputFormat>,
    },
}

#[derive(Subcommand)]
pub enum EpisodeCommands {
    /// Save episodes to your library
    Save {
        #[clap(required = true)]
        ids: Vec<String>,
    },
    /// Remove episodes from your library
    Remove {
        #[clap(required = true)]
        ids: Vec<String>,
    },
    /// Check whether episodes are saved in your library
    Contains {
        #[clap(required = true)]
        ids: Vec<String>,
        #[clap(short, long = "output", value_enum)]
        output_format: Option<OutputFormat>,
    },
    /// List the episodes saved in your library
    List {
        #[clap(long, short)]
        limit: Option<u32>,
        #[clap(long)]
        offset: Option<u32>,
        #[clap(long, short)]
        market: Option<String>,
        /// Keep fetching until the last page
        #[clap(long, default_value_t = false)]
        all: bool,
        #[clap(short, long = "output", value_enum)]
        output_format: Option<OutputFormat>,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    Json,
    Tsv,
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{error}"))]
    ClientError { error: String },
    #[snafu(display("Failed to write output: {error}"))]
    OutputError { error: String },
}

impl From<spotifyrs_api::Error> for Error {
    fn from(error: spotifyrs_api::Error) -> Self {
        Error::ClientError {
            error: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::OutputError {
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SavedStatus {
    id: Id,
    saved: bool,
}

const EPISODE_HEADERS: [&str; 6] = ["Episode", "Show", "Released", "Duration", "Saved", "ID"];
const TRACK_HEADERS: [&str; 5] = ["Track", "Artists", "Album", "Duration", "ID"];

macro_rules! output {
    ($results:expr, $rows:expr, $headers:expr, $output_format:expr) => {
        match $output_format {
            Some(OutputFormat::Json) => {
                let json = serde_json::to_string(&$results)?;

                println!("{}", json);
            }
            Some(OutputFormat::Tsv) => {
                for row in $rows {
                    println!("{}", row.join("\t"));
                }
            }
            None => {
                let mut table = Table::new();
                table.load_preset(UTF8_FULL);
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header($headers.to_vec());

                for row in $rows {
                    table.add_row(row);
                }

                println!("{}", table);
            }
        }
    };
}

fn parse_attribute(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((name, value)) if !name.is_empty() && !value.is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected name=value, got {value}")),
    }
}

fn to_ids(ids: Vec<String>) -> Vec<Id> {
    ids.into_iter().map(Id::from).collect()
}

fn make_client(token: Option<String>, api_url: Option<String>) -> Result<Client, Error> {
    if let Some(url) = &api_url {
        debug!("using api url {}", url);
    }

    Ok(api::new(ApiConfig {
        access_token: token,
        base_url: api_url,
        ..Default::default()
    })?)
}

fn page_options(
    limit: Option<u32>,
    offset: Option<u32>,
    market: Option<String>,
) -> Vec<RequestOption> {
    let mut opts = vec![];

    if let Some(limit) = limit {
        opts.push(RequestOption::Limit(limit));
    }
    if let Some(offset) = offset {
        opts.push(RequestOption::Offset(offset));
    }
    if let Some(market) = market {
        opts.push(RequestOption::Market(market));
    }

    opts
}

fn track_attributes(pairs: &[(String, String)]) -> Result<Option<TrackAttributes>, Error> {
    if pairs.is_empty() {
        return Ok(None);
    }

    let mut attributes = TrackAttributes::new();
    for (name, value) in pairs {
        attributes = attributes.with_named(name, value)?;
    }

    Ok(Some(attributes))
}

pub async fn run() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_file(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::from_env("SPOTIFYRS_LOG"))
        .init();

    // PARSE CLI ARGS
    let cli = Cli::parse();
    let client = make_client(cli.token, cli.api_url)?;

    // CLI COMMANDS
    match cli.command {
        Commands::Episodes { command } => match command {
            EpisodeCommands::Save { ids } => {
                let ids = to_ids(ids);
                client.save_episodes(&ids).await?;

                println!("Saved {} episode(s).", ids.len());
                Ok(())
            }
            EpisodeCommands::Remove { ids } => {
                let ids = to_ids(ids);
                client.remove_saved_episodes(&ids).await?;

                println!("Removed {} episode(s).", ids.len());
                Ok(())
            }
            EpisodeCommands::Contains { ids, output_format } => {
                let ids = to_ids(ids);
                let saved = client.contains_saved_episodes(&ids).await?;

                let results = ids
                    .into_iter()
                    .zip(saved)
                    .map(|(id, saved)| SavedStatus { id, saved })
                    .collect::<Vec<SavedStatus>>();
                let rows = results
                    .iter()
                    .map(|s| vec![s.id.to_string(), if s.saved { "yes" } else { "no" }.to_string()]);

                output!(results, rows, ["ID", "Saved"], output_format);
                Ok(())
            }
            EpisodeCommands::List {
                limit,
                offset,
                market,
                all,
                output_format,
            } => {
                let opts = page_options(limit, offset, market);
                let mut page = client.saved_episodes(&opts).await?;
                let mut episodes = std::mem::take(&mut page.items);

                if all {
                    while let Some(mut next) = client.next_page(&page).await? {
                        debug!("fetched {} more episodes", next.items.len());
                        episodes.append(&mut next.items);
                        page = next;
                    }
                }

                let rows = episodes.iter().map(SavedEpisode::columns);

                output!(episodes, rows, EPISODE_HEADERS, output_format);
                Ok(())
            }
        },
        Commands::Recommendations {
            artists,
            tracks,
            genres,
            attributes,
            limit,
            market,
            output_format,
        } => {
            let seeds = Seeds {
                artists: to_ids(artists),
                tracks: to_ids(tracks),
                genres,
            };
            let attributes = track_attributes(&attributes)?;
            let opts = page_options(limit, None, market);

            let results = client
                .recommendations(&seeds, attributes.as_ref(), &opts)
                .await?;
            let rows: Vec<Vec<String>> = results.clone().into();

            output!(results, rows, TRACK_HEADERS, output_format);
            Ok(())
        }
        Commands::GenreSeeds { output_format } => {
            let results = client.available_genre_seeds().await?;
            let rows = results.iter().map(|genre| vec![genre.clone()]);

            output!(results, rows, ["Genre"], output_format);
            Ok(())
        }
    }
}
