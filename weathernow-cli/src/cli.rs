use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{CustomType, CustomUserError, Select, Text, validator::Validation};
use weathernow_core::{
    Config, FileKeyValueStore, OpenMeteoProvider, RecentSearchStore, SearchStatus, WeatherSession,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathernow", version, about = "Current weather and forecast for any city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a city.
    Show {
        /// City or place name.
        #[arg(required = true)]
        city: Vec<String>,

        /// Print the snapshot as JSON instead of the formatted view.
        #[arg(long)]
        json: bool,
    },

    /// List recent searches, or pick one to search again.
    Recent {
        /// Choose an entry interactively and show its weather.
        #[arg(long)]
        pick: bool,
    },

    /// Edit upstream endpoints and request timeout.
    Configure,
}

type Session = WeatherSession<OpenMeteoProvider, FileKeyValueStore>;

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city, json } => {
                let mut session = open_session()?;
                let status = session.search(&city.join(" ")).await;
                finish(&session, status, json)
            }
            Command::Recent { pick } => {
                let mut session = open_session()?;
                if session.recents().is_empty() {
                    println!("No recent searches.");
                    return Ok(());
                }
                if !pick {
                    render::recents(session.recents());
                    return Ok(());
                }

                let labels: Vec<String> =
                    session.recents().iter().map(render::recent_label).collect();
                let choice = Select::new("Search again:", labels).raw_prompt()?;

                let status = session.search_recent(choice.index).await;
                finish(&session, status, false)
            }
            Command::Configure => configure(),
        }
    }
}

fn open_session() -> anyhow::Result<Session> {
    let config = Config::load()?;
    let provider =
        OpenMeteoProvider::from_config(&config).context("Failed to set up HTTP client")?;
    let data_dir = config.resolved_data_dir()?;
    tracing::debug!("Recent searches kept in {}", data_dir.display());

    let store = RecentSearchStore::new(FileKeyValueStore::new(data_dir));
    Ok(WeatherSession::new(provider, store))
}

fn finish(session: &Session, status: SearchStatus, json: bool) -> anyhow::Result<()> {
    match status {
        SearchStatus::Skipped => Ok(()),
        SearchStatus::Found => {
            if let Some(snapshot) = session.snapshot() {
                if json {
                    println!("{}", serde_json::to_string_pretty(snapshot)?);
                } else {
                    render::snapshot(snapshot);
                }
            }
            Ok(())
        }
        SearchStatus::Failed => {
            Err(anyhow!("{}", session.error().unwrap_or("An unexpected error occurred")))
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.geocoding_base = Text::new("Geocoding API base URL:")
        .with_default(&config.geocoding_base)
        .prompt()?;
    config.forecast_base =
        Text::new("Forecast API base URL:").with_default(&config.forecast_base).prompt()?;
    config.timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout_secs)
        .with_validator(|secs: &u64| -> Result<Validation, CustomUserError> {
            Ok(if *secs == 0 {
                Validation::Invalid("Timeout must be at least one second".into())
            } else {
                Validation::Valid
            })
        })
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_search_surfaces_as_error() {
        let dir = tempfile::tempdir().unwrap();
        // Nothing listens on the discard port.
        let config = Config {
            geocoding_base: "http://127.0.0.1:9".into(),
            forecast_base: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
            data_dir: Some(dir.path().to_path_buf()),
        };
        let provider = OpenMeteoProvider::from_config(&config).unwrap();
        let mut session: Session =
            WeatherSession::new(provider, RecentSearchStore::new(FileKeyValueStore::new(dir.path())));

        let status = session.search("Paris").await;
        assert_eq!(status, SearchStatus::Failed);

        let err = finish(&session, status, false).unwrap_err();
        assert_eq!(err.to_string(), "Failed to find location");
    }

    #[tokio::test]
    async fn blank_search_finishes_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let provider = OpenMeteoProvider::from_config(&Config::default()).unwrap();
        let mut session: Session =
            WeatherSession::new(provider, RecentSearchStore::new(FileKeyValueStore::new(dir.path())));

        let status = session.search("   ").await;
        assert_eq!(status, SearchStatus::Skipped);
        assert!(finish(&session, status, false).is_ok());
    }
}
