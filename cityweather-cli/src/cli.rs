use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cityweather_core::{Config, HttpWeatherService, Session, Units};
use inquire::{Select, Text};

use crate::render::{render_health, render_state, units_label};

const TYPE_CITY: &str = "Type a city...";
const QUIT: &str = "Quit";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "City weather client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the weather server address and preferred units.
    Configure,

    /// Check whether the weather server is reachable.
    Health,

    /// Show weather for a city.
    Show {
        /// City name, e.g. "New York".
        city: String,

        /// Display imperial units regardless of configuration.
        #[arg(long)]
        imperial: bool,
    },

    /// Search repeatedly, with quick-pick shortcuts.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(&mut config)?,
            Command::Health => {
                let mut session = open_session(&config)?;
                println!("{}", render_health(session.startup().await));
            }
            Command::Show { city, imperial } => {
                let units = if imperial { Units::Imperial } else { config.units };
                let mut session = open_session(&config)?;

                println!("{}", render_health(session.startup().await));
                if session.submit(&city).await.is_none() {
                    anyhow::bail!("City name must not be empty");
                }
                println!("{}", render_state(session.state(), units));
            }
            Command::Interactive => interactive(&config).await?,
        }

        Ok(())
    }
}

fn open_session(config: &Config) -> anyhow::Result<Session> {
    let service = HttpWeatherService::from_config(config)?;
    tracing::debug!(base_url = service.base_url(), "using weather server");
    Ok(Session::new(Arc::new(service)))
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let current = config.resolved_base_url();
    let url = Text::new("Weather server URL:")
        .with_default(&current)
        .prompt()
        .context("Failed to read server URL")?;
    config.set_base_url(&url);

    let choices = vec![Units::Metric, Units::Imperial];
    let start = choices.iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Units:", choices)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read units")?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let mut session = open_session(config)?;
    let mut units = config.units;

    println!("{}", render_health(session.startup().await));

    loop {
        let toggle = units_label(units);
        let mut options: Vec<String> = config.quick_cities.clone();
        options.extend([TYPE_CITY.to_string(), toggle.clone(), QUIT.to_string()]);

        let choice = Select::new("Quick search:", options)
            .prompt()
            .context("Failed to read selection")?;

        if choice == QUIT {
            break;
        }
        if choice == toggle {
            units = units.toggled();
            println!("{}", render_state(session.state(), units));
            continue;
        }

        let issued = if choice == TYPE_CITY {
            if !session.controller().can_submit() {
                continue;
            }
            let text = Text::new("City:")
                .with_initial_value(session.controller().input())
                .prompt()
                .context("Failed to read city")?;
            session.submit(&text).await
        } else {
            session.quick_search(&choice).await
        };

        if issued.is_some() {
            println!("{}", render_state(session.state(), units));
        }
    }

    Ok(())
}
