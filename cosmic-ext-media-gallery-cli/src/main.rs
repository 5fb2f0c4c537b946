mod config;

use anyhow::{Context, Result};
use chrono::{FixedOffset, TimeZone, Utc};
use clap::{Parser, Subcommand};
use cosmic_ext_media_gallery::{
    datetime_from_millis, load_media_items, parse_reference_time, parse_utc_offset,
    RecencyGrouper,
};
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{debug, info};

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "cosmic-ext-gallery")]
#[command(about = "Group exported conversation media into gallery sections")]
struct Args {
    /// Configuration file (defaults to the COSMIC config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Reference time and calendar options shared by subcommands
#[derive(clap::Args, Debug)]
struct CalendarArgs {
    /// Reference time as milliseconds or RFC 3339 (defaults to now)
    #[arg(long)]
    reference: Option<String>,

    /// Calendar UTC offset, e.g. "+02:00" (overrides config)
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Group a JSON media export and print the sections
    Group {
        /// JSON file containing an array of media items
        file: PathBuf,

        #[command(flatten)]
        calendar: CalendarArgs,

        /// Pretty-print the JSON output (overrides config)
        #[arg(long)]
        pretty: bool,

        /// Compact JSON output (overrides config)
        #[arg(long, conflicts_with = "pretty")]
        compact: bool,
    },
    /// Print the calendar boundaries for a reference time
    Boundaries {
        #[command(flatten)]
        calendar: CalendarArgs,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Debug, Serialize)]
struct BoundariesReport {
    reference: String,
    start_of_today: String,
    start_of_yesterday: String,
    start_of_this_week: String,
    start_of_this_month: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let created = !config_path.exists();
    let config = Config::load_from(&config_path).context("Failed to load configuration")?;

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if created {
        info!("Created default config at {}", config_path.display());
    } else {
        debug!("Configuration loaded from {}", config_path.display());
    }

    match args.command {
        Command::Group {
            file,
            calendar,
            pretty,
            compact,
        } => {
            let pretty = if pretty || compact {
                pretty
            } else {
                config.output.pretty
            };
            let reference = resolve_reference(calendar.reference.as_deref())?;
            let items = load_media_items(&file)
                .with_context(|| format!("Failed to load media items from {}", file.display()))?;
            info!("Loaded {} media items from {}", items.len(), file.display());

            let output = match resolve_offset(&config, calendar.utc_offset.as_deref())? {
                Some(offset) => {
                    let sections = RecencyGrouper::new(offset).group(reference, &items);
                    render(&sections, pretty)?
                }
                None => render(&RecencyGrouper::utc().group(reference, &items), pretty)?,
            };
            println!("{}", output);
        }
        Command::Boundaries { calendar } => {
            let reference = resolve_reference(calendar.reference.as_deref())?;
            let report = match resolve_offset(&config, calendar.utc_offset.as_deref())? {
                Some(offset) => boundaries_report(RecencyGrouper::new(offset), reference),
                None => boundaries_report(RecencyGrouper::utc(), reference),
            };
            println!("{}", render(&report, true)?);
        }
        Command::Config => {
            println!("# {}", config_path.display());
            print!(
                "{}",
                toml::to_string_pretty(&config).context("Failed to serialize config")?
            );
        }
    }

    Ok(())
}

/// Reference time from the command line, or the current time
fn resolve_reference(input: Option<&str>) -> Result<i64> {
    match input {
        Some(input) => parse_reference_time(input).context("Invalid --reference"),
        None => Ok(Utc::now().timestamp_millis()),
    }
}

/// Calendar offset from the command line, falling back to the config
fn resolve_offset(config: &Config, input: Option<&str>) -> Result<Option<FixedOffset>> {
    match input {
        Some(input) => parse_utc_offset(input)
            .map(Some)
            .context("Invalid --utc-offset"),
        None => config.calendar.offset(),
    }
}

fn boundaries_report<Tz>(grouper: RecencyGrouper<Tz>, reference: i64) -> BoundariesReport
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let boundaries = grouper.boundaries(reference);
    let format = |ms: i64| {
        datetime_from_millis(ms)
            .with_timezone(boundaries.time_zone())
            .to_rfc3339()
    };

    BoundariesReport {
        reference: format(boundaries.reference()),
        start_of_today: format(boundaries.start_of_today()),
        start_of_yesterday: format(boundaries.start_of_yesterday()),
        start_of_this_week: format(boundaries.start_of_this_week()),
        start_of_this_month: format(boundaries.start_of_this_month()),
    }
}

fn render<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    output.context("Failed to serialize output")
}
