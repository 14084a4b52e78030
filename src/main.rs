//! autocat - Terminal Car Catalogue
//!
//! Search, filter and page through car listings from a remote API.

use anyhow::Result;
use autocat::render::ui::{ColorTheme, TerminalUI};
use autocat::{ApiConfig, Application, ConfigLayer, FilterCriteria, HttpListingService};
use chrono::Datelike;
use clap::{value_parser, Arg, ArgMatches, Command};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    let matches = Command::new("autocat")
        .version(autocat::VERSION)
        .about("A terminal car catalogue")
        .long_about(
            "autocat browses a remote car-listing API from the terminal. Search by \
             manufacturer and model, filter by fuel type and year, and page through results.",
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .help("API key sent as x-rapidapi-key (or set AUTOCAT_API_KEY)"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .help("Listing endpoint URL"),
        )
        .arg(
            Arg::new("api-host")
                .long("api-host")
                .help("Value of the x-rapidapi-host header"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("manufacturer")
                .long("manufacturer")
                .short('m')
                .help("Initial manufacturer filter"),
        )
        .arg(
            Arg::new("model")
                .long("model")
                .help("Initial model filter"),
        )
        .arg(
            Arg::new("fuel")
                .long("fuel")
                .value_parser(["gas", "electricity"])
                .help("Initial fuel type filter"),
        )
        .arg(
            Arg::new("year")
                .long("year")
                .value_parser(value_parser!(u16))
                .help("Initial production year filter"),
        )
        .get_matches();

    let config = ApiConfig::resolve(config_layers(&matches)?)?;
    let service = HttpListingService::new(&config)?;
    let criteria = initial_criteria(&matches);
    let current_year = chrono::Local::now().year();

    let ui_renderer = if std::env::var_os("NO_COLOR").is_some() {
        Box::new(TerminalUI::with_theme(ColorTheme::monochrome())?)
    } else {
        Box::new(TerminalUI::new()?)
    };
    let mut app = Application::new(Arc::new(service), ui_renderer, criteria, current_year);

    app.run().await?;

    Ok(())
}

/// File, then environment, then flags; later layers win.
fn config_layers(matches: &ArgMatches) -> Result<ConfigLayer> {
    let flags = ConfigLayer {
        api_key: matches.get_one::<String>("api-key").cloned(),
        base_url: matches.get_one::<String>("base-url").cloned(),
        api_host: matches.get_one::<String>("api-host").cloned(),
    };
    Ok(file_layer(matches)?
        .merge(ConfigLayer::from_env())
        .merge(flags))
}

#[cfg(feature = "config")]
fn file_layer(matches: &ArgMatches) -> Result<ConfigLayer> {
    use anyhow::Context;

    let path = match matches.get_one::<String>("config") {
        Some(path) => std::path::PathBuf::from(path),
        None => match ConfigLayer::default_path() {
            Some(path) if path.is_file() => path,
            _ => return Ok(ConfigLayer::default()),
        },
    };
    ConfigLayer::from_file(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

#[cfg(not(feature = "config"))]
fn file_layer(matches: &ArgMatches) -> Result<ConfigLayer> {
    if matches.get_one::<String>("config").is_some() {
        anyhow::bail!("--config requires autocat to be built with the `config` feature");
    }
    Ok(ConfigLayer::default())
}

fn initial_criteria(matches: &ArgMatches) -> FilterCriteria {
    let text = |name: &str| matches.get_one::<String>(name).cloned().unwrap_or_default();
    let mut criteria = FilterCriteria {
        manufacturer: text("manufacturer"),
        model: text("model"),
        fuel: fuel_value(&text("fuel")).to_string(),
        ..FilterCriteria::default()
    };
    if let Some(year) = matches.get_one::<u16>("year") {
        criteria.year = *year;
    }
    criteria
}

fn fuel_value(flag: &str) -> &'static str {
    match flag {
        "gas" => "Gas",
        "electricity" => "Electricity",
        _ => "",
    }
}
