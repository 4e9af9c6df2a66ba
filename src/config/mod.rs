pub mod toml_config;

use crate::adapters::searchapi::DEFAULT_ENDPOINT;
use crate::core::presenter::DisplayOptions;
use crate::core::render::OutputFormat;
use crate::domain::model::{Interest, SearchRequest, StopPreference, TravelClass};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::path::PathBuf;
use toml_config::TomlConfig;

pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_ADULTS: u32 = 9;

/// Command-line flags. Unset flags fall back to the `--config` file, then
/// to built-in defaults.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "travel-explore", version)]
#[command(about = "Fetch travel destinations from SearchAPI and list by cheapest price")]
pub struct CliConfig {
    #[arg(short, long, help = "Departure airport IATA code (default: ZRH)")]
    pub departure: Option<String>,

    #[arg(short, long, help = "Number of adults, 1-9 (default: 1)")]
    pub adults: Option<u32>,

    #[arg(
        short,
        long,
        help = "Time period, a preset or YYYY-MM-DD..YYYY-MM-DD (default: one_week_trip_in_the_next_six_months)"
    )]
    pub period: Option<String>,

    #[arg(short, long, value_enum, help = "Type of destinations (default: popular)")]
    pub interests: Option<Interest>,

    #[arg(short, long, help = "Currency code (default: CHF)")]
    pub currency: Option<String>,

    #[arg(long, help = "Country code for localization (default: CH)")]
    pub country: Option<String>,

    #[arg(long, help = "Language code (default: en-US)")]
    pub language: Option<String>,

    #[arg(short, long, help = "Maximum flight price filter")]
    pub max_price: Option<u32>,

    #[arg(short, long, value_enum, help = "Travel class (default: economy)")]
    pub travel_class: Option<TravelClass>,

    #[arg(short, long, value_enum, help = "Stop preference (default: any)")]
    pub stops: Option<StopPreference>,

    #[arg(short, long, help = "Number of destinations to display (default: 20)")]
    pub limit: Option<usize>,

    #[arg(short, long, value_enum, help = "Output format (default: text)")]
    pub format: Option<OutputFormat>,

    #[arg(long, help = "Search endpoint URL")]
    pub endpoint: Option<String>,

    #[arg(long, value_name = "FILE", help = "TOML file with default options")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub request: SearchRequest,
    pub limit: usize,
    pub format: OutputFormat,
    pub endpoint: String,
    pub api_key_env: String,
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            request: SearchRequest::default(),
            limit: DEFAULT_LIMIT,
            format: OutputFormat::default(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: crate::API_KEY_ENV.to_string(),
            verbose: false,
        }
    }
}

impl RunConfig {
    pub fn display_options(&self) -> DisplayOptions<'_> {
        DisplayOptions {
            currency: &self.request.currency,
            departure_id: &self.request.departure_id,
            adults: self.request.adults,
        }
    }
}

impl CliConfig {
    /// Loads the `--config` file, if given, and layers the flags over it.
    pub fn resolve(self) -> Result<RunConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading defaults from {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        Ok(self.merge(file))
    }

    pub fn merge(self, file: TomlConfig) -> RunConfig {
        let defaults = RunConfig::default();
        let base = defaults.request;
        let search = file.search;

        let request = SearchRequest {
            departure_id: self.departure.or(search.departure).unwrap_or(base.departure_id),
            adults: self.adults.or(search.adults).unwrap_or(base.adults),
            time_period: self.period.or(search.period).unwrap_or(base.time_period),
            interests: self.interests.or(search.interests).unwrap_or(base.interests),
            currency: self.currency.or(search.currency).unwrap_or(base.currency),
            country: self.country.or(search.country).unwrap_or(base.country),
            language: self.language.or(search.language).unwrap_or(base.language),
            max_price: self.max_price.or(search.max_price),
            travel_class: self
                .travel_class
                .or(search.travel_class)
                .unwrap_or(base.travel_class),
            stops: self.stops.or(search.stops).unwrap_or(base.stops),
        };

        RunConfig {
            request,
            limit: self.limit.or(file.output.limit).unwrap_or(defaults.limit),
            format: self.format.or(file.output.format).unwrap_or(defaults.format),
            endpoint: self.endpoint.or(file.api.endpoint).unwrap_or(defaults.endpoint),
            api_key_env: file.api.key_env.unwrap_or(defaults.api_key_env),
            verbose: self.verbose,
        }
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        let request = &self.request;

        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("api key variable", &self.api_key_env)?;
        validation::validate_non_empty_string("departure", &request.departure_id)?;
        validation::validate_range("adults", request.adults, 1, MAX_ADULTS)?;
        validation::validate_time_period("period", &request.time_period)?;
        validation::validate_non_empty_string("currency", &request.currency)?;
        validation::validate_non_empty_string("country", &request.country)?;
        validation::validate_non_empty_string("language", &request.language)?;
        if let Some(max_price) = request.max_price {
            validation::validate_positive_number("max-price", max_price, 1)?;
        }
        validation::validate_positive_number("limit", self.limit, 1)?;

        Ok(())
    }
}
