use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

pub const DEFAULT_DEPARTURE: &str = "ZRH";
pub const DEFAULT_TIME_PERIOD: &str = "one_week_trip_in_the_next_six_months";
pub const DEFAULT_CURRENCY: &str = "CHF";
pub const DEFAULT_COUNTRY: &str = "CH";
pub const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Interest {
    #[default]
    #[value(name = "popular")]
    Popular,
    #[value(name = "outdoors")]
    Outdoors,
    #[value(name = "beaches")]
    Beaches,
    #[value(name = "museums")]
    Museums,
    #[value(name = "history")]
    History,
    #[value(name = "skiing")]
    Skiing,
}

impl Interest {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Outdoors => "outdoors",
            Self::Beaches => "beaches",
            Self::Museums => "museums",
            Self::History => "history",
            Self::Skiing => "skiing",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TravelClass {
    #[default]
    #[value(name = "economy")]
    Economy,
    #[value(name = "premium_economy")]
    PremiumEconomy,
    #[value(name = "business")]
    Business,
    #[value(name = "first_class")]
    FirstClass,
}

impl TravelClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::PremiumEconomy => "premium_economy",
            Self::Business => "business",
            Self::FirstClass => "first_class",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StopPreference {
    #[default]
    #[value(name = "any")]
    Any,
    #[value(name = "nonstop")]
    Nonstop,
    #[value(name = "one_stop_or_fewer")]
    OneStopOrFewer,
    #[value(name = "two_stops_or_fewer")]
    TwoStopsOrFewer,
}

impl StopPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Nonstop => "nonstop",
            Self::OneStopOrFewer => "one_stop_or_fewer",
            Self::TwoStopsOrFewer => "two_stops_or_fewer",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Interest, TravelClass, StopPreference);

/// Inputs for a single explore call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// IATA code of the departure airport.
    pub departure_id: String,
    pub adults: u32,
    /// Provider preset (e.g. `one_week_trip_in_the_next_six_months`) or a
    /// `YYYY-MM-DD..YYYY-MM-DD` range.
    pub time_period: String,
    pub interests: Interest,
    pub currency: String,
    /// Localization country (`gl`).
    pub country: String,
    /// Interface language (`hl`).
    pub language: String,
    pub max_price: Option<u32>,
    pub travel_class: TravelClass,
    pub stops: StopPreference,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            departure_id: DEFAULT_DEPARTURE.to_string(),
            adults: 1,
            time_period: DEFAULT_TIME_PERIOD.to_string(),
            interests: Interest::default(),
            currency: DEFAULT_CURRENCY.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            max_price: None,
            travel_class: TravelClass::default(),
            stops: StopPreference::default(),
        }
    }
}

impl SearchRequest {
    pub const ENGINE: &'static str = "google_travel_explore";

    /// Query string pairs for the provider; `max_price` only when set.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("engine", Self::ENGINE.to_string()),
            ("departure_id", self.departure_id.clone()),
            ("adults", self.adults.to_string()),
            ("time_period", self.time_period.clone()),
            ("interests", self.interests.to_string()),
            ("currency", self.currency.clone()),
            ("gl", self.country.clone()),
            ("hl", self.language.clone()),
            ("travel_class", self.travel_class.to_string()),
            ("stops", self.stops.to_string()),
        ];

        if let Some(max_price) = self.max_price {
            params.push(("max_price", max_price.to_string()));
        }

        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightInfo {
    #[serde(deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "text_or_number")]
    pub airline_name: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub stops: Option<u32>,
    #[serde(deserialize_with = "text_or_number")]
    pub flight_duration: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub airport_code: Option<String>,
}

/// One suggestion from the provider. Every field is optional and a value of
/// an unexpected type reads as absent; placeholders are rendered instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Destination {
    #[serde(deserialize_with = "text_or_number")]
    pub name: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient_record")]
    pub flight: Option<FlightInfo>,
    #[serde(deserialize_with = "text_or_number")]
    pub outbound_date: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub return_date: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub avg_cost_per_night: Option<f64>,
}

impl Destination {
    pub fn price(&self) -> Option<f64> {
        self.flight.as_ref().and_then(|f| f.price)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchMetadata {
    #[serde(deserialize_with = "text_or_number")]
    pub id: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    #[serde(deserialize_with = "lenient_record")]
    pub search_metadata: Option<SearchMetadata>,
    #[serde(deserialize_with = "lenient_destinations")]
    destinations: Option<Vec<Destination>>,
}

impl SearchResponse {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self {
            search_metadata: None,
            destinations: Some(destinations),
        }
    }

    /// A missing or null `destinations` key reads as no results.
    pub fn into_destinations(self) -> Vec<Destination> {
        self.destinations.unwrap_or_default()
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Numbers, and strings holding a number, become `f64`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// Whole non-negative numbers (`1`, `1.0`, `"1"`) become a count.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(number
        .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= f64::from(u32::MAX))
        .map(|v| v as u32))
}

/// A nested object that does not decode reads as absent.
fn lenient_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Entries that are not objects are skipped; every object decodes.
fn lenient_destinations<'de, D>(deserializer: D) -> Result<Option<Vec<Destination>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(None);
    };

    let total = items.len();
    let destinations: Vec<Destination> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if destinations.len() < total {
        tracing::warn!(
            "Skipped {} malformed destination entries",
            total - destinations.len()
        );
    }

    Ok(Some(destinations))
}
