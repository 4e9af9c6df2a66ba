use crate::domain::model::Destination;
use serde::{Serialize, Serializer};

pub const FLIGHTS_BASE_URL: &str = "https://www.google.com/travel/flights";

const PLACEHOLDER: &str = "N/A";
const UNKNOWN: &str = "Unknown";

/// Labels shared by every rendered destination of one run.
#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions<'a> {
    pub currency: &'a str,
    pub departure_id: &'a str,
    pub adults: u32,
}

/// Flattened view of a ranked destination, used by the json and csv outputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingEntry {
    pub rank: usize,
    pub name: Option<String>,
    pub country: Option<String>,
    #[serde(serialize_with = "whole_as_integer")]
    pub price: Option<f64>,
    pub currency: String,
    pub airline: Option<String>,
    pub stops: Option<u32>,
    pub flight_duration: Option<String>,
    pub outbound_date: Option<String>,
    pub return_date: Option<String>,
    #[serde(serialize_with = "whole_as_integer")]
    pub avg_cost_per_night: Option<f64>,
    pub booking_link: String,
}

impl ListingEntry {
    pub fn new(destination: &Destination, rank: usize, options: &DisplayOptions<'_>) -> Self {
        let flight = destination.flight.clone().unwrap_or_default();

        Self {
            rank,
            name: destination.name.clone(),
            country: destination.country.clone(),
            price: flight.price,
            currency: options.currency.to_string(),
            airline: flight.airline_name,
            stops: flight.stops,
            flight_duration: flight.flight_duration,
            outbound_date: destination.outbound_date.clone(),
            return_date: destination.return_date.clone(),
            avg_cost_per_night: destination.avg_cost_per_night,
            booking_link: booking_link(destination, options),
        }
    }
}

/// Renders one destination as the multi-line listing block.
pub fn format_destination(
    destination: &Destination,
    rank: usize,
    options: &DisplayOptions<'_>,
) -> String {
    let entry = ListingEntry::new(destination, rank, options);
    let currency = options.currency;

    let price = entry
        .price
        .map(|p| p.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    [
        format!(
            "{}. {}, {}",
            rank,
            entry.name.as_deref().unwrap_or(UNKNOWN),
            entry.country.as_deref().unwrap_or(UNKNOWN)
        ),
        format!(
            "   Flight: {} {} ({}, {}, {})",
            price,
            currency,
            entry.airline.as_deref().unwrap_or(UNKNOWN),
            stop_text(entry.stops),
            entry.flight_duration.as_deref().unwrap_or(PLACEHOLDER)
        ),
        format!(
            "   Dates: {} -> {}",
            entry.outbound_date.as_deref().unwrap_or(PLACEHOLDER),
            entry.return_date.as_deref().unwrap_or(PLACEHOLDER)
        ),
        format!(
            "   Avg accommodation: {}",
            accommodation_text(entry.avg_cost_per_night, currency)
        ),
        format!("   Book: {}", entry.booking_link),
    ]
    .join("\n")
}

pub fn stop_text(stops: Option<u32>) -> String {
    match stops {
        Some(0) => "direct".to_string(),
        Some(n) => format!("{} stop(s)", n),
        None => format!("{} stop(s)", PLACEHOLDER),
    }
}

/// A zero nightly cost is reported the same as a missing one.
pub fn accommodation_text(avg_cost_per_night: Option<f64>, currency: &str) -> String {
    match avg_cost_per_night {
        Some(cost) if cost > 0.0 => format!("{} {}/night", cost, currency),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Deep link to a flight search, or an empty string when the destination
/// lacks its airport code or either travel date.
pub fn booking_link(destination: &Destination, options: &DisplayOptions<'_>) -> String {
    let airport_code = destination
        .flight
        .as_ref()
        .and_then(|f| non_blank(f.airport_code.as_deref()));
    let outbound = non_blank(destination.outbound_date.as_deref());
    let return_date = non_blank(destination.return_date.as_deref());

    match (airport_code, outbound, return_date) {
        (Some(airport_code), Some(outbound), Some(return_date)) => build_flight_link(
            options.departure_id,
            airport_code,
            outbound,
            return_date,
            options.adults,
            options.currency,
        ),
        _ => String::new(),
    }
}

pub fn build_flight_link(
    departure_id: &str,
    dest_airport: &str,
    outbound_date: &str,
    return_date: &str,
    adults: u32,
    currency: &str,
) -> String {
    let query = format!(
        "flights from {} to {} on {} returning {}",
        departure_id, dest_airport, outbound_date, return_date
    );

    format!(
        "{}?q={}&curr={}&px={}",
        FLIGHTS_BASE_URL,
        urlencoding::encode(&query),
        urlencoding::encode(currency),
        adults
    )
}

/// Writes `140.0` as `140` so json and csv agree with the text listing.
fn whole_as_integer<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => serializer.serialize_some(&(*v as i64)),
        Some(v) => serializer.serialize_some(v),
        None => serializer.serialize_none(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
