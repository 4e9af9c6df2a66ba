use crate::core::explore::ExploreReport;
use crate::core::presenter::{format_destination, DisplayOptions, ListingEntry};
use crate::domain::model::SearchRequest;
use crate::utils::error::{ExploreError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;

pub const NO_RESULTS_MESSAGE: &str = "No destinations found. Try different search parameters.";
const SEPARATOR_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Banner printed before the request goes out (text output only).
pub fn write_banner<W: Write>(out: &mut W, request: &SearchRequest) -> Result<()> {
    writeln!(
        out,
        "🌍 Fetching travel destinations from {}...",
        request.departure_id
    )?;
    writeln!(
        out,
        "   Interests: {} | Period: {}",
        request.interests, request.time_period
    )?;
    writeln!(
        out,
        "   Class: {} | Stops: {}",
        request.travel_class, request.stops
    )?;
    writeln!(out)?;
    Ok(())
}

pub fn write_report<W: Write>(
    out: &mut W,
    report: &ExploreReport,
    format: OutputFormat,
    options: &DisplayOptions<'_>,
) -> Result<()> {
    if report.is_empty() {
        // json output stays parseable; the notice goes to the log on stderr
        if format == OutputFormat::Json {
            tracing::warn!("{}", NO_RESULTS_MESSAGE);
            writeln!(out, "[]")?;
        } else {
            writeln!(out, "{}", NO_RESULTS_MESSAGE)?;
        }
        return Ok(());
    }

    match format {
        OutputFormat::Text => write_text(out, report, options),
        OutputFormat::Json => write_json(out, report, options),
        OutputFormat::Csv => write_csv(out, report, options),
    }
}

fn entries(report: &ExploreReport, options: &DisplayOptions<'_>) -> Vec<ListingEntry> {
    report
        .ranked
        .iter()
        .enumerate()
        .map(|(i, destination)| ListingEntry::new(destination, i + 1, options))
        .collect()
}

fn write_text<W: Write>(
    out: &mut W,
    report: &ExploreReport,
    options: &DisplayOptions<'_>,
) -> Result<()> {
    let separator = "=".repeat(SEPARATOR_WIDTH);

    writeln!(
        out,
        "📋 Found {} destinations. Showing top {} by cheapest price:",
        report.total,
        report.ranked.len()
    )?;
    writeln!(out)?;
    writeln!(out, "{}", separator)?;

    for (i, destination) in report.ranked.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "{}", format_destination(destination, i + 1, options))?;
        writeln!(out)?;
    }

    writeln!(out, "{}", separator)?;
    writeln!(out)?;
    writeln!(out, "💡 Tip: Use --help to see all available options")?;
    Ok(())
}

fn write_json<W: Write>(
    out: &mut W,
    report: &ExploreReport,
    options: &DisplayOptions<'_>,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &entries(report, options))
        .map_err(|e| ExploreError::OutputError(e.into()))?;
    writeln!(out)?;
    Ok(())
}

fn write_csv<W: Write>(
    out: &mut W,
    report: &ExploreReport,
    options: &DisplayOptions<'_>,
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for entry in entries(report, options) {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Destination, FlightInfo};

    const OPTIONS: DisplayOptions<'static> = DisplayOptions {
        currency: "EUR",
        departure_id: "VIE",
        adults: 1,
    };

    fn report() -> ExploreReport {
        let lisbon = Destination {
            name: Some("Lisbon".to_string()),
            country: Some("Portugal".to_string()),
            flight: Some(FlightInfo {
                price: Some(140.0),
                airline_name: Some("TAP".to_string()),
                stops: Some(1),
                flight_duration: Some("5 hr".to_string()),
                airport_code: Some("LIS".to_string()),
            }),
            outbound_date: Some("2025-05-02".to_string()),
            return_date: Some("2025-05-09".to_string()),
            avg_cost_per_night: None,
        };
        let unknown = Destination {
            name: Some("Somewhere".to_string()),
            ..Destination::default()
        };

        ExploreReport {
            total: 5,
            ranked: vec![lisbon, unknown],
        }
    }

    fn render(format: OutputFormat, report: &ExploreReport) -> String {
        let mut out: Vec<u8> = Vec::new();
        write_report(&mut out, report, format, &OPTIONS).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_output_is_framed() {
        let text = render(OutputFormat::Text, &report());
        let separator = "=".repeat(60);

        assert!(text.starts_with(
            "📋 Found 5 destinations. Showing top 2 by cheapest price:\n\n"
        ));
        assert_eq!(text.matches(&separator).count(), 2);
        assert!(text.contains("\n1. Lisbon, Portugal\n"));
        assert!(text.contains("   Flight: 140 EUR (TAP, 1 stop(s), 5 hr)"));
        assert!(text.contains("\n2. Somewhere, Unknown\n"));
        assert!(text.ends_with("💡 Tip: Use --help to see all available options\n"));
    }

    #[test]
    fn test_empty_report_prints_notice_for_text_and_csv() {
        let empty = ExploreReport {
            total: 0,
            ranked: Vec::new(),
        };

        for format in [OutputFormat::Text, OutputFormat::Csv] {
            assert_eq!(render(format, &empty), format!("{}\n", NO_RESULTS_MESSAGE));
        }
    }

    #[test]
    fn test_empty_report_in_json_is_an_empty_array() {
        let empty = ExploreReport {
            total: 0,
            ranked: Vec::new(),
        };

        let json = render(OutputFormat::Json, &empty);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value, serde_json::json!([]));
        assert!(!json.contains(NO_RESULTS_MESSAGE));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_write_failure_is_output_error() {
        let err = write_report(&mut BrokenPipe, &report(), OutputFormat::Json, &OPTIONS).unwrap_err();

        assert!(matches!(err, ExploreError::OutputError(_)));
        assert_eq!(err.category(), crate::utils::error::ErrorCategory::Output);
        assert!(err.to_string().starts_with("Output error:"));
    }

    #[test]
    fn test_whole_prices_match_across_formats() {
        let text = render(OutputFormat::Text, &report());
        let csv_text = render(OutputFormat::Csv, &report());
        let json = render(OutputFormat::Json, &report());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(text.contains("Flight: 140 EUR"));
        assert!(csv_text.lines().nth(1).unwrap().starts_with("1,Lisbon,Portugal,140,EUR,"));
        assert_eq!(value[0]["price"].to_string(), "140");
    }

    #[test]
    fn test_json_output_lists_ranked_entries() {
        let json = render(OutputFormat::Json, &report());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = value.as_array().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["rank"], 1);
        assert_eq!(entries[0]["name"], "Lisbon");
        assert_eq!(entries[0]["currency"], "EUR");
        assert!(entries[0]["booking_link"]
            .as_str()
            .unwrap()
            .contains("flights%20from%20VIE%20to%20LIS"));
        assert_eq!(entries[1]["booking_link"], "");
        assert!(entries[1]["price"].is_null());
    }

    #[test]
    fn test_csv_output_has_header_and_rows() {
        let csv_text = render(OutputFormat::Csv, &report());
        let lines: Vec<&str> = csv_text.lines().collect();

        assert_eq!(
            lines[0],
            "rank,name,country,price,currency,airline,stops,flight_duration,outbound_date,return_date,avg_cost_per_night,booking_link"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,Lisbon,Portugal,"));
        assert!(lines[2].starts_with("2,Somewhere,,,EUR,"));
    }

    #[test]
    fn test_banner_describes_request() {
        let mut out: Vec<u8> = Vec::new();
        write_banner(&mut out, &SearchRequest::default()).unwrap();
        let banner = String::from_utf8(out).unwrap();

        assert!(banner.starts_with("🌍 Fetching travel destinations from ZRH...\n"));
        assert!(banner.contains(
            "   Interests: popular | Period: one_week_trip_in_the_next_six_months\n"
        ));
        assert!(banner.contains("   Class: economy | Stops: any\n"));
    }
}
