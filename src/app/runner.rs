use crate::adapters::searchapi::{ApiCredential, SearchApiClient};
use crate::config::RunConfig;
use crate::core::explore::{ExploreEngine, ExploreReport};
use crate::core::render::{write_banner, write_report, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::io::Write;

/// One full invocation: validate, read the key, fetch, rank, print.
/// Nothing touches the network until the configuration and key check out.
pub async fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<ExploreReport> {
    config.validate()?;
    let credential = ApiCredential::from_var(&config.api_key_env)?;

    if config.format == OutputFormat::Text {
        write_banner(out, &config.request)?;
    }

    let client = SearchApiClient::new(config.endpoint.clone(), credential);
    tracing::debug!("Using endpoint {}", client.endpoint());
    let engine = ExploreEngine::new(client);

    let report = engine.run(&config.request, config.limit).await?;
    write_report(out, &report, config.format, &config.display_options())?;
    out.flush()?;

    Ok(report)
}
