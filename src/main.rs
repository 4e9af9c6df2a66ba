use clap::Parser;
use std::process::ExitCode;
use travel_explore::utils::logger;
use travel_explore::{app::runner, CliConfig, ExploreError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting travel-explore");

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => return report_failure(&e),
    };
    tracing::debug!("Resolved config: {:?}", config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match runner::run(&config, &mut out).await {
        Ok(report) => {
            tracing::info!(
                "✅ Listed {} of {} destinations",
                report.ranked.len(),
                report.total
            );
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(&e),
    }
}

fn report_failure(e: &ExploreError) -> ExitCode {
    tracing::debug!("Run failed: {:?} (Category: {:?})", e, e.category());

    eprintln!("❌ {}", e);
    if let Some(hint) = e.hint() {
        eprintln!("   {}", hint);
    }

    ExitCode::from(e.exit_code())
}
