mod cli;
mod settings;
mod workflow;

use std::process::ExitCode;

use anyhow::Result;
use cli::parse_cli;
use rummage::{SessionOutcome, logging};
use workflow::SearchWorkflow;

fn main() -> Result<ExitCode> {
	let cli = parse_cli();
	let resolved = settings::load(&cli)?;

	logging::initialize(resolved.log_level)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let summary = SearchWorkflow::from_config(resolved, &cli).run()?;
	log::info!(
		"search finished: {:?}, {} found, {} scanned",
		summary.outcome,
		summary.found,
		summary.scanned
	);

	Ok(match summary.outcome {
		SessionOutcome::Rejected => ExitCode::FAILURE,
		SessionOutcome::Completed | SessionOutcome::Cancelled => ExitCode::SUCCESS,
	})
}
