use std::io::{self, Write};

use anyhow::Result;
use rummage::{SearchEvent, SessionOutcome, SessionSummary};
use serde_json::{Value, json};

use super::OutputFormat;

/// Print session events as they arrive.
///
/// Plain output keeps stdout for matching paths only so it can be piped;
/// JSON output writes one object per line to stdout.
pub(crate) struct EventPrinter {
	format: OutputFormat,
	show_progress: bool,
}

impl EventPrinter {
	pub(crate) fn new(format: OutputFormat, show_progress: bool) -> Self {
		Self {
			format,
			show_progress,
		}
	}

	/// Print one event. Fails when stdout has gone away.
	pub(crate) fn print(&self, event: &SearchEvent) -> Result<()> {
		match self.format {
			OutputFormat::Plain => self.print_plain(event),
			OutputFormat::Json => print_json(event),
		}
	}

	fn print_plain(&self, event: &SearchEvent) -> Result<()> {
		match event {
			SearchEvent::Match(path) => {
				let mut stdout = io::stdout().lock();
				writeln!(stdout, "{}", path.display())?;
			}
			SearchEvent::Diagnostic(diagnostic) => eprintln!("{diagnostic}"),
			SearchEvent::Error(message) => eprintln!("error: {message}"),
			SearchEvent::Progress(message) if self.show_progress => eprintln!("{message}"),
			SearchEvent::ProgressDetail {
				scanned,
				current_root: Some(root),
			} if self.show_progress => {
				eprintln!("scanned {scanned} item(s), searching {}", root.display());
			}
			SearchEvent::Finished(summary) => eprintln!("{}", summary_line(summary)),
			SearchEvent::Progress(_) | SearchEvent::ProgressDetail { .. } => {}
		}
		Ok(())
	}
}

fn print_json(event: &SearchEvent) -> Result<()> {
	let mut stdout = io::stdout().lock();
	writeln!(stdout, "{}", serde_json::to_string(&event_json(event))?)?;
	Ok(())
}

/// Human readable closing line for a run.
pub(crate) fn summary_line(summary: &SessionSummary) -> String {
	let head = match summary.outcome {
		SessionOutcome::Completed => format!("Found {} file(s)", summary.found),
		SessionOutcome::Cancelled => {
			format!("Cancelled after finding {} file(s)", summary.found)
		}
		SessionOutcome::Rejected => "Search did not start".to_string(),
	};
	format!(
		"{head}; scanned {} item(s) in {:.3}s.",
		summary.scanned,
		summary.elapsed_secs()
	)
}

/// JSON object describing a single event.
pub(crate) fn event_json(event: &SearchEvent) -> Value {
	match event {
		SearchEvent::Match(path) => json!({
			"type": "match",
			"path": path.display().to_string(),
		}),
		SearchEvent::Diagnostic(diagnostic) => json!({
			"type": "diagnostic",
			"path": diagnostic.path.display().to_string(),
			"message": diagnostic.message,
		}),
		SearchEvent::Error(message) => json!({
			"type": "error",
			"message": message,
		}),
		SearchEvent::Progress(message) => json!({
			"type": "progress",
			"message": message,
		}),
		SearchEvent::ProgressDetail {
			scanned,
			current_root,
		} => json!({
			"type": "progress_detail",
			"scanned": scanned,
			"current_root": current_root.as_ref().map(|root| root.display().to_string()),
		}),
		SearchEvent::Finished(summary) => json!({
			"type": "finished",
			"outcome": outcome_name(summary.outcome),
			"found": summary.found,
			"scanned": summary.scanned,
			"elapsed_secs": summary.elapsed_secs(),
		}),
	}
}

fn outcome_name(outcome: SessionOutcome) -> &'static str {
	match outcome {
		SessionOutcome::Completed => "completed",
		SessionOutcome::Cancelled => "cancelled",
		SessionOutcome::Rejected => "rejected",
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;
	use std::time::Duration;

	use rummage::Diagnostic;

	use super::*;

	fn summary(outcome: SessionOutcome) -> SessionSummary {
		SessionSummary {
			found: 2,
			scanned: 40,
			elapsed: Duration::from_millis(1500),
			outcome,
		}
	}

	#[test]
	fn match_event_serializes_path() {
		let value = event_json(&SearchEvent::Match(PathBuf::from("/data/report.txt")));
		assert_eq!(value["type"], "match");
		assert_eq!(value["path"], "/data/report.txt");
	}

	#[test]
	fn diagnostic_event_carries_path_and_message() {
		let diagnostic = Diagnostic {
			path: PathBuf::from("/root"),
			message: "Cannot access directory: /root".into(),
		};
		let value = event_json(&SearchEvent::Diagnostic(diagnostic));
		assert_eq!(value["type"], "diagnostic");
		assert_eq!(value["path"], "/root");
	}

	#[test]
	fn finished_event_reports_totals() {
		let value = event_json(&SearchEvent::Finished(summary(SessionOutcome::Cancelled)));
		assert_eq!(value["outcome"], "cancelled");
		assert_eq!(value["found"], 2);
		assert_eq!(value["scanned"], 40);
	}

	#[test]
	fn progress_detail_without_root_is_null() {
		let value = event_json(&SearchEvent::ProgressDetail {
			scanned: 7,
			current_root: None,
		});
		assert!(value["current_root"].is_null());
	}

	#[test]
	fn summary_line_mentions_outcome() {
		assert_eq!(
			summary_line(&summary(SessionOutcome::Completed)),
			"Found 2 file(s); scanned 40 item(s) in 1.500s."
		);
		assert!(summary_line(&summary(SessionOutcome::Cancelled)).starts_with("Cancelled"));
	}
}
