use std::io::{self, BufRead};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use rummage::{ControlChannel, SearchConfig, SearchSession, SessionSummary};

use crate::cli::{CliArgs, EventPrinter, OutputFormat};
use crate::settings::ResolvedConfig;

/// How long a cancelled worker may take to wind down before we give up on it.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Coordinates running a search session and presenting its events.
pub(crate) struct SearchWorkflow {
	search: SearchConfig,
	format: OutputFormat,
	show_progress: bool,
	interactive: bool,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig, cli: &CliArgs) -> Self {
		Self {
			search: config.search,
			format: cli.format,
			show_progress: cli.progress,
			interactive: cli.interactive,
		}
	}

	/// Run the search to completion, printing events as they arrive.
	pub(crate) fn run(self) -> Result<SessionSummary> {
		let handle = SearchSession::new(self.search)
			.spawn()
			.context("failed to start the search worker")?;

		if self.interactive {
			spawn_control_reader(handle.control().clone());
		}

		let printer = EventPrinter::new(self.format, self.show_progress);
		let mut output_closed = false;
		for event in handle.events() {
			if let Err(err) = printer.print(&event) {
				log::debug!("stopping search, output is gone: {err:#}");
				output_closed = true;
				break;
			}
		}

		if output_closed {
			handle
				.cancel_with_grace(SHUTDOWN_GRACE)
				.ok_or_else(|| anyhow!("search worker did not stop within {SHUTDOWN_GRACE:?}"))
		} else {
			Ok(handle.join()?)
		}
	}
}

/// Commands accepted on stdin in interactive mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlCommand {
	Pause,
	Resume,
	Cancel,
}

impl ControlCommand {
	fn parse(line: &str) -> Option<Self> {
		match line.trim().to_ascii_lowercase().as_str() {
			"p" | "pause" => Some(Self::Pause),
			"r" | "resume" => Some(Self::Resume),
			"c" | "cancel" | "q" | "quit" => Some(Self::Cancel),
			_ => None,
		}
	}

	fn apply(self, control: &ControlChannel) {
		match self {
			Self::Pause => control.request_pause(),
			Self::Resume => control.request_resume(),
			Self::Cancel => control.request_cancel(),
		}
	}
}

/// Forward stdin commands to the session until it is cancelled or stdin closes.
///
/// The reader thread is detached; it ends with the process if stdin stays open.
fn spawn_control_reader(control: ControlChannel) {
	eprintln!("Controls: p = pause, r = resume, c = cancel");
	let spawned = thread::Builder::new()
		.name("rummage-controls".into())
		.spawn(move || {
			for line in io::stdin().lock().lines() {
				let Ok(line) = line else { break };
				if line.trim().is_empty() {
					continue;
				}
				match ControlCommand::parse(&line) {
					Some(command) => {
						log::debug!("control command: {command:?}");
						command.apply(&control);
					}
					None => eprintln!("unknown command '{}' (use p, r or c)", line.trim()),
				}
				if control.is_cancelled() {
					break;
				}
			}
		});
	if let Err(err) = spawned {
		log::warn!("interactive controls unavailable: {err}");
	}
}
