//! Orchestration of a single search run.
//!
//! A [`SearchSession`] owns everything one run needs: its configuration, a
//! fresh [`ControlChannel`] and fresh counters. Running it resolves the root
//! set, walks each root in order and streams [`SearchEvent`]s to the caller
//! over an `mpsc` channel. Exactly one [`SearchEvent::Finished`] is sent per
//! run, whichever way the run ends.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::config::{RootSelection, SearchConfig};
use super::control::ControlChannel;
use super::counters::{ProgressSnapshot, SessionCounters};
use super::error::{Diagnostic, SearchError};
use super::filter::EntryFilter;
use super::roots::{RootEnumerator, RootSource};
use super::transcript::TranscriptWriter;
use super::walker::{DirectoryWalker, WalkObserver};

const WORKER_NAME: &str = "rummage-search";
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;
const GRACE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
	/// Every root was searched.
	Completed,
	/// The run was cancelled before all roots were searched.
	Cancelled,
	/// A configuration error stopped the run before any searching.
	Rejected,
}

/// Final totals of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
	pub found: u64,
	pub scanned: u64,
	pub elapsed: Duration,
	pub outcome: SessionOutcome,
}

impl SessionSummary {
	pub fn elapsed_secs(&self) -> f64 {
		self.elapsed.as_secs_f64()
	}
}

/// Events streamed from a running session to its caller, in production order.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
	/// A matching file, by absolute path.
	Match(PathBuf),
	/// A skipped entry or directory. Only sent with verbose errors enabled.
	Diagnostic(Diagnostic),
	/// A configuration or transcript error. Always sent.
	Error(String),
	/// Human readable status line.
	Progress(String),
	/// Cumulative scanned count and the root being searched, if any.
	ProgressDetail {
		scanned: u64,
		current_root: Option<PathBuf>,
	},
	/// Terminal event, sent exactly once.
	Finished(SessionSummary),
}

/// A single, not yet started search run.
pub struct SearchSession {
	config: SearchConfig,
	control: ControlChannel,
	counters: Arc<SessionCounters>,
	roots: Box<dyn RootSource + Send>,
}

impl SearchSession {
	pub fn new(config: SearchConfig) -> Self {
		Self {
			config,
			control: ControlChannel::new(),
			counters: Arc::new(SessionCounters::new()),
			roots: Box::new(RootEnumerator::system()),
		}
	}

	/// Replace the source of roots used in all-roots mode.
	pub fn with_root_source(mut self, source: impl RootSource + Send + 'static) -> Self {
		self.roots = Box::new(source);
		self
	}

	pub fn config(&self) -> &SearchConfig {
		&self.config
	}

	/// Handle for pausing, resuming or cancelling this run from another thread.
	pub fn control(&self) -> ControlChannel {
		self.control.clone()
	}

	/// Live counters of this run.
	pub fn counters(&self) -> Arc<SessionCounters> {
		Arc::clone(&self.counters)
	}

	/// Run the search on the current thread, streaming events into `events`.
	pub fn run(self, events: &Sender<SearchEvent>) -> SessionSummary {
		let started = Instant::now();
		let Self {
			config,
			control,
			counters,
			roots,
		} = self;
		log::debug!(
			"starting search for '{}' in {}",
			config.term(),
			config.roots_label()
		);

		let mut reporter = Reporter::new(events, &control);
		reporter.open_transcript(&config);

		let filter = match EntryFilter::from_config(&config) {
			Ok(filter) => filter,
			Err(err) => return reporter.reject(err, started),
		};
		let roots = match resolve_roots(&config, roots.as_ref(), &mut reporter) {
			Ok(roots) => roots,
			Err(err) => return reporter.reject(err, started),
		};

		let walker = DirectoryWalker::new(&config, &filter, &counters, &control);
		for root in &roots {
			if control.is_cancelled() {
				break;
			}
			reporter.progress(format!("Searching {}...", root.display()));
			reporter.detail(counters.scanned(), Some(root));
			walker.walk(root, &mut reporter);
			reporter.detail(counters.scanned(), Some(root));
		}

		let outcome = if control.is_cancelled() {
			SessionOutcome::Cancelled
		} else {
			SessionOutcome::Completed
		};
		reporter.finish(SessionSummary {
			found: counters.found(),
			scanned: counters.scanned(),
			elapsed: started.elapsed(),
			outcome,
		})
	}

	/// Run the search on a dedicated worker thread.
	pub fn spawn(self) -> io::Result<SearchHandle> {
		let (tx, rx) = mpsc::channel();
		let control = self.control();
		let counters = self.counters();

		let worker = thread::Builder::new()
			.name(WORKER_NAME.to_string())
			.stack_size(WORKER_STACK_SIZE)
			.spawn(move || self.run(&tx))?;

		Ok(SearchHandle {
			control,
			counters,
			events: rx,
			worker: Some(worker),
		})
	}
}

fn resolve_roots(
	config: &SearchConfig,
	source: &dyn RootSource,
	reporter: &mut Reporter<'_>,
) -> Result<Vec<PathBuf>, SearchError> {
	match config.roots() {
		RootSelection::AllRoots => {
			reporter.progress("Enumerating mounted volumes...");
			let roots = source.roots();
			if roots.is_empty() {
				return Err(SearchError::NoRoots);
			}
			log::debug!("searching {} root(s)", roots.len());
			Ok(roots)
		}
		RootSelection::Path(path) => {
			if !path.exists() {
				return Err(SearchError::StartPathMissing { path: path.clone() });
			}
			if !path.is_dir() {
				return Err(SearchError::NotADirectory { path: path.clone() });
			}
			let absolute = std::path::absolute(path).map_err(|source| SearchError::ResolvePath {
				path: path.clone(),
				source,
			})?;
			Ok(vec![absolute])
		}
	}
}

/// Forwards walker output and lifecycle events to the caller and the
/// transcript.
struct Reporter<'a> {
	events: &'a Sender<SearchEvent>,
	control: &'a ControlChannel,
	transcript: Option<TranscriptWriter>,
	disconnected: bool,
}

impl<'a> Reporter<'a> {
	fn new(events: &'a Sender<SearchEvent>, control: &'a ControlChannel) -> Self {
		Self {
			events,
			control,
			transcript: None,
			disconnected: false,
		}
	}

	fn send(&mut self, event: SearchEvent) {
		if self.events.send(event).is_err() && !self.disconnected {
			// Nobody is listening any more.
			log::debug!("event receiver dropped, cancelling search");
			self.disconnected = true;
			self.control.request_cancel();
		}
	}

	fn error(&mut self, err: SearchError) {
		self.error_message(err.into_message());
	}

	fn error_message(&mut self, message: String) {
		log::warn!("{message}");
		self.send(SearchEvent::Error(message));
	}

	fn progress(&mut self, text: impl Into<String>) {
		self.send(SearchEvent::Progress(text.into()));
	}

	fn detail(&mut self, scanned: u64, current_root: Option<&Path>) {
		self.send(SearchEvent::ProgressDetail {
			scanned,
			current_root: current_root.map(Path::to_path_buf),
		});
	}

	fn open_transcript(&mut self, config: &SearchConfig) {
		let Some(path) = config.output_file() else {
			return;
		};
		match TranscriptWriter::create(path, config) {
			Ok(writer) => self.transcript = Some(writer),
			Err(err) => self.error(SearchError::transcript(path, err)),
		}
	}

	/// Run `write` against the transcript, dropping the sink on failure.
	fn with_transcript(&mut self, write: impl FnOnce(&mut TranscriptWriter) -> io::Result<()>) {
		let Some(writer) = self.transcript.as_mut() else {
			return;
		};
		if let Err(err) = write(writer) {
			let path = writer.path().to_path_buf();
			self.transcript = None;
			self.error(SearchError::transcript(&path, err));
		}
	}

	fn close_transcript(&mut self, summary: &SessionSummary) {
		if let Some(writer) = self.transcript.take() {
			let path = writer.path().to_path_buf();
			if let Err(err) = writer.finish(summary) {
				self.error(SearchError::transcript(&path, err));
			}
		}
	}

	fn reject(mut self, err: SearchError, started: Instant) -> SessionSummary {
		let reason = err.into_message();
		self.error_message(reason.clone());
		self.with_transcript(|writer| writer.record_rejection(&reason));

		let summary = SessionSummary {
			found: 0,
			scanned: 0,
			elapsed: started.elapsed(),
			outcome: SessionOutcome::Rejected,
		};
		self.close_transcript(&summary);
		self.send(SearchEvent::Finished(summary));
		summary
	}

	fn finish(mut self, summary: SessionSummary) -> SessionSummary {
		self.close_transcript(&summary);

		let status = match summary.outcome {
			SessionOutcome::Cancelled => "Search cancelled.",
			_ => "Search completed.",
		};
		log::info!(
			"{status} found {} file(s), scanned {} item(s) in {:.3}s",
			summary.found,
			summary.scanned,
			summary.elapsed_secs()
		);
		self.progress(status);
		self.detail(summary.scanned, None);
		self.send(SearchEvent::Finished(summary));
		summary
	}
}

impl WalkObserver for Reporter<'_> {
	fn on_match(&mut self, path: &Path) {
		self.with_transcript(|writer| writer.record_match(path));
		self.send(SearchEvent::Match(path.to_path_buf()));
	}

	fn on_diagnostic(&mut self, diagnostic: Diagnostic) {
		self.send(SearchEvent::Diagnostic(diagnostic));
	}
}

/// Caller-side handle to a session running on a worker thread.
///
/// Dropping the handle while the worker is still running cancels the run.
pub struct SearchHandle {
	control: ControlChannel,
	counters: Arc<SessionCounters>,
	events: Receiver<SearchEvent>,
	worker: Option<JoinHandle<SessionSummary>>,
}

impl SearchHandle {
	pub fn pause(&self) {
		self.control.request_pause();
	}

	pub fn resume(&self) {
		self.control.request_resume();
	}

	pub fn cancel(&self) {
		self.control.request_cancel();
	}

	pub fn control(&self) -> &ControlChannel {
		&self.control
	}

	/// Live found and scanned counts, without waiting on the worker.
	pub fn progress(&self) -> ProgressSnapshot {
		self.counters.snapshot()
	}

	/// Event stream of the run. Iteration ends after the worker exits.
	pub fn events(&self) -> &Receiver<SearchEvent> {
		&self.events
	}

	pub fn is_finished(&self) -> bool {
		self.worker.as_ref().is_none_or(JoinHandle::is_finished)
	}

	/// Wait for the worker and return its summary.
	pub fn join(mut self) -> Result<SessionSummary, SearchError> {
		match self.worker.take() {
			Some(worker) => worker.join().map_err(|_| SearchError::WorkerPanicked),
			None => Err(SearchError::WorkerPanicked),
		}
	}

	/// Cancel the run and wait at most `grace` for the worker to stop.
	///
	/// Returns `None` if the worker did not stop in time; it is then left
	/// detached, since a thread cannot be terminated from outside.
	pub fn cancel_with_grace(mut self, grace: Duration) -> Option<SessionSummary> {
		self.control.request_cancel();
		let worker = self.worker.take()?;
		let deadline = Instant::now() + grace;
		while !worker.is_finished() {
			if Instant::now() >= deadline {
				log::warn!("search worker did not stop within {grace:?}, detaching it");
				return None;
			}
			thread::sleep(GRACE_POLL_INTERVAL);
		}
		worker.join().ok()
	}
}

impl Drop for SearchHandle {
	fn drop(&mut self) {
		if self
			.worker
			.as_ref()
			.is_some_and(|worker| !worker.is_finished())
		{
			self.control.request_cancel();
		}
	}
}

#[cfg(test)]
mod tests;
