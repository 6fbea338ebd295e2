use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::config::SearchConfig;
use super::session::{SessionOutcome, SessionSummary};

const RULE: &str = "------------------------------------------";

/// Plain-text record of a search run.
///
/// The header is written on creation, each match is appended and flushed as
/// soon as it is found, and [`finish`](Self::finish) appends the summary.
/// Dropping the writer closes the file on every exit path.
#[derive(Debug)]
pub struct TranscriptWriter {
	path: PathBuf,
	out: BufWriter<File>,
}

impl TranscriptWriter {
	pub fn create(path: &Path, config: &SearchConfig) -> io::Result<Self> {
		let file = File::create(path)?;
		let mut writer = Self {
			path: path.to_path_buf(),
			out: BufWriter::new(file),
		};
		writer.write_header(config)?;
		Ok(writer)
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn write_header(&mut self, config: &SearchConfig) -> io::Result<()> {
		writeln!(self.out, "rummage search results")?;
		writeln!(self.out, "Search term: '{}'", config.term())?;
		writeln!(self.out, "Starting from: {}", config.roots_label())?;
		writeln!(
			self.out,
			"Extension filter: {}",
			config.extension().unwrap_or("(none)")
		)?;
		writeln!(
			self.out,
			"Case insensitive: {}",
			if config.case_insensitive() { "yes" } else { "no" }
		)?;
		writeln!(self.out, "{RULE}")?;
		self.out.flush()
	}

	pub fn record_match(&mut self, path: &Path) -> io::Result<()> {
		writeln!(self.out, "{}", path.display())?;
		self.out.flush()
	}

	/// Append a note explaining why the run never started searching.
	pub fn record_rejection(&mut self, reason: &str) -> io::Result<()> {
		writeln!(self.out, "Search could not start: {reason}")?;
		self.out.flush()
	}

	pub fn finish(mut self, summary: &SessionSummary) -> io::Result<()> {
		writeln!(self.out, "{RULE}")?;
		match summary.outcome {
			SessionOutcome::Completed => {
				writeln!(self.out, "Search complete. Found {} file(s).", summary.found)?
			}
			SessionOutcome::Cancelled => writeln!(
				self.out,
				"Search was cancelled. Found {} file(s) before stopping.",
				summary.found
			)?,
			SessionOutcome::Rejected => writeln!(self.out, "Search failed. Found 0 file(s).")?,
		}
		writeln!(self.out, "Scanned {} item(s).", summary.scanned)?;
		writeln!(
			self.out,
			"Search took {:.3} seconds.",
			summary.elapsed_secs()
		)?;
		self.out.flush()
	}
}
