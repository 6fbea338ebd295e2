//! Recursive, depth-first filename walker.
//!
//! The walk is a plain recursive function: pausing parks the worker inside
//! [`ControlChannel::checkpoint`] with the whole call stack intact, so
//! resuming continues from the exact entry where it stopped. Control signals
//! are observed once per directory and once per directory entry.
//!
//! Filesystem errors never escape a walk. An unreadable directory ends that
//! directory's listing and an unreadable entry is skipped; either way the
//! observer hears about it only when verbose errors are enabled.

use std::fs;
use std::path::Path;

use super::config::SearchConfig;
use super::control::{Checkpoint, ControlChannel};
use super::counters::SessionCounters;
use super::error::Diagnostic;
use super::filter::EntryFilter;

/// Receives what a walk finds, on the walking thread.
pub trait WalkObserver {
	/// A regular file whose name matched. `path` is absolute when the walk
	/// root was.
	fn on_match(&mut self, path: &Path);

	/// An entry or directory was skipped because of a filesystem error.
	fn on_diagnostic(&mut self, diagnostic: Diagnostic);
}

/// Walks one root at a time on behalf of a search session.
pub struct DirectoryWalker<'a> {
	filter: &'a EntryFilter,
	counters: &'a SessionCounters,
	control: &'a ControlChannel,
	verbose: bool,
}

impl<'a> DirectoryWalker<'a> {
	pub fn new(
		config: &SearchConfig,
		filter: &'a EntryFilter,
		counters: &'a SessionCounters,
		control: &'a ControlChannel,
	) -> Self {
		Self {
			filter,
			counters,
			control,
			verbose: config.verbose_errors(),
		}
	}

	/// Search `dir` and everything below it.
	///
	/// Returns early, without touching the filesystem, once the control
	/// channel reports cancellation. A `dir` that is missing or not a
	/// directory is silently ignored.
	pub fn walk(&self, dir: &Path, observer: &mut dyn WalkObserver) {
		if self.control.checkpoint() == Checkpoint::Stop {
			return;
		}

		if !dir.is_dir() {
			return;
		}

		let entries = match fs::read_dir(dir) {
			Ok(entries) => entries,
			Err(err) => {
				self.report(observer, Diagnostic::unreadable_directory(dir, &err));
				return;
			}
		};

		for entry in entries {
			if self.control.checkpoint() == Checkpoint::Stop {
				return;
			}

			let entry = match entry {
				Ok(entry) => entry,
				Err(err) => {
					// Listing failures end this directory only.
					self.report(observer, Diagnostic::unreadable_directory(dir, &err));
					return;
				}
			};
			self.counters.record_scanned();

			let path = entry.path();
			let file_type = match entry.file_type() {
				Ok(file_type) => file_type,
				Err(err) => {
					self.report(observer, Diagnostic::unreadable_entry(&path, &err));
					continue;
				}
			};

			if self
				.filter
				.excludes
				.is_excluded(Path::new(&entry.file_name()), file_type.is_dir())
			{
				log::trace!("excluded {}", path.display());
				continue;
			}

			if file_type.is_dir() {
				self.walk(&path, observer);
			} else if file_type.is_file() {
				if self.filter.matcher.is_match(&path) {
					self.counters.record_found();
					observer.on_match(&path);
				}
			} else {
				log::trace!("skipping non-regular entry {}", path.display());
			}
		}
	}

	fn report(&self, observer: &mut dyn WalkObserver, diagnostic: Diagnostic) {
		log::debug!("{diagnostic}");
		if self.verbose {
			observer.on_diagnostic(diagnostic);
		}
	}
}
