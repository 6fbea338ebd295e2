use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that stop a search run before (or instead of) walking anything.
///
/// Traversal problems never surface as a [`SearchError`]; they are reported
/// as [`Diagnostic`]s and the walk carries on.
#[derive(Debug, Error)]
pub enum SearchError {
	/// The search term was empty after trimming.
	#[error("a search term is required")]
	EmptyTerm,

	/// The explicit start path does not exist.
	#[error("start path does not exist: {}", .path.display())]
	StartPathMissing { path: PathBuf },

	/// The explicit start path exists but is not a directory.
	#[error("start path is not a directory: {}", .path.display())]
	NotADirectory { path: PathBuf },

	/// The explicit start path could not be made absolute.
	#[error("failed to resolve start path {}", .path.display())]
	ResolvePath {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// All-roots mode found nothing to search.
	#[error("no searchable volumes were found")]
	NoRoots,

	/// An exclude pattern could not be compiled.
	#[error("invalid exclude pattern '{pattern}'")]
	InvalidExclude {
		pattern: String,
		#[source]
		source: ignore::Error,
	},

	/// The transcript file could not be opened or written.
	#[error("cannot write transcript {}", .path.display())]
	Transcript {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The worker thread panicked before producing a summary.
	#[error("search worker panicked")]
	WorkerPanicked,
}

impl SearchError {
	pub(crate) fn transcript(path: &Path, source: io::Error) -> Self {
		Self::Transcript {
			path: path.to_path_buf(),
			source,
		}
	}

	/// Render the error together with its source chain on one line.
	pub fn into_message(self) -> String {
		format!("{:#}", anyhow::Error::new(self))
	}
}

/// Advisory report about a filesystem entry the walker had to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	pub path: PathBuf,
	pub message: String,
}

impl Diagnostic {
	pub(crate) fn unreadable_directory(path: &Path, err: &io::Error) -> Self {
		Self {
			path: path.to_path_buf(),
			message: format!("cannot read directory {}: {err}", path.display()),
		}
	}

	pub(crate) fn unreadable_entry(path: &Path, err: &io::Error) -> Self {
		Self {
			path: path.to_path_buf(),
			message: format!("cannot inspect {}: {err}", path.display()),
		}
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "warning: {}", self.message)
	}
}
