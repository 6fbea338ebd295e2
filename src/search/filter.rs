use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use super::config::SearchConfig;
use super::error::SearchError;

/// Filename matching rules derived once from a [`SearchConfig`].
///
/// The term is a plain substring test against the file name; the extension
/// filter, when present, must equal the file's extension exactly.
#[derive(Debug, Clone)]
pub struct NameMatcher {
	term: String,
	extension: Option<String>,
	case_insensitive: bool,
}

impl NameMatcher {
	pub fn new(config: &SearchConfig) -> Self {
		let case_insensitive = config.case_insensitive();
		let fold = |value: &str| {
			if case_insensitive {
				value.to_lowercase()
			} else {
				value.to_string()
			}
		};

		Self {
			term: fold(config.term()),
			extension: config.extension().map(fold),
			case_insensitive,
		}
	}

	fn fold(&self, value: &str) -> String {
		if self.case_insensitive {
			value.to_lowercase()
		} else {
			value.to_string()
		}
	}

	/// Returns `true` if the file at `path` satisfies both the term and the
	/// extension filter.
	pub fn is_match(&self, path: &Path) -> bool {
		let Some(name) = path.file_name() else {
			return false;
		};
		let name = self.fold(&name.to_string_lossy());
		if !name.contains(&self.term) {
			return false;
		}

		match &self.extension {
			None => true,
			Some(filter) => path
				.extension()
				.map(|ext| self.fold(&format!(".{}", ext.to_string_lossy())))
				.is_some_and(|ext| ext == *filter),
		}
	}
}

/// Entry names the walker skips without matching or descending into them.
#[derive(Debug, Clone)]
pub struct ExcludeSet {
	globs: Option<Gitignore>,
}

impl ExcludeSet {
	pub fn empty() -> Self {
		Self { globs: None }
	}

	pub fn new(patterns: &[String]) -> Result<Self, SearchError> {
		if patterns.is_empty() {
			return Ok(Self::empty());
		}

		let mut builder = GitignoreBuilder::new("");
		for pattern in patterns {
			builder
				.add_line(None, pattern)
				.map_err(|source| SearchError::InvalidExclude {
					pattern: pattern.clone(),
					source,
				})?;
		}
		let globs = builder
			.build()
			.map_err(|source| SearchError::InvalidExclude {
				pattern: patterns.join(","),
				source,
			})?;

		Ok(Self { globs: Some(globs) })
	}

	/// Returns `true` when an entry with this name should be skipped.
	pub fn is_excluded(&self, name: &Path, is_dir: bool) -> bool {
		self.globs
			.as_ref()
			.is_some_and(|globs| globs.matched(name, is_dir).is_ignore())
	}
}

/// Everything the walker needs to decide what to do with an entry.
#[derive(Debug, Clone)]
pub struct EntryFilter {
	pub(crate) matcher: NameMatcher,
	pub(crate) excludes: ExcludeSet,
}

impl EntryFilter {
	pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
		Ok(Self {
			matcher: NameMatcher::new(config),
			excludes: ExcludeSet::new(config.excludes())?,
		})
	}
}
