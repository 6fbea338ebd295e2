use std::path::{Path, PathBuf};

use super::error::SearchError;

/// Where a search run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootSelection {
	/// Every writable mounted volume, as reported by the root enumerator.
	AllRoots,
	/// A single directory supplied by the caller.
	Path(PathBuf),
}

/// Immutable parameters for one search run.
///
/// Build one with [`SearchConfig::builder`]; a new search needs a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
	term: String,
	roots: RootSelection,
	extension: Option<String>,
	output_file: Option<PathBuf>,
	case_insensitive: bool,
	verbose_errors: bool,
	excludes: Vec<String>,
}

impl SearchConfig {
	/// Start building a configuration for the given search term.
	pub fn builder(term: impl Into<String>) -> SearchConfigBuilder {
		SearchConfigBuilder::new(term)
	}

	pub fn term(&self) -> &str {
		&self.term
	}

	pub fn roots(&self) -> &RootSelection {
		&self.roots
	}

	/// Normalized extension filter including its leading `.`, if any.
	pub fn extension(&self) -> Option<&str> {
		self.extension.as_deref()
	}

	pub fn output_file(&self) -> Option<&Path> {
		self.output_file.as_deref()
	}

	pub fn case_insensitive(&self) -> bool {
		self.case_insensitive
	}

	pub fn verbose_errors(&self) -> bool {
		self.verbose_errors
	}

	/// Gitignore-style name globs for entries that are skipped entirely.
	pub fn excludes(&self) -> &[String] {
		&self.excludes
	}

	/// Human readable label for the starting location.
	pub fn roots_label(&self) -> String {
		match &self.roots {
			RootSelection::AllRoots => "All roots".to_string(),
			RootSelection::Path(path) => path.display().to_string(),
		}
	}
}

/// Builder for [`SearchConfig`].
#[derive(Debug, Clone)]
pub struct SearchConfigBuilder {
	term: String,
	start_path: Option<PathBuf>,
	extension: Option<String>,
	output_file: Option<PathBuf>,
	case_insensitive: bool,
	verbose_errors: bool,
	excludes: Vec<String>,
}

impl SearchConfigBuilder {
	fn new(term: impl Into<String>) -> Self {
		Self {
			term: term.into(),
			start_path: None,
			extension: None,
			output_file: None,
			case_insensitive: false,
			verbose_errors: false,
			excludes: Vec::new(),
		}
	}

	/// Search below `path`. An empty path selects every mounted root.
	pub fn start_path(mut self, path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		self.start_path = (!path.as_os_str().is_empty()).then_some(path);
		self
	}

	/// Search every mounted root instead of a single directory.
	pub fn all_roots(mut self) -> Self {
		self.start_path = None;
		self
	}

	/// Only report files with this extension, with or without the leading dot.
	pub fn extension(mut self, extension: impl AsRef<str>) -> Self {
		self.extension = normalize_extension(extension.as_ref());
		self
	}

	/// Write a transcript of the run to this file.
	pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		self.output_file = (!path.as_os_str().is_empty()).then_some(path);
		self
	}

	pub fn case_insensitive(mut self, enabled: bool) -> Self {
		self.case_insensitive = enabled;
		self
	}

	pub fn verbose_errors(mut self, enabled: bool) -> Self {
		self.verbose_errors = enabled;
		self
	}

	pub fn excludes<I, S>(mut self, patterns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.excludes = patterns
			.into_iter()
			.map(Into::into)
			.map(|pattern: String| pattern.trim().to_string())
			.filter(|pattern| !pattern.is_empty())
			.collect();
		self
	}

	/// Validate the term and produce the immutable configuration.
	pub fn build(self) -> Result<SearchConfig, SearchError> {
		let term = self.term.trim().to_string();
		if term.is_empty() {
			return Err(SearchError::EmptyTerm);
		}

		let roots = match self.start_path {
			Some(path) => RootSelection::Path(path),
			None => RootSelection::AllRoots,
		};

		Ok(SearchConfig {
			term,
			roots,
			extension: self.extension,
			output_file: self.output_file,
			case_insensitive: self.case_insensitive,
			verbose_errors: self.verbose_errors,
			excludes: self.excludes,
		})
	}
}

/// Normalize an extension filter so it always carries a leading dot.
///
/// Returns `None` for blank input, which means "no filter".
pub fn normalize_extension(raw: &str) -> Option<String> {
	let trimmed = raw.trim();
	if trimmed.is_empty() || trimmed == "." {
		return None;
	}
	if trimmed.starts_with('.') {
		Some(trimmed.to_string())
	} else {
		Some(format!(".{trimmed}"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extension_gains_leading_dot() {
		assert_eq!(normalize_extension("txt").as_deref(), Some(".txt"));
		assert_eq!(normalize_extension(" .rs ").as_deref(), Some(".rs"));
		assert_eq!(normalize_extension("  "), None);
	}

	#[test]
	fn extension_case_is_preserved() {
		assert_eq!(normalize_extension("TXT").as_deref(), Some(".TXT"));
	}

	#[test]
	fn empty_start_path_selects_all_roots() {
		let config = SearchConfig::builder("report")
			.start_path("")
			.build()
			.expect("valid config");
		assert_eq!(config.roots(), &RootSelection::AllRoots);
		assert_eq!(config.roots_label(), "All roots");
	}

	#[test]
	fn explicit_start_path_is_kept() {
		let config = SearchConfig::builder("report")
			.start_path("/srv/data")
			.build()
			.expect("valid config");
		assert_eq!(
			config.roots(),
			&RootSelection::Path(PathBuf::from("/srv/data"))
		);
	}

	#[test]
	fn blank_term_is_rejected() {
		let err = SearchConfig::builder("   ").build().unwrap_err();
		assert!(matches!(err, SearchError::EmptyTerm));
	}

	#[test]
	fn term_is_trimmed() {
		let config = SearchConfig::builder("  report ").build().expect("valid");
		assert_eq!(config.term(), "report");
	}

	#[test]
	fn blank_excludes_are_dropped() {
		let config = SearchConfig::builder("x")
			.excludes(["node_modules", " ", "*.tmp "])
			.build()
			.expect("valid");
		assert_eq!(config.excludes(), ["node_modules", "*.tmp"]);
	}
}
