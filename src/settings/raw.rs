use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use rummage::SearchConfig;
use rummage::logging::{self, DEFAULT_LEVEL};

use crate::cli::CliArgs;

use super::resolved::ResolvedConfig;
use super::util::sanitize_patterns;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search: SearchSection,
	logging: LoggingSection,
}

/// Search options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
	root: Option<PathBuf>,
	extension: Option<String>,
	output_file: Option<PathBuf>,
	case_insensitive: Option<bool>,
	verbose_errors: Option<bool>,
	excludes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
	level: Option<String>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(root) = cli.root.clone() {
			self.search.root = Some(root);
		}
		if let Some(extension) = cli.extension.clone() {
			self.search.extension = Some(extension);
		}
		if let Some(path) = cli.output.clone() {
			self.search.output_file = Some(path);
		}
		if let Some(value) = cli.ignore_case {
			self.search.case_insensitive = Some(value);
		}
		if let Some(value) = cli.verbose_errors {
			self.search.verbose_errors = Some(value);
		}
		if let Some(patterns) = &cli.exclude {
			self.search.excludes = Some(patterns.clone());
		}
		if let Some(level) = cli.log_level.clone() {
			self.logging.level = Some(level);
		}
	}

	/// Convert the raw configuration into a [`ResolvedConfig`] for `term`,
	/// validating and filling defaults where required.
	pub(super) fn resolve(self, term: &str) -> Result<ResolvedConfig> {
		let mut builder = SearchConfig::builder(term)
			.case_insensitive(self.search.case_insensitive.unwrap_or(false))
			.verbose_errors(self.search.verbose_errors.unwrap_or(false));

		builder = match self.search.root {
			Some(root) => builder.start_path(root),
			None => builder.all_roots(),
		};
		if let Some(extension) = self.search.extension {
			builder = builder.extension(extension);
		}
		if let Some(path) = self.search.output_file {
			builder = builder.output_file(path);
		}
		if let Some(patterns) = self.search.excludes {
			builder = builder.excludes(sanitize_patterns(patterns));
		}

		let search = builder.build().context("invalid search settings")?;

		let log_level = match self.logging.level.filter(|level| !level.trim().is_empty()) {
			Some(level) => logging::parse_level(&level)?,
			None => DEFAULT_LEVEL,
		};

		Ok(ResolvedConfig { search, log_level })
	}
}
