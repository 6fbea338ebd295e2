//! Process-wide logger setup for the binary.
//!
//! The library only talks to the `log` facade; embedders pick their own
//! logger. The CLI installs a `simplelog` terminal logger on stderr so log
//! lines never mix with results printed on stdout.

use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Level used when neither configuration nor CLI picks one.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Parse a level name such as `info` or `DEBUG`.
pub fn parse_level(raw: &str) -> Result<LevelFilter> {
	LevelFilter::from_str(raw.trim())
		.map_err(|_| anyhow!("unknown log level '{raw}' (expected off, error, warn, info, debug or trace)"))
}

/// Install the terminal logger. Call once, before starting a search.
pub fn initialize(level: LevelFilter) -> Result<()> {
	let config = ConfigBuilder::new()
		.set_time_level(LevelFilter::Debug)
		.set_thread_level(LevelFilter::Trace)
		.set_target_level(LevelFilter::Off)
		.build();

	TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
		.context("failed to install terminal logger")
}
