use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, ColorChoice, Parser};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `rummage` binary.
#[derive(Parser, Debug)]
#[command(
	name = "rummage",
	version,
	long_version = long_version(),
	about = "Find files whose names contain a search term",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(value_name = "TERM", help = "Text that must appear in the file name")]
	pub(crate) term: String,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "RUMMAGE_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'r',
		long,
		value_name = "PATH",
		help = "Directory to search (default: every mounted volume)"
	)]
	pub(crate) root: Option<PathBuf>,
	#[arg(
		short = 'e',
		long,
		value_name = "EXT",
		help = "Only report files with this extension, e.g. txt or .txt (default: any)"
	)]
	pub(crate) extension: Option<String>,
	#[arg(
		short = 'o',
		long,
		value_name = "FILE",
		help = "Also write the results to this file (default: none)"
	)]
	pub(crate) output: Option<PathBuf>,
	#[arg(
		short = 'i',
		long = "ignore-case",
		value_name = "BOOL",
		value_parser = BoolishValueParser::new(),
		help = "Match the term case-insensitively (default: false)"
	)]
	pub(crate) ignore_case: Option<bool>,
	#[arg(
		long = "verbose-errors",
		value_name = "BOOL",
		value_parser = BoolishValueParser::new(),
		help = "Report unreadable directories and entries (default: false)"
	)]
	pub(crate) verbose_errors: Option<bool>,
	#[arg(
		short = 'x',
		long = "exclude",
		value_name = "GLOB",
		value_delimiter = ',',
		help = "Skip entries whose names match these globs, comma separated (default: none)"
	)]
	pub(crate) exclude: Option<Vec<String>>,
	#[arg(
		short = 'f',
		long = "format",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how results are printed"
	)]
	pub(crate) format: OutputFormat,
	#[arg(
		long,
		help = "Print progress messages to stderr (default: disabled)"
	)]
	pub(crate) progress: bool,
	#[arg(
		short = 'I',
		long,
		help = "Read pause/resume/cancel commands from stdin (default: disabled)"
	)]
	pub(crate) interactive: bool,
	#[arg(
		short = 'L',
		long = "log-level",
		value_name = "LEVEL",
		help = "Log verbosity: off, error, warn, info, debug or trace (default: warn)"
	)]
	pub(crate) log_level: Option<String>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the effective configuration before searching (default: disabled)"
	)]
	pub(crate) print_config: bool,
}
