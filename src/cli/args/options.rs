use clap::ValueEnum;

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	/// Matching paths on stdout, everything else on stderr.
	Plain,
	/// One JSON object per event on stdout.
	Json,
}
