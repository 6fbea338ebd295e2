use log::LevelFilter;
use rummage::SearchConfig;

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub search: SearchConfig,
	pub log_level: LevelFilter,
}

impl ResolvedConfig {
	/// Print a human readable summary of the effective configuration.
	///
	/// Goes to stderr so that stdout stays reserved for results.
	pub fn print_summary(&self) {
		let search = &self.search;
		eprintln!("Effective configuration:");
		eprintln!("  Search term: '{}'", search.term());
		eprintln!("  Roots: {}", search.roots_label());
		eprintln!(
			"  Extension filter: {}",
			search.extension().unwrap_or("(none)")
		);
		eprintln!(
			"  Case sensitive: {}",
			bool_to_word(!search.case_insensitive())
		);
		eprintln!(
			"  Verbose errors: {}",
			bool_to_word(search.verbose_errors())
		);
		if search.excludes().is_empty() {
			eprintln!("  Excludes: (none)");
		} else {
			eprintln!("  Excludes: {}", search.excludes().join(", "));
		}
		match search.output_file() {
			Some(path) => eprintln!("  Output file: {}", path.display()),
			None => eprintln!("  Output file: (none)"),
		}
		eprintln!("  Log level: {}", self.log_level);
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
