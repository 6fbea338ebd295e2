use std::collections::HashSet;

/// Trim exclude patterns, dropping blanks and duplicates while keeping order.
pub(super) fn sanitize_patterns(values: Vec<String>) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut cleaned = Vec::new();
	for value in values {
		let trimmed = value.trim();
		if trimmed.is_empty() {
			continue;
		}
		if seen.insert(trimmed.to_string()) {
			cleaned.push(trimmed.to_string());
		}
	}
	cleaned
}
