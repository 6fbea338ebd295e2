use std::sync::atomic::{AtomicU64, Ordering};

/// Found and scanned totals for one run, readable from any thread.
#[derive(Debug, Default)]
pub struct SessionCounters {
	found: AtomicU64,
	scanned: AtomicU64,
}

impl SessionCounters {
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn record_scanned(&self) {
		self.scanned.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_found(&self) {
		self.found.fetch_add(1, Ordering::Relaxed);
	}

	pub fn found(&self) -> u64 {
		self.found.load(Ordering::Relaxed)
	}

	pub fn scanned(&self) -> u64 {
		self.scanned.load(Ordering::Relaxed)
	}

	pub fn snapshot(&self) -> ProgressSnapshot {
		ProgressSnapshot {
			found: self.found(),
			scanned: self.scanned(),
		}
	}
}

/// Point-in-time copy of [`SessionCounters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
	pub found: u64,
	pub scanned: u64,
}
