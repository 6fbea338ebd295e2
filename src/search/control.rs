//! Pause, resume and cancel signalling between a caller and a running walk.
//!
//! The caller keeps a clone of the [`ControlChannel`] while the worker thread
//! polls it at every directory and every directory entry. Cancellation and
//! pause are plain atomics so the hot path never takes a lock; the mutex and
//! condition variable are only touched when a walk has to park or be woken.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

/// Observable state of a [`ControlChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
	Running,
	Paused,
	Cancelled,
}

/// Result of a traversal checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
	/// Keep walking.
	Continue,
	/// The run was cancelled; unwind without doing more work.
	Stop,
}

#[derive(Debug, Default)]
struct Shared {
	cancelled: AtomicBool,
	paused: AtomicBool,
	lock: Mutex<()>,
	wake: Condvar,
}

impl Shared {
	fn guard(&self) -> MutexGuard<'_, ()> {
		// The mutex guards no data, so a poisoned lock is still usable.
		self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}
}

/// Cloneable cancel/pause/resume signal shared by a caller and one search run.
#[derive(Debug, Clone, Default)]
pub struct ControlChannel {
	shared: Arc<Shared>,
}

impl ControlChannel {
	pub fn new() -> Self {
		Self::default()
	}

	/// Ask the walk to park at its next checkpoint. Ignored once cancelled.
	pub fn request_pause(&self) {
		let _guard = self.shared.guard();
		if self.shared.cancelled.load(Ordering::SeqCst) {
			return;
		}
		if !self.shared.paused.swap(true, Ordering::SeqCst) {
			log::debug!("pause requested");
		}
	}

	/// Release a parked walk. Ignored unless currently paused.
	pub fn request_resume(&self) {
		let _guard = self.shared.guard();
		if self.shared.paused.swap(false, Ordering::SeqCst) {
			log::debug!("resume requested");
			self.shared.wake.notify_all();
		}
	}

	/// Stop the walk for good. Idempotent, and wakes a parked walk.
	pub fn request_cancel(&self) {
		let _guard = self.shared.guard();
		if !self.shared.cancelled.swap(true, Ordering::SeqCst) {
			log::debug!("cancel requested");
		}
		self.shared.paused.store(false, Ordering::SeqCst);
		self.shared.wake.notify_all();
	}

	pub fn is_cancelled(&self) -> bool {
		self.shared.cancelled.load(Ordering::SeqCst)
	}

	pub fn is_paused(&self) -> bool {
		self.shared.paused.load(Ordering::SeqCst)
	}

	pub fn state(&self) -> ControlState {
		if self.is_cancelled() {
			ControlState::Cancelled
		} else if self.is_paused() {
			ControlState::Paused
		} else {
			ControlState::Running
		}
	}

	/// Block while paused, returning once resumed or cancelled.
	///
	/// Returns `true` if the run has been cancelled.
	pub fn wait_while_paused(&self) -> bool {
		let mut guard = self.shared.guard();
		while self.shared.paused.load(Ordering::SeqCst)
			&& !self.shared.cancelled.load(Ordering::SeqCst)
		{
			guard = self
				.shared
				.wake
				.wait(guard)
				.unwrap_or_else(|poisoned| poisoned.into_inner());
		}
		self.shared.cancelled.load(Ordering::SeqCst)
	}

	/// Observe cancellation, parking first if the run is paused.
	pub fn checkpoint(&self) -> Checkpoint {
		if self.is_cancelled() {
			return Checkpoint::Stop;
		}
		if self.is_paused() && self.wait_while_paused() {
			return Checkpoint::Stop;
		}
		Checkpoint::Continue
	}
}
