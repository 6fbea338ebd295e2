//! Filename search engine.
//!
//! A [`SearchSession`] drives a [`DirectoryWalker`] over each root picked by
//! its [`SearchConfig`], streaming [`SearchEvent`]s back to the caller while
//! a shared [`ControlChannel`] lets the caller pause, resume or cancel.

mod config;
mod control;
mod counters;
mod error;
mod filter;
mod roots;
mod session;
mod transcript;
mod walker;

pub use config::{RootSelection, SearchConfig, SearchConfigBuilder, normalize_extension};
pub use control::{Checkpoint, ControlChannel, ControlState};
pub use counters::{ProgressSnapshot, SessionCounters};
pub use error::{Diagnostic, SearchError};
pub use filter::{EntryFilter, ExcludeSet, NameMatcher};
pub use roots::{RootEnumerator, RootSource, SystemVolumes, Volume, VolumeSource};
pub use session::{SearchEvent, SearchHandle, SearchSession, SessionOutcome, SessionSummary};
pub use transcript::TranscriptWriter;
pub use walker::{DirectoryWalker, WalkObserver};
