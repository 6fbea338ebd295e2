//! Core crate exports for the `rummage` filename search utility.
//!
//! The engine lives in [`search`]; the root module re-exports its main types
//! so embedders can start a search without digging through the module
//! hierarchy.

pub mod app_dirs;
pub mod logging;
pub mod search;

pub use search::{
	ControlChannel, ControlState, Diagnostic, RootEnumerator, RootSource, SearchConfig,
	SearchError, SearchEvent, SearchHandle, SearchSession, SessionOutcome, SessionSummary,
};
