//! Configuration loading and resolution.
//!
//! Values are layered from config files, `RUMMAGE__*` environment variables
//! and command line flags. `load` is the entry point and returns a
//! [`ResolvedConfig`] ready to hand to the search engine.

mod loader;
mod raw;
mod resolved;
mod sources;
mod util;

pub use loader::load;
pub use resolved::ResolvedConfig;
