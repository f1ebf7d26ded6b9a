//! Native core of a single-screen browser shell.
//!
//! The Android host forwards every UI event as a JSON command through
//! `MainActivity.dispatch` and renders the returned widget tree, then carries
//! out the listed effects (script injection, consent dialog, browser back).

rust_i18n::i18n!("locales", fallback = "es");

mod config;
mod effects;
mod error;
mod features;
mod i18n;
mod logging;
mod router;
mod state;
mod ui;

pub use config::{ConsentDialog, Platform, ShellConfig};
pub use effects::Effect;
pub use error::{ShellError, ShellResult};
