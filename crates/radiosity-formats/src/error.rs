//! Parser failure surface.
//!
//! Distinct from `radiosity_core::RadiosityError` — a malformed scene file
//! is a parsing concern, not a numerical/geometric one. `radiosity-formats`
//! never calls `process::exit`; only `radiosity-cli`'s `main` converts an
//! `Err` here into a terminating exit code, so these readers stay usable as
//! a library from non-CLI callers (tests construct scenes without a live
//! process to kill).

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("could not open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A malformed or unrecognized line. Carries the file name, 1-based
    /// line number, and offending line text, so the caller can print a
    /// diagnostic naming all three.
    #[error("{path}:{line}: {reason} (line was: {text:?})")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
        text: String,
    },
}
