// Engine-boundary error type.

use std::io;

/// Error type for operations crossing the engine boundary.
///
/// None of these are retried by the session layer; a transient failure is
/// surfaced to the caller uninterpreted.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine module itself could not be instantiated.
    #[error("engine module could not be instantiated: {0}")]
    ModuleLoad(String),

    /// A directory or buffer could not be mounted.
    #[error("failed to mount {path}: {reason}")]
    Mount { path: String, reason: String },

    /// Unmount or resolution was requested for a path the engine does not
    /// have a mount at.
    #[error("no mount at {0}")]
    UnknownMount(String),

    /// Data behind a mounted path could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// An instance could not be created from the mounted paths.
    #[error("failed to open dictionary (aff {aff}, dic {dic}): {reason}")]
    Open {
        aff: String,
        dic: String,
        reason: String,
    },
}
