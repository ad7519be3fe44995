//! Shared types and boundary traits for the spellmount dictionary host.
//!
//! The session layer in the `spellmount` crate is engine- and host-agnostic;
//! everything it needs to know about either side lives here:
//!
//! - [`engine`] -- engine module loading, virtual-filesystem mounts, and
//!   per-instance spell/suggest queries
//! - [`sink`] -- the host's callback-registration point for per-word
//!   spell-check providers
//! - [`source`] -- the two dictionary-loading strategies (file pair vs
//!   buffer pair)
//! - [`error`] -- failures reported across the engine boundary

pub mod engine;
pub mod error;
pub mod sink;
pub mod source;

pub use engine::{EngineLoader, EngineModule, SpellChecker};
pub use error::EngineError;
pub use sink::{CheckSink, NullCheckSink, SpellCallback};
pub use source::DictionarySource;
