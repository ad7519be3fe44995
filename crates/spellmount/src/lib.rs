//! Multi-dictionary spell-check session management.
//!
//! This crate is the adapter between an external spell-check engine and an
//! embedding host: it mounts dictionary files or buffers into the engine's
//! virtual filesystem, keeps a locale-keyed table of loaded dictionaries with
//! per-dictionary usage uptime, and installs a per-word spell-check callback
//! into the host's text-input layer. The checking algorithm itself lives
//! behind the [`EngineModule`] boundary and is never reimplemented here.
//!
//! # Architecture
//!
//! - [`mount`] -- ref-counted virtual-filesystem mount bookkeeping
//! - [`table`] -- locale key to dictionary entry mapping, uptime ordered
//! - [`session`] -- the caller-facing [`SpellSession`]
//! - [`sink`] -- in-process host sink for embedders, tests and CLI tools
//! - [`wordlist`] -- affix-less reference engine over plain word lists
//!
//! # Quick start
//!
//! ```
//! use spellmount::wordlist::WordlistLoader;
//! use spellmount::{DictionarySource, InProcessSink, SpellSession};
//!
//! # fn main() -> Result<(), spellmount::SessionError> {
//! let sink = InProcessSink::new();
//! let mut session = SpellSession::new(WordlistLoader::new(), sink.clone());
//! session.initialize()?;
//! session.load_dictionary(
//!     "en-us",
//!     DictionarySource::from_buffers(&b"color\ncenter\n"[..], &b""[..]),
//! )?;
//! session.switch_dictionary("en-us", false)?;
//!
//! // the host invokes the installed provider per word
//! assert_eq!(sink.check("color"), Some(true));
//! assert_eq!(sink.check("colour"), Some(false));
//! # Ok(())
//! # }
//! ```

pub mod mount;
pub mod session;
pub mod sink;
pub mod table;
pub mod wordlist;

pub use session::{SessionError, SpellSession};
pub use sink::InProcessSink;

pub use spellmount_core::{
    CheckSink, DictionarySource, EngineError, EngineLoader, EngineModule, NullCheckSink,
    SpellCallback, SpellChecker,
};
