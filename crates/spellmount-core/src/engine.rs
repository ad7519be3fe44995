// External spell-check engine boundary.
//
// The session consumes an engine entirely through these traits and never
// sees the algorithm behind them. Affix parsing, morphological analysis and
// suggestion generation all belong to the implementation; the session only
// mounts data, opens instances and forwards queries.

use std::path::Path;

use crate::error::EngineError;

/// Instantiates the engine module.
///
/// A session calls its loader at most once; repeat `initialize` calls never
/// reach the loader again.
pub trait EngineLoader {
    /// Instantiate the engine module.
    fn load(&mut self) -> Result<Box<dyn EngineModule>, EngineError>;
}

/// A loaded engine module: a virtual filesystem plus an instance factory.
///
/// Mount methods return the virtual path under which the mounted content is
/// addressable; those paths are what [`Self::open`] and [`Self::unmount`]
/// accept. The module does not track who mounted what -- ref counting of
/// shared directories is the caller's concern.
pub trait EngineModule {
    /// Mount a physical directory into the virtual filesystem.
    ///
    /// Files inside the directory become addressable as
    /// `<returned path>/<file name>`.
    fn mount_directory(&mut self, dir: &Path) -> Result<String, EngineError>;

    /// Mount an in-memory buffer under the given tag.
    fn mount_buffer(&mut self, tag: &str, data: &[u8]) -> Result<String, EngineError>;

    /// Release a mount previously returned by [`Self::mount_directory`] or
    /// [`Self::mount_buffer`].
    fn unmount(&mut self, mounted: &str) -> Result<(), EngineError>;

    /// Create a spell-check instance from mounted affix and dictionary paths.
    fn open(&mut self, aff: &str, dic: &str) -> Result<Box<dyn SpellChecker>, EngineError>;
}

/// One engine instance bound to a single dictionary.
///
/// Suggestion order is engine-defined and treated as significant by callers;
/// the session returns it verbatim. Instances release their resources on
/// drop.
pub trait SpellChecker {
    /// Check whether the given word is correctly spelled.
    fn spell(&self, word: &str) -> bool;

    /// Ranked corrections for a misspelled word. May be empty.
    fn suggest(&self, word: &str) -> Vec<String>;
}
