// SpellSession: top-level integration point between an embedding host and an
// external spell-check engine.
//
// Owns the engine module, the mount ref-count table, the locale-keyed
// dictionary table and the selection state; installs per-word spell-check
// providers into the host through the configured sink.
//
// Design notes:
// - The dictionary table and the verbose flag are shared with installed
//   providers through `Rc`, so the session is not `Send`. All mutation
//   happens on the single control thread; the host invokes providers
//   synchronously on that same thread.
// - Uptime is flushed into the previously selected entry whenever the
//   selection changes; while a dictionary is selected its in-flight elapsed
//   time is not yet part of its accumulated uptime.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{debug, warn};
use spellmount_core::{
    CheckSink, DictionarySource, EngineError, EngineLoader, SpellCallback,
};

use crate::mount::{MountLease, MountManager};
use crate::table::{DictionaryEntry, DictionaryTable};

/// Error type for session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The engine module could not be instantiated.
    #[error("failed to load spell-check engine: {0}")]
    EngineLoad(#[source] EngineError),

    /// An operation needed the engine before `initialize` succeeded.
    #[error("spell-check engine has not been initialized")]
    EngineNotLoaded,

    /// Dictionary keys are caller-chosen but must not be empty.
    #[error("dictionary key must not be empty")]
    EmptyKey,

    /// A dictionary is already registered under this key.
    #[error("dictionary '{0}' is already loaded")]
    DuplicateKey(String),

    /// No dictionary is registered under this key.
    #[error("no dictionary loaded under '{0}'")]
    NotFound(String),

    /// The engine rejected a mount or instance-creation request.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Which dictionary is current and since when.
struct SelectionState {
    current: Option<String>,
    since: Instant,
}

/// Multi-dictionary spell-check session.
///
/// Lifecycle: [`initialize`](Self::initialize), then
/// [`load_dictionary`](Self::load_dictionary) any number of times,
/// [`switch_dictionary`](Self::switch_dictionary) to pick the primary and
/// attach it to the host, [`unload_dictionary`](Self::unload_dictionary) on
/// teardown. One session per embedding host; independent sessions do not
/// share state.
pub struct SpellSession {
    loader: Box<dyn EngineLoader>,
    /// Engine module; populated by the first successful `initialize`.
    module: Option<Box<dyn spellmount_core::EngineModule>>,
    mounts: MountManager,
    /// Shared with installed providers.
    table: Rc<RefCell<DictionaryTable>>,
    selection: SelectionState,
    sink: Box<dyn CheckSink>,
    /// Shared with installed providers so toggling affects them live.
    verbose: Rc<Cell<bool>>,
}

impl SpellSession {
    /// Create a session over the given engine loader and host sink.
    pub fn new(loader: impl EngineLoader + 'static, sink: impl CheckSink + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            module: None,
            mounts: MountManager::new(),
            table: Rc::new(RefCell::new(DictionaryTable::new())),
            selection: SelectionState {
                current: None,
                since: Instant::now(),
            },
            sink: Box::new(sink),
            verbose: Rc::new(Cell::new(false)),
        }
    }

    // =========================================================================
    // Engine lifecycle
    // =========================================================================

    /// Instantiate the engine module.
    ///
    /// Idempotent: once the module is loaded, further calls return
    /// immediately without touching the loader.
    pub fn initialize(&mut self) -> Result<(), SessionError> {
        if self.module.is_some() {
            debug!("spell-check engine already initialized");
            return Ok(());
        }
        let module = self.loader.load().map_err(SessionError::EngineLoad)?;
        self.module = Some(module);
        debug!("spell-check engine initialized");
        Ok(())
    }

    /// Whether the engine module has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.module.is_some()
    }

    // =========================================================================
    // Dictionary lifecycle
    // =========================================================================

    /// Load a dictionary under a caller-chosen locale key.
    ///
    /// Fails if the key is empty or already registered, if the engine has not
    /// been initialized, or if the engine rejects a mount or the instance
    /// creation. Mounts performed by a failing call are released before the
    /// error is returned.
    pub fn load_dictionary(
        &mut self,
        key: &str,
        source: DictionarySource,
    ) -> Result<(), SessionError> {
        if key.is_empty() {
            return Err(SessionError::EmptyKey);
        }
        if self.table.borrow().contains(key) {
            return Err(SessionError::DuplicateKey(key.to_string()));
        }
        let module = self.module.as_deref_mut().ok_or(SessionError::EngineNotLoaded)?;

        let (lease, dic_virtual, aff_virtual) = match source {
            DictionarySource::Files { dic, aff } => {
                let (dic_virtual, aff_virtual) = self.mounts.mount_files(module, &dic, &aff)?;
                (MountLease::Files { dic, aff }, dic_virtual, aff_virtual)
            }
            DictionarySource::Buffers { dic, aff } => {
                let (dic_virtual, aff_virtual) =
                    self.mounts.mount_buffers(module, key, &dic, &aff)?;
                (
                    MountLease::Buffers {
                        dic: dic_virtual.clone(),
                        aff: aff_virtual.clone(),
                    },
                    dic_virtual,
                    aff_virtual,
                )
            }
        };

        let checker = match module.open(&aff_virtual, &dic_virtual) {
            Ok(checker) => checker,
            Err(e) => {
                // release the mounts this call performed before surfacing
                self.mounts.release(module, lease);
                return Err(e.into());
            }
        };

        if self.verbose.get() {
            debug!("loaded dictionary '{key}' (dic {dic_virtual}, aff {aff_virtual})");
        }
        self.table
            .borrow_mut()
            .insert(key.to_string(), DictionaryEntry::new(checker, lease));
        Ok(())
    }

    /// Unload a dictionary. Unknown keys are a logged no-op.
    ///
    /// Unloading the selected dictionary first flushes its uptime and
    /// detaches it from the host by substituting a provider that reports
    /// every word correct.
    pub fn unload_dictionary(&mut self, key: &str) {
        if !self.table.borrow().contains(key) {
            warn!("unload ignored: no dictionary loaded under '{key}'");
            return;
        }
        if self.selection.current.as_deref() == Some(key) {
            self.flush_uptime();
            self.selection.current = None;
            self.sink.install(key, false, Box::new(|_| true));
            debug!("detached '{key}' from the host");
        }

        let entry = self.table.borrow_mut().remove(key);
        let Some(entry) = entry else {
            return;
        };
        match self.module.as_deref_mut() {
            Some(module) => self.mounts.release(module, entry.into_lease()),
            // unreachable through the public API; entries need a module
            None => warn!("engine not initialized; dropping '{key}' without unmounting"),
        }
        if self.verbose.get() {
            debug!("unloaded dictionary '{key}'");
        }
    }

    /// Registered locale keys, most-used-while-selected first.
    pub fn available_dictionaries(&self) -> Vec<String> {
        self.table.borrow().keys_by_uptime()
    }

    /// Accumulated selected-time for a dictionary. `None` for unknown keys.
    pub fn dictionary_uptime(&self, key: &str) -> Option<Duration> {
        self.table.borrow().get(key).map(DictionaryEntry::uptime)
    }

    // =========================================================================
    // Selection & attachment
    // =========================================================================

    /// Select the primary dictionary and install its spell-check provider.
    ///
    /// With `check_all` set, words the primary rejects are accepted whenever
    /// any other registered dictionary accepts them; a word is flagged wrong
    /// only when every loaded dictionary rejects it. Fails with
    /// [`SessionError::NotFound`] for unregistered keys, leaving the current
    /// selection untouched.
    pub fn switch_dictionary(&mut self, key: &str, check_all: bool) -> Result<(), SessionError> {
        if !self.table.borrow().contains(key) {
            return Err(SessionError::NotFound(key.to_string()));
        }
        self.flush_uptime();
        self.selection.current = Some(key.to_string());

        let table = Rc::clone(&self.table);
        let verbose = Rc::clone(&self.verbose);
        let primary = key.to_string();
        let check: SpellCallback = Box::new(move |word| {
            let table = table.borrow();
            let Some(entry) = table.get(&primary) else {
                // primary vanished without a detach; accept everything
                return true;
            };
            let correct = entry.checker().spell(word);
            if verbose.get() {
                debug!("spell '{word}' via '{primary}': {correct}");
            }
            if correct || !check_all || table.len() == 1 {
                return correct;
            }
            table
                .iter()
                .filter(|(other, _)| *other != primary)
                .any(|(_, entry)| entry.checker().spell(word))
        });
        self.sink.install(key, true, check);
        debug!("switched to dictionary '{key}' (check_all: {check_all})");
        Ok(())
    }

    /// The currently selected locale key, if any.
    pub fn selected_dictionary(&self) -> Option<String> {
        self.selection.current.clone()
    }

    /// Ranked suggestions from the selected dictionary.
    ///
    /// Returns an empty list when nothing is selected or the selected entry
    /// has gone missing; both are logged, neither is an error.
    pub fn suggestions(&self, text: &str) -> Vec<String> {
        let Some(current) = self.selection.current.as_deref() else {
            debug!("suggestions for '{text}' skipped: no dictionary selected");
            return Vec::new();
        };
        let table = self.table.borrow();
        let Some(entry) = table.get(current) else {
            warn!("selected dictionary '{current}' is missing from the table");
            return Vec::new();
        };
        let suggestions = entry.checker().suggest(text);
        if self.verbose.get() {
            debug!("{} suggestions for '{text}' via '{current}'", suggestions.len());
        }
        suggestions
    }

    /// Toggle per-word diagnostic logging, including inside providers that
    /// are already installed.
    pub fn set_verbose_logging(&mut self, verbose: bool) {
        self.verbose.set(verbose);
    }

    /// Add the elapsed selected-time to the current dictionary's uptime and
    /// restart the clock.
    fn flush_uptime(&mut self) {
        let now = Instant::now();
        if let Some(current) = &self.selection.current {
            let elapsed = now.duration_since(self.selection.since);
            if let Some(entry) = self.table.borrow_mut().get_mut(current) {
                entry.add_uptime(elapsed);
            }
        }
        self.selection.since = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spellmount_core::EngineModule;

    use crate::sink::InProcessSink;
    use crate::wordlist::WordlistModule;

    /// Loader counting how often the session actually reaches it.
    struct CountingLoader {
        loads: Rc<Cell<u32>>,
    }

    impl EngineLoader for CountingLoader {
        fn load(&mut self) -> Result<Box<dyn EngineModule>, EngineError> {
            self.loads.set(self.loads.get() + 1);
            Ok(Box::new(WordlistModule::new()))
        }
    }

    /// Loader that always fails.
    struct FailingLoader;

    impl EngineLoader for FailingLoader {
        fn load(&mut self) -> Result<Box<dyn EngineModule>, EngineError> {
            Err(EngineError::ModuleLoad("no engine artifact".to_string()))
        }
    }

    fn buffers(words: &str) -> DictionarySource {
        DictionarySource::from_buffers(words.as_bytes(), &b""[..])
    }

    fn ready_session() -> (SpellSession, InProcessSink) {
        let sink = InProcessSink::new();
        let mut session = SpellSession::new(
            CountingLoader {
                loads: Rc::new(Cell::new(0)),
            },
            sink.clone(),
        );
        session.initialize().expect("initialize");
        (session, sink)
    }

    #[test]
    fn initialize_is_idempotent() {
        let loads = Rc::new(Cell::new(0));
        let mut session = SpellSession::new(
            CountingLoader {
                loads: Rc::clone(&loads),
            },
            InProcessSink::new(),
        );

        assert!(!session.is_initialized());
        session.initialize().expect("first initialize");
        session.initialize().expect("second initialize");
        session.initialize().expect("third initialize");
        assert!(session.is_initialized());
        assert_eq!(loads.get(), 1);
    }

    #[test]
    fn failed_initialize_surfaces_the_engine_error() {
        let mut session = SpellSession::new(FailingLoader, InProcessSink::new());
        let err = session.initialize().expect_err("load must fail");
        assert!(matches!(err, SessionError::EngineLoad(_)));
        assert!(!session.is_initialized());
    }

    #[test]
    fn load_before_initialize_is_rejected() {
        let mut session = SpellSession::new(
            CountingLoader {
                loads: Rc::new(Cell::new(0)),
            },
            InProcessSink::new(),
        );
        let err = session
            .load_dictionary("en-us", buffers("color\n"))
            .expect_err("no engine yet");
        assert!(matches!(err, SessionError::EngineNotLoaded));
    }

    #[test]
    fn empty_and_duplicate_keys_are_rejected() {
        let (mut session, _sink) = ready_session();

        let err = session
            .load_dictionary("", buffers("color\n"))
            .expect_err("empty key");
        assert!(matches!(err, SessionError::EmptyKey));

        session
            .load_dictionary("en-us", buffers("color\n"))
            .expect("first load");
        let err = session
            .load_dictionary("en-us", buffers("colour\n"))
            .expect_err("duplicate key");
        assert!(matches!(err, SessionError::DuplicateKey(key) if key == "en-us"));

        // the table still holds exactly the first dictionary
        assert_eq!(session.available_dictionaries(), vec!["en-us"]);
    }

    #[test]
    fn switch_to_missing_key_leaves_selection_untouched() {
        let (mut session, _sink) = ready_session();
        session
            .load_dictionary("en-us", buffers("color\n"))
            .expect("load");
        session.switch_dictionary("en-us", false).expect("switch");

        let err = session
            .switch_dictionary("missing", false)
            .expect_err("unknown key");
        assert!(matches!(err, SessionError::NotFound(key) if key == "missing"));
        assert_eq!(session.selected_dictionary().as_deref(), Some("en-us"));
    }

    #[test]
    fn installed_provider_answers_for_the_primary() {
        let (mut session, sink) = ready_session();
        session
            .load_dictionary("en-us", buffers("color\ncenter\n"))
            .expect("load");
        session.switch_dictionary("en-us", false).expect("switch");

        assert_eq!(sink.installed_locale().as_deref(), Some("en-us"));
        assert!(sink.is_enabled());
        assert_eq!(sink.check("color"), Some(true));
        assert_eq!(sink.check("colour"), Some(false));
    }

    #[test]
    fn fallback_quorum_accepts_words_from_other_dictionaries() {
        let (mut session, sink) = ready_session();
        session
            .load_dictionary("en-us", buffers("color\n"))
            .expect("load en-us");
        session
            .load_dictionary("en-gb", buffers("colour\n"))
            .expect("load en-gb");

        session.switch_dictionary("en-us", true).expect("switch");
        assert_eq!(sink.check("color"), Some(true));
        assert_eq!(sink.check("colour"), Some(true));
        assert_eq!(sink.check("colr"), Some(false));

        // without the quorum only the primary answers
        session.switch_dictionary("en-us", false).expect("switch");
        assert_eq!(sink.check("colour"), Some(false));
    }

    #[test]
    fn quorum_sees_dictionaries_loaded_after_the_switch() {
        let (mut session, sink) = ready_session();
        session
            .load_dictionary("en-us", buffers("color\n"))
            .expect("load en-us");
        session.switch_dictionary("en-us", true).expect("switch");
        assert_eq!(sink.check("colour"), Some(false));

        session
            .load_dictionary("en-gb", buffers("colour\n"))
            .expect("load en-gb");
        assert_eq!(sink.check("colour"), Some(true));
    }

    #[test]
    fn unloading_the_selected_dictionary_detaches_it() {
        let (mut session, sink) = ready_session();
        session
            .load_dictionary("en-us", buffers("color\n"))
            .expect("load");
        session.switch_dictionary("en-us", false).expect("switch");

        session.unload_dictionary("en-us");
        assert_eq!(session.selected_dictionary(), None);
        assert!(session.available_dictionaries().is_empty());

        // the substitute provider reports everything correct
        assert!(!sink.is_enabled());
        assert_eq!(sink.check("definitely-not-a-word"), Some(true));
    }

    #[test]
    fn unloading_an_unknown_key_is_a_no_op() {
        let (mut session, _sink) = ready_session();
        session
            .load_dictionary("en-us", buffers("color\n"))
            .expect("load");

        session.unload_dictionary("missing");
        assert_eq!(session.available_dictionaries(), vec!["en-us"]);
    }

    #[test]
    fn unloading_a_non_selected_dictionary_keeps_the_provider() {
        let (mut session, sink) = ready_session();
        session
            .load_dictionary("en-us", buffers("color\n"))
            .expect("load en-us");
        session
            .load_dictionary("en-gb", buffers("colour\n"))
            .expect("load en-gb");
        session.switch_dictionary("en-us", false).expect("switch");

        session.unload_dictionary("en-gb");
        assert_eq!(session.selected_dictionary().as_deref(), Some("en-us"));
        assert!(sink.is_enabled());
        assert_eq!(sink.check("color"), Some(true));
    }

    #[test]
    fn suggestions_without_selection_are_empty() {
        let (mut session, _sink) = ready_session();
        assert!(session.suggestions("color").is_empty());

        session
            .load_dictionary("en-us", buffers("color\n"))
            .expect("load");
        // still nothing selected
        assert!(session.suggestions("colr").is_empty());

        session.switch_dictionary("en-us", false).expect("switch");
        assert_eq!(session.suggestions("colr"), vec!["color"]);
    }

    #[test]
    fn uptime_flushes_on_switch_and_never_decreases() {
        let (mut session, _sink) = ready_session();
        session
            .load_dictionary("en-us", buffers("color\n"))
            .expect("load en-us");
        session
            .load_dictionary("en-gb", buffers("colour\n"))
            .expect("load en-gb");

        session.switch_dictionary("en-us", false).expect("switch");
        std::thread::sleep(Duration::from_millis(30));
        session.switch_dictionary("en-gb", false).expect("switch");

        let first = session.dictionary_uptime("en-us").expect("uptime");
        assert!(first >= Duration::from_millis(25), "uptime was {first:?}");

        // selecting en-us again and switching away only adds time
        session.switch_dictionary("en-us", false).expect("switch");
        std::thread::sleep(Duration::from_millis(10));
        session.switch_dictionary("en-gb", false).expect("switch");
        let second = session.dictionary_uptime("en-us").expect("uptime");
        assert!(second > first, "uptime went from {first:?} to {second:?}");

        // en-us has been selected longer than en-gb overall
        let order = session.available_dictionaries();
        assert_eq!(order.first().map(String::as_str), Some("en-us"));
    }
}
