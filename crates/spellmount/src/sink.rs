// In-process host sink.
//
// For embedders that drive their own text surface in the same process: the
// installed provider is stored behind a shared handle and invoked directly
// per word. Cloned handles observe the same installation, so one clone goes
// into the session while the embedder keeps another.

use std::cell::RefCell;
use std::rc::Rc;

use spellmount_core::{CheckSink, SpellCallback};

/// One installed spell-check provider.
struct Installed {
    locale: String,
    enabled: bool,
    check: SpellCallback,
}

/// Host sink storing the installed provider in-process.
#[derive(Clone, Default)]
pub struct InProcessSink {
    inner: Rc<RefCell<Option<Installed>>>,
}

impl InProcessSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locale key of the installed provider, if any.
    pub fn installed_locale(&self) -> Option<String> {
        self.inner.borrow().as_ref().map(|p| p.locale.clone())
    }

    /// Whether the installed provider is enabled. Detached providers stay
    /// installed but disabled.
    pub fn is_enabled(&self) -> bool {
        self.inner.borrow().as_ref().is_some_and(|p| p.enabled)
    }

    /// Run a word through the installed provider, as the host text surface
    /// would per keystroke. `None` before any installation.
    pub fn check(&self, word: &str) -> Option<bool> {
        self.inner.borrow().as_ref().map(|p| (p.check)(word))
    }
}

impl CheckSink for InProcessSink {
    fn install(&mut self, locale: &str, enabled: bool, check: SpellCallback) {
        *self.inner.borrow_mut() = Some(Installed {
            locale: locale.to_string(),
            enabled,
            check,
        });
    }
}
