// Host callback-registration boundary.

use log::debug;

/// Spell-check closure handed to the host text-input layer.
///
/// Invoked synchronously on the single control thread that owns the session,
/// so the type is deliberately not `Send`.
pub type SpellCallback = Box<dyn Fn(&str) -> bool>;

/// Where the session installs its per-word spell-check provider.
///
/// The implementation is chosen at session construction: hosts with an
/// interactive text surface supply a real sink, everything else uses
/// [`NullCheckSink`]. Installation never fails; a host that cannot accept
/// providers degrades to a logged no-op.
pub trait CheckSink {
    /// Install (or replace) the provider for `locale`.
    ///
    /// `enabled` is `false` when the session is detaching, in which case
    /// `check` is the substitute callback that reports every word correct.
    fn install(&mut self, locale: &str, enabled: bool, check: SpellCallback);
}

/// Sink for processes without an interactive text surface.
///
/// Logs and drops every installation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCheckSink;

impl CheckSink for NullCheckSink {
    fn install(&mut self, locale: &str, enabled: bool, _check: SpellCallback) {
        debug!("no text-input host available; dropping spell-check provider for '{locale}' (enabled: {enabled})");
    }
}
