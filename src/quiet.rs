//! Scoped suppression of diagnostic output.

use tracing::subscriber::NoSubscriber;

/// Runs `f` with a no-op subscriber installed as the scoped default, so any
/// diagnostics it emits are dropped instead of reaching the output streams.
/// The previous subscriber is restored unconditionally when the closure
/// returns or unwinds.
pub fn muted<T>(f: impl FnOnce() -> T) -> T {
    tracing::subscriber::with_default(NoSubscriber::default(), f)
}
