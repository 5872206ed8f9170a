//! Keyed presenter store surviving host destruction.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use tracing::{debug, warn};

use holdfast_core::{PresenterId, RetainedPresenter};

static SHARED: LazyLock<Arc<Savior>> = LazyLock::new(|| Arc::new(Savior::new()));

/// Process-wide keyed store mapping a [`PresenterId`] to a retained
/// presenter.
///
/// The registry holds an owning reference but never drives the presenter's
/// lifecycle: entries leave the map only through [`Savior::recover`] (hand
/// the presenter to a new host), [`Savior::free`] (drop the reference,
/// ownership already transferred), or [`Savior::clear`] (test teardown).
/// The delegate is solely responsible for freeing an entry before destroying
/// its presenter.
///
/// Known limitation: when a host is torn down from the back stack and the
/// platform never delivers the terminal destroy callback (back-stack pop
/// followed by a finish that bypasses the host), the entry registered for the
/// back-stack return stays here indefinitely. That leak is an accepted defect
/// of the retention contract, not a steady state this registry tries to
/// repair.
pub struct Savior {
    entries: Mutex<HashMap<PresenterId, Arc<dyn RetainedPresenter>>>,
}

impl Savior {
    /// Create an empty, private registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide registry instance.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Store `presenter` under `id`, replacing any previous entry for that
    /// id.
    ///
    /// A presenter lives under at most one key: if the same instance is
    /// already stored under a different id, that stale entry is evicted.
    pub fn save(&self, id: PresenterId, presenter: Arc<dyn RetainedPresenter>) {
        if presenter.is_destroyed() {
            warn!(presenter_id = %id, "refusing to retain a destroyed presenter");
            return;
        }
        let mut entries = self.entries.lock();
        entries.retain(|key, existing| key == &id || !Arc::ptr_eq(existing, &presenter));
        let _ = entries.insert(id.clone(), presenter);
        debug!(presenter_id = %id, count = entries.len(), "presenter retained");
    }

    /// Remove and return the presenter stored under `id`.
    ///
    /// Ownership transfers to the caller; the registry forgets the entry.
    #[must_use]
    pub fn recover(&self, id: &PresenterId) -> Option<Arc<dyn RetainedPresenter>> {
        let recovered = self.entries.lock().remove(id);
        match &recovered {
            Some(_) => debug!(presenter_id = %id, "presenter recovered"),
            None => debug!(presenter_id = %id, "no retained presenter for id"),
        }
        recovered
    }

    /// Remove the entry under `id` without destroying the presenter.
    ///
    /// Freeing an absent id is a no-op, so the terminal-destroy path can call
    /// this unconditionally.
    pub fn free(&self, id: &PresenterId) {
        if self.entries.lock().remove(id).is_some() {
            debug!(presenter_id = %id, "registry entry freed");
        }
    }

    /// Whether an entry is stored under `id`.
    #[must_use]
    pub fn contains(&self, id: &PresenterId) -> bool {
        self.entries.lock().contains_key(id)
    }

    /// Number of retained presenters. Diagnostic only.
    #[must_use]
    pub fn presenter_count(&self) -> usize {
        self.entries.lock().len()
    }

    /// Drop every entry. Intended for test teardown.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for Savior {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
