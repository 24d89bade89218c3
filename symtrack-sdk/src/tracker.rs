//! The aggregate tracker for one symptom across all reporting modules.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use symtrack_types::{SimTime, SymptomSnapshot};

use crate::handle::SourceHandle;
use crate::track::SourceTrack;

/// The time-evolving state of one named symptom, as reported independently
/// by any number of modules.
///
/// Each module gets its own [`SourceTrack`], created lazily on first report
/// and never removed - the mapping only grows. The observed symptom value at
/// any moment is the maximum current value across unresolved tracks.
///
/// The mapping itself is safe for concurrent use: modules may report and
/// queries may run from any thread without external locking. Per-track
/// writes are not coordinated beyond that, so the engine keeps a single
/// writer per module identifier. Aggregate queries read the mapping at call
/// time and may observe a torn view while reports are in flight; simulation
/// reads are lazily consistent by design.
///
/// # Example
///
/// ```rust
/// use symtrack_sdk::SymptomTracker;
/// use symtrack_types::SimTime;
///
/// let tracker = SymptomTracker::new("fever");
/// tracker.report("flu", SimTime::from_millis(10), 3, false);
/// tracker.report("cold", SimTime::from_millis(10), 5, false);
///
/// assert_eq!(tracker.peak_value(), 5);
/// assert_eq!(tracker.dominant_source().as_deref(), Some("cold"));
///
/// tracker.resolve("cold");
/// assert_eq!(tracker.peak_value(), 3);
/// ```
pub struct SymptomTracker {
    name: String,
    sources: RwLock<BTreeMap<String, Arc<SourceTrack>>>,
}

impl SymptomTracker {
    /// Create a tracker for a named symptom with no sources yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: RwLock::new(BTreeMap::new()),
        }
    }

    /// The symptom this tracker follows.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get or create the track for a module.
    fn get_or_create(&self, module: &str) -> Arc<SourceTrack> {
        // Fast path: check if it exists
        {
            let sources = self.sources.read();
            if let Some(track) = sources.get(module) {
                return track.clone();
            }
        }

        // Slow path: create it
        // Double-check after acquiring write lock
        let mut sources = self.sources.write();
        sources
            .entry(module.to_string())
            .or_insert_with(|| Arc::new(SourceTrack::new(module, &self.name)))
            .clone()
    }

    /// Record a report from a module.
    ///
    /// This is the sole mutation entry point for symptom reports: the track
    /// is created on first use, the record appended, and the track's
    /// resolved flag set to this report's `resolved`. Nothing is validated;
    /// duplicate and out-of-order timestamps are retained as given.
    pub fn report(&self, module: &str, time: SimTime, value: i32, resolved: bool) {
        self.get_or_create(module).record(time, value, resolved);
    }

    /// Register a module and get a handle for reporting.
    ///
    /// If the module has reported before, the handle points at its existing
    /// track. Handles skip the map lookup on every report and give each
    /// module a natural single-writer home.
    pub fn register(&self, module: &str) -> SourceHandle {
        SourceHandle {
            track: self.get_or_create(module),
            module: module.to_string(),
        }
    }

    /// The observed symptom value: the maximum current value across
    /// unresolved sources, or 0 when no unresolved source has reported.
    ///
    /// 0 doubles as the sentinel for "no data", so an unresolved source
    /// legitimately reporting 0 (or anything negative) leaves the aggregate
    /// at 0. [`dominant_source`] distinguishes the two cases when needed.
    ///
    /// [`dominant_source`]: Self::dominant_source
    pub fn peak_value(&self) -> i32 {
        let sources = self.sources.read();
        let mut max = 0;
        for track in sources.values() {
            if track.is_resolved() {
                continue;
            }
            if let Some(value) = track.current_value() {
                if value > max {
                    max = value;
                }
            }
        }
        max
    }

    /// The module holding the highest unresolved value, or `None` when no
    /// unresolved source has reported.
    ///
    /// Ties keep the first source encountered; callers should not rely on
    /// which source that is.
    pub fn dominant_source(&self) -> Option<String> {
        let sources = self.sources.read();
        let mut result: Option<String> = None;
        let mut max = 0;
        for (module, track) in sources.iter() {
            if track.is_resolved() {
                continue;
            }
            let Some(value) = track.current_value() else {
                continue;
            };
            if result.is_none() || value > max {
                result = Some(module.clone());
                max = value;
            }
        }
        result
    }

    /// The current value reported by a module, or `None` when the module is
    /// unknown or has not reported yet.
    pub fn value_from(&self, module: &str) -> Option<i32> {
        self.sources
            .read()
            .get(module)
            .and_then(|track| track.current_value())
    }

    /// Mark a module's contribution resolved. Unknown modules are a no-op.
    pub fn resolve(&self, module: &str) {
        if let Some(track) = self.sources.read().get(module) {
            track.resolve();
        }
    }

    /// When a module last reported, or `None` when the module is unknown or
    /// has not reported yet.
    pub fn last_update(&self, module: &str) -> Option<SimTime> {
        self.sources
            .read()
            .get(module)
            .and_then(|track| track.last_update())
    }

    /// A call-time snapshot of the source mapping.
    ///
    /// The returned map holds the live tracks (cheap `Arc` clones), so
    /// export collaborators can walk per-module histories while the
    /// simulation keeps running. Reports arriving after this call are
    /// visible through the shared tracks but new modules are not.
    pub fn sources(&self) -> BTreeMap<String, Arc<SourceTrack>> {
        self.sources.read().clone()
    }

    /// Flatten the whole tracker into its export form.
    pub fn collect(&self) -> SymptomSnapshot {
        let sources = self.sources.read();

        let mut snapshot = SymptomSnapshot::builder(&self.name);
        for (module, track) in sources.iter() {
            snapshot = snapshot.source_history(module.clone(), track.collect());
        }

        snapshot.build()
    }
}

impl Clone for SymptomTracker {
    /// Shallow duplication: the clone gets its own mapping holding the same
    /// tracks. Resolving or reporting through a shared track is visible from
    /// both trackers, while modules registered after the clone appear only
    /// in the tracker they were registered with.
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            sources: RwLock::new(self.sources.read().clone()),
        }
    }
}

impl std::fmt::Debug for SymptomTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymptomTracker")
            .field("name", &self.name)
            .field("sources", &self.sources.read().len())
            .finish()
    }
}
