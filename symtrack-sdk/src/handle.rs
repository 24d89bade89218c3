//! Module handle for reporting symptom values.

use std::sync::Arc;

use symtrack_types::SimTime;

use crate::track::SourceTrack;

/// A handle for reporting one module's view of one symptom.
///
/// Obtain a handle from [`SymptomTracker::register`]. The handle keeps the
/// module's track directly, so reports skip the mapping lookup, and handing
/// each module exactly one handle is the natural way to keep a single writer
/// per module identifier.
///
/// # Example
///
/// ```rust
/// use symtrack_sdk::SymptomTracker;
/// use symtrack_types::SimTime;
///
/// let tracker = SymptomTracker::new("fever");
/// let flu = tracker.register("flu");
///
/// flu.record(SimTime::from_millis(10), 3, false);
/// assert_eq!(tracker.peak_value(), 3);
///
/// flu.resolve();
/// assert_eq!(tracker.peak_value(), 0);
/// ```
///
/// [`SymptomTracker::register`]: crate::SymptomTracker::register
#[derive(Clone)]
pub struct SourceHandle {
    pub(crate) track: Arc<SourceTrack>,
    pub(crate) module: String,
}

impl SourceHandle {
    /// Report a value at a simulated instant, with this report's resolved
    /// flag.
    pub fn record(&self, time: SimTime, value: i32, resolved: bool) {
        self.track.record(time, value, resolved);
    }

    /// Mark this module's contribution resolved.
    pub fn resolve(&self) {
        self.track.resolve();
    }

    /// Mark this module's contribution active again.
    pub fn activate(&self) {
        self.track.activate();
    }

    /// Whether this module currently considers its contribution resolved.
    pub fn is_resolved(&self) -> bool {
        self.track.is_resolved()
    }

    /// The value this module reported most recently, if any.
    pub fn current_value(&self) -> Option<i32> {
        self.track.current_value()
    }

    /// When this module last reported, if any.
    pub fn last_update(&self) -> Option<SimTime> {
        self.track.last_update()
    }

    /// Get the module name.
    pub fn module(&self) -> &str {
        &self.module
    }
}

impl std::fmt::Debug for SourceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceHandle")
            .field("module", &self.module)
            .finish()
    }
}
