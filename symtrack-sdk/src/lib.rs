//! # symtrack-sdk
//!
//! Thread-safe symptom state tracking for simulation engines.
//!
//! A [`SymptomTracker`] follows one named symptom as any number of causal
//! modules independently report values for it over simulated time. Each
//! module keeps a full append-only history and a resolved flag, and the
//! observed symptom value at any moment is the maximum current value across
//! the modules that have not resolved their contribution.
//!
//! ## Quick Start
//!
//! ```rust
//! use symtrack_sdk::SymptomTracker;
//! use symtrack_types::SimTime;
//!
//! let tracker = SymptomTracker::new("fever");
//!
//! // Register modules and report through handles...
//! let flu = tracker.register("flu");
//! flu.record(SimTime::from_millis(10), 3, false);
//!
//! // ...or report directly by module name
//! tracker.report("food-poisoning", SimTime::from_millis(12), 5, false);
//!
//! assert_eq!(tracker.peak_value(), 5);
//! assert_eq!(tracker.dominant_source().as_deref(), Some("food-poisoning"));
//!
//! // Resolving a contribution takes it out of the aggregate
//! tracker.resolve("food-poisoning");
//! assert_eq!(tracker.peak_value(), 3);
//!
//! // Flatten for export whenever results are written out
//! let snapshot = tracker.collect();
//! assert_eq!(snapshot.len(), 2);
//! ```
//!
//! ## Concurrency
//!
//! - Reports for **different** modules and all queries are safe from any
//!   thread without external locking.
//! - Reports for the **same** module are expected to come from a single
//!   writer; [`SymptomTracker::register`] hands each module its own
//!   [`SourceHandle`] to make that discipline natural.
//! - Aggregate queries read call-time state and may observe a torn view
//!   while reports are in flight, which is acceptable for lazily-consistent
//!   simulation reads.
//!
//! ## Error handling
//!
//! No operation fails: unknown modules and empty histories come back as
//! `None` (or the 0 aggregate sentinel), never as an error.

mod handle;
mod track;
mod tracker;

pub use handle::SourceHandle;
pub use track::SourceTrack;
pub use tracker::SymptomTracker;

// Re-export types for convenience
pub use symtrack_types::{SimTime, SourceHistory, SymptomRecord, SymptomSnapshot};
