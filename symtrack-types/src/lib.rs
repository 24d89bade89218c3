//! # symtrack-types
//!
//! Core types for multi-source symptom tracking. This crate defines the
//! schema that a simulation engine uses to export the time-evolving state
//! of an expressed symptom: which modules reported it, what values they
//! reported and when, and whether each contribution has been resolved.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` and/or `minicbor` features as needed
//! - **Cycle-free exports**: A [`SourceHistory`] never points back at the symptom
//!   that owns it, so flattening to JSON/CBOR cannot recurse
//! - **Versioned schema**: Snapshots include version info for forward compatibility
//! - **Ergonomic builders**: Fluent API for constructing snapshots
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: JSON/MessagePack/etc. serialization via serde
//! - `minicbor`: Compact binary serialization via CBOR
//! - `all`: Enable all serialization formats
//!
//! ## Example
//!
//! ```rust
//! use symtrack_types::{SimTime, SymptomSnapshot};
//!
//! // Build a snapshot using the builder pattern
//! let snapshot = SymptomSnapshot::builder("fever")
//!     .source("flu", |s| {
//!         s.record(3, SimTime::from_millis(10))
//!          .record(4, SimTime::from_millis(25))
//!     })
//!     .source("food-poisoning", |s| {
//!         s.record(5, SimTime::from_millis(12)).resolved(true)
//!     })
//!     .build();
//!
//! assert_eq!(snapshot.len(), 2);
//! // food-poisoning is resolved, so flu's latest report dominates
//! assert_eq!(snapshot.peak_value(), 4);
//! ```
//!
//! ## Schema Version
//!
//! The current schema version is **1**. The version is included in serialized
//! snapshots to allow consumers to handle format evolution gracefully.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod record;
mod snapshot;
mod time;
mod version;

pub use record::*;
pub use snapshot::*;
pub use time::*;
pub use version::*;

/// Current schema version.
///
/// Increment this when making breaking changes to the snapshot format.
/// Consumers should check this version and handle older formats appropriately.
pub const SCHEMA_VERSION: u32 = 1;
