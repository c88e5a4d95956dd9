// src/lookup.rs
//! Lookup recording for incremental-build dependency tracking.
//!
//! The file check records one lookup per named top-level declaration so an
//! incremental compiler can invalidate this file when a same-named
//! declaration is added to or removed from the package.

use crate::syntax::Span;
use std::sync::{Mutex, PoisonError};

/// Sink for name-lookup side effects. Installed optionally; when absent,
/// tracking is skipped entirely.
pub trait LookupTracker: Sync {
    fn record_lookup(&self, name: &str, usage: Span, containing_file: Span, package: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRecord {
    pub name: String,
    pub usage: Span,
    pub containing_file: Span,
    pub package: String,
}

/// Tracker that buffers records for batch consumption.
#[derive(Debug, Default)]
pub struct RecordingLookupTracker {
    records: Mutex<Vec<LookupRecord>>,
}

impl RecordingLookupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<LookupRecord> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl LookupTracker for RecordingLookupTracker {
    fn record_lookup(&self, name: &str, usage: Span, containing_file: Span, package: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LookupRecord {
                name: name.to_string(),
                usage,
                containing_file,
                package: package.to_string(),
            });
    }
}
