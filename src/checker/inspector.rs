// src/checker/inspector.rs
//! Declaration accumulator: partitions collected declarations into
//! signature-keyed buckets.
//!
//! One inspector lives for exactly one container check and is discarded
//! afterwards; cross-file detection comes from the package scope feeding the
//! same inspector, never from shared inspector state.

use super::presenter;
use crate::syntax::{Decl, Marker};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// Insertion-ordered set of declarations, deduplicated by pointer identity.
///
/// Order is what makes diagnostic symbol lists reproducible; identity keying
/// is what makes re-collecting the same declaration through a second path
/// (e.g. the package scope returning the file's own members) a no-op.
#[derive(Debug, Default)]
pub struct DeclSet {
    entries: Vec<Arc<Decl>>,
    seen: FxHashSet<usize>,
}

impl DeclSet {
    /// Insert unless this exact declaration is already present.
    /// Returns whether the set grew.
    pub fn insert(&mut self, decl: &Arc<Decl>) -> bool {
        if self.seen.insert(Arc::as_ptr(decl) as usize) {
            self.entries.push(decl.clone());
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Decl>> {
        self.entries.iter()
    }
}

/// Bucket map from signature key to the declarations sharing it.
pub type BucketMap = FxHashMap<String, DeclSet>;

/// Accumulator for one container check.
///
/// Plain declarations land in `functions`/`others`; declarations carrying a
/// multi-declaration marker land in the bucket matching their polarity. The
/// coordinator later merges each marker bucket against its base bucket, so an
/// expect/actual pair sharing a key is never flagged against itself while two
/// realizations of one key still collide.
#[derive(Debug, Default)]
pub struct DeclarationInspector {
    pub functions: BucketMap,
    pub expect_functions: BucketMap,
    pub actual_functions: BucketMap,
    pub others: BucketMap,
    pub expect_others: BucketMap,
    pub actual_others: BucketMap,
}

impl DeclarationInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort one declaration into its bucket. Kinds that cannot participate
    /// in name conflicts (files, constructors, initializers) are ignored.
    pub fn collect(&mut self, decl: &Arc<Decl>) {
        match decl.as_ref() {
            Decl::Function(func) => {
                let key = presenter::represent_function(func);
                let target = match func.marker {
                    Some(Marker::Expect) => &mut self.expect_functions,
                    Some(Marker::Actual) => &mut self.actual_functions,
                    None => &mut self.functions,
                };
                target.entry(key).or_default().insert(decl);
            }
            Decl::Class(class) => {
                let key = presenter::represent_classifier(&class.name, class.type_params);
                self.other_bucket(class.marker).entry(key).or_default().insert(decl);
            }
            Decl::TypeAlias(alias) => {
                let key = presenter::represent_classifier(&alias.name, alias.type_params);
                self.other_bucket(alias.marker).entry(key).or_default().insert(decl);
            }
            Decl::Property(prop) => {
                let key = presenter::represent_property(prop);
                self.other_bucket(prop.marker).entry(key).or_default().insert(decl);
            }
            Decl::File(_) | Decl::Other(_) => {}
        }
    }

    fn other_bucket(&mut self, marker: Option<Marker>) -> &mut BucketMap {
        match marker {
            Some(Marker::Expect) => &mut self.expect_others,
            Some(Marker::Actual) => &mut self.actual_others,
            None => &mut self.others,
        }
    }
}
