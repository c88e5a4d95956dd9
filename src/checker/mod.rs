// src/checker/mod.rs
//! Duplicate-declaration and conflicting-overload checking.
//!
//! One [`ConflictsChecker::check`] call inspects a single declaration
//! container (a file's top level or a class body). File checks additionally
//! fold in same-named package siblings visible from the file, so conflicts
//! spanning two files of one package surface when either file is checked.

mod inspector;
mod presenter;

#[cfg(test)]
mod tests;

pub use inspector::{BucketMap, DeclSet, DeclarationInspector};

use crate::errors::{ConflictDiagnostic, ConflictError, DiagnosticReporter};
use crate::lookup::LookupTracker;
use crate::scope::{ScopeSession, SourceSet};
use crate::syntax::{Decl, SourceFile, SymbolId};
use crate::visibility::VisibilityEvaluator;
use smallvec::SmallVec;
use std::sync::Arc;

/// Coordinator for one compilation's conflict checks.
///
/// Holds only shared, read-side collaborators; all per-check state lives in
/// a stack-owned [`DeclarationInspector`], so checks of distinct containers
/// may run concurrently against one checker.
pub struct ConflictsChecker<'a> {
    sources: &'a SourceSet,
    scopes: &'a ScopeSession,
    visibility: &'a dyn VisibilityEvaluator,
    reporter: &'a dyn DiagnosticReporter,
    lookups: Option<&'a dyn LookupTracker>,
}

impl<'a> ConflictsChecker<'a> {
    pub fn new(
        sources: &'a SourceSet,
        scopes: &'a ScopeSession,
        visibility: &'a dyn VisibilityEvaluator,
        reporter: &'a dyn DiagnosticReporter,
    ) -> Self {
        Self {
            sources,
            scopes,
            visibility,
            reporter,
            lookups: None,
        }
    }

    /// Enable lookup recording for incremental-build tracking.
    pub fn with_lookup_tracker(mut self, tracker: &'a dyn LookupTracker) -> Self {
        self.lookups = Some(tracker);
        self
    }

    /// Check one declaration container. Anything that is not a file or a
    /// class is a no-op by contract, not an error.
    pub fn check(&self, declaration: &Decl) {
        let mut inspector = DeclarationInspector::new();

        match declaration {
            Decl::File(file) => self.check_file(file, &mut inspector),
            Decl::Class(class) => {
                tracing::debug!(class = %class.name, members = class.members.len(), "checking class container");
                // Class member conflicts are fully local: no external scope
                // can inject members into a class body.
                for member in &class.members {
                    inspector.collect(member);
                }
            }
            _ => return,
        }

        self.report_conflicts(&inspector);
    }

    fn check_file(&self, file: &SourceFile, inspector: &mut DeclarationInspector) {
        let scope = self.scopes.get_or_build(&file.package, self.sources);
        tracing::debug!(
            file = file.id.0,
            package = %file.package,
            decls = file.declarations.len(),
            "checking file container"
        );

        for child in &file.declarations {
            inspector.collect(child);

            let name = match child.as_ref() {
                Decl::Function(f) => {
                    self.collect_visible(scope.functions_named(&f.name), file, inspector);
                    Some(f.name.as_str())
                }
                Decl::Property(p) => {
                    self.collect_visible(scope.properties_named(&p.name), file, inspector);
                    Some(p.name.as_str())
                }
                Decl::Class(c) => {
                    self.collect_visible(scope.classifiers_named(&c.name), file, inspector);
                    Some(c.name.as_str())
                }
                Decl::TypeAlias(a) => {
                    self.collect_visible(scope.classifiers_named(&a.name), file, inspector);
                    Some(a.name.as_str())
                }
                Decl::File(_) | Decl::Other(_) => None,
            };

            if let (Some(tracker), Some(name)) = (self.lookups, name) {
                tracker.record_lookup(name, child.span(), file.span, &file.package);
            }
        }
    }

    /// Feed package siblings through the visibility filter into the
    /// inspector. The scope also returns the checked file's own
    /// declarations; identity dedup in the buckets absorbs those.
    fn collect_visible(
        &self,
        candidates: &[Arc<Decl>],
        file: &SourceFile,
        inspector: &mut DeclarationInspector,
    ) {
        for candidate in candidates {
            if self.visibility.is_visible(candidate, file) {
                inspector.collect(candidate);
            }
        }
    }

    fn report_conflicts(&self, inspector: &DeclarationInspector) {
        let empty = BucketMap::default();

        let overload = |decl: &Arc<Decl>, key: &str| ConflictError::ConflictingOverloads {
            signature: key.to_string(),
            span: decl.span().into(),
        };
        let redeclaration = |decl: &Arc<Decl>, _key: &str| ConflictError::Redeclaration {
            name: decl.name().unwrap_or("<unnamed>").to_string(),
            span: decl.span().into(),
        };

        self.report_non_single(&inspector.functions, &empty, overload);
        self.report_non_single(&inspector.expect_functions, &inspector.functions, overload);
        self.report_non_single(&inspector.actual_functions, &inspector.functions, overload);

        self.report_non_single(&inspector.others, &empty, redeclaration);
        self.report_non_single(&inspector.expect_others, &inspector.others, redeclaration);
        self.report_non_single(&inspector.actual_others, &inspector.others, redeclaration);
    }

    /// Report every bucket whose merged set holds more than one declaration.
    ///
    /// For marker buckets, `base` is the plain bucket of the same family:
    /// the working set takes base entries first, then the bucket's own
    /// entries, deduplicated by identity. A merged set of size one is the
    /// no-conflict baseline. Every member of a colliding set receives its
    /// own diagnostic, all carrying the same ordered symbol list.
    fn report_non_single<F>(&self, buckets: &BucketMap, base: &BucketMap, make_error: F)
    where
        F: Fn(&Arc<Decl>, &str) -> ConflictError,
    {
        let mut keys: Vec<&String> = buckets.keys().collect();
        keys.sort();

        for key in keys {
            let set = &buckets[key];
            let mut working = DeclSet::default();
            if let Some(additional) = base.get(key) {
                for decl in additional.iter() {
                    working.insert(decl);
                }
            }
            for decl in set.iter() {
                working.insert(decl);
            }
            if working.len() < 2 {
                continue;
            }

            let symbols: SmallVec<[SymbolId; 4]> =
                working.iter().filter_map(|decl| decl.symbol()).collect();
            tracing::debug!(%key, count = working.len(), "conflicting declarations");

            for decl in working.iter() {
                self.reporter.report(ConflictDiagnostic::new(
                    make_error(decl, key.as_str()),
                    decl.span(),
                    symbols.clone(),
                ));
            }
        }
    }
}
