// src/visibility.rs
//! Visibility predicate used to filter cross-file conflict candidates.

use crate::syntax::{Decl, SourceFile, Visibility};

/// Decides whether `declaration` can be observed from `observing_file`.
///
/// Pure predicate; implementations must be safe to call from concurrent
/// container checks.
pub trait VisibilityEvaluator: Sync {
    fn is_visible(&self, declaration: &Decl, observing_file: &SourceFile) -> bool;
}

/// Package-local visibility rules: `Private` declarations are only visible
/// from their declaring file, everything else is visible package-wide.
/// Declarations without a visibility (files, ignored kinds) always pass.
#[derive(Debug, Default)]
pub struct DefaultVisibilityEvaluator;

impl VisibilityEvaluator for DefaultVisibilityEvaluator {
    fn is_visible(&self, declaration: &Decl, observing_file: &SourceFile) -> bool {
        match declaration.visibility() {
            Some(Visibility::Private) => declaration.file() == Some(observing_file.id),
            Some(Visibility::Public) | Some(Visibility::Internal) | None => true,
        }
    }
}
