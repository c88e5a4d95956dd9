// src/lib.rs
//! Duplicate-declaration and conflicting-overload detection for compiler
//! front ends.
//!
//! An embedder lowers its declarations into the [`syntax`] model, registers
//! files in a [`scope::SourceSet`], and runs one
//! [`checker::ConflictsChecker::check`] per declaration container. Checks of
//! distinct containers are independent and may run on separate threads
//! against shared collaborators.

pub mod checker;
pub mod errors;
pub mod lookup;
pub mod scope;
pub mod syntax;
pub mod visibility;

pub use checker::{ConflictsChecker, DeclarationInspector};
pub use errors::{CollectingReporter, ConflictDiagnostic, ConflictError, DiagnosticReporter};
pub use lookup::{LookupRecord, LookupTracker, RecordingLookupTracker};
pub use scope::{PackageMemberScope, ScopeSession, SourceSet};
pub use visibility::{DefaultVisibilityEvaluator, VisibilityEvaluator};
