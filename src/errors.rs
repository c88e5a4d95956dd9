// src/errors.rs
//! Conflict diagnostics (E3xxx).
//!
//! Diagnostics use miette for rendering; the structured symbol list travels
//! alongside the error so embedders can cross-reference every declaration in
//! a colliding group.

use crate::syntax::{Span, SymbolId};
use miette::{Diagnostic, SourceSpan};
use smallvec::SmallVec;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ConflictError {
    #[error("conflicting overloads: {signature}")]
    #[diagnostic(
        code(E3001),
        help("rename one declaration or change its parameter list")
    )]
    ConflictingOverloads {
        signature: String,
        #[label("conflicting declaration")]
        span: SourceSpan,
    },

    #[error("redeclaration of '{name}'")]
    #[diagnostic(
        code(E3002),
        help("a declaration with the same name already exists in this scope")
    )]
    Redeclaration {
        name: String,
        #[label("redeclared here")]
        span: SourceSpan,
    },
}

/// A conflict diagnostic wrapping a miette-enabled [`ConflictError`].
#[derive(Debug, Clone)]
pub struct ConflictDiagnostic {
    pub error: ConflictError,
    pub span: Span,
    /// Symbols of every declaration in the colliding group, in collection
    /// order. Every diagnostic of one group carries the same list.
    pub symbols: SmallVec<[SymbolId; 4]>,
}

impl ConflictDiagnostic {
    pub fn new(error: ConflictError, span: Span, symbols: SmallVec<[SymbolId; 4]>) -> Self {
        Self {
            error,
            span,
            symbols,
        }
    }
}

/// Fire-and-forget sink for conflict diagnostics.
pub trait DiagnosticReporter: Sync {
    fn report(&self, diagnostic: ConflictDiagnostic);
}

/// Reporter that buffers diagnostics for later inspection.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    diagnostics: Mutex<Vec<ConflictDiagnostic>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything reported so far.
    pub fn take(&self) -> Vec<ConflictDiagnostic> {
        std::mem::take(
            &mut *self
                .diagnostics
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    pub fn len(&self) -> usize {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticReporter for CollectingReporter {
    fn report(&self, diagnostic: ConflictDiagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}
