// src/scope.rs
//! Package member scopes and the per-session scope cache.
//!
//! A [`PackageMemberScope`] indexes every top-level declaration of one
//! package, across all of its files. File checks query it for same-named
//! siblings, which is what makes cross-file conflicts visible even though
//! each file is inspected in its own invocation.

use crate::syntax::{ContainerKind, Decl};
use dashmap::DashMap;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// All source files of a compilation, possibly spanning several packages.
#[derive(Debug, Default)]
pub struct SourceSet {
    files: Vec<Arc<Decl>>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file container and return its shared handle.
    pub fn add_file(&mut self, file: crate::syntax::SourceFile) -> Arc<Decl> {
        let decl = Arc::new(Decl::File(file));
        self.files.push(decl.clone());
        decl
    }

    pub fn files(&self) -> &[Arc<Decl>] {
        &self.files
    }
}

/// Name-indexed view of every top-level declaration in one package.
///
/// Functions, classifiers (classes and type aliases) and properties live in
/// separate indexes, matching the three lookup paths of the file check.
#[derive(Debug)]
pub struct PackageMemberScope {
    package: String,
    functions: FxHashMap<String, Vec<Arc<Decl>>>,
    classifiers: FxHashMap<String, Vec<Arc<Decl>>>,
    properties: FxHashMap<String, Vec<Arc<Decl>>>,
}

impl PackageMemberScope {
    pub fn build(package: &str, sources: &SourceSet) -> Self {
        let mut scope = Self {
            package: package.to_string(),
            functions: FxHashMap::default(),
            classifiers: FxHashMap::default(),
            properties: FxHashMap::default(),
        };
        for file in sources.files() {
            let Decl::File(file) = file.as_ref() else {
                continue;
            };
            if file.package != package {
                continue;
            }
            for decl in &file.declarations {
                if decl.container() != Some(ContainerKind::TopLevel) {
                    continue;
                }
                match decl.as_ref() {
                    Decl::Function(f) => {
                        scope.functions.entry(f.name.clone()).or_default().push(decl.clone());
                    }
                    Decl::Class(c) => {
                        scope.classifiers.entry(c.name.clone()).or_default().push(decl.clone());
                    }
                    Decl::TypeAlias(a) => {
                        scope.classifiers.entry(a.name.clone()).or_default().push(decl.clone());
                    }
                    Decl::Property(p) => {
                        scope.properties.entry(p.name.clone()).or_default().push(decl.clone());
                    }
                    Decl::File(_) | Decl::Other(_) => {}
                }
            }
        }
        scope
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn functions_named(&self, name: &str) -> &[Arc<Decl>] {
        self.functions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn classifiers_named(&self, name: &str) -> &[Arc<Decl>] {
        self.classifiers.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn properties_named(&self, name: &str) -> &[Arc<Decl>] {
        self.properties.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Session-scoped cache of package member scopes.
///
/// Shared by all container checks of one compilation; each package scope is
/// built at most once even when checks for files of the same package race on
/// separate threads.
#[derive(Debug, Default)]
pub struct ScopeSession {
    scopes: DashMap<String, Arc<PackageMemberScope>>,
}

impl ScopeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&self, package: &str, sources: &SourceSet) -> Arc<PackageMemberScope> {
        self.scopes
            .entry(package.to_string())
            .or_insert_with(|| Arc::new(PackageMemberScope::build(package, sources)))
            .value()
            .clone()
    }
}
