use super::*;
use crate::errors::{CollectingReporter, ConflictError};
use crate::lookup::RecordingLookupTracker;
use crate::syntax::{
    ClassDecl, ContainerKind, FileId, FuncDecl, Marker, OtherDecl, PropertyDecl, Span, SourceFile,
    SymbolId, TypeAliasDecl, Visibility,
};
use crate::visibility::DefaultVisibilityEvaluator;

const FILE: FileId = FileId(0);

fn check_single_file(decls: Vec<Decl>) -> Vec<ConflictDiagnostic> {
    let mut file = SourceFile::new(FILE, "demo");
    for decl in decls {
        file.push(decl);
    }
    let mut sources = SourceSet::new();
    let file = sources.add_file(file);

    let session = ScopeSession::new();
    let visibility = DefaultVisibilityEvaluator;
    let reporter = CollectingReporter::new();
    let checker = ConflictsChecker::new(&sources, &session, &visibility, &reporter);
    checker.check(&file);
    reporter.take()
}

fn check_class(class: ClassDecl) -> Vec<ConflictDiagnostic> {
    let sources = SourceSet::new();
    let session = ScopeSession::new();
    let visibility = DefaultVisibilityEvaluator;
    let reporter = CollectingReporter::new();
    let checker = ConflictsChecker::new(&sources, &session, &visibility, &reporter);
    checker.check(&Decl::Class(class));
    reporter.take()
}

fn symbols_of(diagnostic: &ConflictDiagnostic) -> Vec<u32> {
    diagnostic.symbols.iter().map(|s| s.0).collect()
}

#[test]
fn distinct_signatures_report_nothing() {
    let diagnostics = check_single_file(vec![
        FuncDecl::new("f", FILE).with_param("i", "Int").into(),
        FuncDecl::new("f", FILE).with_param("s", "String").into(),
        FuncDecl::new("g", FILE).into(),
        ClassDecl::new("C", FILE).into(),
        PropertyDecl::new("x", FILE).with_type("Int").into(),
    ]);
    assert!(diagnostics.is_empty());
}

#[test]
fn duplicate_functions_report_each_declaration() {
    let diagnostics = check_single_file(vec![
        FuncDecl::new("f", FILE)
            .with_param("i", "Int")
            .with_symbol(SymbolId(1))
            .with_span(Span::new(0, 10, 1, 1))
            .into(),
        FuncDecl::new("f", FILE)
            .with_param("j", "Int")
            .with_symbol(SymbolId(2))
            .with_span(Span::new(20, 30, 2, 1))
            .into(),
    ]);

    assert_eq!(diagnostics.len(), 2);
    for diagnostic in &diagnostics {
        assert!(matches!(
            diagnostic.error,
            ConflictError::ConflictingOverloads { .. }
        ));
        assert_eq!(symbols_of(diagnostic), vec![1, 2]);
    }
    // One event per declaration, attached to that declaration's span.
    assert_eq!(diagnostics[0].span, Span::new(0, 10, 1, 1));
    assert_eq!(diagnostics[1].span, Span::new(20, 30, 2, 1));
}

#[test]
fn vararg_and_arity_distinguish_overloads() {
    let diagnostics = check_single_file(vec![
        FuncDecl::new("f", FILE).with_param("i", "Int").into(),
        FuncDecl::new("f", FILE).with_vararg_param("i", "Int").into(),
        FuncDecl::new("f", FILE)
            .with_param("i", "Int")
            .with_param("j", "Int")
            .into(),
        FuncDecl::new("f", FILE)
            .with_param("i", "Int")
            .with_type_params(1)
            .into(),
    ]);
    assert!(diagnostics.is_empty());
}

#[test]
fn expect_actual_pair_is_silent() {
    let diagnostics = check_single_file(vec![
        FuncDecl::new("f", FILE)
            .with_marker(Marker::Expect)
            .with_symbol(SymbolId(1))
            .into(),
        FuncDecl::new("f", FILE)
            .with_marker(Marker::Actual)
            .with_symbol(SymbolId(2))
            .into(),
    ]);
    assert!(diagnostics.is_empty());
}

#[test]
fn two_actuals_for_one_expectation_conflict() {
    let diagnostics = check_single_file(vec![
        FuncDecl::new("f", FILE)
            .with_marker(Marker::Expect)
            .with_symbol(SymbolId(1))
            .into(),
        FuncDecl::new("f", FILE)
            .with_marker(Marker::Actual)
            .with_symbol(SymbolId(2))
            .into(),
        FuncDecl::new("f", FILE)
            .with_marker(Marker::Actual)
            .with_symbol(SymbolId(3))
            .into(),
    ]);

    assert_eq!(diagnostics.len(), 2);
    for diagnostic in &diagnostics {
        assert!(matches!(
            diagnostic.error,
            ConflictError::ConflictingOverloads { .. }
        ));
        assert_eq!(symbols_of(diagnostic), vec![2, 3]);
    }
}

#[test]
fn two_expectations_conflict() {
    let diagnostics = check_single_file(vec![
        FuncDecl::new("f", FILE)
            .with_marker(Marker::Expect)
            .with_symbol(SymbolId(1))
            .into(),
        FuncDecl::new("f", FILE)
            .with_marker(Marker::Expect)
            .with_symbol(SymbolId(2))
            .into(),
    ]);
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn actual_conflicts_with_plain_declaration() {
    let diagnostics = check_single_file(vec![
        FuncDecl::new("f", FILE).with_symbol(SymbolId(1)).into(),
        FuncDecl::new("f", FILE)
            .with_marker(Marker::Actual)
            .with_symbol(SymbolId(2))
            .into(),
    ]);

    assert_eq!(diagnostics.len(), 2);
    // Base entries come first in the merged group.
    for diagnostic in &diagnostics {
        assert_eq!(symbols_of(diagnostic), vec![1, 2]);
    }
}

#[test]
fn mixed_file_yields_two_groups() {
    let diagnostics = check_single_file(vec![
        FuncDecl::new("foo", FILE)
            .with_param("x", "Int")
            .with_symbol(SymbolId(1))
            .into(),
        FuncDecl::new("foo", FILE)
            .with_param("x", "Int")
            .with_symbol(SymbolId(2))
            .into(),
        ClassDecl::new("C", FILE).with_symbol(SymbolId(3)).into(),
        ClassDecl::new("C", FILE).with_symbol(SymbolId(4)).into(),
    ]);

    assert_eq!(diagnostics.len(), 4);
    let overloads: Vec<_> = diagnostics
        .iter()
        .filter(|d| matches!(d.error, ConflictError::ConflictingOverloads { .. }))
        .collect();
    let redeclarations: Vec<_> = diagnostics
        .iter()
        .filter(|d| matches!(d.error, ConflictError::Redeclaration { .. }))
        .collect();

    assert_eq!(overloads.len(), 2);
    assert_eq!(redeclarations.len(), 2);
    for diagnostic in overloads {
        assert_eq!(symbols_of(diagnostic), vec![1, 2]);
    }
    for diagnostic in redeclarations {
        assert_eq!(symbols_of(diagnostic), vec![3, 4]);
    }
}

#[test]
fn property_and_function_never_conflict() {
    let diagnostics = check_class(
        ClassDecl::new("Holder", FILE)
            .with_member(
                PropertyDecl::new("x", FILE)
                    .with_type("Int")
                    .with_container(ContainerKind::Member),
            )
            .with_member(FuncDecl::new("x", FILE).with_container(ContainerKind::Member)),
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn duplicate_class_members_conflict() {
    let diagnostics = check_class(
        ClassDecl::new("Holder", FILE)
            .with_member(
                PropertyDecl::new("x", FILE)
                    .with_symbol(SymbolId(1))
                    .with_container(ContainerKind::Member),
            )
            .with_member(
                PropertyDecl::new("x", FILE)
                    .mutable()
                    .with_symbol(SymbolId(2))
                    .with_container(ContainerKind::Member),
            ),
    );

    assert_eq!(diagnostics.len(), 2);
    for diagnostic in &diagnostics {
        assert!(matches!(diagnostic.error, ConflictError::Redeclaration { .. }));
        assert_eq!(symbols_of(diagnostic), vec![1, 2]);
    }
}

#[test]
fn class_and_type_alias_conflict() {
    let diagnostics = check_single_file(vec![
        ClassDecl::new("C", FILE).with_symbol(SymbolId(1)).into(),
        TypeAliasDecl::new("C", FILE).with_symbol(SymbolId(2)).into(),
    ]);
    assert_eq!(diagnostics.len(), 2);
    for diagnostic in &diagnostics {
        assert!(matches!(diagnostic.error, ConflictError::Redeclaration { .. }));
    }
}

#[test]
fn property_and_class_may_share_a_name() {
    let diagnostics = check_single_file(vec![
        PropertyDecl::new("C", FILE).into(),
        ClassDecl::new("C", FILE).into(),
    ]);
    assert!(diagnostics.is_empty());
}

#[test]
fn non_container_input_is_a_noop() {
    let sources = SourceSet::new();
    let session = ScopeSession::new();
    let visibility = DefaultVisibilityEvaluator;
    let reporter = CollectingReporter::new();
    let checker = ConflictsChecker::new(&sources, &session, &visibility, &reporter);

    checker.check(&Decl::Function(FuncDecl::new("f", FILE)));
    checker.check(&Decl::Other(OtherDecl {
        name: None,
        span: Span::default(),
        file: FILE,
    }));
    assert!(reporter.is_empty());
}

#[test]
fn collect_is_idempotent() {
    let mut inspector = DeclarationInspector::new();
    let decl = Arc::new(Decl::Function(FuncDecl::new("f", FILE).with_param("i", "Int")));

    inspector.collect(&decl);
    inspector.collect(&decl);

    assert_eq!(inspector.functions.len(), 1);
    let set = inspector.functions.values().next().unwrap();
    assert_eq!(set.len(), 1);
}

#[test]
fn decl_set_preserves_insertion_order() {
    let first = Arc::new(Decl::Function(FuncDecl::new("a", FILE)));
    let second = Arc::new(Decl::Function(FuncDecl::new("b", FILE)));

    let mut set = DeclSet::default();
    assert!(set.insert(&first));
    assert!(set.insert(&second));
    assert!(!set.insert(&first));

    let names: Vec<_> = set.iter().filter_map(|d| d.name()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn buckets_route_by_marker_polarity() {
    let mut inspector = DeclarationInspector::new();
    inspector.collect(&Arc::new(Decl::Function(FuncDecl::new("f", FILE))));
    inspector.collect(&Arc::new(Decl::Function(
        FuncDecl::new("f", FILE).with_marker(Marker::Expect),
    )));
    inspector.collect(&Arc::new(Decl::Function(
        FuncDecl::new("f", FILE).with_marker(Marker::Actual),
    )));
    inspector.collect(&Arc::new(Decl::Class(
        ClassDecl::new("C", FILE).with_marker(Marker::Expect),
    )));

    assert_eq!(inspector.functions.len(), 1);
    assert_eq!(inspector.expect_functions.len(), 1);
    assert_eq!(inspector.actual_functions.len(), 1);
    assert_eq!(inspector.expect_others.len(), 1);
    assert!(inspector.others.is_empty());
}

#[test]
fn double_marked_declaration_merges_once() {
    // A declaration that (incorrectly) landed in both the base bucket and a
    // marker bucket must still count once in the merged working set.
    let decl = Arc::new(Decl::Function(
        FuncDecl::new("f", FILE).with_symbol(SymbolId(1)),
    ));
    let key = "fun f()".to_string();

    let mut inspector = DeclarationInspector::new();
    inspector.functions.entry(key.clone()).or_default().insert(&decl);
    inspector.actual_functions.entry(key).or_default().insert(&decl);

    let sources = SourceSet::new();
    let session = ScopeSession::new();
    let visibility = DefaultVisibilityEvaluator;
    let reporter = CollectingReporter::new();
    let checker = ConflictsChecker::new(&sources, &session, &visibility, &reporter);
    checker.report_conflicts(&inspector);

    assert!(reporter.is_empty());
}

#[test]
fn signature_keys_are_deterministic() {
    let func = FuncDecl::new("f", FILE)
        .with_param("i", "Int")
        .with_vararg_param("rest", "String")
        .with_type_params(2);
    let first = presenter::represent_function(&func);
    let second = presenter::represent_function(&func);

    assert_eq!(first, second);
    assert_eq!(first, "fun <2> f(Int, vararg String)");
}

#[test]
fn lookup_records_named_top_level_children() {
    let mut file = SourceFile::new(FILE, "demo").with_span(Span::new(0, 100, 1, 1));
    file.push(FuncDecl::new("f", FILE).with_span(Span::new(0, 10, 1, 1)));
    file.push(ClassDecl::new("C", FILE).with_span(Span::new(20, 30, 3, 1)));
    file.push(OtherDecl {
        name: Some("init".to_string()),
        span: Span::new(40, 50, 5, 1),
        file: FILE,
    });
    file.push(PropertyDecl::new("x", FILE).with_span(Span::new(60, 70, 7, 1)));

    let mut sources = SourceSet::new();
    let file = sources.add_file(file);
    let session = ScopeSession::new();
    let visibility = DefaultVisibilityEvaluator;
    let reporter = CollectingReporter::new();
    let tracker = RecordingLookupTracker::new();
    let checker = ConflictsChecker::new(&sources, &session, &visibility, &reporter)
        .with_lookup_tracker(&tracker);
    checker.check(&file);

    let records = tracker.take();
    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    // Ignored declaration kinds never record a lookup, named or not.
    assert_eq!(names, vec!["f", "C", "x"]);
    assert!(records.iter().all(|r| r.package == "demo"));
    assert_eq!(records[0].usage, Span::new(0, 10, 1, 1));
    assert_eq!(records[0].containing_file, Span::new(0, 100, 1, 1));
}

#[test]
fn visibility_restricted_sibling_is_excluded() {
    let mut observing = SourceFile::new(FileId(0), "demo");
    observing.push(
        FuncDecl::new("f", FileId(0))
            .with_symbol(SymbolId(1))
            .with_visibility(Visibility::Public),
    );
    let mut hidden = SourceFile::new(FileId(1), "demo");
    hidden.push(
        FuncDecl::new("f", FileId(1))
            .with_symbol(SymbolId(2))
            .with_visibility(Visibility::Private),
    );

    let mut sources = SourceSet::new();
    let observing = sources.add_file(observing);
    sources.add_file(hidden);

    let session = ScopeSession::new();
    let visibility = DefaultVisibilityEvaluator;
    let reporter = CollectingReporter::new();
    let checker = ConflictsChecker::new(&sources, &session, &visibility, &reporter);
    checker.check(&observing);

    assert!(reporter.is_empty());
}
