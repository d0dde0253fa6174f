use grok_rs::pattern::PatternError;
use grok_rs::{DenormalizedPattern, FieldType, Matcher, PatternLayer, ResolveError, resolve};
use std::sync::Arc;

fn external_numbers() -> PatternLayer {
    let mut layer = PatternLayer::default();
    layer.insert(
        "NUMBER".to_string(),
        Arc::new(DenormalizedPattern::literal(r"\d+")),
    );
    layer
}

#[test]
fn resolve_when_definitions_chain_then_every_name_is_resolved() {
    let resolution = resolve(
        [("BASE", r"(\d+)"), ("DERIVED", "%{BASE:value:int} units")],
        &[],
    );

    assert!(resolution.is_complete());
    let derived = resolution
        .resolved
        .get("DERIVED")
        .expect("DERIVED should resolve");
    assert_eq!(derived.expanded(), r"(?P<value>(\d+)) units");
    assert_eq!(derived.field_type("value"), Some(FieldType::Integer));
    assert_eq!(
        resolution
            .resolved
            .get("BASE")
            .map(|pattern| pattern.expanded()),
        Some(r"(\d+)")
    );
}

#[test]
fn resolve_when_plain_reference_then_fragment_is_grouped() {
    let resolution = resolve([("BASE", r"\d+"), ("DERIVED", "%{BASE}")], &[]);

    assert_eq!(resolution.resolved.len(), 2);
    let derived = resolution
        .resolved
        .get("DERIVED")
        .expect("DERIVED should resolve");
    assert!(derived.expanded().contains(r"(\d+)"));
}

#[test]
fn resolve_when_only_definition_is_broken_then_nothing_resolves() {
    let resolution = resolve([("BROKEN", "%{NONEXISTENT}")], &[]);

    assert!(resolution.resolved.is_empty());
    assert_eq!(resolution.failed.len(), 1);
    assert_eq!(
        resolution.failure_messages(),
        vec!["BROKEN: no pattern found for %{NONEXISTENT}".to_string()]
    );
}

#[test]
fn resolve_when_definitions_form_a_cycle_then_both_names_fail_with_cycle() {
    let resolution = resolve([("A", "%{B}"), ("B", "%{A}")], &[]);

    assert!(resolution.resolved.is_empty());
    assert_eq!(resolution.failed.len(), 2);

    match resolution.failed.get("A") {
        Some(ResolveError::CircularDependency { path }) => {
            assert_eq!(path, &["A", "B", "A"]);
        }
        other => panic!("unexpected failure for A: {other:?}"),
    }
    match resolution.failed.get("B") {
        Some(ResolveError::CircularDependency { path }) => {
            assert_eq!(path, &["B", "A", "B"]);
        }
        other => panic!("unexpected failure for B: {other:?}"),
    }
    assert_eq!(
        resolution.failure_messages(),
        vec![
            "A: circular dependency: pattern A -> B -> A".to_string(),
            "B: circular dependency: pattern B -> A -> B".to_string(),
        ]
    );
}

#[test]
fn resolve_when_definition_references_itself_then_cycle_is_reported() {
    let resolution = resolve([("SELF", "x%{SELF}")], &[]);

    match resolution.failed.get("SELF") {
        Some(ResolveError::CircularDependency { path }) => {
            assert_eq!(path, &["SELF", "SELF"]);
        }
        other => panic!("unexpected failure: {other:?}"),
    }
}

#[test]
fn resolve_when_reference_is_missing_then_only_that_definition_fails() {
    let resolution = resolve([("BROKEN", "%{MISSING}"), ("FINE", r"\w+")], &[]);

    assert!(resolution.resolved.contains_key("FINE"));
    match resolution.failed.get("BROKEN") {
        Some(ResolveError::Pattern(PatternError::UnresolvedReference { name })) => {
            assert_eq!(name, "MISSING");
        }
        other => panic!("unexpected failure: {other:?}"),
    }
}

#[test]
fn resolve_when_dependency_fails_then_dependant_names_the_dependency() {
    let resolution = resolve(
        [
            ("BROKEN", "%{MISSING}"),
            ("USES_BROKEN", "%{BROKEN:b}"),
            ("ALSO_USES", "%{USES_BROKEN}"),
        ],
        &[],
    );

    assert!(resolution.resolved.is_empty());
    match resolution.failed.get("USES_BROKEN") {
        Some(ResolveError::Pattern(PatternError::UnresolvedReference { name })) => {
            assert_eq!(name, "BROKEN");
        }
        other => panic!("unexpected failure: {other:?}"),
    }
    match resolution.failed.get("ALSO_USES") {
        Some(ResolveError::Pattern(PatternError::UnresolvedReference { name })) => {
            assert_eq!(name, "USES_BROKEN");
        }
        other => panic!("unexpected failure: {other:?}"),
    }
}

#[test]
fn resolve_when_token_is_malformed_then_definition_fails_with_invalid_token() {
    let resolution = resolve([("BAD", "%{NOT VALID}")], &[]);

    match resolution.failed.get("BAD") {
        Some(ResolveError::Pattern(PatternError::InvalidToken { token })) => {
            assert_eq!(token, "NOT VALID");
        }
        other => panic!("unexpected failure: {other:?}"),
    }
}

#[test]
fn resolve_when_externals_given_then_references_use_them_without_copying() {
    let externals = external_numbers();
    let resolution = resolve([("PORT", "%{NUMBER:port:int}")], &[&externals]);

    assert!(resolution.is_complete());
    assert_eq!(resolution.resolved.len(), 1);
    assert!(!resolution.resolved.contains_key("NUMBER"));
    assert_eq!(
        resolution
            .resolved
            .get("PORT")
            .map(|pattern| pattern.expanded()),
        Some(r"(?P<port>\d+)")
    );
}

#[test]
fn resolve_when_definition_shadows_external_then_definition_is_used() {
    let externals = external_numbers();
    let resolution = resolve(
        [("NUMBER", "[0-9]"), ("ONE", "%{NUMBER}")],
        &[&externals],
    );

    assert_eq!(
        resolution
            .resolved
            .get("ONE")
            .map(|pattern| pattern.expanded()),
        Some("([0-9])")
    );
}

#[test]
fn resolve_when_mixed_outcomes_then_resolved_and_failed_are_disjoint() {
    let definitions = [
        ("A", "%{B}"),
        ("B", "%{A}"),
        ("C", r"\d"),
        ("D", "%{C}%{C}"),
        ("E", "%{GONE}"),
        ("F", "%{E}|%{D}"),
    ];
    let resolution = resolve(definitions, &[]);

    for (name, _) in definitions {
        let in_resolved = resolution.resolved.contains_key(name);
        let in_failed = resolution.failed.contains_key(name);
        assert!(in_resolved ^ in_failed, "{name} should be in exactly one map");
    }
    assert!(resolution.resolved.contains_key("D"));
    assert!(resolution.failed.contains_key("F"));
}

#[test]
fn resolve_when_resolution_becomes_store_then_matcher_compiles_from_it() {
    let store = resolve(
        [("DIGITS", r"\d+"), ("PAIR", "%{DIGITS:left}/%{DIGITS:right}")],
        &[],
    )
    .into_store();

    let matcher = Matcher::from_query("%{PAIR}", &[&store]).expect("query should compile");
    let values = matcher.match_text("12/34", false).expect("text should match");

    assert_eq!(matcher.value_by_name("left", &values), Some("12"));
    assert_eq!(matcher.value_by_name("right", &values), Some("34"));
}

#[test]
fn resolve_when_definition_reaches_a_cycle_then_path_starts_at_that_definition() {
    let resolution = resolve([("A", "%{B}"), ("B", "%{A}"), ("C", "x%{A}")], &[]);

    assert!(resolution.resolved.is_empty());
    match resolution.failed.get("C") {
        Some(ResolveError::CircularDependency { path }) => {
            assert_eq!(path, &["C", "A", "B", "A"]);
        }
        other => panic!("unexpected failure for C: {other:?}"),
    }
    assert_eq!(
        resolution.failed.get("C").map(ToString::to_string).as_deref(),
        Some("circular dependency: pattern C -> A -> B -> A")
    );
}
