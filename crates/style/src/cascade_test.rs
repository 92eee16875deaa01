use crate::cascade::CascadeResolver;
use crate::stylesheet::{StyleKind, StyleRule, StyleSet};
use crate::CascadeError;
use quire_types::{PropertyMap, StyleId};

fn props(pairs: &[(&str, &str)]) -> PropertyMap {
    pairs.iter().copied().collect()
}

fn rule(id: &str, parent: Option<&str>, pairs: &[(&str, &str)]) -> StyleRule {
    let r = StyleRule::new(id, StyleKind::Paragraph, props(pairs));
    match parent {
        Some(p) => r.based_on(p),
        None => r,
    }
}

#[test]
fn test_child_inherits_and_overrides() {
    let set = StyleSet::new(vec![
        rule("A", None, &[("color", "red")]),
        rule("B", Some("A"), &[("font", "serif")]),
        rule("C", Some("A"), &[("color", "blue")]),
    ])
    .unwrap();
    let mut resolver = CascadeResolver::new(&set);

    let b = resolver.resolve(&StyleId::from("B")).unwrap();
    assert_eq!(b.properties, props(&[("color", "red"), ("font", "serif")]));

    let a = resolver.resolve(&StyleId::from("A")).unwrap();
    assert_eq!(a.properties, props(&[("color", "red")]));

    let c = resolver.resolve(&StyleId::from("C")).unwrap();
    assert_eq!(c.properties, props(&[("color", "blue")]));
}

#[test]
fn test_deep_chain_keeps_every_ancestor_key() {
    let set = StyleSet::new(vec![
        rule("Leaf", Some("Mid"), &[("text-indent", "-18pt")]),
        rule("Mid", Some("Root"), &[("margin-left", "36pt"), ("color", "green")]),
        rule("Root", None, &[("font-family", "serif"), ("color", "black")]),
    ])
    .unwrap();

    let resolved = CascadeResolver::new(&set).resolve_all().unwrap();
    assert_eq!(
        resolved.properties(&StyleId::from("Leaf")).unwrap(),
        &props(&[
            ("color", "green"),
            ("font-family", "serif"),
            ("margin-left", "36pt"),
            ("text-indent", "-18pt"),
        ])
    );
    assert_eq!(resolved.len(), 3);
}

#[test]
fn test_repeated_resolution_returns_same_value() {
    let set = StyleSet::new(vec![
        rule("A", None, &[("color", "red")]),
        rule("B", Some("A"), &[]),
    ])
    .unwrap();
    let mut resolver = CascadeResolver::new(&set);
    let first = resolver.resolve(&StyleId::from("B")).unwrap();
    let second = resolver.resolve(&StyleId::from("B")).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn test_two_rule_cycle_is_fatal() {
    let _ = env_logger::builder().is_test(true).try_init();

    let set = StyleSet::new(vec![
        rule("A", Some("B"), &[("color", "red")]),
        rule("B", Some("A"), &[]),
    ])
    .unwrap();

    let err = CascadeResolver::new(&set)
        .resolve(&StyleId::from("A"))
        .unwrap_err();
    match err {
        CascadeError::Cycle { path } => {
            let names: Vec<&str> = path.iter().map(StyleId::as_str).collect();
            assert_eq!(names, vec!["A", "B", "A"]);
        }
        other => panic!("expected a cycle, got {other:?}"),
    }

    assert!(CascadeResolver::new(&set).resolve_all().is_err());
}

#[test]
fn test_self_parent_is_a_cycle() {
    let set = StyleSet::new(vec![rule("Loop", Some("Loop"), &[])]).unwrap();
    let err = CascadeResolver::new(&set).resolve_all().unwrap_err();
    assert!(matches!(err, CascadeError::Cycle { .. }));
    assert_eq!(err.to_string(), "Style inheritance cycle: Loop -> Loop");
}

#[test]
fn test_dangling_parent_is_reported() {
    let set = StyleSet::new(vec![rule("Body", Some("Missing"), &[])]).unwrap();
    let err = CascadeResolver::new(&set).resolve_all().unwrap_err();
    assert_eq!(
        err,
        CascadeError::UnresolvedReference {
            from: Some(StyleId::from("Body")),
            missing: StyleId::from("Missing"),
        }
    );
}

#[test]
fn test_unknown_id_lookup_is_reported() {
    let set = StyleSet::new(vec![]).unwrap();
    let err = CascadeResolver::new(&set)
        .resolve(&StyleId::from("Nope"))
        .unwrap_err();
    assert!(matches!(err, CascadeError::UnresolvedReference { from: None, .. }));
}

#[test]
fn test_duplicate_ids_rejected() {
    let err = StyleSet::new(vec![rule("A", None, &[]), rule("A", None, &[])]).unwrap_err();
    assert_eq!(err, CascadeError::DuplicateStyle(StyleId::from("A")));
}

#[test]
fn test_independent_passes_are_identical() {
    let rules = vec![
        rule("Normal", None, &[("font-family", "serif")]),
        rule("Alg", Some("Normal"), &[("margin-left", "36pt")]),
    ];
    let set = StyleSet::new(rules).unwrap();
    let first = CascadeResolver::new(&set).resolve_all().unwrap();
    let second = CascadeResolver::new(&set).resolve_all().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.sorted()[0].id.as_str(), "Alg");
}
