use crate::{Inferred, Item, ListConfig, infer};
use quire_idf::{BlockMeta, ContainerKind, Node};
use quire_numbering::{
    AbstractListDefinition, FirstUseReset, LevelDefinition, ListInstance, NumberFormat,
    NumberingResolver, NumberingSet, ResolvedNumbering,
};
use quire_style::ResolvedStyles;

fn numbering() -> ResolvedNumbering {
    let set = NumberingSet::new(
        vec![
            AbstractListDefinition::with_levels(
                "L",
                vec![
                    Some(LevelDefinition::new(NumberFormat::Decimal, "%1.", 1)),
                    Some(LevelDefinition::new(NumberFormat::LowerLetter, "%2.", 1)),
                ],
            ),
            AbstractListDefinition::with_levels(
                "B",
                vec![Some(LevelDefinition::bullet("\u{f0b7}"))],
            ),
        ],
        vec![
            ListInstance::new("N", "L"),
            ListInstance::new("M", "L"),
            ListInstance::new("D", "B"),
        ],
    )
    .unwrap();
    NumberingResolver::new(&set, &ResolvedStyles::default())
        .resolve_all()
        .unwrap()
}

fn para(text: &str) -> Node {
    Node::block(BlockMeta::default(), vec![Node::text(text)])
}

fn list(instance: &str, level: usize, indentation: f32) -> Item {
    Item::list(instance, level, indentation, para("item"))
}

fn plain(indentation: f32) -> Item {
    Item::passthrough(para("text"), indentation)
}

fn tag(kind: &ContainerKind) -> &'static str {
    match kind {
        ContainerKind::Unordered => "UL",
        ContainerKind::Ordered => "OL",
        ContainerKind::NestedOrdered => "NOL",
    }
}

/// Compact rendering of the container structure, ignoring text.
fn shape(nodes: &[Node]) -> String {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::Block { .. } => Some("P".to_string()),
            Node::Item { children, .. } => {
                let inner = shape(children);
                Some(if inner.is_empty() {
                    "I".to_string()
                } else {
                    format!("I[{inner}]")
                })
            }
            Node::Container { kind, children, .. } => {
                Some(format!("{}[{}]", tag(kind), shape(children)))
            }
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn values(inferred: &Inferred) -> Vec<u32> {
    inferred.counters_observed.iter().map(|c| c.value).collect()
}

#[test]
fn test_nested_list_between_passthrough_content() {
    let _ = env_logger::builder().is_test(true).try_init();

    let items = vec![
        plain(0.0),
        list("N", 0, 10.0),
        list("N", 0, 10.0),
        list("N", 1, 20.0),
        plain(0.0),
    ];
    let inferred = infer(items, &numbering(), &ListConfig::default());

    assert_eq!(shape(&inferred.nodes), "P,OL[I,I[NOL[I]]],P");
    match &inferred.nodes[1] {
        Node::Container { depth, children, .. } => {
            assert_eq!(*depth, 0);
            assert_eq!(children[1].child(0), Some(&Node::text("item")));
            match children[1].child(1) {
                Some(Node::Container { depth, .. }) => assert_eq!(*depth, 1),
                other => panic!("expected nested container, got {other:?}"),
            }
        }
        other => panic!("expected container, got {other:?}"),
    }
}

#[test]
fn test_counter_sequencing() {
    let items = vec![
        list("N", 0, 10.0),
        list("N", 0, 10.0),
        list("N", 1, 20.0),
        list("N", 0, 10.0),
    ];
    let inferred = infer(items, &numbering(), &ListConfig::default());
    assert_eq!(values(&inferred), vec![1, 2, 1, 3]);
    assert_eq!(shape(&inferred.nodes), "OL[I,I[NOL[I]],I]");
}

#[test]
fn test_bullets_open_unordered_containers() {
    let items = vec![list("D", 0, 10.0), list("D", 0, 10.0)];
    let inferred = infer(items, &numbering(), &ListConfig::default());
    assert_eq!(shape(&inferred.nodes), "UL[I,I]");
}

#[test]
fn test_same_indentation_mixed_kinds_nest() {
    let items = vec![
        list("D", 0, 10.0),
        list("N", 0, 10.0),
        list("N", 0, 10.0),
        plain(0.0),
    ];
    let inferred = infer(items, &numbering(), &ListConfig::default());
    assert_eq!(shape(&inferred.nodes), "UL[I[OL[I,I]]],P");

    let reversed = vec![list("N", 0, 10.0), list("D", 0, 10.0)];
    let inferred = infer(reversed, &numbering(), &ListConfig::default());
    assert_eq!(shape(&inferred.nodes), "OL[I[UL[I]]]");
}

#[test]
fn test_alternating_kinds_return_to_the_enclosing_list() {
    let items = vec![
        list("D", 0, 10.0),
        list("N", 0, 10.0),
        list("D", 0, 10.0),
        list("N", 0, 10.0),
        list("D", 0, 10.0),
    ];
    let inferred = infer(items, &numbering(), &ListConfig::default());
    assert_eq!(shape(&inferred.nodes), "UL[I[OL[I]],I[OL[I]],I]");
    match &inferred.nodes[0] {
        Node::Container { children, .. } => match children[0].child(1) {
            Some(Node::Container { depth, .. }) => assert_eq!(*depth, 1),
            other => panic!("expected nested container, got {other:?}"),
        },
        other => panic!("expected container, got {other:?}"),
    }
}

#[test]
fn test_numbered_paragraphs_outside_lists_still_count() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut unrecognized = list("N", 0, 10.0).with_marker("(1)\t");
    unrecognized.is_recognized_list_marker = false;
    let items = vec![unrecognized, list("N", 0, 10.0).with_marker("2.\t")];

    let inferred = infer(items, &numbering(), &ListConfig::default());
    assert_eq!(values(&inferred), vec![1, 2]);
    assert!(inferred.diagnostics.is_empty());
    assert_eq!(shape(&inferred.nodes), "P,OL[I]");
}

#[test]
fn test_indented_content_continues_the_item() {
    let items = vec![list("N", 0, 10.0), plain(46.0), plain(30.0)];
    let inferred = infer(items, &numbering(), &ListConfig::default());
    assert_eq!(shape(&inferred.nodes), "OL[I[P]],P");
}

#[test]
fn test_figures_keep_lists_open() {
    let items = vec![
        list("N", 0, 10.0),
        plain(0.0).keeping_lists_open(),
        list("N", 0, 10.0),
    ];
    let inferred = infer(items, &numbering(), &ListConfig::default());
    assert_eq!(shape(&inferred.nodes), "OL[I[P],I]");
    assert_eq!(values(&inferred), vec![1, 2]);

    let items = vec![list("N", 0, 10.0), plain(0.0), list("N", 0, 10.0)];
    let inferred = infer(items, &numbering(), &ListConfig::default());
    assert_eq!(shape(&inferred.nodes), "OL[I],P,OL[I]");
}

#[test]
fn test_far_indented_first_item_restarts_primary_list() {
    let items = vec![
        list("N", 0, 10.0).with_marker("1.\t"),
        list("M", 0, 50.0).with_marker("1.\t"),
        list("M", 0, 30.0),
    ];
    let inferred = infer(items, &numbering(), &ListConfig::default());
    assert_eq!(shape(&inferred.nodes), "OL[I[OL[I],NOL[I]]]");
}

#[test]
fn test_shared_definition_restarts_for_new_instance() {
    let items = || vec![list("N", 0, 10.0), list("N", 0, 10.0), list("M", 0, 10.0)];

    let inferred = infer(items(), &numbering(), &ListConfig::default());
    assert_eq!(values(&inferred), vec![1, 2, 1]);

    let continuing = ListConfig {
        first_use_reset: FirstUseReset::Disabled,
        ..ListConfig::default()
    };
    let inferred = infer(items(), &numbering(), &continuing);
    assert_eq!(values(&inferred), vec![1, 2, 3]);
}

#[test]
fn test_marker_mismatch_is_reported_not_fatal() {
    let items = || {
        vec![
            list("N", 0, 10.0).with_marker("1.\t"),
            list("N", 0, 10.0).with_marker("7.\t"),
            list("N", 1, 20.0).with_marker("a.\t"),
        ]
    };

    let inferred = infer(items(), &numbering(), &ListConfig::default());
    assert_eq!(shape(&inferred.nodes), "OL[I,I[NOL[I]]]");
    assert_eq!(inferred.diagnostics.len(), 1);
    let mismatch = &inferred.diagnostics[0];
    assert_eq!(mismatch.position, 1);
    assert_eq!(mismatch.expected, "2.\t");
    assert_eq!(mismatch.found, "7.\t");

    let quiet = ListConfig {
        check_markers: false,
        ..ListConfig::default()
    };
    assert!(infer(items(), &numbering(), &quiet).diagnostics.is_empty());
}

#[test]
fn test_unnumbered_and_unknown_instances() {
    let items = vec![
        Item::list("0", 0, 10.0, para("not a list")),
        list("Z", 0, 10.0),
    ];
    let inferred = infer(items, &numbering(), &ListConfig::default());
    assert_eq!(shape(&inferred.nodes), "P,OL[I]");
    assert!(inferred.counters_observed.is_empty());
}

#[test]
fn test_rerun_from_fresh_state_is_identical() {
    let items = || {
        vec![
            plain(0.0),
            list("N", 0, 10.0),
            list("N", 1, 20.0),
            list("D", 0, 20.0),
            list("M", 0, 10.0),
        ]
    };
    let numbering = numbering();
    let first = infer(items(), &numbering, &ListConfig::default());
    let second = infer(items(), &numbering, &ListConfig::default());
    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.counters_observed, second.counters_observed);
    assert_eq!(first.counters, second.counters);
}

#[test]
fn test_config_from_json_fills_defaults() {
    let config: ListConfig =
        serde_json::from_str(r#"{ "calibrationOffset": 18.0, "firstUseReset": "per-instance" }"#)
            .unwrap();
    assert_eq!(config.calibration_offset, 18.0);
    assert_eq!(config.first_use_reset, FirstUseReset::PerInstance);
    assert_eq!(config.restart_marker, "1.\t");
    assert!(config.check_markers);
}
