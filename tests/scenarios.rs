use component_inference::classifiers::ClassifierRegistry;
use component_inference::config::SlotMappingConfig;
use component_inference::node::{LayoutMode, Paint, PaintKind, Style};
use component_inference::{
    collect_candidates, CancellationFlag, ComponentEngine, ComponentType, EngineConfig, Node,
    SchemaRegistry, SlotMapper,
};

fn engine() -> ComponentEngine {
    ComponentEngine::new(EngineConfig::default()).unwrap()
}

fn dropdown() -> Node {
    Node::frame("1", "DropdownMenu").with_children(vec![
        Node::frame("2", "Trigger"),
        Node::frame("3", "Content")
            .with_children(vec![Node::frame("4", "Item"), Node::frame("5", "Item")]),
    ])
}

fn score_of(node: &Node, component: ComponentType) -> f64 {
    ClassifierRegistry::new()
        .score_all(node)
        .into_iter()
        .find(|r| r.component == Some(component))
        .map(|r| r.confidence)
        .unwrap()
}

#[test]
fn test_dropdown_menu_scenario() {
    let node = dropdown();
    let analysis = engine().analyze(&node).unwrap();

    assert_eq!(analysis.classification.component, Some(ComponentType::DropdownMenu));
    assert!(analysis.classification.confidence >= 0.7);

    let mapping = analysis.mapping.unwrap();
    assert!(mapping.warnings.is_empty(), "{:?}", mapping.warnings);
    assert_eq!(mapping.mapping("trigger").unwrap().matched_nodes[0].id, "2");
    assert_eq!(mapping.mapping("content").unwrap().matched_nodes[0].id, "3");
    assert_eq!(mapping.mapping("content.item").unwrap().matched_nodes.len(), 2);
    assert!(mapping.overall_confidence > 0.8);
}

#[test]
fn test_bare_card_scenario() {
    let node = Node::frame("1", "Card");
    let analysis = engine().analyze(&node).unwrap();

    assert_eq!(analysis.classification.component, Some(ComponentType::Card));
    let mapping = analysis.mapping.unwrap();
    assert!(!mapping.warnings.is_empty());
    assert!(mapping.overall_confidence < 0.5);
}

#[test]
fn test_no_vocabulary_is_unclassified() {
    for name in ["Frame 42", "zzz", ""] {
        let node = Node::frame("1", name).with_children(vec![
            Node::frame("2", "Frame 43"),
            Node::text("3", "Text", "Lorem ipsum"),
        ]);
        let analysis = engine().analyze(&node).unwrap();
        assert!(!analysis.classification.is_classified(), "{name:?}");
        assert_eq!(analysis.classification.confidence, 0.0);
        assert!(analysis.mapping.is_none());
    }
}

#[test]
fn test_scores_are_bounded_for_odd_inputs() {
    let registry = ClassifierRegistry::new();
    let nodes = vec![
        Node::frame("1", "Tabs Tabs Tabs Menu Menu Select Dialog Card Button"),
        Node::shape("2", "Line").with_size(f64::MAX, 0.0),
        Node::frame("3", "Avatar").with_size(f64::NAN, f64::NAN).with_style(Style {
            corner_radius: Some(f64::INFINITY),
            fills: vec![Paint {
                kind: PaintKind::Image,
                color: None,
                opacity: None,
            }],
            layout: Some(LayoutMode::Horizontal),
            ..Style::default()
        }),
        Node::instance("4", "Button, State=Hover").with_size(-4.0, 32.0),
        dropdown(),
    ];
    for node in &nodes {
        for result in registry.score_all(node) {
            assert!(!result.confidence.is_nan());
            assert!((0.0..=1.0).contains(&result.confidence), "{:?}", result);
        }
    }
}

#[test]
fn test_resolution_is_deterministic_across_clones() {
    let engine = engine();
    let node = dropdown();
    let copy = node.clone();
    let a = engine.resolver().resolve(&node);
    let b = engine.resolver().resolve(&copy);
    assert_eq!(a, b);
}

#[test]
fn test_trigger_and_content_never_lowers_confidence() {
    for name in ["DropdownMenu", "Popover", "Context Menu", "Select", "Frame"] {
        let bare = Node::frame("1", name);
        let structured = bare
            .clone()
            .with_children(vec![Node::frame("2", "Trigger"), Node::frame("3", "Content")]);
        for component in ComponentType::ALL {
            assert!(
                score_of(&structured, component) >= score_of(&bare, component),
                "{name}: {component}"
            );
        }
    }
}

#[test]
fn test_select_default_outranks_dropdown() {
    let node = Node::frame("1", "Select Default")
        .with_children(vec![Node::frame("2", "Trigger"), Node::frame("3", "Content")]);
    let select = score_of(&node, ComponentType::Select);
    let dropdown = score_of(&node, ComponentType::DropdownMenu);
    assert!(dropdown > 0.0);
    assert!(select > dropdown);
    assert_eq!(
        engine().analyze(&node).unwrap().classification.component,
        Some(ComponentType::Select)
    );
}

#[test]
fn test_terms_inside_other_words_do_not_count() {
    for name in ["Project Alpha", "Beta Banner", "Data Bar"] {
        let node = Node::frame("1", name);
        assert_eq!(score_of(&node, ComponentType::Button), 0.0, "{name}");
        assert_eq!(score_of(&node, ComponentType::Tabs), 0.0, "{name}");
    }
    assert!(score_of(&Node::frame("1", "TabList"), ComponentType::Tabs) > 0.0);
}

#[test]
fn test_compound_names_resolve_to_the_named_control() {
    let engine = engine();
    for (name, expected) in [
        ("Discard Button", ComponentType::Button),
        ("Unselected Checkbox", ComponentType::Checkbox),
    ] {
        let node = Node::instance("1", name);
        let best = engine.resolver().resolve(&node).best;
        assert_eq!(best.component, Some(expected), "{name}: {best:?}");
    }
}

#[test]
fn test_single_radio_and_radio_group() {
    let engine = engine();
    let single = Node::instance("1", "Radio")
        .with_size(20.0, 20.0)
        .with_style(Style {
            corner_radius: Some(10.0),
            ..Style::default()
        })
        .with_child(Node::shape("2", "Dot"));
    assert_eq!(
        engine.resolver().resolve(&single).best.component,
        Some(ComponentType::Radio)
    );

    let group = Node::frame("1", "Radio Group").with_children(vec![
        Node::instance("2", "Radio").with_children(vec![
            Node::shape("3", "Indicator"),
            Node::text("4", "Label", "Monthly"),
        ]),
        Node::instance("5", "Radio").with_children(vec![
            Node::shape("6", "Indicator"),
            Node::text("7", "Label", "Yearly"),
        ]),
    ]);
    let analysis = engine.analyze(&group).unwrap();
    assert_eq!(analysis.classification.component, Some(ComponentType::RadioGroup));
    let mapping = analysis.mapping.unwrap();
    assert_eq!(mapping.mapping("item").unwrap().matched_nodes.len(), 2);
    assert_eq!(mapping.mapping("item.indicator").unwrap().matched_nodes.len(), 2);
}

#[test]
fn test_missing_required_slot_costs_confidence() {
    let schemas = SchemaRegistry::builtin();
    let mapper = SlotMapper::new(SlotMappingConfig::default());
    let complete = Node::frame("1", "Card")
        .with_children(vec![Node::frame("2", "Content"), Node::frame("3", "Footer")]);
    let missing = Node::frame("1", "Card").with_child(Node::frame("3", "Footer"));

    let with = mapper.map_slots(&complete, ComponentType::Card, &schemas).unwrap();
    let without = mapper.map_slots(&missing, ComponentType::Card, &schemas).unwrap();

    assert!(without.overall_confidence < with.overall_confidence);
    assert!(without
        .warnings
        .iter()
        .any(|w| w.contains("'content'")));
}

#[test]
fn test_mapping_twice_is_equal() {
    let schemas = SchemaRegistry::builtin();
    let mapper = SlotMapper::default();
    let node = Node::frame("1", "Card").with_children(vec![
        Node::frame("2", "Header").with_children(vec![
            Node::text("3", "Title", "Plan"),
            Node::text("4", "Description", "Billed monthly"),
        ]),
        Node::frame("5", "Content"),
    ]);
    let first = mapper.map_slots(&node, ComponentType::Card, &schemas).unwrap();
    let second = mapper.map_slots(&node, ComponentType::Card, &schemas).unwrap();
    assert_eq!(first, second);
    assert!(first.mapping("header.title").unwrap().is_matched());
}

#[test]
fn test_batch_over_json_tree() {
    let json = r#"{
        "id": "0:1",
        "name": "Settings Page",
        "type": "FRAME",
        "children": [
            {
                "id": "1:1",
                "name": "Dropdown Menu",
                "type": "COMPONENT",
                "children": [
                    { "id": "1:2", "name": "Trigger", "type": "INSTANCE" },
                    {
                        "id": "1:3",
                        "name": "Content",
                        "type": "FRAME",
                        "children": [
                            { "id": "1:4", "name": "Item", "type": "FRAME" },
                            { "id": "1:5", "name": "Item", "type": "FRAME" }
                        ]
                    }
                ]
            },
            { "id": "2:1", "name": "Divider", "type": "LINE", "size": { "width": 600, "height": 1 } }
        ]
    }"#;
    let root: Node = serde_json::from_str(json).unwrap();
    let engine = engine();
    let nodes = collect_candidates(&root);
    let report = engine.analyze_batch(&nodes, &CancellationFlag::new()).unwrap();

    assert_eq!(report.skipped, 0);
    let menu = report
        .analyses
        .iter()
        .find(|a| a.node_id == "1:1")
        .unwrap();
    assert_eq!(menu.classification.component, Some(ComponentType::DropdownMenu));

    let output = serde_json::to_value(&report).unwrap();
    assert!(output["analyses"].is_array());
    assert_eq!(output["skipped"], 0);
}
