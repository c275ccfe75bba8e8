//! Tests for node constructors, the serializer, and the JSON view.

use selkit_ast::{
    AttributeOperator, AttributeOptions, AttributeRaws, ContainerOptions, NamespaceOptions, Node,
    NodeError, NodeId, NodeOptions, NodeType, Raws, SelectorTree, Spaces,
};

fn attach(tree: &mut SelectorTree, nodes: Vec<Node>) -> NodeId {
    let ids = nodes
        .into_iter()
        .map(|node| tree.alloc(node).unwrap())
        .collect();
    let selector = tree
        .alloc(Node::selector(ContainerOptions::with_nodes(ids)))
        .unwrap();
    tree.append(NodeId::ROOT, selector).unwrap();
    selector
}

#[test]
fn test_simple_nodes_render() {
    let mut tree = SelectorTree::new();
    let _ = attach(
        &mut tree,
        vec![
            Node::tag(NamespaceOptions::with_value("div")),
            Node::id(NodeOptions::with_value("main")),
            Node::class_name(NamespaceOptions::with_value("btn")),
            Node::combinator(NodeOptions {
                value: ">".to_owned(),
                spaces: Spaces::new(" ", " "),
                ..NodeOptions::default()
            }),
            Node::universal(NamespaceOptions::default()),
        ],
    );
    let _ = attach(&mut tree, vec![Node::nesting(NodeOptions::default())]);

    assert_eq!(tree.to_string(), "div#main.btn > *,&");
}

#[test]
fn test_namespaces_render() {
    let mut tree = SelectorTree::new();
    let _ = attach(
        &mut tree,
        vec![
            Node::tag(NamespaceOptions {
                value: "a".to_owned(),
                namespace: Some("svg".to_owned()),
                ..NamespaceOptions::default()
            }),
            Node::universal(NamespaceOptions {
                namespace: Some(String::new()),
                ..NamespaceOptions::default()
            }),
        ],
    );

    assert_eq!(tree.to_string(), "svg|a|*");
}

#[test]
fn test_set_namespace() {
    let mut node = Node::class_name(NamespaceOptions::with_value("x"));
    node.set_namespace(Some("ns".to_owned())).unwrap();
    assert_eq!(node.namespace(), Some("ns"));
    assert_eq!(node.ns(), "ns|");

    let mut id = Node::id(NodeOptions::with_value("x"));
    assert_eq!(
        id.set_namespace(Some("ns".to_owned())),
        Err(NodeError::NamespaceUnsupported(NodeType::Id))
    );
}

#[test]
fn test_raw_value_wins_until_value_is_set() {
    let mut tree = SelectorTree::new();
    let class = Node::class_name(NamespaceOptions {
        value: "a:b".to_owned(),
        raws: Raws {
            value: Some(r"a\:b".to_owned()),
        },
        ..NamespaceOptions::default()
    });
    let selector = attach(&mut tree, vec![class]);
    assert_eq!(tree.to_string(), r".a\:b");

    let id = tree.first(selector).unwrap();
    tree[id].set_value("plain");
    assert_eq!(tree[id].raws.value, None);
    assert_eq!(tree.to_string(), ".plain");
}

#[test]
fn test_attribute_renders_raws() {
    let mut tree = SelectorTree::new();
    let attribute = Node::attribute(AttributeOptions {
        attribute: "data-x".to_owned(),
        operator: Some(AttributeOperator::Includes),
        value: Some("\"y\"".to_owned()),
        insensitive: true,
        raws: AttributeRaws {
            insensitive: Some("  I".to_owned()),
            before_attribute: " ".to_owned(),
            after_value: " ".to_owned(),
            ..AttributeRaws::default()
        },
        ..AttributeOptions::default()
    })
    .unwrap();
    let selector = attach(&mut tree, vec![attribute]);
    assert_eq!(tree.to_string(), "[ data-x~=\"y\"  I ]");

    let id = tree.first(selector).unwrap();
    assert_eq!(tree[id].quote_mark(), Some('"'));
    assert_eq!(tree[id].unquoted_value().as_deref(), Some("y"));
}

#[test]
fn test_renamed_attribute_drops_raw_spelling() {
    let mut tree = SelectorTree::new();
    let attribute = Node::attribute(AttributeOptions {
        attribute: "data".to_owned(),
        operator: Some(AttributeOperator::Equals),
        value: Some("x".to_owned()),
        raws: AttributeRaws {
            attribute: Some("d\\61ta".to_owned()),
            ..AttributeRaws::default()
        },
        ..AttributeOptions::default()
    })
    .unwrap();
    let selector = attach(&mut tree, vec![attribute]);
    assert_eq!(tree.to_string(), "[d\\61ta=x]");

    let id = tree.first(selector).unwrap();
    let data = tree[id].attribute_data_mut().unwrap();
    assert_eq!(data.set_attribute(""), Err(NodeError::EmptyAttributeName));
    assert_eq!(data.attribute(), "data");

    data.set_attribute("foo").unwrap();
    assert_eq!(data.raws.attribute, None);
    assert_eq!(tree.to_string(), "[foo=x]");
}

#[test]
fn test_attribute_constructor_validation() {
    assert_eq!(
        Node::attribute(AttributeOptions::default()),
        Err(NodeError::EmptyAttributeName)
    );
    assert_eq!(
        Node::attribute(AttributeOptions {
            attribute: "href".to_owned(),
            operator: Some(AttributeOperator::PrefixMatch),
            ..AttributeOptions::default()
        }),
        Err(NodeError::MissingAttributeValue(AttributeOperator::PrefixMatch))
    );

    let presence = Node::attribute(AttributeOptions {
        attribute: "href".to_owned(),
        ..AttributeOptions::default()
    })
    .unwrap();
    assert_eq!(presence.value(), None);
    assert_eq!(presence.unquoted_value(), None);
}

#[test]
fn test_pseudo_with_arguments_and_trailing_comma() {
    let mut tree = SelectorTree::new();
    let a = tree
        .alloc(Node::class_name(NamespaceOptions::with_value("a")))
        .unwrap();
    let b = tree
        .alloc(Node::class_name(NamespaceOptions::with_value("b")))
        .unwrap();
    let first = tree
        .alloc(Node::selector(ContainerOptions::with_nodes(vec![a])))
        .unwrap();
    let second = tree
        .alloc(Node::selector(ContainerOptions {
            spaces: Spaces::new(" ", ""),
            nodes: vec![b],
            ..ContainerOptions::default()
        }))
        .unwrap();
    let pseudo = Node::pseudo(ContainerOptions {
        value: Some(":is".to_owned()),
        nodes: vec![first, second],
        ..ContainerOptions::default()
    });
    let _ = attach(&mut tree, vec![pseudo]);
    tree[NodeId::ROOT].set_trailing_comma(true);

    assert_eq!(tree.to_string(), ":is(.a, .b),");
    assert!(tree[NodeId::ROOT].trailing_comma());
}

#[test]
fn test_pseudo_element_guards() {
    let element = |value: &str| {
        Node::pseudo(ContainerOptions {
            value: Some(value.to_owned()),
            ..ContainerOptions::default()
        })
    };

    assert!(element("::before").is_pseudo_element());
    assert!(element(":AFTER").is_pseudo_element());
    assert!(element(":first-line").is_pseudo_element());
    assert!(element(":hover").is_pseudo_class());
    assert!(!element(":hover").is_pseudo_element());
    assert!(!Node::tag(NamespaceOptions::with_value("a")).is_pseudo_class());
}

#[test]
fn test_node_type_names() {
    assert_eq!(NodeType::Class.to_string(), "class");
    assert_eq!("universal".parse::<NodeType>().unwrap(), NodeType::Universal);
    assert!(NodeType::Pseudo.is_container());
    assert!(NodeType::Attribute.is_namespace());
    assert!(!NodeType::Id.is_namespace());
    assert_eq!(AttributeOperator::DashMatch.to_string(), "|=");
}

#[test]
fn test_serialization_is_idempotent() {
    let mut tree = SelectorTree::new();
    let _ = attach(
        &mut tree,
        vec![
            Node::tag(NamespaceOptions::with_value("a")),
            Node::comment(NodeOptions::with_value("/* x */")),
        ],
    );
    let first = tree.to_string();
    assert_eq!(first, "a/* x */");
    assert_eq!(tree.to_string(), first);
    assert_eq!(tree.stringify(NodeId(999)), "");
}

#[test]
fn test_view_serializes_to_json() {
    let mut tree = SelectorTree::new();
    let _ = attach(&mut tree, vec![Node::id(NodeOptions::with_value("main"))]);

    let view = tree.view(NodeId::ROOT).unwrap();
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["type"], "root");
    assert_eq!(json["nodes"][0]["type"], "selector");
    assert_eq!(json["nodes"][0]["nodes"][0]["type"], "id");
    assert_eq!(json["nodes"][0]["nodes"][0]["value"], "main");
    assert!(json.get("trailing_comma").is_none());
}
