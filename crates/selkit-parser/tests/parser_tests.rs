//! Integration tests for the selector parser.

use std::cell::RefCell;
use std::rc::Rc;

use selkit_ast::{AttributeOperator, NodeId, NodeType, Position, SelectorTree, Source};
use selkit_common::warning::has_warned;
use selkit_parser::{Options, ParseError, Parser, ParserState};

/// Parse losslessly and return the tree, panicking on error.
fn parse(input: &str) -> SelectorTree {
    let mut parser = Parser::new(input, Options::default());
    let _ = parser
        .parse()
        .unwrap_or_else(|e| panic!("failed to parse {input:?}: {e}"));
    parser.into_tree()
}

fn parse_err(input: &str) -> ParseError {
    let mut parser = Parser::new(input, Options::default());
    parser.set_error_handler(|_| {});
    parser.parse().expect_err("input should not parse")
}

fn lossy(input: &str) -> String {
    let mut parser = Parser::new(input, Options::lossy());
    let _ = parser.parse().expect("input should parse");
    parser.tree().to_string()
}

/// Node types of a container's children.
fn types(tree: &SelectorTree, id: NodeId) -> Vec<NodeType> {
    tree.map(id, |_, node| node.node_type())
}

/// The `n`th top-level selector.
fn selector(tree: &SelectorTree, n: usize) -> NodeId {
    tree.at(NodeId::ROOT, n).expect("selector should exist")
}

#[test]
fn test_selector_list() {
    let tree = parse("a, b , c");
    assert_eq!(tree.length(NodeId::ROOT), 3);
    let values: Vec<_> = (0..3)
        .map(|n| {
            let tag = tree.first(selector(&tree, n)).unwrap();
            tree[tag].value().unwrap().to_owned()
        })
        .collect();
    assert_eq!(values, ["a", "b", "c"]);

    let b = tree.first(selector(&tree, 1)).unwrap();
    assert_eq!(tree[b].spaces.before, " ");
    assert_eq!(tree[b].spaces.after, " ");
    assert_eq!(tree.to_string(), "a, b , c");
}

#[test]
fn test_compound_selector() {
    let tree = parse("div#main.btn.primary");
    let sel = selector(&tree, 0);
    assert_eq!(
        types(&tree, sel),
        vec![NodeType::Tag, NodeType::Id, NodeType::Class, NodeType::Class]
    );
    let id = tree.at(sel, 1).unwrap();
    assert_eq!(tree[id].value(), Some("main"));
}

#[test]
fn test_descendant_combinator() {
    let tree = parse("a  b");
    let sel = selector(&tree, 0);
    assert_eq!(
        types(&tree, sel),
        vec![NodeType::Tag, NodeType::Combinator, NodeType::Tag]
    );
    let combinator = tree.at(sel, 1).unwrap();
    assert_eq!(tree[combinator].value(), Some("  "));
    assert!(tree[combinator].spaces.is_empty());
}

#[test]
fn test_explicit_combinator_keeps_spaces() {
    let tree = parse("a  >\tb");
    let combinator = tree.at(selector(&tree, 0), 1).unwrap();
    assert_eq!(tree[combinator].value(), Some(">"));
    assert_eq!(tree[combinator].spaces.before, "  ");
    assert_eq!(tree[combinator].spaces.after, "\t");
    assert_eq!(tree.length(selector(&tree, 0)), 3);
}

#[test]
fn test_combinator_kinds() {
    for (input, value) in [("a>b", ">"), ("a+b", "+"), ("a~b", "~"), ("a>>>b", ">>>")] {
        let tree = parse(input);
        let combinator = tree.at(selector(&tree, 0), 1).unwrap();
        assert_eq!(tree[combinator].value(), Some(value), "parsing {input}");
    }
}

#[test]
fn test_nested_pseudo() {
    let tree = parse(":not(.a > .b)");
    let pseudo = tree.first(selector(&tree, 0)).unwrap();
    assert!(tree[pseudo].is_pseudo());
    assert_eq!(tree[pseudo].value(), Some(":not"));
    assert_eq!(tree.length(pseudo), 1);

    let inner = tree.first(pseudo).unwrap();
    assert!(tree[inner].is_selector());
    assert_eq!(
        types(&tree, inner),
        vec![NodeType::Class, NodeType::Combinator, NodeType::Class]
    );
}

#[test]
fn test_pseudo_argument_list() {
    let tree = parse(":is(h1, h2 ,h3)");
    let pseudo = tree.first(selector(&tree, 0)).unwrap();
    assert_eq!(tree.length(pseudo), 3);
    assert_eq!(tree.to_string(), ":is(h1, h2 ,h3)");
}

#[test]
fn test_pseudo_without_arguments_has_no_children() {
    let tree = parse("a:hover");
    let pseudo = tree.last(selector(&tree, 0)).unwrap();
    assert_eq!(tree[pseudo].value(), Some(":hover"));
    assert_eq!(tree.length(pseudo), 0);
}

#[test]
fn test_empty_pseudo_arguments() {
    let tree = parse(":foo()");
    let pseudo = tree.first(selector(&tree, 0)).unwrap();
    assert_eq!(tree.length(pseudo), 1);
    assert_eq!(tree.length(tree.first(pseudo).unwrap()), 0);
    assert_eq!(tree.to_string(), ":foo()");
}

#[test]
fn test_nth_child_formula() {
    let tree = parse(":nth-child(2n + 1)");
    let pseudo = tree.first(selector(&tree, 0)).unwrap();
    let inner = tree.first(pseudo).unwrap();
    assert_eq!(
        types(&tree, inner),
        vec![NodeType::Tag, NodeType::Combinator, NodeType::Tag]
    );
    assert_eq!(tree.to_string(), ":nth-child(2n + 1)");
}

#[test]
fn test_pseudo_elements() {
    let tree = parse("a::before:after:hover");
    let sel = selector(&tree, 0);
    let flags: Vec<_> = tree
        .filter(sel, |_, node| node.is_pseudo())
        .into_iter()
        .map(|id| tree[id].is_pseudo_element())
        .collect();
    assert_eq!(flags, [true, true, false]);
}

#[test]
fn test_attribute_full() {
    let tree = parse("[data-x~=\"y\" i]");
    let attr = tree.first(selector(&tree, 0)).unwrap();
    let node = &tree[attr];
    let data = node.attribute_data().unwrap();
    assert_eq!(data.attribute(), "data-x");
    assert_eq!(data.operator, Some(AttributeOperator::Includes));
    assert!(data.insensitive);
    assert_eq!(data.raws.insensitive.as_deref(), Some(" i"));
    assert_eq!(node.value(), Some("\"y\""));
    assert_eq!(node.quote_mark(), Some('"'));
    assert_eq!(node.unquoted_value().as_deref(), Some("y"));
}

#[test]
fn test_attribute_presence() {
    let tree = parse("[href]");
    let attr = tree.first(selector(&tree, 0)).unwrap();
    let data = tree[attr].attribute_data().unwrap();
    assert_eq!(data.attribute(), "href");
    assert_eq!(data.operator, None);
    assert_eq!(tree[attr].value(), None);
}

#[test]
fn test_attribute_whitespace_raws() {
    let input = "[ lang |= en  I ]";
    let tree = parse(input);
    let attr = tree.first(selector(&tree, 0)).unwrap();
    let data = tree[attr].attribute_data().unwrap();
    assert_eq!(data.operator, Some(AttributeOperator::DashMatch));
    assert_eq!(data.raws.before_attribute, " ");
    assert_eq!(data.raws.after_attribute, " ");
    assert_eq!(data.raws.after_operator, " ");
    assert_eq!(data.raws.insensitive.as_deref(), Some("  I"));
    assert_eq!(data.raws.after_value, " ");
    assert_eq!(tree[attr].value(), Some("en"));
    assert_eq!(tree.to_string(), input);
}

#[test]
fn test_attribute_namespaces() {
    for (input, namespace) in [("[ns|a]", "ns"), ("[*|a]", "*"), ("[|a]", "")] {
        let tree = parse(input);
        let attr = tree.first(selector(&tree, 0)).unwrap();
        let data = tree[attr].attribute_data().unwrap();
        assert_eq!(data.namespace.as_deref(), Some(namespace), "parsing {input}");
        assert_eq!(data.attribute(), "a");
        assert_eq!(tree.to_string(), input);
    }
}

#[test]
fn test_escaped_class() {
    let tree = parse(".a\\:b");
    let class = tree.first(selector(&tree, 0)).unwrap();
    assert_eq!(tree[class].value(), Some("a:b"));
    assert_eq!(tree[class].raw_value(), Some("a\\:b"));
    assert_eq!(tree.to_string(), ".a\\:b");
}

#[test]
fn test_type_namespaces() {
    let cases = [
        ("ns|a", NodeType::Tag, Some("ns")),
        ("*|a", NodeType::Tag, Some("*")),
        ("|a", NodeType::Tag, Some("")),
        ("ns|*", NodeType::Universal, Some("ns")),
        ("*", NodeType::Universal, None),
        ("a", NodeType::Tag, None),
    ];
    for (input, node_type, namespace) in cases {
        let tree = parse(input);
        let node = tree.first(selector(&tree, 0)).unwrap();
        assert_eq!(tree[node].node_type(), node_type, "parsing {input}");
        assert_eq!(tree[node].namespace(), namespace, "parsing {input}");
        assert_eq!(tree.to_string(), input);
    }
}

#[test]
fn test_nesting_selector() {
    let tree = parse("& > .child");
    let sel = selector(&tree, 0);
    let nesting = tree.first(sel).unwrap();
    assert!(tree[nesting].is_nesting());
    assert_eq!(tree[nesting].value(), Some("&"));
}

#[test]
fn test_comments() {
    let tree = parse("a /* c */ b");
    let sel = selector(&tree, 0);
    assert_eq!(
        types(&tree, sel),
        vec![
            NodeType::Tag,
            NodeType::Combinator,
            NodeType::Comment,
            NodeType::Combinator,
            NodeType::Tag
        ]
    );
    assert_eq!(tree.to_string(), "a /* c */ b");
}

#[test]
fn test_paren_text_after_tag() {
    let tree = parse("a(b)");
    let sel = selector(&tree, 0);
    assert_eq!(tree.length(sel), 1);
    let tag = tree.first(sel).unwrap();
    assert_eq!(tree[tag].value(), Some("a(b)"));
}

#[test]
fn test_paren_text_becomes_string() {
    let tree = parse("(x)");
    let node = tree.first(selector(&tree, 0)).unwrap();
    assert!(tree[node].is_string());
    assert_eq!(tree[node].value(), Some("(x)"));
}

#[test]
fn test_trailing_comma() {
    let tree = parse("a,");
    assert!(tree[NodeId::ROOT].trailing_comma());
    assert_eq!(tree.length(NodeId::ROOT), 1);
    assert_eq!(tree.to_string(), "a,");

    let tree = parse("a, b");
    assert!(!tree[NodeId::ROOT].trailing_comma());
}

#[test]
fn test_empty_input() {
    let tree = parse("");
    assert_eq!(tree.length(NodeId::ROOT), 1);
    assert_eq!(tree.length(selector(&tree, 0)), 0);
    assert_eq!(tree[NodeId::ROOT].source, None);
    assert_eq!(tree.to_string(), "");
}

#[test]
fn test_whitespace_only_input() {
    let tree = parse("   ");
    assert_eq!(tree[selector(&tree, 0)].spaces.before, "   ");
    assert_eq!(tree.to_string(), "   ");
}

#[test]
fn test_source_positions() {
    let tree = parse("a,\n  .bc");
    let class = tree.first(selector(&tree, 1)).unwrap();
    assert_eq!(
        tree[class].source,
        Some(Source {
            start: Position::new(2, 3),
            end: Position::new(2, 5),
        })
    );
    assert_eq!(
        tree[NodeId::ROOT].source,
        Some(Source {
            start: Position::new(1, 1),
            end: Position::new(2, 5),
        })
    );
}

#[test]
fn test_pseudo_source_covers_arguments() {
    let tree = parse(":not(a)");
    let pseudo = tree.first(selector(&tree, 0)).unwrap();
    assert_eq!(
        tree[pseudo].source,
        Some(Source {
            start: Position::new(1, 1),
            end: Position::new(1, 7),
        })
    );
}

#[test]
fn test_lossy_output() {
    assert_eq!(lossy("  a  >  b  ,  c  "), "a>b,c");
    assert_eq!(lossy("a   b"), "a b");
    assert_eq!(lossy("[ a = \"b\"  I ]"), "[a=\"b\" i]");
    assert_eq!(lossy(":not( .a , .b )"), ":not(.a,.b)");
}

#[test]
fn test_lossy_escapes() {
    // Escapes that are not needed are decoded.
    assert_eq!(lossy(".\\61 b"), ".ab");
    // Escapes that are needed stay as written.
    assert_eq!(lossy(".a\\:b"), ".a\\:b");
    assert_eq!(lossy("#\\31 23"), "#\\31 23");
}

#[test]
fn test_unterminated_bracket() {
    assert_eq!(
        parse_err("a[b"),
        ParseError::UnterminatedBracket {
            position: Position::new(1, 2)
        }
    );
    assert!(matches!(
        parse_err("[b="),
        ParseError::UnterminatedBracket { .. }
    ));
}

#[test]
fn test_unterminated_paren() {
    assert_eq!(
        parse_err(":not(a"),
        ParseError::UnterminatedParen {
            position: Position::new(1, 5)
        }
    );
    assert!(matches!(
        parse_err("a(b"),
        ParseError::UnterminatedParen { .. }
    ));
}

#[test]
fn test_stray_close_paren() {
    let error = parse_err("a)");
    let ParseError::UnexpectedToken {
        found, position, ..
    } = error
    else {
        panic!("expected an unexpected-token error, got {error:?}");
    };
    assert_eq!(found, "`)`");
    assert_eq!(position, Position::new(1, 2));
}

#[test]
fn test_semicolon_rejected() {
    assert!(matches!(
        parse_err("a;"),
        ParseError::UnexpectedToken { .. }
    ));
}

#[test]
fn test_dangling_dot() {
    let error = parse_err(".");
    assert_eq!(error.position(), Some(Position::new(1, 2)));
    let ParseError::UnexpectedToken { found, .. } = error else {
        panic!("expected an unexpected-token error");
    };
    assert_eq!(found, "end of input");
}

#[test]
fn test_operator_outside_brackets() {
    assert!(matches!(
        parse_err("a=b"),
        ParseError::UnexpectedToken {
            state: ParserState::InSimpleSelector,
            ..
        }
    ));
}

#[test]
fn test_lexical_errors_surface() {
    assert!(matches!(
        parse_err("[a=\"b]"),
        ParseError::UnterminatedString { .. }
    ));
    assert!(matches!(
        parse_err("a /* b"),
        ParseError::UnterminatedComment { .. }
    ));
}

#[test]
fn test_error_message_names_position() {
    let message = parse_err("a)").to_string();
    assert!(message.contains("1:2"), "message was {message:?}");
    assert!(message.contains("in simple selector"), "message was {message:?}");
}

#[test]
fn test_error_handler_called_once() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);

    let mut parser = Parser::new("a[b", Options::default());
    parser.set_error_handler(move |error| sink.borrow_mut().push(error.clone()));
    assert!(parser.parse().is_err());
    assert!(parser.parse().is_err());

    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(parser.state(), ParserState::Error);
}

#[test]
fn test_default_handler_warns() {
    let mut parser = Parser::new("a:not(b", Options::default());
    let error = parser.parse().unwrap_err();
    assert!(has_warned("Parser", &error.to_string()));
}

#[test]
fn test_partial_tree_after_error() {
    let mut parser = Parser::new("a, b)", Options::default());
    parser.set_error_handler(|_| {});
    assert!(parser.parse().is_err());
    assert_eq!(parser.tree().length(NodeId::ROOT), 2);
}

#[test]
fn test_parse_is_cached() {
    let mut parser = Parser::new("a", Options::default());
    assert_eq!(parser.parse(), Ok(NodeId::ROOT));
    assert_eq!(parser.state(), ParserState::Done);
    let len = parser.tree().len();
    assert_eq!(parser.parse(), Ok(NodeId::ROOT));
    assert_eq!(parser.tree().len(), len);
}

#[test]
fn test_token_stream_is_independent() {
    let mut parser = Parser::new("a b", Options::default());
    let mut tokens = parser.token_stream();
    tokens.run().unwrap();
    assert_eq!(tokens.tokens().len(), 3);
    assert!(parser.parse().is_ok());
    assert_eq!(parser.input(), "a b");
}
