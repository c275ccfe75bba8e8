//! Node model: the twelve selector node variants.
//!
//! Every node shares one shape ([`Node`]): a variant tag with its
//! variant-specific data ([`NodeKind`]), a text value, surrounding whitespace,
//! an optional source span, and the raw spelling needed for lossless output.

use core::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::NodeId;
use crate::error::NodeError;
use crate::escape::unescape;

/// The node discriminant. Renders as the lowercase type name (`"tag"`,
/// `"class"`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors), e.g. `div`
    Tag,
    /// Quoted string or parenthesized text kept verbatim.
    String,
    /// One comma-separated alternative.
    Selector,
    /// The top-level selector list.
    Root,
    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes) and pseudo-elements
    Pseudo,
    /// The `&` nesting selector.
    Nesting,
    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors), e.g. `#main`
    Id,
    /// A `/* ... */` comment.
    Comment,
    /// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
    Combinator,
    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html), e.g. `.btn`
    Class,
    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    Attribute,
    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector), `*`
    Universal,
}

impl NodeType {
    /// `root`, `selector`, and `pseudo` own an ordered child list.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Root | Self::Selector | Self::Pseudo)
    }

    /// `tag`, `class`, and `attribute` may carry a `prefix|` qualifier.
    #[must_use]
    pub const fn is_namespace(self) -> bool {
        matches!(self, Self::Tag | Self::Class | Self::Attribute)
    }
}

/// A line/column pair, both 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct Position {
    /// 1-indexed line.
    pub line: usize,
    /// 1-indexed column, counted in characters.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The span of input a node was parsed from. `end` is the node's last
/// character (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Source {
    /// First character of the node.
    pub start: Position,
    /// Last character of the node.
    pub end: Position,
}

/// Whitespace around a node, reproduced verbatim by the serializer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Spaces {
    /// Whitespace emitted before the node.
    pub before: String,
    /// Whitespace emitted after the node.
    pub after: String,
}

impl Spaces {
    /// Create spaces from a before/after pair.
    #[must_use]
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }

    /// True when both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

/// Original spellings kept for lossless output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Raws {
    /// The escaped spelling of the value, when it differs from the decoded text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// The matching operator between an attribute name and its value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize,
)]
pub enum AttributeOperator {
    /// `[attr=value]`: exact match.
    #[strum(serialize = "=")]
    #[serde(rename = "=")]
    Equals,
    /// `[attr~=value]`: whitespace-separated word match.
    #[strum(serialize = "~=")]
    #[serde(rename = "~=")]
    Includes,
    /// `[attr|=value]`: exact or `value-` prefix.
    #[strum(serialize = "|=")]
    #[serde(rename = "|=")]
    DashMatch,
    /// `[attr^=value]`: prefix.
    #[strum(serialize = "^=")]
    #[serde(rename = "^=")]
    PrefixMatch,
    /// `[attr$=value]`: suffix.
    #[strum(serialize = "$=")]
    #[serde(rename = "$=")]
    SuffixMatch,
    /// `[attr*=value]`: substring.
    #[strum(serialize = "*=")]
    #[serde(rename = "*=")]
    SubstringMatch,
}

impl AttributeOperator {
    /// The operator's source text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Raw text inside an attribute selector's brackets.
///
/// Layout: `[` `before_attribute` ns name `after_attribute` operator
/// `after_operator` value flag `after_value` `]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AttributeRaws {
    /// Escaped spelling of the attribute name, when it differs from the decoded name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Original flag text, including the whitespace before it (e.g. `" i"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insensitive: Option<String>,
    /// Whitespace after `[`.
    pub before_attribute: String,
    /// Whitespace between the name and the operator.
    pub after_attribute: String,
    /// Whitespace between the operator and the value.
    pub after_operator: String,
    /// Whitespace before `]`.
    pub after_value: String,
}

/// Attribute-specific fields. The attribute's value lives in [`Node::value`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AttributeData {
    attribute: String,
    /// Matching operator, absent for presence-only selectors.
    pub operator: Option<AttributeOperator>,
    /// Set by a trailing `i` flag.
    pub insensitive: bool,
    /// Namespace prefix without the `|`.
    pub namespace: Option<String>,
    /// Original spellings.
    pub raws: AttributeRaws,
}

impl AttributeData {
    /// Decoded attribute name.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Rename the attribute and drop its raw spelling.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::EmptyAttributeName`] when `name` is empty.
    pub fn set_attribute(&mut self, name: impl Into<String>) -> Result<(), NodeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(NodeError::EmptyAttributeName);
        }
        self.attribute = name;
        self.raws.attribute = None;
        Ok(())
    }
}

/// The variant tag together with the data only that variant carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Top-level selector list.
    Root {
        /// The input ended with a bare `,`.
        trailing_comma: bool,
    },
    /// One comma-separated alternative.
    Selector,
    /// Pseudo-class or pseudo-element; children are its argument selectors.
    Pseudo,
    /// Type selector.
    Tag {
        /// Namespace prefix without the `|`.
        namespace: Option<String>,
    },
    /// Class selector.
    Class {
        /// Namespace prefix without the `|`.
        namespace: Option<String>,
    },
    /// Universal selector.
    Universal {
        /// Namespace prefix without the `|`.
        namespace: Option<String>,
    },
    /// Attribute selector.
    Attribute(Box<AttributeData>),
    /// ID selector.
    Id,
    /// Combinator.
    Combinator,
    /// Comment.
    Comment,
    /// Nesting selector.
    Nesting,
    /// Verbatim string.
    String,
}

impl NodeKind {
    /// The discriminant for this kind.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        match self {
            Self::Root { .. } => NodeType::Root,
            Self::Selector => NodeType::Selector,
            Self::Pseudo => NodeType::Pseudo,
            Self::Tag { .. } => NodeType::Tag,
            Self::Class { .. } => NodeType::Class,
            Self::Universal { .. } => NodeType::Universal,
            Self::Attribute(_) => NodeType::Attribute,
            Self::Id => NodeType::Id,
            Self::Combinator => NodeType::Combinator,
            Self::Comment => NodeType::Comment,
            Self::Nesting => NodeType::Nesting,
            Self::String => NodeType::String,
        }
    }
}

/// Options shared by the leaf constructors.
#[derive(Debug, Clone, Default)]
pub struct NodeOptions {
    /// The node's value.
    pub value: String,
    /// Surrounding whitespace.
    pub spaces: Spaces,
    /// Source span.
    pub source: Option<Source>,
    /// Original spellings.
    pub raws: Raws,
}

impl NodeOptions {
    /// Options with only a value set.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

/// Options for `root`, `selector`, and `pseudo`.
#[derive(Debug, Clone, Default)]
pub struct ContainerOptions {
    /// The container's value (the pseudo name for `pseudo`; ignored by `root`).
    pub value: Option<String>,
    /// Surrounding whitespace.
    pub spaces: Spaces,
    /// Source span.
    pub source: Option<Source>,
    /// Initial children, re-parented when the node is allocated.
    pub nodes: Vec<NodeId>,
}

impl ContainerOptions {
    /// Options with only initial children set.
    #[must_use]
    pub fn with_nodes(nodes: Vec<NodeId>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }
}

/// Options for the namespace-bearing constructors.
#[derive(Debug, Clone, Default)]
pub struct NamespaceOptions {
    /// The node's value.
    pub value: String,
    /// Namespace prefix without the `|`; `Some("")` is the explicit empty namespace.
    pub namespace: Option<String>,
    /// Surrounding whitespace.
    pub spaces: Spaces,
    /// Source span.
    pub source: Option<Source>,
    /// Original spellings.
    pub raws: Raws,
}

impl NamespaceOptions {
    /// Options with only a value set.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

/// Options for [`Node::attribute`].
#[derive(Debug, Clone, Default)]
pub struct AttributeOptions {
    /// Decoded attribute name (required).
    pub attribute: String,
    /// Matching operator.
    pub operator: Option<AttributeOperator>,
    /// Raw value text, quotes included (required when `operator` is set).
    pub value: Option<String>,
    /// Case-insensitivity flag.
    pub insensitive: bool,
    /// Namespace prefix without the `|`.
    pub namespace: Option<String>,
    /// Surrounding whitespace.
    pub spaces: Spaces,
    /// Source span.
    pub source: Option<Source>,
    /// Original spellings inside the brackets.
    pub raws: AttributeRaws,
}

/// A selector node.
///
/// Fields that must stay consistent with the tree (`parent`, children) are
/// only changed through [`SelectorTree`](crate::SelectorTree) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    value: Option<String>,
    /// Surrounding whitespace.
    pub spaces: Spaces,
    /// Source span, set by the parser.
    pub source: Option<Source>,
    /// Original spellings.
    pub raws: Raws,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    fn leaf(kind: NodeKind, options: NodeOptions) -> Self {
        Self {
            kind,
            value: Some(options.value),
            spaces: options.spaces,
            source: options.source,
            raws: options.raws,
            parent: None,
            children: Vec::new(),
        }
    }

    fn namespaced(options: NamespaceOptions, make: fn(Option<String>) -> NodeKind) -> Self {
        Self {
            kind: make(options.namespace),
            value: Some(options.value),
            spaces: options.spaces,
            source: options.source,
            raws: options.raws,
            parent: None,
            children: Vec::new(),
        }
    }

    fn container(kind: NodeKind, options: ContainerOptions) -> Self {
        Self {
            kind,
            value: options.value,
            spaces: options.spaces,
            source: options.source,
            raws: Raws::default(),
            parent: None,
            children: options.nodes,
        }
    }

    /// A `root` node. Its value is always absent.
    #[must_use]
    pub fn root(options: ContainerOptions) -> Self {
        let mut node = Self::container(
            NodeKind::Root {
                trailing_comma: false,
            },
            options,
        );
        node.value = None;
        node
    }

    /// A `selector` node.
    #[must_use]
    pub fn selector(options: ContainerOptions) -> Self {
        Self::container(NodeKind::Selector, options)
    }

    /// A `pseudo` node. The value includes its colons (`:hover`, `::before`).
    #[must_use]
    pub fn pseudo(mut options: ContainerOptions) -> Self {
        if options.value.is_none() {
            options.value = Some(String::new());
        }
        Self::container(NodeKind::Pseudo, options)
    }

    /// A `combinator` node (`>`, `+`, `~`, or whitespace).
    #[must_use]
    pub fn combinator(options: NodeOptions) -> Self {
        Self::leaf(NodeKind::Combinator, options)
    }

    /// A `class` node. The value excludes the leading `.`.
    #[must_use]
    pub fn class_name(options: NamespaceOptions) -> Self {
        Self::namespaced(options, |namespace| NodeKind::Class { namespace })
    }

    /// A `tag` node.
    #[must_use]
    pub fn tag(options: NamespaceOptions) -> Self {
        Self::namespaced(options, |namespace| NodeKind::Tag { namespace })
    }

    /// A `universal` node; an empty value defaults to `*`.
    #[must_use]
    pub fn universal(mut options: NamespaceOptions) -> Self {
        if options.value.is_empty() {
            options.value.push('*');
        }
        Self::namespaced(options, |namespace| NodeKind::Universal { namespace })
    }

    /// An `id` node. The value excludes the leading `#`.
    #[must_use]
    pub fn id(options: NodeOptions) -> Self {
        Self::leaf(NodeKind::Id, options)
    }

    /// A `comment` node. The value includes the `/*` `*/` delimiters.
    #[must_use]
    pub fn comment(options: NodeOptions) -> Self {
        Self::leaf(NodeKind::Comment, options)
    }

    /// A `nesting` node; an empty value defaults to `&`.
    #[must_use]
    pub fn nesting(mut options: NodeOptions) -> Self {
        if options.value.is_empty() {
            options.value.push('&');
        }
        Self::leaf(NodeKind::Nesting, options)
    }

    /// A `string` node, kept verbatim.
    #[must_use]
    pub fn string(options: NodeOptions) -> Self {
        Self::leaf(NodeKind::String, options)
    }

    /// An `attribute` node.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::EmptyAttributeName`] when `attribute` is empty and
    /// [`NodeError::MissingAttributeValue`] when an operator has no value.
    pub fn attribute(options: AttributeOptions) -> Result<Self, NodeError> {
        if options.attribute.is_empty() {
            return Err(NodeError::EmptyAttributeName);
        }
        if let Some(operator) = options.operator
            && options.value.is_none()
        {
            return Err(NodeError::MissingAttributeValue(operator));
        }
        let data = AttributeData {
            attribute: options.attribute,
            operator: options.operator,
            insensitive: options.insensitive,
            namespace: options.namespace,
            raws: options.raws,
        };
        Ok(Self {
            kind: NodeKind::Attribute(Box::new(data)),
            value: options.value,
            spaces: options.spaces,
            source: options.source,
            raws: Raws::default(),
            parent: None,
            children: Vec::new(),
        })
    }

    /// The node's discriminant.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// The variant and its data.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The decoded value (absent for `root` and valueless attributes).
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Replace the value. Clears `raws.value` so the new text is emitted as-is.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
        self.raws.value = None;
    }

    /// Append text to the value and, when present, to its raw spelling.
    pub fn append_to_value(&mut self, text: &str) {
        self.value.get_or_insert_with(String::new).push_str(text);
        if let Some(raw) = self.raws.value.as_mut() {
            raw.push_str(text);
        }
    }

    /// The text the serializer emits for the value: the raw spelling if any.
    #[must_use]
    pub fn raw_value(&self) -> Option<&str> {
        self.raws.value.as_deref().or(self.value.as_deref())
    }

    /// The containing node, if attached.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children (empty for non-containers).
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Namespace prefix without the `|`.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Tag { namespace }
            | NodeKind::Class { namespace }
            | NodeKind::Universal { namespace } => namespace.as_deref(),
            NodeKind::Attribute(data) => data.namespace.as_deref(),
            _ => None,
        }
    }

    /// Namespace prefix including the `|`, or an empty string.
    #[must_use]
    pub fn ns(&self) -> String {
        self.namespace()
            .map_or_else(String::new, |prefix| format!("{prefix}|"))
    }

    /// Set or clear the namespace prefix (without the `|`).
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::NamespaceUnsupported`] for variants without a namespace.
    pub fn set_namespace(&mut self, prefix: Option<String>) -> Result<(), NodeError> {
        match &mut self.kind {
            NodeKind::Tag { namespace }
            | NodeKind::Class { namespace }
            | NodeKind::Universal { namespace } => *namespace = prefix,
            NodeKind::Attribute(data) => data.namespace = prefix,
            other => return Err(NodeError::NamespaceUnsupported(other.node_type())),
        }
        Ok(())
    }

    /// Attribute fields, for `attribute` nodes.
    #[must_use]
    pub fn attribute_data(&self) -> Option<&AttributeData> {
        match &self.kind {
            NodeKind::Attribute(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable attribute fields, for `attribute` nodes.
    pub fn attribute_data_mut(&mut self) -> Option<&mut AttributeData> {
        match &mut self.kind {
            NodeKind::Attribute(data) => Some(data),
            _ => None,
        }
    }

    /// The quote character around an attribute value, if quoted.
    #[must_use]
    pub fn quote_mark(&self) -> Option<char> {
        if !self.is_attribute() {
            return None;
        }
        self.value()
            .and_then(|value| value.chars().next())
            .filter(|c| matches!(c, '"' | '\''))
    }

    /// The attribute value with quotes stripped and escapes decoded.
    #[must_use]
    pub fn unquoted_value(&self) -> Option<String> {
        let value = self.attribute_data().and(self.value())?;
        let inner = match self.quote_mark() {
            Some(quote) => {
                let body = &value[quote.len_utf8()..];
                body.strip_suffix(quote).unwrap_or(body)
            }
            None => value,
        };
        Some(unescape(inner))
    }

    /// Whether a root node ends with a bare `,`.
    #[must_use]
    pub const fn trailing_comma(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Root {
                trailing_comma: true
            }
        )
    }

    /// Set the trailing comma flag; ignored for non-root nodes.
    pub const fn set_trailing_comma(&mut self, flag: bool) {
        if let NodeKind::Root { trailing_comma } = &mut self.kind {
            *trailing_comma = flag;
        }
    }

    /// `root`, `selector`, or `pseudo`.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        self.node_type().is_container()
    }

    /// `tag`, `class`, or `attribute`.
    #[must_use]
    pub const fn is_namespace(&self) -> bool {
        self.node_type().is_namespace()
    }

    /// Is this a `root` node?
    #[must_use]
    pub const fn is_root(&self) -> bool {
        matches!(self.node_type(), NodeType::Root)
    }

    /// Is this a `selector` node?
    #[must_use]
    pub const fn is_selector(&self) -> bool {
        matches!(self.node_type(), NodeType::Selector)
    }

    /// Is this a `combinator` node?
    #[must_use]
    pub const fn is_combinator(&self) -> bool {
        matches!(self.node_type(), NodeType::Combinator)
    }

    /// Is this a `class` node?
    #[must_use]
    pub const fn is_class_name(&self) -> bool {
        matches!(self.node_type(), NodeType::Class)
    }

    /// Is this an `attribute` node?
    #[must_use]
    pub const fn is_attribute(&self) -> bool {
        matches!(self.node_type(), NodeType::Attribute)
    }

    /// Is this a `pseudo` node?
    #[must_use]
    pub const fn is_pseudo(&self) -> bool {
        matches!(self.node_type(), NodeType::Pseudo)
    }

    /// [§ 3.6.1 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
    ///
    /// A pseudo node written with `::`, or one of the CSS2 pseudo-elements
    /// that also accept a single colon.
    #[must_use]
    pub fn is_pseudo_element(&self) -> bool {
        const LEGACY: [&str; 4] = [":before", ":after", ":first-letter", ":first-line"];
        if !self.is_pseudo() {
            return false;
        }
        let value = self.value().unwrap_or_default();
        value.starts_with("::")
            || LEGACY
                .iter()
                .any(|legacy| value.eq_ignore_ascii_case(legacy))
    }

    /// A pseudo node that is not a pseudo-element.
    #[must_use]
    pub fn is_pseudo_class(&self) -> bool {
        self.is_pseudo() && !self.is_pseudo_element()
    }

    /// Is this a `tag` node?
    #[must_use]
    pub const fn is_tag(&self) -> bool {
        matches!(self.node_type(), NodeType::Tag)
    }

    /// Is this a `comment` node?
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self.node_type(), NodeType::Comment)
    }

    /// Is this an `id` node?
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self.node_type(), NodeType::Id)
    }

    /// Is this a `nesting` node?
    #[must_use]
    pub const fn is_nesting(&self) -> bool {
        matches!(self.node_type(), NodeType::Nesting)
    }

    /// Is this a `string` node?
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self.node_type(), NodeType::String)
    }

    /// Is this a `universal` node?
    #[must_use]
    pub const fn is_universal(&self) -> bool {
        matches!(self.node_type(), NodeType::Universal)
    }
}
