//! stylesheet document tree
//!
//! A [Stylesheet] is a list of [Node]s. There are three kinds:
//! - [Declaration]: a `prop: value` pair
//! - [Rule]: a selector and a list of child nodes
//! - [Block]: an at-rule with a name, optional params and a list of child nodes
//!
//! Any node may carry the [Position] it was found at (`position: { line, column }`) so errors can
//! point to it.
//!
//! Trees are loaded from (and written as) yaml or json, where every node is a map tagged by `type`:
//! ```yaml
//! nodes:
//!   - type: declaration
//!     prop: $gutter
//!     value: 10px
//!   - type: rule
//!     selector: .button
//!     nodes:
//!       - type: declaration
//!         prop: margin
//!         value: $gutter
//! ```
use crate::error::LoadError;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, derive_new::new, serde::Serialize, serde::Deserialize)]
pub struct Stylesheet {
    #[serde(default)]
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Declaration(Declaration),
    Rule(Rule),
    #[serde(alias = "atrule")]
    Block(Block),
}

#[derive(Debug, Clone, PartialEq, derive_new::new, serde::Serialize, serde::Deserialize)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    #[new(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, derive_new::new, serde::Serialize, serde::Deserialize)]
pub struct Rule {
    pub selector: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    #[new(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, derive_new::new, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    #[new(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// 1-based source location of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl Node {
    pub fn declaration(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Declaration(Declaration::new(prop.into(), value.into()))
    }

    pub fn rule(selector: impl Into<String>, nodes: Vec<Node>) -> Self {
        Node::Rule(Rule::new(selector.into(), nodes))
    }

    pub fn block(name: impl Into<String>, params: Option<&str>, nodes: Vec<Node>) -> Self {
        Node::Block(Block::new(name.into(), params.map(str::to_string), nodes))
    }

    /// Attaches a source position
    pub fn at(mut self, line: usize, column: usize) -> Self {
        *self.position_mut() = Some(Position::new(line, column));
        self
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Node::Declaration(declaration) => declaration.position,
            Node::Rule(rule) => rule.position,
            Node::Block(block) => block.position,
        }
    }

    fn position_mut(&mut self) -> &mut Option<Position> {
        match self {
            Node::Declaration(declaration) => &mut declaration.position,
            Node::Rule(rule) => &mut rule.position,
            Node::Block(block) => &mut block.position,
        }
    }

    /// The text field that may contain variable references
    ///
    /// `value` for declarations, `selector` for rules and `params` for blocks.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Declaration(declaration) => Some(&declaration.value),
            Node::Rule(rule) => Some(&rule.selector),
            Node::Block(block) => block.params.as_deref(),
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Node::Declaration(declaration) => Some(&mut declaration.value),
            Node::Rule(rule) => Some(&mut rule.selector),
            Node::Block(block) => block.params.as_mut(),
        }
    }

    /// Child nodes; declarations have none
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Declaration(_) => &[],
            Node::Rule(rule) => &rule.nodes,
            Node::Block(block) => &block.nodes,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Declaration(_) => None,
            Node::Rule(rule) => Some(&mut rule.nodes),
            Node::Block(block) => Some(&mut block.nodes),
        }
    }

    /// Builds an error that points at this node
    pub fn error(&self, name: impl Into<String>) -> crate::error::Error {
        crate::error::Error::UndefinedVariable {
            name: name.into(),
            position: self.position(),
        }
    }
}

impl From<Declaration> for Node {
    fn from(value: Declaration) -> Self {
        Node::Declaration(value)
    }
}

impl From<Rule> for Node {
    fn from(value: Rule) -> Self {
        Node::Rule(value)
    }
}

impl From<Block> for Node {
    fn from(value: Block) -> Self {
        Node::Block(value)
    }
}

impl From<Vec<Node>> for Stylesheet {
    fn from(nodes: Vec<Node>) -> Self {
        Stylesheet { nodes }
    }
}

impl Stylesheet {
    /// Total number of nodes, including nested ones
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes.iter().map(|node| 1 + count(node.children())).sum()
        }

        count(&self.nodes)
    }

    /// Parses a yaml (or json) document
    pub fn from_yaml(source: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load_file(file_path: &Path) -> Result<Self, LoadError> {
        let file_path = file_path.canonicalize()?;
        tracing::info!(path=%file_path.display(), "loading stylesheet");

        let file_contents = std::fs::read_to_string(&file_path)?;
        Self::from_yaml(&file_contents)
    }
}

/// Utility macro to create a [Stylesheet] from a yaml document
///
/// ```
/// # use stylevars::stylesheet;
/// let sheet = stylesheet!("nodes: [{ type: declaration, prop: color, value: red }]");
/// assert_eq!(sheet.nodes.len(), 1);
/// ```
///
/// # Panic
/// Panics on invalid input
///
/// ```should_panic
/// # use stylevars::stylesheet;
/// stylesheet!("nodes: [{ type: nope }]");
/// ```
#[macro_export]
macro_rules! stylesheet {
    { $expr:expr } => {
        $crate::tree::Stylesheet::from_yaml($expr).expect("stylesheet must parse")
    };
}
