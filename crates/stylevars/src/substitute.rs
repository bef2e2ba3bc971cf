//! Node processors and the substitution entry point
use crate::error::Error;
use crate::interpolate::{interpolate, SIGIL};
use crate::options::Options;
use crate::resolve::Policy;
use crate::table::VariableTable;
use crate::tree::{Declaration, Node};
use crate::visit::{Visit, VisitMut, VisitNodesMut};

/// Replaces variable references in a document tree
///
/// Created once from [Options]. The variable table lives as long as the substitution, so
/// definitions found by one [Substitution::apply] are still known to the next.
#[derive(Debug)]
pub struct Substitution {
    table: VariableTable,
    policy: Policy,
}

impl Substitution {
    pub fn new(options: Options) -> Self {
        let table = options.table();
        let policy = options.policy();
        tracing::debug!(?policy, variables = table.len(), "substitution created");

        Self { table, policy }
    }

    /// Rewrites `document` in place
    ///
    /// Definitions (`$name: value` declarations) are moved into the table and removed from
    /// the document, references in declaration values, rule selectors and block params are
    /// replaced.
    ///
    /// The first unresolvable reference aborts the walk. Nodes visited before keep their changes.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn apply<D>(&mut self, document: &mut D) -> Result<(), Error>
    where
        D: VisitNodesMut + ?Sized,
    {
        document.visit_nodes_mut(self)
    }

    pub fn table(&self) -> &VariableTable {
        &self.table
    }

    pub fn into_table(self) -> VariableTable {
        self.table
    }

    fn process_declaration(&mut self, node: &mut Node) -> Result<Visit, Error> {
        if self.policy.extracts_definitions() {
            if let Node::Declaration(declaration) = node {
                if let Some(name) = variable_name(declaration) {
                    self.table.define(name, declaration.value.as_str());
                    return Ok(Visit::Remove);
                }
            }
        }

        self.rewrite(node)?;
        Ok(Visit::Keep)
    }

    fn process_rule(&mut self, node: &mut Node) -> Result<Visit, Error> {
        self.rewrite(node)?;
        Ok(Visit::Keep)
    }

    fn process_block(&mut self, node: &mut Node) -> Result<Visit, Error> {
        self.rewrite(node)?;
        Ok(Visit::Keep)
    }

    /// Runs both reference syntaxes over the node's text field, if it contains the sigil
    fn rewrite(&mut self, node: &mut Node) -> Result<(), Error> {
        let Some(text) = node.text().filter(|text| text.contains(SIGIL)) else {
            return Ok(());
        };

        let Self { table, policy } = self;
        let rewritten = interpolate(text, |token, name| {
            policy.resolve(table, node, token, name)
        })?;
        tracing::trace!(before = text, after = %rewritten, "rewritten");

        if let Some(field) = node.text_mut() {
            *field = rewritten;
        }

        Ok(())
    }
}

impl VisitMut<Node> for Substitution {
    type Error = Error;

    #[tracing::instrument(level = "trace", skip_all)]
    fn visit_mut(&mut self, node: &mut Node) -> Result<Visit, Error> {
        match node {
            Node::Declaration(_) => self.process_declaration(node),
            Node::Rule(_) => self.process_rule(node),
            Node::Block(_) => self.process_block(node),
        }
    }
}

/// The variable a declaration defines, if it is a definition
fn variable_name(declaration: &Declaration) -> Option<&str> {
    declaration.prop.strip_prefix(SIGIL)
}

/// Substitutes with default [Options]: definitions from the document, failing on unknown names
pub fn substitute<D>(document: &mut D) -> Result<(), Error>
where
    D: VisitNodesMut + ?Sized,
{
    Substitution::new(Options::default()).apply(document)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tree::{Position, Stylesheet};
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn run(options: Options, nodes: Vec<Node>) -> (Result<(), Error>, Stylesheet) {
        let mut sheet = Stylesheet::new(nodes);
        let result = Substitution::new(options).apply(&mut sheet);
        (result, sheet)
    }

    #[test]
    fn parenthesized_declaration_value() {
        let (result, sheet) = run(
            Options::new().variable("primary", "#fff"),
            vec![Node::declaration("color", "$(primary)")],
        );

        assert_eq!(result, Ok(()));
        assert_eq!(sheet.nodes, [Node::declaration("color", "#fff")]);
    }

    #[test]
    fn parenthesized_selector() {
        let (result, sheet) = run(
            Options::new().variable("name", "btn"),
            vec![Node::rule(".$(name)", vec![])],
        );

        assert_eq!(result, Ok(()));
        assert_eq!(sheet.nodes, [Node::rule(".btn", vec![])]);
    }

    #[test]
    fn definition_is_extracted_and_removed() {
        let mut sheet = Stylesheet::new(vec![
            Node::declaration("$gutter", "10px"),
            Node::rule(".a", vec![Node::declaration("margin", "$gutter")]),
        ]);
        let mut substitution = Substitution::new(Options::new());
        substitution.apply(&mut sheet).unwrap();

        assert_eq!(substitution.table().get("gutter"), Some(&Value::from("10px")));
        assert_eq!(
            sheet.nodes,
            [Node::rule(".a", vec![Node::declaration("margin", "10px")])]
        );
    }

    #[test]
    fn consecutive_definitions_are_all_removed() {
        let (result, sheet) = run(
            Options::new(),
            vec![
                Node::declaration("$a", "1px"),
                Node::declaration("$b", "2px"),
                Node::declaration("$c", "$a"),
                Node::declaration("margin", "$a $b $c"),
            ],
        );

        assert_eq!(result, Ok(()));
        // definition values are stored verbatim
        assert_eq!(sheet.nodes, [Node::declaration("margin", "1px 2px $a")]);
    }

    #[test]
    fn later_definitions_overwrite() {
        let (result, sheet) = run(
            Options::new().variable("color", "red"),
            vec![
                Node::declaration("a", "$color"),
                Node::declaration("$color", "blue"),
                Node::declaration("b", "$color"),
            ],
        );

        assert_eq!(result, Ok(()));
        assert_eq!(
            sheet.nodes,
            [Node::declaration("a", "red"), Node::declaration("b", "blue")]
        );
    }

    #[test]
    fn block_params() {
        let (result, sheet) = run(
            Options::new().variable("bp", "768px"),
            vec![
                Node::block("media", Some("(min-width: $bp)"), vec![]),
                Node::block("font-face", None, vec![]),
            ],
        );

        assert_eq!(result, Ok(()));
        assert_eq!(
            sheet.nodes,
            [
                Node::block("media", Some("(min-width: 768px)"), vec![]),
                Node::block("font-face", None, vec![]),
            ]
        );
    }

    #[test]
    fn rules_and_blocks_are_never_definitions() {
        let (result, sheet) = run(
            Options::new().silent(true),
            vec![
                Node::rule("$name", vec![]),
                Node::block("$name", Some("x"), vec![]),
            ],
        );

        assert_eq!(result, Ok(()));
        assert_eq!(sheet.node_count(), 2);
    }

    #[test]
    fn dot_paths() {
        let variables = Value::from([("foo", Value::from([("bar", Value::from([("baz", "quux")]))]))]);

        let (result, sheet) = run(
            Options::new().variables(variables.clone()),
            vec![Node::declaration("content", "$foo.bar.baz")],
        );
        assert_eq!(result, Ok(()));
        assert_eq!(sheet.nodes, [Node::declaration("content", "quux")]);

        let (result, _) = run(
            Options::new().variables(variables),
            vec![Node::declaration("content", "$foo.bar.nope")],
        );
        assert_eq!(
            result,
            Err(Error::UndefinedVariable {
                name: "foo.bar.nope".to_string(),
                position: None,
            })
        );
    }

    #[test]
    fn undefined_variable_points_at_node() {
        let (result, _) = run(
            Options::new(),
            vec![Node::rule(
                "a",
                vec![Node::declaration("color", "$nope").at(4, 3)],
            )],
        );

        let error = result.unwrap_err();
        assert_eq!(
            error,
            Error::UndefinedVariable {
                name: "nope".to_string(),
                position: Some(Position::new(4, 3)),
            }
        );
        assert_eq!(error.to_string(), "Undefined variable $nope at line 4, column 3");
    }

    #[test]
    fn failure_keeps_earlier_changes() {
        let (result, sheet) = run(
            Options::new().variable("a", "1"),
            vec![
                Node::declaration("x", "$a"),
                Node::declaration("y", "$missing"),
                Node::declaration("z", "$a"),
            ],
        );

        assert!(result.is_err());
        assert_eq!(
            sheet.nodes,
            [
                Node::declaration("x", "1"),
                Node::declaration("y", "$missing"),
                Node::declaration("z", "$a"),
            ]
        );
    }

    #[test]
    fn silent_leaves_unknown_references() {
        let (result, sheet) = run(
            Options::new().silent(true),
            vec![Node::declaration("color", "$nope $(nope)")],
        );

        assert_eq!(result, Ok(()));
        assert_eq!(sheet.nodes, [Node::declaration("color", "$nope $(nope)")]);
    }

    #[test]
    fn silent_still_extracts_definitions() {
        let (result, sheet) = run(
            Options::new().silent(true),
            vec![
                Node::declaration("$gutter", "10px"),
                Node::declaration("margin", "$gutter"),
            ],
        );

        assert_eq!(result, Ok(()));
        assert_eq!(sheet.nodes, [Node::declaration("margin", "$gutter")]);
    }

    #[test]
    fn silent_is_idempotent_on_resolved_trees() {
        let nodes = vec![Node::rule(
            ".a",
            vec![Node::declaration("margin", "10px")],
        )];

        let (_, once) = run(Options::new().silent(true), nodes.clone());
        let (_, twice) = run(Options::new().silent(true), once.nodes.clone());

        assert_eq!(once.nodes, nodes);
        assert_eq!(twice, once);
    }

    #[test]
    fn only_overrides_listed_names() {
        let (result, sheet) = run(
            Options::new().only("color", "red"),
            vec![
                Node::declaration("$color", "blue"),
                Node::declaration("a", "$color"),
                Node::declaration("b", "$size"),
                Node::declaration("$size", "$(color)"),
            ],
        );

        assert_eq!(result, Ok(()));
        assert_eq!(
            sheet.nodes,
            [
                Node::declaration("$color", "blue"),
                Node::declaration("a", "red"),
                Node::declaration("b", "$size"),
                Node::declaration("$size", "red"),
            ]
        );
    }

    #[test]
    fn only_does_not_touch_the_table() {
        let mut sheet = Stylesheet::new(vec![Node::declaration("$color", "blue")]);
        let mut substitution = Substitution::new(Options::new().only("color", "red"));
        substitution.apply(&mut sheet).unwrap();

        assert!(substitution.table().is_empty());
    }

    #[test]
    fn processor_result_is_used_verbatim() {
        let processor = |table: &VariableTable, node: &Node, token: &str, name: &str| {
            let kind = match node {
                Node::Declaration(_) => "decl",
                Node::Rule(_) => "rule",
                Node::Block(_) => "block",
            };
            format!("{kind}:{token}:{name}:{}", table.len())
        };

        let (result, sheet) = run(
            Options::new().processor(processor),
            vec![
                Node::declaration("$defined", "x"),
                Node::rule("$(sel)", vec![Node::declaration("a", "$val")]),
            ],
        );

        assert_eq!(result, Ok(()));
        assert_eq!(
            sheet.nodes,
            [Node::rule(
                "rule:$(sel):sel:1",
                vec![Node::declaration("a", "decl:$val:val:1")]
            )]
        );
    }

    #[test]
    fn table_survives_between_runs() {
        let mut substitution = Substitution::new(Options::new());

        let mut first = Stylesheet::new(vec![Node::declaration("$gutter", "10px")]);
        substitution.apply(&mut first).unwrap();

        let mut second = Stylesheet::new(vec![Node::declaration("margin", "$gutter")]);
        substitution.apply(&mut second).unwrap();

        assert!(first.nodes.is_empty());
        assert_eq!(second.nodes, [Node::declaration("margin", "10px")]);
    }

    #[test]
    fn substitute_with_defaults() {
        let mut nodes = vec![
            Node::declaration("$w", "1px"),
            Node::declaration("border", "$(w) solid"),
        ];
        substitute(&mut nodes).unwrap();

        assert_eq!(nodes, [Node::declaration("border", "1px solid")]);
    }

    #[test]
    fn fields_without_sigil_are_untouched() {
        let processor = |_: &VariableTable, _: &Node, _: &str, _: &str| -> String {
            panic!("must not be called")
        };

        let (result, sheet) = run(
            Options::new().processor(processor),
            vec![Node::rule("a", vec![Node::declaration("color", "red")])],
        );

        assert_eq!(result, Ok(()));
        assert_eq!(sheet.node_count(), 2);
    }
}
