//! Turning a referenced name into text
//!
//! Exactly one [Policy] applies per run. It is derived from
//! [Options](crate::options::Options) in this order:
//!
//! | **policy**           | **when**               | **unresolved reference**  |
//! |----------------------|------------------------|---------------------------|
//! | [Policy::Silent]     | `silent` is set        | always left verbatim      |
//! | [Policy::Override]   | `only` is set          | left verbatim             |
//! | [Policy::Custom]     | a processor is set     | whatever the processor says |
//! | [Policy::Lookup]     | otherwise              | [Error::UndefinedVariable] |
use crate::error::Error;
use crate::table::VariableTable;
use crate::tree::Node;
use crate::value::Value;
use indexmap::IndexMap;

/// User supplied resolution strategy
///
/// Receives the table, the node the reference was found in, the full token as written
/// (`$name` or `$(name)`) and the bare name. The returned text is used as-is.
///
/// Closures with the matching signature implement this trait:
/// ```
/// # use stylevars::{Node, VariableTable};
/// let resolver = |_: &VariableTable, _: &Node, _token: &str, name: &str| name.to_uppercase();
/// # let _: Box<dyn stylevars::resolve::Resolve> = Box::new(resolver);
/// ```
pub trait Resolve {
    fn resolve(&mut self, table: &VariableTable, node: &Node, token: &str, name: &str) -> String;
}

impl<F> Resolve for F
where
    F: FnMut(&VariableTable, &Node, &str, &str) -> String,
{
    fn resolve(&mut self, table: &VariableTable, node: &Node, token: &str, name: &str) -> String {
        self(table, node, token, name)
    }
}

pub enum Policy {
    /// Leave every reference untouched
    Silent,
    /// Substitute only these names, leave everything else untouched
    ///
    /// Definitions are not extracted while this policy is active.
    Override(IndexMap<String, Value>),
    /// Delegate to a [Resolve] implementation
    Custom(Box<dyn Resolve>),
    /// Look the name up in the [VariableTable], fail when it is missing
    Lookup,
}

impl Policy {
    /// Whether `$name: value` declarations define variables
    pub fn extracts_definitions(&self) -> bool {
        !matches!(self, Policy::Override(_))
    }

    #[tracing::instrument(level = "trace", skip(self, table, node))]
    pub fn resolve(
        &mut self,
        table: &VariableTable,
        node: &Node,
        token: &str,
        name: &str,
    ) -> Result<String, Error> {
        match self {
            Policy::Silent => Ok(token.to_string()),
            Policy::Override(only) => Ok(only
                .get(name)
                .map(ToString::to_string)
                .unwrap_or_else(|| token.to_string())),
            Policy::Custom(processor) => Ok(processor.resolve(table, node, token, name)),
            Policy::Lookup => match table.resolve(name) {
                Some(value) => {
                    tracing::debug!(name, %value, "variable resolved");
                    Ok(value.to_string())
                }
                None => Err(node.error(name)),
            },
        }
    }
}

impl std::fmt::Debug for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::Silent => f.write_str("Silent"),
            Policy::Override(only) => f.debug_tuple("Override").field(only).finish(),
            Policy::Custom(_) => f.write_str("Custom(..)"),
            Policy::Lookup => f.write_str("Lookup"),
        }
    }
}
