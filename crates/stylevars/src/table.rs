//! The variable table
//!
//! A flat, run-scoped map from variable name to [Value]. It is seeded once from
//! configuration and grows as definitions are found in documents. Entries are
//! never removed; a later definition replaces an earlier one.
//!
//! Dotted references (`$theme.colors.primary`) are not flat keys. They are
//! resolved by walking into object values, see [VariableTable::resolve].
use crate::util::dot_access;
use crate::value::Value;
use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct VariableTable {
    variables: IndexMap<String, Value>,
}

impl VariableTable {
    /// Creates a fresh table holding a shallow copy of `initial`
    ///
    /// Anything other than an object yields an empty table.
    pub fn seed(initial: &Value) -> Self {
        let variables = initial.as_object().cloned().unwrap_or_default();
        Self { variables }
    }

    /// Inserts or overwrites a variable
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        tracing::debug!(%name, %value, "variable defined");
        self.variables.insert(name, value);
    }

    /// Looks up a top-level variable by its exact name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Resolves a dot-delimited path, `None` when any step is missing
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        dot_access(&self.variables, path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl From<IndexMap<String, Value>> for VariableTable {
    fn from(variables: IndexMap<String, Value>) -> Self {
        Self { variables }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for VariableTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            variables: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
