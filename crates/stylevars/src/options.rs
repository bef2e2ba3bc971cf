//! Configuration for one [Substitution](crate::Substitution)
//!
//! Options can be built in code or loaded from a yaml/json file:
//! ```yaml
//! variables:
//!   primary: "#fff"
//!   theme:
//!     gutter: 10px
//! silent: false
//! only:
//!   primary: "#000"
//! ```
//! A processor ([Resolve]) can only be set in code.
use crate::error::LoadError;
use crate::resolve::{Policy, Resolve};
use crate::table::VariableTable;
use crate::value::Value;
use indexmap::IndexMap;
use std::path::Path;

#[derive(Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Initial variables
    ///
    /// Only an object seeds the table, anything else is ignored.
    pub variables: Option<Value>,

    /// Leave unresolved references as they are instead of failing
    pub silent: bool,

    /// Substitute only these names and do not extract definitions
    pub only: Option<IndexMap<String, Value>>,

    /// Custom resolution strategy
    #[serde(skip)]
    pub processor: Option<Box<dyn Resolve>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an initial variable
    ///
    /// Replaces `variables` with an empty object first when it is not an object.
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        match &mut self.variables {
            Some(Value::Object(variables)) => {
                variables.insert(name.into(), value.into());
            }
            variables => {
                *variables = Some(Value::Object(IndexMap::from([(name.into(), value.into())])));
            }
        }
        self
    }

    pub fn variables(mut self, variables: impl Into<Value>) -> Self {
        self.variables = Some(variables.into());
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Adds an override, enabling override mode
    pub fn only(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.only
            .get_or_insert_with(Default::default)
            .insert(name.into(), value.into());
        self
    }

    pub fn processor(mut self, processor: impl Resolve + 'static) -> Self {
        self.processor = Some(Box::new(processor));
        self
    }

    /// The table a run starts with
    pub fn table(&self) -> VariableTable {
        self.variables
            .as_ref()
            .map(VariableTable::seed)
            .unwrap_or_default()
    }

    /// Picks the single policy that applies: silent, only, processor, lookup
    pub fn policy(self) -> Policy {
        if self.silent {
            Policy::Silent
        } else if let Some(only) = self.only {
            Policy::Override(only)
        } else if let Some(processor) = self.processor {
            Policy::Custom(processor)
        } else {
            Policy::Lookup
        }
    }

    pub fn from_yaml(source: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load_file(file_path: &Path) -> Result<Self, LoadError> {
        let file_path = file_path.canonicalize()?;
        tracing::info!(path=%file_path.display(), "loading options");

        let file_contents = std::fs::read_to_string(&file_path)?;
        Self::from_yaml(&file_contents)
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("variables", &self.variables)
            .field("silent", &self.silent)
            .field("only", &self.only)
            .field("processor", &self.processor.as_ref().map(|_| ".."))
            .finish()
    }
}
