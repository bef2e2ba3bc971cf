//! # stylevars - variables for stylesheet document trees
//!
//! ## Introduction for developers
//!
//! Read this to understand how `stylevars` works internally.
//!
//! ### Terms
//!
//! - a document ([tree::Stylesheet]) is a list of `nodes`
//! - ...where there are three kinds:
//!   - `declaration`: a `prop: value` pair
//!   - `rule`: a `selector` followed by child nodes
//!   - `block` (at-rule): a `name`, optional `params` and child nodes
//! - a `definition` is a declaration whose prop starts with the sigil `$`
//! - a `reference` is a `$name` or `$(name)` inside a value, selector or params
//!
//! ```text
//! $gutter: 10px;            <- definition, removed from the tree
//!
//! .$(prefix)-button {       <- reference in a selector
//!   margin: $gutter;        <- reference in a value
//! }
//!
//! @media (min-width: $bp) { <- reference in block params
//! }
//! ```
//!
//! ### Setup
//!
//! [Options] are turned into a [Substitution] once. This seeds the [VariableTable] from
//! `variables` and picks the [resolve::Policy] for the whole run
//! (silent, only, processor or lookup - in that order).
//!
//! ### Walking the tree
//!
//! [Substitution::apply] walks the document depth-first, see [visit::VisitNodesMut]. Every
//! node is visited once:
//!
//! - definitions are stored in the table and removed (unless `only` is set)
//! - every other text field containing `$` is run through [interpolate::interpolate]:
//!   first all bare `$name` references, then all `$(name)` references of the result
//!
//! Nodes may remove themselves during the walk without disturbing the visitation of
//! their siblings.
//!
//! ### Resolving
//!
//! Each reference is handed to the policy. The default lookup walks dot-separated names
//! (`$theme.colors.primary`) into nested values of the table and fails with
//! [Error::UndefinedVariable] when nothing is found. The walk stops at the first error,
//! nodes already rewritten stay rewritten.
//!
pub mod error;
pub mod interpolate;
pub mod options;
pub mod resolve;
pub mod substitute;
pub mod table;
pub mod tree;
mod util;
pub mod value;
pub mod visit;

pub use error::{Error, LoadError};
pub use options::Options;
pub use substitute::{substitute, Substitution};
pub use table::VariableTable;
pub use tree::{Block, Declaration, Node, Position, Rule, Stylesheet};
pub use value::Value;
