//! visitor pattern helpers
mod visit_nodes;
pub use visit_nodes::VisitNodesMut;

/// What to do with a node after it was visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Keep the node and descend into its children
    Keep,
    /// Remove the node from its parent, its children are not visited
    Remove,
}

/// Visitor that visits its subjects mutably
pub trait VisitMut<T> {
    type Error;

    fn visit_mut(&mut self, value: &mut T) -> Result<Visit, Self::Error>;
}

// blanket impl for FnMut
impl<T, E, F> VisitMut<T> for F
where
    F: FnMut(&mut T) -> Result<Visit, E>,
{
    type Error = E;

    fn visit_mut(&mut self, value: &mut T) -> Result<Visit, E> {
        self(value)
    }
}
