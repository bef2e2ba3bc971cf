use super::{Visit, VisitMut};
use crate::tree::{Node, Stylesheet};

/// Recursively visit all [Node]s mutably, depth-first and in document order
///
/// Each node is visited exactly once, before its children. A node the visitor asks to
/// [Visit::Remove] is taken out of its parent right away; its following siblings are still
/// visited and its own children are skipped.
///
/// The first error aborts the walk. Changes made up to that point are kept.
pub trait VisitNodesMut {
    fn visit_nodes_mut<V>(&mut self, visitor: &mut V) -> Result<(), V::Error>
    where
        V: VisitMut<Node> + ?Sized;
}

impl VisitNodesMut for Stylesheet {
    fn visit_nodes_mut<V>(&mut self, visitor: &mut V) -> Result<(), V::Error>
    where
        V: VisitMut<Node> + ?Sized,
    {
        self.nodes.visit_nodes_mut(visitor)
    }
}

impl VisitNodesMut for Vec<Node> {
    fn visit_nodes_mut<V>(&mut self, visitor: &mut V) -> Result<(), V::Error>
    where
        V: VisitMut<Node> + ?Sized,
    {
        // cursor only advances past nodes that stay
        let mut index = 0;
        while index < self.len() {
            match visitor.visit_mut(&mut self[index])? {
                Visit::Remove => {
                    let removed = self.remove(index);
                    tracing::trace!(node=?removed, "node removed");
                }
                Visit::Keep => {
                    self[index].visit_nodes_mut(visitor)?;
                    index += 1;
                }
            }
        }

        Ok(())
    }
}

impl VisitNodesMut for Node {
    /// Visits the children of this node, not the node itself
    fn visit_nodes_mut<V>(&mut self, visitor: &mut V) -> Result<(), V::Error>
    where
        V: VisitMut<Node> + ?Sized,
    {
        match self.children_mut() {
            Some(children) => children.visit_nodes_mut(visitor),
            None => Ok(()),
        }
    }
}
