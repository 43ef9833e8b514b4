//! Visitor pattern for BSP tree traversal.
//!
//! Visitors allow custom processing of cuts and leaf attributes during tree
//! traversal without coupling traversal logic to specific use cases.

use crate::space::Space;

/// Visitor receiving each cut and each leaf attribute in pre-order.
///
/// Implement this trait to define custom behavior when traversing a tree.
/// Common uses include:
/// - Extracting boundary endpoints (interval and arc lists)
/// - Counting or collecting cut hyperplanes
/// - Accumulating measures over leaves
pub trait TreeVisitor<S: Space> {
    /// Called for each internal node's cut sub-hyperplane.
    fn visit_cut(&mut self, cut: &S::Sub);

    /// Called for each leaf with its inside/outside attribute.
    fn visit_leaf(&mut self, inside: bool);
}

/// A simple visitor that collects every cut sub-hyperplane it sees.
#[derive(Debug)]
pub struct CollectingVisitor<S: Space> {
    cuts: Vec<S::Sub>,
    leaves: Vec<bool>,
}

impl<S: Space> CollectingVisitor<S> {
    /// Creates a new empty collecting visitor.
    pub fn new() -> Self {
        Self {
            cuts: Vec::new(),
            leaves: Vec::new(),
        }
    }

    /// Returns the collected cuts in visit order.
    pub fn cuts(&self) -> &[S::Sub] {
        &self.cuts
    }

    /// Returns the collected leaf attributes in visit order.
    pub fn leaves(&self) -> &[bool] {
        &self.leaves
    }

    /// Consumes the visitor, returning the collected cuts.
    pub fn into_cuts(self) -> Vec<S::Sub> {
        self.cuts
    }
}

impl<S: Space> Default for CollectingVisitor<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Space> TreeVisitor<S> for CollectingVisitor<S> {
    fn visit_cut(&mut self, cut: &S::Sub) {
        self.cuts.push(cut.clone());
    }

    fn visit_leaf(&mut self, inside: bool) {
        self.leaves.push(inside);
    }
}

/// A visitor that calls a closure for each cut, ignoring leaves.
pub struct CutVisitor<F> {
    func: F,
}

impl<F> CutVisitor<F> {
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<S: Space, F> TreeVisitor<S> for CutVisitor<F>
where
    F: FnMut(&S::Sub),
{
    fn visit_cut(&mut self, cut: &S::Sub) {
        (self.func)(cut);
    }

    fn visit_leaf(&mut self, _inside: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::BspTree;
    use crate::euclidean::oned::{Euclidean1D, OrientedPoint};
    use crate::hyperplane::{Hyperplane, SubHyperplane};
    use nalgebra::Point1;

    fn cut_at(x: f64, direct: bool) -> <Euclidean1D as Space>::Sub {
        OrientedPoint::new(Point1::new(x), direct, 1.0e-10)
            .unwrap()
            .whole_hyperplane()
    }

    #[test]
    fn collecting_visitor_empty_tree() {
        let tree = BspTree::<Euclidean1D>::full();
        let mut visitor = CollectingVisitor::new();
        tree.visit(&mut visitor);

        assert!(visitor.cuts().is_empty());
        assert_eq!(visitor.leaves(), &[true]);
    }

    #[test]
    fn collecting_visitor_preorder() {
        let tree = BspTree::<Euclidean1D>::node(
            cut_at(1.0, false),
            BspTree::empty(),
            BspTree::node(cut_at(3.0, true), BspTree::empty(), BspTree::full()),
        );

        let mut visitor = CollectingVisitor::new();
        tree.visit(&mut visitor);

        // Root cut first, then the plus leaf, then the minus subtree.
        assert_eq!(visitor.cuts().len(), 2);
        assert_eq!(
            visitor.cuts()[0].hyperplane().location().x,
            1.0
        );
        assert_eq!(visitor.leaves(), &[false, false, true]);
    }

    #[test]
    fn cut_visitor_calls_closure() {
        let tree = BspTree::<Euclidean1D>::node(
            cut_at(2.0, true),
            BspTree::empty(),
            BspTree::full(),
        );

        let mut locations = Vec::new();
        let mut visitor = CutVisitor::new(|cut: &<Euclidean1D as Space>::Sub| {
            locations.push(cut.hyperplane().location().x);
        });
        tree.visit(&mut visitor);

        assert_eq!(locations, vec![2.0]);
    }
}
