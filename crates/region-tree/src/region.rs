//! Regions: BSP-tree-backed point sets with boolean set algebra.

use std::sync::OnceLock;

use log::debug;

use crate::bsp::{BooleanOperation, BspTree};
use crate::error::{GeometryError, Result};
use crate::hyperplane::{Hyperplane, Side, Split, SubHyperplane};
use crate::space::{Point, Space};

/// Classification of a point with respect to a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// The point is strictly interior to the region.
    Inside,
    /// The point is strictly exterior to the region.
    Outside,
    /// The point is within tolerance of the region's boundary.
    Boundary,
}

/// Size and barycenter of a region, computed once per region.
#[derive(Debug, Clone, Copy)]
pub struct RegionProperties<P: Point> {
    /// Total measure of the region, possibly infinite.
    pub size: f64,
    /// Weighted center of the region; the NaN point when undefined (empty or
    /// unbounded regions).
    pub barycenter: P,
}

/// Part of a cut sub-hyperplane that belongs to a region's boundary.
///
/// The two fields distinguish boundary orientation: a part is `outward` when
/// the region's inside lies on its minus side (the hyperplane's plus normal
/// points away from the region) and `inward` when the inside lies on its
/// plus side.
#[derive(Debug, Clone)]
pub struct BoundaryFacet<S: Space> {
    /// Boundary part with the region's inside on its minus side.
    pub outward: Option<S::Sub>,
    /// Boundary part with the region's inside on its plus side.
    pub inward: Option<S::Sub>,
}

/// A set of points of a space, represented by one BSP tree.
///
/// A region owns its tree exclusively and never mutates it after
/// construction: every boolean operation builds a fresh tree, so regions can
/// be shared by reference across threads. The size and barycenter are
/// computed lazily, exactly once, on first access.
#[derive(Debug)]
pub struct Region<S: Space> {
    tree: BspTree<S>,
    tolerance: f64,
    properties: OnceLock<RegionProperties<S::Point>>,
}

impl<S: Space> Clone for Region<S> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            tolerance: self.tolerance,
            properties: self.properties.clone(),
        }
    }
}

impl<S: Space> Region<S> {
    /// Builds a region from a tree without re-validating the tolerance.
    pub(crate) fn new_unchecked(tree: BspTree<S>, tolerance: f64) -> Self {
        Self {
            tree,
            tolerance,
            properties: OnceLock::new(),
        }
    }

    /// Region covering the whole space.
    pub fn full(tolerance: f64) -> Result<Self> {
        Ok(Self::new_unchecked(
            BspTree::full(),
            S::check_tolerance(tolerance)?,
        ))
    }

    /// Region containing no point at all.
    pub fn empty(tolerance: f64) -> Result<Self> {
        Ok(Self::new_unchecked(
            BspTree::empty(),
            S::check_tolerance(tolerance)?,
        ))
    }

    /// Builds a region from an explicit inside/outside tree.
    ///
    /// Every cut of the tree must be bounded to the cell of the node
    /// carrying it, as the trees built by this crate always are.
    pub fn from_tree(tree: BspTree<S>, tolerance: f64) -> Result<Self> {
        Ok(Self::new_unchecked(tree, S::check_tolerance(tolerance)?))
    }

    /// Builds the convex region bounded by a collection of hyperplanes,
    /// keeping the minus side of each of them.
    ///
    /// An empty collection yields the empty region. A hyperplane coinciding
    /// with an earlier one is ignored when the orientations agree; opposite
    /// orientations squeeze the region below the tolerance, yielding the
    /// empty region. A hyperplane whose trace falls entirely outside the
    /// running convex cell means the input is inconsistent and fails with
    /// [`GeometryError::NonConvexHyperplanes`].
    pub fn convex(hyperplanes: &[S::Hyperplane], tolerance: f64) -> Result<Self> {
        let tolerance = S::check_tolerance(tolerance)?;
        let mut tree = if hyperplanes.is_empty() {
            BspTree::empty()
        } else {
            BspTree::full()
        };
        for hyperplane in hyperplanes {
            match insert_convex_cut(tree, hyperplane.whole_hyperplane())? {
                Some(inserted) => tree = inserted,
                None => {
                    tree = BspTree::empty();
                    break;
                }
            }
        }
        debug!(
            "convex region built from {} hyperplane(s), {} cut(s)",
            hyperplanes.len(),
            tree.cut_count()
        );
        Ok(Self::new_unchecked(tree, tolerance))
    }

    /// Builds a region from a boundary representation.
    ///
    /// Each boundary element must have the region's interior on its minus
    /// side and the exterior on its plus side. Elements can be given in any
    /// order and can form several non-connected sets; an empty collection
    /// yields the whole space. A boundary that does not actually separate an
    /// inside from an outside produces a tree whose classifications are not
    /// meaningful — callers validate their loops before getting here.
    pub fn from_boundary(mut boundary: Vec<S::Sub>, tolerance: f64) -> Result<Self> {
        let tolerance = S::check_tolerance(tolerance)?;
        if boundary.is_empty() {
            return Ok(Self::new_unchecked(BspTree::full(), tolerance));
        }

        // Insert large elements first: their hyperplanes split the fewest
        // other elements.
        boundary.sort_by(|a, b| b.size().total_cmp(&a.size()));
        debug!("building region from {} boundary element(s)", boundary.len());
        let tree = insert_cuts::<S>(boundary, &mut Vec::new(), true);
        Ok(Self::new_unchecked(tree, tolerance))
    }

    /// Tolerance below which points are considered to belong to hyperplanes.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Read-only access to the underlying tree.
    #[inline]
    pub fn tree(&self) -> &BspTree<S> {
        &self.tree
    }

    /// Returns `true` if the region contains no point.
    pub fn is_empty(&self) -> bool {
        self.tree.covers_nothing()
    }

    /// Returns `true` if the region covers the whole space.
    pub fn is_full(&self) -> bool {
        self.tree.covers_everything()
    }

    /// Locates a point with respect to the region.
    ///
    /// When the point falls within tolerance of a cut, both sides are
    /// checked: if they agree the shared classification is returned (the
    /// tolerance tie was irrelevant), otherwise the point is on a genuine
    /// boundary.
    pub fn check_point(&self, point: &S::Point) -> Location {
        check_point_recursive(&self.tree, point)
    }

    /// Union of this region with another, as a new region.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.combined(other, BooleanOperation::Union)
    }

    /// Intersection of this region with another, as a new region.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        self.combined(other, BooleanOperation::Intersection)
    }

    /// Symmetric difference of this region with another, as a new region.
    #[must_use]
    pub fn xor(&self, other: &Self) -> Self {
        self.combined(other, BooleanOperation::Xor)
    }

    /// Points of this region not in `other`, as a new region.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.combined(other, BooleanOperation::Difference)
    }

    fn combined(&self, other: &Self, operation: BooleanOperation) -> Self {
        let tree = self.tree.clone().combine(other.tree.clone(), operation);
        Self::new_unchecked(tree, self.tolerance)
    }

    /// Complement of the region: a leaf flip on a copied tree, not a merge.
    #[must_use]
    pub fn complement(&self) -> Self {
        Self::new_unchecked(self.tree.complement(), self.tolerance)
    }

    /// Returns `true` if `other` is a subset of this region.
    pub fn contains(&self, other: &Self) -> bool {
        other.difference(self).is_empty()
    }

    /// Total measure of the region.
    pub fn size(&self) -> f64 {
        self.properties().size
    }

    /// Weighted center of the region; the NaN point when the region is
    /// empty or unbounded.
    pub fn barycenter(&self) -> S::Point {
        self.properties().barycenter
    }

    fn properties(&self) -> &RegionProperties<S::Point> {
        self.properties.get_or_init(|| S::measure(self))
    }

    /// Total measure of the region's boundary, one dimension down.
    pub fn boundary_size(&self) -> f64 {
        self.boundary()
            .iter()
            .map(|facet| {
                facet.outward.as_ref().map_or(0.0, SubHyperplane::size)
                    + facet.inward.as_ref().map_or(0.0, SubHyperplane::size)
            })
            .sum()
    }

    /// Extracts the boundary of the region as oriented facets.
    ///
    /// Each cut of the tree is characterized against both subtrees of its
    /// node; only the parts with the inside on exactly one side belong to
    /// the boundary.
    pub fn boundary(&self) -> Vec<BoundaryFacet<S>> {
        let mut facets = Vec::new();
        collect_facets(&self.tree, &mut facets);
        facets
    }

    /// Part of a sub-hyperplane that is contained in the region.
    ///
    /// Returns `None` when the whole sub-hyperplane lies outside.
    pub fn intersection_with(&self, sub: S::Sub) -> Option<S::Sub> {
        recurse_intersection(&self.tree, sub)
    }
}

/// Descends the minus spine of a convex tree and inserts one more bounding
/// hyperplane, clipping its trace on the way down.
///
/// Returns `Ok(None)` when the new hyperplane squeezes the region below the
/// tolerance (it coincides with an earlier cut, with opposite orientation).
fn insert_convex_cut<S: Space>(
    tree: BspTree<S>,
    sub: S::Sub,
) -> Result<Option<BspTree<S>>> {
    match tree {
        BspTree::Leaf(true) => {
            if sub.is_empty() {
                // The trace vanished inside the cell: redundant hyperplane.
                Ok(Some(BspTree::Leaf(true)))
            } else {
                Ok(Some(BspTree::node(sub, BspTree::empty(), BspTree::full())))
            }
        }
        BspTree::Leaf(false) => Ok(Some(BspTree::Leaf(false))),
        BspTree::Node { cut, plus, minus } => {
            let split = sub.split(cut.hyperplane());
            match split {
                Split::Minus => Ok(insert_convex_cut(*minus, sub)?
                    .map(|inserted| BspTree::Node { cut, plus, minus: Box::new(inserted) })),
                Split::Both { minus: sub_minus, .. } => Ok(insert_convex_cut(*minus, sub_minus)?
                    .map(|inserted| BspTree::Node { cut, plus, minus: Box::new(inserted) })),
                Split::OnPlus => {
                    // Extension of an already inserted hyperplane.
                    Ok(Some(BspTree::Node { cut, plus, minus }))
                }
                Split::OnMinus => Ok(None),
                Split::Plus => Err(GeometryError::NonConvexHyperplanes),
            }
        }
    }
}

/// Recursively builds a tree by inserting boundary elements as cuts.
///
/// `path` records the (hyperplane, on-plus-side) steps from the root to the
/// current cell; the chosen element's hyperplane is clipped against it so
/// the stored cut stays bounded to the cell. Leaves take their attribute
/// from their position: minus children are inside, plus children outside.
fn insert_cuts<S: Space>(
    elements: Vec<S::Sub>,
    path: &mut Vec<(S::Hyperplane, bool)>,
    is_minus_child: bool,
) -> BspTree<S> {
    let mut queue = elements.into_iter();

    // Find the first element whose hyperplane still has a trace in the cell.
    let mut chosen = None;
    for element in queue.by_ref() {
        let hyperplane = element.hyperplane().clone();
        if let Some(trace) = cell_trace::<S>(&hyperplane, path) {
            chosen = Some((hyperplane, trace));
            break;
        }
    }
    let Some((hyperplane, trace)) = chosen else {
        return BspTree::Leaf(is_minus_child);
    };

    // Distribute the remaining elements on both sides of the inserted cut;
    // elements lying on the cut hyperplane itself are covered by its trace.
    let mut plus_list = Vec::new();
    let mut minus_list = Vec::new();
    for element in queue {
        match element.split(&hyperplane) {
            Split::Plus => plus_list.push(element),
            Split::Minus => minus_list.push(element),
            Split::Both { plus, minus } => {
                plus_list.push(plus);
                minus_list.push(minus);
            }
            Split::OnPlus | Split::OnMinus => {}
        }
    }

    path.push((hyperplane, true));
    let plus_tree = insert_cuts::<S>(plus_list, path, false);
    if let Some(step) = path.last_mut() {
        step.1 = false;
    }
    let minus_tree = insert_cuts::<S>(minus_list, path, true);
    path.pop();

    BspTree::node(trace, plus_tree, minus_tree)
}

/// Clips a hyperplane to the cell described by `path`, returning `None`
/// when the trace vanishes.
fn cell_trace<S: Space>(
    hyperplane: &S::Hyperplane,
    path: &[(S::Hyperplane, bool)],
) -> Option<S::Sub> {
    let mut trace = hyperplane.whole_hyperplane();
    for (ancestor, on_plus_side) in path {
        trace = match trace.split(ancestor) {
            Split::Plus => {
                if *on_plus_side {
                    trace
                } else {
                    return None;
                }
            }
            Split::Minus => {
                if *on_plus_side {
                    return None;
                } else {
                    trace
                }
            }
            Split::Both { plus, minus } => {
                if *on_plus_side {
                    plus
                } else {
                    minus
                }
            }
            Split::OnPlus | Split::OnMinus => return None,
        };
        if trace.is_empty() {
            return None;
        }
    }
    Some(trace)
}

fn check_point_recursive<S: Space>(tree: &BspTree<S>, point: &S::Point) -> Location {
    match tree {
        BspTree::Leaf(inside) => {
            if *inside {
                Location::Inside
            } else {
                Location::Outside
            }
        }
        BspTree::Node { cut, plus, minus } => match cut.hyperplane().side(point) {
            Side::Plus => check_point_recursive(plus, point),
            Side::Minus => check_point_recursive(minus, point),
            Side::On => {
                // Within tolerance of the cut: this is a genuine boundary
                // only if the two sides disagree, not when two cuts happen
                // to nearly coincide deep inside the region.
                let plus_location = check_point_recursive(plus, point);
                let minus_location = check_point_recursive(minus, point);
                if plus_location == minus_location {
                    plus_location
                } else {
                    Location::Boundary
                }
            }
        },
    }
}

/// Splits `sub` into the parts touching inside and outside cells of the
/// subtree rooted at `node`, reuniting parts that land in same-flag cells.
fn characterize<S: Space>(
    node: &BspTree<S>,
    sub: S::Sub,
    inside_touching: &mut Option<S::Sub>,
    outside_touching: &mut Option<S::Sub>,
) {
    match node {
        BspTree::Leaf(inside) => {
            let slot = if *inside {
                inside_touching
            } else {
                outside_touching
            };
            *slot = Some(match slot.take() {
                Some(existing) => existing.reunite(&sub),
                None => sub,
            });
        }
        BspTree::Node { cut, plus, minus } => match sub.split(cut.hyperplane()) {
            Split::Plus => characterize(plus, sub, inside_touching, outside_touching),
            Split::Minus => characterize(minus, sub, inside_touching, outside_touching),
            Split::Both {
                plus: sub_plus,
                minus: sub_minus,
            } => {
                characterize(plus, sub_plus, inside_touching, outside_touching);
                characterize(minus, sub_minus, inside_touching, outside_touching);
            }
            Split::OnPlus | Split::OnMinus => {
                // A cut piece cannot coincide with a deeper cut of its own
                // subtree; tolerate the tolerance-skew case by descending
                // the plus child.
                debug_assert!(false, "cut piece coincides with a deeper cut");
                characterize(plus, sub, inside_touching, outside_touching);
            }
        },
    }
}

fn characterize_parts<S: Space>(
    node: &BspTree<S>,
    sub: S::Sub,
) -> (Option<S::Sub>, Option<S::Sub>) {
    let mut inside_touching = None;
    let mut outside_touching = None;
    characterize(node, sub, &mut inside_touching, &mut outside_touching);
    (inside_touching, outside_touching)
}

fn collect_facets<S: Space>(node: &BspTree<S>, facets: &mut Vec<BoundaryFacet<S>>) {
    if let BspTree::Node { cut, plus, minus } = node {
        let (inside_plus, outside_plus) = characterize_parts(plus, cut.clone());

        // Outside on the plus side and inside on the minus side: the normal
        // points away from the region.
        let outward = outside_plus
            .filter(|part| !part.is_empty())
            .and_then(|part| characterize_parts(minus, part).0)
            .filter(|part| !part.is_empty());

        // Inside on the plus side and outside on the minus side.
        let inward = inside_plus
            .filter(|part| !part.is_empty())
            .and_then(|part| characterize_parts(minus, part).1)
            .filter(|part| !part.is_empty());

        if outward.is_some() || inward.is_some() {
            facets.push(BoundaryFacet { outward, inward });
        }

        collect_facets(plus, facets);
        collect_facets(minus, facets);
    }
}

fn recurse_intersection<S: Space>(node: &BspTree<S>, sub: S::Sub) -> Option<S::Sub> {
    match node {
        BspTree::Leaf(inside) => inside.then_some(sub),
        BspTree::Node { cut, plus, minus } => match sub.split(cut.hyperplane()) {
            Split::Plus => recurse_intersection(plus, sub),
            Split::Minus => recurse_intersection(minus, sub),
            Split::Both {
                plus: sub_plus,
                minus: sub_minus,
            } => {
                let plus_part = recurse_intersection(plus, sub_plus);
                let minus_part = recurse_intersection(minus, sub_minus);
                match (plus_part, minus_part) {
                    (Some(p), Some(m)) => Some(p.reunite(&m)),
                    (Some(p), None) => Some(p),
                    (None, Some(m)) => Some(m),
                    (None, None) => None,
                }
            }
            Split::OnPlus | Split::OnMinus => {
                let through_minus = recurse_intersection(minus, sub)?;
                recurse_intersection(plus, through_minus)
            }
        },
    }
}
