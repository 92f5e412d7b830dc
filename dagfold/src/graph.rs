use std::fmt;

use crate::error::GraphError;
use crate::frame::{MappableFrame, TraversableFrame};
use crate::recursive::Expandable;

/// Index of a vertex in a [`RootedGraph`].
///
/// Inside a graph, every position held by the vertex at index `i` is strictly
/// less than `i`, so the vertex store is acyclic and already in dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub(crate) usize);

impl Position {
    pub fn new(index: usize) -> Self {
        Position(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl From<Position> for usize {
    fn from(pos: Position) -> Self {
        pos.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A deduplicated, acyclic graph of frames plus the positions of interest in it.
///
/// Vertices are stored flat, in creation order, with child references replaced by
/// [`Position`]s. Each structurally distinct subtree of the input trees appears
/// exactly once. `roots` holds one entry per input tree; entries may repeat.
///
/// Built by [`crate::compact`] or [`crate::GraphBuilder`], folded by
/// [`RootedGraph::collapse_frames`] and friends. Immutable once built.
pub struct RootedGraph<F: MappableFrame> {
    pub(crate) vertices: Vec<F::Frame<Position>>,
    pub(crate) roots: Vec<Position>,
}

impl<F: MappableFrame> RootedGraph<F> {
    /// Assemble a graph from raw parts without checking any invariants.
    ///
    /// Folds re-check the acyclicity invariant as they go and fail with
    /// [`GraphError`] on a violation; use [`RootedGraph::try_from_parts`] to
    /// check up front.
    pub fn from_parts(vertices: Vec<F::Frame<Position>>, roots: Vec<Position>) -> Self {
        Self { vertices, roots }
    }

    pub fn into_parts(self) -> (Vec<F::Frame<Position>>, Vec<Position>) {
        (self.vertices, self.roots)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[F::Frame<Position>] {
        &self.vertices
    }

    pub fn roots(&self) -> &[Position] {
        &self.roots
    }

    pub fn vertex(&self, pos: Position) -> Option<&F::Frame<Position>> {
        self.vertices.get(pos.0)
    }

    /// Visit every vertex exactly once, in store (dependency) order.
    ///
    /// Use this instead of a fold when collecting something from the whole graph,
    /// eg. every label in it: a fold hands a shared vertex's result to each of its
    /// parents, so accumulating results through a fold counts shared vertices
    /// once per reference.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &F::Frame<Position>)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(idx, vertex)| (Position(idx), vertex))
    }

    pub(crate) fn check_roots(&self) -> Result<(), GraphError> {
        let len = self.vertices.len();
        match self.roots.iter().find(|root| root.0 >= len) {
            Some(&root) => Err(GraphError::RootOutOfBounds { root, len }),
            None => Ok(()),
        }
    }
}

impl<F: TraversableFrame> RootedGraph<F> {
    /// Assemble a graph from raw parts, rejecting forward references and
    /// out-of-bounds roots.
    pub fn try_from_parts(
        vertices: Vec<F::Frame<Position>>,
        roots: Vec<Position>,
    ) -> Result<Self, GraphError> {
        let graph = Self::from_parts(vertices, roots);
        graph.validate()?;
        Ok(graph)
    }

    /// Check that every child position is strictly below the vertex holding it and
    /// that every root is in bounds.
    pub fn validate(&self) -> Result<(), GraphError> {
        self.check_vertices()?;
        self.check_roots()
    }

    pub(crate) fn check_vertices(&self) -> Result<(), GraphError> {
        for (idx, vertex) in self.vertices.iter().enumerate() {
            check_vertex::<F>(idx, vertex)?;
        }
        Ok(())
    }

    /// Number of parent edges pointing at each vertex. Roots do not count.
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.vertices.len()];
        for vertex in self.vertices.iter() {
            F::for_each_child(vertex, |child| {
                if let Some(d) = degrees.get_mut(child.0) {
                    *d += 1;
                }
            });
        }
        degrees
    }

    /// Which vertices can be reached from at least one root.
    ///
    /// Graphs built from trees have every vertex reachable; hand-assembled ones
    /// may not.
    pub fn reachable(&self) -> Vec<bool> {
        let mut reachable = vec![false; self.vertices.len()];
        for root in self.roots.iter() {
            if let Some(r) = reachable.get_mut(root.0) {
                *r = true;
            }
        }
        // parents come after their children, so one reverse pass suffices
        for (idx, vertex) in self.vertices.iter().enumerate().rev() {
            if reachable[idx] {
                F::for_each_child(vertex, |child| {
                    if child.0 < idx {
                        reachable[child.0] = true;
                    }
                });
            }
        }
        reachable
    }
}

impl<F: TraversableFrame> RootedGraph<F>
where
    F::Frame<Position>: Clone,
{
    /// Rebuild one owned tree per root. Shared vertices are cloned into every
    /// tree position that refers to them.
    pub fn expand_roots<T>(&self) -> Result<Vec<T>, GraphError>
    where
        T: Expandable<FrameToken = F> + Clone,
    {
        self.collapse_frames::<T>(T::from_frame)
    }
}

pub(crate) fn check_vertex<F: TraversableFrame>(
    idx: usize,
    vertex: &F::Frame<Position>,
) -> Result<(), GraphError> {
    let mut bad = None;
    F::for_each_child(vertex, |child| {
        if bad.is_none() && child.0 >= idx {
            bad = Some(*child);
        }
    });
    match bad {
        Some(child) => Err(GraphError::ForwardReference {
            vertex: Position(idx),
            child,
        }),
        None => Ok(()),
    }
}

impl<F: MappableFrame> Clone for RootedGraph<F>
where
    F::Frame<Position>: Clone,
{
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            roots: self.roots.clone(),
        }
    }
}

impl<F: MappableFrame> PartialEq for RootedGraph<F>
where
    F::Frame<Position>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.roots == other.roots
    }
}

impl<F: MappableFrame> Eq for RootedGraph<F> where F::Frame<Position>: Eq {}

impl<F: MappableFrame> fmt::Debug for RootedGraph<F>
where
    F::Frame<Position>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootedGraph")
            .field("vertices", &self.vertices)
            .field("roots", &self.roots)
            .finish()
    }
}

impl<F: MappableFrame> Default for RootedGraph<F> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            roots: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{NodeFrame, Token};

    fn p(idx: usize) -> Position {
        Position::new(idx)
    }

    // 0: leaf, 1: wrap(0), 2: branch(0, 1), 3: leaf (unreachable)
    fn sample() -> RootedGraph<Token> {
        RootedGraph::from_parts(
            vec![
                NodeFrame::Leaf(1),
                NodeFrame::Wrap(p(0)),
                NodeFrame::Branch(p(0), p(1)),
                NodeFrame::Leaf(2),
            ],
            vec![p(2)],
        )
    }

    #[test]
    fn validate_accepts_well_formed() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_self_reference() {
        let err = RootedGraph::<Token>::try_from_parts(
            vec![NodeFrame::Leaf(0), NodeFrame::Wrap(p(1))],
            vec![p(1)],
        )
        .unwrap_err();

        assert_eq!(
            err,
            GraphError::ForwardReference {
                vertex: p(1),
                child: p(1)
            }
        );
    }

    #[test]
    fn validate_rejects_out_of_bounds_root() {
        let err = RootedGraph::<Token>::try_from_parts(vec![NodeFrame::Leaf(0)], vec![p(0), p(4)])
            .unwrap_err();

        assert_eq!(err, GraphError::RootOutOfBounds { root: p(4), len: 1 });
    }

    #[test]
    fn in_degrees_count_parent_edges() {
        assert_eq!(sample().in_degrees(), vec![2, 1, 0, 0]);
    }

    #[test]
    fn reachable_from_roots() {
        assert_eq!(sample().reachable(), vec![true, true, true, false]);

        let no_roots = RootedGraph::<Token>::from_parts(sample().into_parts().0, vec![]);
        assert_eq!(no_roots.reachable(), vec![false; 4]);
    }

    #[test]
    fn iter_visits_each_vertex_once() {
        let graph = sample();
        let leaves: Vec<u32> = graph
            .iter()
            .filter_map(|(_, vertex)| match vertex {
                NodeFrame::Leaf(x) => Some(*x),
                _ => None,
            })
            .collect();

        assert_eq!(leaves, vec![1, 2]);
        assert_eq!(graph.vertex(p(1)), Some(&NodeFrame::Wrap(p(0))));
        assert_eq!(graph.vertex(p(9)), None);
        assert_eq!(
            graph.iter().map(|(pos, _)| pos).collect::<Vec<_>>(),
            vec![p(0), p(1), p(2), p(3)]
        );
    }

    #[test]
    fn position_display() {
        assert_eq!(p(12).to_string(), "#12");
        assert_eq!(usize::from(p(3)), 3);
    }
}
