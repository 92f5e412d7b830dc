use std::hash::Hash;

use hashbrown::hash_map::RawEntryMut;
use log::{debug, trace};

use crate::error::GraphError;
use crate::frame::{expand_and_collapse, try_expand_and_collapse, MappableFrame, TraversableFrame};
use crate::graph::{check_vertex, Position, RootedGraph};
use crate::recursive::Collapsible;
use crate::util::{hash_one, BuildHasher, HashMap};

/// Builds a [`RootedGraph`] by hash-consing frames.
///
/// Every tree added to the builder is traversed post-order; each frame, with its
/// children already replaced by positions, is looked up in a dedup index keyed by
/// its content. Identical content resolves to the position it was first assigned,
/// so structurally identical subtrees, within one tree or across trees, share a
/// single vertex. New content is appended to the vertex store, which keeps every
/// child position strictly below its parent's.
///
/// The dedup index holds positions only, hashed by the content they point at, so
/// every frame is stored once. It is dropped by [`GraphBuilder::finish`].
pub struct GraphBuilder<F: MappableFrame> {
    vertices: Vec<F::Frame<Position>>,
    dedup: HashMap<Position, ()>,
    hasher: BuildHasher,
    roots: Vec<Position>,
    // frames seen, including dedup hits
    visited: usize,
}

impl<F> GraphBuilder<F>
where
    F: TraversableFrame,
    F::Frame<Position>: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            dedup: HashMap::default(),
            hasher: BuildHasher::default(),
            roots: Vec::new(),
            visited: 0,
        }
    }

    /// Preallocate for `capacity` distinct vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            dedup: HashMap::with_capacity_and_hasher(capacity, Default::default()),
            hasher: BuildHasher::default(),
            roots: Vec::new(),
            visited: 0,
        }
    }

    /// Number of distinct vertices so far
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Intern a single frame whose children are positions already in this builder.
    ///
    /// Returns the existing position if identical content was interned before.
    /// Fails if the frame refers to a position this builder has not handed out.
    pub fn intern(&mut self, frame: F::Frame<Position>) -> Result<Position, GraphError> {
        check_vertex::<F>(self.vertices.len(), &frame)?;
        Ok(self.intern_resolved(frame))
    }

    // children are known to be in the store
    fn intern_resolved(&mut self, frame: F::Frame<Position>) -> Position {
        self.visited += 1;
        let hash = hash_one(&self.hasher, &frame);
        let vertices = &mut self.vertices;
        let entry = self
            .dedup
            .raw_entry_mut()
            .from_hash(hash, |pos| vertices[pos.0] == frame);

        match entry {
            RawEntryMut::Occupied(existing) => {
                trace!("dedup hit: {}", existing.key());
                *existing.key()
            }
            RawEntryMut::Vacant(slot) => {
                let pos = Position(vertices.len());
                vertices.push(frame);
                let hasher = &self.hasher;
                slot.insert_with_hasher(hash, pos, (), |p| hash_one(hasher, &vertices[p.0]));
                pos
            }
        }
    }

    /// Mark an already-interned position as a root.
    pub fn push_root(&mut self, root: Position) -> Result<(), GraphError> {
        if root.0 >= self.vertices.len() {
            return Err(GraphError::RootOutOfBounds {
                root,
                len: self.vertices.len(),
            });
        }
        self.roots.push(root);
        Ok(())
    }

    /// Add a tree to the graph and record its root position as a root.
    pub fn add_tree<T>(&mut self, tree: T) -> Position
    where
        T: Collapsible<FrameToken = F>,
    {
        let root = tree.collapse_frames::<Position>(|frame| self.intern_resolved(frame));
        self.roots.push(root);
        root
    }

    /// Add the tree generated by unfolding `seed`, without materializing it.
    /// Records the resulting position as a root.
    pub fn add_seed<Seed>(
        &mut self,
        seed: Seed,
        expand_frame: impl FnMut(Seed) -> F::Frame<Seed>,
    ) -> Position {
        let root = expand_and_collapse::<F, Seed, Position>(seed, expand_frame, |frame| {
            self.intern_resolved(frame)
        });
        self.roots.push(root);
        root
    }

    /// Fallible version of [`GraphBuilder::add_seed`]. Vertices interned before
    /// the failure stay in the builder; no root is recorded.
    pub fn try_add_seed<Seed, E>(
        &mut self,
        seed: Seed,
        expand_frame: impl FnMut(Seed) -> Result<F::Frame<Seed>, E>,
    ) -> Result<Position, E> {
        let root = try_expand_and_collapse::<F, Seed, Position, E>(seed, expand_frame, |frame| {
            Ok(self.intern_resolved(frame))
        })?;
        self.roots.push(root);
        Ok(root)
    }

    pub fn finish(self) -> RootedGraph<F> {
        debug!(
            "compacted {} frames into {} vertices, {} roots",
            self.visited,
            self.vertices.len(),
            self.roots.len()
        );
        RootedGraph {
            vertices: self.vertices,
            roots: self.roots,
        }
    }
}

impl<F> Default for GraphBuilder<F>
where
    F: TraversableFrame,
    F::Frame<Position>: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Compact a sequence of trees into one [`RootedGraph`], with one root per
/// tree in input order. Common structure between the trees is shared exactly as
/// common structure within a single tree is.
///
/// Deterministic: the same trees in the same order always produce the same
/// vertex store.
pub fn compact<T, F>(trees: impl IntoIterator<Item = T>) -> RootedGraph<F>
where
    T: Collapsible<FrameToken = F>,
    F: TraversableFrame,
    F::Frame<Position>: Eq + Hash,
{
    let mut builder = GraphBuilder::new();
    for tree in trees {
        builder.add_tree(tree);
    }
    builder.finish()
}
