//! Compaction of recursive trees into deduplicated, rooted DAGs, and folds over
//! those DAGs that evaluate each vertex exactly once.
//!
//! Trees are described one layer at a time via [`MappableFrame`]. [`compact`]
//! hash-conses the frames of one or more trees into a [`RootedGraph`], where
//! every structurally distinct subtree is stored once and referenced by
//! [`Position`]. [`RootedGraph::collapse_frames`] and [`fold_graph`] then fold
//! the graph, running the step for a shared vertex once rather than once per
//! parent.

mod builder;
mod error;
mod fold;
mod frame;
mod graph;
mod recursive;
mod util;

#[cfg(test)]
mod testing;

pub use builder::{compact, GraphBuilder};
pub use error::{FoldError, GraphError};
pub use fold::fold_graph;
pub use frame::{
    expand_and_collapse, try_expand_and_collapse, MappableFrame, PartiallyApplied,
    TraversableFrame,
};
pub use graph::{Position, RootedGraph};
pub use recursive::{Collapsible, Expandable};
