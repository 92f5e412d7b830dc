use thiserror::Error;

use crate::graph::Position;

/// Structural invariant violations in a [`crate::RootedGraph`].
///
/// A graph produced by [`crate::GraphBuilder`] never contains these; they
/// arise from graphs assembled by hand via [`crate::RootedGraph::from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {vertex} refers to {child}, which is not strictly below it")]
    ForwardReference { vertex: Position, child: Position },
    #[error("root {root} is out of bounds for a graph with {len} vertices")]
    RootOutOfBounds { root: Position, len: usize },
}

/// Failure of a fallible fold over a [`crate::RootedGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldError<E> {
    #[error(transparent)]
    Malformed(#[from] GraphError),
    #[error("step failed at vertex {vertex}")]
    Step { vertex: Position, error: E },
}

impl<E> FoldError<E> {
    /// The error returned by the step function, if that is what stopped the fold
    pub fn into_step_error(self) -> Option<E> {
        match self {
            FoldError::Step { error, .. } => Some(error),
            FoldError::Malformed(_) => None,
        }
    }
}
