//! Folds over a [`RootedGraph`] that evaluate every vertex exactly once.
//!
//! A plain tree fold would rerun a shared subtree's step once per parent edge
//! (and rerun any effect the step performs along with it). Here vertices are
//! visited once, in store order, which is already dependency order. Each result
//! is cached, and every later vertex that refers to it receives a clone of the
//! cached value.

use std::convert::Infallible;

use log::{debug, warn};

use crate::error::{FoldError, GraphError};
use crate::frame::TraversableFrame;
use crate::graph::{Position, RootedGraph};

impl<F: TraversableFrame> RootedGraph<F>
where
    F::Frame<Position>: Clone,
{
    /// Fold the graph with a fallible step, returning one result per vertex in
    /// store order.
    ///
    /// Stops at the first failing step; no vertex after it is evaluated. A vertex
    /// that refers to a position at or above its own index (only possible in
    /// hand-assembled graphs) fails the fold before any step runs.
    pub fn try_collapse_vertices<Out, E>(
        &self,
        mut step: impl FnMut(F::Frame<Out>) -> Result<Out, E>,
    ) -> Result<Vec<Out>, FoldError<E>>
    where
        Out: Clone,
    {
        self.check_vertices().map_err(malformed::<E>)?;
        let mut results: Vec<Out> = Vec::with_capacity(self.vertices.len());

        for (idx, vertex) in self.vertices.iter().enumerate() {
            let frame = F::map_frame(vertex.clone(), |child| results[child.0].clone());
            match step(frame) {
                Ok(out) => results.push(out),
                Err(error) => {
                    debug!("fold stopped by step failure at vertex #{}", idx);
                    return Err(FoldError::Step {
                        vertex: Position(idx),
                        error,
                    });
                }
            }
        }

        Ok(results)
    }

    /// Fold the graph with a fallible step, returning one result per root, in
    /// root order.
    pub fn try_collapse_frames<Out, E>(
        &self,
        step: impl FnMut(F::Frame<Out>) -> Result<Out, E>,
    ) -> Result<Vec<Out>, FoldError<E>>
    where
        Out: Clone,
    {
        self.check_roots().map_err(malformed::<E>)?;
        let results = self.try_collapse_vertices(step)?;
        debug!(
            "folded {} vertices for {} roots",
            results.len(),
            self.roots.len()
        );
        Ok(self.roots.iter().map(|root| results[root.0].clone()).collect())
    }

    /// Fold the graph with an infallible step, returning one result per root.
    ///
    /// The only possible failure is a structural one in a hand-assembled graph.
    pub fn collapse_frames<Out>(
        &self,
        mut step: impl FnMut(F::Frame<Out>) -> Out,
    ) -> Result<Vec<Out>, GraphError>
    where
        Out: Clone,
    {
        self.try_collapse_frames::<Out, Infallible>(|frame| Ok(step(frame)))
            .map_err(infallible_step)
    }

    /// Infallible version of [`RootedGraph::try_collapse_vertices`]
    pub fn collapse_vertices<Out>(
        &self,
        mut step: impl FnMut(F::Frame<Out>) -> Out,
    ) -> Result<Vec<Out>, GraphError>
    where
        Out: Clone,
    {
        self.try_collapse_vertices::<Out, Infallible>(|frame| Ok(step(frame)))
            .map_err(infallible_step)
    }

    /// Fold the graph with a step returning a future, awaiting each vertex's
    /// step in store order before starting the next one. One result per root.
    ///
    /// The whole graph is validated before the first step is created.
    #[cfg(feature = "experimental")]
    pub async fn try_collapse_frames_async<'a, Out, E>(
        &self,
        step: impl Fn(F::Frame<Out>) -> futures::future::BoxFuture<'a, Result<Out, E>>,
    ) -> Result<Vec<Out>, FoldError<E>>
    where
        Out: Clone,
    {
        self.validate().map_err(malformed::<E>)?;
        let mut results: Vec<Out> = Vec::with_capacity(self.vertices.len());

        for (idx, vertex) in self.vertices.iter().enumerate() {
            let frame = F::map_frame(vertex.clone(), |child| results[child.0].clone());
            match step(frame).await {
                Ok(out) => results.push(out),
                Err(error) => {
                    return Err(FoldError::Step {
                        vertex: Position(idx),
                        error,
                    })
                }
            }
        }

        Ok(self.roots.iter().map(|root| results[root.0].clone()).collect())
    }
}

/// Fold `graph` with `step`, one result per root. See [`RootedGraph::try_collapse_frames`].
pub fn fold_graph<F, Out, E>(
    graph: &RootedGraph<F>,
    step: impl FnMut(F::Frame<Out>) -> Result<Out, E>,
) -> Result<Vec<Out>, FoldError<E>>
where
    F: TraversableFrame,
    F::Frame<Position>: Clone,
    Out: Clone,
{
    graph.try_collapse_frames(step)
}

fn malformed<E>(e: GraphError) -> FoldError<E> {
    warn!("aborting fold: {}", e);
    e.into()
}

fn infallible_step(e: FoldError<Infallible>) -> GraphError {
    match e {
        FoldError::Malformed(e) => e,
        FoldError::Step { error, .. } => match error {},
    }
}
