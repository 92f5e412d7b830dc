//! Render a [`RootedGraph`] for inspection, either as JSON (for a web viewer)
//! or as graphviz `dot` source.
//!
//! Vertex labels come from the frame's `Display` impl with every child
//! position erased to `()`.

use std::fmt::{self, Display};

use dagfold::{Position, RootedGraph, TraversableFrame};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VizNode {
    pub id: usize,
    pub label: String,
    pub children: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphViz {
    pub nodes: Vec<VizNode>,
    pub roots: Vec<usize>,
}

impl GraphViz {
    pub fn new<F>(graph: &RootedGraph<F>) -> Self
    where
        F: TraversableFrame,
        F::Frame<Position>: Clone,
        F::Frame<()>: Display,
    {
        let nodes = graph
            .iter()
            .map(|(pos, vertex)| {
                let mut children = Vec::new();
                F::for_each_child(vertex, |child| children.push(child.index()));
                let erased = F::map_frame(vertex.clone(), |_| ());
                VizNode {
                    id: pos.index(),
                    label: erased.to_string(),
                    children,
                }
            })
            .collect();

        GraphViz {
            nodes,
            roots: graph.roots().iter().map(|r| r.index()).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Graphviz rendering of this snapshot, see [`Dot`]
    pub fn dot(&self) -> Dot<'_> {
        Dot { viz: self }
    }

    pub fn to_dot(&self) -> String {
        self.dot().to_string()
    }
}

/// A wrapper for a [`GraphViz`] that implements [`Display`] as graphviz `dot`
/// source. Each root gets a point-shaped node with an edge to its vertex.
pub struct Dot<'a> {
    viz: &'a GraphViz,
}

impl<'a> Display for Dot<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {{")?;
        for node in self.viz.nodes.iter() {
            writeln!(f, "  n{} [label={:?}];", node.id, node.label)?;
            for child in node.children.iter() {
                writeln!(f, "  n{} -> n{};", node.id, child)?;
            }
        }
        for (idx, root) in self.viz.roots.iter().enumerate() {
            writeln!(f, "  root{} [shape=point];", idx)?;
            writeln!(f, "  root{} -> n{};", idx, root)?;
        }
        write!(f, "}}")
    }
}

pub fn to_json<F>(graph: &RootedGraph<F>) -> serde_json::Result<String>
where
    F: TraversableFrame,
    F::Frame<Position>: Clone,
    F::Frame<()>: Display,
{
    GraphViz::new(graph).to_json()
}

pub fn to_dot<F>(graph: &RootedGraph<F>) -> String
where
    F: TraversableFrame,
    F::Frame<Position>: Clone,
    F::Frame<()>: Display,
{
    GraphViz::new(graph).to_dot()
}
