//! Rose trees with a label on every node and any number of children.

use std::fmt;

use dagfold::{Collapsible, Expandable, MappableFrame, PartiallyApplied, TraversableFrame};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeFrame<A> {
    pub label: String,
    pub children: Vec<A>,
}

impl MappableFrame for TreeFrame<PartiallyApplied> {
    type Frame<X> = TreeFrame<X>;

    fn map_frame<A, B>(input: Self::Frame<A>, f: impl FnMut(A) -> B) -> Self::Frame<B> {
        TreeFrame {
            label: input.label,
            children: input.children.into_iter().map(f).collect(),
        }
    }
}

impl TraversableFrame for TreeFrame<PartiallyApplied> {
    fn for_each_child<X>(input: &Self::Frame<X>, f: impl FnMut(&X)) {
        input.children.iter().for_each(f)
    }
}

impl fmt::Display for TreeFrame<()> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tree {
    pub label: String,
    pub children: Vec<Tree>,
}

impl Tree {
    pub fn new(label: &str, children: Vec<Tree>) -> Self {
        Tree {
            label: label.to_string(),
            children,
        }
    }

    pub fn leaf(label: &str) -> Self {
        Tree::new(label, Vec::new())
    }
}

impl<'a> Collapsible for &'a Tree {
    type FrameToken = TreeFrame<PartiallyApplied>;

    fn into_frame(self) -> <Self::FrameToken as MappableFrame>::Frame<Self> {
        TreeFrame {
            label: self.label.clone(),
            children: self.children.iter().collect(),
        }
    }
}

impl Expandable for Tree {
    type FrameToken = TreeFrame<PartiallyApplied>;

    fn from_frame(val: <Self::FrameToken as MappableFrame>::Frame<Self>) -> Self {
        Tree {
            label: val.label,
            children: val.children,
        }
    }
}
