//! Small frame type shared by the unit tests.

use crate::{Collapsible, Expandable, MappableFrame, PartiallyApplied, TraversableFrame};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeFrame<A> {
    Leaf(u32),
    Branch(A, A),
    Wrap(A),
}

pub type Token = NodeFrame<PartiallyApplied>;

impl MappableFrame for NodeFrame<PartiallyApplied> {
    type Frame<X> = NodeFrame<X>;

    fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
        match input {
            NodeFrame::Leaf(x) => NodeFrame::Leaf(x),
            NodeFrame::Branch(a, b) => NodeFrame::Branch(f(a), f(b)),
            NodeFrame::Wrap(a) => NodeFrame::Wrap(f(a)),
        }
    }
}

impl TraversableFrame for NodeFrame<PartiallyApplied> {
    fn for_each_child<X>(input: &Self::Frame<X>, mut f: impl FnMut(&X)) {
        match input {
            NodeFrame::Leaf(_) => {}
            NodeFrame::Branch(a, b) => {
                f(a);
                f(b);
            }
            NodeFrame::Wrap(a) => f(a),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Leaf(u32),
    Branch(Box<Node>, Box<Node>),
    Wrap(Box<Node>),
}

pub fn leaf(x: u32) -> Node {
    Node::Leaf(x)
}

pub fn branch(a: Node, b: Node) -> Node {
    Node::Branch(Box::new(a), Box::new(b))
}

pub fn wrap(a: Node) -> Node {
    Node::Wrap(Box::new(a))
}

impl Collapsible for Node {
    type FrameToken = Token;

    fn into_frame(self) -> <Self::FrameToken as MappableFrame>::Frame<Self> {
        match self {
            Node::Leaf(x) => NodeFrame::Leaf(x),
            Node::Branch(a, b) => NodeFrame::Branch(*a, *b),
            Node::Wrap(a) => NodeFrame::Wrap(*a),
        }
    }
}

impl<'a> Collapsible for &'a Node {
    type FrameToken = Token;

    fn into_frame(self) -> <Self::FrameToken as MappableFrame>::Frame<Self> {
        match self {
            Node::Leaf(x) => NodeFrame::Leaf(*x),
            Node::Branch(a, b) => NodeFrame::Branch(a, b),
            Node::Wrap(a) => NodeFrame::Wrap(a),
        }
    }
}

impl Expandable for Node {
    type FrameToken = Token;

    fn from_frame(val: <Self::FrameToken as MappableFrame>::Frame<Self>) -> Self {
        match val {
            NodeFrame::Leaf(x) => Node::Leaf(x),
            NodeFrame::Branch(a, b) => branch(a, b),
            NodeFrame::Wrap(a) => wrap(a),
        }
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
