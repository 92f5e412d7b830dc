//! Support for collapsing and expanding plain, owned recursive structures
//! one frame at a time. These are the trees that [`crate::compact`] consumes
//! and that [`crate::RootedGraph::expand_roots`] rebuilds.

use crate::frame::{expand_and_collapse, try_expand_and_collapse, MappableFrame};

/// The ability to recursively collapse some type into some output type, frame by frame.
///
/// Implemented for owned trees (consuming them) or for references to trees
/// (borrowing them, with `&'a Tree` as the frame element).
pub trait Collapsible
where
    Self: Sized,
{
    type FrameToken: MappableFrame;

    /// Given an instance of this type, generate a frame holding the data owned by it,
    /// with any recursive instances of 'Self' owned by this node as the frame elements
    fn into_frame(self) -> <Self::FrameToken as MappableFrame>::Frame<Self>;

    /// Given an instance of this type, collapse it into a single value of type 'Out' by
    /// traversing the recursive structure of 'self', generating frames, and collapsing
    /// those frames using some function from 'Frame<Out> -> Out'
    fn collapse_frames<Out>(
        self,
        collapse_frame: impl FnMut(<Self::FrameToken as MappableFrame>::Frame<Out>) -> Out,
    ) -> Out {
        expand_and_collapse::<Self::FrameToken, Self, Out>(self, Self::into_frame, collapse_frame)
    }

    /// Fallible version of [`Collapsible::collapse_frames`]
    fn try_collapse_frames<Out, E>(
        self,
        collapse_frame: impl FnMut(
            <Self::FrameToken as MappableFrame>::Frame<Out>,
        ) -> Result<Out, E>,
    ) -> Result<Out, E> {
        try_expand_and_collapse::<Self::FrameToken, Self, Out, E>(
            self,
            |seed| Ok(Self::into_frame(seed)),
            collapse_frame,
        )
    }
}

/// The ability to recursively expand a seed into an instance of this type, frame by frame.
pub trait Expandable
where
    Self: Sized,
{
    type FrameToken: MappableFrame;

    /// Given a frame holding instances of 'Self', generate an instance of 'Self'
    fn from_frame(val: <Self::FrameToken as MappableFrame>::Frame<Self>) -> Self;

    /// Given a seed, expand it into an instance of 'Self' by repeatedly generating
    /// frames via some function from 'In -> Frame<In>'
    fn expand_frames<In>(
        input: In,
        expand_frame: impl FnMut(In) -> <Self::FrameToken as MappableFrame>::Frame<In>,
    ) -> Self {
        expand_and_collapse::<Self::FrameToken, In, Self>(input, expand_frame, Self::from_frame)
    }

    /// Fallible version of [`Expandable::expand_frames`]
    fn try_expand_frames<In, E>(
        input: In,
        expand_frame: impl FnMut(In) -> Result<<Self::FrameToken as MappableFrame>::Frame<In>, E>,
    ) -> Result<Self, E> {
        try_expand_and_collapse::<Self::FrameToken, In, Self, E>(input, expand_frame, |frame| {
            Ok(Self::from_frame(frame))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{branch, leaf, wrap, Node, NodeFrame};

    #[test]
    fn expand_then_collapse() {
        let tree = Node::expand_frames(3u32, |n| match n {
            0 => NodeFrame::Leaf(7),
            1 => NodeFrame::Wrap(0),
            n => NodeFrame::Branch(n - 1, n - 2),
        });

        assert_eq!(
            tree,
            branch(branch(wrap(leaf(7)), leaf(7)), wrap(leaf(7)))
        );

        let sum = (&tree).collapse_frames(|frame: NodeFrame<u32>| match frame {
            NodeFrame::Leaf(x) => x,
            NodeFrame::Branch(a, b) => a + b,
            NodeFrame::Wrap(a) => a,
        });
        assert_eq!(sum, 21);
    }

    #[test]
    fn try_expand_frames_propagates_error() {
        let res = Node::try_expand_frames(5u32, |n| {
            if n == 2 {
                Err(format!("refused {}", n))
            } else {
                Ok(NodeFrame::Wrap(n - 1))
            }
        });

        assert_eq!(res, Err("refused 2".to_string()));
    }

    #[test]
    fn try_collapse_frames_propagates_error() {
        let res: Result<u32, &str> =
            branch(leaf(1), leaf(0)).try_collapse_frames(|frame| match frame {
                NodeFrame::Leaf(0) => Err("zero"),
                NodeFrame::Leaf(x) => Ok(x),
                NodeFrame::Branch(a, b) => Ok(a + b),
                NodeFrame::Wrap(a) => Ok(a),
            });

        assert_eq!(res, Err("zero"));
    }
}
