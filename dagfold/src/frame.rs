/// A single 'frame' containing values that can be mapped over via `map_frame`.
///
/// A frame is one layer of a recursive structure, with every recursive position
/// replaced by some type `X`. For example, `enum ExprFrame<A> { Literal(u32), Add(A, A) }`
/// is one layer of an expression tree. The same frame type is used with `X` set to
/// owned subtrees (while traversing a tree), to [`crate::Position`] (inside a
/// [`crate::RootedGraph`]) and to some output type (while folding).
///
/// # Implementing this trait
///
/// Rust does not allow implementing a trait for a partially applied type, so the
/// convention is to implement it for the frame applied to the uninhabited
/// [`PartiallyApplied`] marker:
///
/// ```rust
/// # use dagfold::{MappableFrame, PartiallyApplied};
/// #[derive(Debug, PartialEq, Eq)]
/// enum ExprFrame<A> {
///     Literal(u32),
///     Add(A, A),
/// }
///
/// impl MappableFrame for ExprFrame<PartiallyApplied> {
///     type Frame<X> = ExprFrame<X>;
///
///     fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
///         match input {
///             ExprFrame::Literal(x) => ExprFrame::Literal(x),
///             ExprFrame::Add(a, b) => ExprFrame::Add(f(a), f(b)),
///         }
///     }
/// }
///
/// let frame = ExprFrame::Add(1, 2);
/// let mapped = ExprFrame::<PartiallyApplied>::map_frame(frame, |n| n * 10);
///
/// assert_eq!(mapped, ExprFrame::Add(10, 20));
/// ```
///
/// `map_frame` must visit positions in the same order every time it is called on
/// frames with the same shape. Graph construction and folding both rely on it.
pub trait MappableFrame {
    /// the frame type that is mapped over by `map_frame`
    type Frame<X>;

    /// Apply some function `f` to each element inside a frame
    fn map_frame<A, B>(input: Self::Frame<A>, f: impl FnMut(A) -> B) -> Self::Frame<B>;
}

/// Non-consuming iteration over the positions held by a frame.
///
/// Positions must be visited in the same order `map_frame` visits them.
pub trait TraversableFrame: MappableFrame {
    fn for_each_child<X>(input: &Self::Frame<X>, f: impl FnMut(&X));
}

/// "An uninhabited type used to define [`MappableFrame`] instances for partially-applied types."
///
/// For example: the MappableFrame instance for `MyFrame<A>` cannot be written over the
/// partially-applied type `MyFrame`, so instead we write it over `MyFrame<PartiallyApplied>`
#[derive(Clone, Debug)]
pub enum PartiallyApplied {}

/// This function generates a stack machine for some frame `F::Frame`,
/// expanding some seed value `Seed` into frames via a function `Seed -> Frame<Seed>`
/// and collapsing those values via a function `Frame<Out> -> Out`.
///
/// Traversal is depth-first and post-order: children are expanded and collapsed in
/// the order `map_frame` visits them, and every child is collapsed before its parent.
///
/// This function is stack safe (it does not use the call stack), but it
/// does use an internal stack data structure and is thus, technically,
/// susceptible to stack overflows if said stack expands
pub fn expand_and_collapse<F: MappableFrame, Seed, Out>(
    seed: Seed,
    mut expand_frame: impl FnMut(Seed) -> F::Frame<Seed>,
    mut collapse_frame: impl FnMut(F::Frame<Out>) -> Out,
) -> Out {
    enum State<Seed, CollapsibleInternal> {
        Expand(usize, Seed),
        Collapse(usize, CollapsibleInternal),
    }

    let mut vals: Vec<Option<Out>> = vec![None];
    let mut stack = vec![State::Expand(0, seed)];

    while let Some(item) = stack.pop() {
        match item {
            State::Expand(val_idx, seed) => {
                let node = expand_frame(seed);
                let mut seeds = Vec::new();
                let node = F::map_frame(node, |seed| {
                    vals.push(None);
                    let idx = vals.len() - 1;
                    seeds.push(State::Expand(idx, seed));
                    idx
                });

                stack.push(State::Collapse(val_idx, node));
                // first child ends up on top
                stack.extend(seeds.into_iter().rev());
            }
            State::Collapse(val_idx, node) => {
                let node = F::map_frame(node, |k| take_collapsed(&mut vals, k));
                vals[val_idx] = Some(collapse_frame(node));
            }
        };
    }
    take_collapsed(&mut vals, 0)
}

/// This function generates a fallible stack machine for some frame `F::Frame`,
/// expanding some seed value `Seed` into frames via a function `Seed -> Result<Frame<Seed>, E>`
/// and collapsing those values via a function `Frame<Out> -> Result<Out, E>`.
///
/// Traversal order is the same as [`expand_and_collapse`]. The first error returned by
/// either function stops the traversal; nothing is expanded or collapsed after it.
pub fn try_expand_and_collapse<F: MappableFrame, Seed, Out, E>(
    seed: Seed,
    mut expand_frame: impl FnMut(Seed) -> Result<F::Frame<Seed>, E>,
    mut collapse_frame: impl FnMut(F::Frame<Out>) -> Result<Out, E>,
) -> Result<Out, E> {
    enum State<Seed, CollapsibleInternal> {
        Expand(usize, Seed),
        Collapse(usize, CollapsibleInternal),
    }

    let mut vals: Vec<Option<Out>> = vec![None];
    let mut stack = vec![State::Expand(0, seed)];

    while let Some(item) = stack.pop() {
        match item {
            State::Expand(val_idx, seed) => {
                let node = expand_frame(seed)?;
                let mut seeds = Vec::new();
                let node = F::map_frame(node, |seed| {
                    vals.push(None);
                    let idx = vals.len() - 1;
                    seeds.push(State::Expand(idx, seed));
                    idx
                });

                stack.push(State::Collapse(val_idx, node));
                stack.extend(seeds.into_iter().rev());
            }
            State::Collapse(val_idx, node) => {
                let node = F::map_frame(node, |k| take_collapsed(&mut vals, k));
                vals[val_idx] = Some(collapse_frame(node)?);
            }
        };
    }
    Ok(take_collapsed(&mut vals, 0))
}

// every slot is filled by its Collapse step before the parent's Collapse step pops
fn take_collapsed<Out>(vals: &mut [Option<Out>], idx: usize) -> Out {
    vals[idx].take().expect("child collapsed before its parent")
}
