pub mod eval;
pub mod naive;

use std::fmt;

use dagfold::{MappableFrame, PartiallyApplied, TraversableFrame};
use futures::FutureExt;

/// Simple expression language with some operations on integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprFrame<A> {
    Add(A, A),
    Sub(A, A),
    Mul(A, A),
    LiteralInt(i64),
}

impl MappableFrame for ExprFrame<PartiallyApplied> {
    type Frame<X> = ExprFrame<X>;

    #[inline(always)]
    fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
        match input {
            ExprFrame::Add(a, b) => ExprFrame::Add(f(a), f(b)),
            ExprFrame::Sub(a, b) => ExprFrame::Sub(f(a), f(b)),
            ExprFrame::Mul(a, b) => ExprFrame::Mul(f(a), f(b)),
            ExprFrame::LiteralInt(x) => ExprFrame::LiteralInt(x),
        }
    }
}

impl TraversableFrame for ExprFrame<PartiallyApplied> {
    #[inline(always)]
    fn for_each_child<X>(input: &Self::Frame<X>, mut f: impl FnMut(&X)) {
        match input {
            ExprFrame::Add(a, b) | ExprFrame::Sub(a, b) | ExprFrame::Mul(a, b) => {
                f(a);
                f(b);
            }
            ExprFrame::LiteralInt(_) => {}
        }
    }
}

impl fmt::Display for ExprFrame<()> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprFrame::Add(_, _) => write!(f, "+"),
            ExprFrame::Sub(_, _) => write!(f, "-"),
            ExprFrame::Mul(_, _) => write!(f, "*"),
            ExprFrame::LiteralInt(x) => write!(f, "{}", x),
        }
    }
}

/// Evaluate one layer asynchronously, for exercising the async graph fold
pub fn eval_layer_async<'a>(
    node: ExprFrame<i64>,
) -> futures::future::BoxFuture<'a, Result<i64, String>> {
    futures::future::ready(Ok(eval::eval_layer(node))).boxed()
}
