use crate::expr::naive::Expr;
use crate::expr::ExprFrame;

// wrapping arithmetic: generated trees can easily overflow i64
#[inline(always)]
pub fn eval_layer(node: ExprFrame<i64>) -> i64 {
    match node {
        ExprFrame::Add(a, b) => a.wrapping_add(b),
        ExprFrame::Sub(a, b) => a.wrapping_sub(b),
        ExprFrame::Mul(a, b) => a.wrapping_mul(b),
        ExprFrame::LiteralInt(x) => x,
    }
}

pub fn naive_eval(expr: &Expr) -> i64 {
    match expr {
        Expr::Add(a, b) => naive_eval(a).wrapping_add(naive_eval(b)),
        Expr::Sub(a, b) => naive_eval(a).wrapping_sub(naive_eval(b)),
        Expr::Mul(a, b) => naive_eval(a).wrapping_mul(naive_eval(b)),
        Expr::LiteralInt(x) => *x,
    }
}

/// Expression tree of the given depth where both children of every node are
/// the same subtree: `2^(depth+1) - 1` tree nodes, `depth + 1` distinct ones.
pub fn doubling_expr(depth: usize) -> Expr {
    use dagfold::Expandable;

    Expr::expand_frames(depth, |x| {
        if x > 0 {
            ExprFrame::Add(x - 1, x - 1)
        } else {
            ExprFrame::LiteralInt(1)
        }
    })
}
