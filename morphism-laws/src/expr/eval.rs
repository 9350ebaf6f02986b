use std::convert::Infallible;

use crate::expr::naive::{generate_layer, Expr};
use crate::expr::ExprFrame;
#[cfg(test)]
use crate::expr::naive::arb_expr;
use futures::{future::BoxFuture, FutureExt};
use morphism::{expand_and_collapse, try_expand_and_collapse, MappableFrame, PartiallyApplied};
#[cfg(test)]
use proptest::proptest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidInt(i64);

/// An expression frame whose literals have been checked
#[derive(Debug, Clone)]
pub enum CompiledExpr<A> {
    Add(A, A),
    Sub(A, A),
    Mul(A, A),
    LiteralInt(ValidInt),
}

impl MappableFrame for CompiledExpr<PartiallyApplied> {
    type Frame<X> = CompiledExpr<X>;

    #[inline(always)]
    fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
        match input {
            CompiledExpr::Add(a, b) => CompiledExpr::Add(f(a), f(b)),
            CompiledExpr::Sub(a, b) => CompiledExpr::Sub(f(a), f(b)),
            CompiledExpr::Mul(a, b) => CompiledExpr::Mul(f(a), f(b)),
            CompiledExpr::LiteralInt(x) => CompiledExpr::LiteralInt(x),
        }
    }
}

pub type CompileError = &'static str;

/// Compiles each layer as it is expanded and evaluates it as soon as its operands
/// are known. The first invalid literal aborts the whole evaluation.
pub fn eval_lazy_with_fused_compile(expr: &Expr) -> Result<i64, CompileError> {
    try_expand_and_collapse::<CompiledExpr<PartiallyApplied>, _, _, _>(
        expr,
        |seed| compile(generate_layer(seed)),
        |compiled| Ok(eval_compiled(compiled)),
    )
}

// only looks at literal case - add/sub/mul ops are always valid
pub fn compile<A>(expr: ExprFrame<A>) -> Result<CompiledExpr<A>, CompileError> {
    match expr {
        ExprFrame::Add(a, b) => Ok(CompiledExpr::Add(a, b)),
        ExprFrame::Sub(a, b) => Ok(CompiledExpr::Sub(a, b)),
        ExprFrame::Mul(a, b) => Ok(CompiledExpr::Mul(a, b)),
        ExprFrame::LiteralInt(x) => {
            // arbitrary check
            if x > 99 {
                return Err("invalid literal");
            }

            Ok(CompiledExpr::LiteralInt(ValidInt(x)))
        }
    }
}

pub fn eval_compiled(expr: CompiledExpr<i64>) -> i64 {
    match expr {
        CompiledExpr::Add(a, b) => a.wrapping_add(b),
        CompiledExpr::Sub(a, b) => a.wrapping_sub(b),
        CompiledExpr::Mul(a, b) => a.wrapping_mul(b),
        CompiledExpr::LiteralInt(ValidInt(x)) => x,
    }
}

#[inline(always)]
pub fn eval_layer(node: ExprFrame<i64>) -> i64 {
    match node {
        ExprFrame::Add(a, b) => a.wrapping_add(b),
        ExprFrame::Sub(a, b) => a.wrapping_sub(b),
        ExprFrame::Mul(a, b) => a.wrapping_mul(b),
        ExprFrame::LiteralInt(x) => x,
    }
}

pub fn eval_layer_async<'a>(node: ExprFrame<i64>) -> BoxFuture<'a, Result<i64, Infallible>> {
    futures::future::ready(Ok(eval_layer(node))).boxed()
}

pub fn naive_eval(expr: &Expr) -> i64 {
    match expr {
        Expr::Add(a, b) => naive_eval(a).wrapping_add(naive_eval(b)),
        Expr::Sub(a, b) => naive_eval(a).wrapping_sub(naive_eval(b)),
        Expr::Mul(a, b) => naive_eval(a).wrapping_mul(naive_eval(b)),
        Expr::LiteralInt(x) => *x,
    }
}

pub fn eval_lazy(expr: &Expr) -> i64 {
    expand_and_collapse::<ExprFrame<PartiallyApplied>, _, _>(expr, generate_layer, eval_layer)
}

// generate a bunch of expression trees and evaluate them
#[cfg(test)]
proptest! {
    #[test]
    fn expr_eval(expr in arb_expr()) {
        use crate::reference;
        use morphism::{experimental::CollapsibleAsync, CollapsibleExt};

        let simple = naive_eval(&expr);
        let lazy_stack_eval = eval_lazy(&expr);
        let by_ref = (&expr).cata(eval_layer);
        let owned = expr.clone().cata(eval_layer);
        let tree = expr.to_tree();
        let from_tree = (&tree).cata(eval_layer);
        let from_reference = reference::cata::<ExprFrame<PartiallyApplied>, i64>(tree.clone(), &mut eval_layer);

        let eval_async = {
            let rt = tokio::runtime::Runtime::new().unwrap();

            rt.block_on(async { tree.clone().cata_async(eval_layer_async).await })
        };

        let eval_with_ctx = (&expr).para(|frame: ExprFrame<(&Expr, i64)>| match frame {
            ExprFrame::Add((ctx_a, a), (ctx_b, b)) => {
                assert_eq!(naive_eval(ctx_a), a);
                assert_eq!(naive_eval(ctx_b), b);
                a.wrapping_add(b)
            }
            ExprFrame::Sub((ctx_a, a), (ctx_b, b)) => {
                assert_eq!(naive_eval(ctx_a), a);
                assert_eq!(naive_eval(ctx_b), b);
                a.wrapping_sub(b)
            }
            ExprFrame::Mul((ctx_a, a), (ctx_b, b)) => {
                assert_eq!(naive_eval(ctx_a), a);
                assert_eq!(naive_eval(ctx_b), b);
                a.wrapping_mul(b)
            }
            ExprFrame::LiteralInt(x) => x,
        });

        let has_invalid_literal = (&expr).cata(|frame: ExprFrame<bool>| match frame {
            ExprFrame::Add(a, b) | ExprFrame::Sub(a, b) | ExprFrame::Mul(a, b) => a || b,
            ExprFrame::LiteralInt(x) => x > 99,
        });
        let compiled = eval_lazy_with_fused_compile(&expr);

        assert_eq!(simple, lazy_stack_eval);
        assert_eq!(simple, by_ref);
        assert_eq!(simple, owned);
        assert_eq!(simple, from_tree);
        assert_eq!(simple, from_reference);
        assert_eq!(Ok(simple), eval_async);
        assert_eq!(simple, eval_with_ctx);
        if has_invalid_literal {
            assert_eq!(compiled, Err("invalid literal"));
        } else {
            assert_eq!(compiled, Ok(simple));
        }
    }
}
