pub mod eval;
pub mod naive;

use futures::{future::BoxFuture, FutureExt};
use morphism::{
    experimental::AsyncTraversableFrame, CollapsibleExt, Effect, Fix, MappableFrame, MappableFrameRef,
    PartiallyApplied, TraversableFrame,
};

/// Simple expression language with some operations on integers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprFrame<A> {
    Add(A, A),
    Sub(A, A),
    Mul(A, A),
    LiteralInt(i64),
}

pub type ExprTree = Fix<ExprFrame<PartiallyApplied>>;

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

impl MappableFrameRef for ExprFrame<PartiallyApplied> {
    #[inline(always)]
    fn as_ref<'a, X: 'a>(input: &'a Self::Frame<X>) -> Self::Frame<&'a X> {
        match input {
            ExprFrame::Add(a, b) => ExprFrame::Add(a, b),
            ExprFrame::Sub(a, b) => ExprFrame::Sub(a, b),
            ExprFrame::Mul(a, b) => ExprFrame::Mul(a, b),
            ExprFrame::LiteralInt(x) => ExprFrame::LiteralInt(*x),
        }
    }
}

impl TraversableFrame for ExprFrame<PartiallyApplied> {
    fn traverse_frame<Eff: Effect, A, B>(
        input: Self::Frame<A>,
        mut f: impl FnMut(A) -> Eff::Of<B>,
    ) -> Eff::Of<Self::Frame<B>> {
        match input {
            ExprFrame::Add(a, b) => {
                let a = f(a);
                Eff::zip_with(a, f(b), ExprFrame::Add)
            }
            ExprFrame::Sub(a, b) => {
                let a = f(a);
                Eff::zip_with(a, f(b), ExprFrame::Sub)
            }
            ExprFrame::Mul(a, b) => {
                let a = f(a);
                Eff::zip_with(a, f(b), ExprFrame::Mul)
            }
            ExprFrame::LiteralInt(x) => Eff::pure(ExprFrame::LiteralInt(x)),
        }
    }
}

impl<A> ExprFrame<A> {
    // both operands are awaited in order, left first
    async fn traverse_async<'a, B, E>(
        input: ExprFrame<A>,
        mut f: impl FnMut(A) -> BoxFuture<'a, Result<B, E>>,
    ) -> Result<ExprFrame<B>, E> {
        match input {
            ExprFrame::Add(a, b) => {
                let (a, b) = (f(a), f(b));
                Ok(ExprFrame::Add(a.await?, b.await?))
            }
            ExprFrame::Sub(a, b) => {
                let (a, b) = (f(a), f(b));
                Ok(ExprFrame::Sub(a.await?, b.await?))
            }
            ExprFrame::Mul(a, b) => {
                let (a, b) = (f(a), f(b));
                Ok(ExprFrame::Mul(a.await?, b.await?))
            }
            ExprFrame::LiteralInt(x) => Ok(ExprFrame::LiteralInt(x)),
        }
    }
}

impl AsyncTraversableFrame for ExprFrame<PartiallyApplied> {
    fn traverse_frame_async<'a, A, B, E>(
        input: Self::Frame<A>,
        f: impl FnMut(A) -> BoxFuture<'a, Result<B, E>> + Send + 'a,
    ) -> BoxFuture<'a, Result<Self::Frame<B>, E>>
    where
        A: Send + 'a,
        B: Send + 'a,
        E: Send + 'a,
    {
        async { ExprFrame::traverse_async(input, f).await }.boxed()
    }
}

/// pre-order listing of every node with its operands erased
pub fn flatten(tree: &ExprTree) -> Vec<ExprFrame<()>> {
    tree.cata(|frame: ExprFrame<Vec<ExprFrame<()>>>| {
        let mut children = Vec::new();
        let shape = ExprFrame::<PartiallyApplied>::map_frame(frame, |child| children.push(child));
        let mut flat = vec![shape];
        flat.extend(children.into_iter().flatten());
        flat
    })
}

pub fn tree_eq(a: &ExprTree, b: &ExprTree) -> bool {
    flatten(a) == flatten(b)
}
