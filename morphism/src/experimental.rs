//! Async collapse, behind the `experimental` feature.
//!
//! The graph of futures is built on the stack machine, but awaiting it nests one
//! future per layer, so very deep structures should use the synchronous schemes.

use std::sync::Arc;

use futures::{future::BoxFuture, FutureExt};

use crate::{frame::MappableFrame, recursive::Collapsible, recursive::CollapsibleExt};

/// Traverse a frame with an async, fallible function.
///
/// Implementations must await slots strictly in the order `map_frame` visits them,
/// and stop at the first error.
pub trait AsyncTraversableFrame: MappableFrame {
    fn traverse_frame_async<'a, A, B, E>(
        input: Self::Frame<A>,
        f: impl FnMut(A) -> BoxFuture<'a, Result<B, E>> + Send + 'a,
    ) -> BoxFuture<'a, Result<Self::Frame<B>, E>>
    where
        A: Send + 'a,
        B: Send + 'a,
        E: Send + 'a;
}

pub trait CollapsibleAsync: Collapsible {
    /// Collapse `self` with an async, fallible algebra. Children are collapsed
    /// before their parent, left-most slot first.
    fn cata_async<'a, Out, E>(
        self,
        collapse_frame: impl Fn(
                <Self::FrameToken as MappableFrame>::Frame<Out>,
            ) -> BoxFuture<'a, Result<Out, E>>
            + Send
            + Sync
            + 'a,
    ) -> BoxFuture<'a, Result<Out, E>>
    where
        Self::FrameToken: AsyncTraversableFrame,
        Out: Send + 'a,
        E: Send + 'a,
        <Self::FrameToken as MappableFrame>::Frame<BoxFuture<'a, Result<Out, E>>>: Send + 'a,
        <Self::FrameToken as MappableFrame>::Frame<Out>: Send,
    {
        let collapse_frame = Arc::new(collapse_frame);

        self.cata(
            |frame: <Self::FrameToken as MappableFrame>::Frame<BoxFuture<'a, Result<Out, E>>>| {
                let collapse_frame = collapse_frame.clone();
                async move {
                    let frame =
                        <Self::FrameToken as AsyncTraversableFrame>::traverse_frame_async(
                            frame,
                            |child| child,
                        )
                        .await?;
                    collapse_frame(frame).await
                }
                .boxed()
            },
        )
    }
}

impl<X: Collapsible> CollapsibleAsync for X {}
