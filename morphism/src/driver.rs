use std::ops::ControlFlow;

use crate::{
    effect::{Effect, Fallible, Identity},
    either::Either,
    frame::MappableFrame,
};

/// This function generates a stack machine for some frame `F::Frame`,
/// expanding some seed value `Seed` into frames via a function `Seed -> Frame<Seed>`
/// and collapsing those values via a function `Frame<Out> -> Out`.
///
/// This is a hylomorphism: no intermediate recursive structure is ever built,
/// each frame is collapsed as soon as all of its children have been.
///
/// This function performs a depth-first traversal, expanding and collapsing each branch in turn,
/// left-most slot first.
///
/// This function is stack safe (it does not use the call stack), but it
/// does use an internal stack data structure and is thus, technically,
/// susceptible to running out of memory if said stack expands without bound.
/// `expand_frame` must eventually produce frames with no slots, or this never returns.
///
/// ```rust
/// # use morphism::{expand_and_collapse, MappableFrame, PartiallyApplied};
/// enum Peano<Next> {
///     Succ(Next),
///     Zero,
/// }
///
/// impl MappableFrame for Peano<PartiallyApplied> {
///     type Frame<Next> = Peano<Next>;
///
///     fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
///         match input {
///             Peano::Succ(x) => Peano::Succ(f(x)),
///             Peano::Zero => Peano::Zero,
///         }
///     }
/// }
///
/// // far deeper than the call stack could handle
/// let sum = expand_and_collapse::<Peano<PartiallyApplied>, u64, u64>(
///     1_000_000,
///     |n| if n == 0 { Peano::Zero } else { Peano::Succ(n - 1) },
///     |frame| match frame {
///         Peano::Succ(acc) => acc + 1,
///         Peano::Zero => 0,
///     },
/// );
///
/// assert_eq!(sum, 1_000_000);
/// ```
pub fn expand_and_collapse<F: MappableFrame, Seed, Out>(
    seed: Seed,
    mut expand_frame: impl FnMut(Seed) -> F::Frame<Seed>,
    collapse_frame: impl FnMut(F::Frame<Out>) -> Out,
) -> Out {
    drive::<F, Identity, Seed, Out>(
        seed,
        |seed| Either::Right(expand_frame(seed)),
        collapse_frame,
    )
}

/// This function generates a fallible stack machine for some frame `F::Frame`,
/// expanding some seed value `Seed` into frames via a function `Seed -> Result<Frame<Seed>, E>`
/// and collapsing those values via a function `Frame<Out> -> Result<Out, E>`.
///
/// The first error encountered aborts the traversal. Frames already expanded but not
/// yet collapsed are dropped, so no partial result is ever produced.
pub fn try_expand_and_collapse<F: MappableFrame, Seed, Out, E>(
    seed: Seed,
    mut expand_frame: impl FnMut(Seed) -> Result<F::Frame<Seed>, E>,
    collapse_frame: impl FnMut(F::Frame<Out>) -> Result<Out, E>,
) -> Result<Out, E> {
    drive::<F, Fallible<E>, Seed, Out>(
        seed,
        |seed| expand_frame(seed).map(Either::Right),
        collapse_frame,
    )
}

/// Like [`try_expand_and_collapse`], but for any [`Effect`] the stack machine can
/// branch on.
pub fn expand_and_collapse_with<F: MappableFrame, Eff: Effect, Seed, Out>(
    seed: Seed,
    mut expand_frame: impl FnMut(Seed) -> Eff::Of<F::Frame<Seed>>,
    collapse_frame: impl FnMut(F::Frame<Out>) -> Eff::Of<Out>,
) -> Eff::Of<Out> {
    drive::<F, Eff, Seed, Out>(
        seed,
        |seed| Eff::map(expand_frame(seed), Either::Right),
        collapse_frame,
    )
}

/// The stack machine behind every recursion scheme in this crate.
///
/// `expand` either turns a seed into a frame of further seeds (`Right`) or
/// reports that the seed is already fully collapsed (`Left`), in which case it is
/// used as-is for its slot.
pub(crate) fn drive<F: MappableFrame, Eff: Effect, Seed, Out>(
    seed: Seed,
    mut expand: impl FnMut(Seed) -> Eff::Of<Either<Out, F::Frame<Seed>>>,
    mut collapse: impl FnMut(F::Frame<Out>) -> Eff::Of<Out>,
) -> Eff::Of<Out> {
    enum State<Seed, Pending> {
        Expand(Seed),
        // frame awaiting the values of its `usize` slots
        Collapse(Pending, usize),
    }

    let mut vals: Vec<Out> = Vec::new();
    let mut stack = vec![State::Expand(seed)];
    let mut layers: usize = 0;
    let mut peak_stack: usize = 1;

    while let Some(item) = stack.pop() {
        match item {
            State::Expand(seed) => match Eff::branch(expand(seed)) {
                ControlFlow::Continue(Either::Left(done)) => vals.push(done),
                ControlFlow::Continue(Either::Right(node)) => {
                    let mut seeds = Vec::new();
                    let node = F::map_frame(node, |seed| seeds.push(seed));

                    stack.push(State::Collapse(node, seeds.len()));
                    // reversed, so the left-most seed is popped first
                    stack.extend(seeds.into_iter().rev().map(State::Expand));
                    peak_stack = peak_stack.max(stack.len());
                }
                ControlFlow::Break(residual) => {
                    tracing::debug!(layers, "expand short-circuited");
                    return Eff::from_residual(residual);
                }
            },
            State::Collapse(node, slots) => {
                let node = {
                    let first = vals.len() - slots;
                    let mut children = vals.drain(first..);
                    F::map_frame(node, |_: ()| {
                        children.next().expect("one collapsed value per slot")
                    })
                };

                match Eff::branch(collapse(node)) {
                    ControlFlow::Continue(out) => {
                        layers += 1;
                        vals.push(out);
                    }
                    ControlFlow::Break(residual) => {
                        tracing::debug!(layers, "collapse short-circuited");
                        return Eff::from_residual(residual);
                    }
                }
            }
        };
    }

    tracing::trace!(layers, peak_stack, "stack machine finished");
    Eff::pure(vals.pop().expect("root value is collapsed last"))
}
