use crate::effect::Effect;

/// A single 'frame' containing values that can be mapped over via `map_frame`.
///
/// # Motivation
///
/// A frame is one layer of some recursive structure, with the recursive positions
/// ('slots') left open. Every recursion scheme in this crate is written once against
/// this trait and works for any frame that implements it.
///
/// # Implementing this trait
///
/// This trait is usually implemented for some marker token, because rust does not
/// allow for implementing a trait for a partially applied type. That is, we can implement
/// a trait for `Option<usize>` but we can't implement a trait for just `Option`, because
/// `Option` is a partially applied type.
///
/// For this reason, a common convention is to implement this trait using the uninhabited
///  [`PartiallyApplied`] enum marker, eg
///
/// ```rust
/// # use morphism::{MappableFrame, PartiallyApplied};
/// # #[derive(Debug, PartialEq, Eq)]
/// enum MyOption<A> {
///     Some(A),
///     None,
/// }
///
/// impl MappableFrame for MyOption<PartiallyApplied> {
///     type Frame<X> = MyOption<X>;
///
///     fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
///         match input {
///             MyOption::Some(x) => MyOption::Some(f(x)),
///             MyOption::None => MyOption::None,
///         }
///     }
/// }
///
/// let frame = MyOption::Some(1);
/// let mapped_frame = MyOption::<PartiallyApplied>::map_frame(frame, |n| n + 10);
///
/// assert_eq!(mapped_frame, MyOption::Some(11));
/// ```
///
/// # Slot order
///
/// `map_frame` must visit slots in the same order every time it is called on frames
/// of the same shape. The stack machine in [`crate::expand_and_collapse`] relies on
/// this to pair each slot with the value computed for it. Note that this may be
/// problematic for frames built on `HashMap`s and other unordered collections.
pub trait MappableFrame {
    /// the frame type that is mapped over by `map_frame`
    type Frame<X>;

    /// Apply some function `f` to each element inside a frame
    fn map_frame<A, B>(input: Self::Frame<A>, f: impl FnMut(A) -> B) -> Self::Frame<B>;
}

/// View a borrowed frame as a frame of borrows.
///
/// Required to fold a structure without consuming it (paramorphisms over `&Fix<F>`),
/// to look back through a [`crate::History`], and to clone a [`crate::Fix`] without
/// recursing on the call stack. Non-recursive data held by the frame is usually cloned.
pub trait MappableFrameRef: MappableFrame {
    fn as_ref<'a, X: 'a>(input: &'a Self::Frame<X>) -> Self::Frame<&'a X>;
}

/// Effectful mapping over a frame.
///
/// `traverse_frame` applies `f` to each slot in the same order as `map_frame`, and
/// combines the resulting effects left to right via the [`Effect`] strategy `Eff`.
/// Traversing with [`crate::Identity`] must be equivalent to `map_frame`.
///
/// The stack machine itself only needs `map_frame`: collecting a frame's seeds and
/// later refilling its slots are both in-order traversals, and effects are
/// sequenced per layer through [`Effect::branch`]. Implement this for algebras and
/// coalgebras that want per-slot effects within a single layer.
///
/// ```rust
/// # use morphism::{Effect, Fallible, MappableFrame, PartiallyApplied, TraversableFrame};
/// # #[derive(Debug, PartialEq, Eq)]
/// # enum Pair<A> {
/// #     Both(A, A),
/// #     Neither,
/// # }
/// # impl MappableFrame for Pair<PartiallyApplied> {
/// #     type Frame<X> = Pair<X>;
/// #     fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
/// #         match input {
/// #             Pair::Both(a, b) => Pair::Both(f(a), f(b)),
/// #             Pair::Neither => Pair::Neither,
/// #         }
/// #     }
/// # }
/// impl TraversableFrame for Pair<PartiallyApplied> {
///     fn traverse_frame<Eff: Effect, A, B>(
///         input: Self::Frame<A>,
///         mut f: impl FnMut(A) -> Eff::Of<B>,
///     ) -> Eff::Of<Self::Frame<B>> {
///         match input {
///             Pair::Both(a, b) => {
///                 let a = f(a);
///                 Eff::zip_with(a, f(b), Pair::Both)
///             }
///             Pair::Neither => Eff::pure(Pair::Neither),
///         }
///     }
/// }
///
/// let checked = Pair::<PartiallyApplied>::traverse_frame::<Fallible<String>, _, _>(
///     Pair::Both(-1, -2),
///     |x: i32| if x >= 0 { Ok(x) } else { Err(format!("negative: {}", x)) },
/// );
///
/// assert_eq!(checked, Err("negative: -1".to_string()));
/// ```
pub trait TraversableFrame: MappableFrame {
    fn traverse_frame<Eff: Effect, A, B>(
        input: Self::Frame<A>,
        f: impl FnMut(A) -> Eff::Of<B>,
    ) -> Eff::Of<Self::Frame<B>>;
}

/// "An uninhabited type used to define [`MappableFrame`] instances for partially-applied types."
///
/// For example: the MappableFrame instance for `MyFrame<A>` cannot be written over the
/// partially-applied type `MyFrame`, so instead we write it over `MyFrame<PartiallyApplied>`
#[derive(Clone, Debug)]
pub enum PartiallyApplied {}
