//! Support for collapsing and expanding recursive structures by
//! repeatedly expanding or collapsing them one frame at a time.

use crate::{
    driver::{drive, expand_and_collapse, expand_and_collapse_with},
    effect::{Effect, Fallible, Identity},
    either::Either,
    frame::{MappableFrame, MappableFrameRef},
    history::History,
    util::{fanout, Annotated},
};

/// The ability to recursively collapse some type into some output type, frame by frame.
/// For example:
///
/// ```rust
/// use morphism::{Collapsible, CollapsibleExt, MappableFrame, PartiallyApplied};
///
/// enum IntTreeFrame<A> {
///     Leaf { value: usize },
///     Node { left: A, right: A },
/// }
///
/// impl MappableFrame for IntTreeFrame<PartiallyApplied> {
///     type Frame<X> = IntTreeFrame<X>;
///
///     fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
///         match input {
///             IntTreeFrame::Leaf { value } => IntTreeFrame::Leaf { value },
///             IntTreeFrame::Node { left, right } => IntTreeFrame::Node {
///                 left: f(left),
///                 right: f(right),
///             },
///         }
///     }
/// }
///
/// enum IntTree {
///     Leaf { value: usize },
///     Node { left: Box<Self>, right: Box<Self> },
/// }
///
/// impl<'a> Collapsible for &'a IntTree {
///     type FrameToken = IntTreeFrame<PartiallyApplied>;
///
///     fn into_frame(self) -> <Self::FrameToken as MappableFrame>::Frame<Self> {
///         match self {
///             IntTree::Leaf { value } => IntTreeFrame::Leaf { value: *value },
///             IntTree::Node { left, right } => IntTreeFrame::Node {
///                 left: left.as_ref(),
///                 right: right.as_ref(),
///             },
///         }
///     }
/// }
///
/// let tree = IntTree::Node {
///     left: Box::new(IntTree::Leaf { value: 1 }),
///     right: Box::new(IntTree::Leaf { value: 2 }),
/// };
///
/// let sum = (&tree).cata(|frame| match frame {
///     IntTreeFrame::Leaf { value } => value,
///     IntTreeFrame::Node { left, right } => left + right,
/// });
///
/// assert_eq!(sum, 3);
/// ```
pub trait Collapsible
where
    Self: Sized,
{
    type FrameToken: MappableFrame;

    /// Given an instance of this type, generate a frame holding the data owned by it,
    /// with any recursive instances of 'Self' owned by this node as the frame elements
    fn into_frame(self) -> <Self::FrameToken as MappableFrame>::Frame<Self>;
}

/// Recursion schemes that consume a [`Collapsible`] structure.
///
/// All of these run on the stack machine from [`crate::expand_and_collapse`] and
/// are safe to use on arbitrarily deep structures.
pub trait CollapsibleExt: Collapsible {
    /// Catamorphism: collapse `self` into a single value of type `Out` by
    /// traversing its recursive structure and collapsing each frame with
    /// `collapse_frame`, children first.
    fn cata<Out>(
        self,
        collapse_frame: impl FnMut(<Self::FrameToken as MappableFrame>::Frame<Out>) -> Out,
    ) -> Out {
        drive::<Self::FrameToken, Identity, Self, Out>(
            self,
            |node| Either::Right(node.into_frame()),
            collapse_frame,
        )
    }

    /// Catamorphism with a fallible algebra. Stops at the first error.
    fn try_cata<Out, E>(
        self,
        collapse_frame: impl FnMut(<Self::FrameToken as MappableFrame>::Frame<Out>) -> Result<Out, E>,
    ) -> Result<Out, E> {
        self.cata_with::<Fallible<E>, Out>(collapse_frame)
    }

    /// Catamorphism with an algebra in some [`Effect`].
    fn cata_with<Eff: Effect, Out>(
        self,
        collapse_frame: impl FnMut(<Self::FrameToken as MappableFrame>::Frame<Out>) -> Eff::Of<Out>,
    ) -> Eff::Of<Out> {
        drive::<Self::FrameToken, Eff, Self, Out>(
            self,
            |node| Eff::pure(Either::Right(node.into_frame())),
            collapse_frame,
        )
    }

    /// Paramorphism: like [`CollapsibleExt::cata`], but each slot also carries the
    /// original substructure the value was computed from.
    ///
    /// Every node is kept alongside its pending frame until its parent collapses,
    /// so this is limited to handles such as `&Fix<F>` or `&MyAst`. An owned
    /// [`crate::Fix`] has its own [`crate::Fix::para`] that borrows its children.
    fn para<Out>(
        self,
        mut collapse_frame: impl FnMut(<Self::FrameToken as MappableFrame>::Frame<(Self, Out)>) -> Out,
    ) -> Out
    where
        Self: Copy,
    {
        let (_, out) = drive::<Annotated<Self::FrameToken, Self>, Identity, Self, (Self, Out)>(
            self,
            |node| Either::Right((node, node.into_frame())),
            |(node, frame)| (node, collapse_frame(frame)),
        );
        out
    }

    /// Zygomorphism: run a helper algebra alongside the main one. Each slot seen by
    /// `collapse_frame` pairs the helper's result for that child with the main result.
    ///
    /// Both algebras are evaluated in the same single pass.
    fn zygo<Helper: Clone, Out>(
        self,
        mut helper: impl FnMut(<Self::FrameToken as MappableFrame>::Frame<Helper>) -> Helper,
        mut collapse_frame: impl FnMut(
            <Self::FrameToken as MappableFrame>::Frame<(Helper, Out)>,
        ) -> Out,
    ) -> Out
    where
        Self::FrameToken: MappableFrameRef,
    {
        let (_, out) = self.cata(
            |frame: <Self::FrameToken as MappableFrame>::Frame<(Helper, Out)>| {
                fanout(
                    frame,
                    |frame| {
                        let helped = <Self::FrameToken as MappableFrame>::map_frame(
                            <Self::FrameToken as MappableFrameRef>::as_ref(frame),
                            |(h, _)| h.clone(),
                        );
                        helper(helped)
                    },
                    |frame| collapse_frame(frame),
                )
            },
        );
        out
    }

    /// Histomorphism: each slot seen by `collapse_frame` holds the complete
    /// [`History`] of that child, ie. the values computed for every subtree below it.
    fn histo<Out>(
        self,
        mut collapse_frame: impl FnMut(
            <Self::FrameToken as MappableFrame>::Frame<&History<Self::FrameToken, Out>>,
        ) -> Out,
    ) -> Out
    where
        Self::FrameToken: MappableFrameRef,
    {
        self.cata(
            |frame: <Self::FrameToken as MappableFrame>::Frame<History<Self::FrameToken, Out>>| {
                let (head, tail) = fanout(
                    frame,
                    |frame| collapse_frame(<Self::FrameToken as MappableFrameRef>::as_ref(frame)),
                    |frame| frame,
                );
                History::new(head, tail)
            },
        )
        .into_head()
    }
}

impl<X: Collapsible> CollapsibleExt for X {}

/// The ability to recursively expand a seed to construct a value of this type, frame by frame.
pub trait Expandable
where
    Self: Sized,
{
    type FrameToken: MappableFrame;

    /// Given a frame holding instances of `Self`, generate an instance of `Self`
    fn from_frame(val: <Self::FrameToken as MappableFrame>::Frame<Self>) -> Self;
}

/// Recursion schemes that build an [`Expandable`] structure.
pub trait ExpandableExt: Expandable {
    /// Anamorphism: given a value of type `In`, expand it to generate a value of type
    /// `Self` by recursively expanding seeds via `expand_frame`.
    fn ana<In>(
        input: In,
        expand_frame: impl FnMut(In) -> <Self::FrameToken as MappableFrame>::Frame<In>,
    ) -> Self {
        expand_and_collapse::<Self::FrameToken, In, Self>(input, expand_frame, Self::from_frame)
    }

    /// Anamorphism with a fallible coalgebra. Stops at the first error, discarding
    /// everything built so far.
    fn try_ana<In, E>(
        input: In,
        expand_frame: impl FnMut(In) -> Result<<Self::FrameToken as MappableFrame>::Frame<In>, E>,
    ) -> Result<Self, E> {
        Self::ana_with::<Fallible<E>, In>(input, expand_frame)
    }

    /// Anamorphism with a coalgebra in some [`Effect`].
    fn ana_with<Eff: Effect, In>(
        input: In,
        expand_frame: impl FnMut(In) -> Eff::Of<<Self::FrameToken as MappableFrame>::Frame<In>>,
    ) -> Eff::Of<Self> {
        expand_and_collapse_with::<Self::FrameToken, Eff, In, Self>(input, expand_frame, |frame| {
            Eff::pure(Self::from_frame(frame))
        })
    }

    /// Apomorphism: an anamorphism where each slot may either continue with a new
    /// seed (`Either::Right`) or stop with an already finished value
    /// (`Either::Left`), which is used as-is.
    fn apo<In>(
        input: In,
        mut expand_frame: impl FnMut(In) -> <Self::FrameToken as MappableFrame>::Frame<Either<Self, In>>,
    ) -> Self {
        drive::<Self::FrameToken, Identity, Either<Self, In>, Self>(
            Either::Right(input),
            |seed| match seed {
                Either::Left(done) => Either::Left(done),
                Either::Right(seed) => Either::Right(expand_frame(seed)),
            },
            Self::from_frame,
        )
    }
}

impl<X: Expandable> ExpandableExt for X {}
