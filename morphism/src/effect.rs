//! Effect-sequencing strategies used by [`crate::TraversableFrame`] and by the
//! effectful variants of the recursion schemes.
//!
//! An effect is described by a marker type whose `Of<X>` is the effectful
//! version of `X`. Effects here are strict: by the time a value of `Of<X>` exists,
//! its effect has already happened, and combining two of them keeps the left one's
//! outcome first.

use std::{convert::Infallible, marker::PhantomData, ops::ControlFlow};

pub trait Effect {
    /// `X` wrapped in this effect
    type Of<X>;

    /// What is left of a wrapped value that did not produce an `X`
    type Residual;

    fn pure<X>(x: X) -> Self::Of<X>;

    fn map<A, B>(fa: Self::Of<A>, f: impl FnOnce(A) -> B) -> Self::Of<B>;

    /// Combine two effects, `fa` first.
    fn zip_with<A, B, C>(
        fa: Self::Of<A>,
        fb: Self::Of<B>,
        f: impl FnOnce(A, B) -> C,
    ) -> Self::Of<C>;

    /// Either continue with the wrapped value or stop with the residual.
    /// Lets the stack machine abandon a traversal between two steps.
    fn branch<X>(fx: Self::Of<X>) -> ControlFlow<Self::Residual, X>;

    fn from_residual<X>(residual: Self::Residual) -> Self::Of<X>;
}

/// No effect at all: `Of<X>` is just `X`.
pub enum Identity {}

impl Effect for Identity {
    type Of<X> = X;
    type Residual = Infallible;

    #[inline(always)]
    fn pure<X>(x: X) -> X {
        x
    }

    #[inline(always)]
    fn map<A, B>(fa: A, f: impl FnOnce(A) -> B) -> B {
        f(fa)
    }

    #[inline(always)]
    fn zip_with<A, B, C>(fa: A, fb: B, f: impl FnOnce(A, B) -> C) -> C {
        f(fa, fb)
    }

    #[inline(always)]
    fn branch<X>(fx: X) -> ControlFlow<Infallible, X> {
        ControlFlow::Continue(fx)
    }

    fn from_residual<X>(residual: Infallible) -> X {
        match residual {}
    }
}

/// Failure with some error `E`: `Of<X>` is `Result<X, E>`.
/// When two failures are combined, the left-most one wins.
pub struct Fallible<E>(PhantomData<E>);

impl<E> Effect for Fallible<E> {
    type Of<X> = Result<X, E>;
    type Residual = E;

    fn pure<X>(x: X) -> Result<X, E> {
        Ok(x)
    }

    fn map<A, B>(fa: Result<A, E>, f: impl FnOnce(A) -> B) -> Result<B, E> {
        fa.map(f)
    }

    fn zip_with<A, B, C>(
        fa: Result<A, E>,
        fb: Result<B, E>,
        f: impl FnOnce(A, B) -> C,
    ) -> Result<C, E> {
        let a = fa?;
        let b = fb?;
        Ok(f(a, b))
    }

    fn branch<X>(fx: Result<X, E>) -> ControlFlow<E, X> {
        match fx {
            Ok(x) => ControlFlow::Continue(x),
            Err(e) => ControlFlow::Break(e),
        }
    }

    fn from_residual<X>(residual: E) -> Result<X, E> {
        Err(residual)
    }
}

/// Absence: `Of<X>` is `Option<X>`.
pub enum Optional {}

impl Effect for Optional {
    type Of<X> = Option<X>;
    type Residual = ();

    fn pure<X>(x: X) -> Option<X> {
        Some(x)
    }

    fn map<A, B>(fa: Option<A>, f: impl FnOnce(A) -> B) -> Option<B> {
        fa.map(f)
    }

    fn zip_with<A, B, C>(fa: Option<A>, fb: Option<B>, f: impl FnOnce(A, B) -> C) -> Option<C> {
        Some(f(fa?, fb?))
    }

    fn branch<X>(fx: Option<X>) -> ControlFlow<(), X> {
        match fx {
            Some(x) => ControlFlow::Continue(x),
            None => ControlFlow::Break(()),
        }
    }

    fn from_residual<X>(_residual: ()) -> Option<X> {
        None
    }
}
