use std::marker::PhantomData;

use crate::frame::MappableFrame;

/// Feed one input to two functions: `inspect` only looks at it, `consume` takes it.
///
/// ```rust
/// # use morphism::fanout;
/// let (len, upper) = fanout("abc".to_string(), |s| s.len(), |s| s.to_uppercase());
/// assert_eq!((len, upper), (3, "ABC".to_string()));
/// ```
pub fn fanout<A, B, C>(
    input: A,
    inspect: impl FnOnce(&A) -> B,
    consume: impl FnOnce(A) -> C,
) -> (B, C) {
    let inspected = inspect(&input);
    (inspected, consume(input))
}

/// Frame token for `(A, F::Frame<X>)`: a frame of `F` carrying one extra value that
/// is left untouched by `map_frame`.
pub(crate) struct Annotated<F, A>(PhantomData<F>, PhantomData<A>);

impl<F: MappableFrame, A> MappableFrame for Annotated<F, A> {
    type Frame<X> = (A, F::Frame<X>);

    #[inline(always)]
    fn map_frame<X, Y>(input: Self::Frame<X>, f: impl FnMut(X) -> Y) -> Self::Frame<Y> {
        let (annotation, frame) = input;
        (annotation, F::map_frame(frame, f))
    }
}
