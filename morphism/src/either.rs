/// One of two values. Apomorphism coalgebras use it per slot: `Left` stops with an
/// already finished structure, `Right` continues with a new seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    pub fn map_right<R2>(self, f: impl FnOnce(R) -> R2) -> Either<L, R2> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    pub fn either<Out>(self, left: impl FnOnce(L) -> Out, right: impl FnOnce(R) -> Out) -> Out {
        match self {
            Either::Left(l) => left(l),
            Either::Right(r) => right(r),
        }
    }
}
