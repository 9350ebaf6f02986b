//! Naive versions of the recursion schemes, written with plain recursion on the
//! call stack. Only suitable for shallow inputs; used as the ground truth the
//! stack machine is compared against.

use morphism::{Either, Fix, MappableFrame, MappableFrameRef};

pub fn cata<F: MappableFrame, Out>(
    fixed: Fix<F>,
    alg: &mut dyn FnMut(F::Frame<Out>) -> Out,
) -> Out {
    let frame = F::map_frame(fixed.unfix(), |child| cata::<F, Out>(child, &mut *alg));
    alg(frame)
}

pub fn ana<F: MappableFrame, Seed>(
    seed: Seed,
    coalg: &mut dyn FnMut(Seed) -> F::Frame<Seed>,
) -> Fix<F> {
    let layer = coalg(seed);
    Fix::fix(F::map_frame(layer, |seed| ana::<F, Seed>(seed, &mut *coalg)))
}

pub fn hylo<F: MappableFrame, Seed, Out>(
    seed: Seed,
    coalg: &mut dyn FnMut(Seed) -> F::Frame<Seed>,
    alg: &mut dyn FnMut(F::Frame<Out>) -> Out,
) -> Out {
    let layer = coalg(seed);
    let frame = F::map_frame(layer, |seed| {
        hylo::<F, Seed, Out>(seed, &mut *coalg, &mut *alg)
    });
    alg(frame)
}

pub fn para<'a, F: MappableFrameRef, Out>(
    fixed: &'a Fix<F>,
    alg: &mut dyn FnMut(F::Frame<(&'a Fix<F>, Out)>) -> Out,
) -> Out {
    let frame = F::map_frame(F::as_ref(fixed.layer()), |child| {
        (child, para::<F, Out>(child, &mut *alg))
    });
    alg(frame)
}

pub fn apo<F: MappableFrame, Seed>(
    seed: Seed,
    coalg: &mut dyn FnMut(Seed) -> F::Frame<Either<Fix<F>, Seed>>,
) -> Fix<F> {
    let layer = coalg(seed);
    Fix::fix(F::map_frame(layer, |slot| match slot {
        Either::Left(done) => done,
        Either::Right(seed) => apo::<F, Seed>(seed, &mut *coalg),
    }))
}
