//! The algebraic laws every scheme must satisfy, stated once for any frame.
//!
//! Each law takes the value(s) to check it on plus an equality for the type being
//! compared, and reports a [`LawViolation`] when the two sides differ.

use morphism::{
    hylo, CollapsibleExt, Either, ExpandableExt, Fallible, Fix, History, Identity, MappableFrame,
    MappableFrameRef, TraversableFrame,
};
use thiserror::Error;

use crate::reference;

#[derive(Debug, Error)]
#[error("{scheme}: `{law}` does not hold ({equation})")]
pub struct LawViolation {
    pub scheme: &'static str,
    pub law: &'static str,
    pub equation: &'static str,
}

fn holds(
    ok: bool,
    scheme: &'static str,
    law: &'static str,
    equation: &'static str,
) -> Result<(), LawViolation> {
    if ok {
        Ok(())
    } else {
        Err(LawViolation {
            scheme,
            law,
            equation,
        })
    }
}

pub fn fix_round_trip<F: MappableFrameRef>(
    fixed: &Fix<F>,
    eq: impl Fn(&Fix<F>, &Fix<F>) -> bool,
) -> Result<(), LawViolation> {
    let rewrapped = Fix::fix(fixed.clone().unfix());
    holds(
        eq(&rewrapped, fixed),
        "fix",
        "round trip",
        "fix(unfix(t)) == t",
    )?;

    let layer = fixed.clone().unfix();
    let unwrapped = Fix::<F>::fix(layer).unfix();
    holds(
        eq(&Fix::fix(unwrapped), fixed),
        "fix",
        "round trip",
        "unfix(fix(l)) == l",
    )
}

pub fn cata_identity<F: MappableFrameRef>(
    fixed: &Fix<F>,
    eq: impl Fn(&Fix<F>, &Fix<F>) -> bool,
) -> Result<(), LawViolation> {
    let rebuilt = fixed.clone().cata(Fix::<F>::fix);
    holds(eq(&rebuilt, fixed), "cata", "identity", "cata(fix) == id")
}

pub fn cata_cancellation<F: MappableFrameRef, Out>(
    fixed: &Fix<F>,
    alg: impl Fn(F::Frame<Out>) -> Out,
    eq: impl Fn(&Out, &Out) -> bool,
) -> Result<(), LawViolation> {
    let lhs = Fix::<F>::fix(fixed.clone().unfix()).cata(&alg);
    let rhs = alg(F::map_frame(fixed.clone().unfix(), |child| child.cata(&alg)));
    holds(
        eq(&lhs, &rhs),
        "cata",
        "cancellation",
        "cata(alg)(fix(l)) == alg(map(cata(alg), l))",
    )
}

pub fn cata_hylo<F: MappableFrameRef, Out>(
    fixed: &Fix<F>,
    alg: impl Fn(F::Frame<Out>) -> Out,
    eq: impl Fn(&Out, &Out) -> bool,
) -> Result<(), LawViolation> {
    let lhs = fixed.clone().cata(&alg);
    let rhs = hylo::<F, Fix<F>, Out>(fixed.clone(), Fix::unfix, &alg);
    holds(
        eq(&lhs, &rhs),
        "cata",
        "is a hylo",
        "cata(alg) == hylo(unfix, alg)",
    )
}

pub fn cata_reference<F: MappableFrameRef, Out>(
    fixed: &Fix<F>,
    alg: impl Fn(F::Frame<Out>) -> Out,
    eq: impl Fn(&Out, &Out) -> bool,
) -> Result<(), LawViolation> {
    let lhs = fixed.clone().cata(&alg);
    let rhs = reference::cata::<F, Out>(fixed.clone(), &mut |frame| alg(frame));
    holds(
        eq(&lhs, &rhs),
        "cata",
        "matches naive recursion",
        "cata(alg)(t) == alg(map(cata(alg), unfix(t)))",
    )
}

pub fn ana_identity<F: MappableFrameRef>(
    fixed: &Fix<F>,
    eq: impl Fn(&Fix<F>, &Fix<F>) -> bool,
) -> Result<(), LawViolation> {
    let rebuilt = Fix::<F>::ana(fixed.clone(), Fix::unfix);
    holds(eq(&rebuilt, fixed), "ana", "identity", "ana(unfix) == id")
}

pub fn ana_hylo<F: MappableFrame, Seed: Clone>(
    seed: &Seed,
    coalg: impl Fn(Seed) -> F::Frame<Seed>,
    eq: impl Fn(&Fix<F>, &Fix<F>) -> bool,
) -> Result<(), LawViolation> {
    let lhs = Fix::<F>::ana(seed.clone(), &coalg);
    let rhs = hylo::<F, Seed, Fix<F>>(seed.clone(), &coalg, Fix::fix);
    holds(
        eq(&lhs, &rhs),
        "ana",
        "is a hylo",
        "ana(coalg) == hylo(coalg, fix)",
    )
}

pub fn ana_reference<F: MappableFrame, Seed: Clone>(
    seed: &Seed,
    coalg: impl Fn(Seed) -> F::Frame<Seed>,
    eq: impl Fn(&Fix<F>, &Fix<F>) -> bool,
) -> Result<(), LawViolation> {
    let lhs = Fix::<F>::ana(seed.clone(), &coalg);
    let rhs = reference::ana::<F, Seed>(seed.clone(), &mut |seed| coalg(seed));
    holds(
        eq(&lhs, &rhs),
        "ana",
        "matches naive recursion",
        "ana(coalg)(s) == fix(map(ana(coalg), coalg(s)))",
    )
}

/// Fusion: a hylo gives the same answer as building the structure with ana and
/// then folding it with cata.
pub fn hylo_fusion<F: MappableFrame, Seed: Clone, Out>(
    seed: &Seed,
    coalg: impl Fn(Seed) -> F::Frame<Seed>,
    alg: impl Fn(F::Frame<Out>) -> Out,
    eq: impl Fn(&Out, &Out) -> bool,
) -> Result<(), LawViolation> {
    let fused = hylo::<F, Seed, Out>(seed.clone(), &coalg, &alg);
    let unfused = Fix::<F>::ana(seed.clone(), &coalg).cata(&alg);
    let naive = reference::hylo::<F, Seed, Out>(
        seed.clone(),
        &mut |seed| coalg(seed),
        &mut |frame| alg(frame),
    );
    holds(
        eq(&fused, &unfused) && eq(&fused, &naive),
        "hylo",
        "fusion",
        "hylo(coalg, alg) == cata(alg) . ana(coalg)",
    )
}

pub fn para_generalizes_cata<F: MappableFrameRef, Out>(
    fixed: &Fix<F>,
    alg: impl Fn(F::Frame<Out>) -> Out,
    eq: impl Fn(&Out, &Out) -> bool,
) -> Result<(), LawViolation> {
    let lhs = fixed.cata(&alg);
    let rhs = fixed.para(|frame: F::Frame<(&Fix<F>, Out)>| {
        alg(F::map_frame(frame, |(_, out)| out))
    });
    holds(
        eq(&lhs, &rhs),
        "para",
        "generalizes cata",
        "para(alg . map(snd)) == cata(alg)",
    )
}

pub fn para_reference<F: MappableFrameRef, Out>(
    fixed: &Fix<F>,
    alg: impl Fn(F::Frame<(&Fix<F>, Out)>) -> Out,
    eq: impl Fn(&Out, &Out) -> bool,
) -> Result<(), LawViolation> {
    let lhs = fixed.para(&alg);
    let rhs = reference::para::<F, Out>(fixed, &mut |frame| alg(frame));
    holds(
        eq(&lhs, &rhs),
        "para",
        "matches naive recursion",
        "para(alg)(t) == alg(map(t' => (t', para(alg)(t')), unfix(t)))",
    )
}

/// A zygomorphism sees what a paramorphism would see if it reran the helper
/// over each substructure.
pub fn zygo_generalizes_para<F: MappableFrameRef, Helper: Clone, Out>(
    fixed: &Fix<F>,
    helper: impl Fn(F::Frame<Helper>) -> Helper,
    alg: impl Fn(F::Frame<(Helper, Out)>) -> Out,
    eq: impl Fn(&Out, &Out) -> bool,
) -> Result<(), LawViolation> {
    let lhs = fixed.para(|frame: F::Frame<(&Fix<F>, Out)>| {
        alg(F::map_frame(frame, |(sub, out)| (sub.cata(&helper), out)))
    });
    let rhs = fixed.zygo(&helper, &alg);
    holds(
        eq(&lhs, &rhs),
        "zygo",
        "generalizes para",
        "zygo(alg, helper) == para(alg . map((t, b) => (cata(helper)(t), b)))",
    )
}

pub fn histo_generalizes_cata<F: MappableFrameRef, Out: Clone>(
    fixed: &Fix<F>,
    alg: impl Fn(F::Frame<Out>) -> Out,
    eq: impl Fn(&Out, &Out) -> bool,
) -> Result<(), LawViolation> {
    let lhs = fixed.cata(&alg);
    let rhs = fixed.histo(|frame: F::Frame<&History<F, Out>>| {
        alg(F::map_frame(frame, |history| history.head().clone()))
    });
    holds(
        eq(&lhs, &rhs),
        "histo",
        "generalizes cata",
        "histo(alg . map(head)) == cata(alg)",
    )
}

pub fn apo_generalizes_ana<F: MappableFrame, Seed: Clone>(
    seed: &Seed,
    coalg: impl Fn(Seed) -> F::Frame<Seed>,
    eq: impl Fn(&Fix<F>, &Fix<F>) -> bool,
) -> Result<(), LawViolation> {
    let lhs = Fix::<F>::ana(seed.clone(), &coalg);
    let rhs = Fix::<F>::apo(seed.clone(), |seed| F::map_frame(coalg(seed), Either::Right));
    holds(
        eq(&lhs, &rhs),
        "apo",
        "generalizes ana",
        "apo(map(Right) . coalg) == ana(coalg)",
    )
}

/// Traversing with no effect is `map_frame`, and slots are visited in the same
/// order by both.
pub fn traverse_identity<F: TraversableFrame + MappableFrameRef>(
    fixed: &Fix<F>,
    eq: impl Fn(&Fix<F>, &Fix<F>) -> bool,
) -> Result<(), LawViolation> {
    let traversed = Fix::fix(F::traverse_frame::<Identity, _, _>(
        fixed.clone().unfix(),
        |child| child,
    ));
    holds(
        eq(&traversed, fixed),
        "traverse",
        "identity",
        "traverse::<Identity>(id) == id",
    )?;

    let mut mapped_order: Vec<*const Fix<F>> = Vec::new();
    F::map_frame(F::as_ref(fixed.layer()), |child| {
        mapped_order.push(child as *const Fix<F>)
    });

    let mut traversed_order: Vec<*const Fix<F>> = Vec::new();
    let _ = F::traverse_frame::<Identity, _, ()>(F::as_ref(fixed.layer()), |child| {
        traversed_order.push(child as *const Fix<F>)
    });

    holds(
        mapped_order == traversed_order,
        "traverse",
        "slot order",
        "traverse visits slots in map_frame order",
    )
}

/// With a failing effect, the failure that surfaces is the left-most one.
pub fn traverse_left_most_failure<F: TraversableFrame + MappableFrameRef>(
    fixed: &Fix<F>,
) -> Result<(), LawViolation> {
    let mut slots = 0usize;
    let res = F::traverse_frame::<Fallible<usize>, _, ()>(F::as_ref(fixed.layer()), |_| {
        slots += 1;
        Err(slots - 1)
    });

    let ok = match res {
        Ok(_) => slots == 0,
        Err(first) => first == 0,
    };
    holds(
        ok,
        "traverse",
        "left-most failure",
        "traverse::<Fallible>(f) fails with the first slot's error",
    )
}
