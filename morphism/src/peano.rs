use crate::*;

pub enum Peano<Next> {
    Succ(Next),
    Zero,
}

impl MappableFrame for Peano<PartiallyApplied> {
    type Frame<Next> = Peano<Next>;

    fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
        match input {
            Peano::Succ(x) => Peano::Succ(f(x)),
            Peano::Zero => Peano::Zero,
        }
    }
}

impl MappableFrameRef for Peano<PartiallyApplied> {
    fn as_ref<'a, X: 'a>(input: &'a Self::Frame<X>) -> Self::Frame<&'a X> {
        match input {
            Peano::Succ(x) => Peano::Succ(x),
            Peano::Zero => Peano::Zero,
        }
    }
}

impl TraversableFrame for Peano<PartiallyApplied> {
    fn traverse_frame<Eff: Effect, A, B>(
        input: Self::Frame<A>,
        mut f: impl FnMut(A) -> Eff::Of<B>,
    ) -> Eff::Of<Self::Frame<B>> {
        match input {
            Peano::Succ(x) => Eff::map(f(x), Peano::Succ),
            Peano::Zero => Eff::pure(Peano::Zero),
        }
    }
}

impl Collapsible for usize {
    type FrameToken = Peano<PartiallyApplied>;

    fn into_frame(self) -> Peano<usize> {
        if self == 0 {
            Peano::Zero
        } else {
            Peano::Succ(self - 1)
        }
    }
}

impl Expandable for usize {
    type FrameToken = Peano<PartiallyApplied>;

    fn from_frame(val: Peano<usize>) -> Self {
        match val {
            Peano::Succ(n) => n + 1,
            Peano::Zero => 0,
        }
    }
}

type PeanoHistory<A> = History<Peano<PartiallyApplied>, A>;

fn fibonacci_layer(frame: Peano<&PeanoHistory<u64>>) -> u64 {
    match frame {
        Peano::Zero => 0,
        Peano::Succ(prev) => match prev.tail() {
            Peano::Zero => 1,
            Peano::Succ(prev_prev) => prev.head().wrapping_add(*prev_prev.head()),
        },
    }
}

// walks the whole history below each layer
fn even_heads_below_layer(frame: Peano<&PeanoHistory<u64>>) -> u64 {
    let mut cursor = match frame {
        Peano::Zero => return 1,
        Peano::Succ(prev) => prev,
    };
    let mut evens = 0;
    loop {
        evens += u64::from(cursor.head() % 2 == 0);
        match cursor.tail() {
            Peano::Succ(next) => cursor = next,
            Peano::Zero => return evens + 1,
        }
    }
}

fn fibonacci(n: usize) -> u64 {
    n.histo(fibonacci_layer)
}

// plain recursion on the call stack, only for shallow inputs
fn naive_histo<'a, T, Out>(
    input: T,
    alg: &'a mut dyn FnMut(<T::FrameToken as MappableFrame>::Frame<&History<T::FrameToken, Out>>) -> Out,
) -> History<T::FrameToken, Out>
where
    T: Collapsible,
    T::FrameToken: MappableFrameRef + 'a,
{
    let tail = <T::FrameToken as MappableFrame>::map_frame(input.into_frame(), |child| {
        naive_histo::<T, Out>(child, &mut *alg)
    });
    let head = alg(<T::FrameToken as MappableFrameRef>::as_ref(&tail));
    History::new(head, tail)
}

#[test]
fn peano_numbers() {
    let x: usize = 3;

    let peano_repr: String = x.cata(|frame: Peano<String>| match frame {
        Peano::Succ(mut acc) => {
            acc.push_str(" + 1");
            acc
        }
        Peano::Zero => "0".to_string(),
    });

    assert_eq!("0 + 1 + 1 + 1", &peano_repr);
}

#[test]
fn deep_cata() {
    let depth: usize = 1_000_000;

    let counted = depth.cata(|frame: Peano<u64>| match frame {
        Peano::Succ(n) => n + 1,
        Peano::Zero => 0,
    });

    assert_eq!(counted, 1_000_000);
}

#[test]
fn factorial_via_para() {
    let factorial = 5usize.para(|frame: Peano<(usize, u64)>| match frame {
        Peano::Zero => 1,
        Peano::Succ((pred, acc)) => (pred as u64 + 1) * acc,
    });

    assert_eq!(factorial, 120);
}

#[test]
fn fibonacci_via_histo() {
    assert_eq!(fibonacci(0), 0);
    assert_eq!(fibonacci(1), 1);
    assert_eq!(fibonacci(10), 55);
    assert_eq!(fibonacci(90), 2_880_067_194_370_816_120);
}

#[test]
fn histo_matches_naive_recursion() {
    for n in 0..40usize {
        let naive = naive_histo::<usize, u64>(n, &mut fibonacci_layer);
        assert_eq!(n.histo(fibonacci_layer), *naive.head());

        let naive = naive_histo::<usize, u64>(n, &mut even_heads_below_layer).into_head();
        assert_eq!(n.histo(even_heads_below_layer), naive);
    }
}

#[test]
fn deep_histo() {
    // only checks that building and dropping the history does not overflow
    let _ = fibonacci(200_000);
}

#[test]
fn even_count_via_zygo() {
    let evens_below = 10usize.zygo(
        |frame: Peano<bool>| match frame {
            Peano::Zero => true,
            Peano::Succ(is_even) => !is_even,
        },
        |frame: Peano<(bool, usize)>| match frame {
            Peano::Zero => 0,
            Peano::Succ((is_even, acc)) => acc + usize::from(is_even),
        },
    );

    assert_eq!(evens_below, 5);
}

#[test]
fn ana_builds_peano() {
    let n = usize::ana(7u32, |n| if n == 0 { Peano::Zero } else { Peano::Succ(n - 1) });

    assert_eq!(n, 7);
}

#[test]
fn apo_stops_early() {
    let mut expansions = 0;

    let n = usize::apo(1_000usize, |n| {
        expansions += 1;
        if n == 0 {
            Peano::Zero
        } else if n == 500 {
            Peano::Succ(Either::Left(499))
        } else {
            Peano::Succ(Either::Right(n - 1))
        }
    });

    assert_eq!(n, 1_000);
    assert_eq!(expansions, 501);
}

#[test]
fn try_cata_short_circuits() {
    let mut calls = 0;

    let res = 5usize.try_cata(|frame: Peano<usize>| {
        calls += 1;
        match frame {
            Peano::Zero => Ok(0),
            Peano::Succ(3) => Err("three"),
            Peano::Succ(n) => Ok(n + 1),
        }
    });

    assert_eq!(res, Err("three"));
    assert_eq!(calls, 5);
}

#[test]
fn try_ana_short_circuits() {
    let res = usize::try_ana(10u32, |n| match n {
        0 => Ok(Peano::Zero),
        4 => Err(format!("refused to expand {}", n)),
        n => Ok(Peano::Succ(n - 1)),
    });

    assert_eq!(res, Err("refused to expand 4".to_string()));

    let res: Result<usize, String> =
        usize::try_ana(3u32, |n| Ok(if n == 0 { Peano::Zero } else { Peano::Succ(n - 1) }));

    assert_eq!(res, Ok(3));
}

#[test]
fn cata_with_optional() {
    let checked_double = |limit: u8| {
        move |frame: Peano<u8>| match frame {
            Peano::Zero => Some(1),
            Peano::Succ(n) => n.checked_mul(2).filter(|n| *n <= limit),
        }
    };

    assert_eq!(7usize.cata_with::<Optional, u8>(checked_double(200)), Some(128));
    assert_eq!(8usize.cata_with::<Optional, u8>(checked_double(200)), None);
}

#[test]
fn traverse_frame_matches_map_frame() {
    let mapped = Peano::<PartiallyApplied>::map_frame(Peano::Succ(20), |n: u32| n + 1);
    let traversed =
        Peano::<PartiallyApplied>::traverse_frame::<Identity, _, _>(Peano::Succ(20), |n: u32| {
            n + 1
        });

    assert!(matches!((mapped, traversed), (Peano::Succ(21), Peano::Succ(21))));

    let failed = Peano::<PartiallyApplied>::traverse_frame::<Fallible<u32>, u32, u32>(
        Peano::Succ(20),
        Err,
    );
    assert!(matches!(failed, Err(20)));
}
