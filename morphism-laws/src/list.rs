//! A cons list built from [`ListFrame`], plus the list schemes used throughout
//! the tests and benchmarks.

use futures::{future::BoxFuture, FutureExt};
use morphism::{
    experimental::AsyncTraversableFrame, CollapsibleExt, Effect, Either, ExpandableExt, Fix,
    History, MappableFrame, MappableFrameRef, PartiallyApplied, TraversableFrame,
};
use proptest::prelude::*;

/// One layer of a cons list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFrame<Elem, Next> {
    Cons(Elem, Next),
    Nil,
}

pub type ListToken<Elem> = ListFrame<Elem, PartiallyApplied>;

pub type List<Elem> = Fix<ListToken<Elem>>;

impl<Elem> MappableFrame for ListFrame<Elem, PartiallyApplied> {
    type Frame<Next> = ListFrame<Elem, Next>;

    fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
        match input {
            ListFrame::Cons(elem, next) => ListFrame::Cons(elem, f(next)),
            ListFrame::Nil => ListFrame::Nil,
        }
    }
}

impl<Elem: Clone> MappableFrameRef for ListFrame<Elem, PartiallyApplied> {
    fn as_ref<'a, X: 'a>(input: &'a Self::Frame<X>) -> Self::Frame<&'a X> {
        match input {
            ListFrame::Cons(elem, next) => ListFrame::Cons(elem.clone(), next),
            ListFrame::Nil => ListFrame::Nil,
        }
    }
}

impl<Elem> TraversableFrame for ListFrame<Elem, PartiallyApplied> {
    fn traverse_frame<Eff: Effect, A, B>(
        input: Self::Frame<A>,
        mut f: impl FnMut(A) -> Eff::Of<B>,
    ) -> Eff::Of<Self::Frame<B>> {
        match input {
            ListFrame::Cons(elem, next) => Eff::map(f(next), move |next| ListFrame::Cons(elem, next)),
            ListFrame::Nil => Eff::pure(ListFrame::Nil),
        }
    }
}

impl<Elem: Send + 'static> AsyncTraversableFrame for ListFrame<Elem, PartiallyApplied> {
    fn traverse_frame_async<'a, A, B, E>(
        input: Self::Frame<A>,
        mut f: impl FnMut(A) -> BoxFuture<'a, Result<B, E>> + Send + 'a,
    ) -> BoxFuture<'a, Result<Self::Frame<B>, E>>
    where
        A: Send + 'a,
        B: Send + 'a,
        E: Send + 'a,
    {
        match input {
            ListFrame::Cons(elem, next) => {
                let next = f(next);
                async move { Ok(ListFrame::Cons(elem, next.await?)) }.boxed()
            }
            ListFrame::Nil => futures::future::ready(Ok(ListFrame::Nil)).boxed(),
        }
    }
}

pub fn from_vec<Elem>(elems: Vec<Elem>) -> List<Elem> {
    List::<Elem>::ana(elems.into_iter(), |mut rest| match rest.next() {
        Some(elem) => ListFrame::Cons(elem, rest),
        None => ListFrame::Nil,
    })
}

pub fn to_vec<Elem: Clone>(list: &List<Elem>) -> Vec<Elem> {
    let mut reversed = list.cata(|frame: ListFrame<Elem, Vec<Elem>>| match frame {
        ListFrame::Cons(elem, mut acc) => {
            acc.push(elem);
            acc
        }
        ListFrame::Nil => Vec::new(),
    });
    reversed.reverse();
    reversed
}

/// number of elements, consuming the list
pub fn count<Elem>(list: List<Elem>) -> usize {
    list.cata(|frame: ListFrame<Elem, usize>| match frame {
        ListFrame::Cons(_, n) => n + 1,
        ListFrame::Nil => 0,
    })
}

pub fn sum(list: &List<i64>) -> i64 {
    list.cata(|frame: ListFrame<i64, i64>| match frame {
        ListFrame::Cons(elem, acc) => elem.wrapping_add(acc),
        ListFrame::Nil => 0,
    })
}

/// `n, n - 1, ..., 1`
pub fn range(n: i64) -> List<i64> {
    List::<i64>::ana(n, |n| {
        if n > 0 {
            ListFrame::Cons(n, n - 1)
        } else {
            ListFrame::Nil
        }
    })
}

/// Everything before the first occurrence of `sentinel`.
///
/// As soon as the next element is the sentinel (or there is none), the tail is
/// finished with an empty list instead of being unfolded any further.
pub fn take_until<Elem: Clone + PartialEq>(list: &List<Elem>, sentinel: &Elem) -> List<Elem> {
    List::<Elem>::apo(list, |node| take_until_layer(node, sentinel))
}

/// One step of [`take_until`]: copy `node`'s element unless it is the sentinel, and
/// stop early when the next one is.
pub fn take_until_layer<'a, Elem: Clone + PartialEq>(
    node: &'a List<Elem>,
    sentinel: &Elem,
) -> ListFrame<Elem, Either<List<Elem>, &'a List<Elem>>> {
    match node.layer() {
        ListFrame::Cons(elem, _) if elem == sentinel => ListFrame::Nil,
        ListFrame::Cons(elem, rest) => match rest.layer() {
            ListFrame::Cons(next, _) if next != sentinel => {
                ListFrame::Cons(elem.clone(), Either::Right(rest))
            }
            _ => ListFrame::Cons(elem.clone(), Either::Left(Fix::fix(ListFrame::Nil))),
        },
        ListFrame::Nil => ListFrame::Nil,
    }
}

/// Insert `elem` into an ascending list. Everything after the insertion point is
/// reused as-is.
pub fn insert<Elem: PartialOrd>(elem: Elem, list: List<Elem>) -> List<Elem> {
    List::<Elem>::apo((elem, list), insert_layer)
}

pub fn insert_layer<Elem: PartialOrd>(
    (elem, list): (Elem, List<Elem>),
) -> ListFrame<Elem, Either<List<Elem>, (Elem, List<Elem>)>> {
    match list.unfix() {
        ListFrame::Cons(head, rest) if elem > head => {
            ListFrame::Cons(head, Either::Right((elem, rest)))
        }
        ListFrame::Cons(head, rest) => {
            ListFrame::Cons(elem, Either::Left(Fix::fix(ListFrame::Cons(head, rest))))
        }
        ListFrame::Nil => ListFrame::Cons(elem, Either::Left(Fix::fix(ListFrame::Nil))),
    }
}

/// Every other element, starting with the first. Each layer looks two layers
/// back into its history.
pub fn odds<Elem: Clone>(list: &List<Elem>) -> Vec<Elem> {
    let mut reversed = list.histo(
        |frame: ListFrame<Elem, &History<ListToken<Elem>, Vec<Elem>>>| match frame {
            ListFrame::Cons(elem, rest) => {
                let mut kept = match rest.tail() {
                    ListFrame::Cons(_, after) => after.head().clone(),
                    ListFrame::Nil => Vec::new(),
                };
                kept.push(elem);
                kept
            }
            ListFrame::Nil => Vec::new(),
        },
    );
    reversed.reverse();
    reversed
}

/// Sum of every other element, starting with the first.
pub fn odds_sum(list: &List<i64>) -> i64 {
    list.histo(
        |frame: ListFrame<i64, &History<ListToken<i64>, i64>>| match frame {
            ListFrame::Cons(elem, rest) => match rest.tail() {
                ListFrame::Cons(_, after) => elem.wrapping_add(*after.head()),
                ListFrame::Nil => elem,
            },
            ListFrame::Nil => 0,
        },
    )
}

/// How many elements are directly followed by a larger one.
pub fn ascents<Elem: Clone + PartialOrd>(list: &List<Elem>) -> usize {
    list.para(|frame: ListFrame<Elem, (&List<Elem>, usize)>| match frame {
        ListFrame::Cons(elem, (rest, acc)) => match rest.layer() {
            ListFrame::Cons(next, _) if *next > elem => acc + 1,
            _ => acc,
        },
        ListFrame::Nil => 0,
    })
}

/// Every proper suffix, longest first: the rest of the list after each element.
pub fn suffixes<Elem: Clone>(list: &List<Elem>) -> Vec<Vec<Elem>> {
    list.para(
        |frame: ListFrame<Elem, (&List<Elem>, Vec<Vec<Elem>>)>| match frame {
            ListFrame::Cons(_, (rest, acc)) => {
                let mut all = vec![to_vec(rest)];
                all.extend(acc);
                all
            }
            ListFrame::Nil => Vec::new(),
        },
    )
}

/// A handful of list algebras to pick from at random.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAlgebra {
    Sum,
    Length,
    Max,
    AlternatingSum,
    Polynomial,
}

impl ListAlgebra {
    pub fn apply(self, frame: ListFrame<i64, i64>) -> i64 {
        match (self, frame) {
            (_, ListFrame::Nil) => 0,
            (ListAlgebra::Sum, ListFrame::Cons(elem, acc)) => elem.wrapping_add(acc),
            (ListAlgebra::Length, ListFrame::Cons(_, acc)) => acc + 1,
            (ListAlgebra::Max, ListFrame::Cons(elem, acc)) => elem.max(acc),
            (ListAlgebra::AlternatingSum, ListFrame::Cons(elem, acc)) => elem.wrapping_sub(acc),
            (ListAlgebra::Polynomial, ListFrame::Cons(elem, acc)) => {
                acc.wrapping_mul(31).wrapping_add(elem)
            }
        }
    }
}

/// A handful of list coalgebras, all of which terminate on any `u32` seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCoalgebra {
    Countdown,
    Halving,
    Digits,
}

impl ListCoalgebra {
    pub fn apply(self, seed: u32) -> ListFrame<i64, u32> {
        match self {
            _ if seed == 0 => ListFrame::Nil,
            ListCoalgebra::Countdown => ListFrame::Cons(seed as i64, seed - 1),
            ListCoalgebra::Halving => ListFrame::Cons(seed as i64, seed / 2),
            ListCoalgebra::Digits => ListFrame::Cons((seed % 10) as i64, seed / 10),
        }
    }
}

pub fn arb_elems() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000i64..1_000, 0..64)
}

pub fn arb_list_algebra() -> impl Strategy<Value = ListAlgebra> {
    prop_oneof![
        Just(ListAlgebra::Sum),
        Just(ListAlgebra::Length),
        Just(ListAlgebra::Max),
        Just(ListAlgebra::AlternatingSum),
        Just(ListAlgebra::Polynomial),
    ]
}

pub fn arb_list_coalgebra() -> impl Strategy<Value = ListCoalgebra> {
    prop_oneof![
        Just(ListCoalgebra::Countdown),
        Just(ListCoalgebra::Halving),
        Just(ListCoalgebra::Digits),
    ]
}

pub fn arb_seed() -> impl Strategy<Value = u32> {
    0u32..300
}

pub fn list_eq<Elem: Clone + PartialEq>(a: &List<Elem>, b: &List<Elem>) -> bool {
    to_vec(a) == to_vec(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_element_scenario() {
        assert_eq!(count(from_vec(vec![1, 2, 3, 4, 5])), 5);
        assert_eq!(to_vec(&range(5)), vec![5, 4, 3, 2, 1]);

        let with_stop = from_vec(vec![1, 2, -1, 4, 5]);
        let prefix = take_until(&with_stop, &-1);
        let truncated: Vec<i64> = to_vec(&with_stop).into_iter().take_while(|x| *x != -1).collect();
        assert_eq!(to_vec(&prefix), truncated);
        assert_eq!(to_vec(&prefix), vec![1, 2]);
    }

    #[test]
    fn take_until_edges() {
        assert!(to_vec(&take_until(&from_vec(vec![-1, 2]), &-1)).is_empty());
        assert!(to_vec(&take_until(&from_vec(Vec::new()), &-1)).is_empty());
        assert_eq!(to_vec(&take_until(&from_vec(vec![3, 4]), &-1)), vec![3, 4]);
    }

    #[test]
    fn insert_keeps_order() {
        let list = from_vec(vec![1, 3, 5, 7]);
        assert_eq!(to_vec(&insert(4, list)), vec![1, 3, 4, 5, 7]);
        assert_eq!(to_vec(&insert(0, from_vec(vec![1]))), vec![0, 1]);
        assert_eq!(to_vec(&insert(9, from_vec(Vec::new()))), vec![9]);
    }

    #[test]
    fn odds_and_ascents() {
        let list = from_vec((1..=9).collect());
        assert_eq!(odds(&list), vec![1, 3, 5, 7, 9]);
        assert_eq!(odds_sum(&list), 25);
        assert_eq!(ascents(&list), 8);
        assert_eq!(ascents(&from_vec(vec![3, 1, 2, 2, 5])), 2);
        assert!(odds(&from_vec(Vec::<i64>::new())).is_empty());
    }

    #[test]
    fn suffixes_via_para() {
        let list = from_vec(vec![1, 2, 3]);
        assert_eq!(suffixes(&list), vec![vec![2, 3], vec![3], vec![]]);
        assert!(suffixes(&from_vec(Vec::<i64>::new())).is_empty());
    }

    #[test]
    fn coalgebras_terminate() {
        let digits = List::<i64>::ana(1234u32, |seed| ListCoalgebra::Digits.apply(seed));
        assert_eq!(to_vec(&digits), vec![4, 3, 2, 1]);

        let halving = List::<i64>::ana(10u32, |seed| ListCoalgebra::Halving.apply(seed));
        assert_eq!(to_vec(&halving), vec![10, 5, 2, 1]);
    }

    #[tokio::test]
    async fn cata_async_collapses_children_first() {
        use morphism::experimental::CollapsibleAsync;
        use std::sync::Arc;
        use tokio::sync::Mutex;

        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();

        let total = from_vec(vec![1i64, 2, 3])
            .cata_async(move |frame: ListFrame<i64, i64>| {
                let recorder = recorder.clone();
                async move {
                    match frame {
                        ListFrame::Cons(elem, acc) => {
                            recorder.lock().await.push(elem);
                            Ok::<_, String>(elem + acc)
                        }
                        ListFrame::Nil => Ok(0),
                    }
                }
                .boxed()
            })
            .await;

        assert_eq!(total, Ok(6));
        assert_eq!(*seen.lock().await, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn cata_async_stops_at_first_error() {
        use morphism::experimental::CollapsibleAsync;
        use std::sync::Arc;
        use tokio::sync::Mutex;

        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();

        let total = from_vec(vec![1i64, 2, 3])
            .cata_async(move |frame: ListFrame<i64, i64>| {
                let recorder = recorder.clone();
                async move {
                    match frame {
                        ListFrame::Cons(2, _) => Err("two".to_string()),
                        ListFrame::Cons(elem, acc) => {
                            recorder.lock().await.push(elem);
                            Ok(elem + acc)
                        }
                        ListFrame::Nil => Ok(0),
                    }
                }
                .boxed()
            })
            .await;

        assert_eq!(total, Err("two".to_string()));
        assert_eq!(*seen.lock().await, vec![3]);
    }

    proptest! {
        #[test]
        fn odds_matches_step_by(elems in arb_elems()) {
            let list = from_vec(elems.clone());
            let expected: Vec<i64> = elems.iter().copied().step_by(2).collect();
            prop_assert_eq!(odds(&list), expected);
        }

        #[test]
        fn ascents_matches_windows(elems in arb_elems()) {
            let list = from_vec(elems.clone());
            let expected = elems.windows(2).filter(|w| w[1] > w[0]).count();
            prop_assert_eq!(ascents(&list), expected);
        }

        #[test]
        fn algebras_match_fold(elems in arb_elems(), alg in arb_list_algebra()) {
            let list = from_vec(elems.clone());
            let expected = elems
                .iter()
                .rev()
                .fold(alg.apply(ListFrame::Nil), |acc, elem| alg.apply(ListFrame::Cons(*elem, acc)));
            prop_assert_eq!(list.cata(|frame: ListFrame<i64, i64>| alg.apply(frame)), expected);
        }
    }
}
