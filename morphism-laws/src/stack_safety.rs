//! Every scheme on structures far deeper than naive recursion survives on a test
//! thread's stack.

use morphism::{hylo, CollapsibleExt, ExpandableExt};

use crate::expr::{eval::eval_layer, ExprFrame, ExprTree};
use crate::list::*;
use crate::reference;

const DEPTH: usize = 20_000;

fn deep() -> List<i64> {
    from_vec((1..=DEPTH as i64).collect())
}

#[test]
fn cata() {
    assert_eq!(count(deep()), DEPTH);
    assert_eq!(sum(&deep()), (DEPTH * (DEPTH + 1) / 2) as i64);
}

#[test]
fn ana() {
    let built = range(DEPTH as i64);
    let elems = to_vec(&built);
    assert_eq!(elems.len(), DEPTH);
    assert_eq!(elems.first(), Some(&(DEPTH as i64)));
    assert_eq!(elems.last(), Some(&1));
}

#[test]
fn hylo_without_intermediate_structure() {
    let total = hylo::<ListToken<i64>, i64, i64>(
        DEPTH as i64,
        |n| if n > 0 { ListFrame::Cons(n, n - 1) } else { ListFrame::Nil },
        |frame| match frame {
            ListFrame::Cons(elem, acc) => elem + acc,
            ListFrame::Nil => 0,
        },
    );
    assert_eq!(total, (DEPTH * (DEPTH + 1) / 2) as i64);
}

#[test]
fn para() {
    assert_eq!(ascents(&deep()), DEPTH - 1);
}

#[test]
fn para_over_owned_list() {
    let ascents = deep().para(|frame: ListFrame<i64, (&List<i64>, usize)>| match frame {
        ListFrame::Cons(elem, (rest, acc)) => match rest.layer() {
            ListFrame::Cons(next, _) if *next > elem => acc + 1,
            _ => acc,
        },
        ListFrame::Nil => 0,
    });
    assert_eq!(ascents, DEPTH - 1);
}

#[test]
fn zygo() {
    // with a helper counting the remaining length, every element `i` of `1..=N`
    // satisfies `i + remaining == N`
    let list = deep();
    let matching = list.zygo(
        |frame: ListFrame<i64, usize>| match frame {
            ListFrame::Cons(_, len) => len + 1,
            ListFrame::Nil => 0,
        },
        |frame: ListFrame<i64, (usize, usize)>| match frame {
            ListFrame::Cons(elem, (remaining, acc)) => {
                acc + usize::from(elem as usize + remaining == DEPTH)
            }
            ListFrame::Nil => 0,
        },
    );
    assert_eq!(matching, DEPTH);
}

#[test]
fn histo() {
    let half = (DEPTH / 2) as i64;
    assert_eq!(odds_sum(&deep()), half * half);
}

#[test]
fn apo() {
    let list = deep();
    let untouched = take_until(&list, &-1);
    assert_eq!(count(untouched), DEPTH);

    let cut = take_until(&list, &((DEPTH / 2) as i64 + 1));
    assert_eq!(count(cut), DEPTH / 2);
}

#[test]
fn apo_splices_long_remainder() {
    let grown = insert(0, deep());
    assert_eq!(count(grown), DEPTH + 1);

    let appended = insert(DEPTH as i64 + 1, deep());
    let elems = to_vec(&appended);
    assert_eq!(elems.len(), DEPTH + 1);
    assert_eq!(elems.last(), Some(&(DEPTH as i64 + 1)));
}

#[test]
fn clone_and_drop() {
    let list = deep();
    let copy = list.clone();
    drop(list);
    assert_eq!(count(copy), DEPTH);
}

#[test]
fn left_deep_expression() {
    // ((1 + 1) + 1) + ... with DEPTH additions
    let tree = ExprTree::ana(DEPTH, |n: usize| {
        if n == 0 {
            ExprFrame::LiteralInt(1)
        } else {
            ExprFrame::Add(n - 1, 0)
        }
    });

    assert_eq!((&tree).cata(eval_layer), (DEPTH + 1) as i64);
}

#[test]
fn matches_reference_for_small_inputs() {
    for n in 0..50 {
        let list = from_vec((0..n).collect::<Vec<i64>>());

        let naive = reference::cata::<ListToken<i64>, usize>(list.clone(), &mut |frame| {
            match frame {
                ListFrame::Cons(_, n) => n + 1,
                ListFrame::Nil => 0,
            }
        });
        assert_eq!(count(list.clone()), naive);

        let naive_range = reference::ana::<ListToken<i64>, i64>(n, &mut |n| {
            if n > 0 {
                ListFrame::Cons(n, n - 1)
            } else {
                ListFrame::Nil
            }
        });
        assert_eq!(to_vec(&range(n)), to_vec(&naive_range));

        let naive_ascents = reference::para::<ListToken<i64>, usize>(&list, &mut |frame| {
            match frame {
                ListFrame::Cons(elem, (rest, acc)) => match rest.layer() {
                    ListFrame::Cons(next, _) if *next > elem => acc + 1,
                    _ => acc,
                },
                ListFrame::Nil => 0,
            }
        });
        assert_eq!(ascents(&list), naive_ascents);

        let naive_cut = reference::apo::<ListToken<i64>, &List<i64>>(&list, &mut |node| {
            take_until_layer(node, &(n / 2))
        });
        assert!(list_eq(&take_until(&list, &(n / 2)), &naive_cut));

        let naive_inserted = reference::apo::<ListToken<i64>, (i64, List<i64>)>(
            (n / 2, list.clone()),
            &mut insert_layer::<i64>,
        );
        assert!(list_eq(&insert(n / 2, list.clone()), &naive_inserted));
    }
}
