use crate::expr::*;
use morphism::{Collapsible, Expandable, ExpandableExt, PartiallyApplied};
use proptest::prelude::*;

/// simple naive representation of a recursive expression AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    LiteralInt(i64),
}

impl Expr {
    pub fn to_tree(&self) -> ExprTree {
        ExprTree::ana(self, generate_layer)
    }

    pub fn from_tree(tree: &ExprTree) -> Self {
        Expr::ana(tree, |tree| ExprFrame::<PartiallyApplied>::as_ref(tree.layer()))
    }
}

impl<'a> Collapsible for &'a Expr {
    type FrameToken = ExprFrame<PartiallyApplied>;

    #[inline(always)]
    fn into_frame(self) -> <Self::FrameToken as MappableFrame>::Frame<Self> {
        generate_layer(self)
    }
}

impl Collapsible for Expr {
    type FrameToken = ExprFrame<PartiallyApplied>;

    #[inline(always)]
    fn into_frame(self) -> <Self::FrameToken as MappableFrame>::Frame<Self> {
        match self {
            Expr::Add(a, b) => ExprFrame::Add(*a, *b),
            Expr::Sub(a, b) => ExprFrame::Sub(*a, *b),
            Expr::Mul(a, b) => ExprFrame::Mul(*a, *b),
            Expr::LiteralInt(x) => ExprFrame::LiteralInt(x),
        }
    }
}

impl Expandable for Expr {
    type FrameToken = ExprFrame<PartiallyApplied>;

    fn from_frame(val: <Self::FrameToken as MappableFrame>::Frame<Self>) -> Self {
        match val {
            ExprFrame::Add(a, b) => Expr::Add(Box::new(a), Box::new(b)),
            ExprFrame::Sub(a, b) => Expr::Sub(Box::new(a), Box::new(b)),
            ExprFrame::Mul(a, b) => Expr::Mul(Box::new(a), Box::new(b)),
            ExprFrame::LiteralInt(x) => Expr::LiteralInt(x),
        }
    }
}

pub fn generate_layer(x: &Expr) -> ExprFrame<&Expr> {
    match x {
        Expr::Add(a, b) => ExprFrame::Add(a, b),
        Expr::Sub(a, b) => ExprFrame::Sub(a, b),
        Expr::Mul(a, b) => ExprFrame::Mul(a, b),
        Expr::LiteralInt(x) => ExprFrame::LiteralInt(*x),
    }
}

pub fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![any::<i8>().prop_map(|x| Expr::LiteralInt(x as i64)),];
    leaf.prop_recursive(
        8,   // 8 levels deep
        256, // Shoot for maximum size of 256 nodes
        10,  // We put up to 10 items per collection
        |inner| {
            prop_oneof![
                (inner.clone(), inner.clone())
                    .prop_map(|(a, b)| Expr::Add(Box::new(a), Box::new(b))),
                (inner.clone(), inner.clone())
                    .prop_map(|(a, b)| Expr::Sub(Box::new(a), Box::new(b))),
                (inner.clone(), inner).prop_map(|(a, b)| Expr::Mul(Box::new(a), Box::new(b))),
            ]
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn tree_conversion_preserves_structure(expr in arb_expr()) {
            let tree = expr.to_tree();
            prop_assert_eq!(Expr::from_tree(&tree), expr.clone());
            prop_assert!(tree_eq(&tree, &tree.clone()));
        }
    }

    #[test]
    fn tree_eq_sees_operator_and_literal_changes() {
        let a = Expr::Add(Box::new(Expr::LiteralInt(1)), Box::new(Expr::LiteralInt(2)));
        let b = Expr::Sub(Box::new(Expr::LiteralInt(1)), Box::new(Expr::LiteralInt(2)));
        let c = Expr::Add(Box::new(Expr::LiteralInt(1)), Box::new(Expr::LiteralInt(3)));

        assert!(tree_eq(&a.to_tree(), &a.to_tree()));
        assert!(!tree_eq(&a.to_tree(), &b.to_tree()));
        assert!(!tree_eq(&a.to_tree(), &c.to_tree()));
    }
}
