//! Stack safe recursion schemes over arbitrary pattern functors.
//!
//! A recursive structure is described one layer at a time by a [`MappableFrame`]:
//! a frame type with its recursive positions left open. Given such a frame, this
//! crate provides
//!
//! - [`Fix`], the generic recursive value built from that frame, with
//!   [`Fix::fix`]/[`Fix::unfix`] to wrap and unwrap a layer
//! - [`hylo`] (a.k.a. [`expand_and_collapse`]), a fused unfold-then-fold that never
//!   builds the intermediate structure
//! - `cata`, `para`, `zygo` and `histo` on anything [`Collapsible`], and `ana`
//!   and `apo` on anything [`Expandable`], via [`CollapsibleExt`]/[`ExpandableExt`]
//!
//! Every scheme runs on a single explicit stack machine instead of the call stack,
//! so structures many thousands of layers deep are fine.
//!
//! Effectful algebras and coalgebras are supported through [`Effect`] strategies
//! ([`Identity`], [`Fallible`], [`Optional`]); with the `experimental` feature,
//! async algebras are available via [`experimental::CollapsibleAsync`].

mod driver;
mod effect;
mod either;
mod fix;
mod frame;
mod history;
mod recursive;
mod util;

#[cfg(feature = "experimental")]
pub mod experimental;

#[cfg(test)]
mod peano;

pub use driver::{
    expand_and_collapse, expand_and_collapse as hylo, expand_and_collapse_with,
    try_expand_and_collapse, try_expand_and_collapse as try_hylo,
};
pub use effect::{Effect, Fallible, Identity, Optional};
pub use either::Either;
pub use fix::Fix;
pub use frame::{MappableFrame, MappableFrameRef, PartiallyApplied, TraversableFrame};
pub use history::History;
pub use recursive::{Collapsible, CollapsibleExt, Expandable, ExpandableExt};
pub use util::fanout;
