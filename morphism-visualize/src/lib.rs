//! Run a hylomorphism while recording every expand and collapse step, for
//! debugging or for rendering the traversal as an animation.
//!
//! Seeds, frames and outputs are captured through their [`std::fmt::Display`]
//! impls; the recorded [`visualize::Viz`] serializes to JSON.

pub mod visualize;

pub use visualize::{
    expand_and_collapse_v, try_expand_and_collapse_v, CollapsibleVizExt, ExpandableVizExt, Viz,
    VizAction, VizError, VizNodeId, VizSeed,
};
