use std::{
    convert::Infallible,
    fmt::Display,
    path::{Path, PathBuf},
};

use morphism::{Collapsible, Expandable, MappableFrame};
use serde::Serialize;
use thiserror::Error;

pub type VizNodeId = u32;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("failed to serialize visualization")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write visualization to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VizSeed {
    pub node_id: VizNodeId,
    pub txt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "typ", rename_all = "snake_case")]
pub enum VizAction {
    // expand a seed to a node, with new child seeds if any
    ExpandSeed {
        target_id: VizNodeId,
        txt: String,
        seeds: Vec<VizSeed>,
    },
    // collapse node to value, removing all child nodes
    CollapseNode { target_id: VizNodeId, txt: String },
    // free-form note shown between steps
    InfoCard {
        info_header: String,
        info_txt: String,
    },
}

/// The recorded steps of one or more runs, starting from a root seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Viz {
    root: VizSeed,
    actions: Vec<VizAction>,
}

impl Viz {
    pub fn root(&self) -> &VizSeed {
        &self.root
    }

    pub fn actions(&self) -> &[VizAction] {
        &self.actions
    }

    /// Prepend an info card to this run.
    pub fn label(mut self, info_header: String, info_txt: String) -> Self {
        self.actions.insert(
            0,
            VizAction::InfoCard {
                info_header,
                info_txt,
            },
        );
        self
    }

    /// Append `next` to this run, separated by an info card. The root seed of
    /// `self` is kept.
    pub fn fuse(mut self, next: Self, info_header: String, info_txt: String) -> Self {
        self.actions.push(VizAction::InfoCard {
            info_header,
            info_txt,
        });
        self.actions.extend(next.actions);
        self
    }

    pub fn to_json(&self) -> Result<String, VizError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), VizError> {
        let path = path.as_ref();
        let json = self.to_json()?;

        std::fs::write(path, json).map_err(|source| VizError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), actions = self.actions.len(), "wrote visualization");
        Ok(())
    }
}

pub trait CollapsibleVizExt: Collapsible
where
    Self: Display,
    <Self::FrameToken as MappableFrame>::Frame<()>: Display,
{
    /// [`morphism::CollapsibleExt::cata`], recording each step
    fn cata_v<Out: Display>(
        self,
        collapse_frame: impl FnMut(<Self::FrameToken as MappableFrame>::Frame<Out>) -> Out,
    ) -> (Out, Viz) {
        expand_and_collapse_v::<Self::FrameToken, Self, Out>(self, Self::into_frame, collapse_frame)
    }

    /// [`morphism::CollapsibleExt::try_cata`], recording each step up to the
    /// first error
    fn try_cata_v<Out: Display, E: Display>(
        self,
        collapse_frame: impl FnMut(<Self::FrameToken as MappableFrame>::Frame<Out>) -> Result<Out, E>,
    ) -> (Result<Out, E>, Viz) {
        try_expand_and_collapse_v::<Self::FrameToken, Self, Out, E>(
            self,
            |x| Ok(Self::into_frame(x)),
            collapse_frame,
        )
    }
}

impl<X: Collapsible> CollapsibleVizExt for X
where
    X: Display,
    <X::FrameToken as MappableFrame>::Frame<()>: Display,
{
}

pub trait ExpandableVizExt: Expandable
where
    Self: Display,
    <Self::FrameToken as MappableFrame>::Frame<()>: Display,
{
    /// [`morphism::ExpandableExt::ana`], recording each step
    fn ana_v<In: Display>(
        input: In,
        expand_frame: impl FnMut(In) -> <Self::FrameToken as MappableFrame>::Frame<In>,
    ) -> (Self, Viz) {
        expand_and_collapse_v::<Self::FrameToken, In, Self>(input, expand_frame, Self::from_frame)
    }
}

impl<X: Expandable> ExpandableVizExt for X
where
    X: Display,
    <X::FrameToken as MappableFrame>::Frame<()>: Display,
{
}

/// [`morphism::expand_and_collapse`], recording each step.
pub fn expand_and_collapse_v<F, Seed, Out>(
    seed: Seed,
    mut expand_frame: impl FnMut(Seed) -> F::Frame<Seed>,
    mut collapse_frame: impl FnMut(F::Frame<Out>) -> Out,
) -> (Out, Viz)
where
    F: MappableFrame,
    F::Frame<()>: Display,
    Seed: Display,
    Out: Display,
{
    let (res, viz) = try_expand_and_collapse_v::<F, Seed, Out, Infallible>(
        seed,
        |seed| Ok(expand_frame(seed)),
        |frame| Ok(collapse_frame(frame)),
    );

    match res {
        Ok(out) => (out, viz),
        Err(never) => match never {},
    }
}

/// [`morphism::try_expand_and_collapse`], recording each step. On failure, the
/// recording ends with an info card describing the error.
pub fn try_expand_and_collapse_v<F, Seed, Out, E>(
    seed: Seed,
    mut expand_frame: impl FnMut(Seed) -> Result<F::Frame<Seed>, E>,
    mut collapse_frame: impl FnMut(F::Frame<Out>) -> Result<Out, E>,
) -> (Result<Out, E>, Viz)
where
    F: MappableFrame,
    E: Display,
    F::Frame<()>: Display,
    Seed: Display,
    Out: Display,
{
    enum State<Seed, Pending> {
        Expand(VizNodeId, Seed),
        // frame awaiting the values of its `usize` slots
        Collapse(VizNodeId, Pending, usize),
    }

    let root = VizSeed {
        node_id: 0,
        txt: seed.to_string(),
    };
    let finish = |actions: Vec<VizAction>| Viz {
        root: root.clone(),
        actions,
    };

    let mut next_id: VizNodeId = 1; // 0 is the root
    let mut actions = Vec::new();
    let mut vals: Vec<Out> = Vec::new();
    let mut stack = vec![State::Expand(0, seed)];

    while let Some(item) = stack.pop() {
        match item {
            State::Expand(node_id, seed) => {
                let node = match expand_frame(seed) {
                    Ok(node) => node,
                    Err(e) => {
                        tracing::debug!(node_id, "expand failed");
                        actions.push(VizAction::InfoCard {
                            info_header: "Error during expand!".to_string(),
                            info_txt: format!("error: {}", e),
                        });
                        return (Err(e), finish(actions));
                    }
                };

                let mut seeds = Vec::new();
                let mut children = Vec::new();
                let node = F::map_frame(node, |seed| {
                    let child_id = next_id;
                    next_id += 1;
                    seeds.push(VizSeed {
                        node_id: child_id,
                        txt: seed.to_string(),
                    });
                    children.push(State::Expand(child_id, seed));
                });

                actions.push(VizAction::ExpandSeed {
                    target_id: node_id,
                    txt: node.to_string(),
                    seeds,
                });
                stack.push(State::Collapse(node_id, node, children.len()));
                // reversed, so the left-most seed is expanded first
                stack.extend(children.into_iter().rev());
            }
            State::Collapse(node_id, node, slots) => {
                let node = {
                    let first = vals.len() - slots;
                    let mut children = vals.drain(first..);
                    F::map_frame(node, |_: ()| {
                        children.next().expect("one collapsed value per slot")
                    })
                };

                let out = match collapse_frame(node) {
                    Ok(out) => out,
                    Err(e) => {
                        tracing::debug!(node_id, "collapse failed");
                        actions.push(VizAction::InfoCard {
                            info_header: "Error during collapse!".to_string(),
                            info_txt: format!("error: {}", e),
                        });
                        return (Err(e), finish(actions));
                    }
                };

                actions.push(VizAction::CollapseNode {
                    target_id: node_id,
                    txt: out.to_string(),
                });
                vals.push(out);
            }
        }
    }

    let out = vals.pop().expect("root value is collapsed last");
    actions.push(VizAction::InfoCard {
        info_header: "Completed".to_string(),
        info_txt: format!("result: {}", out),
    });
    tracing::trace!(actions = actions.len(), "visualized run finished");

    (Ok(out), finish(actions))
}
