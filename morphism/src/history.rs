use crate::frame::MappableFrame;

/// The fold history of some subtree, as seen by a histomorphism.
///
/// Each node pairs the value computed for a subtree (`head`) with the frame of
/// histories of its children (`tail`), so an algebra can look back any number of
/// layers without recomputing anything. Only [`crate::CollapsibleExt::histo`]
/// builds these.
pub struct History<F: MappableFrame, A> {
    head: A,
    tail: Tail<F, A>,
}

// `None` only while being dropped
struct Tail<F: MappableFrame, A>(Option<Box<F::Frame<History<F, A>>>>);

impl<F: MappableFrame, A> History<F, A> {
    pub(crate) fn new(head: A, tail: F::Frame<Self>) -> Self {
        Self {
            head,
            tail: Tail(Some(Box::new(tail))),
        }
    }

    /// the value computed for this subtree
    pub fn head(&self) -> &A {
        &self.head
    }

    /// the histories of this subtree's children
    pub fn tail(&self) -> &F::Frame<Self> {
        self.tail.0.as_deref().expect("tail is present until dropped")
    }

    pub fn into_head(self) -> A {
        self.head
    }
}

// drops a frame of histories without recursing on the call stack
impl<F: MappableFrame, A> Drop for Tail<F, A> {
    fn drop(&mut self) {
        let mut pending: Vec<_> = self.0.take().into_iter().collect();

        while let Some(layer) = pending.pop() {
            F::map_frame(*layer, |mut child: History<F, A>| {
                pending.extend(child.tail.0.take())
            });
        }
    }
}
