use crate::{
    frame::{MappableFrame, MappableFrameRef},
    recursive::{Collapsible, CollapsibleExt, Expandable},
};

/// heap allocated fix point of some frame `F`: one layer of `F` whose slots hold
/// further `Fix<F>` values.
///
/// Built with [`Fix::fix`] (or as the output of `ana`/`apo`), taken apart with
/// [`Fix::unfix`] (or consumed by `cata`/`para`/`zygo`/`histo`). There is no way to
/// mutate a `Fix` in place.
///
/// Dropping and cloning are both done iteratively, so very deep values (eg a list
/// with millions of elements) are safe to discard and copy.
// `None` only once the layer has been moved out by `unfix` or `drop`
pub struct Fix<F: MappableFrame>(Option<Box<F::Frame<Fix<F>>>>);

impl<F: MappableFrame> Fix<F> {
    /// wrap one layer
    pub fn fix(layer: F::Frame<Self>) -> Self {
        Self(Some(Box::new(layer)))
    }

    /// unwrap one layer, the inverse of [`Fix::fix`]
    pub fn unfix(mut self) -> F::Frame<Self> {
        *self.0.take().expect("layer is present until unfix")
    }

    /// the outermost layer, by reference
    pub fn layer(&self) -> &F::Frame<Self> {
        self.0.as_deref().expect("layer is present until unfix")
    }
}

impl<F: MappableFrameRef> Fix<F> {
    /// Paramorphism over an owned value: each slot pairs a borrow of the child
    /// substructure with the value folded from it.
    ///
    /// Substructures are borrowed from `self` rather than copied, so this runs in
    /// memory linear in the size of the input. See [`CollapsibleExt::para`].
    pub fn para<Out>(self, collapse_frame: impl FnMut(F::Frame<(&Self, Out)>) -> Out) -> Out {
        CollapsibleExt::para(&self, collapse_frame)
    }
}

impl<F: MappableFrame> Drop for Fix<F> {
    fn drop(&mut self) {
        let mut pending: Vec<_> = self.0.take().into_iter().collect();

        while let Some(layer) = pending.pop() {
            F::map_frame(*layer, |mut child: Fix<F>| pending.extend(child.0.take()));
        }
    }
}

impl<F: MappableFrameRef> Clone for Fix<F> {
    fn clone(&self) -> Self {
        self.cata(Fix::<F>::fix)
    }
}

impl<F: MappableFrame> Collapsible for Fix<F> {
    type FrameToken = F;

    fn into_frame(self) -> F::Frame<Self> {
        self.unfix()
    }
}

impl<'a, F: MappableFrameRef + 'a> Collapsible for &'a Fix<F> {
    type FrameToken = F;

    fn into_frame(self) -> F::Frame<Self> {
        F::as_ref(self.layer())
    }
}

impl<F: MappableFrame> Expandable for Fix<F> {
    type FrameToken = F;

    fn from_frame(val: F::Frame<Self>) -> Self {
        Fix::fix(val)
    }
}
