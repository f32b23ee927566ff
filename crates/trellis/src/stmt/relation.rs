use std::{fmt, marker::PhantomData};

/// A typed reference to a navigation property of `M` holding `R` records.
pub struct Relation<M, R> {
    pub(crate) property: &'static str,
    pub(crate) name: &'static str,
    pub(crate) index: usize,
    pub(crate) collection: bool,
    _p: PhantomData<fn() -> (M, R)>,
}

impl<M, R> Relation<M, R> {
    pub const fn new(
        property: &'static str,
        name: &'static str,
        index: usize,
        collection: bool,
    ) -> Self {
        Self {
            property,
            name,
            index,
            collection,
            _p: PhantomData,
        }
    }

    pub fn property(&self) -> &'static str {
        self.property
    }

    /// The remote relationship name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_collection(&self) -> bool {
        self.collection
    }
}

impl<M, R> Clone for Relation<M, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, R> Copy for Relation<M, R> {}

impl<M, R> fmt::Debug for Relation<M, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("property", &self.property)
            .field("name", &self.name)
            .field("collection", &self.collection)
            .finish()
    }
}
