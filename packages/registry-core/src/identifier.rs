//! Stable, reference-counted handle to a [`Descriptor`].

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::descriptor::Descriptor;

/// Opaque, equality-comparable, hashable handle to a [`Descriptor`].
///
/// Two `Identifier`s are equal iff they reference the same `Descriptor`
/// instance -- comparison is by identity, never by descriptor content. An
/// `Identifier` remains valid for equality comparison even after its
/// descriptor's status becomes `Deregistered`; this is what lets the
/// payload cache locate and purge the entry for a just-deregistered file.
#[derive(Debug, Clone)]
pub struct Identifier(pub(crate) Arc<Descriptor>);

impl Identifier {
    pub(crate) fn new(descriptor: Arc<Descriptor>) -> Self {
        Self(descriptor)
    }

    /// Borrows the underlying descriptor for inspection.
    #[must_use]
    pub fn descriptor(&self) -> &Descriptor {
        &self.0
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::LocalFileDescriptor;

    #[test]
    fn equality_is_by_identity_not_content() {
        let a = Descriptor::new(LocalFileDescriptor::new("de", 1, "/tmp/de.map"), 1, 17);
        let b = Descriptor::new(LocalFileDescriptor::new("de", 1, "/tmp/de.map"), 1, 17);
        let id_a1 = Identifier::new(a.clone());
        let id_a2 = Identifier::new(a);
        let id_b = Identifier::new(b);

        assert_eq!(id_a1, id_a2);
        assert_ne!(id_a1, id_b);
    }
}
