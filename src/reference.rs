//! Reference Slot
//!
//! A node may name another node with a `$ref` string while still carrying its
//! own keywords. The string is never resolved here.

use crate::node::Fluent;

/// Capability of holding a `$ref`
pub trait Referenceable: Fluent {
    /// Components section a short name expands into (e.g., "schemas")
    const COMPONENT: &'static str;

    #[doc(hidden)]
    fn reference_slot(&self) -> Option<String>;

    #[doc(hidden)]
    fn set_reference_slot(&self, reference: Option<String>);

    /// The stored reference, if any
    fn reference(&self) -> Option<String> {
        self.reference_slot()
    }

    /// Store a reference; local keywords are left untouched.
    ///
    /// A bare name such as `"Pet"` becomes `#/components/schemas/Pet`. `None` or
    /// an empty string clears the slot.
    fn set_reference(&self, reference: Option<String>) {
        let expanded = reference
            .filter(|r| !r.is_empty())
            .map(|r| expand_reference(Self::COMPONENT, &r));
        self.set_reference_slot(expanded);
    }

    fn with_reference(&self, reference: impl Into<String>) -> Self {
        self.chain(|node| node.set_reference(Some(reference.into())))
    }
}

/// Expand a short component name into a local reference, leave anything else verbatim
pub fn expand_reference(component: &str, reference: &str) -> String {
    if reference.contains('/') {
        reference.to_string()
    } else {
        format!("#/components/{}/{}", component, reference)
    }
}
