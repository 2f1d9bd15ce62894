//! Node handles and the constructible capability

use crate::capability::Capability;
use crate::meta::{Discriminator, ExternalDocumentation, Xml};
use crate::schema::Schema;

/// Mutate-and-return-self, shared by every fluent setter.
///
/// Handles are reference counted, so the returned value is the same node as
/// the receiver, never a copy.
pub trait Fluent: Clone {
    fn chain(&self, mutate: impl FnOnce(&Self)) -> Self {
        mutate(self);
        self.clone()
    }
}

/// A node type the construction registry can produce
pub trait Constructible: Fluent + Sized {
    const CAPABILITY: Capability;

    /// Narrow a node of unknown kind, `None` if it is of another kind
    fn from_node(node: ModelNode) -> Option<Self>;

    fn into_node(self) -> ModelNode;
}

/// A handle to any node in the model
#[derive(Debug, Clone, PartialEq)]
pub enum ModelNode {
    Schema(Schema),
    Discriminator(Discriminator),
    Xml(Xml),
    ExternalDocumentation(ExternalDocumentation),
}

impl ModelNode {
    /// The capability this node was built for
    pub fn capability(&self) -> Capability {
        match self {
            ModelNode::Schema(_) => Capability::Schema,
            ModelNode::Discriminator(_) => Capability::Discriminator,
            ModelNode::Xml(_) => Capability::Xml,
            ModelNode::ExternalDocumentation(_) => Capability::ExternalDocumentation,
        }
    }

    /// Whether both handles point at the same node
    pub fn ptr_eq(&self, other: &ModelNode) -> bool {
        match (self, other) {
            (ModelNode::Schema(a), ModelNode::Schema(b)) => a.ptr_eq(b),
            (ModelNode::Discriminator(a), ModelNode::Discriminator(b)) => a.ptr_eq(b),
            (ModelNode::Xml(a), ModelNode::Xml(b)) => a.ptr_eq(b),
            (ModelNode::ExternalDocumentation(a), ModelNode::ExternalDocumentation(b)) => {
                a.ptr_eq(b)
            }
            _ => false,
        }
    }

    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            ModelNode::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    /// Narrow to a concrete node type
    pub fn downcast<T: Constructible>(self) -> Option<T> {
        T::from_node(self)
    }
}
