//! Accessor generators shared by every node type
//!
//! A node is a cheap handle (`Rc<RefCell<Data>>`). `node_handle!` declares the
//! handle plus the capability plumbing, `accessors!` expands one getter, one
//! plain setter and one fluent setter per optional attribute.

/// Declare a node handle around its data struct and wire the shared capabilities.
macro_rules! node_handle {
    ($(#[$meta:meta])* $name:ident, $data:ident, $capability:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            inner: std::rc::Rc<std::cell::RefCell<$data>>,
        }

        impl $name {
            pub(crate) fn empty() -> Self {
                Self {
                    inner: std::rc::Rc::new(std::cell::RefCell::new($data::default())),
                }
            }

            /// Whether both handles point at the same node
            pub fn ptr_eq(&self, other: &Self) -> bool {
                std::rc::Rc::ptr_eq(&self.inner, &other.inner)
            }

            pub(crate) fn addr(&self) -> *const () {
                std::rc::Rc::as_ptr(&self.inner) as *const ()
            }
        }

        /// Handles compare by identity.
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.ptr_eq(other)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("node", &self.addr())
                    .finish_non_exhaustive()
            }
        }

        impl $crate::node::Fluent for $name {}

        impl $crate::extension::Extensible for $name {
            fn extension_store(&self) -> std::cell::Ref<'_, $crate::extension::Extensions> {
                std::cell::Ref::map(self.inner.borrow(), |data| &data.extensions)
            }

            fn extension_store_mut(&self) -> std::cell::RefMut<'_, $crate::extension::Extensions> {
                std::cell::RefMut::map(self.inner.borrow_mut(), |data| &mut data.extensions)
            }
        }

        impl $crate::node::Constructible for $name {
            const CAPABILITY: $crate::capability::Capability =
                $crate::capability::Capability::$capability;

            fn from_node(node: $crate::node::ModelNode) -> Option<Self> {
                match node {
                    $crate::node::ModelNode::$capability(inner) => Some(inner),
                    _ => None,
                }
            }

            fn into_node(self) -> $crate::node::ModelNode {
                $crate::node::ModelNode::$capability(self)
            }
        }

        impl From<$name> for $crate::node::ModelNode {
            fn from(value: $name) -> Self {
                $crate::node::ModelNode::$capability(value)
            }
        }
    };
}

/// Getter / setter / fluent setter triples over `Option<T>` fields of the data struct.
///
/// The getter returns a clone, the setter takes `None` to clear.
macro_rules! accessors {
    ($( $(#[$doc:meta])* $field:ident : $ty:ty => $set:ident, $with:ident; )*) => {
        $(
            $(#[$doc])*
            pub fn $field(&self) -> Option<$ty> {
                self.inner.borrow().$field.clone()
            }

            pub fn $set(&self, value: Option<$ty>) {
                self.inner.borrow_mut().$field = value;
            }

            pub fn $with(&self, value: impl Into<$ty>) -> Self {
                self.chain(|node| node.$set(Some(value.into())))
            }
        )*
    };
}

pub(crate) use accessors;
pub(crate) use node_handle;
