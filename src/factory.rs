//! Construction Registry
//!
//! Every node is created through a [`ModelFactory`], which delegates to exactly
//! one [`ModelProvider`]. A provider may be registered once, before first use;
//! otherwise the factory falls back to [`DefaultProvider`]. Resolution happens
//! at most once per factory and is race free: concurrent first callers all
//! observe the same provider.
//!
//! ```text
//! create(Capability::Schema)
//!   └─ ModelFactory::provider()   (resolved once)
//!        ├─ registered provider, or
//!        └─ DefaultProvider
//! ```

use once_cell::sync::OnceCell;
use tracing::{debug, trace, warn};

use crate::capability::Capability;
use crate::error::{ModelError, Result};
use crate::meta::{Discriminator, ExternalDocumentation, Xml};
use crate::node::{Constructible, ModelNode};
use crate::schema::Schema;

/// Produces empty nodes for requested capabilities.
///
/// A provider that cannot build some capability returns
/// [`ModelError::UnsupportedCapability`] for it.
///
/// Node storage is fixed: every node is the crate's own handle type and only
/// [`DefaultProvider`] can allocate one. A custom provider wraps it and decides
/// whether a node is built and what happens around that (instrumentation or
/// pre-populated attributes). It cannot substitute another node representation.
pub trait ModelProvider: Send + Sync {
    fn create(&self, capability: Capability) -> Result<ModelNode>;

    /// Short name used in logs
    fn name(&self) -> &str {
        "custom"
    }
}

/// Built-in provider, able to build every capability
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProvider;

impl ModelProvider for DefaultProvider {
    fn create(&self, capability: Capability) -> Result<ModelNode> {
        Ok(match capability {
            Capability::Schema => Schema::empty().into(),
            Capability::Discriminator => Discriminator::empty().into(),
            Capability::Xml => Xml::empty().into(),
            Capability::ExternalDocumentation => ExternalDocumentation::empty().into(),
        })
    }

    fn name(&self) -> &str {
        "default"
    }
}

/// A construction registry bound to one provider
pub struct ModelFactory {
    provider: OnceCell<Box<dyn ModelProvider>>,
}

impl Default for ModelFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelFactory {
    pub const fn new() -> Self {
        Self {
            provider: OnceCell::new(),
        }
    }

    /// Install a provider. Fails once the factory has resolved one, either by a
    /// previous registration or by first use.
    pub fn register(&self, provider: impl ModelProvider + 'static) -> Result<()> {
        let name = provider.name().to_string();
        self.provider.set(Box::new(provider)).map_err(|_| {
            warn!(provider = %name, "provider registered after resolution, ignoring");
            ModelError::ProviderAlreadyResolved
        })?;
        debug!(provider = %name, "registered construction provider");
        Ok(())
    }

    /// The resolved provider, falling back to the default on first use
    pub fn provider(&self) -> &dyn ModelProvider {
        let provider = self.provider.get_or_init(|| {
            debug!("no construction provider registered, using default");
            Box::new(DefaultProvider)
        });
        &**provider
    }

    /// Whether a provider has been resolved yet
    pub fn is_resolved(&self) -> bool {
        self.provider.get().is_some()
    }

    /// Create an empty node for `capability`
    pub fn create(&self, capability: Capability) -> Result<ModelNode> {
        let provider = self.provider();
        let node = provider.create(capability)?;
        if node.capability() != capability {
            warn!(
                provider = provider.name(),
                requested = %capability,
                produced = %node.capability(),
                "provider produced a node of the wrong kind"
            );
            return Err(ModelError::unsupported(capability.name()));
        }
        trace!(provider = provider.name(), capability = %capability, "created node");
        Ok(node)
    }

    /// Create by interface name (e.g., "Schema"); unknown names are unsupported
    pub fn create_by_name(&self, name: &str) -> Result<ModelNode> {
        self.create(name.parse()?)
    }

    /// Create a node of a concrete type
    pub fn create_object<T: Constructible>(&self) -> Result<T> {
        let node = self.create(T::CAPABILITY)?;
        T::from_node(node).ok_or_else(|| ModelError::unsupported(T::CAPABILITY.name()))
    }

    pub fn create_schema(&self) -> Result<Schema> {
        self.create_object()
    }

    pub fn create_discriminator(&self) -> Result<Discriminator> {
        self.create_object()
    }

    pub fn create_xml(&self) -> Result<Xml> {
        self.create_object()
    }

    pub fn create_external_documentation(&self) -> Result<ExternalDocumentation> {
        self.create_object()
    }
}

static GLOBAL: ModelFactory = ModelFactory::new();

/// The process-wide factory
pub fn global() -> &'static ModelFactory {
    &GLOBAL
}

/// Register the process-wide provider; must happen before first creation
pub fn register_provider(provider: impl ModelProvider + 'static) -> Result<()> {
    GLOBAL.register(provider)
}

pub fn create(capability: Capability) -> Result<ModelNode> {
    GLOBAL.create(capability)
}

pub fn create_object<T: Constructible>() -> Result<T> {
    GLOBAL.create_object()
}

pub fn create_schema() -> Result<Schema> {
    GLOBAL.create_schema()
}

pub fn create_discriminator() -> Result<Discriminator> {
    GLOBAL.create_discriminator()
}

pub fn create_xml() -> Result<Xml> {
    GLOBAL.create_xml()
}

pub fn create_external_documentation() -> Result<ExternalDocumentation> {
    GLOBAL.create_external_documentation()
}
