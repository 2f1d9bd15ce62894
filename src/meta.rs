//! Flat metadata nodes hung off a schema

use std::collections::BTreeMap;

use crate::extension::Extensions;
use crate::macros::{accessors, node_handle};
use crate::node::Fluent;

#[derive(Debug, Default)]
pub(crate) struct DiscriminatorData {
    pub(crate) extensions: Extensions,
    pub(crate) property_name: Option<String>,
    pub(crate) mapping: Option<BTreeMap<String, String>>,
}

node_handle!(
    /// Polymorphism hint: which property selects the concrete schema
    Discriminator,
    DiscriminatorData,
    Discriminator
);

impl Discriminator {
    accessors! {
        /// Name of the property carrying the discriminating value
        property_name: String => set_property_name, with_property_name;
    }

    /// Value → schema reference mapping
    pub fn mapping(&self) -> BTreeMap<String, String> {
        self.inner.borrow().mapping.clone().unwrap_or_default()
    }

    pub fn set_mapping(&self, mapping: Option<BTreeMap<String, String>>) {
        self.inner.borrow_mut().mapping = mapping;
    }

    pub fn with_mapping(&self, mapping: BTreeMap<String, String>) -> Self {
        self.chain(|node| node.set_mapping(Some(mapping)))
    }

    pub fn add_mapping(&self, value: impl Into<String>, reference: impl Into<String>) -> Self {
        let (value, reference) = (value.into(), reference.into());
        self.chain(|node| {
            node.inner
                .borrow_mut()
                .mapping
                .get_or_insert_with(BTreeMap::new)
                .insert(value, reference);
        })
    }

    pub fn remove_mapping(&self, value: &str) {
        if let Some(mapping) = self.inner.borrow_mut().mapping.as_mut() {
            mapping.remove(value);
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct XmlData {
    pub(crate) extensions: Extensions,
    pub(crate) name: Option<String>,
    pub(crate) namespace: Option<String>,
    pub(crate) prefix: Option<String>,
    pub(crate) attribute: Option<bool>,
    pub(crate) wrapped: Option<bool>,
}

node_handle!(
    /// XML rendering hints for a schema
    Xml,
    XmlData,
    Xml
);

impl Xml {
    accessors! {
        name: String => set_name, with_name;
        namespace: String => set_namespace, with_namespace;
        prefix: String => set_prefix, with_prefix;
        attribute: bool => set_attribute, with_attribute;
        /// Only meaningful for arrays
        wrapped: bool => set_wrapped, with_wrapped;
    }
}

#[derive(Debug, Default)]
pub(crate) struct ExternalDocumentationData {
    pub(crate) extensions: Extensions,
    pub(crate) description: Option<String>,
    pub(crate) url: Option<String>,
}

node_handle!(
    /// Pointer to documentation hosted elsewhere
    ExternalDocumentation,
    ExternalDocumentationData,
    ExternalDocumentation
);

impl ExternalDocumentation {
    accessors! {
        description: String => set_description, with_description;
        url: String => set_url, with_url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminator_mapping() {
        let discriminator = Discriminator::empty()
            .with_property_name("kind")
            .add_mapping("dog", "#/components/schemas/Dog")
            .add_mapping("cat", "Cat");
        assert_eq!(discriminator.property_name().as_deref(), Some("kind"));
        assert_eq!(discriminator.mapping().len(), 2);

        discriminator.remove_mapping("cat");
        discriminator.remove_mapping("cat");
        assert_eq!(
            discriminator.mapping().get("dog").map(String::as_str),
            Some("#/components/schemas/Dog")
        );
        assert_eq!(discriminator.mapping().len(), 1);
    }

    #[test]
    fn test_xml_fields() {
        let xml = Xml::empty().with_name("pet").with_wrapped(true);
        assert_eq!(xml.name().as_deref(), Some("pet"));
        assert_eq!(xml.wrapped(), Some(true));
        assert_eq!(xml.attribute(), None);

        xml.set_wrapped(None);
        assert_eq!(xml.wrapped(), None);
    }

    #[test]
    fn test_external_docs_fluent_identity() {
        let docs = ExternalDocumentation::empty();
        let same = docs.with_url("http://example.com").with_description("test");
        assert!(same.ptr_eq(&docs));
        assert_eq!(docs.url().as_deref(), Some("http://example.com"));
    }
}
