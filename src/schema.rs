//! Schema node
//!
//! The recursive validation/description unit of a document. A [`Schema`] is a
//! shared handle: child schemas in `properties`, `items`, `allOf` etc. are
//! handles too, so the same node may be attached in several places. Every
//! getter returns a snapshot; mutation goes through the setters and adders.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::decimal::Decimal;
use crate::error::{ModelError, Result};
use crate::extension::{AnyValue, Extensible, Extensions};
use crate::macros::{accessors, node_handle};
use crate::meta::{Discriminator, ExternalDocumentation, Xml};
use crate::node::Fluent;
use crate::reference::Referenceable;

/// Extension key holding the schema dialect identifier
pub const SCHEMA_DIALECT_KEY: &str = "$schema";

/// Primitive JSON type of a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Integer,
    Number,
    Boolean,
    String,
    Object,
    Array,
    Null,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::String => "string",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::Null => "null",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `additionalProperties`: unset, a boolean, or a schema, never two at once
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AdditionalProperties {
    #[default]
    Unset,
    Boolean(bool),
    Schema(Schema),
}

impl AdditionalProperties {
    pub fn is_unset(&self) -> bool {
        matches!(self, AdditionalProperties::Unset)
    }
}

impl From<bool> for AdditionalProperties {
    fn from(value: bool) -> Self {
        AdditionalProperties::Boolean(value)
    }
}

impl From<Schema> for AdditionalProperties {
    fn from(value: Schema) -> Self {
        AdditionalProperties::Schema(value)
    }
}

#[derive(Debug, Default)]
pub(crate) struct SchemaData {
    pub(crate) reference: Option<String>,
    pub(crate) extensions: Extensions,

    pub(crate) types: Option<Vec<SchemaType>>,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) format: Option<String>,
    pub(crate) default_value: Option<AnyValue>,
    pub(crate) enumeration: Option<Vec<AnyValue>>,

    pub(crate) multiple_of: Option<Decimal>,
    pub(crate) maximum: Option<Decimal>,
    pub(crate) exclusive_maximum: Option<Decimal>,
    pub(crate) minimum: Option<Decimal>,
    pub(crate) exclusive_minimum: Option<Decimal>,

    pub(crate) max_length: Option<u64>,
    pub(crate) min_length: Option<u64>,
    pub(crate) pattern: Option<String>,
    pub(crate) max_items: Option<u64>,
    pub(crate) min_items: Option<u64>,
    pub(crate) unique_items: Option<bool>,
    pub(crate) max_properties: Option<u64>,
    pub(crate) min_properties: Option<u64>,

    pub(crate) required: Option<Vec<String>>,
    pub(crate) properties: Option<BTreeMap<String, Schema>>,
    pub(crate) additional_properties: AdditionalProperties,
    pub(crate) items: Option<Schema>,

    pub(crate) not: Option<Schema>,
    pub(crate) all_of: Option<Vec<Schema>>,
    pub(crate) any_of: Option<Vec<Schema>>,
    pub(crate) one_of: Option<Vec<Schema>>,

    pub(crate) nullable: Option<bool>,
    pub(crate) read_only: Option<bool>,
    pub(crate) write_only: Option<bool>,
    pub(crate) deprecated: Option<bool>,
    pub(crate) example: Option<AnyValue>,

    pub(crate) xml: Option<Xml>,
    pub(crate) external_docs: Option<ExternalDocumentation>,
    pub(crate) discriminator: Option<Discriminator>,
}

node_handle!(
    /// A schema node handle. Cloning the handle does not copy the node.
    Schema,
    SchemaData,
    Schema
);

impl Referenceable for Schema {
    const COMPONENT: &'static str = "schemas";

    fn reference_slot(&self) -> Option<String> {
        self.inner.borrow().reference.clone()
    }

    fn set_reference_slot(&self, reference: Option<String>) {
        self.inner.borrow_mut().reference = reference;
    }
}

/// Unwrap an optional child for an adder, rejecting an absent one
fn require_child(operation: &'static str, child: Option<Schema>) -> Result<Schema> {
    child.ok_or_else(|| {
        tracing::warn!(operation, "rejected absent child schema");
        ModelError::invalid_element(operation, "child schema is absent")
    })
}

/// Remove the first element matching `pred`, no-op if there is none
fn remove_first<T>(list: &mut Option<Vec<T>>, pred: impl Fn(&T) -> bool) {
    if let Some(items) = list.as_mut() {
        if let Some(pos) = items.iter().position(pred) {
            items.remove(pos);
        }
    }
}

impl Schema {
    accessors! {
        title: String => set_title, with_title;
        description: String => set_description, with_description;
        format: String => set_format, with_format;
        /// Default value, of any shape
        default_value: AnyValue => set_default_value, with_default_value;

        multiple_of: Decimal => set_multiple_of, with_multiple_of;
        maximum: Decimal => set_maximum, with_maximum;
        exclusive_maximum: Decimal => set_exclusive_maximum, with_exclusive_maximum;
        minimum: Decimal => set_minimum, with_minimum;
        exclusive_minimum: Decimal => set_exclusive_minimum, with_exclusive_minimum;

        max_length: u64 => set_max_length, with_max_length;
        min_length: u64 => set_min_length, with_min_length;
        /// Regular expression, stored as given and never compiled here
        pattern: String => set_pattern, with_pattern;
        max_items: u64 => set_max_items, with_max_items;
        min_items: u64 => set_min_items, with_min_items;
        unique_items: bool => set_unique_items, with_unique_items;
        max_properties: u64 => set_max_properties, with_max_properties;
        min_properties: u64 => set_min_properties, with_min_properties;

        /// Element shape for arrays
        items: Schema => set_items, with_items;
        not: Schema => set_not, with_not;

        nullable: bool => set_nullable, with_nullable;
        read_only: bool => set_read_only, with_read_only;
        write_only: bool => set_write_only, with_write_only;
        deprecated: bool => set_deprecated, with_deprecated;
        example: AnyValue => set_example, with_example;

        xml: Xml => set_xml, with_xml;
        external_docs: ExternalDocumentation => set_external_docs, with_external_docs;
        discriminator: Discriminator => set_discriminator, with_discriminator;
    }

    // --- type ---

    /// The single type, `None` when unset or when several types are present
    pub fn schema_type(&self) -> Option<SchemaType> {
        match self.inner.borrow().types.as_deref() {
            Some([only]) => Some(*only),
            _ => None,
        }
    }

    /// Replace the type set with `{ty}`, or clear it
    pub fn set_schema_type(&self, ty: Option<SchemaType>) {
        self.inner.borrow_mut().types = ty.map(|t| vec![t]);
    }

    pub fn with_type(&self, ty: SchemaType) -> Self {
        self.chain(|node| node.set_schema_type(Some(ty)))
    }

    /// Every type, in insertion order
    pub fn types(&self) -> Vec<SchemaType> {
        self.inner.borrow().types.clone().unwrap_or_default()
    }

    /// Replace the type set; duplicates are dropped keeping the first occurrence
    pub fn set_types(&self, types: Option<Vec<SchemaType>>) {
        self.inner.borrow_mut().types = types.map(|list| {
            let mut unique = Vec::with_capacity(list.len());
            for ty in list {
                if !unique.contains(&ty) {
                    unique.push(ty);
                }
            }
            unique
        });
    }

    pub fn with_types(&self, types: Vec<SchemaType>) -> Self {
        self.chain(|node| node.set_types(Some(types)))
    }

    /// Add a type to the set, no-op if already present
    pub fn add_type(&self, ty: SchemaType) -> Self {
        self.chain(|node| {
            let mut data = node.inner.borrow_mut();
            let types = data.types.get_or_insert_with(Vec::new);
            if !types.contains(&ty) {
                types.push(ty);
            }
        })
    }

    pub fn remove_type(&self, ty: SchemaType) {
        remove_first(&mut self.inner.borrow_mut().types, |t| *t == ty);
    }

    // --- schema dialect ---

    /// Dialect identifier, kept in the extension store under `$schema`
    pub fn schema_dialect(&self) -> Option<String> {
        self.extension(SCHEMA_DIALECT_KEY)
            .and_then(|v| v.as_str().map(str::to_string))
    }

    pub fn set_schema_dialect(&self, dialect: Option<String>) {
        match dialect {
            Some(d) => self.set_extension(SCHEMA_DIALECT_KEY, d),
            None => self.remove_extension(SCHEMA_DIALECT_KEY),
        }
    }

    pub fn with_schema_dialect(&self, dialect: impl Into<String>) -> Self {
        self.chain(|node| node.set_schema_dialect(Some(dialect.into())))
    }

    // --- enumeration ---

    pub fn enumeration(&self) -> Vec<AnyValue> {
        self.inner.borrow().enumeration.clone().unwrap_or_default()
    }

    pub fn set_enumeration(&self, values: Option<Vec<AnyValue>>) {
        self.inner.borrow_mut().enumeration = values;
    }

    pub fn with_enumeration(&self, values: Vec<AnyValue>) -> Self {
        self.chain(|node| node.set_enumeration(Some(values)))
    }

    /// Append a value; `AnyValue::Null` is a legitimate enum member
    pub fn add_enumeration(&self, value: impl Into<AnyValue>) -> Self {
        let value = value.into();
        self.chain(|node| {
            node.inner
                .borrow_mut()
                .enumeration
                .get_or_insert_with(Vec::new)
                .push(value)
        })
    }

    /// Remove the first equal value, no-op if absent
    pub fn remove_enumeration(&self, value: &AnyValue) {
        remove_first(&mut self.inner.borrow_mut().enumeration, |v| v == value);
    }

    // --- required ---

    pub fn required(&self) -> Vec<String> {
        self.inner.borrow().required.clone().unwrap_or_default()
    }

    pub fn set_required(&self, names: Option<Vec<String>>) {
        self.inner.borrow_mut().required = names;
    }

    pub fn with_required<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect();
        self.chain(|node| node.set_required(Some(names)))
    }

    /// Append a property name; duplicates are kept
    pub fn add_required(&self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.chain(|node| {
            node.inner
                .borrow_mut()
                .required
                .get_or_insert_with(Vec::new)
                .push(name)
        })
    }

    /// Remove the first occurrence of `name`, no-op if absent
    pub fn remove_required(&self, name: &str) {
        remove_first(&mut self.inner.borrow_mut().required, |n| n == name);
    }

    // --- properties ---

    pub fn properties(&self) -> BTreeMap<String, Schema> {
        self.inner.borrow().properties.clone().unwrap_or_default()
    }

    pub fn property(&self, name: &str) -> Option<Schema> {
        self.inner
            .borrow()
            .properties
            .as_ref()
            .and_then(|props| props.get(name).cloned())
    }

    pub fn set_properties(&self, properties: Option<BTreeMap<String, Schema>>) {
        self.inner.borrow_mut().properties = properties;
    }

    pub fn with_properties(&self, properties: BTreeMap<String, Schema>) -> Self {
        self.chain(|node| node.set_properties(Some(properties)))
    }

    /// Insert or overwrite the schema for `name`.
    ///
    /// Fails with [`ModelError::InvalidElement`] when `schema` is `None`; the node
    /// is left unchanged in that case.
    pub fn add_property(
        &self,
        name: impl Into<String>,
        schema: impl Into<Option<Schema>>,
    ) -> Result<Self> {
        let child = require_child("add_property", schema.into())?;
        let name = name.into();
        Ok(self.chain(|node| {
            node.inner
                .borrow_mut()
                .properties
                .get_or_insert_with(BTreeMap::new)
                .insert(name, child);
        }))
    }

    pub fn remove_property(&self, name: &str) {
        if let Some(props) = self.inner.borrow_mut().properties.as_mut() {
            props.remove(name);
        }
    }

    // --- additionalProperties ---

    pub fn additional_properties(&self) -> AdditionalProperties {
        self.inner.borrow().additional_properties.clone()
    }

    pub fn set_additional_properties(&self, value: AdditionalProperties) {
        self.inner.borrow_mut().additional_properties = value;
    }

    pub fn with_additional_properties(&self, value: impl Into<AdditionalProperties>) -> Self {
        let value = value.into();
        self.chain(|node| node.set_additional_properties(value))
    }

    /// The schema form, `None` if unset or if the boolean form was set last
    pub fn additional_properties_schema(&self) -> Option<Schema> {
        match &self.inner.borrow().additional_properties {
            AdditionalProperties::Schema(schema) => Some(schema.clone()),
            _ => None,
        }
    }

    /// Store the schema form, discarding any boolean form; `None` clears both
    pub fn set_additional_properties_schema(&self, schema: Option<Schema>) {
        self.set_additional_properties(
            schema.map_or(AdditionalProperties::Unset, AdditionalProperties::Schema),
        );
    }

    pub fn with_additional_properties_schema(&self, schema: Schema) -> Self {
        self.chain(|node| node.set_additional_properties_schema(Some(schema)))
    }

    /// The boolean form, `None` if unset or if the schema form was set last
    pub fn additional_properties_boolean(&self) -> Option<bool> {
        match self.inner.borrow().additional_properties {
            AdditionalProperties::Boolean(flag) => Some(flag),
            _ => None,
        }
    }

    /// Store the boolean form, discarding any schema form; `None` clears both
    pub fn set_additional_properties_boolean(&self, flag: Option<bool>) {
        self.set_additional_properties(
            flag.map_or(AdditionalProperties::Unset, AdditionalProperties::Boolean),
        );
    }

    pub fn with_additional_properties_boolean(&self, flag: bool) -> Self {
        self.chain(|node| node.set_additional_properties_boolean(Some(flag)))
    }

    // --- composition ---

    pub fn all_of(&self) -> Vec<Schema> {
        self.inner.borrow().all_of.clone().unwrap_or_default()
    }

    pub fn set_all_of(&self, schemas: Option<Vec<Schema>>) {
        self.inner.borrow_mut().all_of = schemas;
    }

    pub fn with_all_of(&self, schemas: Vec<Schema>) -> Self {
        self.chain(|node| node.set_all_of(Some(schemas)))
    }

    pub fn add_all_of(&self, schema: impl Into<Option<Schema>>) -> Result<Self> {
        let child = require_child("add_all_of", schema.into())?;
        Ok(self.chain(|node| {
            node.inner
                .borrow_mut()
                .all_of
                .get_or_insert_with(Vec::new)
                .push(child)
        }))
    }

    /// Remove the first occurrence of this exact node, no-op if absent
    pub fn remove_all_of(&self, schema: &Schema) {
        remove_first(&mut self.inner.borrow_mut().all_of, |s| s.ptr_eq(schema));
    }

    pub fn any_of(&self) -> Vec<Schema> {
        self.inner.borrow().any_of.clone().unwrap_or_default()
    }

    pub fn set_any_of(&self, schemas: Option<Vec<Schema>>) {
        self.inner.borrow_mut().any_of = schemas;
    }

    pub fn with_any_of(&self, schemas: Vec<Schema>) -> Self {
        self.chain(|node| node.set_any_of(Some(schemas)))
    }

    pub fn add_any_of(&self, schema: impl Into<Option<Schema>>) -> Result<Self> {
        let child = require_child("add_any_of", schema.into())?;
        Ok(self.chain(|node| {
            node.inner
                .borrow_mut()
                .any_of
                .get_or_insert_with(Vec::new)
                .push(child)
        }))
    }

    pub fn remove_any_of(&self, schema: &Schema) {
        remove_first(&mut self.inner.borrow_mut().any_of, |s| s.ptr_eq(schema));
    }

    pub fn one_of(&self) -> Vec<Schema> {
        self.inner.borrow().one_of.clone().unwrap_or_default()
    }

    pub fn set_one_of(&self, schemas: Option<Vec<Schema>>) {
        self.inner.borrow_mut().one_of = schemas;
    }

    pub fn with_one_of(&self, schemas: Vec<Schema>) -> Self {
        self.chain(|node| node.set_one_of(Some(schemas)))
    }

    pub fn add_one_of(&self, schema: impl Into<Option<Schema>>) -> Result<Self> {
        let child = require_child("add_one_of", schema.into())?;
        Ok(self.chain(|node| {
            node.inner
                .borrow_mut()
                .one_of
                .get_or_insert_with(Vec::new)
                .push(child)
        }))
    }

    pub fn remove_one_of(&self, schema: &Schema) {
        remove_first(&mut self.inner.borrow_mut().one_of, |s| s.ptr_eq(schema));
    }
}
