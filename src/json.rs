//! JSON value view of a node graph
//!
//! Walks a node through its public accessors and produces a
//! `serde_json::Value` with every set attribute, the `$ref` and every extension
//! entry. Useful for inspection and tests; it is not a document serializer.
//!
//! Nodes attached inside themselves are reported as
//! [`ModelError::CyclicGraph`] rather than recursed into.

use serde_json::{Map, Value};

use crate::error::{ModelError, Result};
use crate::extension::{AnyValue, Extensible};
use crate::meta::{Discriminator, ExternalDocumentation, Xml};
use crate::node::ModelNode;
use crate::reference::Referenceable;
use crate::schema::{AdditionalProperties, Schema};

/// Render into a `serde_json::Value`
pub trait ToJson {
    fn to_json(&self) -> Result<Value> {
        let mut ctx = RenderContext::default();
        self.render(&mut ctx)
    }

    #[doc(hidden)]
    fn render(&self, ctx: &mut RenderContext) -> Result<Value>;
}

/// Tracks the nodes currently being rendered and the JSON pointer to them
#[derive(Default)]
pub struct RenderContext {
    stack: Vec<*const ()>,
    path: Vec<String>,
}

impl RenderContext {
    fn pointer(&self) -> String {
        format!("#/{}", self.path.join("/"))
    }

    fn visit(
        &mut self,
        addr: *const (),
        render: impl FnOnce(&mut Self) -> Result<Value>,
    ) -> Result<Value> {
        if self.stack.contains(&addr) {
            return Err(ModelError::CyclicGraph {
                path: self.pointer(),
            });
        }
        self.stack.push(addr);
        let rendered = render(self);
        self.stack.pop();
        rendered
    }

    fn child(&mut self, segment: impl Into<String>, value: &dyn ToJson) -> Result<Value> {
        self.path.push(segment.into());
        let rendered = value.render(self);
        self.path.pop();
        rendered
    }

    fn children(&mut self, segment: &str, values: &[Schema]) -> Result<Value> {
        self.path.push(segment.to_string());
        let rendered = values
            .iter()
            .enumerate()
            .map(|(i, v)| self.child(i.to_string(), v))
            .collect::<Result<Vec<_>>>();
        self.path.pop();
        Ok(Value::Array(rendered?))
    }
}

fn put<T: Into<Value>>(out: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(v) = value {
        out.insert(key.to_string(), v.into());
    }
}

fn put_extensions(
    node: &impl Extensible,
    ctx: &mut RenderContext,
    out: &mut Map<String, Value>,
) -> Result<()> {
    for (key, value) in node.extensions() {
        let rendered = ctx.child(key.clone(), &value)?;
        out.insert(key, rendered);
    }
    Ok(())
}

impl ToJson for AnyValue {
    fn render(&self, ctx: &mut RenderContext) -> Result<Value> {
        Ok(match self {
            AnyValue::Null => Value::Null,
            AnyValue::Bool(b) => Value::Bool(*b),
            AnyValue::Integer(i) => Value::from(*i),
            AnyValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            AnyValue::Decimal(d) => d.to_json(),
            AnyValue::String(s) => Value::String(s.clone()),
            AnyValue::Node(node) => node.render(ctx)?,
            AnyValue::Sequence(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| ctx.child(i.to_string(), item))
                    .collect::<Result<_>>()?,
            ),
            AnyValue::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), ctx.child(k.clone(), v)?)))
                    .collect::<Result<_>>()?,
            ),
        })
    }
}

impl ToJson for ModelNode {
    fn render(&self, ctx: &mut RenderContext) -> Result<Value> {
        match self {
            ModelNode::Schema(node) => node.render(ctx),
            ModelNode::Discriminator(node) => node.render(ctx),
            ModelNode::Xml(node) => node.render(ctx),
            ModelNode::ExternalDocumentation(node) => node.render(ctx),
        }
    }
}

impl ToJson for Schema {
    fn render(&self, ctx: &mut RenderContext) -> Result<Value> {
        ctx.visit(self.addr(), |ctx| {
            let mut out = Map::new();
            put_extensions(self, ctx, &mut out)?;
            put(&mut out, "$ref", self.reference());

            match self.types().as_slice() {
                [] => {}
                [only] => put(&mut out, "type", Some(only.as_str())),
                many => put(
                    &mut out,
                    "type",
                    Some(many.iter().map(|t| t.as_str()).collect::<Vec<_>>()),
                ),
            }
            put(&mut out, "title", self.title());
            put(&mut out, "description", self.description());
            put(&mut out, "format", self.format());
            if let Some(default) = self.default_value() {
                out.insert("default".into(), ctx.child("default", &default)?);
            }
            let enumeration = self.enumeration();
            if !enumeration.is_empty() {
                out.insert("enum".into(), ctx.child("enum", &AnyValue::Sequence(enumeration))?);
            }

            put(&mut out, "multipleOf", self.multiple_of().map(|d| d.to_json()));
            put(&mut out, "maximum", self.maximum().map(|d| d.to_json()));
            put(&mut out, "exclusiveMaximum", self.exclusive_maximum().map(|d| d.to_json()));
            put(&mut out, "minimum", self.minimum().map(|d| d.to_json()));
            put(&mut out, "exclusiveMinimum", self.exclusive_minimum().map(|d| d.to_json()));
            put(&mut out, "maxLength", self.max_length());
            put(&mut out, "minLength", self.min_length());
            put(&mut out, "pattern", self.pattern());
            put(&mut out, "maxItems", self.max_items());
            put(&mut out, "minItems", self.min_items());
            put(&mut out, "uniqueItems", self.unique_items());
            put(&mut out, "maxProperties", self.max_properties());
            put(&mut out, "minProperties", self.min_properties());

            let required = self.required();
            if !required.is_empty() {
                put(&mut out, "required", Some(required));
            }
            let properties = self.properties();
            if !properties.is_empty() {
                ctx.path.push("properties".to_string());
                let rendered = properties
                    .iter()
                    .map(|(name, schema)| Ok((name.clone(), ctx.child(name.clone(), schema)?)))
                    .collect::<Result<Map<_, _>>>();
                ctx.path.pop();
                out.insert("properties".into(), Value::Object(rendered?));
            }
            match self.additional_properties() {
                AdditionalProperties::Unset => {}
                AdditionalProperties::Boolean(flag) => {
                    put(&mut out, "additionalProperties", Some(flag))
                }
                AdditionalProperties::Schema(schema) => {
                    let value = ctx.child("additionalProperties", &schema)?;
                    out.insert("additionalProperties".into(), value);
                }
            }
            if let Some(items) = self.items() {
                out.insert("items".into(), ctx.child("items", &items)?);
            }

            if let Some(not) = self.not() {
                out.insert("not".into(), ctx.child("not", &not)?);
            }
            for (key, list) in [
                ("allOf", self.all_of()),
                ("anyOf", self.any_of()),
                ("oneOf", self.one_of()),
            ] {
                if !list.is_empty() {
                    out.insert(key.into(), ctx.children(key, &list)?);
                }
            }

            put(&mut out, "nullable", self.nullable());
            put(&mut out, "readOnly", self.read_only());
            put(&mut out, "writeOnly", self.write_only());
            put(&mut out, "deprecated", self.deprecated());
            if let Some(example) = self.example() {
                out.insert("example".into(), ctx.child("example", &example)?);
            }
            if let Some(xml) = self.xml() {
                out.insert("xml".into(), ctx.child("xml", &xml)?);
            }
            if let Some(docs) = self.external_docs() {
                out.insert("externalDocs".into(), ctx.child("externalDocs", &docs)?);
            }
            if let Some(discriminator) = self.discriminator() {
                out.insert("discriminator".into(), ctx.child("discriminator", &discriminator)?);
            }
            Ok(Value::Object(out))
        })
    }
}

impl ToJson for Discriminator {
    fn render(&self, ctx: &mut RenderContext) -> Result<Value> {
        ctx.visit(self.addr(), |ctx| {
            let mut out = Map::new();
            put_extensions(self, ctx, &mut out)?;
            put(&mut out, "propertyName", self.property_name());
            let mapping = self.mapping();
            if !mapping.is_empty() {
                let entries: Map<String, Value> = mapping
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect();
                out.insert("mapping".into(), Value::Object(entries));
            }
            Ok(Value::Object(out))
        })
    }
}

impl ToJson for Xml {
    fn render(&self, ctx: &mut RenderContext) -> Result<Value> {
        ctx.visit(self.addr(), |ctx| {
            let mut out = Map::new();
            put_extensions(self, ctx, &mut out)?;
            put(&mut out, "name", self.name());
            put(&mut out, "namespace", self.namespace());
            put(&mut out, "prefix", self.prefix());
            put(&mut out, "attribute", self.attribute());
            put(&mut out, "wrapped", self.wrapped());
            Ok(Value::Object(out))
        })
    }
}

impl ToJson for ExternalDocumentation {
    fn render(&self, ctx: &mut RenderContext) -> Result<Value> {
        ctx.visit(self.addr(), |ctx| {
            let mut out = Map::new();
            put_extensions(self, ctx, &mut out)?;
            put(&mut out, "description", self.description());
            put(&mut out, "url", self.url());
            Ok(Value::Object(out))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Decimal;
    use crate::schema::SchemaType;
    use serde_json::json;

    #[test]
    fn test_render_nested_schema() {
        let id = Schema::empty().with_type(SchemaType::Integer).with_format("int32");
        let schema = Schema::empty()
            .with_type(SchemaType::Object)
            .add_property("id", id)
            .unwrap()
            .with_required(["id"])
            .with_additional_properties_boolean(false)
            .with_maximum(Decimal::parse("10.5").unwrap())
            .with_extension("x-internal", true);

        assert_eq!(
            schema.to_json().unwrap(),
            json!({
                "type": "object",
                "properties": { "id": { "type": "integer", "format": "int32" } },
                "required": ["id"],
                "additionalProperties": false,
                "maximum": 10.5,
                "x-internal": true
            })
        );
    }

    #[test]
    fn test_render_large_decimal_bounds_exactly() {
        let schema = Schema::empty()
            .with_maximum(Decimal::parse("99999999999999999999.99").unwrap())
            .with_multiple_of(Decimal::parse("0.01").unwrap());
        let rendered = serde_json::to_string(&schema.to_json().unwrap()).unwrap();
        assert_eq!(
            rendered,
            r#"{"maximum":99999999999999999999.99,"multipleOf":0.01}"#
        );
    }

    #[test]
    fn test_render_additional_properties_schema() {
        let schema = Schema::empty()
            .with_additional_properties_schema(Schema::empty().with_type(SchemaType::String));
        assert_eq!(
            schema.to_json().unwrap(),
            json!({ "additionalProperties": { "type": "string" } })
        );
    }

    #[test]
    fn test_render_reference_with_local_keywords() {
        let schema = Schema::empty()
            .add_type(SchemaType::Array)
            .with_reference("Booking")
            .with_title("Bookings");
        assert_eq!(
            schema.to_json().unwrap(),
            json!({ "$ref": "#/components/schemas/Booking", "type": "array", "title": "Bookings" })
        );
    }

    #[test]
    fn test_shared_child_is_not_a_cycle() {
        let shared = Schema::empty().with_type(SchemaType::String);
        let schema = Schema::empty()
            .add_all_of(shared.clone())
            .unwrap()
            .add_any_of(shared)
            .unwrap();
        let value = schema.to_json().unwrap();
        assert_eq!(value["allOf"][0], value["anyOf"][0]);
    }

    #[test]
    fn test_direct_cycle_is_reported() {
        let schema = Schema::empty();
        let child = Schema::empty();
        schema.add_property("child", child.clone()).unwrap();
        child.set_items(Some(schema.clone()));

        let err = schema.to_json().unwrap_err();
        match err {
            ModelError::CyclicGraph { path } => assert_eq!(path, "#/properties/child/items"),
            other => panic!("Expected CyclicGraph, got {:?}", other),
        }
        child.set_items(None);
    }

    #[test]
    fn test_render_meta_nodes() {
        let schema = Schema::empty()
            .with_xml(Xml::empty().with_name("pet").with_wrapped(true))
            .with_external_docs(ExternalDocumentation::empty().with_url("http://example.com"))
            .with_discriminator(
                Discriminator::empty()
                    .with_property_name("kind")
                    .add_mapping("dog", "#/components/schemas/Dog"),
            );
        assert_eq!(
            schema.to_json().unwrap(),
            json!({
                "xml": { "name": "pet", "wrapped": true },
                "externalDocs": { "url": "http://example.com" },
                "discriminator": {
                    "propertyName": "kind",
                    "mapping": { "dog": "#/components/schemas/Dog" }
                }
            })
        );
    }
}
