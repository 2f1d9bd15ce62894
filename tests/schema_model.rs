//! End-to-end tests for building schema graphs through the process-wide factory

use std::collections::BTreeMap;

use openapi_model::factory;
use openapi_model::{
    AdditionalProperties, AnyValue, Capability, Decimal, Extensible, ModelError, ModelNode,
    Referenceable, Schema, SchemaType, ToJson,
};
use serde_json::json;

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_default_provider_builds_empty_nodes() {
    let schema = factory::create_schema().unwrap();

    assert_eq!(schema.schema_type(), None);
    assert_eq!(schema.title(), None);
    assert_eq!(schema.description(), None);
    assert_eq!(schema.format(), None);
    assert_eq!(schema.default_value(), None);
    assert_eq!(schema.multiple_of(), None);
    assert_eq!(schema.max_length(), None);
    assert_eq!(schema.unique_items(), None);
    assert_eq!(schema.items(), None);
    assert_eq!(schema.not(), None);
    assert_eq!(schema.nullable(), None);
    assert_eq!(schema.example(), None);
    assert_eq!(schema.xml(), None);
    assert_eq!(schema.external_docs(), None);
    assert_eq!(schema.discriminator(), None);
    assert_eq!(schema.reference(), None);
    assert_eq!(schema.additional_properties(), AdditionalProperties::Unset);

    assert!(schema.enumeration().is_empty());
    assert!(schema.required().is_empty());
    assert!(schema.properties().is_empty());
    assert!(schema.all_of().is_empty());
    assert!(schema.any_of().is_empty());
    assert!(schema.one_of().is_empty());
    assert!(schema.extensions().is_empty());

    assert_eq!(factory::global().provider().name(), "default");
}

#[test]
fn test_every_capability_is_constructible() {
    for capability in Capability::ALL {
        let node = factory::create(capability).unwrap();
        assert_eq!(node.capability(), capability);
    }
}

#[test]
fn test_unknown_capability_name() {
    let err = factory::global().create_by_name("Info").unwrap_err();
    assert!(matches!(err, ModelError::UnsupportedCapability { .. }));
}

// =============================================================================
// Schema graphs
// =============================================================================

#[test]
fn test_object_with_required_integer_id() {
    let schema = factory::create_schema()
        .unwrap()
        .with_type(SchemaType::Object)
        .add_property(
            "id",
            factory::create_schema()
                .unwrap()
                .with_type(SchemaType::Integer)
                .with_format("int32"),
        )
        .unwrap()
        .with_required(["id"]);

    assert_eq!(schema.schema_type(), Some(SchemaType::Object));
    let id = schema.properties().get("id").cloned().unwrap();
    assert_eq!(id.schema_type(), Some(SchemaType::Integer));
    assert_eq!(id.format().as_deref(), Some("int32"));
    assert_eq!(schema.required(), vec!["id"]);
}

#[test]
fn test_fluent_chain_mutates_receiver() {
    let node = factory::create_schema().unwrap();
    let returned = node.with_title("t").with_description("d");
    assert!(returned.ptr_eq(&node));

    returned.set_pattern(Some("^[a-z]+$".to_string()));
    assert_eq!(node.pattern().as_deref(), Some("^[a-z]+$"));
    assert_eq!(node.title().as_deref(), Some("t"));
}

#[test]
fn test_shared_child_seen_from_every_parent() {
    let shared = factory::create_schema().unwrap().with_type(SchemaType::String);
    let a = factory::create_schema()
        .unwrap()
        .add_property("name", shared.clone())
        .unwrap();
    let b = factory::create_schema().unwrap().with_items(shared.clone());

    shared.set_max_length(Some(64));
    assert_eq!(a.property("name").unwrap().max_length(), Some(64));
    assert_eq!(b.items().unwrap().max_length(), Some(64));
}

#[test]
fn test_reference_coexists_with_keywords() {
    let schema = factory::create_schema()
        .unwrap()
        .with_reference("#/components/schemas/Airlines")
        .with_description("airline listing")
        .add_type(SchemaType::Array);

    assert_eq!(schema.reference().as_deref(), Some("#/components/schemas/Airlines"));
    assert_eq!(schema.description().as_deref(), Some("airline listing"));
    assert_eq!(schema.types(), vec![SchemaType::Array]);
}

#[test]
fn test_numeric_bounds_keep_precision() {
    let schema = factory::create_schema()
        .unwrap()
        .with_multiple_of(Decimal::parse("0.01").unwrap())
        .with_exclusive_minimum(Decimal::parse("0").unwrap())
        .with_maximum(Decimal::parse("99999999999999999999.99").unwrap());

    assert_eq!(schema.multiple_of().unwrap().as_str(), "0.01");
    assert_eq!(schema.exclusive_minimum().unwrap().as_str(), "0");
    assert_eq!(
        schema.maximum().unwrap().as_str(),
        "99999999999999999999.99"
    );

    let view = serde_json::to_string(&schema.to_json().unwrap()).unwrap();
    assert!(view.contains(r#""maximum":99999999999999999999.99"#));
    assert!(view.contains(r#""exclusiveMinimum":0"#));
}

#[test]
fn test_composition_keeps_order() {
    let parts: Vec<Schema> = (0..4)
        .map(|i| factory::create_schema().unwrap().with_title(format!("part-{}", i)))
        .collect();
    let schema = factory::create_schema().unwrap().with_all_of(parts.clone());
    schema.remove_all_of(&parts[1]);

    let titles: Vec<String> = schema.all_of().iter().filter_map(Schema::title).collect();
    assert_eq!(titles, vec!["part-0", "part-2", "part-3"]);
}

#[test]
fn test_not_and_additional_properties_schema() {
    let forbidden = factory::create_schema().unwrap().with_type(SchemaType::Null);
    let values = factory::create_schema().unwrap().with_type(SchemaType::Number);
    let schema = factory::create_schema()
        .unwrap()
        .with_not(forbidden.clone())
        .with_additional_properties(values.clone());

    assert!(schema.not().unwrap().ptr_eq(&forbidden));
    assert!(schema.additional_properties_schema().unwrap().ptr_eq(&values));
    assert_eq!(schema.additional_properties_boolean(), None);

    schema.set_additional_properties(AdditionalProperties::Boolean(true));
    assert_eq!(schema.additional_properties_schema(), None);
}

// =============================================================================
// Extensions
// =============================================================================

#[test]
fn test_extensions_hold_any_shape() {
    let mut mapping = BTreeMap::new();
    mapping.insert("test".to_string(), AnyValue::from("THURSDAY"));

    let nested = factory::create_schema().unwrap().with_title("test");
    let schema = factory::create_schema()
        .unwrap()
        .with_extension("x-short", 1i16)
        .with_extension("x-long", 3i64)
        .with_extension("x-float", 3.5f32)
        .with_extension("x-char", 'a')
        .with_extension("x-schema", nested.clone())
        .with_extension(
            "x-xml",
            factory::create_xml().unwrap().with_name("test"),
        )
        .with_extension("x-list", vec![AnyValue::from("test"), AnyValue::from(nested.clone())])
        .with_extension("x-map", mapping);

    assert_eq!(schema.extension("x-short"), Some(AnyValue::Integer(1)));
    assert_eq!(schema.extension("x-float"), Some(AnyValue::Float(3.5)));
    assert_eq!(schema.extension("x-char"), Some(AnyValue::from("a")));
    assert_eq!(
        schema.extension("x-schema"),
        Some(AnyValue::Node(ModelNode::Schema(nested)))
    );
    assert_eq!(schema.extensions().len(), 8);

    schema.remove_extension("x-long");
    schema.remove_extension("x-long");
    assert_eq!(schema.extension("x-long"), None);
    assert_eq!(schema.extensions().len(), 7);
}

#[test]
fn test_json_view_of_custom_component() {
    let schema = factory::create_schema()
        .unwrap()
        .with_schema_dialect("http://example.com/myCustomSchema")
        .with_extension("x-doc", factory::create_external_documentation().unwrap().with_description("test"))
        .with_extension("x-big", Decimal::from(7i64));

    assert_eq!(
        schema.to_json().unwrap(),
        json!({
            "$schema": "http://example.com/myCustomSchema",
            "x-doc": { "description": "test" },
            "x-big": 7
        })
    );
}
