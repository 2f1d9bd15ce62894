//! OpenAPI Object Model
//!
//! A mutable, in-memory object model for building OpenAPI schema documents as a
//! typed graph before they are serialized.
//!
//! ## Features
//!
//! - **Schema nodes**: every JSON-Schema keyword as a getter, setter and fluent setter
//! - **Extensions**: arbitrary side properties on every node, including nested nodes
//! - **References**: a `$ref` slot that coexists with local keywords
//! - **Construction registry**: nodes are created through one process-wide provider
//!
//! ## Architecture
//!
//! ```text
//! factory::create_schema()
//!   └─ Schema ──┬─ properties ── { name → Schema }
//!               ├─ items / not ── Schema
//!               ├─ allOf / anyOf / oneOf ── [Schema]
//!               ├─ additionalProperties ── Unset | bool | Schema
//!               ├─ xml / externalDocs / discriminator
//!               ├─ $ref  (Referenceable)
//!               └─ x-*   (Extensible)
//! ```
//!
//! ## Example
//!
//! ```
//! use openapi_model::{factory, SchemaType};
//!
//! let schema = factory::create_schema()?
//!     .with_type(SchemaType::Object)
//!     .add_property(
//!         "id",
//!         factory::create_schema()?.with_type(SchemaType::Integer).with_format("int32"),
//!     )?
//!     .with_required(["id"]);
//!
//! assert_eq!(schema.required(), vec!["id"]);
//! # Ok::<(), openapi_model::ModelError>(())
//! ```

mod macros;

pub mod capability;
pub mod config;
pub mod decimal;
pub mod error;
pub mod extension;
pub mod factory;
pub mod json;
pub mod meta;
pub mod node;
pub mod reference;
pub mod schema;

pub use capability::Capability;
pub use config::ModelConfig;
pub use decimal::Decimal;
pub use error::{ModelError, Result};
pub use extension::{AnyValue, Extensible, Extensions};
pub use factory::{DefaultProvider, ModelFactory, ModelProvider};
pub use json::ToJson;
pub use meta::{Discriminator, ExternalDocumentation, Xml};
pub use node::{Constructible, Fluent, ModelNode};
pub use reference::Referenceable;
pub use schema::{AdditionalProperties, Schema, SchemaType};
