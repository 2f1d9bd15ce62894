//! OpenAPI Model CLI
//!
//! Builds sample schemas through the construction registry and prints their
//! JSON view.

use std::collections::BTreeMap;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use openapi_model::{
    factory, AnyValue, Capability, Decimal, Extensible, ModelConfig, Referenceable, Schema,
    SchemaType, ToJson,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oas-model")]
#[command(about = "Build and inspect OpenAPI schema object models")]
struct Cli {
    /// Config file (oas-model.toml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List node kinds and whether the active provider builds them
    Capabilities,

    /// Build the sample component schemas and print them
    Sample {
        /// Only print this component
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Print the effective configuration
    Config {
        /// Also write it to this file
        #[arg(short, long)]
        path: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match ModelConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    if let Err(e) = run(cli.command, &config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &ModelConfig) -> anyhow::Result<()> {
    match command {
        Commands::Capabilities => {
            println!("Provider: {}", factory::global().provider().name());
            for capability in Capability::ALL {
                match factory::create(capability) {
                    Ok(_) => println!("  ✅ {}", capability),
                    Err(e) => println!("  ❌ {} - {}", capability, e),
                }
            }
            Ok(())
        }

        Commands::Sample { name } => {
            let components = sample_components()?;

            if config.extensions.warn_unprefixed {
                for (component, schema) in &components {
                    for key in config.extensions.unprefixed_keys(schema) {
                        tracing::warn!(%component, %key, "extension key without vendor prefix");
                    }
                }
            }

            let selected: Vec<_> = match &name {
                Some(wanted) => components.iter().filter(|(n, _)| *n == wanted).collect(),
                None => components.iter().collect(),
            };
            if selected.is_empty() {
                bail!("no sample component named {:?}", name.unwrap_or_default());
            }

            let mut rendered = serde_json::Map::new();
            for (component, schema) in selected {
                let value = schema
                    .to_json()
                    .with_context(|| format!("rendering component {}", component))?;
                rendered.insert(component.clone(), value);
            }
            println!(
                "{}",
                config.output.format.render(&serde_json::Value::Object(rendered))?
            );
            Ok(())
        }

        Commands::Config { path } => {
            print!("{}", config.to_toml()?);
            if let Some(path) = path {
                config.save(&path)?;
                println!("Saved to {}", path);
            }
            Ok(())
        }
    }
}

/// The component schemas of the airline booking sample document
fn sample_components() -> openapi_model::Result<BTreeMap<String, Schema>> {
    let mut components = BTreeMap::new();

    components.insert(
        "Bookings".to_string(),
        factory::create_schema()?
            .add_type(SchemaType::Integer)
            .with_title("Bookings")
            .with_reference("#/components.schemas.Booking"),
    );
    components.insert(
        "Airlines".to_string(),
        factory::create_schema()?
            .add_type(SchemaType::Integer)
            .with_title("Airlines"),
    );
    components.insert(
        "AirlinesRef".to_string(),
        factory::create_schema()?.with_reference("Airlines"),
    );
    components.insert(
        "Flight".to_string(),
        factory::create_schema()?
            .add_type(SchemaType::Object)
            .add_property("number", factory::create_schema()?.with_type(SchemaType::String))?
            .add_property(
                "seats",
                factory::create_schema()?
                    .with_type(SchemaType::Integer)
                    .with_minimum(Decimal::from(1i64))
                    .with_maximum(Decimal::from(853i64)),
            )?
            .with_additional_properties_boolean(false)
            .with_required(["number"]),
    );
    components.insert(
        "id".to_string(),
        factory::create_schema()?
            .add_type(SchemaType::Integer)
            .with_format("int32"),
    );

    let mut day = BTreeMap::new();
    day.insert("test".to_string(), AnyValue::from("THURSDAY"));
    components.insert(
        "custom".to_string(),
        factory::create_schema()?
            .with_schema_dialect("http://example.com/myCustomSchema")
            .with_extension("shortKey", 1i16)
            .with_extension("intKey", 2i32)
            .with_extension("longKey", 3i64)
            .with_extension("booleanKey", true)
            .with_extension("charKey", 'a')
            .with_extension("stringKey", "string")
            .with_extension("floatKey", 3.5f32)
            .with_extension("doubleKey", 3.5f64)
            .with_extension("bigDecimalKey", Decimal::parse("3.5")?)
            .with_extension("bigIntegerKey", Decimal::from(7i64))
            .with_extension(
                "extDocKey",
                factory::create_external_documentation()?.with_description("test"),
            )
            .with_extension(
                "discriminatorKey",
                factory::create_discriminator()?.with_property_name("test"),
            )
            .with_extension("schemaKey", factory::create_schema()?.with_title("test"))
            .with_extension("xmlKey", factory::create_xml()?.with_name("test"))
            .with_extension("enumKey", "MONDAY")
            .with_extension(
                "listKey",
                vec![
                    AnyValue::from("test"),
                    AnyValue::from(factory::create_xml()?.with_name("test")),
                ],
            )
            .with_extension("mapKey", day),
    );

    Ok(components)
}
