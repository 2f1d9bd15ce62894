//! Configuration for model tooling
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (oas-model.toml)
//! - Environment variables (OAS_MODEL_*)
//!
//! ## Example config file (oas-model.toml):
//! ```toml
//! [output]
//! format = "compact"
//!
//! [logging]
//! filter = "openapi_model=debug"
//!
//! [extensions]
//! vendor_prefix = "x-"
//! warn_unprefixed = true
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extension::Extensible;
use crate::schema::SCHEMA_DIALECT_KEY;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// How JSON views are printed
    #[serde(default)]
    pub output: OutputConfig,

    /// Log filter used when RUST_LOG is unset
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Extension key conventions
    #[serde(default)]
    pub extensions: ExtensionConfig,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    pub fn render(&self, value: &serde_json::Value) -> Result<String> {
        let text = match self {
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
            OutputFormat::Compact => serde_json::to_string(value)?,
        };
        Ok(text)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

/// Extension key conventions, checked by [`ExtensionConfig::unprefixed_keys`]
///
/// The store itself accepts any key; this is advisory only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionConfig {
    #[serde(default = "default_vendor_prefix")]
    pub vendor_prefix: String,

    #[serde(default = "default_true")]
    pub warn_unprefixed: bool,
}

// Default value functions
fn default_filter() -> String {
    "info".to_string()
}

fn default_vendor_prefix() -> String {
    "x-".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            vendor_prefix: default_vendor_prefix(),
            warn_unprefixed: true,
        }
    }
}

impl ExtensionConfig {
    /// Extension keys of `node` that are neither vendor-prefixed nor known keywords
    pub fn unprefixed_keys(&self, node: &impl Extensible) -> Vec<String> {
        node.extensions()
            .into_keys()
            .filter(|key| !key.starts_with(&self.vendor_prefix) && key != SCHEMA_DIALECT_KEY)
            .collect()
    }
}

impl ModelConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = ["oas-model.toml", ".oas-model.toml", "config/oas-model.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "openapi-model", "oas-model") {
            let xdg_config = config_dir.config_dir().join("oas-model.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // OAS_MODEL_OUTPUT__FORMAT=compact etc.
        builder = builder.add_source(
            Environment::with_prefix("OAS_MODEL")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::schema::Schema;

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();
        assert_eq!(config.output.format, OutputFormat::Pretty);
        assert_eq!(config.extensions.vendor_prefix, "x-");
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_serialize_config() {
        let toml_str = ModelConfig::default().to_toml().unwrap();
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("[extensions]"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[output]\nformat = \"compact\"\n\n[extensions]\nvendor_prefix = \"x-acme-\"\n",
        )
        .unwrap();

        let config = ModelConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.output.format, OutputFormat::Compact);
        assert_eq!(config.extensions.vendor_prefix, "x-acme-");
        assert!(config.extensions.warn_unprefixed);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = ModelConfig::default();
        config.output.format = OutputFormat::Compact;
        config.save(path.to_str().unwrap()).unwrap();

        let loaded = ModelConfig::load_from(path.to_str()).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Compact);
    }

    #[test]
    fn test_unprefixed_keys() {
        let schema = Schema::empty()
            .with_schema_dialect("http://example.com/dialect")
            .with_extension("x-ok", 1i32)
            .with_extension("shortKey", 2i32);
        let keys = ExtensionConfig::default().unprefixed_keys(&schema);
        assert_eq!(keys, vec!["shortKey".to_string()]);
    }

    #[test]
    fn test_load_errors_surface_as_model_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = ModelConfig::load_from(missing.to_str()).unwrap_err();
        assert!(matches!(err, ModelError::Config(_)));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[output]\nformat = \"sideways\"\n").unwrap();
        let err = ModelConfig::load_from(bad.to_str()).unwrap_err();
        assert!(matches!(err, ModelError::Config(_)));
    }

    #[test]
    fn test_save_into_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("saved.toml");
        let err = ModelConfig::default().save(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ModelError::Io(_)));
    }

    #[test]
    fn test_output_format_render() {
        let value = serde_json::json!({"a": 1});
        assert_eq!(OutputFormat::Compact.render(&value).unwrap(), "{\"a\":1}");
        assert!(OutputFormat::Pretty.render(&value).unwrap().contains('\n'));
    }
}
