//! The closed set of constructible node kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// A node kind the construction registry can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Recursive JSON-Schema derived node
    Schema,
    /// Polymorphism hint attached to a schema
    Discriminator,
    /// XML rendering metadata attached to a schema
    Xml,
    /// Pointer to external documentation
    ExternalDocumentation,
}

impl Capability {
    /// Every capability, in declaration order
    pub const ALL: [Capability; 4] = [
        Capability::Schema,
        Capability::Discriminator,
        Capability::Xml,
        Capability::ExternalDocumentation,
    ];

    /// Interface name of this capability (e.g., "ExternalDocumentation")
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Schema => "Schema",
            Capability::Discriminator => "Discriminator",
            Capability::Xml => "XML",
            Capability::ExternalDocumentation => "ExternalDocumentation",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Schema" => Ok(Capability::Schema),
            "Discriminator" => Ok(Capability::Discriminator),
            "XML" | "Xml" => Ok(Capability::Xml),
            "ExternalDocumentation" => Ok(Capability::ExternalDocumentation),
            other => Err(ModelError::unsupported(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        for capability in Capability::ALL {
            assert_eq!(capability.name().parse::<Capability>().unwrap(), capability);
        }
        assert_eq!("Xml".parse::<Capability>().unwrap(), Capability::Xml);
    }

    #[test]
    fn test_parse_outside_closed_set() {
        let err = "Info".parse::<Capability>().unwrap_err();
        assert!(matches!(
            err,
            ModelError::UnsupportedCapability { ref capability } if capability == "Info"
        ));
    }
}
