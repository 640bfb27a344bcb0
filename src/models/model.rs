use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Model identifiers known to the facade.
///
/// Unknown names round-trip through [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Model {
    /// `gemini-2.0-flash`
    #[default]
    Gemini20Flash,
    /// `gemini-2.0-flash-lite`
    Gemini20FlashLite,
    /// `gemini-1.5-flash`
    Gemini15Flash,
    /// `gemini-1.5-pro`
    Gemini15Pro,
    /// `gemini-2.5-flash`
    Gemini25Flash,
    /// `gemini-2.5-pro`
    Gemini25Pro,
    /// `imagen-3.0-generate-002`
    Imagen3,
    /// `veo-2.0-generate-001`
    Veo2,
    /// `text-embedding-004`
    TextEmbedding004,
    /// Any other model name
    Custom(String),
}

impl Model {
    /// The bare model name, e.g. `gemini-2.0-flash`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gemini20Flash => "gemini-2.0-flash",
            Self::Gemini20FlashLite => "gemini-2.0-flash-lite",
            Self::Gemini15Flash => "gemini-1.5-flash",
            Self::Gemini15Pro => "gemini-1.5-pro",
            Self::Gemini25Flash => "gemini-2.5-flash",
            Self::Gemini25Pro => "gemini-2.5-pro",
            Self::Imagen3 => "imagen-3.0-generate-002",
            Self::Veo2 => "veo-2.0-generate-001",
            Self::TextEmbedding004 => "text-embedding-004",
            Self::Custom(name) => name,
        }
    }

    /// The resource name used in URLs and request bodies, e.g. `models/gemini-2.0-flash`.
    pub fn resource_name(&self) -> String {
        let name = self.as_str();
        if name.starts_with("models/") || name.starts_with("tunedModels/") {
            name.to_string()
        } else {
            format!("models/{name}")
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Model {
    fn from(name: &str) -> Self {
        match name {
            "gemini-2.0-flash" => Self::Gemini20Flash,
            "gemini-2.0-flash-lite" => Self::Gemini20FlashLite,
            "gemini-1.5-flash" => Self::Gemini15Flash,
            "gemini-1.5-pro" => Self::Gemini15Pro,
            "gemini-2.5-flash" => Self::Gemini25Flash,
            "gemini-2.5-pro" => Self::Gemini25Pro,
            "imagen-3.0-generate-002" => Self::Imagen3,
            "veo-2.0-generate-001" => Self::Veo2,
            "text-embedding-004" => Self::TextEmbedding004,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for Model {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(String::deserialize(deserializer)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_map_to_variants() {
        assert_eq!(Model::from("gemini-1.5-pro"), Model::Gemini15Pro);
        assert_eq!(Model::from("imagen-3.0-generate-002"), Model::Imagen3);
        assert_eq!(
            Model::from("gemini-exp-1206"),
            Model::Custom("gemini-exp-1206".into())
        );
    }

    #[test]
    fn resource_name_is_not_double_prefixed() {
        assert_eq!(Model::Gemini20Flash.resource_name(), "models/gemini-2.0-flash");
        assert_eq!(
            Model::from("models/gemini-2.0-flash").resource_name(),
            "models/gemini-2.0-flash"
        );
        assert_eq!(
            Model::from("tunedModels/my-model").resource_name(),
            "tunedModels/my-model"
        );
    }

    #[test]
    fn serializes_as_bare_name() {
        let json = serde_json::to_string(&Model::TextEmbedding004).unwrap();
        assert_eq!(json, "\"text-embedding-004\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Model::TextEmbedding004);
    }
}
