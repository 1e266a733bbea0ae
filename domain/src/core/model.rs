//! Model value object representing a text-generation model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text-generation models known to the adjudicator (Value Object)
///
/// Unknown identifiers are preserved as [`Model::Custom`], so any model
/// the backend accepts can be placed in the fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// `models/gemini-2.5-pro`
    Gemini25Pro,
    /// `models/gemini-2.5-flash`
    Gemini25Flash,
    /// `models/gemini-2.5-flash-lite`
    Gemini25FlashLite,
    /// `gemini-2.5-pro` (unprefixed alias, tried last)
    Gemini25ProAlias,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Pro => "models/gemini-2.5-pro",
            Model::Gemini25Flash => "models/gemini-2.5-flash",
            Model::Gemini25FlashLite => "models/gemini-2.5-flash-lite",
            Model::Gemini25ProAlias => "gemini-2.5-pro",
            Model::Custom(s) => s,
        }
    }

    /// The default fallback chain, most capable first.
    pub fn default_chain() -> Vec<Model> {
        vec![
            Model::Gemini25Pro,
            Model::Gemini25Flash,
            Model::Gemini25FlashLite,
            Model::Gemini25ProAlias,
        ]
    }

    /// Default chain with its head replaced by `preferred`, if given.
    pub fn chain_with_preferred(preferred: Option<&str>) -> Vec<Model> {
        let mut chain = Self::default_chain();
        if let Some(name) = preferred.map(str::trim).filter(|s| !s.is_empty()) {
            chain[0] = name.parse().unwrap_or_default();
        }
        chain
    }

    /// Resource path used by the backend (`models/<id>`).
    pub fn resource_name(&self) -> String {
        let id = self.as_str();
        if id.starts_with("models/") {
            id.to_string()
        } else {
            format!("models/{}", id)
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::Gemini25Pro
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "models/gemini-2.5-pro" => Model::Gemini25Pro,
            "models/gemini-2.5-flash" => Model::Gemini25Flash,
            "models/gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25ProAlias,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in Model::default_chain() {
            let parsed: Model = model.to_string().parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "gemini-exp-1206".parse().unwrap();
        assert_eq!(model, Model::Custom("gemini-exp-1206".to_string()));
        assert_eq!(model.resource_name(), "models/gemini-exp-1206");
    }

    #[test]
    fn test_default_chain_order() {
        let chain = Model::default_chain();
        assert_eq!(chain.len(), 4);
        assert_eq!(chain[0], Model::Gemini25Pro);
        assert_eq!(chain[3].resource_name(), "models/gemini-2.5-pro");
    }

    #[test]
    fn test_preferred_replaces_head() {
        let chain = Model::chain_with_preferred(Some("models/gemini-2.5-flash"));
        assert_eq!(chain[0], Model::Gemini25Flash);
        assert_eq!(chain[1], Model::Gemini25Flash);

        let chain = Model::chain_with_preferred(Some("  "));
        assert_eq!(chain, Model::default_chain());
    }
}
