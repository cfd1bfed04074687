//! Serializable scene descriptions

use crate::config::{Config, Deserialize, Serialize};

/// A scene as written in a `.ron` or `.toml` file
///
/// ```ron
/// (
///     name: "Arena",
///     entities: [
///         (name: "Player", components: ["Mesh", "Rigidbody"]),
///         (name: "Enemy", components: ["Mesh"]),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    /// Scene name
    pub name: String,
    /// Entities in insertion order
    pub entities: Vec<EntityDescription>,
}

/// One entity of a [`SceneDescription`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityDescription {
    /// Requested name; duplicates are disambiguated by the scene
    pub name: String,
    /// Component type names, attached in order
    pub components: Vec<String>,
}

impl Config for SceneDescription {}

impl SceneDescription {
    /// Create an empty description
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
        }
    }

    /// Append an entity
    pub fn with_entity<I, S>(mut self, name: impl Into<String>, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities.push(EntityDescription {
            name: name.into(),
            components: components.into_iter().map(Into::into).collect(),
        });
        self
    }
}
