//! Animal-type catalog: the fixed list of types offered at creation.
//!
//! The built-in list ships as JSON embedded at compile time. Each entry names
//! a type and exactly one display glyph, either an emoji or an image reference.

use serde::Deserialize;
use thiserror::Error;

const ANIMAL_TYPES_JSON: &str = include_str!("../data/animal_types.json");

/// How a type is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Glyph {
    Emoji(String),
    Image(String),
}

impl Glyph {
    pub fn emoji(&self) -> Option<&str> {
        match self {
            Glyph::Emoji(e) => Some(e),
            Glyph::Image(_) => None,
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        match self {
            Glyph::Emoji(_) => None,
            Glyph::Image(url) => Some(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalType {
    pub name: String,
    pub glyph: Glyph,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnimalType {
    #[serde(rename = "type")]
    name: String,
    emoji: Option<String>,
    image_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog has no animal types")]
    Empty,
    #[error("animal type {0:?} is listed more than once")]
    Duplicate(String),
    #[error("animal type {0:?} needs exactly one of emoji or imageUrl")]
    Glyph(String),
}

/// Ordered, non-empty list of animal types. The first entry is the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalCatalog {
    types: Vec<AnimalType>,
}

impl AnimalCatalog {
    /// The twelve types the game ships with.
    ///
    /// A broken embedded file is logged at `error` and replaced by a single
    /// Cat entry so creation still works.
    pub fn builtin() -> Self {
        Self::from_json(ANIMAL_TYPES_JSON).unwrap_or_else(|e| {
            log::error!("Built-in animal types are invalid: {}", e);
            Self::fallback()
        })
    }

    fn fallback() -> Self {
        Self {
            types: vec![AnimalType {
                name: "Cat".into(),
                glyph: Glyph::Emoji("🐱".into()),
            }],
        }
    }

    /// Parse and validate a JSON array of `{type, emoji | imageUrl}` entries.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawAnimalType> = serde_json::from_str(json)?;
        if raw.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut types: Vec<AnimalType> = Vec::with_capacity(raw.len());
        for entry in raw {
            if types.iter().any(|t| t.name == entry.name) {
                return Err(CatalogError::Duplicate(entry.name));
            }
            let glyph = match (entry.emoji, entry.image_url) {
                (Some(emoji), None) => Glyph::Emoji(emoji),
                (None, Some(url)) => Glyph::Image(url),
                _ => return Err(CatalogError::Glyph(entry.name)),
            };
            types.push(AnimalType {
                name: entry.name,
                glyph,
            });
        }

        Ok(Self { types })
    }

    /// The first entry, preselected in the creation form.
    pub fn default_type(&self) -> &AnimalType {
        &self.types[0]
    }

    /// Exact, case-sensitive lookup.
    pub fn find(&self, name: &str) -> Option<&AnimalType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Lookup that falls back to the default type for unknown names.
    pub fn find_or_default(&self, name: &str) -> &AnimalType {
        self.find(name).unwrap_or_else(|| self.default_type())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimalType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for AnimalCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
