//! Creation form state and validation.
//!
//! An `AnimalDraft` holds what the user has typed and picked so far. It starts
//! from the catalog's default type and default rates, and only becomes a
//! [`NewAnimal`] once [`AnimalDraft::validate`] accepts it.

use thiserror::Error;

use crate::animal::NewAnimal;
use crate::catalog::{AnimalCatalog, Glyph};
use crate::constants::{DEFAULT_RATE, MAX_NAME_LENGTH, RATE_MAX, RATE_MIN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalDraft {
    pub name: String,
    pub kind: String,
    pub glyph: Glyph,
    pub hunger_rate: u32,
    pub sleepiness_rate: u32,
    pub happiness_decay: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("name is required")]
    EmptyName,
    #[error("name is {len} characters, at most {max} allowed", max = MAX_NAME_LENGTH)]
    NameTooLong { len: usize },
    #[error("{field} must be between {min} and {max}, got {value}", min = RATE_MIN, max = RATE_MAX)]
    RateOutOfRange { field: &'static str, value: u32 },
}

impl AnimalDraft {
    pub fn new(catalog: &AnimalCatalog) -> Self {
        let default = catalog.default_type();
        Self {
            name: String::new(),
            kind: default.name.clone(),
            glyph: default.glyph.clone(),
            hunger_rate: DEFAULT_RATE,
            sleepiness_rate: DEFAULT_RATE,
            happiness_decay: DEFAULT_RATE,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Switch type, taking its glyph from the catalog. Unknown names select
    /// the default type.
    pub fn with_kind(mut self, catalog: &AnimalCatalog, kind: &str) -> Self {
        let selected = catalog.find_or_default(kind);
        self.kind = selected.name.clone();
        self.glyph = selected.glyph.clone();
        self
    }

    pub fn with_rates(mut self, hunger_rate: u32, sleepiness_rate: u32, happiness_decay: u32) -> Self {
        self.hunger_rate = hunger_rate;
        self.sleepiness_rate = sleepiness_rate;
        self.happiness_decay = happiness_decay;
        self
    }

    /// Whether the create button would be enabled.
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<NewAnimal, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }
        let len = name.chars().count();
        if len > MAX_NAME_LENGTH {
            return Err(DraftError::NameTooLong { len });
        }

        for (field, value) in [
            ("hunger rate", self.hunger_rate),
            ("sleepiness rate", self.sleepiness_rate),
            ("happiness decay", self.happiness_decay),
        ] {
            if !(RATE_MIN..=RATE_MAX).contains(&value) {
                return Err(DraftError::RateOutOfRange { field, value });
            }
        }

        Ok(NewAnimal {
            name: name.to_string(),
            kind: self.kind.clone(),
            emoji: self.glyph.emoji().map(str::to_string),
            image_url: self.glyph.image_url().map(str::to_string),
            hunger_rate: self.hunger_rate,
            sleepiness_rate: self.sleepiness_rate,
            happiness_decay: self.happiness_decay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_draft_defaults() {
        let catalog = AnimalCatalog::builtin();
        let draft = AnimalDraft::new(&catalog);
        assert_eq!(draft.name, "");
        assert_eq!(draft.kind, "Poodle");
        assert_eq!(draft.glyph, Glyph::Image("/src/assets/poodle.svg".into()));
        assert_eq!(
            (draft.hunger_rate, draft.sleepiness_rate, draft.happiness_decay),
            (1, 1, 1)
        );
        assert!(!draft.can_submit());
    }

    #[test]
    fn test_validate_trims_name() {
        let catalog = AnimalCatalog::builtin();
        let spec = AnimalDraft::new(&catalog)
            .with_name("  Coco  ")
            .with_kind(&catalog, "Cat")
            .validate()
            .unwrap();
        assert_eq!(spec.name, "Coco");
        assert_eq!(spec.kind, "Cat");
        assert_eq!(spec.emoji.as_deref(), Some("🐱"));
        assert_eq!(spec.image_url, None);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_blank_name_rejected(#[case] name: &str) {
        let catalog = AnimalCatalog::builtin();
        let draft = AnimalDraft::new(&catalog).with_name(name);
        assert_eq!(draft.validate(), Err(DraftError::EmptyName));
    }

    #[test]
    fn test_name_length_counts_characters() {
        let catalog = AnimalCatalog::builtin();
        let exact = "é".repeat(MAX_NAME_LENGTH);
        assert!(AnimalDraft::new(&catalog).with_name(exact).can_submit());

        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            AnimalDraft::new(&catalog).with_name(long).validate(),
            Err(DraftError::NameTooLong { len: 26 })
        );
    }

    #[rstest]
    #[case(0, 1, 1, "hunger rate", 0)]
    #[case(1, 11, 1, "sleepiness rate", 11)]
    #[case(1, 1, 0, "happiness decay", 0)]
    fn test_rate_bounds(
        #[case] h: u32,
        #[case] s: u32,
        #[case] d: u32,
        #[case] field: &'static str,
        #[case] value: u32,
    ) {
        let catalog = AnimalCatalog::builtin();
        let draft = AnimalDraft::new(&catalog).with_name("Rex").with_rates(h, s, d);
        assert_eq!(
            draft.validate(),
            Err(DraftError::RateOutOfRange { field, value })
        );
    }

    #[test]
    fn test_rate_extremes_accepted() {
        let catalog = AnimalCatalog::builtin();
        let spec = AnimalDraft::new(&catalog)
            .with_name("Rex")
            .with_rates(1, 10, 10)
            .validate()
            .unwrap();
        assert_eq!((spec.hunger_rate, spec.sleepiness_rate, spec.happiness_decay), (1, 10, 10));
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let catalog = AnimalCatalog::builtin();
        let draft = AnimalDraft::new(&catalog)
            .with_kind(&catalog, "Fox")
            .with_kind(&catalog, "Unicorn");
        assert_eq!(draft.kind, "Poodle");
        assert!(draft.glyph.image_url().is_some());
    }
}
