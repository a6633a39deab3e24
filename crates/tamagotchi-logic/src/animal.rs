//! The animal entity and its pure state transforms.
//!
//! Every transform takes an `&Animal` and returns a new `Animal`; nothing is
//! mutated in place. Stats are clamped to `[STAT_MIN, STAT_MAX]` on output, so
//! a valid animal stays valid through any sequence of transforms.

use std::fmt;
use std::num::ParseIntError;

use serde::{Deserialize, Serialize};

use crate::constants::{ACTION_AMOUNT, NEGLECT_PENALTY, STAT_MAX};
use crate::ids::IdGenerator;

/// Stable identifier of an animal. Stored as a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnimalId(u64);

impl AnimalId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AnimalId {
    type Error = ParseIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.trim().parse().map(Self)
    }
}

impl From<AnimalId> for String {
    fn from(id: AnimalId) -> Self {
        id.to_string()
    }
}

/// A virtual pet.
///
/// `hunger` and `sleepiness` run from 0 (satisfied) to 100 (maximal need);
/// `happiness` runs from 0 (miserable) to 100 (delighted). The three rates are
/// fixed at creation and only readable afterwards. Stats are only written
/// through clamping paths, so every `Animal` in existence is in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredAnimal")]
pub struct Animal {
    id: AnimalId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    hunger: u32,
    sleepiness: u32,
    happiness: u32,
    hunger_rate: u32,
    sleepiness_rate: u32,
    happiness_decay: u32,
    /// Milliseconds since the Unix epoch. Informational only.
    pub created_at: i64,
}

/// A record as read from storage, before its stats are clamped.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAnimal {
    id: AnimalId,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    emoji: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    hunger: u32,
    sleepiness: u32,
    happiness: u32,
    hunger_rate: u32,
    sleepiness_rate: u32,
    happiness_decay: u32,
    created_at: i64,
}

impl From<StoredAnimal> for Animal {
    fn from(stored: StoredAnimal) -> Self {
        Self {
            id: stored.id,
            name: stored.name,
            kind: stored.kind,
            emoji: stored.emoji,
            image_url: stored.image_url,
            hunger: stored.hunger.min(STAT_MAX),
            sleepiness: stored.sleepiness.min(STAT_MAX),
            happiness: stored.happiness.min(STAT_MAX),
            hunger_rate: stored.hunger_rate,
            sleepiness_rate: stored.sleepiness_rate,
            happiness_decay: stored.happiness_decay,
            created_at: stored.created_at,
        }
    }
}

/// Everything `create` needs besides the id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnimal {
    pub name: String,
    pub kind: String,
    pub emoji: Option<String>,
    pub image_url: Option<String>,
    pub hunger_rate: u32,
    pub sleepiness_rate: u32,
    pub happiness_decay: u32,
}

/// Create a fresh animal stamped with the current time.
///
/// Rates are copied verbatim. Range checks belong to [`crate::draft`].
pub fn create(spec: NewAnimal, ids: &mut IdGenerator) -> Animal {
    create_at(spec, ids, chrono::Utc::now().timestamp_millis())
}

/// Same as [`create`] with an explicit creation timestamp.
pub fn create_at(spec: NewAnimal, ids: &mut IdGenerator, created_at: i64) -> Animal {
    Animal {
        id: ids.next_id(),
        name: spec.name,
        kind: spec.kind,
        emoji: spec.emoji,
        image_url: spec.image_url,
        hunger: 0,
        sleepiness: 0,
        happiness: STAT_MAX,
        hunger_rate: spec.hunger_rate,
        sleepiness_rate: spec.sleepiness_rate,
        happiness_decay: spec.happiness_decay,
        created_at,
    }
}

/// One periodic tick.
///
/// Needs grow by their rates. Happiness decays by `happiness_decay`, doubled
/// when hunger or sleepiness was already saturated before this tick.
pub fn advance(animal: &Animal) -> Animal {
    let penalty = if animal.is_starving() || animal.is_exhausted() {
        NEGLECT_PENALTY
    } else {
        1
    };

    Animal {
        hunger: animal.hunger.saturating_add(animal.hunger_rate).min(STAT_MAX),
        sleepiness: animal
            .sleepiness
            .saturating_add(animal.sleepiness_rate)
            .min(STAT_MAX),
        happiness: animal
            .happiness
            .saturating_sub(animal.happiness_decay.saturating_mul(penalty))
            .min(STAT_MAX),
        ..animal.clone()
    }
}

/// Lower hunger by [`ACTION_AMOUNT`], floored at zero.
pub fn feed(animal: &Animal) -> Animal {
    Animal {
        hunger: animal.hunger.saturating_sub(ACTION_AMOUNT).min(STAT_MAX),
        ..animal.clone()
    }
}

/// Lower sleepiness by [`ACTION_AMOUNT`], floored at zero.
pub fn rest(animal: &Animal) -> Animal {
    Animal {
        sleepiness: animal.sleepiness.saturating_sub(ACTION_AMOUNT).min(STAT_MAX),
        ..animal.clone()
    }
}

/// Raise happiness by [`ACTION_AMOUNT`], capped at [`STAT_MAX`].
pub fn play(animal: &Animal) -> Animal {
    Animal {
        happiness: animal.happiness.saturating_add(ACTION_AMOUNT).min(STAT_MAX),
        ..animal.clone()
    }
}

impl Animal {
    pub fn id(&self) -> AnimalId {
        self.id
    }

    /// 0 is satisfied, 100 is starving.
    pub fn hunger(&self) -> u32 {
        self.hunger
    }

    /// 0 is rested, 100 is exhausted.
    pub fn sleepiness(&self) -> u32 {
        self.sleepiness
    }

    /// 0 is miserable, 100 is delighted.
    pub fn happiness(&self) -> u32 {
        self.happiness
    }

    /// Hunger gained per tick.
    pub fn hunger_rate(&self) -> u32 {
        self.hunger_rate
    }

    /// Sleepiness gained per tick.
    pub fn sleepiness_rate(&self) -> u32 {
        self.sleepiness_rate
    }

    /// Happiness lost per tick before any neglect penalty.
    pub fn happiness_decay(&self) -> u32 {
        self.happiness_decay
    }

    /// Hunger is saturated.
    pub fn is_starving(&self) -> bool {
        self.hunger >= STAT_MAX
    }

    /// Sleepiness is saturated.
    pub fn is_exhausted(&self) -> bool {
        self.sleepiness >= STAT_MAX
    }

    /// Happiness has bottomed out.
    pub fn is_miserable(&self) -> bool {
        self.happiness == 0
    }

    /// Copy with the three stats replaced, clamped to the stat range.
    pub fn with_stats(&self, hunger: u32, sleepiness: u32, happiness: u32) -> Self {
        Self {
            hunger: hunger.min(STAT_MAX),
            sleepiness: sleepiness.min(STAT_MAX),
            happiness: happiness.min(STAT_MAX),
            ..self.clone()
        }
    }
}

/// A user action on the selected animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Feed,
    Play,
    Rest,
}

impl Action {
    /// In button order.
    pub const ALL: [Action; 3] = [Action::Feed, Action::Play, Action::Rest];

    /// Run the matching transform.
    pub fn apply(self, animal: &Animal) -> Animal {
        match self {
            Action::Feed => feed(animal),
            Action::Play => play(animal),
            Action::Rest => rest(animal),
        }
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Action::Feed => "Feed",
            Action::Play => "Play",
            Action::Rest => "Rest",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(hunger_rate: u32, sleepiness_rate: u32, happiness_decay: u32) -> NewAnimal {
        NewAnimal {
            name: "Coco".into(),
            kind: "Cat".into(),
            emoji: Some("🐱".into()),
            image_url: None,
            hunger_rate,
            sleepiness_rate,
            happiness_decay,
        }
    }

    fn animal(hunger: u32, sleepiness: u32, happiness: u32, rates: (u32, u32, u32)) -> Animal {
        let mut ids = IdGenerator::new();
        create_at(spec(rates.0, rates.1, rates.2), &mut ids, 0).with_stats(
            hunger,
            sleepiness,
            happiness,
        )
    }

    #[test]
    fn test_create_defaults() {
        let mut ids = IdGenerator::new();
        let a = create(spec(7, 3, 9), &mut ids);
        assert_eq!(a.hunger, 0);
        assert_eq!(a.sleepiness, 0);
        assert_eq!(a.happiness, 100);
        assert_eq!(a.hunger_rate(), 7);
        assert_eq!(a.sleepiness_rate(), 3);
        assert_eq!(a.happiness_decay(), 9);
        assert_eq!(a.name, "Coco");
        assert_eq!(a.kind, "Cat");
        assert_eq!(a.emoji.as_deref(), Some("🐱"));
        assert!(a.image_url.is_none());
        assert!(a.created_at > 0);
    }

    #[test]
    fn test_create_does_not_validate_rates() {
        let mut ids = IdGenerator::new();
        let a = create_at(spec(0, 42, 11), &mut ids, 0);
        assert_eq!(a.hunger_rate(), 0);
        assert_eq!(a.sleepiness_rate(), 42);
        assert_eq!(a.happiness_decay(), 11);
    }

    #[test]
    fn test_create_distinct_ids() {
        let mut ids = IdGenerator::new();
        let a = create_at(spec(1, 1, 1), &mut ids, 0);
        let b = create_at(spec(1, 1, 1), &mut ids, 0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_advance_no_penalty() {
        let a = advance(&animal(10, 20, 80, (2, 3, 4)));
        assert_eq!(a.hunger, 12);
        assert_eq!(a.sleepiness, 23);
        assert_eq!(a.happiness, 76);
    }

    #[test]
    fn test_advance_clamps_needs() {
        let a = advance(&animal(95, 99, 100, (10, 10, 1)));
        assert_eq!(a.hunger, 100);
        assert_eq!(a.sleepiness, 100);
        // Needs saturate this tick, penalty applies from the next one
        assert_eq!(a.happiness, 99);
    }

    #[test]
    fn test_advance_penalty_when_starving() {
        let a = advance(&animal(100, 0, 50, (1, 1, 3)));
        assert_eq!(a.happiness, 44);
        assert_eq!(a.hunger, 100);
    }

    #[test]
    fn test_advance_penalty_when_exhausted() {
        let a = advance(&animal(0, 100, 50, (1, 1, 5)));
        assert_eq!(a.happiness, 40);
    }

    #[test]
    fn test_penalty_is_binary() {
        let a = advance(&animal(100, 100, 50, (10, 10, 5)));
        assert_eq!(a.happiness, 40);
    }

    #[test]
    fn test_advance_happiness_floor() {
        let a = advance(&animal(100, 0, 3, (1, 1, 10)));
        assert_eq!(a.happiness, 0);
        assert!(a.is_miserable());
    }

    #[test]
    fn test_advance_three_ticks() {
        let mut ids = IdGenerator::new();
        let mut a = create_at(spec(5, 1, 1), &mut ids, 0);
        for _ in 0..3 {
            a = advance(&a);
        }
        assert_eq!(a.hunger, 15);
        assert_eq!(a.happiness, 97);
    }

    #[test]
    fn test_advance_preserves_identity() {
        let before = animal(1, 2, 3, (4, 5, 6));
        let after = advance(&before);
        assert_eq!(after.id(), before.id());
        assert_eq!(after.name, before.name);
        assert_eq!(after.kind, before.kind);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.hunger_rate(), 4);
        assert_eq!(after.sleepiness_rate(), 5);
        assert_eq!(after.happiness_decay(), 6);
    }

    #[test]
    fn test_feed_floor() {
        assert_eq!(feed(&animal(10, 0, 100, (1, 1, 1))).hunger, 0);
        assert_eq!(feed(&animal(50, 0, 100, (1, 1, 1))).hunger, 30);
    }

    #[test]
    fn test_rest_floor() {
        assert_eq!(rest(&animal(0, 5, 100, (1, 1, 1))).sleepiness, 0);
        assert_eq!(rest(&animal(0, 70, 100, (1, 1, 1))).sleepiness, 50);
    }

    #[test]
    fn test_play_ceiling() {
        assert_eq!(play(&animal(0, 0, 90, (1, 1, 1))).happiness, 100);
        assert_eq!(play(&animal(0, 0, 30, (1, 1, 1))).happiness, 50);
    }

    #[test]
    fn test_actions_touch_one_stat() {
        let a = animal(40, 40, 40, (1, 1, 1));
        let fed = Action::Feed.apply(&a);
        assert_eq!((fed.hunger, fed.sleepiness, fed.happiness), (20, 40, 40));
        let played = Action::Play.apply(&a);
        assert_eq!((played.hunger, played.sleepiness, played.happiness), (40, 40, 60));
        let rested = Action::Rest.apply(&a);
        assert_eq!((rested.hunger, rested.sleepiness, rested.happiness), (40, 20, 40));
    }

    #[test]
    fn test_storage_field_names() {
        let a = animal(10, 20, 90, (1, 2, 3));
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["type"], "Cat");
        assert_eq!(json["hungerRate"], 1);
        assert_eq!(json["sleepinessRate"], 2);
        assert_eq!(json["happinessDecay"], 3);
        assert_eq!(json["createdAt"], 0);
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn test_reads_stored_record() {
        let json = r#"{
            "id": "123",
            "name": "Mrs Mary",
            "type": "Fox",
            "emoji": "🦊",
            "hunger": 10,
            "sleepiness": 5,
            "happiness": 100,
            "hungerRate": 1,
            "sleepinessRate": 1,
            "happinessDecay": 1,
            "createdAt": 1718000000000
        }"#;
        let a: Animal = serde_json::from_str(json).unwrap();
        assert_eq!(a.id(), AnimalId::new(123));
        assert_eq!(a.kind, "Fox");
        assert_eq!(a.hunger, 10);
        assert_eq!(a.created_at, 1_718_000_000_000);
    }

    #[test]
    fn test_stored_stats_clamped_on_read() {
        let json = r#"{
            "id": "7",
            "name": "Greedy",
            "type": "Pig",
            "emoji": "🐷",
            "hunger": 250,
            "sleepiness": 100,
            "happiness": 900,
            "hungerRate": 1,
            "sleepinessRate": 1,
            "happinessDecay": 1,
            "createdAt": 0
        }"#;
        let a: Animal = serde_json::from_str(json).unwrap();
        assert_eq!((a.hunger(), a.sleepiness(), a.happiness()), (100, 100, 100));

        // Transforms that leave a stat alone must not carry an overflow through
        let fed = feed(&a);
        assert_eq!((fed.hunger(), fed.happiness()), (80, 100));
    }

    #[test]
    fn test_with_stats_clamps() {
        let a = animal(0, 0, 0, (1, 1, 1)).with_stats(5000, 101, 7);
        assert_eq!((a.hunger(), a.sleepiness(), a.happiness()), (100, 100, 7));
    }
}
