//! Pure pet logic for Tamagotchi.
//!
//! This crate contains every rule of the game that is independent of storage,
//! timers, or rendering. Functions take plain values and return new values,
//! making them unit-testable and usable from any front-end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`animal`] | The animal entity, the tick rule, and the feed/play/rest actions |
//! | [`catalog`] | Fixed list of animal types and their display glyphs |
//! | [`constants`] | Stat bounds, action amounts, rate bounds, timing, storage key |
//! | [`draft`] | Creation form state and its validation |
//! | [`ids`] | Monotonic animal id generation |
//! | [`pagination`] | "N of M" navigation over the animal collection |

pub mod animal;
pub mod catalog;
pub mod constants;
pub mod draft;
pub mod ids;
pub mod pagination;

pub use animal::{Action, Animal, AnimalId, NewAnimal};
pub use catalog::{AnimalCatalog, AnimalType, Glyph};
pub use draft::{AnimalDraft, DraftError};
pub use ids::IdGenerator;
pub use pagination::Page;
