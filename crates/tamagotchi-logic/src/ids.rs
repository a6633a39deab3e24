//! Monotonic animal id generation.
//!
//! The generator is owned by whoever owns the collection and passed into
//! [`crate::animal::create`] explicitly.

use crate::animal::{Animal, AnimalId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Start at id 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Continue after the highest id in an already loaded collection, so a
    /// reload never hands out an id that is still in use.
    pub fn resuming_after(animals: &[Animal]) -> Self {
        let highest = animals.iter().map(|a| a.id().value()).max().unwrap_or(0);
        Self {
            next: highest.saturating_add(1),
        }
    }

    /// Hand out the next id and advance.
    pub fn next_id(&mut self) -> AnimalId {
        let id = AnimalId::new(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animal::{create_at, NewAnimal};

    fn spec() -> NewAnimal {
        NewAnimal {
            name: "Pip".into(),
            kind: "Chick".into(),
            emoji: Some("🐤".into()),
            image_url: None,
            hunger_rate: 1,
            sleepiness_rate: 1,
            happiness_decay: 1,
        }
    }

    #[test]
    fn test_starts_at_one() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(), AnimalId::new(1));
        assert_eq!(ids.next_id(), AnimalId::new(2));
    }

    #[test]
    fn test_resumes_after_highest() {
        let mut seed = IdGenerator::new();
        let mut loaded: Vec<Animal> = (0..3).map(|_| create_at(spec(), &mut seed, 0)).collect();
        // Insertion order need not match id order
        loaded.swap(0, 2);

        let mut ids = IdGenerator::resuming_after(&loaded);
        let fresh = ids.next_id();
        assert!(loaded.iter().all(|a| a.id() < fresh));
        assert_eq!(fresh, AnimalId::new(4));
    }

    #[test]
    fn test_resume_on_empty() {
        assert_eq!(IdGenerator::resuming_after(&[]), IdGenerator::new());
    }
}
