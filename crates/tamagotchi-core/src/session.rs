//! Session controller: owns the animal collection and the current selection.
//!
//! Every change goes through the pure transforms in `tamagotchi_logic` and is
//! then persisted as a whole-collection overwrite. A failed save is recorded
//! and stays flagged until the front-end reloads or dismisses it.

use tamagotchi_logic::animal::{self, Action, Animal, AnimalId};
use tamagotchi_logic::{AnimalCatalog, AnimalDraft, DraftError, IdGenerator, Page};

use crate::persistence::AnimalStore;

/// What happened to the collection after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Nothing to save yet: an empty collection is never written.
    Skipped,
    Failed,
}

/// Read-only view handed to front-ends after each event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub current: Option<Animal>,
    pub page: Page,
    pub save_failed: bool,
    pub ticks: u64,
}

pub struct Session<S> {
    store: S,
    catalog: AnimalCatalog,
    animals: Vec<Animal>,
    selected: usize,
    ids: IdGenerator,
    save_failed: bool,
    ticks: u64,
}

impl<S: AnimalStore> Session<S> {
    /// Load whatever the store holds and select the first animal.
    pub fn open(store: S, catalog: AnimalCatalog) -> Self {
        let animals = store.load();
        log::info!("Loaded {} animals", animals.len());
        Self {
            ids: IdGenerator::resuming_after(&animals),
            store,
            catalog,
            animals,
            selected: 0,
            save_failed: false,
            ticks: 0,
        }
    }

    /// All animals in insertion order.
    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    /// Types offered when creating an animal.
    pub fn catalog(&self) -> &AnimalCatalog {
        &self.catalog
    }

    /// The selected animal, `None` while the collection is empty.
    pub fn current(&self) -> Option<&Animal> {
        self.animals.get(self.selected)
    }

    /// Selection as a page position.
    pub fn page(&self) -> Page {
        Page::new(self.selected, self.animals.len())
    }

    /// Whether a save failed since the last reload or dismissal.
    pub fn save_failed(&self) -> bool {
        self.save_failed
    }

    /// Ticks applied since the session was opened.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Owned copy of what a front-end needs to draw.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current: self.current().cloned(),
            page: self.page(),
            save_failed: self.save_failed,
            ticks: self.ticks,
        }
    }

    /// A fresh creation form for this session's catalog.
    pub fn new_draft(&self) -> AnimalDraft {
        AnimalDraft::new(&self.catalog)
    }

    /// Validate and create an animal, append it, and select it.
    pub fn add(&mut self, draft: &AnimalDraft) -> Result<AnimalId, DraftError> {
        let spec = draft.validate()?;
        let created = animal::create(spec, &mut self.ids);
        let id = created.id();
        log::info!("Created {} the {} (id {})", created.name, created.kind, id);

        self.animals.push(created);
        self.selected = self.animals.len() - 1;
        self.persist();
        Ok(id)
    }

    /// Apply a user action to the selected animal only.
    pub fn apply(&mut self, action: Action) -> Option<AnimalId> {
        let current = self.animals.get_mut(self.selected)?;
        *current = action.apply(current);
        let id = current.id();
        log::debug!("{} applied to animal {}", action.label(), id);

        self.persist();
        Some(id)
    }

    /// Advance every animal by one tick.
    pub fn tick(&mut self) -> SaveOutcome {
        self.animals = self.animals.iter().map(animal::advance).collect();
        self.ticks += 1;
        log::debug!("Tick {} advanced {} animals", self.ticks, self.animals.len());
        self.persist()
    }

    /// Select the previous animal; stays put on the first.
    pub fn previous(&mut self) -> Page {
        self.selected = self.page().previous().index;
        self.page()
    }

    /// Select the next animal; stays put on the last.
    pub fn next(&mut self) -> Page {
        self.selected = self.page().next().index;
        self.page()
    }

    /// Throw away in-memory state and start over from what is stored.
    pub fn reload(&mut self) {
        self.animals = self.store.load();
        self.ids = IdGenerator::resuming_after(&self.animals);
        self.selected = 0;
        self.save_failed = false;
        log::info!("Reloaded {} animals", self.animals.len());
    }

    /// Clear the save-failure flag without touching the collection.
    pub fn dismiss_save_failure(&mut self) {
        self.save_failed = false;
    }

    fn persist(&mut self) -> SaveOutcome {
        if self.animals.is_empty() {
            return SaveOutcome::Skipped;
        }
        if self.store.save(&self.animals) {
            SaveOutcome::Saved
        } else {
            self.save_failed = true;
            SaveOutcome::Failed
        }
    }
}
