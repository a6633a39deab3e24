//! Tamagotchi Core - session controller
//!
//! Owns the animal collection for one user session and wires it to the pure
//! rules in `tamagotchi_logic`:
//! - **Session**: the collection, the selected animal, and the save-failure policy
//! - **Driver**: a single event loop running the periodic tick and user commands
//! - **Persistence**: whole-collection JSON storage under one key
//!
//! # Example
//!
//! ```rust,no_run
//! use tamagotchi_core::prelude::*;
//!
//! # async fn run() -> Result<(), DriverError> {
//! let config = SessionConfig::default();
//! let session = config.open_session();
//! let draft = session.new_draft().with_name("Coco");
//!
//! let handle = driver::spawn(session, config.tick_interval);
//! handle.add(draft).await?;
//! handle.act(Action::Feed)?;
//! let _session = handle.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod persistence;
pub mod session;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::SessionConfig;
    pub use crate::driver::{self, Command, DriverError, DriverHandle};
    pub use crate::persistence::{AnimalStore, FileStore, MemoryStore, StorageError};
    pub use crate::session::{SaveOutcome, Session, Snapshot};
    pub use tamagotchi_logic::{Action, Animal, AnimalCatalog, AnimalDraft, AnimalId, Page};
}
