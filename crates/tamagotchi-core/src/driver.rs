//! Tick driver: the single event loop a session runs on.
//!
//! One task owns the [`Session`] and alternates between the periodic tick and
//! user commands, running each to completion before taking the next. The
//! timer lives inside that task, so it stops as soon as the loop ends: on
//! [`Command::Shutdown`], on [`DriverHandle::shutdown`], or when the handle is
//! dropped.

use std::time::Duration;

use tamagotchi_logic::{Action, AnimalDraft, AnimalId, DraftError};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::persistence::AnimalStore;
use crate::session::{Session, Snapshot};

/// Shortest accepted tick period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug)]
pub enum Command {
    Add {
        draft: AnimalDraft,
        reply: oneshot::Sender<Result<AnimalId, DraftError>>,
    },
    Act(Action),
    Previous,
    Next,
    Reload,
    DismissSaveFailure,
    Shutdown,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("session driver has stopped")]
    Closed,
    #[error(transparent)]
    Draft(#[from] DraftError),
}

/// Front-end side of a running driver.
pub struct DriverHandle<S> {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<Snapshot>,
    task: JoinHandle<Session<S>>,
}

/// Start the event loop for `session` on the current tokio runtime.
///
/// The first tick fires one full `period` after spawning.
pub fn spawn<S>(session: Session<S>, period: Duration) -> DriverHandle<S>
where
    S: AnimalStore + Send + 'static,
{
    let (commands, rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshots) = watch::channel(session.snapshot());
    let task = tokio::spawn(run(session, period.max(MIN_PERIOD), rx, snapshot_tx));

    DriverHandle {
        commands,
        snapshots,
        task,
    }
}

async fn run<S: AnimalStore>(
    mut session: Session<S>,
    period: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<Snapshot>,
) -> Session<S> {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    log::debug!("Driver started, ticking every {:?}", period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                session.tick();
            }
            command = commands.recv() => match command {
                None | Some(Command::Shutdown) => break,
                Some(command) => handle(&mut session, command),
            },
        }
        snapshots.send_replace(session.snapshot());
    }

    log::debug!("Driver stopped after {} ticks", session.ticks());
    session
}

fn handle<S: AnimalStore>(session: &mut Session<S>, command: Command) {
    match command {
        Command::Add { draft, reply } => {
            // The caller may have stopped waiting; the animal is kept either way
            let _ = reply.send(session.add(&draft));
        }
        Command::Act(action) => {
            session.apply(action);
        }
        Command::Previous => {
            session.previous();
        }
        Command::Next => {
            session.next();
        }
        Command::Reload => session.reload(),
        Command::DismissSaveFailure => session.dismiss_save_failure(),
        Command::Shutdown => {}
    }
}

impl<S> DriverHandle<S> {
    pub fn send(&self, command: Command) -> Result<(), DriverError> {
        self.commands.send(command).map_err(|_| DriverError::Closed)
    }

    pub fn act(&self, action: Action) -> Result<(), DriverError> {
        self.send(Command::Act(action))
    }

    pub fn previous(&self) -> Result<(), DriverError> {
        self.send(Command::Previous)
    }

    pub fn next(&self) -> Result<(), DriverError> {
        self.send(Command::Next)
    }

    pub fn reload(&self) -> Result<(), DriverError> {
        self.send(Command::Reload)
    }

    pub fn dismiss_save_failure(&self) -> Result<(), DriverError> {
        self.send(Command::DismissSaveFailure)
    }

    /// Create an animal and wait for the session to accept or reject it.
    pub async fn add(&self, draft: AnimalDraft) -> Result<AnimalId, DriverError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Add { draft, reply })?;
        let id = response.await.map_err(|_| DriverError::Closed)??;
        Ok(id)
    }

    /// Latest published state.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Independent receiver for the published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Wait for the next tick or processed command.
    pub async fn changed(&mut self) -> Result<Snapshot, DriverError> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| DriverError::Closed)?;
        Ok(self.snapshots.borrow_and_update().clone())
    }

    /// Stop the loop and get the session back.
    pub async fn shutdown(self) -> Result<Session<S>, DriverError> {
        // Already stopped if this fails; the join below still returns the session
        let _ = self.commands.send(Command::Shutdown);
        self.task.await.map_err(|e| {
            log::error!("Driver task failed: {}", e);
            DriverError::Closed
        })
    }
}
