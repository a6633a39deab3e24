//! Tamagotchi terminal front-end
//!
//! Look after virtual pets from a terminal. Stats tick in the background;
//! commands typed at the prompt act on the animal shown.
//!
//! Usage:
//!   cargo run -p tamagotchi-cli
//!   cargo run -p tamagotchi-cli -- --tick-ms 1000 --live

mod commands;
mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tamagotchi_core::config::{default_storage_dir, SessionConfig};
use tamagotchi_core::driver::{self, DriverHandle};
use tamagotchi_core::persistence::FileStore;
use tamagotchi_core::session::Snapshot;
use tamagotchi_logic::constants::{STORAGE_KEY, TICK_INTERVAL_MS};
use tamagotchi_logic::{AnimalCatalog, AnimalDraft};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use commands::{Input, ReloadAnswer};

const SAVE_FAILED: &str = "Something went wrong while saving your animal.\n\nReload to fix this? [y/N]\n";

#[derive(Debug, Parser)]
#[command(name = "tamagotchi", version, about = "Look after virtual pets from the terminal")]
struct Args {
    /// Directory the animals are stored in
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Storage key, also the file name
    #[arg(long, default_value = STORAGE_KEY)]
    key: String,

    /// Milliseconds between stat ticks
    #[arg(long, value_name = "MS", default_value_t = TICK_INTERVAL_MS,
          value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Redraw the card on every tick
    #[arg(long)]
    live: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            tick_interval: Duration::from_millis(self.tick_ms),
            storage_dir: self.data_dir.clone().unwrap_or_else(default_storage_dir),
            storage_key: self.key.clone(),
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Also installs the bridge that forwards `log` records from the library crates
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Front-end state that outlives a single line of input.
struct Prompt {
    catalog: AnimalCatalog,
    live: bool,
    redraw: bool,
    asking_reload: bool,
}

impl Prompt {
    fn new(catalog: AnimalCatalog, live: bool) -> Self {
        Self {
            catalog,
            live,
            redraw: false,
            asking_reload: false,
        }
    }

    /// What to print for a freshly published snapshot, if anything.
    fn on_snapshot(&mut self, snapshot: &Snapshot) -> Option<String> {
        if snapshot.save_failed && !self.asking_reload {
            self.asking_reload = true;
            Some(SAVE_FAILED.to_string())
        } else if self.redraw || self.live {
            self.redraw = false;
            Some(render::screen(snapshot))
        } else {
            None
        }
    }

    /// Consume `line` as the answer to a pending reload question.
    fn take_reload_answer(&mut self, line: &str) -> Option<ReloadAnswer> {
        if !self.asking_reload {
            return None;
        }
        self.asking_reload = false;
        self.redraw = true;
        Some(commands::reload_answer(line))
    }

    /// Returns `false` when the user wants to leave.
    async fn handle_line(&mut self, handle: &DriverHandle<FileStore>, line: &str) -> Result<bool> {
        if let Some(answer) = self.take_reload_answer(line) {
            match answer {
                ReloadAnswer::Reload => handle.reload()?,
                ReloadAnswer::Dismiss => handle.dismiss_save_failure()?,
            }
            return Ok(true);
        }

        let input = match commands::parse(line) {
            Ok(Some(input)) => input,
            Ok(None) => return Ok(true),
            Err(e) => {
                log::debug!("Rejected input {:?}", line);
                println!("{}", e);
                return Ok(true);
            }
        };

        match input {
            Input::Add { name, kind, rates } => {
                let mut draft = AnimalDraft::new(&self.catalog).with_name(name);
                if let Some(kind) = kind {
                    if self.catalog.find(&kind).is_none() {
                        println!("Unknown type {:?}, using {}", kind, self.catalog.default_type().name);
                    }
                    draft = draft.with_kind(&self.catalog, &kind);
                }
                if let Some((h, s, d)) = rates {
                    draft = draft.with_rates(h, s, d);
                }
                match handle.add(draft).await {
                    Ok(_) => self.redraw = true,
                    Err(driver::DriverError::Draft(e)) => println!("Cannot create animal: {}", e),
                    Err(e) => return Err(e.into()),
                }
            }
            Input::Act(action) => {
                handle.act(action)?;
                self.redraw = true;
            }
            Input::Previous => {
                handle.previous()?;
                self.redraw = true;
            }
            Input::Next => {
                handle.next()?;
                self.redraw = true;
            }
            Input::Reload => {
                handle.reload()?;
                self.redraw = true;
            }
            Input::Show => print!("{}", render::screen(&handle.snapshot())),
            Input::Types => print!("{}", render::types(&self.catalog)),
            Input::Help => println!("{}", commands::HELP),
            Input::Quit => return Ok(false),
        }
        Ok(true)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.session_config();
    log::info!("Storing animals in {}", config.store().path().display());
    let session = config.open_session();
    let mut prompt = Prompt::new(session.catalog().clone(), args.live);

    let handle = driver::spawn(session, config.tick_interval);
    let mut snapshots = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", render::screen(&handle.snapshot()));
    println!("Type `help` for commands.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if !prompt.handle_line(&handle, &line).await? {
                    break;
                }
            }
            changed = snapshots.changed() => {
                changed.context("session driver stopped")?;
                let snapshot = snapshots.borrow_and_update().clone();
                if let Some(text) = prompt.on_snapshot(&snapshot) {
                    print!("{}", text);
                }
            }
        }
    }

    let session = handle.shutdown().await?;
    log::info!("Goodbye after {} ticks", session.ticks());
    Ok(())
}
