//! Line commands typed at the prompt.

use anyhow::{bail, Context, Result};
use tamagotchi_logic::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Add {
        name: String,
        kind: Option<String>,
        rates: Option<(u32, u32, u32)>,
    },
    Act(Action),
    Previous,
    Next,
    Show,
    Types,
    Reload,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  add <name> [as <Type>] [rates <hunger> <sleepiness> <decay>]
  feed | play | rest        act on the animal shown
  prev | next               switch animal
  show                      print the current animal
  types                     list animal types
  reload                    reload from storage
  help                      this text
  quit                      leave";

/// Reply to the "reload?" question shown after a failed save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadAnswer {
    Reload,
    Dismiss,
}

/// Only `y` (any case, surrounding blanks ignored) reloads.
pub fn reload_answer(line: &str) -> ReloadAnswer {
    if line.trim().eq_ignore_ascii_case("y") {
        ReloadAnswer::Reload
    } else {
        ReloadAnswer::Dismiss
    }
}

/// Parse one line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    if let Some(action) = Action::ALL
        .into_iter()
        .find(|a| a.label().eq_ignore_ascii_case(command))
    {
        return Ok(Some(Input::Act(action)));
    }

    let input = match command.to_ascii_lowercase().as_str() {
        "add" | "new" => parse_add(words.collect())?,
        "sleep" => Input::Act(Action::Rest),
        "prev" | "previous" => Input::Previous,
        "next" => Input::Next,
        "show" => Input::Show,
        "types" => Input::Types,
        "reload" => Input::Reload,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => bail!("unknown command {:?}, try `help`", other),
    };
    Ok(Some(input))
}

fn parse_add(words: Vec<&str>) -> Result<Input> {
    let mut name = Vec::new();
    let mut kind = None;
    let mut rates = None;

    let mut i = 0;
    while i < words.len() {
        match words[i] {
            "as" if i + 1 < words.len() => {
                kind = Some(words[i + 1].to_string());
                i += 2;
            }
            "rates" => {
                let values = words
                    .get(i + 1..i + 4)
                    .context("rates needs three numbers: hunger sleepiness decay")?;
                let parsed = values
                    .iter()
                    .map(|v| v.parse::<u32>().with_context(|| format!("{:?} is not a rate", v)))
                    .collect::<Result<Vec<_>>>()?;
                rates = Some((parsed[0], parsed[1], parsed[2]));
                i += 4;
            }
            word => {
                name.push(word);
                i += 1;
            }
        }
    }

    Ok(Input::Add {
        name: name.join(" "),
        kind,
        rates,
    })
}
