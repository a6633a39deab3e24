//! Plain-text rendering of the animal card and paginator.

use std::fmt::Write;

use tamagotchi_core::session::Snapshot;
use tamagotchi_logic::constants::STAT_MAX;
use tamagotchi_logic::{Action, Animal, AnimalCatalog, Glyph, Page};

const METER_CELLS: u32 = 20;

fn meter(value: u32) -> String {
    let filled = value.min(STAT_MAX) * METER_CELLS / STAT_MAX;
    let mut bar = String::with_capacity(METER_CELLS as usize + 2);
    bar.push('[');
    for cell in 0..METER_CELLS {
        bar.push(if cell < filled { '#' } else { '-' });
    }
    bar.push(']');
    bar
}

fn stat_line(out: &mut String, label: &str, value: u32, alarm: bool, action: Action) {
    let flag = if alarm { " !" } else { "" };
    let _ = writeln!(
        out,
        "{:<10} {} {:>3}{:<2}  ({})",
        label,
        meter(value),
        value,
        flag,
        action.label().to_lowercase()
    );
}

pub fn card(animal: &Animal) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", animal.kind);
    match (&animal.image_url, &animal.emoji) {
        (Some(url), _) => {
            let _ = writeln!(out, "[image: {}]  {}", url, animal.name);
        }
        (None, Some(emoji)) => {
            let _ = writeln!(out, "{}  {}", emoji, animal.name);
        }
        (None, None) => {
            let _ = writeln!(out, "{}", animal.name);
        }
    }
    stat_line(&mut out, "Hunger", animal.hunger(), animal.is_starving(), Action::Feed);
    stat_line(&mut out, "Happiness", animal.happiness(), animal.is_miserable(), Action::Play);
    stat_line(&mut out, "Sleep", animal.sleepiness(), animal.is_exhausted(), Action::Rest);
    out
}

/// `None` when there is only one animal or none.
pub fn paginator(page: Page) -> Option<String> {
    if !page.is_visible() {
        return None;
    }
    let previous = if page.can_previous() { "< prev" } else { "      " };
    let next = if page.can_next() { "next >" } else { "" };
    Some(format!("{}   {}   {}", previous, page, next).trim_end().to_string())
}

pub fn screen(snapshot: &Snapshot) -> String {
    match &snapshot.current {
        None => "No animals yet. Type `add <name>` to create one.\n".to_string(),
        Some(animal) => {
            let mut out = card(animal);
            if let Some(line) = paginator(snapshot.page) {
                out.push_str(&line);
                out.push('\n');
            }
            out
        }
    }
}

pub fn types(catalog: &AnimalCatalog) -> String {
    let mut out = String::new();
    for kind in catalog.iter() {
        let glyph = match &kind.glyph {
            Glyph::Emoji(e) => e.clone(),
            Glyph::Image(url) => format!("[image: {}]", url),
        };
        let _ = writeln!(out, "  {:<8} {}", kind.name, glyph);
    }
    out
}
