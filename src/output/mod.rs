//! Output formatting for CLI display
//!
//! Subcommands print the same card and detail renderings the browser draws,
//! as colored plain text. Quiet variants print bare ids for scripting.

use crate::render::{Card, DetailView};
use colored::Colorize;

/// Format a card as one line
#[must_use]
pub fn card_line(card: &Card, quiet: bool) -> String {
    if quiet {
        return card.id.clone();
    }

    let heart = if card.favorite {
        "♥".red().to_string()
    } else {
        "♡".dimmed().to_string()
    };
    format!(
        "  {} {} {} {}  {}",
        heart,
        format!("{:>6}", card.id).dimmed(),
        card.name.bold(),
        format!("({})", card.meta).cyan(),
        format!("⏱ {} min  ★ {:.1}", card.prep_minutes, card.rating).yellow(),
    )
}

/// Format a list of cards, one per line
#[must_use]
pub fn card_list(cards: &[Card], quiet: bool) -> String {
    cards
        .iter()
        .map(|card| card_line(card, quiet))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a recipe detail for the terminal
#[must_use]
pub fn detail(view: &DetailView, favorite: bool) -> String {
    let mut out = Vec::new();

    let heart = if favorite { " ♥".red().to_string() } else { String::new() };
    out.push(format!("{}{}", view.name.bold().underline(), heart));
    out.push(view.meta.cyan().to_string());
    out.push(
        format!("⏱ {} min  ★ {:.1}", view.prep_minutes, view.rating)
            .yellow()
            .to_string(),
    );
    if !view.tags.is_empty() {
        let tags: Vec<String> = view.tags.iter().map(|t| format!("#{t}")).collect();
        out.push(tags.join(" ").magenta().to_string());
    }

    out.push(String::new());
    out.push("Ingredients".bold().to_string());
    for row in &view.ingredients {
        if row.measure.is_empty() {
            out.push(format!("  • {}", row.ingredient));
        } else {
            out.push(format!("  • {} {}", row.measure.dimmed(), row.ingredient));
        }
    }

    out.push(String::new());
    out.push("Instructions".bold().to_string());
    out.extend(view.paragraphs.iter().cloned());

    if let Some(video) = &view.video {
        out.push(String::new());
        out.push(format!("{} {}", "▶ Watch video:".green(), video));
    }
    if let Some(source) = &view.source {
        out.push(format!("{} {}", "↗ Source:".green(), source));
    }

    out.join("\n")
}
