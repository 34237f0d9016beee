//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::{TimeZone, Utc};
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{ItemKind, VaultEntry};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// One-line subtitle for an item row: username for logins, masked
/// number for cards.
fn subtitle(kind: &ItemKind) -> String {
    match kind {
        ItemKind::Login { username, .. } => username.clone(),
        ItemKind::Card { card_number, .. } => {
            if card_number.len() >= 4 {
                format!("\u{2022}\u{2022}\u{2022}\u{2022} {}", &card_number[card_number.len() - 4..])
            } else {
                "\u{2022}\u{2022}\u{2022}\u{2022}".to_string()
            }
        }
    }
}

fn format_created(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Print a table of vault entries (Id, Type, Title, Detail, Created).
///
/// Corrupted entries are rendered as such; they stay visible so the
/// user knows a record exists that cannot be decrypted.
pub fn print_entries_table(entries: &[&VaultEntry]) {
    if entries.is_empty() {
        info("No items in this view.");
        tip("Run `zerovault add login <TITLE> -u <USER>` to add your first item.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Type", "Title", "Detail", "Created"]);

    for entry in entries {
        match entry.item() {
            Some(item) => {
                let title = if item.is_favorite {
                    format!("\u{2665} {}", item.title())
                } else {
                    item.title().to_string()
                };
                table.add_row(vec![
                    entry.id.clone(),
                    item.kind.label().to_string(),
                    title,
                    subtitle(&item.kind),
                    format_created(item.created_at),
                ]);
            }
            None => {
                table.add_row(vec![
                    entry.id.clone(),
                    "?".to_string(),
                    style("corrupted entry").red().to_string(),
                    "cannot be decrypted".to_string(),
                    "-".to_string(),
                ]);
            }
        }
    }

    println!("{table}");
}
