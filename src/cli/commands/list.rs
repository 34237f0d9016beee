//! `zerovault list`: display vault items in a table.

use crate::cli::{output, parse_category, parse_view, unlock, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, view: &str, category: &str) -> Result<()> {
    let view = parse_view(view)?;
    let category = parse_category(category)?;

    let session = unlock(cli)?;
    let entries = session.entries_in(view, category);

    let corrupted = entries.iter().filter(|e| e.is_undecryptable()).count();
    if corrupted > 0 {
        output::warning(&format!(
            "{corrupted} entr{} could not be decrypted, shown as corrupted below",
            if corrupted == 1 { "y" } else { "ies" }
        ));
    }

    output::print_entries_table(&entries);
    session.logout();

    Ok(())
}
