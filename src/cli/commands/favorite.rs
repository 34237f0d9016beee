//! `zerovault favorite`: toggle an item's favorite flag.

use crate::cli::{output, unlock, Cli};
use crate::errors::Result;

/// Execute the `favorite` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let mut session = unlock(cli)?;
    let now_favorite = session.toggle_favorite(id)?;
    session.logout();

    if now_favorite {
        output::success(&format!("Item {id} marked as favorite"));
    } else {
        output::success(&format!("Item {id} removed from favorites"));
    }
    Ok(())
}
