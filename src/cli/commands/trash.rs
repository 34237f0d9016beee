//! `zerovault trash`: move an item to the trash (soft delete).

use crate::cli::{output, unlock, Cli};
use crate::errors::Result;

/// Execute the `trash` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let mut session = unlock(cli)?;
    session.soft_delete(id)?;
    session.logout();

    output::success(&format!("Item {id} moved to trash"));
    output::tip("Restore it with `zerovault restore`, or remove it forever with `zerovault purge`.");
    Ok(())
}
