//! `zerovault restore`: bring an item back from the trash.

use crate::cli::{output, unlock, Cli};
use crate::errors::Result;

/// Execute the `restore` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let mut session = unlock(cli)?;
    session.restore(id)?;
    session.logout();

    output::success(&format!("Item {id} restored"));
    Ok(())
}
