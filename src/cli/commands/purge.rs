//! `zerovault purge`: permanently delete a trashed item.

use crate::cli::{output, unlock, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `purge` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    if !force {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Permanently delete item {id}? This cannot be undone"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            return Err(VaultError::UserCancelled);
        }
    }

    let mut session = unlock(cli)?;
    session.permanent_delete(id)?;
    session.logout();

    output::success(&format!("Item {id} permanently deleted"));
    Ok(())
}
