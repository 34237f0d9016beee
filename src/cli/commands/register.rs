//! `zerovault register`: create a new vault account.

use crate::cli::{connect, output, prompt_new_password, resolve_email, Cli};
use crate::errors::Result;
use crate::vault::VaultSession;

/// Execute the `register` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let store = connect(cli)?;
    let email = resolve_email(cli)?;
    let password = prompt_new_password()?;

    output::info("Deriving keys and generating your vault key...");
    VaultSession::register(&store, &email, &password)?;

    output::success(&format!("Account created for {email}"));
    output::tip("The server never sees your password or vault key. Don't lose the password; it cannot be reset.");

    Ok(())
}
