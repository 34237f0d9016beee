//! `zerovault add`: encrypt and store a new login or card item.

use crate::cli::{generator, output, unlock, AddKind, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::VaultItem;

/// Execute the `add` command.
pub fn execute(cli: &Cli, kind: &AddKind) -> Result<()> {
    let item = build_item(kind)?;
    let title = item.title().to_string();

    let mut session = unlock(cli)?;
    let id = session.create_item(item)?;
    session.logout();

    output::success(&format!("'{title}' added to your vault (id {id})"));
    Ok(())
}

fn build_item(kind: &AddKind) -> Result<VaultItem> {
    match kind {
        AddKind::Login {
            title,
            website,
            username,
            password,
            generate,
            length,
        } => {
            let password = if *generate {
                let pw = generator::generate_password(*length);
                output::info(&format!("Generated password: {pw}"));
                pw
            } else if let Some(pw) = password {
                output::warning("Password provided on command line; it may appear in shell history.");
                pw.clone()
            } else {
                dialoguer::Password::new()
                    .with_prompt(format!("Password for {title}"))
                    .interact()
                    .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?
            };

            Ok(VaultItem::login(
                title.clone(),
                website.clone(),
                username.clone(),
                password,
            ))
        }

        AddKind::Card {
            title,
            holder,
            number,
            brand,
            month,
            year,
            cvv,
        } => {
            let cvv = match cvv {
                Some(v) => v.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("CVV")
                    .interact()
                    .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?,
            };

            Ok(VaultItem::card(
                title.clone(),
                holder.clone(),
                number.clone(),
                brand.clone(),
                month.clone(),
                year.clone(),
                cvv,
            ))
        }
    }
}
