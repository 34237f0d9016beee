//! `zerovault show`: print one item's full decrypted fields.

use console::style;

use crate::cli::{output, unlock, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::ItemKind;

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let session = unlock(cli)?;
    let entry = session.entry(id)?;

    let Some(item) = entry.item() else {
        session.logout();
        return Err(VaultError::ItemCorrupted(id.to_string()));
    };

    println!("{}", style(item.title()).bold());
    match &item.kind {
        ItemKind::Login {
            website,
            username,
            password,
            ..
        } => {
            if let Some(site) = website {
                println!("  website:  {site}");
            }
            println!("  username: {username}");
            println!("  password: {password}");
        }
        ItemKind::Card {
            card_holder,
            card_number,
            card_brand,
            expiry_month,
            expiry_year,
            cvv,
            ..
        } => {
            println!("  holder:   {card_holder}");
            println!("  number:   {card_number}");
            println!("  brand:    {card_brand}");
            println!("  expires:  {expiry_month}/{expiry_year}");
            println!("  cvv:      {cvv}");
        }
    }

    if item.is_deleted {
        output::warning("This item is in the trash.");
    }

    session.logout();
    Ok(())
}
