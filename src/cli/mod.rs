//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod generator;
pub mod output;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::storage::HttpStore;
use crate::vault::{Category, VaultSession, View};

/// Minimum password length to prevent trivially weak master passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// ZeroVault CLI: zero-knowledge password vault client.
#[derive(Parser)]
#[command(
    name = "zerovault",
    about = "Zero-knowledge password vault; the server only ever sees ciphertext",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Account email (or set ZEROVAULT_EMAIL)
    #[arg(short, long, env = "ZEROVAULT_EMAIL", global = true)]
    pub email: Option<String>,

    /// Server API base URL (overrides zerovault.toml)
    #[arg(long, global = true)]
    pub server: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault account
    Register,

    /// Add an item to the vault
    Add {
        #[command(subcommand)]
        kind: AddKind,
    },

    /// List vault items
    List {
        /// Which view to show: active, favorites, or trash
        #[arg(long, default_value = "active")]
        view: String,

        /// Filter by item type: all, login, or card
        #[arg(long, default_value = "all")]
        category: String,
    },

    /// Show one item's full decrypted fields
    Show {
        /// Item id (from `list`)
        id: String,
    },

    /// Toggle an item's favorite flag
    Favorite {
        /// Item id
        id: String,
    },

    /// Move an item to the trash (reversible)
    Trash {
        /// Item id
        id: String,
    },

    /// Restore an item from the trash
    Restore {
        /// Item id
        id: String,
    },

    /// Permanently delete a trashed item (irreversible)
    Purge {
        /// Item id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Item kinds accepted by `add`.
#[derive(clap::Subcommand)]
pub enum AddKind {
    /// A website or service credential
    Login {
        /// Display title (e.g. "Bank")
        title: String,

        /// Website URL
        #[arg(long)]
        website: Option<String>,

        /// Username or account identifier
        #[arg(short, long)]
        username: String,

        /// Password (omit for interactive prompt)
        #[arg(short, long)]
        password: Option<String>,

        /// Generate a random password instead of prompting
        #[arg(long, conflicts_with = "password")]
        generate: bool,

        /// Length of the generated password
        #[arg(long, default_value = "16", requires = "generate")]
        length: usize,
    },

    /// A payment card
    Card {
        /// Display title (e.g. "Personal Visa")
        title: String,

        #[arg(long)]
        holder: String,

        #[arg(long)]
        number: String,

        /// Card brand (e.g. Visa, Mastercard)
        #[arg(long)]
        brand: String,

        /// Expiry month (MM)
        #[arg(long)]
        month: String,

        /// Expiry year (YYYY)
        #[arg(long)]
        year: String,

        /// CVV (omit for interactive prompt)
        #[arg(long)]
        cvv: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the account email: `--email`, `ZEROVAULT_EMAIL`, or prompt.
pub fn resolve_email(cli: &Cli) -> Result<String> {
    if let Some(email) = &cli.email {
        if !email.is_empty() {
            return Ok(email.clone());
        }
    }

    dialoguer::Input::<String>::new()
        .with_prompt("Account email")
        .interact_text()
        .map_err(|e| VaultError::CommandFailed(format!("email prompt: {e}")))
}

/// Get the master password, trying in order:
/// 1. `ZEROVAULT_PASSWORD` env var (CI/scripting)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("ZEROVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used by `register`).
///
/// Also respects `ZEROVAULT_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("ZEROVAULT_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(VaultError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation("Confirm master password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Build the storage client from settings + CLI overrides.
pub fn connect(cli: &Cli) -> Result<HttpStore> {
    let settings = Settings::load_default()?;
    let url = cli.server.as_deref().unwrap_or(&settings.server_url);
    Ok(HttpStore::new(url, settings.request_timeout()))
}

/// Authenticate and unlock the vault: the prologue of every item command.
pub fn unlock(cli: &Cli) -> Result<VaultSession<HttpStore>> {
    let store = connect(cli)?;
    let email = resolve_email(cli)?;
    let password = prompt_password()?;
    VaultSession::login(store, &email, &password)
}

/// Parse a `--view` argument.
pub fn parse_view(name: &str) -> Result<View> {
    match name {
        "active" => Ok(View::Active),
        "favorites" => Ok(View::Favorites),
        "trash" => Ok(View::Trash),
        other => Err(VaultError::CommandFailed(format!(
            "unknown view '{other}', expected active, favorites, or trash"
        ))),
    }
}

/// Parse a `--category` argument.
pub fn parse_category(name: &str) -> Result<Category> {
    match name {
        "all" => Ok(Category::All),
        "login" => Ok(Category::Login),
        "card" => Ok(Category::Card),
        other => Err(VaultError::CommandFailed(format!(
            "unknown category '{other}', expected all, login, or card"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_views() {
        assert_eq!(parse_view("active").unwrap(), View::Active);
        assert_eq!(parse_view("favorites").unwrap(), View::Favorites);
        assert_eq!(parse_view("trash").unwrap(), View::Trash);
    }

    #[test]
    fn rejects_unknown_view() {
        assert!(parse_view("archived").is_err());
    }

    #[test]
    fn parses_known_categories() {
        assert_eq!(parse_category("all").unwrap(), Category::All);
        assert_eq!(parse_category("login").unwrap(), Category::Login);
        assert_eq!(parse_category("card").unwrap(), Category::Card);
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(parse_category("note").is_err());
    }
}
