//! Vault item types: the plaintext records a vault protects.
//!
//! Items are a tagged union (a `Login` or a `Card`) plus flags
//! shared by both shapes. The serialized form is JSON with a `"type"`
//! tag and camelCase field names; that byte form is what gets sealed
//! under the vault master key. The server-assigned `id` is never part
//! of the encrypted payload, so it lives on `VaultEntry`, not here.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The variant-specific fields of a vault item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    /// A website or service credential.
    #[serde(rename_all = "camelCase")]
    Login {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        website: Option<String>,
        username: String,
        password: String,
    },

    /// A payment card.
    #[serde(rename_all = "camelCase")]
    Card {
        title: String,
        card_holder: String,
        card_number: String,
        card_brand: String,
        expiry_month: String,
        expiry_year: String,
        cvv: String,
    },
}

impl ItemKind {
    /// The item's display title.
    pub fn title(&self) -> &str {
        match self {
            ItemKind::Login { title, .. } => title,
            ItemKind::Card { title, .. } => title,
        }
    }

    /// Short label for listings ("login" or "card").
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Login { .. } => "login",
            ItemKind::Card { .. } => "card",
        }
    }
}

/// A full plaintext vault item: variant fields plus shared flags.
///
/// Flag flips (favorite, soft delete) mutate this record in place and
/// re-encrypt the whole thing; there is no partial-field update at
/// the cryptographic layer. Missing flags in a stored payload decode
/// as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultItem {
    #[serde(flatten)]
    pub kind: ItemKind,

    #[serde(default)]
    pub is_favorite: bool,

    #[serde(default)]
    pub is_deleted: bool,

    /// Creation time, milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: i64,
}

impl VaultItem {
    /// Build a fresh login item (not favorite, not deleted, created now).
    pub fn login(
        title: impl Into<String>,
        website: Option<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(ItemKind::Login {
            title: title.into(),
            website,
            username: username.into(),
            password: password.into(),
        })
    }

    /// Build a fresh card item.
    #[allow(clippy::too_many_arguments)]
    pub fn card(
        title: impl Into<String>,
        card_holder: impl Into<String>,
        card_number: impl Into<String>,
        card_brand: impl Into<String>,
        expiry_month: impl Into<String>,
        expiry_year: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self::new(ItemKind::Card {
            title: title.into(),
            card_holder: card_holder.into(),
            card_number: card_number.into(),
            card_brand: card_brand.into(),
            expiry_month: expiry_month.into(),
            expiry_year: expiry_year.into(),
            cvv: cvv.into(),
        })
    }

    fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            is_favorite: false,
            is_deleted: false,
            created_at: Utc::now().timestamp_millis(),
        }
    }

    pub fn title(&self) -> &str {
        self.kind.title()
    }
}

/// Which slice of the vault a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Everything not in the trash.
    Active,
    /// Favorites that are not in the trash.
    Favorites,
    /// Soft-deleted items only.
    Trash,
}

impl View {
    /// Does `item` belong in this view?
    pub fn matches(&self, item: &VaultItem) -> bool {
        match self {
            View::Active => !item.is_deleted,
            View::Favorites => !item.is_deleted && item.is_favorite,
            View::Trash => item.is_deleted,
        }
    }
}

/// Optional filter on the item variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    All,
    Login,
    Card,
}

impl Category {
    pub fn matches(&self, item: &VaultItem) -> bool {
        match (self, &item.kind) {
            (Category::All, _) => true,
            (Category::Login, ItemKind::Login { .. }) => true,
            (Category::Card, ItemKind::Card { .. }) => true,
            _ => false,
        }
    }
}

/// The decode outcome for one stored record.
///
/// An entry whose ciphertext fails authentication stays in the list as
/// `Undecryptable`. Corrupted is distinct from absent, and silently
/// dropping it would hide data loss from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    Valid(VaultItem),
    Undecryptable,
}

/// One server-side record as seen by the session: its plaintext form
/// if decryption succeeded, plus the server-assigned opaque id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    pub id: String,
    pub state: EntryState,
}

impl VaultEntry {
    /// The decoded item, or `None` for a corrupted entry.
    pub fn item(&self) -> Option<&VaultItem> {
        match &self.state {
            EntryState::Valid(item) => Some(item),
            EntryState::Undecryptable => None,
        }
    }

    pub fn is_undecryptable(&self) -> bool {
        matches!(self.state, EntryState::Undecryptable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_serializes_with_type_tag_and_camel_case() {
        let mut item = VaultItem::login("Bank", Some("https://bank.test".into()), "u", "p");
        item.created_at = 1_700_000_000_000;

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "login");
        assert_eq!(json["title"], "Bank");
        assert_eq!(json["website"], "https://bank.test");
        assert_eq!(json["username"], "u");
        assert_eq!(json["isFavorite"], false);
        assert_eq!(json["isDeleted"], false);
        assert_eq!(json["createdAt"], 1_700_000_000_000i64);
    }

    #[test]
    fn card_serializes_card_fields_camel_case() {
        let item = VaultItem::card("Main card", "A B", "4111111111111111", "Visa", "04", "2030", "123");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "card");
        assert_eq!(json["cardHolder"], "A B");
        assert_eq!(json["cardNumber"], "4111111111111111");
        assert_eq!(json["cardBrand"], "Visa");
        assert_eq!(json["expiryMonth"], "04");
        assert_eq!(json["expiryYear"], "2030");
        assert_eq!(json["cvv"], "123");
    }

    #[test]
    fn missing_flags_decode_as_false() {
        // Older payloads may omit the shared flags entirely.
        let json = r#"{"type":"login","title":"t","username":"u","password":"p","createdAt":1}"#;
        let item: VaultItem = serde_json::from_str(json).unwrap();
        assert!(!item.is_favorite);
        assert!(!item.is_deleted);
    }

    #[test]
    fn login_without_website_omits_the_field() {
        let item = VaultItem::login("t", None, "u", "p");
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("website"));
    }

    #[test]
    fn view_filters() {
        let mut item = VaultItem::login("t", None, "u", "p");
        assert!(View::Active.matches(&item));
        assert!(!View::Favorites.matches(&item));
        assert!(!View::Trash.matches(&item));

        item.is_favorite = true;
        assert!(View::Favorites.matches(&item));

        item.is_deleted = true;
        assert!(View::Trash.matches(&item));
        assert!(!View::Active.matches(&item));
        assert!(!View::Favorites.matches(&item));
    }

    #[test]
    fn category_filters() {
        let login = VaultItem::login("t", None, "u", "p");
        let card = VaultItem::card("c", "h", "n", "Visa", "01", "2031", "000");

        assert!(Category::All.matches(&login) && Category::All.matches(&card));
        assert!(Category::Login.matches(&login) && !Category::Login.matches(&card));
        assert!(Category::Card.matches(&card) && !Category::Card.matches(&login));
    }
}
