//! Category Model

use super::Localized;
use serde::{Deserialize, Serialize};

const FALLBACK_DISPLAY: &str = "Unknown Category";
const FALLBACK_NAME: &str = "Unnamed Category";
const FALLBACK_FULL: &str = "Unnamed";

/// Raw category document as the backend returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCategory {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Category display entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: Localized,
    pub description: Localized,
    pub display_name: String,
    pub full_display: String,
    pub has_description: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Normalize a raw category, tolerating a missing document.
pub fn normalize_category(raw: Option<RawCategory>) -> Category {
    let Some(raw) = raw else {
        return Category {
            display_name: FALLBACK_DISPLAY.to_string(),
            full_display: FALLBACK_DISPLAY.to_string(),
            ..Default::default()
        };
    };

    Category {
        display_name: raw.name.display(FALLBACK_NAME),
        full_display: raw.name.full_display(FALLBACK_FULL),
        has_description: !raw.description.is_empty(),
        id: raw.id,
        name: raw.name,
        description: raw.description,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
    }
}

pub fn normalize_categories(raw: Vec<RawCategory>) -> Vec<Category> {
    raw.into_iter().map(|c| normalize_category(Some(c))).collect()
}

/// Create/update payload. Both halves are sent; the backend treats blank
/// strings as clearing a translation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: Localized,
    pub description: Localized,
}
