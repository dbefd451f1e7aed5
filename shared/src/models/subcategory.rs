//! Subcategory Model

use super::{Localized, RawCategory};
use serde::{Deserialize, Serialize};

const FALLBACK_DISPLAY: &str = "Unknown Subcategory";
const FALLBACK_NAME: &str = "Unnamed Subcategory";
const FALLBACK_FULL: &str = "Unnamed";

/// Category reference on a subcategory: either the bare id, or the full
/// document when the backend pre-expanded the relation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(String),
    Expanded(Box<RawCategory>),
}

impl Default for CategoryRef {
    fn default() -> Self {
        CategoryRef::Id(String::new())
    }
}

impl CategoryRef {
    pub fn id(&self) -> &str {
        match self {
            CategoryRef::Id(id) => id,
            CategoryRef::Expanded(cat) => &cat.id,
        }
    }
}

/// Raw subcategory document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSubcategory {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default, rename = "categoryId")]
    pub category_id: CategoryRef,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Subcategory display entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: Localized,
    pub description: Localized,
    /// Id of the owning category (blank when the backend sent none).
    pub category_id: String,
    pub display_name: String,
    pub full_display: String,
    pub has_description: bool,
    pub has_category: bool,
    /// Populated only when the category relation came pre-expanded.
    pub category_name: String,
    pub category_name_ar: String,
    pub category_full_display: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Normalize a raw subcategory, tolerating a missing document.
pub fn normalize_subcategory(raw: Option<RawSubcategory>) -> Subcategory {
    let Some(raw) = raw else {
        return Subcategory {
            display_name: FALLBACK_DISPLAY.to_string(),
            full_display: FALLBACK_DISPLAY.to_string(),
            ..Default::default()
        };
    };

    let (category_name, category_name_ar) = match &raw.category_id {
        CategoryRef::Expanded(cat) => (cat.name.en.clone(), cat.name.ar.clone()),
        CategoryRef::Id(_) => (String::new(), String::new()),
    };
    let category_full_display = match (category_name.is_empty(), category_name_ar.is_empty()) {
        (false, false) => format!("{} / {}", category_name, category_name_ar),
        (false, true) => category_name.clone(),
        (true, false) => category_name_ar.clone(),
        (true, true) => String::new(),
    };
    let category_id = raw.category_id.id().to_string();

    Subcategory {
        display_name: raw.name.display(FALLBACK_NAME),
        full_display: raw.name.full_display(FALLBACK_FULL),
        has_description: !raw.description.is_empty(),
        has_category: !category_id.is_empty(),
        id: raw.id,
        name: raw.name,
        description: raw.description,
        category_id,
        category_name,
        category_name_ar,
        category_full_display,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
    }
}

pub fn normalize_subcategories(raw: Vec<RawSubcategory>) -> Vec<Subcategory> {
    raw.into_iter()
        .map(|s| normalize_subcategory(Some(s)))
        .collect()
}

/// Create/update payload. `category_id` is forwarded as selected; referential
/// validity is enforced server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubcategoryPayload {
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub name: Localized,
    pub description: Localized,
}
