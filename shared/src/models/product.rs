//! Product Model

use super::subcategory::CategoryRef;
use super::{Localized, RawSubcategory};
use serde::{Deserialize, Serialize};

/// Subcategory reference on a product: bare id or pre-expanded document
/// (whose own category relation may in turn be expanded).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubcategoryRef {
    Id(String),
    Expanded(Box<RawSubcategory>),
}

impl Default for SubcategoryRef {
    fn default() -> Self {
        SubcategoryRef::Id(String::new())
    }
}

/// Seller reference: bare id or expanded `{ name }` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SellerRef {
    Id(String),
    Expanded { name: String },
}

impl Default for SellerRef {
    fn default() -> Self {
        SellerRef::Id(String::new())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReview {
    #[serde(default)]
    pub rating: f64,
}

/// Raw product document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProduct {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub price: f64,
    /// Percentage discount; the backend field is plural.
    #[serde(default, rename = "discounts")]
    pub discount: f64,
    #[serde(default, rename = "imageUrls")]
    pub image_urls: Vec<String>,
    #[serde(default, rename = "subcategoryId")]
    pub subcategory_id: SubcategoryRef,
    #[serde(default, rename = "sellerId")]
    pub seller_id: SellerRef,
    #[serde(default)]
    pub reviews: Vec<RawReview>,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub stock: f64,
    #[serde(default, rename = "isVerified")]
    pub is_verified: bool,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
}

/// Product display entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    pub description: String,
    pub description_ar: String,
    pub price: f64,
    /// Percentage, 0..=100.
    pub discount: f64,
    /// Always `price - price * discount / 100`; never stored independently.
    pub final_price: f64,
    pub images: Vec<String>,
    /// First image url, blank when the product has none.
    pub image: String,
    pub subcategory: String,
    pub subcategory_id: String,
    pub category: String,
    pub seller: String,
    pub rating: f64,
    pub brand: String,
    pub stock: u64,
    pub is_verified: bool,
    pub created_at: Option<String>,
}

/// Normalize a raw product, tolerating a missing document.
pub fn normalize_product(raw: Option<RawProduct>) -> Product {
    let Some(raw) = raw else {
        return Product::default();
    };

    let price = if raw.price.is_finite() && raw.price > 0.0 {
        raw.price
    } else {
        0.0
    };
    let discount = if raw.discount.is_finite() {
        raw.discount.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let final_price = price - price * discount / 100.0;

    let (subcategory, subcategory_id, category) = match &raw.subcategory_id {
        SubcategoryRef::Id(id) => (String::new(), id.clone(), String::new()),
        SubcategoryRef::Expanded(sub) => {
            let category = match &sub.category_id {
                CategoryRef::Expanded(cat) => cat.name.en.clone(),
                CategoryRef::Id(_) => String::new(),
            };
            (sub.name.en.clone(), sub.id.clone(), category)
        }
    };

    let seller = match raw.seller_id {
        SellerRef::Id(id) => id,
        SellerRef::Expanded { name } => name,
    };

    let rating = if raw.reviews.is_empty() {
        0.0
    } else {
        raw.reviews.iter().map(|r| r.rating).sum::<f64>() / raw.reviews.len() as f64
    };

    Product {
        id: raw.id,
        name: raw.name.en,
        name_ar: raw.name.ar,
        description: raw.description.en,
        description_ar: raw.description.ar,
        price,
        discount,
        final_price,
        image: raw.image_urls.first().cloned().unwrap_or_default(),
        images: raw.image_urls,
        subcategory,
        subcategory_id,
        category,
        seller,
        rating,
        brand: raw.brand,
        stock: if raw.stock.is_finite() && raw.stock > 0.0 {
            raw.stock as u64
        } else {
            0
        },
        is_verified: raw.is_verified,
        created_at: raw.created_at,
    }
}

pub fn normalize_products(raw: Vec<RawProduct>) -> Vec<Product> {
    raw.into_iter().map(|p| normalize_product(Some(p))).collect()
}

/// Create/update payload. Every field optional so updates can be partial.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Localized>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Localized>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "discounts", skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(rename = "imageUrls", skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(rename = "subcategoryId", skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
    #[serde(rename = "isVerified", skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}
