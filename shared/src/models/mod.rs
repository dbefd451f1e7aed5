//! Display models and normalizers
//!
//! Raw DTOs mirror backend documents loosely (every field defaulted, ids
//! accepted as `_id` or `id`); display entities are the stable shape the
//! screens render. Normalizers are pure and total: `None` input yields a
//! fully-defaulted entity, and re-normalizing an already-normalized entity
//! is a no-op behaviorally.

mod category;
mod localized;
mod product;
mod subcategory;
mod user;

pub use category::{normalize_categories, normalize_category, Category, CategoryPayload, RawCategory};
pub use localized::Localized;
pub use product::{
    normalize_product, normalize_products, Product, ProductPayload, RawProduct, RawReview,
};
pub use subcategory::{
    normalize_subcategories, normalize_subcategory, CategoryRef, RawSubcategory, Subcategory,
    SubcategoryPayload,
};
pub use user::{LoginRequest, LoginResponse, UserProfile};
