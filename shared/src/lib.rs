//! Shared types for the Souq admin client
//!
//! Wire DTOs, display models, normalizers and query types used by the
//! HTTP client and the view-state coordinators. Everything in this crate
//! is pure: no I/O, no network.

pub mod envelope;
pub mod models;
pub mod query;

// Re-exports
pub use envelope::{decode, decode_list, unwrap_envelope, EnvelopeError};
pub use models::{Category, Product, Subcategory, UserProfile};
pub use query::{Page, PageQuery, ProductFilters, SortBy, SortOrder};
pub use serde::{Deserialize, Serialize};
