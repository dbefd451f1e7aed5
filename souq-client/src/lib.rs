//! Souq Admin Client - HTTP client for the Souq commerce backend
//!
//! Provides resource clients for categories, subcategories and products,
//! session-token handling, and per-screen view-state coordinators
//! (pagination, search, two-phase filters, mutation/invalidate).

pub mod client;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod http;
pub mod resources;
pub mod session;

pub use client::SouqClient;
pub use config::ClientConfig;
pub use coordinator::{
    plan_fetch, CategoriesCoordinator, FetchPlan, ProductsCoordinator, SubcategoriesCoordinator,
};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use resources::{AuthClient, CategoriesClient, ProductsClient, SubcategoriesClient};
pub use session::{Session, SessionHandle, SessionStore};

// Re-export shared types for convenience
pub use shared::models::{Category, Product, Subcategory, UserProfile};
pub use shared::query::{Page, PageQuery, ProductFilters, SortBy, SortOrder};
