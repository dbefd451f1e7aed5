//! Resource clients
//!
//! One thin client per backend resource. Each operation is a single HTTP
//! call; the envelope is unwrapped and list/detail results are normalized to
//! display entities. No caching happens here, that is the coordinator's job.

mod auth;
mod categories;
mod products;
mod subcategories;

pub use auth::AuthClient;
pub use categories::CategoriesClient;
pub use products::ProductsClient;
pub use subcategories::SubcategoriesClient;
