//! Products screen coordinator
//!
//! Carries the two-phase filter state: `draft_filters` is what the filter
//! panel edits, `applied_filters` is what drives fetches. Editing the draft
//! never fetches; an explicit apply copies draft over applied and resets to
//! page 1. Free-text search takes precedence over applied filters.

use super::{plan_fetch, FetchPlan, MutationGuard};
use crate::{ClientError, ClientResult, ProductsClient};
use shared::models::{Product, ProductPayload};
use shared::query::{Page, PageQuery, ProductFilters};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct ProductsState {
    page: PageQuery,
    query: String,
    draft_filters: ProductFilters,
    applied_filters: ProductFilters,
    form: ProductPayload,
    editing_id: Option<String>,
    items: Vec<Product>,
    total: u64,
    last_error: Option<String>,
}

/// Read-only view of the screen state for rendering.
#[derive(Debug, Clone)]
pub struct ProductsSnapshot {
    pub items: Vec<Product>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub query: String,
    pub draft_filters: ProductFilters,
    pub applied_filters: ProductFilters,
    pub editing_id: Option<String>,
    pub form: ProductPayload,
    pub last_error: Option<String>,
}

impl ProductsSnapshot {
    /// Apply-button enablement is a pure function of (draft, applied).
    pub fn can_apply(&self) -> bool {
        self.draft_filters != self.applied_filters
    }

    pub fn has_active_filters(&self) -> bool {
        self.applied_filters.is_active()
    }
}

pub struct ProductsCoordinator {
    client: ProductsClient,
    state: RwLock<ProductsState>,
    generation: AtomicU64,
    mutating: AtomicBool,
}

impl ProductsCoordinator {
    pub fn new(client: ProductsClient) -> Self {
        Self {
            client,
            state: RwLock::new(ProductsState::default()),
            generation: AtomicU64::new(0),
            mutating: AtomicBool::new(false),
        }
    }

    pub async fn snapshot(&self) -> ProductsSnapshot {
        let state = self.state.read().await;
        ProductsSnapshot {
            items: state.items.clone(),
            total: state.total,
            page: state.page.page,
            limit: state.page.limit,
            total_pages: state.page.total_pages(state.total),
            query: state.query.clone(),
            draft_filters: state.draft_filters.clone(),
            applied_filters: state.applied_filters.clone(),
            editing_id: state.editing_id.clone(),
            form: state.form.clone(),
            last_error: state.last_error.clone(),
        }
    }

    pub fn is_mutating(&self) -> bool {
        self.mutating.load(Ordering::SeqCst)
    }

    // ========== Query state ==========

    pub async fn set_page(&self, page: u32) -> ClientResult<()> {
        self.state.write().await.page.page = page.max(1);
        self.refresh().await
    }

    pub async fn set_limit(&self, limit: u32) -> ClientResult<()> {
        {
            let mut state = self.state.write().await;
            state.page = PageQuery::new(1, limit);
        }
        self.refresh().await
    }

    pub async fn set_query(&self, query: impl Into<String>) -> ClientResult<()> {
        {
            let mut state = self.state.write().await;
            state.query = query.into();
            state.page.page = 1;
        }
        self.refresh().await
    }

    // ========== Two-phase filters ==========

    /// Edit the draft. Never triggers a fetch.
    pub async fn set_draft_filters(&self, filters: ProductFilters) {
        self.state.write().await.draft_filters = filters;
    }

    /// Copy draft over applied and refetch from page 1.
    pub async fn apply_filters(&self) -> ClientResult<()> {
        {
            let mut state = self.state.write().await;
            state.applied_filters = state.draft_filters.clone();
            state.page.page = 1;
        }
        self.refresh().await
    }

    /// Reset draft, applied and search text to defaults, back to page 1.
    pub async fn clear_filters(&self) -> ClientResult<()> {
        {
            let mut state = self.state.write().await;
            state.draft_filters = ProductFilters::default();
            state.applied_filters = ProductFilters::default();
            state.query.clear();
            state.page.page = 1;
        }
        self.refresh().await
    }

    pub async fn refresh(&self) -> ClientResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let plan = {
            let state = self.state.read().await;
            plan_fetch(&state.query, Some(&state.applied_filters), state.page)
        };

        let result: ClientResult<Page<Product>> = match plan {
            FetchPlan::Search { query, page } => self.client.search(&query, page).await,
            FetchPlan::Filtered { filters, page } => self.client.filtered(&filters, page).await,
            FetchPlan::Paginate { page } => self.client.paginate(page).await,
        };

        // The generation check must happen under the write lock: checking
        // first would leave a window where a newer refresh lands between the
        // check and the lock, and the stale response would overwrite it.
        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::warn!(generation, "discarding stale products response");
            return Ok(());
        }
        match result {
            Ok(page) => {
                state.items = page.items;
                state.total = page.total;
                state.last_error = None;
                Ok(())
            }
            Err(err) => {
                state.last_error = Some(err.message());
                Err(err)
            }
        }
    }

    // ========== Form state ==========

    pub async fn set_form(&self, form: ProductPayload) {
        self.state.write().await.form = form;
    }

    pub async fn edit(&self, product: &Product) {
        let mut state = self.state.write().await;
        state.editing_id = Some(product.id.clone());
        state.form = ProductPayload {
            name: Some(shared::models::Localized::new(
                product.name.clone(),
                product.name_ar.clone(),
            )),
            description: Some(shared::models::Localized::new(
                product.description.clone(),
                product.description_ar.clone(),
            )),
            price: Some(product.price),
            discount: Some(product.discount),
            image_urls: Some(product.images.clone()),
            subcategory_id: Some(product.subcategory_id.clone()),
            brand: Some(product.brand.clone()),
            stock: Some(product.stock),
            is_verified: Some(product.is_verified),
        };
    }

    pub async fn reset_form(&self) {
        let mut state = self.state.write().await;
        state.form = ProductPayload::default();
        state.editing_id = None;
    }

    // ========== Mutations ==========

    pub async fn submit(&self) -> ClientResult<()> {
        let _guard = MutationGuard::begin(&self.mutating);
        let (form, editing_id) = {
            let state = self.state.read().await;
            (state.form.clone(), state.editing_id.clone())
        };

        if let Err(err) = validate_payload(&form, editing_id.is_none()) {
            self.state.write().await.last_error = Some(err.message());
            return Err(err);
        }

        let result = match &editing_id {
            Some(id) => self.client.update(id, &form).await.map(|_| ()),
            None => self.client.create(&form).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                self.reset_form().await;
                self.refresh().await
            }
            Err(err) => {
                self.state.write().await.last_error = Some(err.message());
                Err(err)
            }
        }
    }

    pub async fn remove(&self, id: &str) -> ClientResult<()> {
        let _guard = MutationGuard::begin(&self.mutating);
        match self.client.delete(id).await {
            Ok(_) => self.refresh().await,
            Err(err) if err.is_not_found() => self.refresh().await,
            Err(err) => {
                self.state.write().await.last_error = Some(err.message());
                Err(err)
            }
        }
    }

    /// Upload an image; the returned entity's image list is authoritative and
    /// replaces the local copy in place.
    pub async fn add_image(&self, id: &str, filename: &str, data: Vec<u8>) -> ClientResult<()> {
        let _guard = MutationGuard::begin(&self.mutating);
        match self.client.add_image(id, filename, data).await {
            Ok(updated) => {
                self.replace_item(updated).await;
                Ok(())
            }
            Err(err) => {
                self.state.write().await.last_error = Some(err.message());
                Err(err)
            }
        }
    }

    pub async fn remove_image(&self, id: &str, image_url: &str) -> ClientResult<()> {
        let _guard = MutationGuard::begin(&self.mutating);
        match self.client.remove_image(id, image_url).await {
            Ok(updated) => {
                self.replace_item(updated).await;
                Ok(())
            }
            Err(err) => {
                self.state.write().await.last_error = Some(err.message());
                Err(err)
            }
        }
    }

    async fn replace_item(&self, updated: Product) {
        let mut state = self.state.write().await;
        if let Some(slot) = state.items.iter_mut().find(|p| p.id == updated.id) {
            *slot = updated;
        }
        state.last_error = None;
    }
}

/// Pre-flight validation; failures never reach the network. Creates demand
/// the full field set, updates only check the fields they carry.
fn validate_payload(form: &ProductPayload, creating: bool) -> ClientResult<()> {
    if creating {
        if form.name.as_ref().map(|n| n.is_empty()).unwrap_or(true) {
            return Err(ClientError::Validation(
                "Product name is required".to_string(),
            ));
        }
        if form
            .subcategory_id
            .as_ref()
            .map(|s| s.is_empty())
            .unwrap_or(true)
        {
            return Err(ClientError::Validation(
                "A subcategory must be selected".to_string(),
            ));
        }
        if form.price.is_none() {
            return Err(ClientError::Validation("Price is required".to_string()));
        }
        if form
            .image_urls
            .as_ref()
            .map(|urls| urls.is_empty())
            .unwrap_or(true)
        {
            return Err(ClientError::Validation(
                "At least one image is required".to_string(),
            ));
        }
    } else if form.name.as_ref().is_some_and(|n| n.is_empty()) {
        return Err(ClientError::Validation(
            "Product name cannot be blank".to_string(),
        ));
    }

    if form.price.is_some_and(|p| p <= 0.0) {
        return Err(ClientError::Validation(
            "Price must be greater than zero".to_string(),
        ));
    }
    if form.discount.is_some_and(|d| !(0.0..=100.0).contains(&d)) {
        return Err(ClientError::Validation(
            "Discount must be between 0 and 100".to_string(),
        ));
    }

    Ok(())
}
