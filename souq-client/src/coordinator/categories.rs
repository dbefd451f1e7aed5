//! Categories screen coordinator

use super::{plan_fetch, FetchPlan, MutationGuard};
use crate::{CategoriesClient, ClientError, ClientResult};
use shared::models::{Category, CategoryPayload};
use shared::query::{Page, PageQuery};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct CategoriesState {
    page: PageQuery,
    query: String,
    form: CategoryPayload,
    editing_id: Option<String>,
    items: Vec<Category>,
    total: u64,
    last_error: Option<String>,
}

/// Read-only view of the screen state for rendering.
#[derive(Debug, Clone)]
pub struct CategoriesSnapshot {
    pub items: Vec<Category>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub query: String,
    pub editing_id: Option<String>,
    pub form: CategoryPayload,
    pub last_error: Option<String>,
}

pub struct CategoriesCoordinator {
    client: CategoriesClient,
    state: RwLock<CategoriesState>,
    generation: AtomicU64,
    mutating: AtomicBool,
}

impl CategoriesCoordinator {
    pub fn new(client: CategoriesClient) -> Self {
        Self {
            client,
            state: RwLock::new(CategoriesState::default()),
            generation: AtomicU64::new(0),
            mutating: AtomicBool::new(false),
        }
    }

    pub async fn snapshot(&self) -> CategoriesSnapshot {
        let state = self.state.read().await;
        CategoriesSnapshot {
            items: state.items.clone(),
            total: state.total,
            page: state.page.page,
            limit: state.page.limit,
            total_pages: state.page.total_pages(state.total),
            query: state.query.clone(),
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

    /// Changing the page size resets to page 1; keeping the old page could
    /// land past the end of the shrunken page count.
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

    /// Re-run the fetch for the current state. A response is discarded when a
    /// newer refresh superseded it.
    pub async fn refresh(&self) -> ClientResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let plan = {
            let state = self.state.read().await;
            plan_fetch(&state.query, None, state.page)
        };

        let result: ClientResult<Page<Category>> = match plan {
            FetchPlan::Search { query, page } => self.client.search(&query, page).await,
            FetchPlan::Paginate { page } => self.client.paginate(page).await,
            // Categories have no structured filters
            FetchPlan::Filtered { page, .. } => self.client.paginate(page).await,
        };

        // Checked under the write lock so a newer refresh cannot land between
        // the check and the store.
        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::warn!(generation, "discarding stale categories response");
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
                // Keep the previous items visible: stale-but-valid over blank.
                state.last_error = Some(err.message());
                Err(err)
            }
        }
    }

    // ========== Form state ==========

    pub async fn set_form(&self, form: CategoryPayload) {
        self.state.write().await.form = form;
    }

    /// Seed the form from an existing entity for editing.
    pub async fn edit(&self, category: &Category) {
        let mut state = self.state.write().await;
        state.editing_id = Some(category.id.clone());
        state.form = CategoryPayload {
            name: category.name.clone(),
            description: category.description.clone(),
        };
    }

    pub async fn reset_form(&self) {
        let mut state = self.state.write().await;
        state.form = CategoryPayload::default();
        state.editing_id = None;
    }

    // ========== Mutations ==========

    /// Create or update depending on whether an entity is being edited.
    pub async fn submit(&self) -> ClientResult<()> {
        let _guard = MutationGuard::begin(&self.mutating);
        let (form, editing_id) = {
            let state = self.state.read().await;
            (state.form.clone(), state.editing_id.clone())
        };

        if form.name.is_empty() {
            let err = ClientError::Validation("Category name is required".to_string());
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

    /// Delete; `NotFound` counts as already deleted.
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
}
