//! Subcategories screen coordinator
//!
//! Same shape as the categories coordinator plus a category scoping dropdown:
//! the scope rides along on paginate/search rather than being a structured
//! filter, and the category list for the dropdown is loaded through the
//! categories resource client.

use super::{plan_fetch, FetchPlan, MutationGuard};
use crate::{CategoriesClient, ClientError, ClientResult, SubcategoriesClient};
use shared::models::{Category, Subcategory, SubcategoryPayload};
use shared::query::{Page, PageQuery};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct SubcategoriesState {
    page: PageQuery,
    query: String,
    selected_category_id: Option<String>,
    form: SubcategoryPayload,
    editing_id: Option<String>,
    items: Vec<Subcategory>,
    categories: Vec<Category>,
    total: u64,
    last_error: Option<String>,
}

/// Read-only view of the screen state for rendering.
#[derive(Debug, Clone)]
pub struct SubcategoriesSnapshot {
    pub items: Vec<Subcategory>,
    pub categories: Vec<Category>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub query: String,
    pub selected_category_id: Option<String>,
    pub editing_id: Option<String>,
    pub form: SubcategoryPayload,
    pub last_error: Option<String>,
}

pub struct SubcategoriesCoordinator {
    client: SubcategoriesClient,
    categories_client: CategoriesClient,
    state: RwLock<SubcategoriesState>,
    generation: AtomicU64,
    mutating: AtomicBool,
}

impl SubcategoriesCoordinator {
    pub fn new(client: SubcategoriesClient, categories_client: CategoriesClient) -> Self {
        Self {
            client,
            categories_client,
            state: RwLock::new(SubcategoriesState::default()),
            generation: AtomicU64::new(0),
            mutating: AtomicBool::new(false),
        }
    }

    pub async fn snapshot(&self) -> SubcategoriesSnapshot {
        let state = self.state.read().await;
        SubcategoriesSnapshot {
            items: state.items.clone(),
            categories: state.categories.clone(),
            total: state.total,
            page: state.page.page,
            limit: state.page.limit,
            total_pages: state.page.total_pages(state.total),
            query: state.query.clone(),
            selected_category_id: state.selected_category_id.clone(),
            editing_id: state.editing_id.clone(),
            form: state.form.clone(),
            last_error: state.last_error.clone(),
        }
    }

    pub fn is_mutating(&self) -> bool {
        self.mutating.load(Ordering::SeqCst)
    }

    /// Populate the category dropdown.
    pub async fn load_categories(&self) -> ClientResult<()> {
        let categories = self.categories_client.list().await?;
        self.state.write().await.categories = categories;
        Ok(())
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

    /// Scope reads to one category; `None` clears the scope.
    pub async fn set_category_scope(&self, category_id: Option<String>) -> ClientResult<()> {
        {
            let mut state = self.state.write().await;
            state.selected_category_id = category_id.filter(|id| !id.is_empty());
            state.page.page = 1;
        }
        self.refresh().await
    }

    pub async fn refresh(&self) -> ClientResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (plan, scope) = {
            let state = self.state.read().await;
            (
                plan_fetch(&state.query, None, state.page),
                state.selected_category_id.clone(),
            )
        };
        let scope = scope.as_deref();

        let result: ClientResult<Page<Subcategory>> = match plan {
            FetchPlan::Search { query, page } => self.client.search(&query, page, scope).await,
            FetchPlan::Paginate { page } | FetchPlan::Filtered { page, .. } => {
                self.client.paginate(page, scope).await
            }
        };

        // Checked under the write lock so a newer refresh cannot land between
        // the check and the store.
        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::warn!(generation, "discarding stale subcategories response");
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

    pub async fn set_form(&self, form: SubcategoryPayload) {
        self.state.write().await.form = form;
    }

    pub async fn edit(&self, subcategory: &Subcategory) {
        let mut state = self.state.write().await;
        state.editing_id = Some(subcategory.id.clone());
        state.form = SubcategoryPayload {
            category_id: subcategory.category_id.clone(),
            name: subcategory.name.clone(),
            description: subcategory.description.clone(),
        };
    }

    pub async fn reset_form(&self) {
        let mut state = self.state.write().await;
        state.form = SubcategoryPayload::default();
        state.editing_id = None;
    }

    // ========== Mutations ==========

    pub async fn submit(&self) -> ClientResult<()> {
        let _guard = MutationGuard::begin(&self.mutating);
        let (form, editing_id) = {
            let state = self.state.read().await;
            (state.form.clone(), state.editing_id.clone())
        };

        if form.category_id.is_empty() {
            let err = ClientError::Validation("A parent category must be selected".to_string());
            self.state.write().await.last_error = Some(err.message());
            return Err(err);
        }
        if form.name.is_empty() {
            let err = ClientError::Validation("Subcategory name is required".to_string());
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
}
