//! Categories resource client

use crate::{ClientResult, HttpClient};
use serde_json::Value;
use shared::envelope::{decode, decode_list};
use shared::models::{
    normalize_categories, normalize_category, Category, CategoryPayload, RawCategory,
};
use shared::query::{Page, PageQuery};

const RESOURCE: &str = "/categories";

#[derive(Debug, Clone)]
pub struct CategoriesClient {
    http: HttpClient,
}

impl CategoriesClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Fetch every category, unpaginated.
    pub async fn list(&self) -> ClientResult<Vec<Category>> {
        let body = self.http.get(RESOURCE, &[]).await?;
        let raw: Vec<RawCategory> = decode_list(body)?;
        Ok(normalize_categories(raw))
    }

    pub async fn get_by_id(&self, id: &str) -> ClientResult<Category> {
        let body = self.http.get(&format!("{RESOURCE}/{id}"), &[]).await?;
        let raw: RawCategory = decode(body)?;
        Ok(normalize_category(Some(raw)))
    }

    pub async fn create(&self, payload: &CategoryPayload) -> ClientResult<Category> {
        let body = self.http.post(RESOURCE, payload).await?;
        let raw: RawCategory = decode(body)?;
        Ok(normalize_category(Some(raw)))
    }

    /// Partial update; only the provided fields change server-side.
    pub async fn update(&self, id: &str, payload: &CategoryPayload) -> ClientResult<Category> {
        let body = self.http.patch(&format!("{RESOURCE}/{id}"), payload).await?;
        let raw: RawCategory = decode(body)?;
        Ok(normalize_category(Some(raw)))
    }

    /// Delete; repeating after success fails with `NotFound`, which callers
    /// treat as already-deleted.
    pub async fn delete(&self, id: &str) -> ClientResult<Value> {
        let body = self.http.delete(&format!("{RESOURCE}/{id}")).await?;
        Ok(shared::envelope::unwrap_envelope(body).unwrap_or(Value::Null))
    }

    pub async fn paginate(&self, page: PageQuery) -> ClientResult<Page<Category>> {
        let body = self
            .http
            .get(&format!("{RESOURCE}/paginate"), &page.params())
            .await?;
        let raw: Page<RawCategory> = decode(body)?;
        Ok(raw.map(|c| normalize_category(Some(c))))
    }

    /// Server-side name search, paginated.
    pub async fn search(&self, query: &str, page: PageQuery) -> ClientResult<Page<Category>> {
        let mut params = page.params();
        params.push(("query".to_string(), query.to_string()));
        let body = self
            .http
            .get(&format!("{RESOURCE}/search"), &params)
            .await?;
        let raw: Page<RawCategory> = decode(body)?;
        Ok(raw.map(|c| normalize_category(Some(c))))
    }

    /// Total category count. The backend returns either a bare number or
    /// `{ count }`.
    pub async fn count(&self) -> ClientResult<u64> {
        let body = self.http.get(&format!("{RESOURCE}/count"), &[]).await?;
        let payload = shared::envelope::unwrap_envelope(body)?;
        let count = payload
            .as_u64()
            .or_else(|| payload.get("count").and_then(Value::as_u64))
            .unwrap_or(0);
        Ok(count)
    }
}
