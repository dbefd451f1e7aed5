//! Subcategories resource client
//!
//! Same operation family as categories, on `/sub-category`, with an optional
//! `categoryId` scoping param on the list/paginate/search reads.

use crate::{ClientResult, HttpClient};
use serde_json::Value;
use shared::envelope::{decode, decode_list};
use shared::models::{
    normalize_subcategories, normalize_subcategory, RawSubcategory, Subcategory,
    SubcategoryPayload,
};
use shared::query::{Page, PageQuery};

const RESOURCE: &str = "/sub-category";

fn scope_param(category_id: Option<&str>) -> Option<(String, String)> {
    category_id
        .filter(|id| !id.is_empty())
        .map(|id| ("categoryId".to_string(), id.to_string()))
}

#[derive(Debug, Clone)]
pub struct SubcategoriesClient {
    http: HttpClient,
}

impl SubcategoriesClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Fetch subcategories, optionally scoped to one category.
    pub async fn list(&self, category_id: Option<&str>) -> ClientResult<Vec<Subcategory>> {
        let params: Vec<_> = scope_param(category_id).into_iter().collect();
        let body = self.http.get(RESOURCE, &params).await?;
        let raw: Vec<RawSubcategory> = decode_list(body)?;
        Ok(normalize_subcategories(raw))
    }

    pub async fn get_by_id(&self, id: &str) -> ClientResult<Subcategory> {
        let body = self.http.get(&format!("{RESOURCE}/{id}"), &[]).await?;
        let raw: RawSubcategory = decode(body)?;
        Ok(normalize_subcategory(Some(raw)))
    }

    pub async fn create(&self, payload: &SubcategoryPayload) -> ClientResult<Subcategory> {
        let body = self.http.post(RESOURCE, payload).await?;
        let raw: RawSubcategory = decode(body)?;
        Ok(normalize_subcategory(Some(raw)))
    }

    pub async fn update(&self, id: &str, payload: &SubcategoryPayload) -> ClientResult<Subcategory> {
        let body = self.http.patch(&format!("{RESOURCE}/{id}"), payload).await?;
        let raw: RawSubcategory = decode(body)?;
        Ok(normalize_subcategory(Some(raw)))
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Value> {
        let body = self.http.delete(&format!("{RESOURCE}/{id}")).await?;
        Ok(shared::envelope::unwrap_envelope(body).unwrap_or(Value::Null))
    }

    pub async fn paginate(
        &self,
        page: PageQuery,
        category_id: Option<&str>,
    ) -> ClientResult<Page<Subcategory>> {
        let mut params = page.params();
        params.extend(scope_param(category_id));
        let body = self
            .http
            .get(&format!("{RESOURCE}/paginate"), &params)
            .await?;
        let raw: Page<RawSubcategory> = decode(body)?;
        Ok(raw.map(|s| normalize_subcategory(Some(s))))
    }

    pub async fn search(
        &self,
        query: &str,
        page: PageQuery,
        category_id: Option<&str>,
    ) -> ClientResult<Page<Subcategory>> {
        let mut params = page.params();
        params.push(("query".to_string(), query.to_string()));
        params.extend(scope_param(category_id));
        let body = self
            .http
            .get(&format!("{RESOURCE}/search"), &params)
            .await?;
        let raw: Page<RawSubcategory> = decode(body)?;
        Ok(raw.map(|s| normalize_subcategory(Some(s))))
    }
}
