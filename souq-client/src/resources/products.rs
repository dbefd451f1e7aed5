//! Products resource client
//!
//! CRUD plus the filtered listing and the image-collection mutations. The
//! entity returned by an image mutation carries the authoritative image list
//! and must replace any local copy.

use crate::{ClientError, ClientResult, HttpClient};
use serde_json::{json, Value};
use shared::envelope::{decode, decode_list};
use shared::models::{normalize_product, normalize_products, Product, ProductPayload, RawProduct};
use shared::query::{Page, PageQuery, ProductFilters};

const RESOURCE: &str = "/products";

/// Client-side upload limit; the server remains authoritative.
const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

const ACCEPTED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
];

fn image_mime(filename: &str) -> Option<&'static str> {
    let ext = filename.rsplit('.').next()?.to_ascii_lowercase();
    ACCEPTED_IMAGE_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

#[derive(Debug, Clone)]
pub struct ProductsClient {
    http: HttpClient,
}

impl ProductsClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Product>> {
        let body = self.http.get(RESOURCE, &[]).await?;
        let raw: Vec<RawProduct> = decode_list(body)?;
        Ok(normalize_products(raw))
    }

    pub async fn get_by_id(&self, id: &str) -> ClientResult<Product> {
        let body = self.http.get(&format!("{RESOURCE}/{id}"), &[]).await?;
        let raw: RawProduct = decode(body)?;
        Ok(normalize_product(Some(raw)))
    }

    pub async fn create(&self, payload: &ProductPayload) -> ClientResult<Product> {
        let body = self.http.post(RESOURCE, payload).await?;
        let raw: RawProduct = decode(body)?;
        Ok(normalize_product(Some(raw)))
    }

    /// Partial update. Products use PUT on this backend.
    pub async fn update(&self, id: &str, payload: &ProductPayload) -> ClientResult<Product> {
        let body = self.http.put(&format!("{RESOURCE}/{id}"), payload).await?;
        let raw: RawProduct = decode(body)?;
        Ok(normalize_product(Some(raw)))
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Value> {
        let body = self.http.delete(&format!("{RESOURCE}/{id}")).await?;
        Ok(shared::envelope::unwrap_envelope(body).unwrap_or(Value::Null))
    }

    pub async fn paginate(&self, page: PageQuery) -> ClientResult<Page<Product>> {
        let body = self
            .http
            .get(&format!("{RESOURCE}/pagination"), &page.params())
            .await?;
        let raw: Page<RawProduct> = decode(body)?;
        Ok(raw.map(|p| normalize_product(Some(p))))
    }

    pub async fn search(&self, query: &str, page: PageQuery) -> ClientResult<Page<Product>> {
        let mut params = page.params();
        params.push(("query".to_string(), query.to_string()));
        let body = self
            .http
            .get(&format!("{RESOURCE}/search"), &params)
            .await?;
        let raw: Page<RawProduct> = decode(body)?;
        Ok(raw.map(|p| normalize_product(Some(p))))
    }

    /// Structured filtering with server-side sort.
    pub async fn filtered(
        &self,
        filters: &ProductFilters,
        page: PageQuery,
    ) -> ClientResult<Page<Product>> {
        let mut params = filters.params();
        params.extend(page.params());
        let body = self
            .http
            .get(&format!("{RESOURCE}/filtered"), &params)
            .await?;
        let raw: Page<RawProduct> = decode(body)?;
        Ok(raw.map(|p| normalize_product(Some(p))))
    }

    /// Upload one image. Pre-flight checks (type, size) fail with
    /// `Validation` before any network traffic.
    pub async fn add_image(
        &self,
        id: &str,
        filename: &str,
        data: Vec<u8>,
    ) -> ClientResult<Product> {
        let mime = image_mime(filename).ok_or_else(|| {
            ClientError::Validation(format!(
                "Unsupported image type: {filename} (accepted: jpeg, png, webp)"
            ))
        })?;
        if data.len() > MAX_IMAGE_SIZE {
            return Err(ClientError::Validation(format!(
                "Image exceeds {}MB limit",
                MAX_IMAGE_SIZE / 1024 / 1024
            )));
        }

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(mime)
            .map_err(|e| ClientError::Validation(format!("Invalid multipart part: {e}")))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let body = self
            .http
            .post_multipart(&format!("{RESOURCE}/{id}/images"), form)
            .await?;
        let raw: RawProduct = decode(body)?;
        Ok(normalize_product(Some(raw)))
    }

    /// Remove one image by url.
    pub async fn remove_image(&self, id: &str, image_url: &str) -> ClientResult<Product> {
        let body = self
            .http
            .delete_with_body(
                &format!("{RESOURCE}/{id}/images"),
                &json!({ "imageUrl": image_url }),
            )
            .await?;
        let raw: RawProduct = decode(body)?;
        Ok(normalize_product(Some(raw)))
    }
}
