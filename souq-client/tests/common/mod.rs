//! In-process mock backend for integration tests.
//!
//! A small axum router reproducing the backend wire format: `{success, data}`
//! envelopes, 1-indexed pagination, name search, brand filtering and the
//! image-collection routes. State lives in shared vectors of raw JSON docs so
//! tests can seed and inspect it directly.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "tok-123";
pub const PASSWORD: &str = "secret123";

type Docs = Arc<Mutex<Vec<Value>>>;

#[derive(Clone, Default)]
pub struct BackendState {
    pub categories: Docs,
    pub subcategories: Docs,
    pub products: Docs,
    next_id: Arc<AtomicU64>,
    /// Paths hit by read endpoints, in order.
    pub read_log: Arc<Mutex<Vec<String>>>,
    /// Authorization header seen on the most recent request.
    pub last_auth: Arc<Mutex<Option<String>>>,
    /// One-shot delay applied to the next product read, for staleness tests.
    pub delay_next_read_ms: Arc<Mutex<Option<u64>>>,
}

impl BackendState {
    pub fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn seed_category(&self, en: &str, ar: &str) -> String {
        let id = self.next_id("c");
        self.categories.lock().unwrap().push(json!({
            "_id": id,
            "name": { "en": en, "ar": ar },
            "description": { "en": "", "ar": "" },
            "createdAt": "2026-01-01T00:00:00Z"
        }));
        id
    }

    pub fn seed_subcategory(&self, en: &str, category_id: &str) -> String {
        let id = self.next_id("s");
        self.subcategories.lock().unwrap().push(json!({
            "_id": id,
            "name": { "en": en, "ar": "" },
            "description": { "en": "", "ar": "" },
            "categoryId": category_id
        }));
        id
    }

    pub fn seed_product(&self, en: &str, brand: &str, price: f64) -> String {
        let id = self.next_id("p");
        self.products.lock().unwrap().push(json!({
            "_id": id,
            "name": { "en": en, "ar": "" },
            "price": price,
            "discounts": 0,
            "brand": brand,
            "imageUrls": ["https://img.test/seed.jpg"],
            "subcategoryId": "s1",
            "stock": 5
        }));
        id
    }

    pub fn reads_of(&self, path: &str) -> usize {
        self.read_log
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }

    pub fn last_read(&self) -> Option<String> {
        self.read_log.lock().unwrap().last().cloned()
    }

    fn log_read(&self, path: &str, headers: &HeaderMap) {
        self.read_log.lock().unwrap().push(path.to_string());
        *self.last_auth.lock().unwrap() = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
    }

    async fn maybe_delay(&self) {
        let delay = self.delay_next_read_ms.lock().unwrap().take();
        if let Some(ms) = delay {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        }
    }
}

fn env(data: Value) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

fn not_found(what: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": format!("{what} not found") })),
    )
}

fn page_of(items: Vec<Value>, params: &HashMap<String, String>) -> Value {
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let total = items.len();
    let start = (page.saturating_sub(1)) * limit;
    let slice: Vec<Value> = items.into_iter().skip(start).take(limit).collect();
    json!({ "items": slice, "total": total })
}

fn name_matches(doc: &Value, query: &str) -> bool {
    let q = query.to_lowercase();
    ["en", "ar"].iter().any(|lang| {
        doc["name"][lang]
            .as_str()
            .map(|n| n.to_lowercase().contains(&q))
            .unwrap_or(false)
    })
}

fn find_mut(docs: &mut Vec<Value>, id: &str) -> Option<usize> {
    docs.iter().position(|d| d["_id"] == id)
}

fn merge(doc: &mut Value, patch: Value) {
    if let (Value::Object(doc), Value::Object(patch)) = (doc, patch) {
        for (k, v) in patch {
            doc.insert(k, v);
        }
    }
}

// ========== Auth ==========

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if body["password"] == PASSWORD {
        Ok(env(json!({
            "token": TOKEN,
            "userName": "Admin",
            "email": body["email"],
            "role": "admin"
        })))
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid credentials" })),
        ))
    }
}

async fn logout() -> Json<Value> {
    env(json!({ "message": "ok" }))
}

// ========== Generic CRUD over a doc collection ==========

macro_rules! crud_handlers {
    ($mod_name:ident, $field:ident, $prefix:literal, $label:literal, $paginate_path:literal) => {
        mod $mod_name {
            use super::*;

            pub async fn list(
                State(s): State<BackendState>,
                headers: HeaderMap,
                Query(params): Query<HashMap<String, String>>,
            ) -> Json<Value> {
                s.log_read(concat!("/", $label, ""), &headers);
                let docs = s.$field.lock().unwrap().clone();
                let docs = scope(docs, &params);
                env(Value::Array(docs))
            }

            pub async fn get_one(
                State(s): State<BackendState>,
                Path(id): Path<String>,
            ) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
                let docs = s.$field.lock().unwrap();
                docs.iter()
                    .find(|d| d["_id"] == id.as_str())
                    .cloned()
                    .map(env)
                    .ok_or_else(|| not_found($label))
            }

            pub async fn create(
                State(s): State<BackendState>,
                Json(body): Json<Value>,
            ) -> Json<Value> {
                let id = s.next_id($prefix);
                let mut doc = json!({ "_id": id });
                merge(&mut doc, body);
                s.$field.lock().unwrap().push(doc.clone());
                env(doc)
            }

            pub async fn update(
                State(s): State<BackendState>,
                Path(id): Path<String>,
                Json(body): Json<Value>,
            ) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
                let mut docs = s.$field.lock().unwrap();
                let Some(idx) = find_mut(&mut docs, &id) else {
                    return Err(not_found($label));
                };
                merge(&mut docs[idx], body);
                Ok(env(docs[idx].clone()))
            }

            pub async fn remove(
                State(s): State<BackendState>,
                Path(id): Path<String>,
            ) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
                let mut docs = s.$field.lock().unwrap();
                let Some(idx) = find_mut(&mut docs, &id) else {
                    return Err(not_found($label));
                };
                docs.remove(idx);
                Ok(env(json!({ "deleted": true })))
            }

            pub async fn paginate(
                State(s): State<BackendState>,
                headers: HeaderMap,
                Query(params): Query<HashMap<String, String>>,
            ) -> Json<Value> {
                s.log_read($paginate_path, &headers);
                s.maybe_delay().await;
                let docs = s.$field.lock().unwrap().clone();
                let docs = scope(docs, &params);
                env(page_of(docs, &params))
            }

            pub async fn search(
                State(s): State<BackendState>,
                headers: HeaderMap,
                Query(params): Query<HashMap<String, String>>,
            ) -> Json<Value> {
                s.log_read(concat!("/", $label, "/search"), &headers);
                s.maybe_delay().await;
                let query = params.get("query").cloned().unwrap_or_default();
                let docs = s.$field.lock().unwrap().clone();
                let docs: Vec<Value> = scope(docs, &params)
                    .into_iter()
                    .filter(|d| name_matches(d, &query))
                    .collect();
                env(page_of(docs, &params))
            }

            fn scope(docs: Vec<Value>, params: &HashMap<String, String>) -> Vec<Value> {
                match params.get("categoryId") {
                    Some(id) if !id.is_empty() => docs
                        .into_iter()
                        .filter(|d| d["categoryId"] == id.as_str())
                        .collect(),
                    _ => docs,
                }
            }
        }
    };
}

crud_handlers!(categories, categories, "c", "categories", "/categories/paginate");
crud_handlers!(subcategories, subcategories, "s", "sub-category", "/sub-category/paginate");
crud_handlers!(products, products, "p", "products", "/products/pagination");

async fn count_categories(State(s): State<BackendState>) -> Json<Value> {
    env(json!(s.categories.lock().unwrap().len()))
}

async fn filtered_products(
    State(s): State<BackendState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    s.log_read("/products/filtered", &headers);
    s.maybe_delay().await;
    let docs = s.products.lock().unwrap().clone();
    let docs: Vec<Value> = docs
        .into_iter()
        .filter(|d| match params.get("brand") {
            Some(brand) => d["brand"] == brand.as_str(),
            None => true,
        })
        .filter(|d| match params.get("minPrice").and_then(|p| p.parse::<f64>().ok()) {
            Some(min) => d["price"].as_f64().unwrap_or(0.0) >= min,
            None => true,
        })
        .filter(|d| match params.get("maxPrice").and_then(|p| p.parse::<f64>().ok()) {
            Some(max) => d["price"].as_f64().unwrap_or(0.0) <= max,
            None => true,
        })
        .collect();
    env(page_of(docs, &params))
}

async fn add_product_image(
    State(s): State<BackendState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut docs = s.products.lock().unwrap();
    let Some(idx) = find_mut(&mut docs, &id) else {
        return Err(not_found("products"));
    };
    let url = format!("https://img.test/{id}-{}.jpg", s.next_id(""));
    docs[idx]["imageUrls"]
        .as_array_mut()
        .expect("imageUrls array")
        .push(json!(url));
    Ok(env(docs[idx].clone()))
}

async fn remove_product_image(
    State(s): State<BackendState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut docs = s.products.lock().unwrap();
    let Some(idx) = find_mut(&mut docs, &id) else {
        return Err(not_found("products"));
    };
    if let Some(urls) = docs[idx]["imageUrls"].as_array_mut() {
        urls.retain(|u| *u != body["imageUrl"]);
    }
    Ok(env(docs[idx].clone()))
}

/// Route that violates the envelope contract, for malformed-response tests.
async fn broken() -> Json<Value> {
    Json(json!({ "success": true, "data": null }))
}

fn router(state: BackendState) -> Router {
    Router::new()
        .route("/user/login", post(login))
        .route("/user/logout", post(logout))
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            get(categories::get_one)
                .patch(categories::update)
                .delete(categories::remove),
        )
        .route("/categories/paginate", get(categories::paginate))
        .route("/categories/search", get(categories::search))
        .route("/categories/count", get(count_categories))
        .route(
            "/sub-category",
            get(subcategories::list).post(subcategories::create),
        )
        .route(
            "/sub-category/{id}",
            get(subcategories::get_one)
                .patch(subcategories::update)
                .delete(subcategories::remove),
        )
        .route("/sub-category/paginate", get(subcategories::paginate))
        .route("/sub-category/search", get(subcategories::search))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::get_one)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/products/pagination", get(products::paginate))
        .route("/products/search", get(products::search))
        .route("/products/filtered", get(filtered_products))
        .route(
            "/products/{id}/images",
            post(add_product_image).delete(remove_product_image),
        )
        .route("/broken", get(broken))
        .with_state(state)
}

/// Bind an ephemeral port, serve the mock backend, return its base url.
pub async fn spawn_backend() -> (String, BackendState) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let state = BackendState::default();
    let app = router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock backend");
    });
    (format!("http://{addr}"), state)
}
