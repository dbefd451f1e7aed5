//! 查询与分页类型
//!
//! Pagination, search and structured-filter state shared by the resource
//! clients and the screen coordinators.

use serde::{Deserialize, Serialize};

/// Pagination request. `page` is 1-based, `limit` must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Total number of pages for a given record count.
    pub fn total_pages(&self, total: u64) -> u32 {
        ((total as f64) / (self.limit as f64)).ceil() as u32
    }

    pub fn params(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

/// One page of results. `total` counts records across all pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Map the items while keeping the total, used when normalizing a raw page.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Product sort field, wire names match the backend query params.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortBy {
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "name")]
    Name,
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Price => "price",
            SortBy::Name => "name",
            SortBy::CreatedAt => "createdAt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Asc,
    #[default]
    #[serde(rename = "desc")]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Structured product filters.
///
/// A value of this type is either *draft* state (being edited in the filter
/// panel) or *applied* state (driving the active fetch); the coordinator keeps
/// one of each and copies draft over applied on an explicit apply action.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl ProductFilters {
    /// True when any field differs from its default, i.e. applying this
    /// configuration should route the fetch to the filtered endpoint.
    pub fn is_active(&self) -> bool {
        self.subcategory_id.is_some()
            || self.brand.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.sort_by != SortBy::default()
            || self.sort_order != SortOrder::default()
    }

    /// Encode as query params for `/products/filtered`.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(id) = &self.subcategory_id {
            params.push(("categoryId".to_string(), id.clone()));
        }
        if let Some(brand) = &self.brand {
            params.push(("brand".to_string(), brand.clone()));
        }
        if let Some(min) = self.min_price {
            params.push(("minPrice".to_string(), min.to_string()));
        }
        if let Some(max) = self.max_price {
            params.push(("maxPrice".to_string(), max.to_string()));
        }
        params.push(("sortBy".to_string(), self.sort_by.as_str().to_string()));
        params.push(("sortOrder".to_string(), self.sort_order.as_str().to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_clamps() {
        let q = PageQuery::new(0, 0);
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 1);
    }

    #[test]
    fn test_total_pages() {
        let q = PageQuery::new(1, 10);
        assert_eq!(q.total_pages(0), 0);
        assert_eq!(q.total_pages(10), 1);
        assert_eq!(q.total_pages(11), 2);
        assert_eq!(q.total_pages(95), 10);
    }

    #[test]
    fn test_default_filters_inactive() {
        assert!(!ProductFilters::default().is_active());
    }

    #[test]
    fn test_any_field_activates_filters() {
        let f = ProductFilters {
            brand: Some("nike".to_string()),
            ..Default::default()
        };
        assert!(f.is_active());

        let f = ProductFilters {
            sort_by: SortBy::Price,
            ..Default::default()
        };
        assert!(f.is_active());

        let f = ProductFilters {
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        assert!(f.is_active());
    }

    #[test]
    fn test_filter_params_encoding() {
        let f = ProductFilters {
            subcategory_id: Some("sc1".to_string()),
            min_price: Some(10.0),
            max_price: Some(99.5),
            sort_by: SortBy::Price,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let params = f.params();
        assert!(params.contains(&("categoryId".to_string(), "sc1".to_string())));
        assert!(params.contains(&("minPrice".to_string(), "10".to_string())));
        assert!(params.contains(&("maxPrice".to_string(), "99.5".to_string())));
        assert!(params.contains(&("sortBy".to_string(), "price".to_string())));
        assert!(params.contains(&("sortOrder".to_string(), "asc".to_string())));
        assert!(!params.iter().any(|(k, _)| k == "brand"));
    }
}
