//! Search value objects and pagination arithmetic.
//!
//! Pure functions only. The SQL side lives with the store implementation; this
//! module decides which columns may be sorted on and how pages are counted.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::types::ProductWithCategory;
use crate::serde::{deserialize_optional_number, deserialize_optional_string};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Columns a search may be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Id,
    #[default]
    Name,
    Price,
    Stock,
    Category,
}

impl SortBy {
    /// Parse a `sort_by` value against the allow-list.
    ///
    /// Accepts both bare names (`price`) and the qualified column names used
    /// by older clients (`product.price`).
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "name" | "product.name" => Ok(Self::Name),
            "id" | "product.id" => Ok(Self::Id),
            "price" | "product.price" => Ok(Self::Price),
            "stock" | "product.stock" => Ok(Self::Stock),
            "category" | "product_category.name" => Ok(Self::Category),
            _ => Err(ValidationError::UnknownSortColumn(raw.to_string())),
        }
    }

    /// The qualified SQL column for this sort key.
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "product.id",
            Self::Name => "product.name",
            Self::Price => "product.price",
            Self::Stock => "product.stock",
            Self::Category => "product_category.name",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::Category => "category",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse an `order_by` value. Anything other than `desc` becomes `asc`.
    pub fn coerce(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw query string parameters for `GET /v1/products/search`.
///
/// Empty values are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sort_by: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub order_by: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub page_size: Option<u32>,
}

/// A validated product search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub sort_by: SortBy,
    pub order_by: SortOrder,
    pub page: u32,
    pub page_size: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            name: None,
            category: None,
            min_price: 0.0,
            max_price: 0.0,
            sort_by: SortBy::default(),
            order_by: SortOrder::default(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TryFrom<SearchParams> for SearchQuery {
    type Error = ValidationError;

    fn try_from(params: SearchParams) -> Result<Self, Self::Error> {
        let sort_by = match params.sort_by.as_deref() {
            Some(raw) => SortBy::parse(raw)?,
            None => SortBy::default(),
        };
        let order_by = params
            .order_by
            .as_deref()
            .map(SortOrder::coerce)
            .unwrap_or_default();

        let page = params.page.unwrap_or(DEFAULT_PAGE);
        if page == 0 {
            return Err(ValidationError::InvalidPage);
        }

        let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ValidationError::InvalidPageSize { max: MAX_PAGE_SIZE });
        }

        Ok(Self {
            name: params.name,
            category: params.category,
            min_price: params.min_price.unwrap_or(0.0),
            max_price: params.max_price.unwrap_or(0.0),
            sort_by,
            order_by,
            page,
            page_size,
        })
    }
}

impl SearchQuery {
    /// Row offset of the first item on the requested page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Lower price bound, if active.
    pub fn min_price_filter(&self) -> Option<f64> {
        (self.min_price > 0.0).then_some(self.min_price)
    }

    /// Upper price bound, if active.
    pub fn max_price_filter(&self) -> Option<f64> {
        (self.max_price > 0.0).then_some(self.max_price)
    }

    /// Pattern for a SQL `LIKE` substring match.
    pub fn like_pattern(value: &str) -> String {
        format!("%{}%", value)
    }

    /// Builds the URL of the given page, keeping every active filter.
    pub fn page_url(&self, base_path: &str, page: u32) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(name) = &self.name {
            query.append_pair("name", name);
        }
        if let Some(category) = &self.category {
            query.append_pair("category", category);
        }
        if let Some(min) = self.min_price_filter() {
            query.append_pair("min_price", &min.to_string());
        }
        if let Some(max) = self.max_price_filter() {
            query.append_pair("max_price", &max.to_string());
        }
        query
            .append_pair("sort_by", self.sort_by.as_str())
            .append_pair("order_by", self.order_by.as_str())
            .append_pair("page", &page.to_string())
            .append_pair("page_size", &self.page_size.to_string());

        format!("{}?{}", base_path, query.finish())
    }
}

/// Number of pages needed for `total` items.
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size))
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub items: Vec<ProductWithCategory>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub next_page: Option<u32>,
}

impl SearchResult {
    pub fn new(query: &SearchQuery, items: Vec<ProductWithCategory>, total_count: u64) -> Self {
        let total_pages = total_pages(total_count, query.page_size);
        let next_page = (u64::from(query.page) < total_pages).then(|| query.page + 1);

        Self {
            items,
            total_count,
            page: query.page,
            page_size: query.page_size,
            total_pages,
            next_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_allow_list() {
        assert_eq!(SortBy::parse("price"), Ok(SortBy::Price));
        assert_eq!(SortBy::parse("product.stock"), Ok(SortBy::Stock));
        assert_eq!(SortBy::parse("CATEGORY"), Ok(SortBy::Category));
        assert_eq!(SortBy::parse(""), Ok(SortBy::Name));
    }

    #[test]
    fn test_sort_by_rejects_unknown_columns() {
        let injected = "name; DROP TABLE product";
        assert_eq!(
            SortBy::parse(injected),
            Err(ValidationError::UnknownSortColumn(injected.to_string()))
        );
        assert!(SortBy::parse("description").is_err());
    }

    #[test]
    fn test_sort_columns_are_qualified() {
        assert_eq!(SortBy::Name.column(), "product.name");
        assert_eq!(SortBy::Category.column(), "product_category.name");
    }

    #[test]
    fn test_order_by_coerces_invalid_values_to_asc() {
        assert_eq!(SortOrder::coerce("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::coerce("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::coerce("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::coerce("sideways"), SortOrder::Asc);
        assert_eq!(SortOrder::coerce(""), SortOrder::Asc);
    }

    #[test]
    fn test_query_defaults() {
        let query = SearchQuery::try_from(SearchParams::default()).unwrap();

        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
        assert_eq!(query.sort_by, SortBy::Name);
        assert_eq!(query.order_by, SortOrder::Asc);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_query_rejects_bad_pagination() {
        let params = SearchParams {
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(
            SearchQuery::try_from(params),
            Err(ValidationError::InvalidPage)
        );

        let params = SearchParams {
            page_size: Some(MAX_PAGE_SIZE + 1),
            ..Default::default()
        };
        assert_eq!(
            SearchQuery::try_from(params),
            Err(ValidationError::InvalidPageSize { max: MAX_PAGE_SIZE })
        );
    }

    #[test]
    fn test_offset() {
        let query = SearchQuery {
            page: 3,
            page_size: 25,
            ..Default::default()
        };
        assert_eq!(query.offset(), 50);
    }

    #[test]
    fn test_price_filters_inactive_when_not_positive() {
        let query = SearchQuery {
            min_price: 0.0,
            max_price: -4.0,
            ..Default::default()
        };
        assert_eq!(query.min_price_filter(), None);
        assert_eq!(query.max_price_filter(), None);

        let query = SearchQuery {
            min_price: 2.5,
            max_price: 10.0,
            ..Default::default()
        };
        assert_eq!(query.min_price_filter(), Some(2.5));
        assert_eq!(query.max_price_filter(), Some(10.0));
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(95, 7), 14);
    }

    #[test]
    fn test_result_next_page() {
        let query = SearchQuery {
            page: 1,
            page_size: 2,
            ..Default::default()
        };
        let result = SearchResult::new(&query, Vec::new(), 5);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.next_page, Some(2));

        let last = SearchQuery { page: 3, ..query };
        let result = SearchResult::new(&last, Vec::new(), 5);
        assert_eq!(result.next_page, None);
    }

    #[test]
    fn test_page_url_keeps_filters() {
        let query = SearchQuery {
            name: Some("red widget".to_string()),
            min_price: 5.0,
            order_by: SortOrder::Desc,
            ..Default::default()
        };

        let url = query.page_url("/v1/products/search", 2);
        assert_eq!(
            url,
            "/v1/products/search?name=red+widget&min_price=5&sort_by=name&order_by=desc&page=2&page_size=10"
        );
    }
}
