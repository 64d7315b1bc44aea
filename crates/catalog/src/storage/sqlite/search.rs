//! Search statement assembly.
//!
//! Filters are optional, so the search and count statements are built with
//! `sqlx::QueryBuilder`. User input only ever reaches the statement through
//! bind parameters; the ORDER BY column comes from the `SortBy` allow-list.

use catalog_core::catalog::SearchQuery;
use sqlx::{QueryBuilder, Sqlite};

use super::schema::{SEARCH_COUNT, SEARCH_FROM, SEARCH_SELECT};

/// Builds the `COUNT(*)` statement over every row matching the filters.
pub fn count_statement(query: &SearchQuery) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(SEARCH_COUNT);
    builder.push(SEARCH_FROM);
    push_filters(&mut builder, query);
    builder
}

/// Builds the statement for one ordered page of matching rows.
pub fn page_statement(query: &SearchQuery) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(SEARCH_SELECT);
    builder.push(SEARCH_FROM);
    push_filters(&mut builder, query);

    // product.id breaks ties so that pages never overlap.
    builder
        .push(" ORDER BY ")
        .push(query.sort_by.column())
        .push(" ")
        .push(query.order_by.as_sql())
        .push(", product.id ASC");

    builder
        .push(" LIMIT ")
        .push_bind(i64::from(query.page_size))
        .push(" OFFSET ")
        .push_bind(i64::try_from(query.offset()).unwrap_or(i64::MAX));

    builder
}

fn push_filters(builder: &mut QueryBuilder<'static, Sqlite>, query: &SearchQuery) {
    let mut separator = " WHERE ";

    if let Some(name) = &query.name {
        builder
            .push(separator)
            .push("product.name LIKE ")
            .push_bind(SearchQuery::like_pattern(name));
        separator = " AND ";
    }

    if let Some(category) = &query.category {
        builder
            .push(separator)
            .push("product_category.name LIKE ")
            .push_bind(SearchQuery::like_pattern(category));
        separator = " AND ";
    }

    if let Some(min) = query.min_price_filter() {
        builder
            .push(separator)
            .push("product.price >= ")
            .push_bind(min);
        separator = " AND ";
    }

    if let Some(max) = query.max_price_filter() {
        builder
            .push(separator)
            .push("product.price <= ")
            .push_bind(max);
    }
}
