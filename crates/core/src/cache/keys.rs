//! Cache key builders.

/// Returns the cache key for a product.
pub fn product_key(product_id: i64) -> String {
    format!("product:{}", product_id)
}

/// Returns the cache key for a product category.
///
/// Categories get their own namespace. Earlier deployments wrote category
/// entries under `product:<id>` and read them from `product-info:<id>`, so
/// category reads never hit and category writes could clobber products.
pub fn category_key(category_id: i64) -> String {
    format!("product_category:{}", category_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_key() {
        assert_eq!(product_key(42), "product:42");
    }

    #[test]
    fn test_category_key() {
        assert_eq!(category_key(7), "product_category:7");
    }

    #[test]
    fn test_keys_do_not_collide() {
        assert_ne!(product_key(1), category_key(1));
    }
}
