//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Search statements are assembled at runtime by the
//! `search` module because their filters are optional.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Categories table
CREATE TABLE IF NOT EXISTS product_category (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

-- Products table
CREATE TABLE IF NOT EXISTS product (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    stock INTEGER NOT NULL DEFAULT 0,
    category_id INTEGER NOT NULL,
    price REAL NOT NULL DEFAULT 0,
    FOREIGN KEY (category_id) REFERENCES product_category(id)
);

-- Indexes for search filters and ordering
CREATE INDEX IF NOT EXISTS idx_product_category_id ON product(category_id);
CREATE INDEX IF NOT EXISTS idx_product_name ON product(name);
CREATE INDEX IF NOT EXISTS idx_product_price ON product(price);
"#;

// Product queries
pub const INSERT_PRODUCT: &str = r#"
INSERT INTO product (name, description, stock, category_id, price)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_PRODUCT_BY_ID: &str = r#"
SELECT id, name, description, stock, category_id, price
FROM product
WHERE id = ?1
"#;

pub const UPDATE_PRODUCT: &str = r#"
UPDATE product
SET name = ?2, description = ?3, stock = ?4, category_id = ?5, price = ?6
WHERE id = ?1
"#;

pub const DELETE_PRODUCT: &str = r#"
DELETE FROM product
WHERE id = ?1
"#;

// Category queries
pub const INSERT_CATEGORY: &str = r#"
INSERT INTO product_category (name)
VALUES (?1)
"#;

pub const SELECT_CATEGORY_BY_ID: &str = r#"
SELECT id, name
FROM product_category
WHERE id = ?1
"#;

pub const UPDATE_CATEGORY: &str = r#"
UPDATE product_category
SET name = ?2
WHERE id = ?1
"#;

pub const DELETE_CATEGORY: &str = r#"
DELETE FROM product_category
WHERE id = ?1
"#;

// Search fragments
pub const SEARCH_SELECT: &str = "SELECT product.id AS id, product.name AS name, \
     product.description AS description, product.stock AS stock, \
     product.category_id AS category_id, product.price AS price, \
     product_category.name AS category";

pub const SEARCH_COUNT: &str = "SELECT COUNT(*)";

pub const SEARCH_FROM: &str =
    " FROM product JOIN product_category ON product.category_id = product_category.id";

pub const PING: &str = "SELECT 1";
