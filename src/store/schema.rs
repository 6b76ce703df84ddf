//! Fixed relational schema for the five e-commerce tables.
//!
//! Tables are listed in dependency order: every table only references
//! tables that appear before it.

use shop_data_gen::{Category, Order, OrderItem, Product, Record, User};

/// One table of the schema
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    /// Columns in CSV/insert order; all are required in the input file
    pub columns: &'static [&'static str],
    pub create_sql: &'static str,
    /// Parameterized insert; values are bound as text and cast by the store
    pub insert_sql: &'static str,
}

pub const CATEGORIES: TableSpec = TableSpec {
    name: Category::TABLE,
    columns: Category::HEADER,
    create_sql: "CREATE TABLE categories (
    category_id VARCHAR PRIMARY KEY,
    category_name VARCHAR NOT NULL
)",
    insert_sql: "INSERT INTO categories (category_id, category_name) VALUES (?, ?)",
};

pub const USERS: TableSpec = TableSpec {
    name: User::TABLE,
    columns: User::HEADER,
    create_sql: "CREATE TABLE users (
    user_id VARCHAR PRIMARY KEY,
    username VARCHAR NOT NULL,
    email VARCHAR NOT NULL,
    created_at TIMESTAMP NOT NULL
)",
    insert_sql: "INSERT INTO users (user_id, username, email, created_at) \
                 VALUES (?, ?, ?, CAST(? AS TIMESTAMP))",
};

pub const PRODUCTS: TableSpec = TableSpec {
    name: Product::TABLE,
    columns: Product::HEADER,
    create_sql: "CREATE TABLE products (
    product_id VARCHAR PRIMARY KEY,
    name VARCHAR NOT NULL,
    price DECIMAL(10,2) NOT NULL CHECK (price >= 0),
    category_id VARCHAR NOT NULL,
    FOREIGN KEY (category_id) REFERENCES categories (category_id)
)",
    insert_sql: "INSERT INTO products (product_id, name, price, category_id) \
                 VALUES (?, ?, CAST(? AS DECIMAL(10,2)), ?)",
};

pub const ORDERS: TableSpec = TableSpec {
    name: Order::TABLE,
    columns: Order::HEADER,
    create_sql: "CREATE TABLE orders (
    order_id VARCHAR PRIMARY KEY,
    user_id VARCHAR NOT NULL,
    order_date TIMESTAMP NOT NULL,
    status VARCHAR NOT NULL CHECK (status IN ('completed', 'shipped', 'processing', 'cancelled')),
    FOREIGN KEY (user_id) REFERENCES users (user_id)
)",
    insert_sql: "INSERT INTO orders (order_id, user_id, order_date, status) \
                 VALUES (?, ?, CAST(? AS TIMESTAMP), ?)",
};

pub const ORDER_ITEMS: TableSpec = TableSpec {
    name: OrderItem::TABLE,
    columns: OrderItem::HEADER,
    create_sql: "CREATE TABLE order_items (
    order_item_id VARCHAR PRIMARY KEY,
    order_id VARCHAR NOT NULL,
    product_id VARCHAR NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity >= 1),
    FOREIGN KEY (order_id) REFERENCES orders (order_id),
    FOREIGN KEY (product_id) REFERENCES products (product_id)
)",
    insert_sql: "INSERT INTO order_items (order_item_id, order_id, product_id, quantity) \
                 VALUES (?, ?, ?, CAST(? AS INTEGER))",
};

/// Load order: parents before children
pub static LOAD_ORDER: [TableSpec; 5] = [CATEGORIES, USERS, PRODUCTS, ORDERS, ORDER_ITEMS];

/// Creation order used by the reset
pub static CREATE_ORDER: [TableSpec; 5] = [USERS, CATEGORIES, PRODUCTS, ORDERS, ORDER_ITEMS];

/// Drop order used by the reset: children before parents
pub const DROP_ORDER: [&str; 5] = ["order_items", "orders", "products", "categories", "users"];

/// Look up a table by name
pub fn table(name: &str) -> Option<&'static TableSpec> {
    LOAD_ORDER.iter().find(|t| t.name == name)
}

/// SQL batch that drops all five tables (children first) and recreates
/// them empty
pub fn reset_sql() -> String {
    let mut sql = String::new();
    for table in DROP_ORDER {
        sql.push_str(&format!("DROP TABLE IF EXISTS {};\n", table));
    }
    for spec in CREATE_ORDER.iter() {
        sql.push_str(spec.create_sql);
        sql.push_str(";\n");
    }
    sql
}
