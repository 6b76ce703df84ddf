//! Record types for the five generated collections.
//!
//! Each record knows its table name and header, and renders itself as an
//! ordered list of CSV field values matching that header.

use chrono::NaiveDateTime;

/// Timestamp layout used in every generated file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A flat record that maps onto one CSV file and one table.
pub trait Record {
    /// Table (and file stem) name
    const TABLE: &'static str;
    /// Column names in file order
    const HEADER: &'static [&'static str];

    /// Primary key value
    fn key(&self) -> &str;

    /// Field values in `HEADER` order
    fn fields(&self) -> Vec<String>;
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Completed,
    Shipped,
    Processing,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in sampling order
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Completed,
        OrderStatus::Shipped,
        OrderStatus::Processing,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "completed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Processing => "processing",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub category_id: String,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    /// Unit price, already rounded to two decimals
    pub price: f64,
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub user_id: String,
    pub order_date: NaiveDateTime,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub order_item_id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: u32,
}

impl Record for Category {
    const TABLE: &'static str = "categories";
    const HEADER: &'static [&'static str] = &["category_id", "category_name"];

    fn key(&self) -> &str {
        &self.category_id
    }

    fn fields(&self) -> Vec<String> {
        vec![self.category_id.clone(), self.category_name.clone()]
    }
}

impl Record for User {
    const TABLE: &'static str = "users";
    const HEADER: &'static [&'static str] = &["user_id", "username", "email", "created_at"];

    fn key(&self) -> &str {
        &self.user_id
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.user_id.clone(),
            self.username.clone(),
            self.email.clone(),
            self.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ]
    }
}

impl Record for Product {
    const TABLE: &'static str = "products";
    const HEADER: &'static [&'static str] = &["product_id", "name", "price", "category_id"];

    fn key(&self) -> &str {
        &self.product_id
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.product_id.clone(),
            self.name.clone(),
            format!("{:.2}", self.price),
            self.category_id.clone(),
        ]
    }
}

impl Record for Order {
    const TABLE: &'static str = "orders";
    const HEADER: &'static [&'static str] = &["order_id", "user_id", "order_date", "status"];

    fn key(&self) -> &str {
        &self.order_id
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.order_id.clone(),
            self.user_id.clone(),
            self.order_date.format(TIMESTAMP_FORMAT).to_string(),
            self.status.to_string(),
        ]
    }
}

impl Record for OrderItem {
    const TABLE: &'static str = "order_items";
    const HEADER: &'static [&'static str] = &["order_item_id", "order_id", "product_id", "quantity"];

    fn key(&self) -> &str {
        &self.order_item_id
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.order_item_id.clone(),
            self.order_id.clone(),
            self.product_id.clone(),
            self.quantity.to_string(),
        ]
    }
}

/// All five generated collections, each in id order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub categories: Vec<Category>,
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
}
