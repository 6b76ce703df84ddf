//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A small hand-written dataset with known totals:
///
/// - alice: 4 x 2.50 = 10.00
/// - bob: 1 x 10.00 = 10.00
/// - carol: no orders
/// - dave: one order without items
pub struct Fixture {
    pub categories: &'static str,
    pub users: &'static str,
    pub products: &'static str,
    pub orders: &'static str,
    pub order_items: &'static str,
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            categories: "category_id,category_name\nCAT001,Category 1\n",
            users: "user_id,username,email,created_at\n\
                    U001,bob,bob@example.com,2022-01-05 10:00:00\n\
                    U002,alice,alice@example.com,2022-02-01 08:30:00\n\
                    U003,carol,carol@example.com,2022-03-01 12:00:00\n\
                    U004,dave,dave@example.com,2022-04-01 09:15:00\n",
            products: "product_id,name,price,category_id\n\
                       P001,Product 1,10.00,CAT001\n\
                       P002,Product 2,2.50,CAT001\n",
            orders: "order_id,user_id,order_date,status\n\
                     O001,U001,2022-05-01 10:00:00,completed\n\
                     O002,U002,2022-05-02 11:00:00,shipped\n\
                     O003,U004,2022-05-03 12:00:00,processing\n",
            order_items: "order_item_id,order_id,product_id,quantity\n\
                          OI001,O001,P001,1\n\
                          OI002,O002,P002,4\n",
        }
    }
}

impl Fixture {
    /// Write the five CSV files into `dir`
    pub fn write_to(&self, dir: &Path) {
        fs::write(dir.join("categories.csv"), self.categories).unwrap();
        fs::write(dir.join("users.csv"), self.users).unwrap();
        fs::write(dir.join("products.csv"), self.products).unwrap();
        fs::write(dir.join("orders.csv"), self.orders).unwrap();
        fs::write(dir.join("order_items.csv"), self.order_items).unwrap();
    }

    /// Write into a fresh temp dir
    pub fn write(&self) -> TempDir {
        let dir = TempDir::new().unwrap();
        self.write_to(dir.path());
        dir
    }
}

/// Parse a two-decimal price like `12.34` into cents
pub fn price_to_cents(price: &str) -> i64 {
    let (whole, frac) = price.split_once('.').unwrap_or((price, "0"));
    let frac = format!("{:0<2}", frac);
    whole.parse::<i64>().unwrap() * 100 + frac[..2].parse::<i64>().unwrap()
}

/// Data lines of a generated CSV file split on commas (generated values
/// never need quoting)
pub fn data_lines(dir: &Path, file: &str) -> Vec<Vec<String>> {
    fs::read_to_string(dir.join(file))
        .unwrap()
        .lines()
        .skip(1)
        .map(|line| line.split(',').map(String::from).collect())
        .collect()
}
