//! Dataset generator that produces all five record collections.
//!
//! Collections are built parents first. Foreign keys are sampled only from
//! collections that already exist, so every reference resolves.

use crate::error::GenerateError;
use crate::fake::{FakeData, SECONDS_PER_DAY};
use crate::records::{Category, Dataset, Order, OrderItem, Product, User};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Price bounds for generated products
const MIN_PRICE: f64 = 5.0;
const MAX_PRICE: f64 = 250.0;

/// Quantity bounds for generated order items
const MIN_QUANTITY: u32 = 1;
const MAX_QUANTITY: u32 = 5;

/// Record counts per collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetCounts {
    pub categories: usize,
    pub users: usize,
    pub products: usize,
    pub orders: usize,
    pub order_items: usize,
}

impl Default for DatasetCounts {
    fn default() -> Self {
        Self {
            categories: 50,
            users: 60,
            products: 75,
            orders: 65,
            order_items: 90,
        }
    }
}

impl DatasetCounts {
    /// Check that every non-empty child collection has a parent to sample from
    pub fn validate(&self) -> Result<(), GenerateError> {
        let links = [
            ("products", self.products, "categories", self.categories),
            ("orders", self.orders, "users", self.users),
            ("order_items", self.order_items, "orders", self.orders),
            ("order_items", self.order_items, "products", self.products),
        ];

        for (child, count, parent, parent_count) in links {
            if count > 0 && parent_count == 0 {
                return Err(GenerateError::EmptyParent {
                    child,
                    parent,
                    count,
                });
            }
        }
        Ok(())
    }
}

/// Generator settings
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub counts: DatasetCounts,
    pub seed: u64,
    /// Lower bound of every generated timestamp
    pub start_date: NaiveDateTime,
    /// Maximum day offset from `start_date`
    pub day_span: u32,
}

impl GeneratorConfig {
    /// Check counts and that every timestamp in the window is representable
    pub fn validate(&self) -> Result<(), GenerateError> {
        self.counts.validate()?;

        // Latest possible draw: last day of the window, last second
        TimeDelta::try_days(i64::from(self.day_span))
            .and_then(|days| days.checked_add(&TimeDelta::seconds(SECONDS_PER_DAY - 1)))
            .and_then(|offset| self.start_date.checked_add_signed(offset))
            .map(|_| ())
            .ok_or(GenerateError::WindowOverflow {
                start: self.start_date,
                day_span: self.day_span,
            })
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            counts: DatasetCounts::default(),
            seed: 42,
            start_date: default_start_date(),
            day_span: 900,
        }
    }
}

/// Midnight, 2022-01-01
pub fn default_start_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Format a 1-based counter as a zero-padded id, e.g. `U007`
pub fn format_id(prefix: &str, n: usize) -> String {
    format!("{}{:03}", prefix, n)
}

/// Main data generator
pub struct Generator {
    config: GeneratorConfig,
    fake: FakeData<ChaCha8Rng>,
}

impl Generator {
    /// Create a generator. The RNG is seeded here and nowhere else.
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            fake: FakeData::new(rng),
        }
    }

    /// Generate all five collections.
    ///
    /// Draw order is categories, users, products, orders, order items;
    /// changing it changes the dataset for a given seed.
    pub fn generate(&mut self) -> Result<Dataset, GenerateError> {
        self.config.validate()?;

        let categories = self.generate_categories();
        let users = self.generate_users();
        let products = self.generate_products(&categories);
        let orders = self.generate_orders(&users);
        let order_items = self.generate_order_items(&orders, &products);

        Ok(Dataset {
            categories,
            users,
            products,
            orders,
            order_items,
        })
    }

    fn generate_categories(&mut self) -> Vec<Category> {
        (1..=self.config.counts.categories)
            .map(|i| Category {
                category_id: format_id("CAT", i),
                category_name: format!("Category {}", i),
            })
            .collect()
    }

    fn generate_users(&mut self) -> Vec<User> {
        let (start, span) = (self.config.start_date, self.config.day_span);
        (1..=self.config.counts.users)
            .map(|i| {
                let username = format!("user{:03}", i);
                User {
                    user_id: format_id("U", i),
                    email: format!("{}@example.com", username),
                    username,
                    created_at: self.fake.timestamp(start, span),
                }
            })
            .collect()
    }

    fn generate_products(&mut self, categories: &[Category]) -> Vec<Product> {
        (1..=self.config.counts.products)
            .map(|i| {
                // Price before category: draw order is part of the output
                let price = self.fake.price(MIN_PRICE, MAX_PRICE);
                let category = self.fake.pick(categories);
                Product {
                    product_id: format_id("P", i),
                    name: format!("Product {}", i),
                    price,
                    category_id: category.category_id.clone(),
                }
            })
            .collect()
    }

    fn generate_orders(&mut self, users: &[User]) -> Vec<Order> {
        let (start, span) = (self.config.start_date, self.config.day_span);
        (1..=self.config.counts.orders)
            .map(|i| {
                let user = self.fake.pick(users);
                let order_date = self.fake.timestamp(start, span);
                let status = self.fake.order_status();
                Order {
                    order_id: format_id("O", i),
                    user_id: user.user_id.clone(),
                    order_date,
                    status,
                }
            })
            .collect()
    }

    fn generate_order_items(&mut self, orders: &[Order], products: &[Product]) -> Vec<OrderItem> {
        (1..=self.config.counts.order_items)
            .map(|i| {
                let order = self.fake.pick(orders);
                let product = self.fake.pick(products);
                let quantity = self.fake.int_range(MIN_QUANTITY, MAX_QUANTITY);
                OrderItem {
                    order_item_id: format_id("OI", i),
                    order_id: order.order_id.clone(),
                    product_id: product.product_id.clone(),
                    quantity,
                }
            })
            .collect()
    }
}
