//! Synthetic e-commerce dataset generator.
//!
//! Generates deterministic, FK-consistent categories, users, products,
//! orders and order items, and writes them as CSV files for the loader.
//!
//! # Example
//!
//! ```rust
//! use shop_data_gen::{Generator, GeneratorConfig};
//!
//! // Same config (and therefore seed) always produces the same dataset
//! let data = Generator::new(GeneratorConfig::default()).generate().unwrap();
//!
//! assert_eq!(data.users.len(), 60);
//! assert_eq!(data.users[0].user_id, "U001");
//! ```

pub mod error;
pub mod fake;
pub mod generator;
pub mod records;
pub mod writer;

pub use error::GenerateError;
pub use generator::{DatasetCounts, Generator, GeneratorConfig};
pub use records::{Category, Dataset, Order, OrderItem, OrderStatus, Product, Record, User};
pub use writer::{csv_escape, write_dataset, WriteSummary};
