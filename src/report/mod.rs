//! Per-user lifetime spend report.
//!
//! Every user appears exactly once. Users without orders, or whose orders
//! have no items, total zero.

mod output;

pub use output::{format_cents, OutputFormat, ReportFormatter};

use crate::error::Result;
use crate::store::Store;
use serde::Serialize;

/// Lifetime spend per user, in cents so sums stay exact.
///
/// `SUM(quantity * price)` over DECIMAL(10,2) prices is exact; scaling by
/// 100 before the cast keeps it integral.
pub const TOTALS_QUERY: &str = "
SELECT
    u.username,
    u.email,
    CAST(COALESCE(SUM(oi.quantity * p.price), 0) * 100 AS BIGINT) AS total_cents
FROM users u
LEFT JOIN orders o ON o.user_id = u.user_id
LEFT JOIN order_items oi ON oi.order_id = o.order_id
LEFT JOIN products p ON p.product_id = oi.product_id
GROUP BY u.user_id, u.username, u.email
ORDER BY total_cents DESC, u.username ASC
";

/// One report row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserTotal {
    pub username: String,
    pub email: String,
    /// Total spent in cents
    pub total_cents: i64,
}

impl UserTotal {
    /// Total spent as a decimal string, e.g. `123.40`
    pub fn total_spent(&self) -> String {
        format_cents(self.total_cents)
    }
}

/// Run the totals query against a loaded store
pub fn compute_totals(store: &Store) -> Result<Vec<UserTotal>> {
    store.require_schema()?;

    let mut stmt = store.connection().prepare(TOTALS_QUERY)?;
    let totals = stmt
        .query_map([], |row| {
            Ok(UserTotal {
                username: row.get(0)?,
                email: row.get(1)?,
                total_cents: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(totals)
}
