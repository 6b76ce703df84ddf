//! Fake value helpers.
//!
//! Every random draw made by the generator goes through [`FakeData`], which
//! owns the seeded RNG. One method call consumes a fixed number of draws, so
//! the call order of the generator fully determines the output.

use crate::records::OrderStatus;
use chrono::{Duration, NaiveDateTime};
use rand::Rng;

/// Seconds in one day; time-of-day offsets are drawn from `0..SECONDS_PER_DAY`
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Fake data generator with deterministic RNG
pub struct FakeData<R: Rng> {
    rng: R,
}

impl<R: Rng> FakeData<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a timestamp within `day_span` days (plus one day of seconds)
    /// after `start`. Draws the day offset first, then the second offset.
    ///
    /// The caller guarantees the window fits the calendar
    /// (see `GeneratorConfig::validate`).
    pub fn timestamp(&mut self, start: NaiveDateTime, day_span: u32) -> NaiveDateTime {
        let days = self.rng.random_range(0..=i64::from(day_span));
        let seconds = self.rng.random_range(0..SECONDS_PER_DAY);
        start + Duration::days(days) + Duration::seconds(seconds)
    }

    /// Generate a price uniformly in `[min, max]`, rounded to cents.
    ///
    /// Rounding is half-to-even on the scaled value.
    pub fn price(&mut self, min: f64, max: f64) -> f64 {
        let value = self.rng.random_range(min..=max);
        (value * 100.0).round_ties_even() / 100.0
    }

    /// Generate a random integer in range (inclusive)
    pub fn int_range(&mut self, min: u32, max: u32) -> u32 {
        self.rng.random_range(min..=max)
    }

    /// Generate an order status
    pub fn order_status(&mut self) -> OrderStatus {
        *self.pick(&OrderStatus::ALL)
    }

    /// Pick a random element from a non-empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.random_range(0..items.len())]
    }
}
