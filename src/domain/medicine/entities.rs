use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inventory entry for a medicine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
  pub id: i64,
  pub name: String,
  /// Units on hand, never negative
  pub stock: i32,
  /// Unit price with at most two fractional digits
  pub price: Decimal,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Prices must fit `NUMERIC(14,2)`: at most twelve integer digits
pub fn price_in_range(price: &Decimal) -> bool {
  *price >= Decimal::ZERO && *price < Decimal::from(1_000_000_000_000_i64)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedicine {
  pub name: String,
  pub stock: i32,
  pub price: Decimal,
}
