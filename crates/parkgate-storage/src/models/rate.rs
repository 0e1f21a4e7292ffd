use parkgate_core::{Money, Rate};
use serde::{Deserialize, Serialize};

/// Row of the `rates` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RateRow {
    pub rate_key: String,
    pub hourly_cents: i64,
    pub minimum_cents: i64,
}

impl From<RateRow> for Rate {
    fn from(row: RateRow) -> Self {
        Rate::new(
            Money::from_cents(row.hourly_cents),
            Money::from_cents(row.minimum_cents),
        )
    }
}
