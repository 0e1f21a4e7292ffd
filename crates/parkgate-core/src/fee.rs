//! Dwell time and the legacy client-side fee computation.
//!
//! The amount a customer owes is set by the pay station; the terminal only
//! reads the paid flag. [`legacy_fee`] is kept as an informational quote and
//! never decides whether a vehicle may leave.

use crate::constants::{DEFAULT_HOURLY_CENTS, DEFAULT_MINIMUM_CENTS, MILLIS_PER_MINUTE};
use crate::types::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hourly and minimum price of the active rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    pub hourly: Money,
    pub minimum: Money,
}

impl Rate {
    #[must_use]
    pub const fn new(hourly: Money, minimum: Money) -> Self {
        Self { hourly, minimum }
    }
}

impl Default for Rate {
    /// 2.00 per hour with a 1.00 minimum, used when no active rate can be read.
    fn default() -> Self {
        Self::new(
            Money::from_cents(DEFAULT_HOURLY_CENTS),
            Money::from_cents(DEFAULT_MINIMUM_CENTS),
        )
    }
}

/// Result of [`legacy_fee`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub minutes: i64,
    pub amount: Money,
    pub rate: Rate,
}

/// Whole minutes elapsed between `entry` and `now`.
///
/// The millisecond difference is divided by 60 000 and truncated. An entry
/// time in the future (clock skew between terminals) yields zero.
#[must_use]
pub fn dwell_minutes(entry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - entry).num_milliseconds();
    (millis / MILLIS_PER_MINUTE).max(0)
}

/// Quote the fee for a stay with the legacy formula.
///
/// `amount = max(hourly * minutes / 60, minimum)`, rounded half-up to the cent.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use parkgate_core::{Money, Rate, legacy_fee};
///
/// let entry = Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap();
/// let quote = legacy_fee(entry, entry + Duration::minutes(90), Rate::default());
///
/// assert_eq!(quote.minutes, 90);
/// assert_eq!(quote.amount, Money::from_cents(300));
/// ```
#[must_use]
pub fn legacy_fee(entry: DateTime<Utc>, now: DateTime<Utc>, rate: Rate) -> FeeQuote {
    let minutes = dwell_minutes(entry, now);
    let prorated = (rate.hourly.cents() * minutes + 30) / 60;
    let amount = Money::from_cents(prorated.max(rate.minimum.cents()));

    FeeQuote {
        minutes,
        amount,
        rate,
    }
}

/// Render a dwell time the way the exit screen shows it.
///
/// Under an hour: `"45 minutos"`. From an hour up: `"1 hora 5 min"`,
/// `"2 horas 0 min"`.
#[must_use]
pub fn format_dwell(minutes: i64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;

    if hours > 0 {
        let plural = if hours > 1 { "s" } else { "" };
        format!("{hours} hora{plural} {rest} min")
    } else {
        format!("{rest} minutos")
    }
}
