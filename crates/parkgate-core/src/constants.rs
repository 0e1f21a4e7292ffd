//! Core constants for the parking attendant terminal.
//!
//! Values here are shared by the attendant flows, the storage layer and the
//! configuration defaults. They mirror what the lot's back office expects from
//! every terminal, so changing them affects interoperability with existing
//! tickets and database rows.
//!
//! # Usage
//!
//! ```
//! use parkgate_core::constants::*;
//!
//! assert_eq!(TICKET_PREFIX, "PK-");
//! assert!(MIN_PLATE_LENGTH <= "ABC123".len());
//! ```

// ============================================================================
// Plates and tickets
// ============================================================================

/// Minimum number of characters of a normalized plate.
///
/// Plates shorter than this are rejected before any remote call is made.
pub const MIN_PLATE_LENGTH: usize = 4;

/// Prefix of every ticket id printed by an entry terminal.
///
/// Scanned codes starting with this prefix (case-insensitive) are looked up
/// by ticket id; anything else is treated as a plate.
///
/// # Examples
///
/// ```
/// use parkgate_core::constants::TICKET_PREFIX;
///
/// let ticket = format!("{TICKET_PREFIX}1735689600000");
/// assert!(ticket.starts_with("PK-"));
/// ```
pub const TICKET_PREFIX: &str = "PK-";

/// Default rate key recorded on sessions when the back office sets none.
pub const DEFAULT_RATE_KEY: &str = "A";

// ============================================================================
// Timing
// ============================================================================

/// Milliseconds per minute, the divisor of every dwell computation.
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// Seconds the entry barrier stays raised after a ticket is issued.
pub const DEFAULT_ENTRY_GATE_SECS: u64 = 5;

/// Seconds the exit barrier stays raised after an exit is confirmed.
pub const DEFAULT_EXIT_GATE_SECS: u64 = 5;

/// Seconds before the terminal returns to the ready state after an exit.
pub const DEFAULT_EXIT_RETURN_DELAY_SECS: u64 = 3;

// ============================================================================
// Fees (legacy client-side computation)
// ============================================================================

/// Hourly price in cents used when no active rate is available (2.00).
pub const DEFAULT_HOURLY_CENTS: i64 = 200;

/// Minimum fee in cents used when no active rate is available (1.00).
pub const DEFAULT_MINIMUM_CENTS: i64 = 100;

// ============================================================================
// Device identity
// ============================================================================

/// Prefix of locally generated device ids (`POS-XXXXXXXX`).
pub const DEVICE_ID_PREFIX: &str = "POS-";

/// Number of hex characters appended to [`DEVICE_ID_PREFIX`].
pub const DEVICE_ID_SUFFIX_LEN: usize = 8;

/// Device number reported for entry-capable terminals.
pub const ENTRY_DEVICE_NUMBER: i32 = 1;

/// Device number reported for exit-capable terminals.
pub const EXIT_DEVICE_NUMBER: i32 = 2;

// ============================================================================
// Remote server defaults
// ============================================================================

/// Default database server address.
pub const DEFAULT_SERVER_HOST: &str = "10.0.1.39";

/// Default database server port.
pub const DEFAULT_SERVER_PORT: u16 = 1433;

/// Default database name.
pub const DEFAULT_DATABASE_NAME: &str = "Datapark";

/// Default database user.
pub const DEFAULT_DATABASE_USER: &str = "pos";

/// Maximum characters of the server version shown after a connection test.
pub const SERVER_VERSION_DISPLAY_LEN: usize = 50;

/// Default path of the local configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "parkgate.toml";

/// Default path of the SQLite database file.
pub const DEFAULT_DATABASE_PATH: &str = "parkgate.db";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_timings_are_positive() {
        assert!(DEFAULT_ENTRY_GATE_SECS > 0);
        assert!(DEFAULT_EXIT_GATE_SECS > 0);
        assert!(DEFAULT_EXIT_RETURN_DELAY_SECS > 0);
    }

    #[test]
    fn test_default_rate_minimum_below_hourly() {
        assert!(DEFAULT_MINIMUM_CENTS <= DEFAULT_HOURLY_CENTS);
    }

    #[test]
    fn test_device_numbers_are_distinct() {
        assert_ne!(ENTRY_DEVICE_NUMBER, EXIT_DEVICE_NUMBER);
    }
}
