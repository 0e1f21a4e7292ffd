//! Peripheral abstraction layer for the parking attendant terminal.
//!
//! The terminal drives two peripherals: the barrier arm ([`GateActuator`]) and
//! the entry-ticket printer ([`TicketPrinter`]). This crate defines those
//! contracts together with:
//!
//! - [`Receipt`]: the entry ticket and its text layout, shared by the printer
//!   and the on-screen fallback.
//! - [`simulated`]: devices for terminals without real hardware attached.
//! - [`mock`]: controllable devices for tests.
//! - [`devices`]: enum wrappers for choosing a device at runtime.
//!
//! # Design
//!
//! - **Async-first**: native `async fn` in traits (Rust 1.90 + Edition 2024 RPITIT).
//! - **Thread-safe**: all traits require `Send + Sync` for use with Tokio.
//! - **Error-aware**: every operation returns [`Result`]; callers decide
//!   whether a failure is fatal. The attendant flows treat both peripherals as
//!   best-effort.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use parkgate_core::{Plate, TicketId};
//! use parkgate_hardware::{Receipt, TicketPrinter};
//! use parkgate_hardware::simulated::SimulatedPrinter;
//!
//! #[tokio::main]
//! async fn main() -> parkgate_hardware::Result<()> {
//!     let mut printer = SimulatedPrinter::default();
//!     let receipt = Receipt::new(TicketId::from_token(1), Plate::new("ABC123").unwrap(), Utc::now());
//!
//!     printer.print(&receipt, 1).await?;
//!     assert!(printer.last_output().is_some());
//!     Ok(())
//! }
//! ```

pub mod devices;
pub mod error;
pub mod mock;
pub mod receipt;
pub mod simulated;
pub mod traits;

pub use devices::{AnyGate, AnyPrinter};
pub use error::{HardwareError, Result};
pub use receipt::{Receipt, barcode_art};
pub use traits::{GateActuator, TicketPrinter};
