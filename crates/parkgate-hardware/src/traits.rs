//! Peripheral trait definitions.
//!
//! The attendant core drives two peripherals: the barrier arm at the lane and
//! the receipt printer. Both are expressed as traits so the flows run the same
//! against simulated devices, test mocks and real drivers.
//!
//! All traits use native `async fn` methods (Rust 1.90 + Edition 2024 RPITIT),
//! eliminating the need for the `async_trait` macro.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::receipt::Receipt;
use std::time::Duration;

/// Barrier arm controller.
///
/// # Object Safety and Dynamic Dispatch
///
/// **NOTE**: This trait is NOT object-safe because `async fn` methods return
/// `impl Future`. Use generic parameters, or the [`AnyGate`](crate::devices::AnyGate)
/// enum wrapper when the concrete device is chosen at runtime.
///
/// # Examples
///
/// ```no_run
/// use parkgate_hardware::traits::GateActuator;
/// use std::time::Duration;
///
/// async fn let_through<G: GateActuator>(gate: &mut G) -> bool {
///     gate.raise(Duration::from_secs(5)).await.is_ok()
/// }
/// ```
pub trait GateActuator: Send + Sync {
    /// Raise the arm, keep it up for `hold` and lower it again.
    ///
    /// Returns once the arm is back down.
    ///
    /// # Errors
    ///
    /// Returns an error if the controller is unreachable or reports a fault.
    async fn raise(&mut self, hold: Duration) -> Result<()>;
}

/// Receipt printer.
///
/// `copy` is 1 for the original ticket and grows with each reprint; the
/// printer adds a copy marker for anything above 1.
pub trait TicketPrinter: Send + Sync {
    /// Print a receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the printer is not found, not connected, out of
    /// paper, or the job fails mid-way.
    async fn print(&mut self, receipt: &Receipt, copy: u32) -> Result<()>;
}
