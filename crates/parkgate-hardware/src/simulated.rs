//! Stand-in devices for terminals without a barrier relay or a paired printer.
//!
//! The simulated gate honours the hold time with `tokio::time::sleep` and logs
//! each movement; the simulated printer keeps the last rendered receipt.

use crate::error::{HardwareError, Result};
use crate::receipt::Receipt;
use crate::traits::{GateActuator, TicketPrinter};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Barrier that only logs its movements.
#[derive(Debug)]
pub struct SimulatedGate {
    name: String,
    raised: bool,
    cycles: u64,
}

impl SimulatedGate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raised: false,
            cycles: 0,
        }
    }

    /// Whether the arm is up right now.
    pub fn is_raised(&self) -> bool {
        self.raised
    }

    /// Number of completed timed raises.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

impl Default for SimulatedGate {
    fn default() -> Self {
        Self::new("Simulated Gate")
    }
}

impl GateActuator for SimulatedGate {
    async fn raise(&mut self, hold: Duration) -> Result<()> {
        info!(gate = %self.name, hold_ms = hold.as_millis() as u64, "raising gate");
        self.raised = true;

        tokio::time::sleep(hold).await;

        self.raised = false;
        self.cycles += 1;
        info!(gate = %self.name, "gate lowered");
        Ok(())
    }
}

/// Printer that renders receipts into memory.
///
/// An unavailable printer behaves like a printer that was never paired: every
/// job fails with [`HardwareError::Disconnected`].
#[derive(Debug)]
pub struct SimulatedPrinter {
    name: String,
    available: bool,
    last_output: Option<String>,
    jobs: u64,
}

impl SimulatedPrinter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: true,
            last_output: None,
            jobs: 0,
        }
    }

    /// A printer that cannot be reached.
    ///
    /// Terminals without a paired printer run with this one and show each
    /// ticket on screen instead.
    pub fn unavailable(name: impl Into<String>) -> Self {
        Self {
            available: false,
            ..Self::new(name)
        }
    }

    /// Text of the last printed receipt.
    pub fn last_output(&self) -> Option<&str> {
        self.last_output.as_deref()
    }

    pub fn jobs(&self) -> u64 {
        self.jobs
    }
}

impl Default for SimulatedPrinter {
    fn default() -> Self {
        Self::new("Simulated Printer")
    }
}

impl TicketPrinter for SimulatedPrinter {
    async fn print(&mut self, receipt: &Receipt, copy: u32) -> Result<()> {
        if !self.available {
            warn!(printer = %self.name, ticket = %receipt.ticket_id, "printer not found");
            return Err(HardwareError::disconnected(self.name.clone()));
        }

        let text = receipt.render(copy);
        debug!(printer = %self.name, ticket = %receipt.ticket_id, copy, "printing receipt");
        self.last_output = Some(text);
        self.jobs += 1;
        Ok(())
    }
}
