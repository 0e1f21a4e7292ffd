//! Enum wrappers for peripheral dispatch.
//!
//! Native `async fn` in traits is not object-safe, so `Box<dyn GateActuator>`
//! is not available. The binary picks a concrete device at startup and stores
//! it in one of these enums instead.
//!
//! # Examples
//!
//! ```
//! use parkgate_hardware::devices::AnyGate;
//! use parkgate_hardware::simulated::SimulatedGate;
//!
//! let gate = AnyGate::Simulated(SimulatedGate::default());
//! ```

use crate::mock::{MockGate, MockPrinter};
use crate::simulated::{SimulatedGate, SimulatedPrinter};
use crate::traits::{GateActuator, TicketPrinter};
use crate::{Receipt, Result};
use std::time::Duration;

/// Barrier controller chosen at runtime.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyGate {
    /// Logs movements and waits out the hold time.
    Simulated(SimulatedGate),
    /// Mock gate for tests.
    Mock(MockGate),
}

impl GateActuator for AnyGate {
    async fn raise(&mut self, hold: Duration) -> Result<()> {
        match self {
            Self::Simulated(device) => device.raise(hold).await,
            Self::Mock(device) => device.raise(hold).await,
        }
    }

}

/// Receipt printer chosen at runtime.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyPrinter {
    /// Renders into memory; may be configured as unavailable.
    Simulated(SimulatedPrinter),
    /// Mock printer for tests.
    Mock(MockPrinter),
}

impl TicketPrinter for AnyPrinter {
    async fn print(&mut self, receipt: &Receipt, copy: u32) -> Result<()> {
        match self {
            Self::Simulated(device) => device.print(receipt, copy).await,
            Self::Mock(device) => device.print(receipt, copy).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::GateEvent;
    use chrono::Utc;
    use parkgate_core::{Plate, TicketId};

    #[tokio::test]
    async fn test_any_gate_dispatch_to_mock() {
        let (gate, mut handle) = MockGate::new();
        let mut any = AnyGate::Mock(gate);

        any.raise(Duration::from_secs(1)).await.unwrap();
        assert_eq!(
            handle.try_next_event(),
            Some(GateEvent::Raised {
                hold: Duration::from_secs(1)
            })
        );
    }

    #[tokio::test]
    async fn test_any_gate_dispatch_to_simulated() {
        let mut any = AnyGate::Simulated(SimulatedGate::new("Lane"));
        any.raise(Duration::ZERO).await.unwrap();

        let AnyGate::Simulated(gate) = any else {
            panic!("expected the simulated gate");
        };
        assert_eq!(gate.cycles(), 1);
    }

    #[tokio::test]
    async fn test_any_printer_dispatch() {
        let receipt = Receipt::new(
            TicketId::from_token(9),
            Plate::new("QWE123").unwrap(),
            Utc::now(),
        );

        let mut simulated = AnyPrinter::Simulated(SimulatedPrinter::default());
        simulated.print(&receipt, 1).await.unwrap();

        let (printer, mut handle) = MockPrinter::new();
        let mut mock = AnyPrinter::Mock(printer);
        mock.print(&receipt, 3).await.unwrap();
        assert_eq!(handle.try_next_job().unwrap().copy, 3);

        let mut offline = AnyPrinter::Simulated(SimulatedPrinter::unavailable("BT"));
        assert!(offline.print(&receipt, 1).await.is_err());
    }
}
