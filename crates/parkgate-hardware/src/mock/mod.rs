//! Mock device implementations for testing and development.
//!
//! Each mock comes with a handle that observes what the device was asked to do
//! and can inject faults, without requiring physical hardware.

pub mod gate;
pub mod printer;

pub use gate::{GateEvent, MockGate, MockGateHandle};
pub use printer::{MockPrinter, MockPrinterHandle, PrintJob};
