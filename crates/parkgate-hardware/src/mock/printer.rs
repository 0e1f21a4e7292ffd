//! Mock receipt printer for tests.

use crate::{HardwareError, Result, receipt::Receipt, traits::TicketPrinter};
use tokio::sync::mpsc;

/// Job accepted by a [`MockPrinter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    pub receipt: Receipt,
    pub copy: u32,
    pub text: String,
}

#[derive(Debug)]
enum PrinterCommand {
    FailNext(String),
    PaperOut,
    LoadPaper,
    Disconnect,
    Reconnect,
}

/// Mock receipt printer.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use parkgate_core::{Plate, TicketId};
/// use parkgate_hardware::Receipt;
/// use parkgate_hardware::mock::MockPrinter;
/// use parkgate_hardware::traits::TicketPrinter;
///
/// #[tokio::main]
/// async fn main() -> parkgate_hardware::Result<()> {
///     let (mut printer, mut handle) = MockPrinter::new();
///     let receipt = Receipt::new(TicketId::from_token(7), Plate::new("ABC123").unwrap(), Utc::now());
///
///     printer.print(&receipt, 1).await?;
///
///     let job = handle.try_next_job().unwrap();
///     assert_eq!(job.receipt, receipt);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockPrinter {
    command_rx: mpsc::UnboundedReceiver<PrinterCommand>,
    job_tx: mpsc::UnboundedSender<PrintJob>,
    name: String,
    connected: bool,
    has_paper: bool,
    fail_next: Option<String>,
}

impl MockPrinter {
    pub fn new() -> (Self, MockPrinterHandle) {
        Self::with_name("Mock Printer".to_string())
    }

    pub fn with_name(name: String) -> (Self, MockPrinterHandle) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (job_tx, job_rx) = mpsc::unbounded_channel();

        let printer = Self {
            command_rx,
            job_tx,
            name: name.clone(),
            connected: true,
            has_paper: true,
            fail_next: None,
        };

        let handle = MockPrinterHandle {
            command_tx,
            job_rx,
            name,
        };

        (printer, handle)
    }

    fn apply_commands(&mut self) {
        while let Ok(command) = self.command_rx.try_recv() {
            match command {
                PrinterCommand::FailNext(message) => self.fail_next = Some(message),
                PrinterCommand::PaperOut => self.has_paper = false,
                PrinterCommand::LoadPaper => self.has_paper = true,
                PrinterCommand::Disconnect => self.connected = false,
                PrinterCommand::Reconnect => self.connected = true,
            }
        }
    }
}

impl TicketPrinter for MockPrinter {
    async fn print(&mut self, receipt: &Receipt, copy: u32) -> Result<()> {
        self.apply_commands();

        if !self.connected {
            return Err(HardwareError::disconnected(self.name.clone()));
        }
        if !self.has_paper {
            return Err(HardwareError::paper_out(self.name.clone()));
        }
        if let Some(message) = self.fail_next.take() {
            return Err(HardwareError::communication(message));
        }

        let job = PrintJob {
            receipt: receipt.clone(),
            copy,
            text: receipt.render(copy),
        };
        let _ = self.job_tx.send(job);
        Ok(())
    }
}

/// Handle for inspecting jobs and injecting faults into a [`MockPrinter`].
#[derive(Debug)]
pub struct MockPrinterHandle {
    command_tx: mpsc::UnboundedSender<PrinterCommand>,
    job_rx: mpsc::UnboundedReceiver<PrintJob>,
    name: String,
}

impl MockPrinterHandle {
    /// Make the next job fail with a communication error.
    ///
    /// # Errors
    ///
    /// Returns an error if the printer has been dropped.
    pub fn fail_next(&self, message: impl Into<String>) -> Result<()> {
        self.send(PrinterCommand::FailNext(message.into()))
    }

    /// # Errors
    ///
    /// Returns an error if the printer has been dropped.
    pub fn paper_out(&self) -> Result<()> {
        self.send(PrinterCommand::PaperOut)
    }

    /// # Errors
    ///
    /// Returns an error if the printer has been dropped.
    pub fn load_paper(&self) -> Result<()> {
        self.send(PrinterCommand::LoadPaper)
    }

    /// # Errors
    ///
    /// Returns an error if the printer has been dropped.
    pub fn disconnect(&self) -> Result<()> {
        self.send(PrinterCommand::Disconnect)
    }

    /// # Errors
    ///
    /// Returns an error if the printer has been dropped.
    pub fn reconnect(&self) -> Result<()> {
        self.send(PrinterCommand::Reconnect)
    }

    pub fn try_next_job(&mut self) -> Option<PrintJob> {
        self.job_rx.try_recv().ok()
    }

    pub async fn next_job(&mut self) -> Option<PrintJob> {
        self.job_rx.recv().await
    }

    /// Drain every printed job.
    pub fn jobs(&mut self) -> Vec<PrintJob> {
        std::iter::from_fn(|| self.try_next_job()).collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn send(&self, command: PrinterCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| HardwareError::disconnected("Printer command channel closed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parkgate_core::{Plate, TicketId};

    fn receipt() -> Receipt {
        Receipt::new(
            TicketId::from_token(1_700_000_000_000),
            Plate::new("MNO456").unwrap(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_mock_printer_records_jobs() {
        let (mut printer, mut handle) = MockPrinter::new();
        let receipt = receipt();

        printer.print(&receipt, 1).await.unwrap();
        printer.print(&receipt, 2).await.unwrap();

        let jobs = handle.jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].copy, 1);
        assert_eq!(jobs[1].copy, 2);
        assert!(jobs[1].text.contains("COPIA #2"));
        assert_eq!(jobs[0].receipt, jobs[1].receipt);
    }

    #[tokio::test]
    async fn test_mock_printer_paper_out() {
        let (mut printer, mut handle) = MockPrinter::new();

        handle.paper_out().unwrap();
        let err = printer.print(&receipt(), 1).await.unwrap_err();
        assert!(matches!(err, HardwareError::PaperOut { .. }));

        handle.load_paper().unwrap();
        printer.print(&receipt(), 1).await.unwrap();
        assert_eq!(handle.jobs().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_printer_fail_next() {
        let (mut printer, mut handle) = MockPrinter::new();

        handle.fail_next("socket closed").unwrap();
        let err = printer.print(&receipt(), 1).await.unwrap_err();
        assert_eq!(err.to_string(), "Communication error: socket closed");

        printer.print(&receipt(), 1).await.unwrap();
        assert!(handle.try_next_job().is_some());
    }

    #[tokio::test]
    async fn test_mock_printer_disconnected() {
        let (mut printer, handle) = MockPrinter::with_name("BT-58".to_string());

        handle.disconnect().unwrap();
        let err = printer.print(&receipt(), 1).await.unwrap_err();
        assert_eq!(err.to_string(), "Device disconnected: BT-58");

        handle.reconnect().unwrap();
        assert!(printer.print(&receipt(), 1).await.is_ok());
    }
}
