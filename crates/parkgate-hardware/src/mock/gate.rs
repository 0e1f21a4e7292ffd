//! Mock barrier for tests.
//!
//! The gate reports every movement to its handle and can be told to fail the
//! next command or to drop off the bus entirely. Timed raises return at once.

use crate::{HardwareError, Result, traits::GateActuator};
use std::time::Duration;
use tokio::sync::mpsc;

/// Movement reported by a [`MockGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    Raised { hold: Duration },
}

#[derive(Debug)]
enum GateCommand {
    FailNext(String),
    Disconnect,
    Reconnect,
}

/// Mock barrier controller.
///
/// # Examples
///
/// ```
/// use parkgate_hardware::mock::{GateEvent, MockGate};
/// use parkgate_hardware::traits::GateActuator;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> parkgate_hardware::Result<()> {
///     let (mut gate, mut handle) = MockGate::new();
///
///     gate.raise(Duration::from_secs(5)).await?;
///
///     assert_eq!(
///         handle.try_next_event(),
///         Some(GateEvent::Raised { hold: Duration::from_secs(5) })
///     );
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockGate {
    command_rx: mpsc::UnboundedReceiver<GateCommand>,
    event_tx: mpsc::UnboundedSender<GateEvent>,
    name: String,
    connected: bool,
    fail_next: Option<String>,
}

impl MockGate {
    pub fn new() -> (Self, MockGateHandle) {
        Self::with_name("Mock Gate".to_string())
    }

    pub fn with_name(name: String) -> (Self, MockGateHandle) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let gate = Self {
            command_rx,
            event_tx,
            name: name.clone(),
            connected: true,
            fail_next: None,
        };

        let handle = MockGateHandle {
            command_tx,
            event_rx,
            name,
        };

        (gate, handle)
    }

    fn apply_commands(&mut self) {
        while let Ok(command) = self.command_rx.try_recv() {
            match command {
                GateCommand::FailNext(message) => self.fail_next = Some(message),
                GateCommand::Disconnect => self.connected = false,
                GateCommand::Reconnect => self.connected = true,
            }
        }
    }

    fn ensure_operational(&mut self) -> Result<()> {
        self.apply_commands();

        if !self.connected {
            return Err(HardwareError::disconnected(self.name.clone()));
        }
        if let Some(message) = self.fail_next.take() {
            return Err(HardwareError::gate_fault(message));
        }
        Ok(())
    }

    fn report(&self, event: GateEvent) {
        // Tests may drop the handle; the gate keeps working.
        let _ = self.event_tx.send(event);
    }
}

impl GateActuator for MockGate {
    async fn raise(&mut self, hold: Duration) -> Result<()> {
        self.ensure_operational()?;
        self.report(GateEvent::Raised { hold });
        Ok(())
    }
}

/// Handle for observing and disturbing a [`MockGate`].
#[derive(Debug)]
pub struct MockGateHandle {
    command_tx: mpsc::UnboundedSender<GateCommand>,
    event_rx: mpsc::UnboundedReceiver<GateEvent>,
    name: String,
}

impl MockGateHandle {
    /// Make the next gate command fail with a gate fault.
    ///
    /// # Errors
    ///
    /// Returns an error if the gate has been dropped.
    pub fn fail_next(&self, message: impl Into<String>) -> Result<()> {
        self.send(GateCommand::FailNext(message.into()))
    }

    /// Make every command fail until [`MockGateHandle::reconnect`].
    ///
    /// # Errors
    ///
    /// Returns an error if the gate has been dropped.
    pub fn disconnect(&self) -> Result<()> {
        self.send(GateCommand::Disconnect)
    }

    /// # Errors
    ///
    /// Returns an error if the gate has been dropped.
    pub fn reconnect(&self) -> Result<()> {
        self.send(GateCommand::Reconnect)
    }

    /// Next reported movement, if one is queued.
    pub fn try_next_event(&mut self) -> Option<GateEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Wait for the next reported movement.
    pub async fn next_event(&mut self) -> Option<GateEvent> {
        self.event_rx.recv().await
    }

    /// Drain every queued movement.
    pub fn events(&mut self) -> Vec<GateEvent> {
        std::iter::from_fn(|| self.try_next_event()).collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn send(&self, command: GateCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| HardwareError::disconnected("Gate command channel closed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_gate_reports_raise() {
        let (mut gate, mut handle) = MockGate::new();

        gate.raise(Duration::from_secs(5)).await.unwrap();
        gate.raise(Duration::from_secs(3)).await.unwrap();

        assert_eq!(
            handle.events(),
            vec![
                GateEvent::Raised {
                    hold: Duration::from_secs(5)
                },
                GateEvent::Raised {
                    hold: Duration::from_secs(3)
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_mock_gate_fail_next_only_once() {
        let (mut gate, mut handle) = MockGate::new();
        handle.fail_next("arm blocked").unwrap();

        let err = gate.raise(Duration::ZERO).await.unwrap_err();
        assert!(matches!(err, HardwareError::GateFault { .. }));
        assert!(handle.try_next_event().is_none());

        gate.raise(Duration::ZERO).await.unwrap();
        assert!(handle.try_next_event().is_some());
    }

    #[tokio::test]
    async fn test_mock_gate_disconnect_and_reconnect() {
        let (mut gate, mut handle) = MockGate::with_name("Exit lane".to_string());

        handle.disconnect().unwrap();
        assert!(matches!(
            gate.raise(Duration::ZERO).await,
            Err(HardwareError::Disconnected { .. })
        ));
        assert!(handle.try_next_event().is_none());

        handle.reconnect().unwrap();
        gate.raise(Duration::from_secs(2)).await.unwrap();
        assert_eq!(
            handle.next_event().await,
            Some(GateEvent::Raised {
                hold: Duration::from_secs(2)
            })
        );
        assert_eq!(handle.name(), "Exit lane");
    }

    #[tokio::test]
    async fn test_mock_gate_works_without_handle() {
        let (mut gate, handle) = MockGate::new();
        drop(handle);

        gate.raise(Duration::ZERO).await.unwrap();
    }

    #[tokio::test]
    async fn test_handle_errors_after_gate_dropped() {
        let (gate, handle) = MockGate::new();
        drop(gate);

        assert!(handle.fail_next("late").is_err());
    }
}
