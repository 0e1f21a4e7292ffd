use crate::entry::PrintOutcome;
use crate::error::{AttendantError, Result};
use crate::exit::ExitConfirmation;
use crate::session::OperatorSession;
use crate::state_machine::{AttendantState, StateMachine};
use crate::ticket::{IssuedTicket, TicketIssuer};
use parkgate_core::{AppConfig, Clock, SystemClock};
use parkgate_hardware::simulated::{SimulatedGate, SimulatedPrinter};
use parkgate_hardware::{AnyGate, AnyPrinter, GateActuator, Receipt, TicketPrinter};
use parkgate_storage::{
    DeviceRepository, OperatorRepository, OperatorValidation, VehicleRepository,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// What the current operator may do on this terminal.
///
/// Screens use this to disable controls up front; the operations check the
/// same rules again before touching the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    pub entry: bool,
    pub exit: bool,
    pub maintenance: bool,
}

/// Attendant terminal: one operator, one lane, one operation at a time.
///
/// Owns the terminal configuration, the peripherals, the repositories and
/// the ticket memory. Every operation takes `&mut self`, and the internal
/// [`StateMachine`] rejects a new action while another is in flight.
pub struct Attendant<V, O, D, C = SystemClock> {
    pub(crate) config: AppConfig,
    pub(crate) config_path: Option<PathBuf>,
    pub(crate) vehicles: V,
    pub(crate) operators: O,
    pub(crate) devices: D,
    pub(crate) gate: AnyGate,
    pub(crate) printer: AnyPrinter,
    pub(crate) clock: C,
    pub(crate) machine: StateMachine,
    pub(crate) issuer: TicketIssuer,
    pub(crate) session: Option<OperatorSession>,
    pub(crate) pending_exit: Option<ExitConfirmation>,
}

impl<V, O, D, C> Attendant<V, O, D, C>
where
    V: VehicleRepository,
    O: OperatorRepository,
    D: DeviceRepository,
    C: Clock,
{
    /// Create an attendant with simulated peripherals and no config file.
    pub fn new(config: AppConfig, vehicles: V, operators: O, devices: D, clock: C) -> Self {
        let gate = AnyGate::Simulated(SimulatedGate::new(format!("{} gate", config.device.name)));
        let printer =
            AnyPrinter::Simulated(SimulatedPrinter::new(format!("{} printer", config.device.name)));

        Self {
            config,
            config_path: None,
            vehicles,
            operators,
            devices,
            gate,
            printer,
            clock,
            machine: StateMachine::new(),
            issuer: TicketIssuer::new(),
            session: None,
            pending_exit: None,
        }
    }

    pub fn with_gate(mut self, gate: AnyGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_printer(mut self, printer: AnyPrinter) -> Self {
        self.printer = printer;
        self
    }

    /// Write configuration changes made in maintenance to `path`.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> AttendantState {
        self.machine.current_state()
    }

    pub fn state_machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn session(&self) -> Option<&OperatorSession> {
        self.session.as_ref()
    }

    /// Last ticket issued by this terminal, if any.
    pub fn last_ticket(&self) -> Option<&IssuedTicket> {
        self.issuer.last()
    }

    /// Exit on screen awaiting confirmation.
    pub fn pending_exit(&self) -> Option<&ExitConfirmation> {
        self.pending_exit.as_ref()
    }

    pub fn gate(&self) -> &AnyGate {
        &self.gate
    }

    pub fn printer(&self) -> &AnyPrinter {
        &self.printer
    }

    /// Controls available to the logged-in operator on this device.
    pub fn capabilities(&self) -> Capabilities {
        let Some(session) = &self.session else {
            return Capabilities::default();
        };
        let device = self.config.device.role;

        Capabilities {
            entry: device.can_register_entry() && session.role.can_access_entry(),
            exit: device.can_register_exit() && session.role.can_access_exit(),
            maintenance: session.can_access_maintenance(),
        }
    }

    /// Log an operator in.
    ///
    /// # Errors
    ///
    /// - `CredentialsRequired` for a blank username or password (no backend call)
    /// - `InvalidCredentials` or `OperatorInactive` as answered by the backend
    /// - `Storage` if the backend cannot be reached
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&OperatorSession> {
        self.ensure_ready()?;

        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AttendantError::CredentialsRequired);
        }

        match self.operators.validate_operator(username, password).await? {
            OperatorValidation::Valid(operator) => {
                let session = OperatorSession::from_operator(operator)?;
                info!(
                    username = %session.username,
                    role = %session.role,
                    device = %self.config.device.id,
                    "operator logged in"
                );
                let session: &OperatorSession = self.session.insert(session);
                Ok(session)
            }
            OperatorValidation::Inactive => Err(AttendantError::OperatorInactive),
            OperatorValidation::InvalidCredentials => Err(AttendantError::InvalidCredentials),
        }
    }

    /// End the session and drop any exit awaiting confirmation.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!(username = %session.username, "operator logged out");
        }
        self.pending_exit = None;
        if self.machine.current_state() != AttendantState::Ready {
            self.machine.reset();
        }
    }

    pub(crate) fn ensure_ready(&self) -> Result<()> {
        let state = self.machine.current_state();
        if state.accepts_actions() {
            Ok(())
        } else {
            Err(AttendantError::Busy { state })
        }
    }

    pub(crate) fn require_session(&self) -> Result<&OperatorSession> {
        self.session.as_ref().ok_or(AttendantError::NotLoggedIn)
    }

    pub(crate) fn require_admin(&self) -> Result<&OperatorSession> {
        let session = self.require_session()?;
        session.require_maintenance()?;
        Ok(session)
    }

    /// Enter `Busy`.
    pub(crate) fn begin(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.machine.transition_to(AttendantState::Busy)?;
        Ok(())
    }

    /// Leave `Busy` for `to`, resetting if the move is not allowed.
    pub(crate) fn finish(&mut self, to: AttendantState) {
        if let Err(e) = self.machine.transition_to(to) {
            warn!(error = %e, "unexpected state, resetting attendant");
            self.machine.reset();
        }
    }

    /// Print best-effort; a failure falls back to the on-screen rendering.
    pub(crate) async fn print_receipt(&mut self, receipt: &Receipt, copy: u32) -> PrintOutcome {
        match self.printer.print(receipt, copy).await {
            Ok(()) => {
                info!(ticket = %receipt.ticket_id, copy, "ticket printed");
                PrintOutcome::Printed
            }
            Err(e) => {
                warn!(ticket = %receipt.ticket_id, copy, error = %e, "printing failed, showing ticket on screen");
                PrintOutcome::Fallback {
                    text: receipt.render(copy),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Raise the barrier best-effort. Returns whether it went up.
    pub(crate) async fn raise_gate(&mut self, hold: Duration) -> bool {
        match self.gate.raise(hold).await {
            Ok(()) => {
                info!(hold_secs = hold.as_secs(), "gate raised");
                true
            }
            Err(e) => {
                warn!(error = %e, "gate did not raise");
                false
            }
        }
    }

    /// Write `config` to the config file, then make it current.
    ///
    /// On a failed write the running configuration is left as it was.
    pub(crate) fn commit_config(&mut self, config: AppConfig) -> Result<()> {
        if let Some(path) = &self.config_path {
            config.save(path)?;
            info!(path = %path.display(), "configuration saved");
        }
        self.config = config;
        Ok(())
    }
}
