//! Exit lookup, payment gate and exit confirmation.
//!
//! The pay station owns the amount and sets the paid flag; the terminal only
//! reads it. An unpaid session stops the flow with
//! [`ExitLookup::PaymentPending`]. There is no override: an
//! [`ExitConfirmation`] can only be produced by a lookup that found a paid
//! session, and [`Attendant::confirm_exit`] only acts on that confirmation.

use crate::attendant::Attendant;
use crate::error::{AttendantError, Movement, Result};
use crate::state_machine::AttendantState;
use chrono::{DateTime, Utc};
use parkgate_core::{
    Clock, ExitQuery, FeeQuote, Money, Plate, TicketId, dwell_minutes, format_dwell,
};
use parkgate_storage::{
    DeviceRepository, ExitRecord, OperatorRepository, VehicleRepository, VehicleSession,
};
use tracing::{debug, info, warn};

/// Outcome of an exit lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitLookup {
    /// No vehicle inside for that plate or ticket.
    NotFound,
    /// Vehicle inside but not paid; the customer must go to the pay station.
    PaymentPending { plate: Plate, amount: Money },
    /// Paid vehicle, ready for the operator to confirm.
    Ready(ExitConfirmation),
}

/// Paid vehicle shown on the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitConfirmation {
    session_id: i64,
    plate: Plate,
    ticket_id: TicketId,
    entry_time: DateTime<Utc>,
    dwell_minutes: i64,
    amount: Money,
}

impl ExitConfirmation {
    /// Backend row of the session that was looked up. Confirmation exits
    /// this session and no other.
    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    pub fn plate(&self) -> &Plate {
        &self.plate
    }

    pub fn ticket_id(&self) -> &TicketId {
        &self.ticket_id
    }

    pub fn entry_time(&self) -> DateTime<Utc> {
        self.entry_time
    }

    /// Whole minutes inside, as of the lookup.
    pub fn dwell_minutes(&self) -> i64 {
        self.dwell_minutes
    }

    /// Dwell time as shown to the operator, e.g. `"2 horas 5 min"`.
    pub fn dwell(&self) -> String {
        format_dwell(self.dwell_minutes)
    }

    /// Amount recorded by the pay station.
    pub fn amount(&self) -> Money {
        self.amount
    }
}

/// Result of a confirmed exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitOutcome {
    pub plate: Plate,
    pub exit_time: DateTime<Utc>,
    pub gate_raised: bool,
}

/// Decide what the operator sees for a looked-up session.
fn classify(session: Option<VehicleSession>, now: DateTime<Utc>) -> Result<ExitLookup> {
    let Some(session) = session else {
        return Ok(ExitLookup::NotFound);
    };

    let plate = session.plate()?;

    if !session.is_paid() {
        return Ok(ExitLookup::PaymentPending {
            plate,
            amount: session.amount(),
        });
    }

    Ok(ExitLookup::Ready(ExitConfirmation {
        session_id: session.id,
        ticket_id: session.ticket_id()?,
        entry_time: session.entry_time,
        dwell_minutes: dwell_minutes(session.entry_time, now),
        amount: session.amount(),
        plate,
    }))
}

impl<V, O, D, C> Attendant<V, O, D, C>
where
    V: VehicleRepository,
    O: OperatorRepository,
    D: DeviceRepository,
    C: Clock,
{
    /// Look up a vehicle at the exit by typed plate or scanned ticket.
    ///
    /// Codes starting with `PK-` (any case) are ticket lookups; anything else
    /// is validated as a plate. On [`ExitLookup::Ready`] the terminal moves to
    /// `Confirming` until [`confirm_exit`](Self::confirm_exit) or
    /// [`cancel_exit`](Self::cancel_exit).
    ///
    /// # Errors
    ///
    /// - `Busy` if another operation is in flight or an exit awaits confirmation
    /// - `NotLoggedIn` without an operator session
    /// - `DeviceRoleDenied` on entry-only terminals
    /// - `Core` for an invalid plate or ticket code
    /// - `Storage` if the backend cannot be reached
    pub async fn lookup_exit(&mut self, input: &str) -> Result<ExitLookup> {
        self.ensure_ready()?;
        self.require_session()?;

        let role = self.config.device.role;
        if !role.can_register_exit() {
            return Err(AttendantError::DeviceRoleDenied {
                role,
                movement: Movement::Exit,
            });
        }

        let query = ExitQuery::parse(input)?;

        self.begin()?;

        let result = match self.find_inside(&query).await {
            Ok(session) => classify(session, self.clock.now()),
            Err(e) => Err(e),
        };

        match &result {
            Ok(ExitLookup::Ready(confirmation)) => {
                info!(
                    plate = %confirmation.plate,
                    dwell_minutes = confirmation.dwell_minutes,
                    amount = %confirmation.amount,
                    "paid vehicle ready to exit"
                );
                self.pending_exit = Some(confirmation.clone());
                self.finish(AttendantState::Confirming);
            }
            Ok(ExitLookup::PaymentPending { plate, amount }) => {
                info!(plate = %plate, amount = %amount, "exit blocked, payment pending");
                self.finish(AttendantState::Ready);
            }
            Ok(ExitLookup::NotFound) => {
                debug!(query = %query, "no vehicle inside");
                self.finish(AttendantState::Ready);
            }
            Err(e) => {
                warn!(query = %query, error = %e, "exit lookup failed");
                self.finish(AttendantState::Ready);
            }
        }

        result
    }

    /// Register the exit awaiting confirmation and raise the barrier.
    ///
    /// On success the terminal waits the configured return delay and goes
    /// back to `Ready`. On failure it stays in `Confirming` so the operator
    /// can retry or cancel; nothing is retried automatically.
    ///
    /// # Errors
    ///
    /// - `NoPendingExit` unless a lookup returned [`ExitLookup::Ready`]
    /// - `VehicleNotFound` if the looked-up session is no longer inside and paid
    /// - `Storage` if the backend cannot be reached
    pub async fn confirm_exit(&mut self) -> Result<ExitOutcome> {
        if self.machine.current_state() != AttendantState::Confirming {
            return Err(AttendantError::NoPendingExit);
        }
        let Some(confirmation) = self.pending_exit.clone() else {
            return Err(AttendantError::NoPendingExit);
        };

        self.machine.transition_to(AttendantState::Busy)?;

        let record = ExitRecord {
            session_id: confirmation.session_id,
            plate: confirmation.plate.clone(),
            device_id: self.config.device.id.clone(),
            exit_device: self.config.device.role.exit_device_number(),
            exit_time: self.clock.now(),
        };

        match self.vehicles.register_exit(&record).await {
            Ok(0) => {
                warn!(
                    session = record.session_id,
                    plate = %record.plate,
                    "exit not registered, session no longer inside and paid"
                );
                self.finish(AttendantState::Confirming);
                Err(AttendantError::VehicleNotFound(record.plate.to_string()))
            }
            Ok(_) => {
                info!(plate = %record.plate, device = %record.device_id, "exit registered");
                let gate_raised = self.raise_gate(self.config.gate.exit_raise()).await;
                tokio::time::sleep(self.config.gate.exit_return_delay()).await;

                self.pending_exit = None;
                self.finish(AttendantState::Ready);

                Ok(ExitOutcome {
                    plate: record.plate,
                    exit_time: record.exit_time,
                    gate_raised,
                })
            }
            Err(e) => {
                warn!(plate = %record.plate, error = %e, "exit registration failed");
                self.finish(AttendantState::Confirming);
                Err(e.into())
            }
        }
    }

    /// Drop the exit awaiting confirmation.
    ///
    /// # Errors
    ///
    /// Returns `NoPendingExit` if nothing awaits confirmation.
    pub fn cancel_exit(&mut self) -> Result<()> {
        if self.machine.current_state() != AttendantState::Confirming {
            return Err(AttendantError::NoPendingExit);
        }

        if let Some(confirmation) = self.pending_exit.take() {
            info!(plate = %confirmation.plate, "exit cancelled");
        }
        self.machine.transition_to(AttendantState::Ready)?;
        Ok(())
    }

    /// Informational fee quote from the legacy client-side computation.
    ///
    /// Quotes the same session an exit lookup with `input` would find. Never
    /// used to decide whether a vehicle may leave. Returns `None` when no such
    /// vehicle is inside.
    ///
    /// # Errors
    ///
    /// - `NotLoggedIn` without an operator session
    /// - `Core` for an invalid plate or ticket code
    /// - `Storage` if the backend cannot be reached
    pub async fn quote_fee(&self, input: &str) -> Result<Option<FeeQuote>> {
        self.require_session()?;

        let query = ExitQuery::parse(input)?;
        let Some(session) = self.find_inside(&query).await? else {
            return Ok(None);
        };

        let quote = self.vehicles.calculate_fee(&session, self.clock.now()).await?;
        Ok(Some(quote))
    }

    async fn find_inside(&self, query: &ExitQuery) -> Result<Option<VehicleSession>> {
        let session = match query {
            ExitQuery::Plate(plate) => self.vehicles.find_inside_by_plate(plate).await?,
            ExitQuery::Ticket(ticket) => self.vehicles.find_inside_by_ticket(ticket).await?,
        };
        Ok(session)
    }
}
