//! Entry registration and ticket reprint.

use crate::attendant::Attendant;
use crate::error::{AttendantError, Movement, Result};
use crate::state_machine::AttendantState;
use parkgate_core::{Clock, Plate};
use parkgate_hardware::Receipt;
use parkgate_storage::{
    DeviceRepository, DisplayMessages, NewEntry, OperatorRepository, VehicleRepository,
};
use tracing::{info, warn};

/// Whether the entry reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved { id: i64 },
    /// The ticket was still issued and printed.
    Failed { reason: String },
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistOutcome::Saved { .. })
    }
}

/// Whether the ticket came out of the printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    Printed,
    /// Printer unavailable; `text` is the same ticket for the screen.
    Fallback { text: String, reason: String },
}

impl PrintOutcome {
    pub fn is_printed(&self) -> bool {
        matches!(self, PrintOutcome::Printed)
    }

    pub fn fallback_text(&self) -> Option<&str> {
        match self {
            PrintOutcome::Printed => None,
            PrintOutcome::Fallback { text, .. } => Some(text),
        }
    }
}

/// Result of a registered entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    pub receipt: Receipt,
    pub persisted: PersistOutcome,
    pub printed: PrintOutcome,
    pub gate_raised: bool,
}

impl EntryOutcome {
    /// Message shown to the operator.
    pub fn message(&self) -> &'static str {
        if self.persisted.is_saved() {
            DisplayMessages::ENTRY_REGISTERED
        } else {
            DisplayMessages::ENTRY_NOT_SAVED
        }
    }
}

/// Result of a ticket reprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReprintOutcome {
    pub receipt: Receipt,
    /// Copy number printed, 2 for the first reprint.
    pub copy: u32,
    pub printed: PrintOutcome,
    /// Whether the backend copy counter was updated.
    pub counted: bool,
}

impl<V, O, D, C> Attendant<V, O, D, C>
where
    V: VehicleRepository,
    O: OperatorRepository,
    D: DeviceRepository,
    C: Clock,
{
    /// Register a vehicle entry and issue its ticket.
    ///
    /// The plate is validated before anything else happens. Once the ticket
    /// is issued, neither the backend nor the printer can fail the entry:
    /// a backend failure is reported in [`EntryOutcome::persisted`] and a
    /// printer failure in [`EntryOutcome::printed`].
    ///
    /// # Errors
    ///
    /// - `Busy` if another operation is in flight
    /// - `NotLoggedIn` without an operator session
    /// - `DeviceRoleDenied` on exit-only terminals
    /// - `Core` for an empty or too short plate
    pub async fn register_entry(&mut self, plate_input: &str) -> Result<EntryOutcome> {
        self.ensure_ready()?;
        let session = self.require_session()?;
        let operator_id = session.operator_id;
        let operator_username = session.username.clone();

        let role = self.config.device.role;
        if !role.can_register_entry() {
            return Err(AttendantError::DeviceRoleDenied {
                role,
                movement: Movement::Entry,
            });
        }

        let plate = Plate::new(plate_input)?;

        self.begin()?;

        let now = self.clock.now();
        let receipt = self.issuer.issue(plate, now);

        let entry = NewEntry {
            plate: receipt.plate.clone(),
            ticket_id: receipt.ticket_id.clone(),
            entry_time: now,
            operator_id,
            operator_username,
            device_id: self.config.device.id.clone(),
            entry_device: role.entry_device_number(),
        };

        let persisted = match self.vehicles.register_entry(&entry).await {
            Ok(id) => PersistOutcome::Saved { id },
            Err(e) => {
                warn!(
                    plate = %entry.plate,
                    ticket = %entry.ticket_id,
                    error = %e,
                    "entry not saved, issuing ticket anyway"
                );
                PersistOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let printed = self.print_receipt(&receipt, 1).await;
        let gate_raised = self.raise_gate(self.config.gate.entry_raise()).await;

        self.finish(AttendantState::Ready);

        info!(
            plate = %receipt.plate,
            ticket = %receipt.ticket_id,
            saved = persisted.is_saved(),
            printed = printed.is_printed(),
            gate_raised,
            "entry completed"
        );

        Ok(EntryOutcome {
            receipt,
            persisted,
            printed,
            gate_raised,
        })
    }

    /// Print the last issued ticket again.
    ///
    /// Ticket id, plate and entry time are never changed; only the copy
    /// number grows. The backend copy counter is updated best-effort.
    ///
    /// # Errors
    ///
    /// - `Busy` if another operation is in flight
    /// - `NotLoggedIn` without an operator session
    /// - `NoTicketToReprint` if this terminal has not issued a ticket yet
    pub async fn reprint_last_ticket(&mut self) -> Result<ReprintOutcome> {
        self.ensure_ready()?;
        self.require_session()?;

        let Some((receipt, copy)) = self.issuer.record_reprint() else {
            return Err(AttendantError::NoTicketToReprint);
        };

        self.begin()?;

        let printed = self.print_receipt(&receipt, copy).await;
        let counted = match self.vehicles.increment_copy_count(&receipt.ticket_id).await {
            Ok(rows) => rows > 0,
            Err(e) => {
                warn!(ticket = %receipt.ticket_id, error = %e, "copy count not updated");
                false
            }
        };

        self.finish(AttendantState::Ready);

        info!(ticket = %receipt.ticket_id, copy, counted, "ticket reprinted");
        Ok(ReprintOutcome {
            receipt,
            copy,
            printed,
            counted,
        })
    }
}
