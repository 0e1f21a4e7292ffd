use chrono::{DateTime, Utc};
use parkgate_core::{DeviceId, LotState, Money, Plate, TicketId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One parking session as stored in `vehicle_sessions`.
///
/// Text columns are kept raw; use the accessors for typed views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VehicleSession {
    pub id: i64,

    /// Normalized plate (trimmed, uppercase)
    pub plate: String,

    /// `PK-<token>` printed on the ticket
    pub ticket_id: String,

    pub entry_time: DateTime<Utc>,

    /// `INSIDE` or `EXITED`
    pub state: String,

    /// Set by the pay station
    pub paid: bool,

    pub paid_at: Option<DateTime<Utc>>,

    /// Amount recorded by the pay station, in cents
    pub amount_cents: i64,

    pub rate_key: String,

    /// Printed copies, starting at 1
    pub copy_count: i64,

    pub entry_device_id: String,

    pub exit_time: Option<DateTime<Utc>>,

    pub operator_username: String,
}

impl VehicleSession {
    pub fn lot_state(&self) -> Option<LotState> {
        LotState::from_str(&self.state).ok()
    }

    pub fn is_inside(&self) -> bool {
        self.lot_state() == Some(LotState::Inside)
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// # Errors
    /// Returns an error if the stored plate does not pass validation.
    pub fn plate(&self) -> parkgate_core::Result<Plate> {
        Plate::new(&self.plate)
    }

    /// # Errors
    /// Returns an error if the stored ticket id is malformed.
    pub fn ticket_id(&self) -> parkgate_core::Result<TicketId> {
        TicketId::new(&self.ticket_id)
    }
}

/// Entry registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub plate: Plate,
    pub ticket_id: TicketId,
    pub entry_time: DateTime<Utc>,
    pub operator_id: i64,
    pub operator_username: String,
    pub device_id: DeviceId,
    /// 1 for entry-capable terminals, 0 otherwise
    pub entry_device: i32,
}

/// Exit registration request for one looked-up session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitRecord {
    /// Row id of the session found at lookup
    pub session_id: i64,
    pub plate: Plate,
    pub device_id: DeviceId,
    /// 2 for exit-capable terminals, 0 otherwise
    pub exit_device: i32,
    pub exit_time: DateTime<Utc>,
}
