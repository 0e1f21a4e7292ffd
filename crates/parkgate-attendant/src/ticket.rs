//! Ticket numbering and reprint memory.

use chrono::{DateTime, Utc};
use parkgate_core::{Plate, TicketId};
use parkgate_hardware::Receipt;

/// Last ticket issued by this terminal and how many copies were printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedTicket {
    pub receipt: Receipt,
    pub copies: u32,
}

/// Issues `PK-<millis>` ticket ids and remembers the last receipt.
///
/// Tokens follow the wall clock in milliseconds but never repeat or go
/// backwards: two entries in the same millisecond, or a clock stepped back,
/// still get increasing tokens.
#[derive(Debug, Default)]
pub struct TicketIssuer {
    last_token: u64,
    last: Option<IssuedTicket>,
}

impl TicketIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next token for `now`.
    pub fn next_token(&mut self, now: DateTime<Utc>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let token = millis.max(self.last_token.saturating_add(1));
        self.last_token = token;
        token
    }

    /// Issue a ticket for `plate` entering at `now` and remember it for reprints.
    pub fn issue(&mut self, plate: Plate, now: DateTime<Utc>) -> Receipt {
        let ticket_id = TicketId::from_token(self.next_token(now));
        let receipt = Receipt::new(ticket_id, plate, now);

        self.last = Some(IssuedTicket {
            receipt: receipt.clone(),
            copies: 1,
        });
        receipt
    }

    pub fn last(&self) -> Option<&IssuedTicket> {
        self.last.as_ref()
    }

    /// Count one more copy of the last ticket.
    ///
    /// Returns the receipt unchanged and the new copy number, or `None` when
    /// nothing has been issued yet.
    pub fn record_reprint(&mut self) -> Option<(Receipt, u32)> {
        let last = self.last.as_mut()?;
        last.copies = last.copies.saturating_add(1);
        Some((last.receipt.clone(), last.copies))
    }
}
