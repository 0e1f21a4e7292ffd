//! Attendant terminal core.
//!
//! Ties the domain types, peripherals and backend repositories into the
//! flows an operator runs at a lane:
//!
//! - login and role checks ([`OperatorSession`])
//! - entry registration with ticket issue, printing and gate ([`entry`])
//! - exit lookup gated on the pay station's paid flag, then confirmation ([`exit`])
//! - administrator maintenance ([`maintenance`])
//!
//! # Example
//!
//! ```no_run
//! use parkgate_attendant::{Attendant, ExitLookup};
//! use parkgate_core::{AppConfig, SystemClock};
//! use parkgate_storage::{
//!     Database, SqliteDeviceRepository, SqliteOperatorRepository, SqliteVehicleRepository,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::in_memory().await?;
//! let mut attendant = Attendant::new(
//!     AppConfig::default(),
//!     SqliteVehicleRepository::new(db.pool().clone()),
//!     SqliteOperatorRepository::new(db.pool().clone()),
//!     SqliteDeviceRepository::new(db.pool().clone()),
//!     SystemClock,
//! );
//!
//! attendant.login("admin", "admin").await?;
//! let entry = attendant.register_entry("ABC123").await?;
//! println!("ticket {}", entry.receipt.ticket_id);
//!
//! if let ExitLookup::PaymentPending { .. } = attendant.lookup_exit("ABC123").await? {
//!     println!("send the customer to the pay station");
//! }
//! # Ok(())
//! # }
//! ```

pub mod attendant;
pub mod entry;
pub mod error;
pub mod exit;
pub mod maintenance;
pub mod session;
pub mod state_machine;
pub mod ticket;

pub use attendant::{Attendant, Capabilities};
pub use entry::{EntryOutcome, PersistOutcome, PrintOutcome, ReprintOutcome};
pub use error::{AttendantError, Movement, Result};
pub use exit::{ExitConfirmation, ExitLookup, ExitOutcome};
pub use session::OperatorSession;
pub use state_machine::{AttendantState, StateMachine, StateTransition};
pub use ticket::{IssuedTicket, TicketIssuer};
