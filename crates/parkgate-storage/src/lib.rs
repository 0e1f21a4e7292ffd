//! Storage layer for the parking attendant terminal.
//!
//! SQLite-backed persistence for parking sessions, operator accounts,
//! terminal registrations and rates. The backend answers the same questions
//! the lot's central database does: register an entry, find the vehicle
//! inside, register its exit, validate an operator.
//!
//! # Architecture
//!
//! - [`Database`] - connection pool manager with embedded migrations
//! - [`VehicleRepository`], [`OperatorRepository`], [`DeviceRepository`] - data access traits
//! - [`DisplayMessages`] - operator-facing wording shared with the terminal
//! - [`password`] - salted hashing for operator credentials
//!
//! Business outcomes ("no vehicle inside", "inactive operator", "duplicate
//! username") come back as values. [`StorageError`] means the backend could
//! not be reached or failed to answer.
//!
//! # Example
//!
//! ```no_run
//! use parkgate_core::Plate;
//! use parkgate_storage::{Database, DatabaseConfig};
//! use parkgate_storage::repositories::{SqliteVehicleRepository, VehicleRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(DatabaseConfig::new("parkgate.db")).await?;
//! let vehicles = SqliteVehicleRepository::new(db.pool().clone());
//!
//! let plate = Plate::new("abc123")?;
//! if let Some(session) = vehicles.find_inside_by_plate(&plate).await? {
//!     println!("{} entered at {} (paid: {})", session.plate, session.entry_time, session.paid);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! Password digests are compared in constant time via the `subtle` crate, and
//! every query is parameterized.

pub mod connection;
pub mod error;
pub mod messages;
pub mod models;
pub mod password;
pub mod repositories;

pub use connection::{Database, DatabaseConfig, ServerProbe};
pub use error::{StorageError, StorageResult};
pub use messages::DisplayMessages;
pub use models::{
    CreateOperatorOutcome, Device, DeviceRegistration, ExitRecord, NewEntry, NewOperator,
    Operator, OperatorValidation, RateRow, RegisterDeviceOutcome, VehicleSession,
};
pub use repositories::{
    DeviceRepository, OperatorRepository, SqliteDeviceRepository, SqliteOperatorRepository,
    SqliteVehicleRepository, VehicleRepository,
};
