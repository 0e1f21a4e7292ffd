use crate::state_machine::AttendantState;
use parkgate_core::{DeviceRole, OperatorRole};
use parkgate_storage::{DisplayMessages, StorageError};
use std::fmt;
use thiserror::Error;

/// Lane movement a terminal may be asked to register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Entry,
    Exit,
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Movement::Entry => write!(f, "entry"),
            Movement::Exit => write!(f, "exit"),
        }
    }
}

/// Errors returned by attendant operations.
///
/// Failures fall in two groups: connectivity (the backend or local disk could
/// not be reached, the operator may retry) and business rejections (the
/// request itself is not acceptable). See [`AttendantError::is_connectivity`].
#[derive(Debug, Error)]
pub enum AttendantError {
    /// Input or configuration validation failed, or the state machine refused
    /// a move.
    #[error(transparent)]
    Core(#[from] parkgate_core::Error),

    /// Backend unreachable or failed to answer.
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Device role {role} does not allow {movement}")]
    DeviceRoleDenied { role: DeviceRole, movement: Movement },

    #[error("Operation in progress (state: {state})")]
    Busy { state: AttendantState },

    #[error("No operator logged in")]
    NotLoggedIn,

    #[error("Username and password are required")]
    CredentialsRequired,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Operator is inactive")]
    OperatorInactive,

    #[error("Role {role} cannot access maintenance")]
    MaintenanceDenied { role: OperatorRole },

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("No exit awaiting confirmation")]
    NoPendingExit,

    #[error("No ticket to reprint")]
    NoTicketToReprint,

    #[error("All fields are required")]
    FieldsRequired,

    #[error("Device name is required")]
    DeviceNameRequired,
}

impl AttendantError {
    /// `true` for failures caused by an unreachable backend or disk, which
    /// the operator may retry as is.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            AttendantError::Storage(_) | AttendantError::Core(parkgate_core::Error::Io(_))
        )
    }

    /// Message shown to the operator.
    pub fn display_message(&self) -> &'static str {
        use parkgate_core::Error as CoreError;

        match self {
            AttendantError::Core(CoreError::EmptyPlate) => DisplayMessages::PLATE_REQUIRED,
            AttendantError::Core(CoreError::PlateTooShort { .. }) => DisplayMessages::PLATE_INVALID,
            AttendantError::Core(CoreError::InvalidTicketId(_)) => DisplayMessages::TICKET_INVALID,
            AttendantError::Core(CoreError::InvalidConfig { .. }) => {
                DisplayMessages::INVALID_SERVER_CONFIG
            }
            AttendantError::Core(CoreError::InvalidStateTransition { .. })
            | AttendantError::Busy { .. } => DisplayMessages::BUSY,
            AttendantError::Core(_) | AttendantError::Storage(_) => DisplayMessages::DB_UNREACHABLE,
            AttendantError::DeviceRoleDenied {
                movement: Movement::Entry,
                ..
            } => DisplayMessages::ENTRY_NOT_ALLOWED,
            AttendantError::DeviceRoleDenied {
                movement: Movement::Exit,
                ..
            } => DisplayMessages::EXIT_NOT_ALLOWED,
            AttendantError::NotLoggedIn => DisplayMessages::NOT_LOGGED_IN,
            AttendantError::CredentialsRequired => DisplayMessages::CREDENTIALS_REQUIRED,
            AttendantError::InvalidCredentials => DisplayMessages::INVALID_CREDENTIALS,
            AttendantError::OperatorInactive => DisplayMessages::OPERATOR_INACTIVE,
            AttendantError::MaintenanceDenied { .. } => DisplayMessages::MAINTENANCE_DENIED,
            AttendantError::VehicleNotFound(_) => DisplayMessages::VEHICLE_NOT_FOUND,
            AttendantError::NoPendingExit => DisplayMessages::NO_PENDING_EXIT,
            AttendantError::NoTicketToReprint => DisplayMessages::NO_TICKET_TO_REPRINT,
            AttendantError::FieldsRequired => DisplayMessages::FIELDS_REQUIRED,
            AttendantError::DeviceNameRequired => DisplayMessages::DEVICE_NAME_REQUIRED,
        }
    }
}

pub type Result<T> = std::result::Result<T, AttendantError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_split() {
        let storage = AttendantError::Storage(StorageError::Configuration("down".to_string()));
        let io = AttendantError::Core(parkgate_core::Error::Io(std::io::Error::other("disk")));
        let plate = AttendantError::Core(parkgate_core::Error::EmptyPlate);

        assert!(storage.is_connectivity());
        assert!(io.is_connectivity());
        assert!(!plate.is_connectivity());
        assert!(!AttendantError::InvalidCredentials.is_connectivity());
        assert!(!AttendantError::Busy {
            state: AttendantState::Busy
        }
        .is_connectivity());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AttendantError::Core(parkgate_core::Error::EmptyPlate).display_message(),
            DisplayMessages::PLATE_REQUIRED
        );
        assert_eq!(
            AttendantError::DeviceRoleDenied {
                role: DeviceRole::Salida,
                movement: Movement::Entry
            }
            .display_message(),
            DisplayMessages::ENTRY_NOT_ALLOWED
        );
        assert_eq!(
            AttendantError::DeviceRoleDenied {
                role: DeviceRole::Entrada,
                movement: Movement::Exit
            }
            .display_message(),
            DisplayMessages::EXIT_NOT_ALLOWED
        );
        assert_eq!(
            AttendantError::VehicleNotFound("ABC123".to_string()).display_message(),
            DisplayMessages::VEHICLE_NOT_FOUND
        );
    }

    #[test]
    fn test_error_text() {
        let err = AttendantError::DeviceRoleDenied {
            role: DeviceRole::Salida,
            movement: Movement::Entry,
        };
        assert_eq!(err.to_string(), "Device role SALIDA does not allow entry");
    }
}
