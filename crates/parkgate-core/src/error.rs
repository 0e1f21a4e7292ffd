use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Input validation errors
    #[error("Plate is required")]
    EmptyPlate,

    #[error("Invalid plate '{plate}': must be at least {min} characters")]
    PlateTooShort { plate: String, min: usize },

    #[error("Invalid ticket id: {0}")]
    InvalidTicketId(String),

    #[error("Invalid device role: {0}")]
    InvalidDeviceRole(String),

    #[error("Invalid operator role: {0}")]
    InvalidOperatorRole(String),

    #[error("Invalid session state: {0}")]
    InvalidLotState(String),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
