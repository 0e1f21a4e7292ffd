//! Peripheral failures.

pub type Result<T> = std::result::Result<T, HardwareError>;

/// Why a gate or printer command did not complete.
///
/// The attendant treats all of them alike: log, fall back, carry on.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    #[error("Printer out of paper: {device}")]
    PaperOut { device: String },

    /// Barrier did not reach the commanded position.
    #[error("Gate fault: {message}")]
    GateFault { message: String },

    #[error("Communication error: {message}")]
    Communication { message: String },
}

impl HardwareError {
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    pub fn paper_out(device: impl Into<String>) -> Self {
        Self::PaperOut {
            device: device.into(),
        }
    }

    pub fn gate_fault(message: impl Into<String>) -> Self {
        Self::GateFault {
            message: message.into(),
        }
    }

    pub fn communication(message: impl Into<String>) -> Self {
        Self::Communication {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_device() {
        assert_eq!(
            HardwareError::disconnected("Thermal printer").to_string(),
            "Device disconnected: Thermal printer"
        );
        assert_eq!(
            HardwareError::paper_out("Caseta 1 printer").to_string(),
            "Printer out of paper: Caseta 1 printer"
        );
        assert_eq!(
            HardwareError::gate_fault("arm blocked").to_string(),
            "Gate fault: arm blocked"
        );
        assert_eq!(
            HardwareError::communication("relay closed").to_string(),
            "Communication error: relay closed"
        );
    }
}
