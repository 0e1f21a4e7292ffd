use parkgate_core::{DeviceId, DeviceRole};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Terminal as registered in `devices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Device {
    pub id: i64,
    pub device_id: String,
    pub name: String,
    /// `ENTRADA`, `SALIDA` or `MIXTO`
    pub role: String,
    pub mac_address: Option<String>,
    pub numeric_id: i32,
}

impl Device {
    pub fn role(&self) -> Option<DeviceRole> {
        DeviceRole::from_str(&self.role).ok()
    }
}

/// Register-or-update request sent by a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRegistration {
    pub device_id: DeviceId,
    pub name: String,
    pub role: DeviceRole,
    pub mac_address: Option<String>,
    pub numeric_id: i32,
}

/// Backend answer to a registration: the row id and a message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterDeviceOutcome {
    pub id: i64,
    pub message: String,
}
