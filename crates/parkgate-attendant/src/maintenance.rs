//! Administrator-only configuration of the terminal.
//!
//! Covers the remote server settings, the terminal's own identity and role,
//! and operator accounts. Every operation requires an `ADMINISTRADOR`
//! session.

use crate::attendant::Attendant;
use crate::error::{AttendantError, Result};
use parkgate_core::constants::SERVER_VERSION_DISPLAY_LEN;
use parkgate_core::{Clock, DeviceRole, ServerConfig};
use parkgate_storage::{
    CreateOperatorOutcome, DeviceRegistration, DeviceRepository, NewOperator, Operator,
    OperatorRepository, RegisterDeviceOutcome, ServerProbe, VehicleRepository,
};
use tracing::info;

/// First `SERVER_VERSION_DISPLAY_LEN` characters of a version banner.
fn truncate_version(version: &str) -> String {
    version
        .trim()
        .chars()
        .take(SERVER_VERSION_DISPLAY_LEN)
        .collect()
}

impl<V, O, D, C> Attendant<V, O, D, C>
where
    V: VehicleRepository,
    O: OperatorRepository,
    D: DeviceRepository,
    C: Clock,
{
    /// Validate and store new server settings.
    ///
    /// # Errors
    ///
    /// - `NotLoggedIn` / `MaintenanceDenied` without an administrator session
    /// - `Core(InvalidConfig)` for a bad host, port, database or user
    /// - `Core(Io)` if the configuration file cannot be written
    pub fn save_server_config(&mut self, server: ServerConfig) -> Result<()> {
        self.require_admin()?;
        server.validate()?;

        let endpoint = server.endpoint();
        let mut updated = self.config.clone();
        updated.server = server;
        self.commit_config(updated)?;

        info!(endpoint = %endpoint, "server configuration updated");
        Ok(())
    }

    /// Factory server settings, for the operator to review and save.
    ///
    /// Nothing is stored until [`save_server_config`](Self::save_server_config).
    ///
    /// # Errors
    ///
    /// `NotLoggedIn` / `MaintenanceDenied` without an administrator session.
    pub fn default_server_config(&self) -> Result<ServerConfig> {
        self.require_admin()?;
        Ok(ServerConfig::default())
    }

    /// Check that `server` is valid and the backend answers.
    ///
    /// Returns the backend version, cut to the length the screen shows.
    ///
    /// # Errors
    ///
    /// - `NotLoggedIn` / `MaintenanceDenied` without an administrator session
    /// - `Core(InvalidConfig)` for invalid settings (nothing is contacted)
    /// - `Storage` if the backend does not answer
    pub async fn test_connection<P: ServerProbe>(
        &self,
        server: &ServerConfig,
        probe: &P,
    ) -> Result<String> {
        self.require_admin()?;
        server.validate()?;

        let version = probe.server_version().await?;
        info!(endpoint = %server.endpoint(), version = %version, "connection test succeeded");
        Ok(truncate_version(&version))
    }

    /// Rename the terminal and change its role, then mirror it to the backend.
    ///
    /// The local configuration is saved first; a backend failure is returned
    /// but leaves the local change in place. If the file cannot be written
    /// the terminal keeps its previous name and role.
    ///
    /// # Errors
    ///
    /// - `NotLoggedIn` / `MaintenanceDenied` without an administrator session
    /// - `Busy` while another operation is in flight
    /// - `DeviceNameRequired` for a blank name
    /// - `Core(Io)` if the configuration file cannot be written
    /// - `Storage` if the registration does not reach the backend
    pub async fn configure_device(
        &mut self,
        name: &str,
        role: DeviceRole,
        numeric_id: i32,
    ) -> Result<RegisterDeviceOutcome> {
        self.require_admin()?;
        self.ensure_ready()?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AttendantError::DeviceNameRequired);
        }

        let mut updated = self.config.clone();
        updated.device.name = name.to_string();
        updated.device.role = role;
        updated.device.numeric_id = numeric_id;
        self.commit_config(updated)?;

        let registration = DeviceRegistration {
            device_id: self.config.device.id.clone(),
            name: name.to_string(),
            role,
            mac_address: None,
            numeric_id,
        };
        let outcome = self.devices.register_device(&registration).await?;

        info!(
            device = %registration.device_id,
            name = %registration.name,
            role = %role,
            "device configured"
        );
        Ok(outcome)
    }

    /// # Errors
    ///
    /// - `NotLoggedIn` / `MaintenanceDenied` without an administrator session
    /// - `Storage` if the backend cannot be reached
    pub async fn list_operators(&self) -> Result<Vec<Operator>> {
        self.require_admin()?;
        Ok(self.operators.list_operators().await?)
    }

    /// Create an operator account.
    ///
    /// A duplicate username is not an error: the backend's answer comes back
    /// in the outcome with id 0.
    ///
    /// # Errors
    ///
    /// - `NotLoggedIn` / `MaintenanceDenied` without an administrator session
    /// - `FieldsRequired` if any field is blank (nothing is sent)
    /// - `Storage` if the backend cannot be reached
    pub async fn create_operator(&self, request: &NewOperator) -> Result<CreateOperatorOutcome> {
        let admin = self.require_admin()?;

        let Some(request) = request.normalized() else {
            return Err(AttendantError::FieldsRequired);
        };

        let outcome = self.operators.create_operator(&request).await?;
        info!(
            username = %request.username,
            role = %request.role,
            created = outcome.is_created(),
            by = %admin.username,
            "operator creation requested"
        );
        Ok(outcome)
    }
}
