#![allow(async_fn_in_trait)]

use crate::error::StorageResult;
use crate::messages::DisplayMessages;
use crate::models::{Device, DeviceRegistration, RegisterDeviceOutcome};
use parkgate_core::DeviceId;
use sqlx::SqlitePool;
use tracing::info;

/// Repository for terminal registrations.
pub trait DeviceRepository: Send + Sync {
    /// Insert the terminal, or update name, role, MAC and numeric id when the
    /// device id is already known.
    async fn register_device(
        &self,
        registration: &DeviceRegistration,
    ) -> StorageResult<RegisterDeviceOutcome>;

    async fn find_device(&self, device_id: &DeviceId) -> StorageResult<Option<Device>>;
}

/// SQLite implementation of DeviceRepository
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    async fn register_device(
        &self,
        registration: &DeviceRegistration,
    ) -> StorageResult<RegisterDeviceOutcome> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM devices WHERE device_id = ?")
                .bind(registration.device_id.as_str())
                .fetch_optional(&mut *tx)
                .await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO devices (device_id, name, role, mac_address, numeric_id)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(device_id) DO UPDATE SET
                name = excluded.name,
                role = excluded.role,
                mac_address = excluded.mac_address,
                numeric_id = excluded.numeric_id,
                updated_at = CURRENT_TIMESTAMP
            RETURNING id
            "#,
        )
        .bind(registration.device_id.as_str())
        .bind(registration.name.trim())
        .bind(registration.role.as_str())
        .bind(registration.mac_address.as_deref())
        .bind(registration.numeric_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        let message = if existing.is_some() {
            DisplayMessages::DEVICE_UPDATED
        } else {
            DisplayMessages::DEVICE_REGISTERED
        };

        info!(
            id,
            device = %registration.device_id,
            name = %registration.name,
            role = %registration.role,
            updated = existing.is_some(),
            "device registered"
        );

        Ok(RegisterDeviceOutcome {
            id,
            message: message.to_string(),
        })
    }

    async fn find_device(&self, device_id: &DeviceId) -> StorageResult<Option<Device>> {
        let device = sqlx::query_as::<_, Device>(
            r#"
            SELECT id, device_id, name, role, mac_address, numeric_id
            FROM devices
            WHERE device_id = ?
            "#,
        )
        .bind(device_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Database;
    use parkgate_core::DeviceRole;

    fn registration(name: &str, role: DeviceRole) -> DeviceRegistration {
        DeviceRegistration {
            device_id: DeviceId::new("POS-A1B2C3D4").unwrap(),
            name: name.to_string(),
            role,
            mac_address: Some("00:1A:2B:3C:4D:5E".to_string()),
            numeric_id: 1,
        }
    }

    #[tokio::test]
    async fn test_register_then_update() {
        let db = Database::in_memory().await.unwrap();
        let repo = SqliteDeviceRepository::new(db.pool().clone());

        let first = repo
            .register_device(&registration("Entrada Norte", DeviceRole::Entrada))
            .await
            .unwrap();
        assert!(first.id > 0);
        assert_eq!(first.message, DisplayMessages::DEVICE_REGISTERED);

        let second = repo
            .register_device(&registration(" Caseta 1 ", DeviceRole::Mixto))
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.message, DisplayMessages::DEVICE_UPDATED);

        let device = repo
            .find_device(&DeviceId::new("pos-a1b2c3d4").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(device.name, "Caseta 1");
        assert_eq!(device.role(), Some(DeviceRole::Mixto));
        assert_eq!(device.mac_address.as_deref(), Some("00:1A:2B:3C:4D:5E"));
    }

    #[tokio::test]
    async fn test_find_unknown_device() {
        let db = Database::in_memory().await.unwrap();
        let repo = SqliteDeviceRepository::new(db.pool().clone());

        let missing = DeviceId::new("POS-FFFFFFFF").unwrap();
        assert!(repo.find_device(&missing).await.unwrap().is_none());
    }
}
