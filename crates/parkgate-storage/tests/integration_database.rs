//! Integration tests for the database connection, migrations and pooling.
//!
//! Run with: cargo test --package parkgate-storage --test integration_database

use chrono::{Duration, TimeZone, Utc};
use parkgate_core::{DeviceId, ExitQuery, Money, Plate, TicketId};
use parkgate_storage::connection::{Database, DatabaseConfig};
use parkgate_storage::models::{ExitRecord, NewEntry};
use parkgate_storage::repositories::{SqliteVehicleRepository, VehicleRepository};
use std::sync::Arc;
use tokio::sync::Barrier;

fn new_entry(plate: &str, token: u64) -> NewEntry {
    NewEntry {
        plate: Plate::new(plate).unwrap(),
        ticket_id: TicketId::from_token(token),
        entry_time: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        operator_id: 1,
        operator_username: "admin".to_string(),
        device_id: DeviceId::new("POS-INTEG001").unwrap(),
        entry_device: 1,
    }
}

#[tokio::test]
async fn test_in_memory_database() {
    let db = Database::in_memory().await.unwrap();
    db.health_check().await.unwrap();
    db.close().await;
}

#[tokio::test]
async fn test_migration_idempotency() {
    let db = Database::in_memory().await.unwrap();

    db.migrate().await.unwrap();
    db.migrate().await.unwrap();

    for table in ["vehicle_sessions", "operators", "devices", "rates"] {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?")
                .bind(table)
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(count, 1, "missing table {table}");
    }

    // Seed rows are not duplicated by a second run.
    let (admins,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM operators")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(admins, 1);

    db.close().await;
}

#[tokio::test]
async fn test_state_check_constraint() {
    let db = Database::in_memory().await.unwrap();

    let result = sqlx::query(
        r#"
        INSERT INTO vehicle_sessions (plate, ticket_id, entry_time, state, entry_device_id, operator_id, operator_username)
        VALUES ('ABC123', 'PK-1', '2025-03-01T09:00:00+00:00', 'PARKED', 'POS-1', 1, 'admin')
        "#,
    )
    .execute(db.pool())
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_file_database_persists_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("parkgate.db");

    {
        let db = Database::new(DatabaseConfig::new(&path)).await.unwrap();
        let repo = SqliteVehicleRepository::new(db.pool().clone());
        repo.register_entry(&new_entry("ABC123", 1)).await.unwrap();
        db.close().await;
    }

    assert!(path.exists());

    let db = Database::new(DatabaseConfig::new(&path)).await.unwrap();
    let repo = SqliteVehicleRepository::new(db.pool().clone());
    let session = repo
        .find_inside_by_plate(&Plate::new("ABC123").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.ticket_id, "PK-1");
    db.close().await;
}

#[tokio::test]
async fn test_concurrent_entries_and_exits() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(DatabaseConfig::new(dir.path().join("lot.db")).max_connections(4))
        .await
        .unwrap();

    const NUM_CONCURRENT_TASKS: usize = 8;
    let barrier = Arc::new(Barrier::new(NUM_CONCURRENT_TASKS));
    let mut handles = vec![];

    for i in 0..NUM_CONCURRENT_TASKS {
        let pool = db.pool().clone();
        let barrier = barrier.clone();

        handles.push(tokio::spawn(async move {
            let repo = SqliteVehicleRepository::new(pool);
            let plate = format!("CAR{i:03}");
            barrier.wait().await;

            let token = i as u64 + 1;
            let session_id = repo.register_entry(&new_entry(&plate, token)).await.unwrap();
            repo.record_payment(
                &ExitQuery::Ticket(TicketId::from_token(token)),
                Money::from_cents(150),
                Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap(),
            )
            .await
            .unwrap();
            repo.register_exit(&ExitRecord {
                session_id,
                plate: Plate::new(&plate).unwrap(),
                device_id: DeviceId::new("POS-INTEG002").unwrap(),
                exit_device: 2,
                exit_time: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
                    + Duration::minutes(45),
            })
            .await
            .unwrap()
        }));
    }

    let results = futures::future::join_all(handles).await;
    for result in results {
        assert_eq!(result.unwrap(), 1);
    }

    let (inside,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM vehicle_sessions WHERE state = 'INSIDE'")
            .fetch_one(db.pool())
            .await
            .unwrap();
    let (exited,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM vehicle_sessions WHERE state = 'EXITED'")
            .fetch_one(db.pool())
            .await
            .unwrap();

    assert_eq!(inside, 0);
    assert_eq!(exited, NUM_CONCURRENT_TASKS as i64);

    db.close().await;
}
