#![allow(async_fn_in_trait)]

use crate::error::StorageResult;
use crate::models::{ExitRecord, NewEntry, RateRow, VehicleSession};
use chrono::{DateTime, Utc};
use parkgate_core::{ExitQuery, FeeQuote, Money, Plate, Rate, TicketId, legacy_fee};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// Repository for parking sessions.
///
/// Lookups only ever return the most recent session still `INSIDE` for the
/// given plate or ticket; exited sessions are history.
pub trait VehicleRepository: Send + Sync {
    /// Persist a new `INSIDE` session and return its row id.
    async fn register_entry(&self, entry: &NewEntry) -> StorageResult<i64>;

    async fn find_inside_by_plate(&self, plate: &Plate) -> StorageResult<Option<VehicleSession>>;

    async fn find_inside_by_ticket(
        &self,
        ticket: &TicketId,
    ) -> StorageResult<Option<VehicleSession>>;

    /// Mark the session `exit.session_id` as `EXITED`.
    ///
    /// Only a session still `INSIDE` and paid is touched. Returns the number
    /// of affected rows; zero means that session can no longer leave.
    async fn register_exit(&self, exit: &ExitRecord) -> StorageResult<u64>;

    /// Quote the legacy client-side fee for `session` at `now`.
    async fn calculate_fee(
        &self,
        session: &VehicleSession,
        now: DateTime<Utc>,
    ) -> StorageResult<FeeQuote>;

    /// Record one more printed copy of a ticket. Returns affected rows.
    async fn increment_copy_count(&self, ticket: &TicketId) -> StorageResult<u64>;

    /// Newest active rate, or the default rate if none is configured.
    async fn active_rate(&self) -> StorageResult<Rate>;
}

const SESSION_COLUMNS: &str = "id, plate, ticket_id, entry_time, state, paid, paid_at, \
     amount_cents, rate_key, copy_count, entry_device_id, exit_time, operator_username";

/// SQLite implementation of VehicleRepository
pub struct SqliteVehicleRepository {
    pool: SqlitePool,
}

impl SqliteVehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Mark the vehicle inside matching `query` as paid.
    ///
    /// Payment belongs to the pay station, not to the terminal; this exists so
    /// the pay station can be stood in for in tests and from the command line.
    pub async fn record_payment(
        &self,
        query: &ExitQuery,
        amount: Money,
        paid_at: DateTime<Utc>,
    ) -> StorageResult<u64> {
        let (sql, key) = match query {
            ExitQuery::Plate(plate) => (
                r#"
                UPDATE vehicle_sessions
                SET paid = 1, paid_at = ?, amount_cents = ?
                WHERE id = (
                    SELECT id FROM vehicle_sessions
                    WHERE plate = ? AND state = 'INSIDE'
                    ORDER BY entry_time DESC, id DESC
                    LIMIT 1
                )
                "#,
                plate.as_str(),
            ),
            ExitQuery::Ticket(ticket) => (
                r#"
                UPDATE vehicle_sessions
                SET paid = 1, paid_at = ?, amount_cents = ?
                WHERE ticket_id = ? AND state = 'INSIDE'
                "#,
                ticket.as_str(),
            ),
        };

        let result = sqlx::query(sql)
            .bind(paid_at)
            .bind(amount.cents())
            .bind(key)
            .execute(&self.pool)
            .await?;

        info!(query = %query, amount = %amount, rows = result.rows_affected(), "payment recorded");
        Ok(result.rows_affected())
    }
}

impl VehicleRepository for SqliteVehicleRepository {
    async fn register_entry(&self, entry: &NewEntry) -> StorageResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO vehicle_sessions (
                plate, ticket_id, entry_time, state,
                entry_device_id, entry_device, operator_id, operator_username
            )
            VALUES (?, ?, ?, 'INSIDE', ?, ?, ?, ?)
            "#,
        )
        .bind(entry.plate.as_str())
        .bind(entry.ticket_id.as_str())
        .bind(entry.entry_time)
        .bind(entry.device_id.as_str())
        .bind(entry.entry_device)
        .bind(entry.operator_id)
        .bind(&entry.operator_username)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(
            id,
            plate = %entry.plate,
            ticket = %entry.ticket_id,
            operator = %entry.operator_username,
            device = %entry.device_id,
            "entry registered"
        );
        Ok(id)
    }

    async fn find_inside_by_plate(&self, plate: &Plate) -> StorageResult<Option<VehicleSession>> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM vehicle_sessions \
             WHERE plate = ? AND state = 'INSIDE' \
             ORDER BY entry_time DESC, id DESC LIMIT 1"
        );
        let session = sqlx::query_as::<_, VehicleSession>(&sql)
            .bind(plate.as_str())
            .fetch_optional(&self.pool)
            .await?;

        debug!(plate = %plate, found = session.is_some(), "lookup by plate");
        Ok(session)
    }

    async fn find_inside_by_ticket(
        &self,
        ticket: &TicketId,
    ) -> StorageResult<Option<VehicleSession>> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM vehicle_sessions \
             WHERE ticket_id = ? AND state = 'INSIDE' \
             ORDER BY entry_time DESC, id DESC LIMIT 1"
        );
        let session = sqlx::query_as::<_, VehicleSession>(&sql)
            .bind(ticket.as_str())
            .fetch_optional(&self.pool)
            .await?;

        debug!(ticket = %ticket, found = session.is_some(), "lookup by ticket");
        Ok(session)
    }

    async fn register_exit(&self, exit: &ExitRecord) -> StorageResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE vehicle_sessions
            SET state = 'EXITED', exit_time = ?, exit_device_id = ?, exit_device = ?
            WHERE id = ? AND state = 'INSIDE' AND paid = 1
            "#,
        )
        .bind(exit.exit_time)
        .bind(exit.device_id.as_str())
        .bind(exit.exit_device)
        .bind(exit.session_id)
        .execute(&self.pool)
        .await?;

        let rows = result.rows_affected();
        if rows > 0 {
            info!(
                session = exit.session_id,
                plate = %exit.plate,
                device = %exit.device_id,
                "exit registered"
            );
        } else {
            debug!(session = exit.session_id, plate = %exit.plate, "session not inside and paid");
        }
        Ok(rows)
    }

    async fn calculate_fee(
        &self,
        session: &VehicleSession,
        now: DateTime<Utc>,
    ) -> StorageResult<FeeQuote> {
        let rate = match self.active_rate().await {
            Ok(rate) => rate,
            Err(e) => {
                warn!(error = %e, "rate lookup failed, using default rate");
                Rate::default()
            }
        };

        Ok(legacy_fee(session.entry_time, now, rate))
    }

    async fn increment_copy_count(&self, ticket: &TicketId) -> StorageResult<u64> {
        let result =
            sqlx::query("UPDATE vehicle_sessions SET copy_count = copy_count + 1 WHERE ticket_id = ?")
                .bind(ticket.as_str())
                .execute(&self.pool)
                .await?;

        debug!(ticket = %ticket, rows = result.rows_affected(), "copy count incremented");
        Ok(result.rows_affected())
    }

    async fn active_rate(&self) -> StorageResult<Rate> {
        let row = sqlx::query_as::<_, RateRow>(
            r#"
            SELECT rate_key, hourly_cents, minimum_cents
            FROM rates
            WHERE active = 1
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Rate::from).unwrap_or_default())
    }
}
