#![allow(async_fn_in_trait)]

use crate::error::StorageResult;
use crate::messages::DisplayMessages;
use crate::models::{CreateOperatorOutcome, NewOperator, Operator, OperatorValidation};
use crate::password::{generate_salt, hash_password, verify_password};
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Repository for operator accounts.
pub trait OperatorRepository: Send + Sync {
    /// Check a username/password pair.
    ///
    /// Usernames match case-insensitively. Wrong passwords and unknown users
    /// are indistinguishable to the caller.
    async fn validate_operator(
        &self,
        username: &str,
        password: &str,
    ) -> StorageResult<OperatorValidation>;

    /// Create an operator. A duplicate username is reported in the outcome
    /// with id 0, not as an error.
    async fn create_operator(&self, operator: &NewOperator)
    -> StorageResult<CreateOperatorOutcome>;

    /// All operators, ordered by username.
    async fn list_operators(&self) -> StorageResult<Vec<Operator>>;
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: i64,
    username: String,
    first_name: String,
    last_name: String,
    role: String,
    active: bool,
    password_salt: String,
    password_hash: String,
}

impl CredentialRow {
    fn into_operator(self) -> Operator {
        Operator {
            id: self.id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            active: self.active,
        }
    }
}

/// SQLite implementation of OperatorRepository
pub struct SqliteOperatorRepository {
    pool: SqlitePool,
}

impl SqliteOperatorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Activate or deactivate an account. Returns `false` for unknown users.
    pub async fn set_active(&self, username: &str, active: bool) -> StorageResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE operators
            SET active = ?, updated_at = CURRENT_TIMESTAMP
            WHERE username = ?
            "#,
        )
        .bind(active)
        .bind(username.trim())
        .execute(&self.pool)
        .await?;

        info!(username, active, rows = result.rows_affected(), "operator status changed");
        Ok(result.rows_affected() > 0)
    }
}

impl OperatorRepository for SqliteOperatorRepository {
    async fn validate_operator(
        &self,
        username: &str,
        password: &str,
    ) -> StorageResult<OperatorValidation> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, username, first_name, last_name, role, active,
                   password_salt, password_hash
            FROM operators
            WHERE username = ?
            "#,
        )
        .bind(username.trim())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            warn!(username, "login attempt for unknown operator");
            return Ok(OperatorValidation::InvalidCredentials);
        };

        if !verify_password(&row.password_salt, password, &row.password_hash) {
            warn!(username, "login attempt with wrong password");
            return Ok(OperatorValidation::InvalidCredentials);
        }

        if !row.active {
            warn!(username, "login attempt for inactive operator");
            return Ok(OperatorValidation::Inactive);
        }

        info!(username = %row.username, role = %row.role, "operator validated");
        Ok(OperatorValidation::Valid(row.into_operator()))
    }

    async fn create_operator(
        &self,
        operator: &NewOperator,
    ) -> StorageResult<CreateOperatorOutcome> {
        let Some(operator) = operator.normalized() else {
            return Ok(CreateOperatorOutcome {
                id: 0,
                message: DisplayMessages::FIELDS_REQUIRED.to_string(),
            });
        };

        let salt = generate_salt();
        let hash = hash_password(&salt, &operator.password);

        // username is UNIQUE COLLATE NOCASE; a conflict inserts nothing.
        let result = sqlx::query(
            r#"
            INSERT INTO operators (username, password_salt, password_hash, first_name, last_name, role)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(username) DO NOTHING
            "#,
        )
        .bind(&operator.username)
        .bind(&salt)
        .bind(&hash)
        .bind(&operator.first_name)
        .bind(&operator.last_name)
        .bind(operator.role.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            info!(username = %operator.username, "operator already exists");
            return Ok(CreateOperatorOutcome {
                id: 0,
                message: DisplayMessages::OPERATOR_EXISTS.to_string(),
            });
        }

        let id = result.last_insert_rowid();
        info!(id, username = %operator.username, role = %operator.role, "operator created");
        Ok(CreateOperatorOutcome {
            id,
            message: DisplayMessages::OPERATOR_CREATED.to_string(),
        })
    }

    async fn list_operators(&self) -> StorageResult<Vec<Operator>> {
        let operators = sqlx::query_as::<_, Operator>(
            r#"
            SELECT id, username, first_name, last_name, role, active
            FROM operators
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(operators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Database;
    use parkgate_core::OperatorRole;

    async fn setup() -> (Database, SqliteOperatorRepository) {
        let db = Database::in_memory().await.unwrap();
        let repo = SqliteOperatorRepository::new(db.pool().clone());
        (db, repo)
    }

    fn cashier(username: &str) -> NewOperator {
        NewOperator {
            username: username.to_string(),
            password: "caja123".to_string(),
            first_name: "Maria".to_string(),
            last_name: "Lopez".to_string(),
            role: OperatorRole::Caja,
        }
    }

    #[tokio::test]
    async fn test_seeded_admin_validates() {
        let (_db, repo) = setup().await;

        let result = repo.validate_operator("admin", "admin").await.unwrap();
        let OperatorValidation::Valid(operator) = result else {
            panic!("expected valid admin, got {result:?}");
        };
        assert_eq!(operator.role(), Some(OperatorRole::Administrador));
        assert!(operator.active);
    }

    #[tokio::test]
    async fn test_username_is_case_insensitive() {
        let (_db, repo) = setup().await;
        let result = repo.validate_operator(" ADMIN ", "admin").await.unwrap();
        assert!(matches!(result, OperatorValidation::Valid(_)));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user() {
        let (_db, repo) = setup().await;

        assert_eq!(
            repo.validate_operator("admin", "Admin").await.unwrap(),
            OperatorValidation::InvalidCredentials
        );
        assert_eq!(
            repo.validate_operator("nadie", "admin").await.unwrap(),
            OperatorValidation::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_create_and_login() {
        let (_db, repo) = setup().await;

        let outcome = repo.create_operator(&cashier(" mlopez ")).await.unwrap();
        assert!(outcome.is_created());
        assert_eq!(outcome.message, DisplayMessages::OPERATOR_CREATED);

        let result = repo.validate_operator("mlopez", "caja123").await.unwrap();
        let OperatorValidation::Valid(operator) = result else {
            panic!("expected valid cashier");
        };
        assert_eq!(operator.id, outcome.id);
        assert_eq!(operator.display_name(), "Maria Lopez");
        assert_eq!(operator.role(), Some(OperatorRole::Caja));
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let (_db, repo) = setup().await;

        assert!(repo.create_operator(&cashier("mlopez")).await.unwrap().is_created());

        let duplicate = repo.create_operator(&cashier("MLopez")).await.unwrap();
        assert!(!duplicate.is_created());
        assert_eq!(duplicate.id, 0);
        assert_eq!(duplicate.message, DisplayMessages::OPERATOR_EXISTS);
    }

    #[tokio::test]
    async fn test_create_with_blank_fields() {
        let (_db, repo) = setup().await;

        let mut request = cashier("mlopez");
        request.last_name = " ".to_string();
        let outcome = repo.create_operator(&request).await.unwrap();
        assert!(!outcome.is_created());
        assert_eq!(outcome.message, DisplayMessages::FIELDS_REQUIRED);
        assert_eq!(repo.list_operators().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_inactive_operator() {
        let (_db, repo) = setup().await;
        repo.create_operator(&cashier("mlopez")).await.unwrap();

        assert!(repo.set_active("mlopez", false).await.unwrap());
        assert_eq!(
            repo.validate_operator("mlopez", "caja123").await.unwrap(),
            OperatorValidation::Inactive
        );

        // Wrong password on an inactive account still reads as bad credentials.
        assert_eq!(
            repo.validate_operator("mlopez", "wrong").await.unwrap(),
            OperatorValidation::InvalidCredentials
        );

        assert!(repo.set_active("mlopez", true).await.unwrap());
        assert!(matches!(
            repo.validate_operator("mlopez", "caja123").await.unwrap(),
            OperatorValidation::Valid(_)
        ));

        assert!(!repo.set_active("nadie", false).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_operators_ordered() {
        let (_db, repo) = setup().await;
        repo.create_operator(&cashier("zeta")).await.unwrap();
        repo.create_operator(&cashier("beto")).await.unwrap();

        let names: Vec<String> = repo
            .list_operators()
            .await
            .unwrap()
            .into_iter()
            .map(|op| op.username)
            .collect();
        assert_eq!(names, vec!["admin", "beto", "zeta"]);
    }
}
