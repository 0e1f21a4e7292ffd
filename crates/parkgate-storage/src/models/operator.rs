use parkgate_core::OperatorRole;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operator account, without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Operator {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// `ADMINISTRADOR`, `OPERADOR` or `CAJA`
    pub role: String,
    pub active: bool,
}

impl Operator {
    /// `"first last"`, as shown in the header bar and operator list.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn role(&self) -> Option<OperatorRole> {
        OperatorRole::from_str(&self.role).ok()
    }
}

/// Operator creation request.
#[derive(Clone, PartialEq, Eq)]
pub struct NewOperator {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: OperatorRole,
}

impl NewOperator {
    /// Trimmed copy of the request, or `None` if any field is blank.
    ///
    /// The password is kept as typed; only its emptiness is checked.
    pub fn normalized(&self) -> Option<Self> {
        let username = self.username.trim();
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();

        if username.is_empty()
            || self.password.is_empty()
            || first_name.is_empty()
            || last_name.is_empty()
        {
            return None;
        }

        Some(Self {
            username: username.to_string(),
            password: self.password.clone(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role: self.role,
        })
    }
}

impl fmt::Debug for NewOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewOperator")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("role", &self.role)
            .finish()
    }
}

/// Result of checking a username/password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorValidation {
    Valid(Operator),
    /// Credentials match an account that has been deactivated.
    Inactive,
    /// Unknown username or wrong password.
    InvalidCredentials,
}

/// Result of an operator creation: a positive id on success, otherwise
/// zero and the reason in `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOperatorOutcome {
    pub id: i64,
    pub message: String,
}

impl CreateOperatorOutcome {
    pub fn is_created(&self) -> bool {
        self.id > 0
    }
}
