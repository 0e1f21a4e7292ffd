//! Logged-in operator.

use crate::error::{AttendantError, Result};
use parkgate_core::OperatorRole;
use parkgate_storage::Operator;
use serde::Serialize;

/// Operator currently working the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorSession {
    pub operator_id: i64,
    pub username: String,
    pub display_name: String,
    pub role: OperatorRole,
}

impl OperatorSession {
    /// Build a session from a validated account.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored role is not one the terminal knows.
    pub fn from_operator(operator: Operator) -> Result<Self> {
        let role: OperatorRole = operator.role.parse()?;
        Ok(Self {
            operator_id: operator.id,
            display_name: operator.display_name(),
            username: operator.username,
            role,
        })
    }

    pub fn can_access_maintenance(&self) -> bool {
        self.role.can_access_maintenance()
    }

    /// # Errors
    ///
    /// Returns `MaintenanceDenied` unless the operator is an administrator.
    pub fn require_maintenance(&self) -> Result<()> {
        if self.can_access_maintenance() {
            Ok(())
        } else {
            Err(AttendantError::MaintenanceDenied { role: self.role })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn operator(role: &str) -> Operator {
        Operator {
            id: 9,
            username: "jperez".to_string(),
            first_name: "Juan".to_string(),
            last_name: "Perez".to_string(),
            role: role.to_string(),
            active: true,
        }
    }

    #[test]
    fn test_from_operator() {
        let session = OperatorSession::from_operator(operator("OPERADOR")).unwrap();
        assert_eq!(session.operator_id, 9);
        assert_eq!(session.username, "jperez");
        assert_eq!(session.display_name, "Juan Perez");
        assert_eq!(session.role, OperatorRole::Operador);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = OperatorSession::from_operator(operator("SUPERVISOR")).unwrap_err();
        assert!(matches!(
            err,
            AttendantError::Core(parkgate_core::Error::InvalidOperatorRole(_))
        ));
    }

    #[rstest]
    #[case("ADMINISTRADOR", true)]
    #[case("OPERADOR", false)]
    #[case("CAJA", false)]
    fn test_maintenance_access(#[case] role: &str, #[case] allowed: bool) {
        let session = OperatorSession::from_operator(operator(role)).unwrap();
        assert_eq!(session.can_access_maintenance(), allowed);
        assert_eq!(session.require_maintenance().is_ok(), allowed);
    }
}
