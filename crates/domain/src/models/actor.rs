//! Actor context and warehouse scope resolution.
//!
//! Every core operation receives an [`Actor`] resolved once at the API
//! boundary. EMPLOYEE actors are confined to their home warehouse; ADMIN
//! and OWNER bypass warehouse scoping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role of an authenticated actor. Closed set, matched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Employee,
    Admin,
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::Admin => "ADMIN",
            Role::Owner => "OWNER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role string is not one of the known roles.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMPLOYEE" => Ok(Role::Employee),
            "ADMIN" => Ok(Role::Admin),
            "OWNER" => Ok(Role::Owner),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// Authenticated actor context threaded through every core operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: i64,
    pub role: Role,
    /// Home warehouse. Required for EMPLOYEE, irrelevant otherwise.
    pub warehouse_id: Option<i64>,
}

/// Authorization failures surfaced by the scope resolver.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeError {
    #[error("Only EMPLOYEE can perform this action")]
    EmployeeOnly,

    #[error("Only ADMIN or OWNER can perform this action")]
    AdminOnly,

    #[error("Only OWNER can perform this action")]
    OwnerOnly,

    #[error("EMPLOYEE must be assigned to a warehouse")]
    Unassigned,

    #[error("Resource belongs to another warehouse")]
    WrongWarehouse,
}

impl Actor {
    /// Employee-only mutation on a resource owned by `warehouse_id`.
    ///
    /// Returns `Ok` only for an EMPLOYEE whose home warehouse matches.
    pub fn require_employee_in(&self, warehouse_id: i64) -> Result<(), ScopeError> {
        match self.role {
            Role::Employee => {
                let home = self.warehouse_id.ok_or(ScopeError::Unassigned)?;
                if home == warehouse_id {
                    Ok(())
                } else {
                    Err(ScopeError::WrongWarehouse)
                }
            }
            Role::Admin | Role::Owner => Err(ScopeError::EmployeeOnly),
        }
    }

    /// Access to a resource owned by `warehouse_id`: employees are confined
    /// to their home warehouse, admins and owners see everything.
    pub fn check_warehouse_access(&self, warehouse_id: i64) -> Result<(), ScopeError> {
        match self.role {
            Role::Employee => {
                let home = self.warehouse_id.ok_or(ScopeError::Unassigned)?;
                if home == warehouse_id {
                    Ok(())
                } else {
                    Err(ScopeError::WrongWarehouse)
                }
            }
            Role::Admin | Role::Owner => Ok(()),
        }
    }

    /// Warehouse filter for listings. `Some(id)` restricts to the employee's
    /// home warehouse; `None` means unscoped (ADMIN/OWNER).
    pub fn scope_filter(&self) -> Result<Option<i64>, ScopeError> {
        match self.role {
            Role::Employee => Ok(Some(self.warehouse_id.ok_or(ScopeError::Unassigned)?)),
            Role::Admin | Role::Owner => Ok(None),
        }
    }

    /// Administrative operations (threshold management, audit queries).
    pub fn require_admin(&self) -> Result<(), ScopeError> {
        match self.role {
            Role::Admin | Role::Owner => Ok(()),
            Role::Employee => Err(ScopeError::AdminOnly),
        }
    }

    /// Owner-exclusive operations (cross-entity reporting).
    pub fn require_owner(&self) -> Result<(), ScopeError> {
        match self.role {
            Role::Owner => Ok(()),
            Role::Employee | Role::Admin => Err(ScopeError::OwnerOnly),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(warehouse_id: Option<i64>) -> Actor {
        Actor {
            user_id: 7,
            role: Role::Employee,
            warehouse_id,
        }
    }

    fn admin() -> Actor {
        Actor {
            user_id: 2,
            role: Role::Admin,
            warehouse_id: None,
        }
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Employee, Role::Admin, Role::Owner] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("MANAGER".parse::<Role>().is_err());
    }

    #[test]
    fn employee_mutation_requires_matching_warehouse() {
        assert_eq!(employee(Some(1)).require_employee_in(1), Ok(()));
        assert_eq!(
            employee(Some(2)).require_employee_in(1),
            Err(ScopeError::WrongWarehouse)
        );
    }

    #[test]
    fn unassigned_employee_is_rejected_before_scope_check() {
        assert_eq!(
            employee(None).require_employee_in(1),
            Err(ScopeError::Unassigned)
        );
        assert_eq!(employee(None).scope_filter(), Err(ScopeError::Unassigned));
    }

    #[test]
    fn admin_cannot_take_employee_actions() {
        assert_eq!(admin().require_employee_in(1), Err(ScopeError::EmployeeOnly));
    }

    #[test]
    fn admin_and_owner_bypass_warehouse_access() {
        assert_eq!(admin().check_warehouse_access(99), Ok(()));
        assert_eq!(admin().scope_filter(), Ok(None));
        assert_eq!(
            employee(Some(3)).check_warehouse_access(4),
            Err(ScopeError::WrongWarehouse)
        );
        assert_eq!(employee(Some(3)).scope_filter(), Ok(Some(3)));
    }

    #[test]
    fn reporting_is_owner_exclusive() {
        let owner = Actor {
            user_id: 1,
            role: Role::Owner,
            warehouse_id: None,
        };
        assert_eq!(owner.require_owner(), Ok(()));
        assert_eq!(admin().require_owner(), Err(ScopeError::OwnerOnly));
        assert_eq!(employee(Some(1)).require_owner(), Err(ScopeError::OwnerOnly));
    }

    #[test]
    fn threshold_management_is_admin_or_owner() {
        assert_eq!(admin().require_admin(), Ok(()));
        assert_eq!(employee(Some(1)).require_admin(), Err(ScopeError::AdminOnly));
    }
}
