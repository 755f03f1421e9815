//! Audit trail types.
//!
//! The audit log is append-only: entries are created alongside every
//! mutating action and are never updated or deleted. Every entry must be
//! attributable to a positive actor id; evaluator-driven mutations that have
//! no human actor are recorded under the reserved system actor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::Role;

/// Sentinel actor id for system-generated mutations (telemetry ingestion).
/// Real user ids are always positive (enforced at the API boundary and by
/// [`NewAuditEntry::by_actor`]), so zero can never collide with a person.
pub const SYSTEM_ACTOR_ID: i64 = 0;

/// Role label recorded for system-generated audit entries.
pub const SYSTEM_ACTOR_ROLE: &str = "SYSTEM";

/// What was done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = ParseAuditFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(AuditAction::Create),
            "UPDATE" => Ok(AuditAction::Update),
            "DELETE" => Ok(AuditAction::Delete),
            other => Err(ParseAuditFilterError::Action(other.to_string())),
        }
    }
}

/// What kind of entity was acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEntity {
    Warehouses,
    Sensors,
    Thresholds,
    Measurements,
    Alerts,
}

impl AuditEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEntity::Warehouses => "WAREHOUSES",
            AuditEntity::Sensors => "SENSORS",
            AuditEntity::Thresholds => "THRESHOLDS",
            AuditEntity::Measurements => "MEASUREMENTS",
            AuditEntity::Alerts => "ALERTS",
        }
    }
}

impl fmt::Display for AuditEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditEntity {
    type Err = ParseAuditFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAREHOUSES" => Ok(AuditEntity::Warehouses),
            "SENSORS" => Ok(AuditEntity::Sensors),
            "THRESHOLDS" => Ok(AuditEntity::Thresholds),
            "MEASUREMENTS" => Ok(AuditEntity::Measurements),
            "ALERTS" => Ok(AuditEntity::Alerts),
            other => Err(ParseAuditFilterError::Entity(other.to_string())),
        }
    }
}

/// Invalid audit query filter values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAuditFilterError {
    #[error("Unknown audit entity: {0}")]
    Entity(String),

    #[error("Unknown audit action: {0}")]
    Action(String),
}

/// A persisted audit trail entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub actor_user_id: i64,
    pub actor_role: String,
    pub action: String,
    pub entity: String,
    pub entity_id: Option<i64>,
    pub details: Option<String>,
}

/// Error for audit entries that cannot be attributed to an actor.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("actor_user_id is required for audit log")]
pub struct UnattributedAudit;

/// Input for appending one audit entry. Construction enforces that every
/// entry is attributable.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub actor_user_id: i64,
    pub actor_role: String,
    pub action: AuditAction,
    pub entity: AuditEntity,
    pub entity_id: Option<i64>,
    pub details: Option<String>,
}

impl NewAuditEntry {
    /// Builds an entry for a human actor. Fails when the actor id is
    /// missing or non-positive.
    pub fn by_actor(
        actor_user_id: i64,
        actor_role: Role,
        action: AuditAction,
        entity: AuditEntity,
        entity_id: Option<i64>,
        details: impl Into<String>,
    ) -> Result<Self, UnattributedAudit> {
        if actor_user_id <= 0 {
            return Err(UnattributedAudit);
        }
        Ok(Self {
            actor_user_id,
            actor_role: actor_role.as_str().to_string(),
            action,
            entity,
            entity_id,
            details: Some(details.into()),
        })
    }

    /// Builds an entry for a system-generated mutation.
    pub fn by_system(
        action: AuditAction,
        entity: AuditEntity,
        entity_id: Option<i64>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            actor_user_id: SYSTEM_ACTOR_ID,
            actor_role: SYSTEM_ACTOR_ROLE.to_string(),
            action,
            entity,
            entity_id,
            details: Some(details.into()),
        }
    }
}

/// Query filters for reading the audit trail. Dates are inclusive local
/// calendar days.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogQuery {
    pub entity: Option<String>,
    pub action: Option<String>,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_actor_is_rejected() {
        let err = NewAuditEntry::by_actor(
            0,
            Role::Employee,
            AuditAction::Create,
            AuditEntity::Alerts,
            Some(1),
            "x",
        )
        .unwrap_err();
        assert_eq!(err, UnattributedAudit);

        assert!(NewAuditEntry::by_actor(
            -5,
            Role::Admin,
            AuditAction::Delete,
            AuditEntity::Thresholds,
            None,
            "x",
        )
        .is_err());
    }

    #[test]
    fn system_entries_use_the_reserved_actor() {
        let entry = NewAuditEntry::by_system(
            AuditAction::Create,
            AuditEntity::Alerts,
            Some(42),
            "Auto-created alert",
        );
        assert_eq!(entry.actor_user_id, SYSTEM_ACTOR_ID);
        assert_eq!(entry.actor_role, SYSTEM_ACTOR_ROLE);
    }

    #[test]
    fn no_human_entry_can_claim_the_system_actor_id() {
        // The sentinel sits outside the positive id space, so attributing a
        // human entry to it is rejected like any other non-positive id.
        assert!(NewAuditEntry::by_actor(
            SYSTEM_ACTOR_ID,
            Role::Owner,
            AuditAction::Create,
            AuditEntity::Alerts,
            None,
            "x",
        )
        .is_err());
    }

    #[test]
    fn filters_parse_known_values_only() {
        assert_eq!("ALERTS".parse::<AuditEntity>(), Ok(AuditEntity::Alerts));
        assert_eq!("UPDATE".parse::<AuditAction>(), Ok(AuditAction::Update));
        assert!("HONEY".parse::<AuditEntity>().is_err());
        assert!("BLOCK".parse::<AuditAction>().is_err());
    }
}
