//! Dependency (requirement) identity and eligibility rules.
//!
//! Every dependency ID falls into one of three kinds:
//!
//! - **Reserved** (negative IDs): system-defined behaviour, see
//!   [`ReservedDependency`].
//! - **Built-in** (`1..=MAX_BUILT_IN_ID`): catalog entries shipped with the
//!   seed data.
//! - **Custom** (above `MAX_BUILT_IN_ID`): created through the API.
//!
//! Handlers classify an incoming ID once via [`DependencyKind::classify`]
//! and then ask the kind what is allowed, instead of comparing magic numbers.

use crate::designator::DesignatorField;
use crate::error::CoreError;
use crate::types::DbId;

/// Highest ID in the built-in catalog range. Custom dependencies are always
/// allocated above this.
pub const MAX_BUILT_IN_ID: DbId = 8;

// ---------------------------------------------------------------------------
// Reserved dependencies
// ---------------------------------------------------------------------------

/// System-defined dependencies with negative IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedDependency {
    /// `-1`: a person chosen by the requestor through a form field.
    PersonDesignated,
    /// `-2`: the requestor themselves must follow up.
    RequestorFollowup,
    /// `-3`: a group chosen by the requestor through a form field.
    GroupDesignated,
    /// `-4`: automated processing. Never assignable through the API.
    SystemAgent,
}

impl ReservedDependency {
    /// All reserved dependencies, in descending ID order.
    pub const ALL: [ReservedDependency; 4] = [
        ReservedDependency::PersonDesignated,
        ReservedDependency::RequestorFollowup,
        ReservedDependency::GroupDesignated,
        ReservedDependency::SystemAgent,
    ];

    pub fn id(self) -> DbId {
        match self {
            ReservedDependency::PersonDesignated => -1,
            ReservedDependency::RequestorFollowup => -2,
            ReservedDependency::GroupDesignated => -3,
            ReservedDependency::SystemAgent => -4,
        }
    }

    pub fn from_id(id: DbId) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.id() == id)
    }

    /// Catalog description stored in the `dependencies` table.
    pub fn description(self) -> &'static str {
        match self {
            ReservedDependency::PersonDesignated => "Person Designated",
            ReservedDependency::RequestorFollowup => "Requestor Followup",
            ReservedDependency::GroupDesignated => "Group Designated",
            ReservedDependency::SystemAgent => "System Agent",
        }
    }

    /// Description shown once the dependency is attached to a step.
    pub fn resolved_description(self) -> &'static str {
        match self {
            ReservedDependency::PersonDesignated => "Person Designated by the Requestor",
            ReservedDependency::GroupDesignated => "Group Designated by the Requestor",
            other => other.description(),
        }
    }

    /// Whether the dependency may be linked to a step through the API.
    pub fn is_assignable(self) -> bool {
        self != ReservedDependency::SystemAgent
    }

    /// The step designator field this dependency reads its assignee from.
    pub fn designator(self) -> Option<DesignatorField> {
        match self {
            ReservedDependency::PersonDesignated => Some(DesignatorField::AssignedEmployee),
            ReservedDependency::GroupDesignated => Some(DesignatorField::AssignedGroup),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dependency kind
// ---------------------------------------------------------------------------

/// Classified dependency identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Reserved(ReservedDependency),
    BuiltIn(DbId),
    Custom(DbId),
}

impl DependencyKind {
    /// Classify a raw dependency ID.
    ///
    /// `0` and negative IDs outside the reserved set are rejected.
    pub fn classify(id: DbId) -> Result<Self, CoreError> {
        if id == 0 {
            return Err(CoreError::Validation("dependencyID is required".into()));
        }
        if id < 0 {
            return ReservedDependency::from_id(id)
                .map(DependencyKind::Reserved)
                .ok_or_else(|| {
                    CoreError::Validation(format!("Unknown reserved dependency {id}"))
                });
        }
        if id <= MAX_BUILT_IN_ID {
            Ok(DependencyKind::BuiltIn(id))
        } else {
            Ok(DependencyKind::Custom(id))
        }
    }

    pub fn id(self) -> DbId {
        match self {
            DependencyKind::Reserved(r) => r.id(),
            DependencyKind::BuiltIn(id) | DependencyKind::Custom(id) => id,
        }
    }

    /// Linking to a step is allowed for everything except unassignable
    /// reserved dependencies.
    pub fn ensure_linkable(self) -> Result<(), CoreError> {
        match self {
            DependencyKind::Reserved(r) if !r.is_assignable() => Err(CoreError::Validation(
                format!("Dependency {} is reserved and cannot be assigned", r.id()),
            )),
            _ => Ok(()),
        }
    }

    /// Reserved dependencies carry system meaning and cannot be edited.
    pub fn ensure_editable(self) -> Result<(), CoreError> {
        match self {
            DependencyKind::Reserved(r) => Err(CoreError::Validation(format!(
                "Dependency {} is reserved and cannot be modified",
                r.id()
            ))),
            _ => Ok(()),
        }
    }

    /// Group privileges only apply to catalog and custom dependencies.
    pub fn ensure_privileges_allowed(self) -> Result<(), CoreError> {
        match self {
            DependencyKind::Reserved(r) => Err(CoreError::Validation(format!(
                "Privileges cannot be set on reserved dependency {}",
                r.id()
            ))),
            _ => Ok(()),
        }
    }
}

/// Resolve the display description of a dependency attached to a step.
pub fn resolved_description(dependency_id: DbId, base: &str) -> &str {
    match ReservedDependency::from_id(dependency_id) {
        Some(reserved) => reserved.resolved_description(),
        None => base,
    }
}
