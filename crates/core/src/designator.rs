//! Step designator fields.
//!
//! A step can point at a form indicator whose value names the person
//! (`indicatorID_for_assigned_empUID`) or group
//! (`indicatorID_for_assigned_groupID`) that fulfils a designated
//! dependency. `0` means unset.

use crate::dependency::ReservedDependency;
use crate::error::CoreError;

/// Indicator value meaning "no field bound".
pub const UNSET_INDICATOR: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesignatorField {
    AssignedEmployee,
    AssignedGroup,
}

impl DesignatorField {
    /// Parse the field name used in request paths and JSON payloads.
    pub fn from_field_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "indicatorID_for_assigned_empUID" => Ok(DesignatorField::AssignedEmployee),
            "indicatorID_for_assigned_groupID" => Ok(DesignatorField::AssignedGroup),
            other => Err(CoreError::Validation(format!(
                "Unknown designator field '{other}'"
            ))),
        }
    }

    pub fn field_name(self) -> &'static str {
        match self {
            DesignatorField::AssignedEmployee => "indicatorID_for_assigned_empUID",
            DesignatorField::AssignedGroup => "indicatorID_for_assigned_groupID",
        }
    }

    /// Column in the `workflow_steps` table.
    pub fn column(self) -> &'static str {
        match self {
            DesignatorField::AssignedEmployee => "indicator_id_for_assigned_emp_uid",
            DesignatorField::AssignedGroup => "indicator_id_for_assigned_group_id",
        }
    }

    /// The reserved dependency whose removal clears this field.
    pub fn paired_dependency(self) -> ReservedDependency {
        match self {
            DesignatorField::AssignedEmployee => ReservedDependency::PersonDesignated,
            DesignatorField::AssignedGroup => ReservedDependency::GroupDesignated,
        }
    }
}
