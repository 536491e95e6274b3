//! Error types for the construction rules engine.
//!
//! Everything in here is a fatal precondition violation: the caller handed
//! the engine data it can never legitimately produce. User-correctable
//! problems are reported as data (see [`crate::placement`]) and never show
//! up as a [`RulesError`].

use thiserror::Error;

use crate::components::{ComponentCategory, ComponentId};
use crate::equipment::InstanceId;
use crate::tech_base::TechBase;

/// Result type alias using [`RulesError`].
pub type Result<T> = std::result::Result<T, RulesError>;

/// Top-level error type for all rules-engine failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// Engine rating has no entry in the standard engine table.
    #[error("Unsupported engine rating: {0}")]
    UnsupportedRating(u32),

    /// Unit tonnage has no entry in the internal structure table.
    #[error("Unsupported unit tonnage: {0}")]
    UnsupportedTonnage(u32),

    /// Component variant does not exist for the requested tech base.
    #[error("{id:?} is not available for {tech_base:?}")]
    ComponentUnavailable {
        /// Requested component.
        id: ComponentId,
        /// Tech base it was requested for.
        tech_base: TechBase,
    },

    /// Category has no default variant for the tech base.
    #[error("No default {category:?} variant for {tech_base:?}")]
    MissingDefault {
        /// Category without a default.
        category: ComponentCategory,
        /// Tech base that lacks a default.
        tech_base: TechBase,
    },

    /// Per-category tech base change while the unit is pinned to one base.
    #[error("{category:?} is locked to {locked:?} by the unit's tech base mode")]
    TechBaseLocked {
        /// Category the change was requested for.
        category: ComponentCategory,
        /// Tech base the unit is pinned to.
        locked: TechBase,
    },

    /// Equipment id is not present in the injected equipment catalog.
    #[error("Unknown equipment id: {0}")]
    UnknownEquipment(String),

    /// Instance id does not belong to the configuration.
    #[error("Unknown equipment instance: {0}")]
    UnknownInstance(InstanceId),

    /// Attempted to remove a fixed, structure-generated instance.
    #[error("Equipment instance {0} is fixed and cannot be removed")]
    InstanceNotRemovable(InstanceId),

    /// Jump MP above walk MP.
    #[error("Jump MP {jump_mp} exceeds walk MP {walk_mp}")]
    JumpMpExceedsWalk {
        /// Requested jump MP.
        jump_mp: u32,
        /// Walk MP of the unit.
        walk_mp: u32,
    },

    /// Generated slot items need more critical slots than the unit has.
    #[error("{component:?} needs {required} critical slots, the unit has {available}")]
    ExceedsCriticalSlots {
        /// Component generating the items.
        component: ComponentId,
        /// Slots required.
        required: u32,
        /// Slots on the whole unit.
        available: u32,
    },

    /// A count overflowed a rule calculation.
    #[error("{quantity} out of range: {value}")]
    ValueOutOfRange {
        /// What was counted.
        quantity: &'static str,
        /// The offending value.
        value: u32,
    },

    /// Data file parsing error.
    #[error("Failed to parse data '{source_name}': {message}")]
    DataParseError {
        /// Name of the data source that failed to parse.
        source_name: String,
        /// Error message.
        message: String,
    },

    /// Snapshot could not be encoded or decoded.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Equipment catalog contains the same id twice.
    #[error("Duplicate equipment id in catalog: {0}")]
    DuplicateEquipment(String),
}
