//! # Mech Core
//!
//! Deterministic construction rules for BattleMech-style units.
//!
//! This crate contains **only** rule logic:
//! - No rendering
//! - No IO
//! - No randomness
//! - No floating-point math (uses fixed-point and integer half tons)
//!
//! Every entry point takes the catalogs it needs by reference and returns
//! new values, so identical inputs always give identical outputs. That
//! makes the engine safe to call from editors, servers and test harnesses
//! alike.
//!
//! ## Crate Structure
//!
//! - [`catalog`] - Structural component definitions per tech base
//! - [`calculator`] - Weight, slot, heat sink and engine rating rules
//! - [`footprint`] - Engine and gyro slot reservation
//! - [`resolver`] - Tech-base switching with selection memory
//! - [`equipment`] - Equipment catalog and mounted instances
//! - [`placement`] - Critical-slot placement validation
//! - [`displacement`] - Eviction after footprint changes
//! - [`armor`] - Armor limits, allocation and the optimizer
//! - [`heat`] - Heat scale and dissipation
//! - [`pipeline`] - Snapshot-in, snapshot-out edit pipeline
//! - [`data`] - RON-loadable data definitions

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod armor;
pub mod calculator;
pub mod catalog;
pub mod components;
pub mod context;
pub mod data;
pub mod displacement;
pub mod equipment;
pub mod error;
pub mod footprint;
pub mod heat;
pub mod location;
pub mod math;
pub mod pipeline;
pub mod placement;
pub mod resolver;
pub mod tables;
pub mod tech_base;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::armor::{optimize, ArmorAllocation, LocationArmor};
    pub use crate::calculator::{
        component_slots, component_weight, engine_rating, weight_breakdown, SlotFootprint,
        WeightBreakdown,
    };
    pub use crate::catalog::{ComponentCatalog, ComponentDefinition};
    pub use crate::components::*;
    pub use crate::context::UnitContext;
    pub use crate::equipment::{
        EquipmentCatalog, EquipmentCategory, EquipmentDefinition, EquipmentRegistry, InstanceId,
        MountedEquipmentInstance,
    };
    pub use crate::error::{Result, RulesError};
    pub use crate::location::MechLocation;
    pub use crate::math::Fixed;
    pub use crate::pipeline::{
        apply_edit, evaluate, Catalogs, DerivedValues, Edit, EditOutcome, UnitFinding,
        UnitSnapshot,
    };
    pub use crate::placement::{PlacementReport, Severity};
    pub use crate::tech_base::{TechBase, TechBaseMode};
}
