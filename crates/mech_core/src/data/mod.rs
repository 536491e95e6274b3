//! Data structures for equipment configuration.
//!
//! Pure data structures deserialized from RON. Tech base tags are kept as
//! free-form strings here and normalised once, when the registry is built.
//!
//! **Note:** This module contains no IO - it only defines data types.
//! File loading is handled by `mech_tools` and the test fixtures.

mod equipment_data;

pub use equipment_data::{EquipmentCatalogData, EquipmentData};
