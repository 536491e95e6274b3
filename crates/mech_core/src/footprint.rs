//! Structural slot footprints.
//!
//! The engine and gyro reserve critical slots in the torsos. Which slots
//! depends on the current engine/gyro pair, so the footprint is always
//! recomputed from the selections rather than read from a fixed table.
//!
//! The center torso reserves one contiguous block from slot 0 covering the
//! engine's center slots plus the gyro. Only which slots are reserved
//! matters, not which component owns each one. Side torso engine slots
//! start at index 0.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::calculator::{component_slots, EngineSlots, SlotFootprint};
use crate::catalog::ComponentCatalog;
use crate::components::{ComponentCategory, ComponentSelections};
use crate::context::UnitContext;
use crate::error::Result;
use crate::location::MechLocation;

/// Per-location slot indices reserved by structural components.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructuralFootprint {
    reserved: BTreeMap<MechLocation, BTreeSet<u8>>,
}

impl StructuralFootprint {
    /// Create an empty footprint.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out engine and gyro slots.
    #[must_use]
    pub fn from_slots(engine: EngineSlots, gyro_slots: u8) -> Self {
        let mut footprint = Self::new();

        // engine and gyro blocks are contiguous from slot 0
        footprint.reserve(
            MechLocation::CenterTorso,
            0..engine.center.saturating_add(gyro_slots),
        );
        footprint.reserve(MechLocation::LeftTorso, 0..engine.left);
        footprint.reserve(MechLocation::RightTorso, 0..engine.right);

        footprint
    }

    /// Reserve slots in a location, ignoring indices outside its bounds.
    pub fn reserve(&mut self, location: MechLocation, slots: impl IntoIterator<Item = u8>) {
        let limit = location.slot_count();
        let entry = self.reserved.entry(location).or_default();
        entry.extend(slots.into_iter().filter(|&slot| slot < limit));
        if entry.is_empty() {
            self.reserved.remove(&location);
        }
    }

    /// Reserved slots in a location; empty if none.
    pub fn reserved(&self, location: MechLocation) -> impl Iterator<Item = u8> + '_ {
        self.reserved.get(&location).into_iter().flatten().copied()
    }

    /// Check whether a specific slot is reserved.
    #[must_use]
    pub fn is_reserved(&self, location: MechLocation, slot: u8) -> bool {
        self.reserved
            .get(&location)
            .is_some_and(|slots| slots.contains(&slot))
    }

    /// Whether the footprint reserves anything in a location.
    #[must_use]
    pub fn reserves_in(&self, location: MechLocation) -> bool {
        self.reserved.contains_key(&location)
    }

    /// Number of reserved slots in a location.
    #[must_use]
    pub fn reserved_count(&self, location: MechLocation) -> usize {
        self.reserved.get(&location).map_or(0, BTreeSet::len)
    }

    /// Locations with at least one reserved slot.
    pub fn locations(&self) -> impl Iterator<Item = MechLocation> + '_ {
        self.reserved.keys().copied()
    }
}

/// Compute the engine and gyro footprint for the current selections.
///
/// # Errors
///
/// Returns [`crate::error::RulesError::ComponentUnavailable`] if the
/// selected engine or gyro does not exist for its tech base.
pub fn engine_slot_map(
    catalog: &ComponentCatalog,
    selections: &ComponentSelections,
    context: &UnitContext,
) -> Result<StructuralFootprint> {
    let engine = match component_slots(catalog, selections.get(ComponentCategory::Engine), context)? {
        SlotFootprint::Engine(slots) => slots,
        SlotFootprint::Count(count) => EngineSlots {
            center: u8::try_from(count).unwrap_or(u8::MAX),
            left: 0,
            right: 0,
        },
    };
    let gyro = component_slots(catalog, selections.get(ComponentCategory::Gyro), context)?.total();
    Ok(StructuralFootprint::from_slots(
        engine,
        u8::try_from(gyro).unwrap_or(u8::MAX),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{EngineType, GyroType};
    use crate::tech_base::TechBase;

    fn slots(footprint: &StructuralFootprint, location: MechLocation) -> Vec<u8> {
        footprint.reserved(location).collect()
    }

    #[test]
    fn test_standard_layout() {
        let catalog = ComponentCatalog::standard();
        let footprint =
            engine_slot_map(&catalog, &ComponentSelections::default(), &UnitContext::new(50, 5))
                .unwrap();

        assert_eq!(slots(&footprint, MechLocation::CenterTorso), (0..10).collect::<Vec<_>>());
        assert!(!footprint.reserves_in(MechLocation::LeftTorso));
        assert!(!footprint.reserves_in(MechLocation::RightTorso));
    }

    #[test]
    fn test_xl_engine_reserves_side_torsos() {
        let catalog = ComponentCatalog::standard();
        let selections = ComponentSelections {
            engine: EngineType::ExtraLight,
            ..ComponentSelections::default()
        };
        let footprint = engine_slot_map(&catalog, &selections, &UnitContext::new(50, 5)).unwrap();
        assert_eq!(slots(&footprint, MechLocation::LeftTorso), vec![0, 1, 2]);
        assert_eq!(slots(&footprint, MechLocation::RightTorso), vec![0, 1, 2]);

        let clan = UnitContext::new(50, 5).with_tech_base(TechBase::Clan);
        let footprint = engine_slot_map(&catalog, &selections, &clan).unwrap();
        assert_eq!(footprint.reserved_count(MechLocation::LeftTorso), 2);
    }

    #[test]
    fn test_gyro_sits_between_engine_blocks() {
        let catalog = ComponentCatalog::standard();
        let selections = ComponentSelections {
            gyro: GyroType::ExtraLight,
            ..ComponentSelections::default()
        };
        let footprint = engine_slot_map(&catalog, &selections, &UnitContext::new(50, 5)).unwrap();
        // 3 engine + 6 gyro + 3 engine fills the center torso
        assert_eq!(footprint.reserved_count(MechLocation::CenterTorso), 12);

        let compact = ComponentSelections {
            engine: EngineType::Compact,
            gyro: GyroType::Compact,
            ..ComponentSelections::default()
        };
        let footprint = engine_slot_map(&catalog, &compact, &UnitContext::new(50, 4)).unwrap();
        assert_eq!(slots(&footprint, MechLocation::CenterTorso), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_reserve_ignores_out_of_bounds() {
        let mut footprint = StructuralFootprint::new();
        footprint.reserve(MechLocation::Head, [5, 6, 7]);
        assert_eq!(slots(&footprint, MechLocation::Head), vec![5]);
        footprint.reserve(MechLocation::LeftLeg, [9]);
        assert!(!footprint.reserves_in(MechLocation::LeftLeg));
    }
}
