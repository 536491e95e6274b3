//! Test fixtures and helpers.
//!
//! The bundled equipment catalog, a workbench holding both catalogs, and
//! pre-built units for consistent testing.

use fixed::types::I32F32;
use mech_core::catalog::ComponentCatalog;
use mech_core::equipment::{EquipmentRegistry, InstanceId};
use mech_core::location::MechLocation;
use mech_core::pipeline::{apply_edit, evaluate, Catalogs, Edit, EditOutcome, UnitSnapshot};

/// Equipment catalog shipped in `assets/data`.
pub const EQUIPMENT_RON: &str = include_str!("../../../assets/data/equipment.ron");

/// Create a fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> I32F32 {
    I32F32::from_num(n)
}

/// Create a fixed-point number from a float (for tests only).
///
/// Note: In real rule code, never use floats.
/// This is only for convenient test setup.
#[must_use]
pub fn fixed_f(n: f64) -> I32F32 {
    I32F32::from_num(n)
}

/// Parse the bundled equipment catalog.
///
/// # Panics
///
/// Panics if the bundled catalog is malformed.
#[must_use]
pub fn equipment_registry() -> EquipmentRegistry {
    EquipmentRegistry::from_ron_str("equipment.ron", EQUIPMENT_RON)
        .expect("bundled equipment catalog should parse")
}

/// Both catalogs, owned, with panicking edit helpers for tests.
#[derive(Debug, Clone)]
pub struct Workbench {
    /// Standard component catalog.
    pub components: ComponentCatalog,
    /// Bundled equipment catalog.
    pub equipment: EquipmentRegistry,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

impl Workbench {
    /// Load the standard component catalog and the bundled equipment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: ComponentCatalog::standard(),
            equipment: equipment_registry(),
        }
    }

    /// Borrow both catalogs for a pipeline call.
    #[must_use]
    pub fn catalogs(&self) -> Catalogs<'_> {
        Catalogs {
            components: &self.components,
            equipment: &self.equipment,
        }
    }

    /// Apply an edit that must succeed.
    ///
    /// # Panics
    ///
    /// Panics if the edit is rejected.
    #[must_use]
    pub fn apply(&self, snapshot: &UnitSnapshot, edit: Edit) -> EditOutcome {
        match apply_edit(snapshot, &edit, &self.catalogs()) {
            Ok(outcome) => outcome,
            Err(error) => panic!("{edit:?} was rejected: {error}"),
        }
    }

    /// Apply a sequence of edits that must all succeed.
    ///
    /// # Panics
    ///
    /// Panics if any edit is rejected.
    #[must_use]
    pub fn apply_all(&self, snapshot: &UnitSnapshot, edits: impl IntoIterator<Item = Edit>) -> UnitSnapshot {
        edits
            .into_iter()
            .fold(snapshot.clone(), |current, edit| self.apply(&current, edit).snapshot)
    }

    /// Apply an edit, keeping the previous snapshot if it is rejected.
    #[must_use]
    pub fn apply_lenient(&self, snapshot: &UnitSnapshot, edit: &Edit) -> UnitSnapshot {
        apply_edit(snapshot, edit, &self.catalogs())
            .map_or_else(|_| snapshot.clone(), |outcome| outcome.snapshot)
    }

    /// Evaluate a snapshot that must be computable.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot violates a precondition.
    #[must_use]
    pub fn evaluate(&self, snapshot: &UnitSnapshot) -> EditOutcome {
        match evaluate(snapshot, &self.catalogs()) {
            Ok(outcome) => outcome,
            Err(error) => panic!("snapshot could not be evaluated: {error}"),
        }
    }

    /// Add a catalog item and place it.
    ///
    /// # Panics
    ///
    /// Panics if either edit is rejected.
    #[must_use]
    pub fn mount(
        &self,
        snapshot: &UnitSnapshot,
        equipment_id: &str,
        location: MechLocation,
        first_slot: Option<u8>,
    ) -> (UnitSnapshot, InstanceId) {
        let added = self.apply(snapshot, Edit::AddEquipment(equipment_id.to_string()));
        let instance = added
            .created
            .expect("adding equipment should create an instance");
        let placed = self.apply(
            &added.snapshot,
            Edit::PlaceEquipment {
                instance,
                location,
                first_slot,
                rear_mounted: false,
            },
        );
        (placed.snapshot, instance)
    }
}

/// 50-ton, walk 5 unit with default components.
#[must_use]
pub fn medium_mech() -> UnitSnapshot {
    UnitSnapshot::new(50, 5)
}

/// 20-ton, walk 6 unit.
#[must_use]
pub fn light_mech() -> UnitSnapshot {
    UnitSnapshot::new(20, 6)
}

/// 100-ton, walk 3 unit.
#[must_use]
pub fn assault_mech() -> UnitSnapshot {
    UnitSnapshot::new(100, 3)
}

/// 50-ton unit with 8 tons of armor spread by the optimizer and a small
/// loadout: an LRM 10 with ammunition in the right torso and two medium
/// lasers in the arms.
///
/// # Panics
///
/// Panics if the bundled catalog lacks the loadout items.
#[must_use]
pub fn armed_medium_mech(workbench: &Workbench) -> UnitSnapshot {
    let snapshot = workbench.apply_all(
        &medium_mech(),
        [Edit::SetArmorTonnage(fixed(8)), Edit::AutoAllocateArmor],
    );
    let (snapshot, _) = workbench.mount(&snapshot, "lrm-10", MechLocation::RightTorso, Some(0));
    let (snapshot, _) = workbench.mount(&snapshot, "lrm-10-ammo", MechLocation::RightTorso, Some(2));
    let (snapshot, _) = workbench.mount(&snapshot, "medium-laser", MechLocation::LeftArm, None);
    let (snapshot, _) = workbench.mount(&snapshot, "medium-laser", MechLocation::RightArm, None);
    snapshot
}
