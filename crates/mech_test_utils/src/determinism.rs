//! Determinism testing utilities.
//!
//! Provides a harness for verifying that the edit pipeline
//! produces identical snapshots given identical inputs.
//!
//! # Testing Strategy
//!
//! Unit files are shared between editors and servers, so replaying the
//! same edits must always give the same unit. Sources of non-determinism
//! include:
//!
//! - **Floating-point math**: Rounding can differ between targets.
//!   Rule math uses integer half tons and [`mech_core::math::Fixed`].
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   Every collection in a snapshot is ordered.
//!
//! - **Shared mutable state**: The catalogs are passed in by reference and
//!   never mutated, so parallel runs cannot influence each other.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: Individual rules (weights, slots, placement)
//! 2. **Property tests**: Random edit sequences still replay identically
//! 3. **Integration tests**: Full construction scenarios are reproducible
//! 4. **Parallel tests**: Replaying on N threads gives N equal hashes

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use mech_core::pipeline::{Edit, UnitSnapshot};

use crate::fixtures::Workbench;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of steps applied per run.
    pub steps: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic pipeline).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that all runs matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Edit pipeline is non-deterministic!\n\
                 Runs: {}\n\
                 Steps: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.steps,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a stepped computation multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of times to run
/// * `steps` - Number of steps per run
/// * `setup` - Function to create the initial state
/// * `step` - Function to advance the state by one step
/// * `hash` - Function to compute the state hash
///
/// # Example
///
/// ```ignore
/// use mech_test_utils::determinism::verify_determinism;
///
/// let result = verify_determinism(3, 100, || 0u64, |n| *n += 1, |n| *n);
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    steps: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S, u64),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for index in 0..steps {
            step(&mut state, index);
        }

        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        steps,
    }
}

/// Replay an edit sequence and return the final snapshot.
///
/// Rejected edits leave the snapshot unchanged, the same way an editor
/// keeps its previous state when an edit fails.
#[must_use]
pub fn replay(workbench: &Workbench, start: &UnitSnapshot, edits: &[Edit]) -> UnitSnapshot {
    edits
        .iter()
        .fold(start.clone(), |snapshot, edit| workbench.apply_lenient(&snapshot, edit))
}

/// Replay an edit sequence twice and verify the final hashes match.
#[must_use]
pub fn verify_edit_determinism(workbench: &Workbench, start: &UnitSnapshot, edits: &[Edit]) -> DeterminismResult {
    verify_determinism(
        2,
        edits.len() as u64,
        || start.clone(),
        |snapshot, index| {
            let edit = &edits[usize::try_from(index).unwrap_or(usize::MAX)];
            *snapshot = workbench.apply_lenient(snapshot, edit);
        },
        UnitSnapshot::state_hash,
    )
}

/// Result of parallel replays.
#[derive(Debug, Clone)]
pub struct ParallelReplayResult {
    /// Final state hash from each replay.
    pub hashes: Vec<u64>,
    /// Number of edits each replay applied.
    pub edits: usize,
}

impl ParallelReplayResult {
    /// Check if all replays produced identical results.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.hashes.windows(2).all(|w| w[0] == w[1])
    }

    /// Assert all replays matched.
    ///
    /// # Panics
    ///
    /// Panics if replays produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic() {
            panic!(
                "Parallel replays diverged!\n\
                 Replays: {}\n\
                 Edits: {}\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.edits,
                self.hashes
            );
        }
    }
}

/// Replay the same edits on `num_replays` scoped threads sharing one
/// workbench.
///
/// # Panics
///
/// Panics if a replay thread panics.
pub fn run_parallel_replays(
    workbench: &Workbench,
    start: &UnitSnapshot,
    edits: &[Edit],
    num_replays: usize,
) -> ParallelReplayResult {
    let hashes = thread::scope(|s| {
        let handles: Vec<_> = (0..num_replays)
            .map(|_| s.spawn(|| replay(workbench, start, edits).state_hash()))
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    ParallelReplayResult {
        hashes,
        edits: edits.len(),
    }
}

/// Replay two copies edit-by-edit, finding the first divergence.
///
/// # Returns
///
/// `None` if the replays agree, `Some(n)` if they differ after `n` edits.
#[must_use]
pub fn find_first_divergence(workbench: &Workbench, start: &UnitSnapshot, edits: &[Edit]) -> Option<usize> {
    let mut first = start.clone();
    let mut second = start.clone();

    if first.state_hash() != second.state_hash() {
        return Some(0);
    }

    for (index, edit) in edits.iter().enumerate() {
        first = workbench.apply_lenient(&first, edit);
        second = workbench.apply_lenient(&second, edit);

        if first.state_hash() != second.state_hash() {
            return Some(index + 1);
        }
    }

    None
}

/// Verify that a serialization round-trip preserves a snapshot exactly.
#[must_use]
pub fn verify_serialization_determinism(snapshot: &UnitSnapshot) -> bool {
    let Ok(bytes) = snapshot.serialize() else {
        return false;
    };
    let Ok(restored) = UnitSnapshot::deserialize(&bytes) else {
        return false;
    };
    restored == *snapshot && restored.state_hash() == snapshot.state_hash()
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for construction testing.
///
/// These strategies generate random but reproducible units and edit
/// sequences for property-based testing.
pub mod strategies {
    use mech_core::components::{
        ArmorType, ComponentId, EngineType, EnhancementType, GyroType, HeatSinkType,
        JumpJetType, StructureType,
    };
    use mech_core::equipment::InstanceId;
    use mech_core::location::MechLocation;
    use mech_core::math::{from_half_tons, Fixed};
    use mech_core::pipeline::Edit;
    use mech_core::tech_base::{TechBase, TechBaseMode};
    use proptest::prelude::*;

    /// Equipment ids the strategies draw from.
    pub const EQUIPMENT_IDS: [&str; 10] = [
        "medium-laser",
        "large-laser",
        "ac-10",
        "lrm-10",
        "srm-6",
        "ac-10-ammo",
        "guardian-ecm",
        "case",
        "artemis-iv",
        "clan-er-medium-laser",
    ];

    /// Generate a supported tonnage (20 to 100 in steps of 5).
    pub fn arb_tonnage() -> impl Strategy<Value = u32> {
        (4u32..=20u32).prop_map(|step| step * 5)
    }

    /// Generate walk MP (1-8).
    pub fn arb_walk_mp() -> impl Strategy<Value = u32> {
        1u32..=8u32
    }

    /// Generate armor tonnage in half tons (0-25 tons).
    pub fn arb_armor_tonnage() -> impl Strategy<Value = Fixed> {
        (0u32..=50u32).prop_map(from_half_tons)
    }

    /// Generate a tech base.
    pub fn arb_tech_base() -> impl Strategy<Value = TechBase> {
        prop_oneof![Just(TechBase::InnerSphere), Just(TechBase::Clan)]
    }

    /// Generate a mech location.
    pub fn arb_location() -> impl Strategy<Value = MechLocation> {
        proptest::sample::select(MechLocation::ALL.to_vec())
    }

    /// Generate any component variant, available or not.
    pub fn arb_component() -> impl Strategy<Value = ComponentId> {
        proptest::sample::select(vec![
            ComponentId::Engine(EngineType::Standard),
            ComponentId::Engine(EngineType::ExtraLight),
            ComponentId::Engine(EngineType::Light),
            ComponentId::Engine(EngineType::ExtraExtraLight),
            ComponentId::Engine(EngineType::Compact),
            ComponentId::Gyro(GyroType::Standard),
            ComponentId::Gyro(GyroType::ExtraLight),
            ComponentId::Gyro(GyroType::Compact),
            ComponentId::Gyro(GyroType::HeavyDuty),
            ComponentId::Structure(StructureType::Standard),
            ComponentId::Structure(StructureType::EndoSteel),
            ComponentId::Armor(ArmorType::Standard),
            ComponentId::Armor(ArmorType::FerroFibrous),
            ComponentId::HeatSink(HeatSinkType::Single),
            ComponentId::HeatSink(HeatSinkType::Double),
            ComponentId::HeatSink(HeatSinkType::Laser),
            ComponentId::JumpJet(JumpJetType::Standard),
            ComponentId::JumpJet(JumpJetType::Improved),
            ComponentId::Enhancement(EnhancementType::None),
            ComponentId::Enhancement(EnhancementType::Masc),
            ComponentId::Enhancement(EnhancementType::TripleStrengthMyomer),
        ])
    }

    /// Generate a placement edit for one of the first instances.
    pub fn arb_place_edit() -> impl Strategy<Value = Edit> {
        (
            0u32..24u32,
            arb_location(),
            proptest::option::of(0u8..12u8),
            any::<bool>(),
        )
            .prop_map(|(instance, location, first_slot, rear_mounted)| Edit::PlaceEquipment {
                instance: InstanceId(instance),
                location,
                first_slot,
                rear_mounted,
            })
    }

    /// Generate any edit. Some of them will be rejected, which is part of
    /// what the properties exercise.
    pub fn arb_edit() -> impl Strategy<Value = Edit> {
        prop_oneof![
            arb_component().prop_map(Edit::SelectComponent),
            arb_tech_base().prop_map(|tb| Edit::SetTechBaseMode(TechBaseMode::Single(tb))),
            Just(Edit::SetTechBaseMode(TechBaseMode::Mixed)),
            arb_tonnage().prop_map(Edit::SetTonnage),
            arb_walk_mp().prop_map(Edit::SetWalkMp),
            (0u32..=6u32).prop_map(Edit::SetJumpMp),
            (10u32..=20u32).prop_map(Edit::SetHeatSinkCount),
            arb_armor_tonnage().prop_map(Edit::SetArmorTonnage),
            Just(Edit::AutoAllocateArmor),
            proptest::sample::select(EQUIPMENT_IDS.to_vec())
                .prop_map(|id| Edit::AddEquipment(id.to_string())),
            arb_place_edit(),
            (0u32..24u32).prop_map(|id| Edit::UnplaceEquipment(InstanceId(id))),
            (0u32..24u32).prop_map(|id| Edit::RemoveEquipment(InstanceId(id))),
        ]
    }

    /// Generate counts weighted toward the edges of `u32`.
    pub fn arb_extreme_count() -> impl Strategy<Value = u32> {
        prop_oneof![
            Just(0u32),
            0u32..=100u32,
            Just(88u32),
            Just(89u32),
            Just(200_000u32),
            Just(u32::MAX),
            any::<u32>(),
        ]
    }

    /// Generate armor tonnage across the whole `Fixed` range.
    pub fn arb_extreme_armor_tonnage() -> impl Strategy<Value = Fixed> {
        prop_oneof![
            Just(Fixed::ZERO),
            Just(Fixed::MAX),
            Just(Fixed::MIN),
            Just(Fixed::from_num(1_500_000_000)),
            any::<i64>().prop_map(Fixed::from_bits),
        ]
    }

    /// Generate numeric edits over their full input range.
    pub fn arb_numeric_edit() -> impl Strategy<Value = Edit> {
        prop_oneof![
            arb_extreme_count().prop_map(Edit::SetTonnage),
            arb_extreme_count().prop_map(Edit::SetWalkMp),
            arb_extreme_count().prop_map(Edit::SetJumpMp),
            arb_extreme_count().prop_map(Edit::SetHeatSinkCount),
            arb_extreme_armor_tonnage().prop_map(Edit::SetArmorTonnage),
            any::<u16>().prop_map(Edit::SetConstructionYear),
            (arb_location(), arb_extreme_count(), arb_extreme_count()).prop_map(
                |(location, front, rear)| Edit::SetLocationArmor {
                    location,
                    front,
                    rear,
                }
            ),
            Just(Edit::AutoAllocateArmor),
            (0u32..24u32, arb_location(), proptest::option::of(any::<u8>())).prop_map(
                |(instance, location, first_slot)| Edit::PlaceEquipment {
                    instance: InstanceId(instance),
                    location,
                    first_slot,
                    rear_mounted: false,
                }
            ),
        ]
    }

    /// Generate a sequence of edits.
    pub fn arb_edit_sequence(max_len: usize) -> impl Strategy<Value = Vec<Edit>> {
        proptest::collection::vec(arb_edit(), 0..max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{armed_medium_mech, fixed, medium_mech};
    use mech_core::components::{ComponentId, EngineType};
    use mech_core::location::MechLocation;
    use proptest::prelude::*;

    #[test]
    fn test_verify_determinism_simple() {
        let result = verify_determinism(3, 100, || 0u64, |n, _| *n += 1, |n| *n);

        assert!(result.is_deterministic);
        assert_eq!(result.hashes, vec![100, 100, 100]);
    }

    #[test]
    fn test_fixed_sequence_replays_identically() {
        let workbench = Workbench::new();
        let edits = vec![
            Edit::SetArmorTonnage(fixed(9)),
            Edit::AutoAllocateArmor,
            Edit::AddEquipment("ac-10".to_string()),
            Edit::PlaceEquipment {
                instance: mech_core::equipment::InstanceId(0),
                location: MechLocation::LeftTorso,
                first_slot: None,
                rear_mounted: false,
            },
            Edit::SelectComponent(ComponentId::Engine(EngineType::ExtraLight)),
        ];
        verify_edit_determinism(&workbench, &medium_mech(), &edits).assert_deterministic();
        assert_eq!(find_first_divergence(&workbench, &medium_mech(), &edits), None);
    }

    #[test]
    fn test_parallel_replays_match() {
        let workbench = Workbench::new();
        let edits = vec![
            Edit::SelectComponent(ComponentId::Engine(EngineType::ExtraLight)),
            Edit::SetTonnage(65),
        ];
        run_parallel_replays(&workbench, &armed_medium_mech(&workbench), &edits, 4).assert_deterministic();
    }

    #[test]
    fn test_serialization_preserves_loaded_unit() {
        let workbench = Workbench::new();
        assert!(verify_serialization_determinism(&armed_medium_mech(&workbench)));
    }

    #[test]
    fn test_compute_hash_is_stable() {
        assert_eq!(compute_hash(&(50u32, 5u32)), compute_hash(&(50u32, 5u32)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_random_edits_replay_identically(edits in strategies::arb_edit_sequence(24)) {
            let workbench = Workbench::new();
            let result = verify_edit_determinism(&workbench, &medium_mech(), &edits);
            prop_assert!(result.is_deterministic, "hashes: {:?}", result.hashes);
        }
    }
}
