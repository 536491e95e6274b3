//! Edit pipeline.
//!
//! [`apply_edit`] is a pure transformation: it takes a snapshot and one
//! edit, and returns a new snapshot plus a change log. The input snapshot
//! is never touched. Each edit runs as a single transaction:
//!
//! 1. Tech-base resolution and the edit itself
//! 2. Weight and slot recomputation, including regeneration of the slot
//!    items structural components place in the grid (Endo Steel, Ferro-
//!    Fibrous, external heat sinks, jump jets, MASC, TSM)
//! 3. Displacement, if the engine/gyro footprint changed
//! 4. Placement re-validation of everything still placed
//! 5. Unit-level findings
//!
//! A fatal precondition violation in any step aborts the whole edit and
//! the caller keeps its previous snapshot.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::armor::{armor_points, max_armor_points, optimize, ArmorAllocation};
use crate::calculator::{
    component_slots, heat_sink_split, weight_breakdown, HeatSinkSplit, SlotFootprint,
    WeightBreakdown,
};
use crate::catalog::{ComponentCatalog, SlotRule};
use crate::components::{ComponentCategory, ComponentId, ComponentSelections};
use crate::context::UnitContext;
use crate::displacement::{self, displace, Displacement};
use crate::equipment::{
    direct_fire_tonnage, targeting_computer_size, EquipmentCatalog, InstanceId,
    MountedEquipmentInstance, TargetingComputerSize,
};
use crate::error::{Result, RulesError};
use crate::footprint::{engine_slot_map, StructuralFootprint};
use crate::heat::heat_dissipation;
use crate::location::{MechLocation, TOTAL_CRITICAL_SLOTS};
use crate::math::{fixed_serde, Fixed};
use crate::placement::{first_free_run, occupied_slots, validate, PlacementContext, PlacementReport};
use crate::resolver::{check_category_request, resolve, switch_mode, SelectionMemory};
use crate::tables::structure_points;
use crate::tech_base::{TechBase, TechBaseMode};

/// Complete, immutable state of one unit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    /// Unit-level numbers.
    pub context: UnitContext,
    /// Selected component variants.
    pub selections: ComponentSelections,
    /// Remembered variants per tech base.
    pub memory: SelectionMemory,
    /// Mounted equipment, placed or not.
    pub equipment: Vec<MountedEquipmentInstance>,
    /// Armor points per location.
    pub armor: ArmorAllocation,
    next_instance: u32,
}

impl UnitSnapshot {
    /// Create an Inner Sphere unit with default components and nothing
    /// mounted.
    #[must_use]
    pub fn new(tonnage: u32, walk_mp: u32) -> Self {
        Self::with_context(UnitContext::new(tonnage, walk_mp))
    }

    /// Create a unit with default components from an existing context.
    #[must_use]
    pub fn with_context(context: UnitContext) -> Self {
        Self {
            context,
            selections: ComponentSelections::default(),
            memory: SelectionMemory::new(),
            equipment: Vec::new(),
            armor: ArmorAllocation::new(),
            next_instance: 0,
        }
    }

    /// Look up an instance.
    #[must_use]
    pub fn instance(&self, id: InstanceId) -> Option<&MountedEquipmentInstance> {
        self.equipment.iter().find(|i| i.instance_id == id)
    }

    fn instance_mut(&mut self, id: InstanceId) -> Result<&mut MountedEquipmentInstance> {
        self.equipment
            .iter_mut()
            .find(|i| i.instance_id == id)
            .ok_or(RulesError::UnknownInstance(id))
    }

    fn allocate_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    /// Instances in the unallocated pool.
    pub fn unallocated(&self) -> impl Iterator<Item = &MountedEquipmentInstance> {
        self.equipment.iter().filter(|i| !i.is_placed())
    }

    /// Compute a hash of the complete snapshot.
    ///
    /// Equal snapshots always hash equal; used to check that identical
    /// edit sequences produce identical results.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.serialize().unwrap_or_default().hash(&mut hasher);
        hasher.finish()
    }

    /// Encode the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| RulesError::InvalidState(format!("Failed to serialize snapshot: {e}")))
    }

    /// Decode a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        bincode::deserialize(data)
            .map_err(|e| RulesError::InvalidState(format!("Failed to deserialize snapshot: {e}")))
    }
}

/// One user edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edit {
    /// Select a component variant for its category.
    SelectComponent(ComponentId),
    /// Move one category to another tech base (mixed mode).
    SetCategoryTechBase {
        /// Category to move.
        category: ComponentCategory,
        /// Target tech base.
        tech_base: TechBase,
    },
    /// Switch between single and mixed tech base.
    SetTechBaseMode(TechBaseMode),
    /// Change unit tonnage.
    SetTonnage(u32),
    /// Change walking MP.
    SetWalkMp(u32),
    /// Change jumping MP.
    SetJumpMp(u32),
    /// Change the total heat sink count.
    SetHeatSinkCount(u32),
    /// Change armor tonnage.
    SetArmorTonnage(#[serde(with = "fixed_serde")] Fixed),
    /// Change the construction year.
    SetConstructionYear(u16),
    /// Set one location's armor, clamped to its limits.
    SetLocationArmor {
        /// Location.
        location: MechLocation,
        /// Front points.
        front: u32,
        /// Rear points.
        rear: u32,
    },
    /// Replace the armor allocation with the optimizer's.
    AutoAllocateArmor,
    /// Add an unplaced copy of a catalog item.
    AddEquipment(String),
    /// Place an instance. Without a slot, the lowest free run is used.
    PlaceEquipment {
        /// Instance to place.
        instance: InstanceId,
        /// Target location.
        location: MechLocation,
        /// First slot, or `None` to pick one.
        first_slot: Option<u8>,
        /// Mount facing rearward.
        rear_mounted: bool,
    },
    /// Return an instance to the unallocated pool.
    UnplaceEquipment(InstanceId),
    /// Remove an instance from the unit.
    RemoveEquipment(InstanceId),
    /// Link a weapon to an ammunition instance, or clear the link.
    LinkAmmo {
        /// Weapon instance.
        weapon: InstanceId,
        /// Ammunition instance.
        ammo: Option<InstanceId>,
    },
}

/// Catalogs injected into every pipeline call.
#[derive(Clone, Copy)]
pub struct Catalogs<'a> {
    /// Structural component catalog.
    pub components: &'a ComponentCatalog,
    /// Equipment lookup.
    pub equipment: &'a dyn EquipmentCatalog,
}

/// Rule-derived values for a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedValues {
    /// Engine rating.
    pub engine_rating: u32,
    /// Engine-integrated versus external heat sinks.
    pub heat_sinks: HeatSinkSplit,
    /// Heat dissipated per turn.
    pub heat_dissipation: u32,
    /// Structural weights.
    pub weights: WeightBreakdown,
    /// Weight of mounted equipment.
    #[serde(with = "fixed_serde")]
    pub equipment_weight: Fixed,
    /// Structure plus equipment.
    #[serde(with = "fixed_serde")]
    pub total_weight: Fixed,
    /// Tonnage left; negative when overweight.
    #[serde(with = "fixed_serde")]
    pub remaining_tonnage: Fixed,
    /// Slot cost per category.
    pub component_slots: BTreeMap<ComponentCategory, SlotFootprint>,
    /// Engine and gyro slots.
    pub footprint: StructuralFootprint,
    /// Armor points bought by the armor tonnage, capped at the maximum.
    pub armor_points_available: u32,
    /// Maximum armor points for the tonnage.
    pub armor_points_max: u32,
    /// Armor points allocated to locations.
    pub armor_points_allocated: u32,
    /// Energy and ballistic weapon tonnage.
    #[serde(with = "fixed_serde")]
    pub direct_fire_tonnage: Fixed,
    /// Targeting computer sized for the current weapons.
    pub targeting_computer: TargetingComputerSize,
}

/// A finding about the unit as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitFinding {
    /// Unit weighs more than its tonnage.
    OverTonnage {
        /// Total weight.
        #[serde(with = "fixed_serde")]
        total: Fixed,
        /// Unit tonnage.
        limit: u32,
    },
    /// Instances waiting in the unallocated pool.
    UnallocatedEquipment {
        /// Unplaced instances.
        instances: Vec<InstanceId>,
    },
    /// Component not available in the construction year.
    ComponentNotYetIntroduced {
        /// Component.
        component: ComponentId,
        /// Year it appears.
        introduced: u16,
        /// Unit construction year.
        construction_year: u16,
    },
    /// Armor allocation was cut to fit new limits.
    ArmorReduced {
        /// Points before.
        from: u32,
        /// Points after.
        to: u32,
    },
}

/// Result of one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// New snapshot.
    pub snapshot: UnitSnapshot,
    /// Derived values of the new snapshot.
    pub derived: DerivedValues,
    /// Instances displaced by a footprint change.
    pub displaced: Displacement,
    /// Instance created by the edit, if any.
    pub created: Option<InstanceId>,
    /// Placement findings per placed instance; clean instances are omitted.
    pub findings: BTreeMap<InstanceId, PlacementReport>,
    /// Unit-level findings.
    pub unit_findings: Vec<UnitFinding>,
}

impl EditOutcome {
    /// Whether every placement is legal.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.findings.values().all(PlacementReport::is_legal)
    }
}

/// Apply one edit to a snapshot.
///
/// # Errors
///
/// Returns the first fatal precondition violation: unsupported tonnage or
/// engine rating, unavailable components, unknown equipment or instances,
/// removal of fixed instances, or a per-category tech base request the
/// current mode forbids. Jump MP above walk MP, and heat sinks or jump jets
/// needing more critical slots than the unit has, are rejected as well.
pub fn apply_edit(snapshot: &UnitSnapshot, edit: &Edit, catalogs: &Catalogs<'_>) -> Result<EditOutcome> {
    let old_footprint = engine_slot_map(catalogs.components, &snapshot.selections, &snapshot.context)?;

    let mut next = snapshot.clone();
    let created = apply_change(&mut next, edit, catalogs)?;
    let mut outcome = settle(next, &old_footprint, catalogs)?;
    outcome.created = created;

    tracing::debug!(
        ?edit,
        displaced = outcome.displaced.displaced.len(),
        findings = outcome.findings.len(),
        unit_findings = outcome.unit_findings.len(),
        state_hash = outcome.snapshot.state_hash(),
        "Applied edit"
    );
    Ok(outcome)
}

/// Run recomputation, re-validation and findings on a snapshot without
/// changing anything the user chose.
///
/// # Errors
///
/// Same as [`apply_edit`].
pub fn evaluate(snapshot: &UnitSnapshot, catalogs: &Catalogs<'_>) -> Result<EditOutcome> {
    let footprint = engine_slot_map(catalogs.components, &snapshot.selections, &snapshot.context)?;
    settle(snapshot.clone(), &footprint, catalogs)
}

/// Compute the derived values of a snapshot.
///
/// # Errors
///
/// Propagates calculator precondition violations.
pub fn derive(snapshot: &UnitSnapshot, components: &ComponentCatalog) -> Result<DerivedValues> {
    let context = &snapshot.context;
    let weights = weight_breakdown(components, &snapshot.selections, context)?;
    let equipment_weight = snapshot
        .equipment
        .iter()
        .fold(Fixed::ZERO, |total, instance| total + instance.weight);
    let total_weight = weights.total() + equipment_weight;

    let mut slots = BTreeMap::new();
    for id in snapshot.selections.iter() {
        slots.insert(id.category(), component_slots(components, id, context)?);
    }

    let armor_points_max = max_armor_points(context.tonnage)?;
    let direct_fire = direct_fire_tonnage(&snapshot.equipment);

    Ok(DerivedValues {
        engine_rating: context.engine_rating,
        heat_sinks: heat_sink_split(context.engine_rating, context.heat_sink_count),
        heat_dissipation: heat_dissipation(snapshot.selections.heat_sink, context.heat_sink_count),
        weights,
        equipment_weight,
        total_weight,
        remaining_tonnage: Fixed::from_num(context.tonnage) - total_weight,
        component_slots: slots,
        footprint: engine_slot_map(components, &snapshot.selections, context)?,
        armor_points_available: available_armor_points(snapshot, components)?,
        armor_points_max,
        armor_points_allocated: snapshot.armor.total(),
        direct_fire_tonnage: direct_fire,
        targeting_computer: targeting_computer_size(
            direct_fire,
            context.tech_base_mode.single().unwrap_or_default(),
        ),
    })
}

/// Armor points the current armor tonnage buys, capped at the maximum.
fn available_armor_points(snapshot: &UnitSnapshot, components: &ComponentCatalog) -> Result<u32> {
    let context = &snapshot.context;
    let bought = armor_points(
        components,
        snapshot.selections.armor,
        context.tech_base_for(ComponentCategory::Armor),
        context.armor_tonnage,
    )?;
    Ok(bought.min(max_armor_points(context.tonnage)?))
}

/// Step 1: resolve tech bases and apply the edit.
fn apply_change(next: &mut UnitSnapshot, edit: &Edit, catalogs: &Catalogs<'_>) -> Result<Option<InstanceId>> {
    let components = catalogs.components;
    match edit {
        Edit::SelectComponent(id) => {
            components.require(*id, next.context.tech_base_for(id.category()))?;
            next.selections.set(*id);
        }
        Edit::SetCategoryTechBase {
            category,
            tech_base,
        } => {
            check_category_request(next.context.tech_base_mode, *category, *tech_base)?;
            let resolution = resolve(
                components,
                *category,
                *tech_base,
                &next.selections,
                &next.context.category_tech_bases,
                &next.memory,
            )?;
            next.selections.set(resolution.selection);
            next.context.category_tech_bases.set(*category, *tech_base);
            next.memory = resolution.memory;
        }
        Edit::SetTechBaseMode(mode) => {
            let switched = switch_mode(
                components,
                *mode,
                &next.selections,
                &next.context.category_tech_bases,
                &next.memory,
            )?;
            next.selections = switched.selections;
            next.context.category_tech_bases = switched.category_tech_bases;
            next.context.tech_base_mode = *mode;
            next.memory = switched.memory;
        }
        Edit::SetTonnage(tonnage) => {
            structure_points(*tonnage)?;
            next.context.tonnage = *tonnage;
        }
        Edit::SetWalkMp(walk_mp) => next.context.walk_mp = *walk_mp,
        Edit::SetJumpMp(jump_mp) => next.context.jump_mp = *jump_mp,
        Edit::SetHeatSinkCount(count) => next.context.heat_sink_count = *count,
        Edit::SetArmorTonnage(tons) => next.context.armor_tonnage = (*tons).max(Fixed::ZERO),
        Edit::SetConstructionYear(year) => next.context.construction_year = *year,
        Edit::SetLocationArmor {
            location,
            front,
            rear,
        } => {
            let budget = available_armor_points(next, components)?;
            let tonnage = next.context.tonnage;
            next.armor
                .set_clamped(*location, *front, *rear, tonnage, budget)?;
        }
        Edit::AutoAllocateArmor => {
            let budget = available_armor_points(next, components)?;
            next.armor = optimize(budget, next.context.tonnage)?;
        }
        Edit::AddEquipment(equipment_id) => {
            let definition = catalogs
                .equipment
                .by_id(equipment_id)
                .ok_or_else(|| RulesError::UnknownEquipment(equipment_id.clone()))?;
            let instance_id = next.allocate_id();
            next.equipment
                .push(MountedEquipmentInstance::from_definition(instance_id, definition));
            return Ok(Some(instance_id));
        }
        Edit::PlaceEquipment {
            instance,
            location,
            first_slot,
            rear_mounted,
        } => {
            let length = next
                .instance(*instance)
                .ok_or(RulesError::UnknownInstance(*instance))?
                .critical_slots;
            let first = match first_slot {
                Some(slot) => *slot,
                None => {
                    let footprint = engine_slot_map(components, &next.selections, &next.context)?;
                    let occupied = occupied_slots(*location, &footprint, &next.equipment, *instance);
                    // a full location still gets a placement so the validator can report it
                    first_free_run(*location, &occupied, length).unwrap_or(0)
                }
            };
            next.instance_mut(*instance)?
                .place(*location, first, *rear_mounted);
        }
        Edit::UnplaceEquipment(instance) => next.instance_mut(*instance)?.unplace(),
        Edit::RemoveEquipment(instance) => {
            if !next.instance_mut(*instance)?.is_removable {
                return Err(RulesError::InstanceNotRemovable(*instance));
            }
            next.equipment.retain(|i| i.instance_id != *instance);
            for other in &mut next.equipment {
                if other.linked_ammo == Some(*instance) {
                    other.linked_ammo = None;
                }
            }
        }
        Edit::LinkAmmo { weapon, ammo } => {
            if let Some(ammo) = ammo {
                next.instance(*ammo).ok_or(RulesError::UnknownInstance(*ammo))?;
            }
            next.instance_mut(*weapon)?.linked_ammo = *ammo;
        }
    }
    Ok(None)
}

/// Standard jump jets cannot out-jump the walking speed.
fn check_movement(context: &UnitContext) -> Result<()> {
    if context.jump_mp > context.walk_mp {
        return Err(RulesError::JumpMpExceedsWalk {
            jump_mp: context.jump_mp,
            walk_mp: context.walk_mp,
        });
    }
    Ok(())
}

/// Slot items one structural component places in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotItemSpec {
    component: ComponentId,
    tech_base: TechBase,
    slots_each: u32,
    count: u32,
}

fn slot_item_specs(
    components: &ComponentCatalog,
    selections: &ComponentSelections,
    context: &UnitContext,
) -> Result<Vec<SlotItemSpec>> {
    let mut specs = Vec::new();
    for id in selections.iter() {
        // engine and gyro slots are the structural footprint, not items
        if matches!(id.category(), ComponentCategory::Engine | ComponentCategory::Gyro) {
            continue;
        }
        let tech_base = context.tech_base_for(id.category());
        let definition = components.require(id, tech_base)?;
        let total = component_slots(components, id, context)?.total();
        if total > TOTAL_CRITICAL_SLOTS {
            return Err(RulesError::ExceedsCriticalSlots {
                component: id,
                required: total,
                available: TOTAL_CRITICAL_SLOTS,
            });
        }
        let (slots_each, count) = match definition.slot_rule {
            SlotRule::PerExternalHeatSink(per) | SlotRule::PerJumpJet(per) => {
                (per, total / per.max(1))
            }
            SlotRule::EqualsWeight => (total, u32::from(total > 0)),
            SlotRule::Fixed(_) => (1, total),
            SlotRule::None | SlotRule::Engine { .. } => continue,
        };
        if slots_each > 0 && count > 0 {
            specs.push(SlotItemSpec {
                component: id,
                tech_base,
                slots_each,
                count,
            });
        }
    }
    Ok(specs)
}

/// Bring generated slot items in line with the specs. Matching items are
/// kept with their placements, placed ones first; the rest are dropped and
/// missing ones are added unplaced.
fn reconcile_slot_items(snapshot: &mut UnitSnapshot, specs: &[SlotItemSpec]) {
    let mut keep = BTreeSet::new();
    let mut missing = Vec::new();

    for spec in specs {
        let mut matching: Vec<&MountedEquipmentInstance> = snapshot
            .equipment
            .iter()
            .filter(|i| {
                i.source_component == Some(spec.component)
                    && i.tech_base == spec.tech_base
                    && i.critical_slots == spec.slots_each
            })
            .collect();
        matching.sort_by_key(|i| (!i.is_placed(), i.instance_id));

        let wanted = usize::try_from(spec.count).unwrap_or(usize::MAX);
        keep.extend(matching.iter().take(wanted).map(|i| i.instance_id));
        missing.push((*spec, wanted.saturating_sub(matching.len())));
    }

    let before = snapshot.equipment.len();
    snapshot
        .equipment
        .retain(|i| !i.is_component_slot() || keep.contains(&i.instance_id));
    let dropped = before - snapshot.equipment.len();

    let mut added = 0;
    for (spec, count) in missing {
        for _ in 0..count {
            let id = snapshot.allocate_id();
            snapshot.equipment.push(MountedEquipmentInstance::component_slot(
                id,
                spec.component,
                spec.slots_each,
                spec.tech_base,
            ));
            added += 1;
        }
    }

    if dropped > 0 || added > 0 {
        tracing::trace!(dropped, added, "Regenerated component slot items");
    }
}

fn revalidate(snapshot: &UnitSnapshot, catalogs: &Catalogs<'_>) -> BTreeMap<InstanceId, PlacementReport> {
    let context = PlacementContext {
        unit: &snapshot.context,
        selections: &snapshot.selections,
        loadout: &snapshot.equipment,
        components: catalogs.components,
        equipment: catalogs.equipment,
    };
    snapshot
        .equipment
        .iter()
        .filter_map(|instance| {
            let location = instance.location()?;
            let report = validate(instance, location, &context);
            (!report.is_clean()).then_some((instance.instance_id, report))
        })
        .collect()
}

/// Steps 2 to 5.
fn settle(
    mut next: UnitSnapshot,
    old_footprint: &StructuralFootprint,
    catalogs: &Catalogs<'_>,
) -> Result<EditOutcome> {
    let components = catalogs.components;
    let mut unit_findings = Vec::new();

    // Recompute
    next.context.refresh_engine_rating();
    check_movement(&next.context)?;
    let specs = slot_item_specs(components, &next.selections, &next.context)?;
    weight_breakdown(components, &next.selections, &next.context)?;
    reconcile_slot_items(&mut next, &specs);

    let budget = available_armor_points(&next, components)?;
    if !next.armor.is_within(next.context.tonnage, budget)? {
        let from = next.armor.total();
        next.armor = next.armor.clamp_to(next.context.tonnage, budget)?;
        unit_findings.push(UnitFinding::ArmorReduced {
            from,
            to: next.armor.total(),
        });
    }

    // Displace
    let footprint = engine_slot_map(components, &next.selections, &next.context)?;
    let displaced = if footprint == *old_footprint {
        Displacement::default()
    } else {
        let displaced = displace(&next.equipment, old_footprint, &footprint);
        displacement::apply(&mut next.equipment, &displaced);
        displaced
    };

    // Re-validate
    let findings = revalidate(&next, catalogs);

    // Unit findings
    let derived = derive(&next, components)?;
    let limit = next.context.tonnage;
    if derived.total_weight > Fixed::from_num(limit) {
        unit_findings.push(UnitFinding::OverTonnage {
            total: derived.total_weight,
            limit,
        });
    }
    let unplaced: Vec<InstanceId> = next.unallocated().map(|i| i.instance_id).collect();
    if !unplaced.is_empty() {
        unit_findings.push(UnitFinding::UnallocatedEquipment { instances: unplaced });
    }
    let construction_year = next.context.construction_year;
    for id in next.selections.iter() {
        let definition = components.require(id, next.context.tech_base_for(id.category()))?;
        if !definition.is_introduced_by(construction_year) {
            unit_findings.push(UnitFinding::ComponentNotYetIntroduced {
                component: id,
                introduced: definition.introduction_year,
                construction_year,
            });
        }
    }

    #[cfg(feature = "debug-validation")]
    check_invariants(&next, &displaced, budget);

    Ok(EditOutcome {
        snapshot: next,
        derived,
        displaced,
        created: None,
        findings,
        unit_findings,
    })
}

#[cfg(feature = "debug-validation")]
fn check_invariants(snapshot: &UnitSnapshot, displaced: &Displacement, armor_budget: u32) {
    for instance in &snapshot.equipment {
        if let Some(placement) = instance.placement() {
            assert_eq!(
                placement.slot_indices().len(),
                instance.critical_slots as usize,
                "partial placement of {}",
                instance.instance_id
            );
        }
        assert!(
            !displaced.contains(instance.instance_id) || !instance.is_placed(),
            "displaced instance {} is still placed",
            instance.instance_id
        );
    }
    assert!(snapshot.armor.total() <= armor_budget, "armor over budget");
}
