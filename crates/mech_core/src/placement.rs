//! Placement validation.
//!
//! [`validate`] never fails. Every rule is evaluated and contributes its
//! findings independently, so callers always get the complete picture. A
//! placement is illegal only if at least one finding is
//! [`Severity::Critical`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::ComponentCatalog;
use crate::components::{ComponentCategory, ComponentSelections};
use crate::context::UnitContext;
use crate::equipment::{
    EquipmentCatalog, EquipmentDefinition, EquipmentTag, InstanceId, MountedEquipmentInstance,
};
use crate::footprint::{engine_slot_map, StructuralFootprint};
use crate::location::MechLocation;
use crate::math::{fixed_serde, Fixed};
use crate::tech_base::{TechBase, TechBaseMode};

/// How serious a placement error is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational; allowed.
    Minor,
    /// Flagged but allowed.
    Major,
    /// Makes the placement illegal.
    Critical,
}

/// What a placement error is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementErrorKind {
    /// Equipment may not be mounted in this location.
    LocationNotAllowed {
        /// Locations it may be mounted in.
        allowed: Vec<MechLocation>,
    },
    /// Head cannot hold items over one ton.
    HeadTonnageExceeded {
        /// Item weight.
        #[serde(with = "fixed_serde")]
        weight: Fixed,
    },
    /// Explosive ammunition in the head.
    ExplosiveInHead,
    /// Item tech base differs from the unit's.
    TechBaseMismatch {
        /// Unit tech base.
        unit: TechBase,
        /// Item tech base.
        equipment: TechBase,
    },
    /// Supercharger in a location without engine slots.
    NoEngineSlots,
    /// Not enough free slots left in the location.
    InsufficientSlots {
        /// Slots the item needs.
        required: u32,
        /// Free slots in the location.
        available: u32,
    },
    /// Item extends past the end of the location.
    SlotOutOfBounds,
    /// Item overlaps a slot that is already taken.
    SlotConflict {
        /// First conflicting slot.
        slot: u8,
    },
    /// Rear mounting outside the torsos.
    RearMountNotAllowed,
    /// Item not yet available in the unit's construction year.
    NotYetIntroduced {
        /// Year the item appears.
        introduced: u16,
        /// Unit construction year.
        construction_year: u16,
    },
    /// Equipment id missing from the equipment catalog.
    UnknownEquipment,
}

/// A severity-tagged placement error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementError {
    /// What is wrong.
    pub kind: PlacementErrorKind,
    /// How serious it is.
    pub severity: Severity,
    /// What the user can do about it.
    pub suggested_fix: String,
}

/// What a placement warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementWarningKind {
    /// Explosive ammunition without CASE protection.
    UnprotectedAmmunition,
    /// Artemis with no compatible launcher in the loadout.
    ArtemisWithoutLauncher,
}

/// A non-blocking placement warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementWarning {
    /// What the warning is about.
    pub kind: PlacementWarningKind,
    /// Suggested improvement.
    pub recommendation: String,
}

/// Every finding for one placement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Errors, in rule order.
    pub errors: Vec<PlacementError>,
    /// Warnings, in rule order.
    pub warnings: Vec<PlacementWarning>,
}

impl PlacementReport {
    /// Whether the placement is legal (no critical errors).
    #[must_use]
    pub fn is_legal(&self) -> bool {
        !self.errors.iter().any(|e| e.severity == Severity::Critical)
    }

    /// Whether there is nothing to report.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Most severe error, if any.
    #[must_use]
    pub fn max_severity(&self) -> Option<Severity> {
        self.errors.iter().map(|e| e.severity).max()
    }

    fn error(&mut self, kind: PlacementErrorKind, severity: Severity, suggested_fix: impl Into<String>) {
        self.errors.push(PlacementError {
            kind,
            severity,
            suggested_fix: suggested_fix.into(),
        });
    }

    fn warning(&mut self, kind: PlacementWarningKind, recommendation: impl Into<String>) {
        self.warnings.push(PlacementWarning {
            kind,
            recommendation: recommendation.into(),
        });
    }
}

/// Configuration the validator reads.
pub struct PlacementContext<'a> {
    /// Unit-level numbers.
    pub unit: &'a UnitContext,
    /// Current component selections.
    pub selections: &'a ComponentSelections,
    /// Every instance on the unit, placed or not.
    pub loadout: &'a [MountedEquipmentInstance],
    /// Component catalog.
    pub components: &'a ComponentCatalog,
    /// Injected equipment lookup.
    pub equipment: &'a dyn EquipmentCatalog,
}

impl PlacementContext<'_> {
    /// Current engine and gyro footprint. Empty if the selections cannot
    /// be laid out, which the calculator reports on its own.
    fn footprint(&self) -> StructuralFootprint {
        engine_slot_map(self.components, self.selections, self.unit).unwrap_or_else(|error| {
            tracing::debug!(%error, "No structural footprint for placement check");
            StructuralFootprint::new()
        })
    }

    fn definition(&self, instance: &MountedEquipmentInstance) -> Option<&EquipmentDefinition> {
        self.equipment.by_id(&instance.equipment_id)
    }

    /// Whether a CASE is placed in a location.
    fn has_case_in(&self, location: MechLocation) -> bool {
        self.loadout.iter().any(|other| {
            other.location() == Some(location)
                && self
                    .definition(other)
                    .is_some_and(|d| d.has_tag(EquipmentTag::Case))
        })
    }
}

/// Slots taken in a location by fixed actuators, the structural footprint
/// and every placed instance except `except`.
#[must_use]
pub fn occupied_slots(
    location: MechLocation,
    footprint: &StructuralFootprint,
    loadout: &[MountedEquipmentInstance],
    except: InstanceId,
) -> BTreeSet<u8> {
    let mut occupied: BTreeSet<u8> = location.fixed_slots().iter().copied().collect();
    occupied.extend(footprint.reserved(location));
    for other in loadout.iter().filter(|o| o.instance_id != except) {
        occupied.extend(other.slots_in(location));
    }
    occupied
}

/// Lowest slot starting a free run of `length` slots, if any.
#[must_use]
pub fn first_free_run(location: MechLocation, occupied: &BTreeSet<u8>, length: u32) -> Option<u8> {
    let limit = location.slot_count();
    let length = u8::try_from(length).ok()?;
    (0..limit)
        .filter(|&start| start.checked_add(length).is_some_and(|end| end <= limit))
        .find(|&start| (start..start + length).all(|slot| !occupied.contains(&slot)))
}

/// Locations an item is restricted to, or `None` for anywhere.
fn allowed_locations(
    instance: &MountedEquipmentInstance,
    definition: Option<&EquipmentDefinition>,
) -> Option<Vec<MechLocation>> {
    if let Some(component) = instance.source_component {
        return match component.category() {
            ComponentCategory::JumpJet => Some(vec![
                MechLocation::CenterTorso,
                MechLocation::LeftTorso,
                MechLocation::RightTorso,
                MechLocation::LeftLeg,
                MechLocation::RightLeg,
            ]),
            _ => None,
        };
    }
    let definition = definition?;
    if definition.has_tag(EquipmentTag::PartialWing) {
        Some(MechLocation::SIDE_TORSOS.to_vec())
    } else if definition.has_tag(EquipmentTag::ElectronicWarfare)
        || definition.has_tag(EquipmentTag::TargetingComputer)
        || definition.has_tag(EquipmentTag::Case)
    {
        Some(MechLocation::TORSOS.to_vec())
    } else {
        None
    }
}

/// Check whether `instance` may occupy `target`.
///
/// If the instance is already placed in `target`, its actual slots are
/// checked; otherwise the location must have room for it.
#[must_use]
pub fn validate(
    instance: &MountedEquipmentInstance,
    target: MechLocation,
    context: &PlacementContext<'_>,
) -> PlacementReport {
    let mut report = PlacementReport::default();
    let definition = if instance.is_component_slot() {
        None
    } else {
        context.definition(instance)
    };

    // Unknown equipment
    if !instance.is_component_slot() && definition.is_none() {
        report.error(
            PlacementErrorKind::UnknownEquipment,
            Severity::Critical,
            format!("Remove '{}' or add it to the equipment catalog", instance.equipment_id),
        );
    }

    // Location allow-list
    if let Some(allowed) = allowed_locations(instance, definition) {
        if !allowed.contains(&target) {
            let names: Vec<&str> = allowed.iter().map(|l| l.code()).collect();
            report.error(
                PlacementErrorKind::LocationNotAllowed { allowed },
                Severity::Critical,
                format!("Mount it in one of: {}", names.join(", ")),
            );
        }
    }

    // Head tonnage cap
    if target == MechLocation::Head && instance.weight > Fixed::from_num(1) {
        report.error(
            PlacementErrorKind::HeadTonnageExceeded {
                weight: instance.weight,
            },
            Severity::Critical,
            "Move items heavier than 1 ton out of the head",
        );
    }

    // Explosive ammunition
    if definition.is_some_and(EquipmentDefinition::is_explosive_ammunition) {
        if target == MechLocation::Head {
            report.error(
                PlacementErrorKind::ExplosiveInHead,
                Severity::Critical,
                "Move the ammunition out of the head",
            );
        } else {
            let protected = context.has_case_in(target)
                || (matches!(target, MechLocation::LeftArm | MechLocation::RightArm)
                    && target.transfers_to().is_some_and(|torso| context.has_case_in(torso)));
            if !protected {
                report.warning(
                    PlacementWarningKind::UnprotectedAmmunition,
                    format!("Add CASE to {target} to contain an ammunition explosion"),
                );
            }
        }
    }

    // Tech base
    if let TechBaseMode::Single(unit) = context.unit.tech_base_mode {
        if instance.tech_base != unit {
            report.error(
                PlacementErrorKind::TechBaseMismatch {
                    unit,
                    equipment: instance.tech_base,
                },
                Severity::Major,
                "Switch the unit to mixed tech or pick a matching variant",
            );
        }
    }

    let footprint = context.footprint();

    // Supercharger needs engine slots in the same torso
    if definition.is_some_and(|d| d.has_tag(EquipmentTag::Supercharger))
        && !(target.is_torso() && footprint.reserves_in(target))
    {
        let engine_torsos: Vec<&str> = MechLocation::TORSOS
            .iter()
            .filter(|&&l| footprint.reserves_in(l))
            .map(|l| l.code())
            .collect();
        report.error(
            PlacementErrorKind::NoEngineSlots,
            Severity::Critical,
            format!("Mount it in a torso holding engine slots: {}", engine_torsos.join(", ")),
        );
    }

    // Artemis dependency
    if definition.is_some_and(|d| d.has_tag(EquipmentTag::Artemis)) {
        let has_launcher = context.loadout.iter().any(|other| {
            context
                .definition(other)
                .is_some_and(|d| d.has_tag(EquipmentTag::ArtemisCompatible))
        });
        if !has_launcher {
            report.warning(
                PlacementWarningKind::ArtemisWithoutLauncher,
                "Add an LRM, SRM, MRM or Streak launcher for Artemis to guide",
            );
        }
    }

    // Slot capacity
    let occupied = occupied_slots(target, &footprint, context.loadout, instance.instance_id);
    match instance.placement().filter(|p| p.location() == target) {
        Some(placement) => {
            if !placement.is_in_bounds() {
                report.error(
                    PlacementErrorKind::SlotOutOfBounds,
                    Severity::Critical,
                    "Start it at a lower slot",
                );
            }
            if let Some(&slot) = placement.slot_indices().iter().find(|s| occupied.contains(s)) {
                report.error(
                    PlacementErrorKind::SlotConflict { slot },
                    Severity::Critical,
                    format!("Slot {slot} in {target} is taken; pick free slots"),
                );
            }
        }
        None => {
            let available = u32::from(target.slot_count())
                .saturating_sub(u32::try_from(occupied.len()).unwrap_or(u32::MAX));
            if available < instance.critical_slots {
                report.error(
                    PlacementErrorKind::InsufficientSlots {
                        required: instance.critical_slots,
                        available,
                    },
                    Severity::Critical,
                    format!("Free up slots in {target} or choose another location"),
                );
            }
        }
    }

    // Rear mounting
    if instance
        .placement()
        .is_some_and(|p| p.location() == target && p.is_rear_mounted())
        && !target.is_torso()
    {
        report.error(
            PlacementErrorKind::RearMountNotAllowed,
            Severity::Critical,
            "Only torso equipment can face rearward",
        );
    }

    // Introduction year
    if let Some(introduced) = definition.and_then(|d| d.introduction_year) {
        let construction_year = context.unit.construction_year;
        if introduced > construction_year {
            report.error(
                PlacementErrorKind::NotYetIntroduced {
                    introduced,
                    construction_year,
                },
                Severity::Minor,
                format!("Set the construction year to {introduced} or later"),
            );
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentId, EngineType, JumpJetType};
    use crate::equipment::{EquipmentCategory, EquipmentRegistry};

    fn item(
        id: &str,
        category: EquipmentCategory,
        tons: f64,
        slots: u32,
        tags: &[EquipmentTag],
    ) -> EquipmentDefinition {
        EquipmentDefinition {
            id: id.to_string(),
            name: id.to_string(),
            category,
            weight: Fixed::from_num(tons),
            critical_slots: slots,
            tech_base: TechBase::InnerSphere,
            explosive: category == EquipmentCategory::Ammunition,
            heat: 0,
            introduction_year: None,
            tags: tags.to_vec(),
        }
    }

    fn registry() -> EquipmentRegistry {
        use EquipmentCategory as C;
        let mut clan_laser = item("clan-er-medium-laser", C::EnergyWeapon, 1.0, 1, &[]);
        clan_laser.tech_base = TechBase::Clan;
        let mut pulse = item("medium-pulse-laser", C::EnergyWeapon, 2.0, 1, &[]);
        pulse.introduction_year = Some(2609);
        let mut late = item("light-ppc", C::EnergyWeapon, 3.0, 2, &[]);
        late.introduction_year = Some(3067);
        EquipmentRegistry::from_definitions([
            item("medium-laser", C::EnergyWeapon, 1.0, 1, &[]),
            item("ac-10", C::BallisticWeapon, 12.0, 7, &[]),
            item("lrm-10", C::MissileWeapon, 5.0, 2, &[EquipmentTag::ArtemisCompatible]),
            item("ac-10-ammo", C::Ammunition, 1.0, 1, &[]),
            item("guardian-ecm", C::Electronics, 1.5, 2, &[EquipmentTag::ElectronicWarfare]),
            item("case", C::MiscEquipment, 0.5, 1, &[EquipmentTag::Case]),
            item("artemis-iv", C::Electronics, 1.0, 1, &[EquipmentTag::Artemis]),
            item("partial-wing", C::MiscEquipment, 4.0, 3, &[EquipmentTag::PartialWing]),
            item("supercharger", C::MiscEquipment, 1.0, 1, &[EquipmentTag::Supercharger]),
            clan_laser,
            pulse,
            late,
        ])
        .unwrap()
    }

    struct Fixture {
        unit: UnitContext,
        selections: ComponentSelections,
        components: ComponentCatalog,
        equipment: EquipmentRegistry,
        loadout: Vec<MountedEquipmentInstance>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                unit: UnitContext::new(50, 5),
                selections: ComponentSelections::default(),
                components: ComponentCatalog::standard(),
                equipment: registry(),
                loadout: Vec::new(),
            }
        }

        fn add(&mut self, id: &str, placed: Option<(MechLocation, u8)>) -> MountedEquipmentInstance {
            let definition = self.equipment.by_id(id).unwrap();
            let next = InstanceId(u32::try_from(self.loadout.len()).unwrap());
            let mut instance = MountedEquipmentInstance::from_definition(next, definition);
            if let Some((location, slot)) = placed {
                instance.place(location, slot, false);
            }
            self.loadout.push(instance.clone());
            instance
        }

        fn check(&self, instance: &MountedEquipmentInstance, target: MechLocation) -> PlacementReport {
            let context = PlacementContext {
                unit: &self.unit,
                selections: &self.selections,
                loadout: &self.loadout,
                components: &self.components,
                equipment: &self.equipment,
            };
            validate(instance, target, &context)
        }
    }

    fn kinds(report: &PlacementReport) -> Vec<&PlacementErrorKind> {
        report.errors.iter().map(|e| &e.kind).collect()
    }

    #[test]
    fn test_laser_anywhere_is_clean() {
        let mut fixture = Fixture::new();
        let laser = fixture.add("medium-laser", None);
        for location in MechLocation::ALL {
            assert!(fixture.check(&laser, location).is_clean(), "{location}");
        }
    }

    #[test]
    fn test_electronics_torso_only() {
        let mut fixture = Fixture::new();
        let ecm = fixture.add("guardian-ecm", None);
        assert!(fixture.check(&ecm, MechLocation::LeftTorso).is_legal());
        let report = fixture.check(&ecm, MechLocation::LeftArm);
        assert!(!report.is_legal());
        assert!(matches!(kinds(&report)[0], PlacementErrorKind::LocationNotAllowed { .. }));
    }

    #[test]
    fn test_partial_wing_side_torsos_only() {
        let mut fixture = Fixture::new();
        let wing = fixture.add("partial-wing", None);
        assert!(fixture.check(&wing, MechLocation::RightTorso).is_legal());
        assert!(!fixture.check(&wing, MechLocation::CenterTorso).is_legal());
        assert!(!fixture.check(&wing, MechLocation::RightArm).is_legal());
    }

    #[test]
    fn test_head_rejects_heavy_items() {
        let mut fixture = Fixture::new();
        let ecm = fixture.add("guardian-ecm", None);
        let report = fixture.check(&ecm, MechLocation::Head);
        // The allow-list, the tonnage cap and slot capacity all fire
        assert_eq!(report.errors.len(), 3);
        assert!(matches!(kinds(&report)[0], PlacementErrorKind::LocationNotAllowed { .. }));
        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e.kind, PlacementErrorKind::HeadTonnageExceeded { .. })));
    }

    #[test]
    fn test_ammunition_in_head_is_critical() {
        let mut fixture = Fixture::new();
        let ammo = fixture.add("ac-10-ammo", None);
        let report = fixture.check(&ammo, MechLocation::Head);
        assert_eq!(kinds(&report), vec![&PlacementErrorKind::ExplosiveInHead]);
        assert_eq!(report.max_severity(), Some(Severity::Critical));
    }

    #[test]
    fn test_unprotected_ammunition_warns() {
        let mut fixture = Fixture::new();
        let ammo = fixture.add("ac-10-ammo", None);
        let report = fixture.check(&ammo, MechLocation::LeftArm);
        assert!(report.is_legal());
        assert_eq!(report.warnings[0].kind, PlacementWarningKind::UnprotectedAmmunition);

        // CASE in the adjacent side torso protects the arm
        fixture.add("case", Some((MechLocation::LeftTorso, 0)));
        assert!(fixture.check(&ammo, MechLocation::LeftArm).is_clean());
        assert!(fixture.check(&ammo, MechLocation::LeftTorso).is_clean());
        assert!(!fixture.check(&ammo, MechLocation::RightTorso).warnings.is_empty());
    }

    #[test]
    fn test_tech_base_mismatch_is_major() {
        let mut fixture = Fixture::new();
        let laser = fixture.add("clan-er-medium-laser", None);
        let report = fixture.check(&laser, MechLocation::RightArm);
        assert!(report.is_legal());
        assert_eq!(report.max_severity(), Some(Severity::Major));

        fixture.unit = fixture.unit.with_mixed_tech(fixture.unit.category_tech_bases);
        assert!(fixture.check(&laser, MechLocation::RightArm).is_clean());
    }

    #[test]
    fn test_supercharger_follows_engine_footprint() {
        let mut fixture = Fixture::new();
        let supercharger = fixture.add("supercharger", None);
        assert!(fixture.check(&supercharger, MechLocation::CenterTorso).is_legal());
        assert!(!fixture.check(&supercharger, MechLocation::LeftTorso).is_legal());

        fixture.selections.engine = EngineType::ExtraLight;
        assert!(fixture.check(&supercharger, MechLocation::LeftTorso).is_legal());
        assert!(!fixture.check(&supercharger, MechLocation::LeftArm).is_legal());
    }

    #[test]
    fn test_artemis_without_launcher_only_warns() {
        let mut fixture = Fixture::new();
        let artemis = fixture.add("artemis-iv", None);
        let report = fixture.check(&artemis, MechLocation::LeftTorso);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings[0].kind, PlacementWarningKind::ArtemisWithoutLauncher);

        fixture.add("lrm-10", None);
        assert!(fixture.check(&artemis, MechLocation::LeftTorso).is_clean());
    }

    #[test]
    fn test_slot_capacity() {
        let mut fixture = Fixture::new();
        // Center torso has two free slots behind the standard engine and gyro
        let ac10 = fixture.add("ac-10", None);
        let report = fixture.check(&ac10, MechLocation::CenterTorso);
        assert_eq!(
            kinds(&report),
            vec![&PlacementErrorKind::InsufficientSlots {
                required: 7,
                available: 2
            }]
        );
        assert!(fixture.check(&ac10, MechLocation::RightTorso).is_legal());
    }

    #[test]
    fn test_placed_instance_conflicts() {
        let mut fixture = Fixture::new();
        fixture.add("medium-laser", Some((MechLocation::RightArm, 4)));
        let second = fixture.add("medium-laser", Some((MechLocation::RightArm, 4)));
        let report = fixture.check(&second, MechLocation::RightArm);
        assert_eq!(kinds(&report), vec![&PlacementErrorKind::SlotConflict { slot: 4 }]);

        let actuator = fixture.add("medium-laser", Some((MechLocation::LeftArm, 0)));
        assert!(!fixture.check(&actuator, MechLocation::LeftArm).is_legal());
    }

    #[test]
    fn test_rear_mount_outside_torso() {
        let mut fixture = Fixture::new();
        let mut laser = fixture.add("medium-laser", None);
        laser.place(MechLocation::LeftArm, 5, true);
        assert!(!fixture.check(&laser, MechLocation::LeftArm).is_legal());
        laser.place(MechLocation::CenterTorso, 10, true);
        assert!(fixture.check(&laser, MechLocation::CenterTorso).is_legal());
    }

    #[test]
    fn test_introduction_year_is_minor() {
        let mut fixture = Fixture::new();
        let ppc = fixture.add("light-ppc", None);
        let report = fixture.check(&ppc, MechLocation::RightArm);
        assert!(report.is_legal());
        assert_eq!(report.max_severity(), Some(Severity::Minor));

        let pulse = fixture.add("medium-pulse-laser", None);
        assert!(fixture.check(&pulse, MechLocation::RightArm).is_clean());
    }

    #[test]
    fn test_unknown_equipment_is_critical() {
        let fixture = Fixture::new();
        let ghost = MountedEquipmentInstance::from_definition(
            InstanceId(99),
            &item("ghost", EquipmentCategory::MiscEquipment, 1.0, 1, &[]),
        );
        let report = fixture.check(&ghost, MechLocation::LeftArm);
        assert_eq!(kinds(&report), vec![&PlacementErrorKind::UnknownEquipment]);
    }

    #[test]
    fn test_first_free_run() {
        let occupied: BTreeSet<u8> = [0, 1, 2, 3, 5].into_iter().collect();
        assert_eq!(first_free_run(MechLocation::LeftArm, &occupied, 1), Some(4));
        assert_eq!(first_free_run(MechLocation::LeftArm, &occupied, 2), Some(6));
        assert_eq!(first_free_run(MechLocation::LeftLeg, &occupied, 2), None);
    }

    #[test]
    fn test_jump_jet_slots_torso_and_legs() {
        let fixture = Fixture::new();
        let jet = MountedEquipmentInstance::component_slot(
            InstanceId(50),
            ComponentId::JumpJet(JumpJetType::Standard),
            1,
            TechBase::InnerSphere,
        );
        assert!(fixture.check(&jet, MechLocation::LeftLeg).is_legal());
        assert!(!fixture.check(&jet, MechLocation::LeftArm).is_legal());
    }
}
