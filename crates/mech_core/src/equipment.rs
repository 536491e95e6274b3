//! Equipment definitions, the injected equipment lookup, and mounted
//! instances.
//!
//! Equipment definitions are owned by an external catalog; the engine only
//! reads them through [`EquipmentCatalog::by_id`]. A RON-backed
//! [`EquipmentRegistry`] is provided for tools and tests.
//!
//! A [`MountedEquipmentInstance`] is one copy of an item on a unit. Its
//! [`Placement`] can only be created by [`MountedEquipmentInstance::place`],
//! which always produces exactly `critical_slots` slot indices, so a partial
//! placement cannot be represented.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::ComponentId;
use crate::data::EquipmentCatalogData;
use crate::error::{Result, RulesError};
use crate::location::MechLocation;
use crate::math::{div_ceil, fixed_serde, is_half_ton_multiple, to_half_tons_ceil, Fixed};
use crate::tech_base::TechBase;

/// Equipment categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentCategory {
    /// Lasers, PPCs, flamers.
    EnergyWeapon,
    /// Autocannons, gauss rifles, machine guns.
    BallisticWeapon,
    /// LRM, SRM, MRM and Streak launchers.
    MissileWeapon,
    /// Artillery pieces.
    ArtilleryWeapon,
    /// Hatchets, swords and similar.
    PhysicalWeapon,
    /// Ammunition bins.
    Ammunition,
    /// Sensors, ECM, targeting systems.
    Electronics,
    /// Anything else.
    MiscEquipment,
    /// Slots generated by a structural component such as Endo Steel.
    ComponentSlot,
}

impl EquipmentCategory {
    /// Whether the category counts toward direct-fire tonnage.
    #[must_use]
    pub const fn is_direct_fire(self) -> bool {
        matches!(
            self,
            EquipmentCategory::EnergyWeapon | EquipmentCategory::BallisticWeapon
        )
    }

    /// Whether the category is a weapon.
    #[must_use]
    pub const fn is_weapon(self) -> bool {
        matches!(
            self,
            EquipmentCategory::EnergyWeapon
                | EquipmentCategory::BallisticWeapon
                | EquipmentCategory::MissileWeapon
                | EquipmentCategory::ArtilleryWeapon
                | EquipmentCategory::PhysicalWeapon
        )
    }
}

/// Rule-relevant properties of an equipment item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentTag {
    /// ECM, active probes, TAG and C3: torso-mounted electronics.
    ElectronicWarfare,
    /// Targeting computer.
    TargetingComputer,
    /// Partial wing: side torsos only.
    PartialWing,
    /// Supercharger: needs engine slots in its location.
    Supercharger,
    /// Artemis fire-control system.
    Artemis,
    /// Missile launcher that Artemis can guide (LRM/SRM/MRM/Streak).
    ArtemisCompatible,
    /// Cellular Ammunition Storage Equipment.
    Case,
}

/// Immutable equipment definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentDefinition {
    /// Unique catalog id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category.
    pub category: EquipmentCategory,
    /// Weight in tons.
    #[serde(with = "fixed_serde")]
    pub weight: Fixed,
    /// Critical slots occupied.
    pub critical_slots: u32,
    /// Tech base.
    pub tech_base: TechBase,
    /// Whether the item can explode when hit.
    pub explosive: bool,
    /// Heat generated per use.
    pub heat: u32,
    /// Year the item becomes available.
    pub introduction_year: Option<u16>,
    /// Rule tags.
    pub tags: Vec<EquipmentTag>,
}

impl EquipmentDefinition {
    /// Check if this item carries a tag.
    #[must_use]
    pub fn has_tag(&self, tag: EquipmentTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Whether this is explosive ammunition.
    #[must_use]
    pub fn is_explosive_ammunition(&self) -> bool {
        self.explosive && self.category == EquipmentCategory::Ammunition
    }
}

/// Read-only equipment lookup injected into the engine.
pub trait EquipmentCatalog {
    /// Look up a definition by id.
    fn by_id(&self, id: &str) -> Option<&EquipmentDefinition>;
}

/// A data-quality problem in an equipment catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogIssue {
    /// Non-structural item with zero or negative weight.
    NonPositiveWeight {
        /// Equipment id.
        id: String,
    },
    /// Weight that is not a multiple of half a ton.
    FractionalWeight {
        /// Equipment id.
        id: String,
    },
    /// Item larger than any location.
    TooManySlots {
        /// Equipment id.
        id: String,
        /// Declared slot count.
        critical_slots: u32,
    },
    /// Artemis-compatible tag on something that is not a missile launcher.
    MisplacedArtemisTag {
        /// Equipment id.
        id: String,
    },
    /// Entry with an empty display name.
    MissingName {
        /// Equipment id.
        id: String,
    },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::NonPositiveWeight { id } => write!(f, "{id}: weight must be positive"),
            CatalogIssue::FractionalWeight { id } => {
                write!(f, "{id}: weight is not a multiple of 0.5 tons")
            }
            CatalogIssue::TooManySlots { id, critical_slots } => {
                write!(f, "{id}: {critical_slots} slots do not fit in any location")
            }
            CatalogIssue::MisplacedArtemisTag { id } => {
                write!(f, "{id}: only missile launchers can be Artemis-compatible")
            }
            CatalogIssue::MissingName { id } => write!(f, "{id}: empty name"),
        }
    }
}

/// Equipment definitions keyed by id.
#[derive(Debug, Clone, Default)]
pub struct EquipmentRegistry {
    definitions: BTreeMap<String, EquipmentDefinition>,
}

impl EquipmentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from definitions.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::DuplicateEquipment`] if two definitions share
    /// an id.
    pub fn from_definitions(definitions: impl IntoIterator<Item = EquipmentDefinition>) -> Result<Self> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.insert(definition)?;
        }
        Ok(registry)
    }

    /// Parse a RON equipment file.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::DataParseError`] if the text is not a valid
    /// `EquipmentCatalogData`, or [`RulesError::DuplicateEquipment`].
    pub fn from_ron_str(source_name: &str, text: &str) -> Result<Self> {
        let data: EquipmentCatalogData =
            ron::from_str(text).map_err(|e| RulesError::DataParseError {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
        let registry =
            Self::from_definitions(data.equipment.into_iter().map(|entry| entry.into_definition()))?;
        tracing::debug!(source_name, count = registry.len(), "Loaded equipment catalog");
        Ok(registry)
    }

    /// Add a definition.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::DuplicateEquipment`] if the id is taken.
    pub fn insert(&mut self, definition: EquipmentDefinition) -> Result<()> {
        if self.definitions.contains_key(&definition.id) {
            return Err(RulesError::DuplicateEquipment(definition.id));
        }
        self.definitions.insert(definition.id.clone(), definition);
        Ok(())
    }

    /// Iterate definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &EquipmentDefinition> {
        self.definitions.values()
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Data-quality problems, in id order.
    #[must_use]
    pub fn issues(&self) -> Vec<CatalogIssue> {
        let max_slots = u32::from(MechLocation::CenterTorso.slot_count());
        let mut issues = Vec::new();
        for definition in self.definitions.values() {
            let id = definition.id.clone();
            if definition.name.trim().is_empty() {
                issues.push(CatalogIssue::MissingName { id: id.clone() });
            }
            if definition.weight <= Fixed::ZERO {
                issues.push(CatalogIssue::NonPositiveWeight { id: id.clone() });
            } else if !is_half_ton_multiple(definition.weight) {
                issues.push(CatalogIssue::FractionalWeight { id: id.clone() });
            }
            if definition.critical_slots > max_slots {
                issues.push(CatalogIssue::TooManySlots {
                    id: id.clone(),
                    critical_slots: definition.critical_slots,
                });
            }
            if definition.has_tag(EquipmentTag::ArtemisCompatible)
                && definition.category != EquipmentCategory::MissileWeapon
            {
                issues.push(CatalogIssue::MisplacedArtemisTag { id });
            }
        }
        issues
    }
}

impl EquipmentCatalog for EquipmentRegistry {
    fn by_id(&self, id: &str) -> Option<&EquipmentDefinition> {
        self.definitions.get(id)
    }
}

/// Opaque, stable identifier of a mounted instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an instance sits in the critical-slot grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    location: MechLocation,
    slot_indices: Vec<u8>,
    is_rear_mounted: bool,
}

impl Placement {
    /// Location the instance is mounted in.
    #[must_use]
    pub const fn location(&self) -> MechLocation {
        self.location
    }

    /// Occupied slot indices, ascending.
    #[must_use]
    pub fn slot_indices(&self) -> &[u8] {
        &self.slot_indices
    }

    /// Whether the instance faces rearward.
    #[must_use]
    pub const fn is_rear_mounted(&self) -> bool {
        self.is_rear_mounted
    }

    /// Whether every slot lies inside the location.
    #[must_use]
    pub fn is_in_bounds(&self) -> bool {
        let limit = self.location.slot_count();
        self.slot_indices.iter().all(|&slot| slot < limit)
    }
}

/// One mounted copy of an equipment item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountedEquipmentInstance {
    /// Stable instance id.
    pub instance_id: InstanceId,
    /// Catalog id, or the component slug for generated slot items.
    pub equipment_id: String,
    /// Category.
    pub category: EquipmentCategory,
    /// Weight in tons.
    #[serde(with = "fixed_serde")]
    pub weight: Fixed,
    /// Critical slots occupied when placed.
    pub critical_slots: u32,
    /// Tech base.
    pub tech_base: TechBase,
    placement: Option<Placement>,
    /// Ammunition instance feeding this weapon.
    pub linked_ammo: Option<InstanceId>,
    /// Whether the user may remove it.
    pub is_removable: bool,
    /// Structural component that generated this instance.
    pub source_component: Option<ComponentId>,
}

impl MountedEquipmentInstance {
    /// Create an unplaced, removable instance of a catalog item.
    #[must_use]
    pub fn from_definition(instance_id: InstanceId, definition: &EquipmentDefinition) -> Self {
        Self {
            instance_id,
            equipment_id: definition.id.clone(),
            category: definition.category,
            weight: definition.weight,
            critical_slots: definition.critical_slots,
            tech_base: definition.tech_base,
            placement: None,
            linked_ammo: None,
            is_removable: true,
            source_component: None,
        }
    }

    /// Create an unplaced, fixed slot item for a structural component.
    ///
    /// The component's weight is accounted for by the calculator, so the
    /// item itself weighs nothing.
    #[must_use]
    pub fn component_slot(
        instance_id: InstanceId,
        component: ComponentId,
        critical_slots: u32,
        tech_base: TechBase,
    ) -> Self {
        Self {
            instance_id,
            equipment_id: component.slug().to_string(),
            category: EquipmentCategory::ComponentSlot,
            weight: Fixed::ZERO,
            critical_slots,
            tech_base,
            placement: None,
            linked_ammo: None,
            is_removable: false,
            source_component: Some(component),
        }
    }

    /// Current placement.
    #[must_use]
    pub const fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    /// Location, if placed.
    #[must_use]
    pub fn location(&self) -> Option<MechLocation> {
        self.placement.as_ref().map(Placement::location)
    }

    /// Whether the instance is placed.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    /// Whether the instance was generated by a structural component.
    #[must_use]
    pub const fn is_component_slot(&self) -> bool {
        self.source_component.is_some()
    }

    /// Place the instance in consecutive slots starting at `first_slot`.
    ///
    /// Legality is not checked here; run the placement validator.
    pub fn place(&mut self, location: MechLocation, first_slot: u8, rear_mounted: bool) {
        let count = u8::try_from(self.critical_slots).unwrap_or(u8::MAX);
        let slot_indices = (0..count)
            .map(|offset| first_slot.saturating_add(offset))
            .collect();
        self.placement = Some(Placement {
            location,
            slot_indices,
            is_rear_mounted: rear_mounted,
        });
    }

    /// Return the instance to the unallocated pool.
    pub fn unplace(&mut self) {
        self.placement = None;
    }

    /// Slots occupied in a location; empty if placed elsewhere.
    pub fn slots_in(&self, location: MechLocation) -> impl Iterator<Item = u8> + '_ {
        self.placement
            .iter()
            .filter(move |placement| placement.location == location)
            .flat_map(|placement| placement.slot_indices.iter().copied())
    }
}

/// Total weight of direct-fire weapons: energy and ballistic, missiles
/// excluded.
#[must_use]
pub fn direct_fire_tonnage(instances: &[MountedEquipmentInstance]) -> Fixed {
    instances
        .iter()
        .filter(|instance| instance.category.is_direct_fire())
        .fold(Fixed::ZERO, |total, instance| total + instance.weight)
}

/// Weight and size of a targeting computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetingComputerSize {
    /// Weight in whole tons.
    #[serde(with = "fixed_serde")]
    pub weight: Fixed,
    /// Critical slots, one per ton.
    pub critical_slots: u32,
}

/// Size a targeting computer: one ton per 4 tons (Inner Sphere) or 5 tons
/// (Clan) of direct-fire weapons, rounded up.
#[must_use]
pub fn targeting_computer_size(direct_fire: Fixed, tech_base: TechBase) -> TargetingComputerSize {
    let divisor = match tech_base {
        TechBase::InnerSphere => 4,
        TechBase::Clan => 5,
    };
    // rounding the weapons up to a half ton first never changes the result
    let tons = div_ceil(to_half_tons_ceil(direct_fire), divisor * 2);
    TargetingComputerSize {
        weight: Fixed::from_num(tons),
        critical_slots: tons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(id: &str, category: EquipmentCategory, tons: f64, slots: u32) -> EquipmentDefinition {
        EquipmentDefinition {
            id: id.to_string(),
            name: id.to_string(),
            category,
            weight: Fixed::from_num(tons),
            critical_slots: slots,
            tech_base: TechBase::InnerSphere,
            explosive: false,
            heat: 0,
            introduction_year: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_place_covers_exact_slot_count() {
        let ac10 = definition("ac-10", EquipmentCategory::BallisticWeapon, 12.0, 7);
        let mut instance = MountedEquipmentInstance::from_definition(InstanceId(1), &ac10);
        assert!(!instance.is_placed());

        instance.place(MechLocation::RightTorso, 3, false);
        let placement = instance.placement().unwrap();
        assert_eq!(placement.slot_indices(), &[3, 4, 5, 6, 7, 8, 9]);
        assert!(placement.is_in_bounds());

        instance.place(MechLocation::RightArm, 8, false);
        assert!(!instance.placement().unwrap().is_in_bounds());

        instance.unplace();
        assert!(instance.location().is_none());
    }

    #[test]
    fn test_slots_in_other_location_is_empty() {
        let laser = definition("medium-laser", EquipmentCategory::EnergyWeapon, 1.0, 1);
        let mut instance = MountedEquipmentInstance::from_definition(InstanceId(2), &laser);
        instance.place(MechLocation::LeftArm, 4, false);
        assert_eq!(instance.slots_in(MechLocation::LeftArm).collect::<Vec<_>>(), vec![4]);
        assert_eq!(instance.slots_in(MechLocation::RightArm).count(), 0);
    }

    #[test]
    fn test_direct_fire_excludes_missiles() {
        let instances: Vec<_> = [
            definition("medium-laser", EquipmentCategory::EnergyWeapon, 1.0, 1),
            definition("ac-10", EquipmentCategory::BallisticWeapon, 12.0, 7),
            definition("lrm-10", EquipmentCategory::MissileWeapon, 5.0, 2),
        ]
        .iter()
        .enumerate()
        .map(|(i, d)| MountedEquipmentInstance::from_definition(InstanceId(i as u32), d))
        .collect();

        assert_eq!(direct_fire_tonnage(&instances), Fixed::from_num(13));
    }

    #[test]
    fn test_targeting_computer_size() {
        let thirteen = Fixed::from_num(13);
        let is = targeting_computer_size(thirteen, TechBase::InnerSphere);
        assert_eq!(is.weight, Fixed::from_num(4));
        assert_eq!(is.critical_slots, 4);

        let clan = targeting_computer_size(thirteen, TechBase::Clan);
        assert_eq!(clan.weight, Fixed::from_num(3));

        assert_eq!(targeting_computer_size(Fixed::ZERO, TechBase::Clan).critical_slots, 0);
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let laser = definition("medium-laser", EquipmentCategory::EnergyWeapon, 1.0, 1);
        let result = EquipmentRegistry::from_definitions([laser.clone(), laser]);
        assert_eq!(
            result.err(),
            Some(RulesError::DuplicateEquipment("medium-laser".to_string()))
        );
    }

    #[test]
    fn test_registry_parse_error() {
        let result = EquipmentRegistry::from_ron_str("broken.ron", "EquipmentCatalogData(");
        assert!(matches!(result, Err(RulesError::DataParseError { .. })));
    }

    #[test]
    fn test_issues() {
        let mut tagged = definition("ppc", EquipmentCategory::EnergyWeapon, 7.0, 3);
        tagged.tags.push(EquipmentTag::ArtemisCompatible);
        let registry = EquipmentRegistry::from_definitions([
            tagged,
            definition("odd", EquipmentCategory::MiscEquipment, 0.25, 1),
            definition("huge", EquipmentCategory::MiscEquipment, 20.0, 14),
        ])
        .unwrap();

        let issues = registry.issues();
        assert_eq!(issues.len(), 3);
        assert!(issues.contains(&CatalogIssue::MisplacedArtemisTag { id: "ppc".to_string() }));
        assert!(issues.contains(&CatalogIssue::FractionalWeight { id: "odd".to_string() }));
    }

    #[test]
    fn test_component_slot_is_fixed() {
        let endo = ComponentId::Structure(crate::components::StructureType::EndoSteel);
        let item = MountedEquipmentInstance::component_slot(InstanceId(7), endo, 1, TechBase::Clan);
        assert!(!item.is_removable);
        assert!(item.is_component_slot());
        assert_eq!(item.equipment_id, "endo-steel");
        assert_eq!(item.weight, Fixed::ZERO);
    }
}
