//! Armor limits and the allocation optimizer.
//!
//! Every location except the head may carry twice its internal structure in
//! armor points; the head is capped at 9. Torsos split their points between
//! front and rear.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{ComponentCatalog, WeightRule};
use crate::components::{ArmorType, ComponentId};
use crate::error::Result;
use crate::location::MechLocation;
use crate::math::Fixed;
use crate::tables::structure_points;
use crate::tech_base::TechBase;

/// Maximum armor points on the head.
pub const HEAD_ARMOR_MAX: u32 = 9;

/// Armor points per ton of standard armor.
pub const POINTS_PER_TON: u32 = 16;

/// Order in which leftover points are handed out, and in reverse, taken
/// back when a budget shrinks. The head is handled separately.
const DISTRIBUTION_ORDER: [MechLocation; 7] = [
    MechLocation::CenterTorso,
    MechLocation::LeftTorso,
    MechLocation::RightTorso,
    MechLocation::LeftLeg,
    MechLocation::RightLeg,
    MechLocation::LeftArm,
    MechLocation::RightArm,
];

/// Maximum armor points for one location.
///
/// # Errors
///
/// Returns [`crate::error::RulesError::UnsupportedTonnage`] for untabulated
/// tonnages.
pub fn location_max(location: MechLocation, tonnage: u32) -> Result<u32> {
    let structure = structure_points(tonnage)?;
    Ok(match location {
        MechLocation::Head => HEAD_ARMOR_MAX,
        other => 2 * structure.for_location(other),
    })
}

/// Maximum armor points for the whole unit.
///
/// # Errors
///
/// Returns [`crate::error::RulesError::UnsupportedTonnage`] for untabulated
/// tonnages.
pub fn max_armor_points(tonnage: u32) -> Result<u32> {
    MechLocation::ALL
        .iter()
        .map(|&location| location_max(location, tonnage))
        .sum()
}

/// Armor points bought by a tonnage of one armor type.
///
/// # Errors
///
/// Returns [`crate::error::RulesError::ComponentUnavailable`] if the armor
/// type does not exist for the tech base.
pub fn armor_points(
    catalog: &ComponentCatalog,
    armor: ArmorType,
    tech_base: TechBase,
    armor_tonnage: Fixed,
) -> Result<u32> {
    let definition = catalog.require(ComponentId::Armor(armor), tech_base)?;
    let factor_permille = match definition.weight_rule {
        WeightRule::ArmorTonnage { factor_permille } => factor_permille,
        _ => 1000,
    };
    let points = armor_tonnage
        .max(Fixed::ZERO)
        .saturating_mul(Fixed::from_num(POINTS_PER_TON * factor_permille))
        / Fixed::from_num(1000);
    Ok(points.floor().to_num::<u32>())
}

/// Armor points on one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LocationArmor {
    /// Front-facing points.
    pub front: u32,
    /// Rear-facing points (torsos only).
    pub rear: u32,
}

impl LocationArmor {
    /// Front plus rear.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.front + self.rear
    }
}

/// Armor points per location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ArmorAllocation {
    locations: BTreeMap<MechLocation, LocationArmor>,
}

impl ArmorAllocation {
    /// Create an allocation with no armor anywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Points on a location.
    #[must_use]
    pub fn get(&self, location: MechLocation) -> LocationArmor {
        self.locations.get(&location).copied().unwrap_or_default()
    }

    /// Set a location's points. Rear points on a location without rear
    /// armor are dropped.
    pub fn set(&mut self, location: MechLocation, front: u32, rear: u32) {
        let rear = if location.has_rear_armor() { rear } else { 0 };
        let armor = LocationArmor { front, rear };
        if armor.total() == 0 {
            self.locations.remove(&location);
        } else {
            self.locations.insert(location, armor);
        }
    }

    /// Total points allocated.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.locations.values().map(LocationArmor::total).sum()
    }

    /// Iterate every location, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (MechLocation, LocationArmor)> + '_ {
        MechLocation::ALL
            .into_iter()
            .map(|location| (location, self.get(location)))
    }

    /// Check the per-location maxima and the budget.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::RulesError::UnsupportedTonnage`] for
    /// untabulated tonnages.
    pub fn is_within(&self, tonnage: u32, budget: u32) -> Result<bool> {
        for (location, armor) in self.iter() {
            if armor.total() > location_max(location, tonnage)? {
                return Ok(false);
            }
        }
        Ok(self.total() <= budget)
    }

    /// Set a location, clamped to its maximum and to whatever the budget
    /// leaves after the other locations. Rear points are kept first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::RulesError::UnsupportedTonnage`] for
    /// untabulated tonnages.
    pub fn set_clamped(
        &mut self,
        location: MechLocation,
        front: u32,
        rear: u32,
        tonnage: u32,
        budget: u32,
    ) -> Result<()> {
        let others = self.total() - self.get(location).total();
        let allowed = location_max(location, tonnage)?.min(budget.saturating_sub(others));
        let rear = if location.has_rear_armor() { rear.min(allowed) } else { 0 };
        self.set(location, front.min(allowed - rear), rear);
        Ok(())
    }

    /// Copy reduced until every invariant holds.
    ///
    /// Each location is first cut to its maximum, rear points before front.
    /// If the total still exceeds the budget, points are removed from the
    /// arms inward, leaving the head and center torso for last.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::RulesError::UnsupportedTonnage`] for
    /// untabulated tonnages.
    pub fn clamp_to(&self, tonnage: u32, budget: u32) -> Result<Self> {
        let mut clamped = Self::new();
        for (location, armor) in self.iter() {
            let max = location_max(location, tonnage)?;
            let front = armor.front.min(max);
            let rear = armor.rear.min(max - front);
            clamped.set(location, front, rear);
        }

        let mut excess = clamped.total().saturating_sub(budget);
        let removal_order = DISTRIBUTION_ORDER
            .iter()
            .rev()
            .copied()
            .chain([MechLocation::Head]);
        for location in removal_order {
            if excess == 0 {
                break;
            }
            let armor = clamped.get(location);
            let from_rear = armor.rear.min(excess);
            let from_front = armor.front.min(excess - from_rear);
            clamped.set(location, armor.front - from_front, armor.rear - from_rear);
            excess -= from_rear + from_front;
        }

        Ok(clamped)
    }
}

/// Distribute an armor budget over the locations.
///
/// The head is filled first, up to 9. The rest is split across the other
/// locations in proportion to their internal structure, rounding down; a
/// torso gives a quarter of its share to the rear. Points lost to rounding
/// are then handed out one at a time, front first, in the order CT, LT, RT,
/// LL, RL, LA, RA until none remain or every location is full.
///
/// Budgets larger than the unit's maximum are capped at the maximum.
///
/// # Errors
///
/// Returns [`crate::error::RulesError::UnsupportedTonnage`] for untabulated
/// tonnages.
pub fn optimize(total_points: u32, tonnage: u32) -> Result<ArmorAllocation> {
    let structure = structure_points(tonnage)?;
    let budget = total_points.min(max_armor_points(tonnage)?);
    let mut allocation = ArmorAllocation::new();

    let head = budget.min(HEAD_ARMOR_MAX);
    allocation.set(MechLocation::Head, head, 0);

    let remaining = budget - head;
    let weight_total: u32 = DISTRIBUTION_ORDER
        .iter()
        .map(|&location| structure.for_location(location))
        .sum();

    let mut distributed = 0;
    for location in DISTRIBUTION_ORDER {
        let weight = structure.for_location(location);
        let share = (remaining * weight / weight_total).min(2 * weight);
        let rear = if location.has_rear_armor() { share / 4 } else { 0 };
        allocation.set(location, share - rear, rear);
        distributed += share;
    }

    let mut leftover = remaining - distributed;
    while leftover > 0 {
        let mut progressed = false;
        for location in DISTRIBUTION_ORDER {
            if leftover == 0 {
                break;
            }
            let armor = allocation.get(location);
            if armor.total() < 2 * structure.for_location(location) {
                allocation.set(location, armor.front + 1, armor.rear);
                leftover -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    tracing::trace!(budget, tonnage, allocated = allocation.total(), "Optimized armor");
    Ok(allocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RulesError;

    #[test]
    fn test_max_armor_points() {
        assert_eq!(max_armor_points(50), Ok(169));
        assert_eq!(max_armor_points(100), Ok(307));
        assert_eq!(location_max(MechLocation::Head, 100), Ok(9));
        assert_eq!(location_max(MechLocation::CenterTorso, 100), Ok(62));
        assert_eq!(max_armor_points(42), Err(RulesError::UnsupportedTonnage(42)));
    }

    #[test]
    fn test_armor_points_by_type() {
        let catalog = ComponentCatalog::standard();
        let eight = Fixed::from_num(8);
        assert_eq!(armor_points(&catalog, ArmorType::Standard, TechBase::InnerSphere, eight), Ok(128));
        assert_eq!(armor_points(&catalog, ArmorType::FerroFibrous, TechBase::InnerSphere, eight), Ok(143));
        assert_eq!(armor_points(&catalog, ArmorType::FerroFibrous, TechBase::Clan, eight), Ok(153));
        assert_eq!(armor_points(&catalog, ArmorType::Hardened, TechBase::Clan, eight), Ok(64));
    }

    #[test]
    fn test_small_budget_goes_to_head() {
        let allocation = optimize(5, 50).unwrap();
        assert_eq!(allocation.get(MechLocation::Head).front, 5);
        assert_eq!(allocation.total(), 5);
    }

    #[test]
    fn test_full_budget_fills_every_location() {
        let allocation = optimize(169, 50).unwrap();
        for (location, armor) in allocation.iter() {
            assert_eq!(armor.total(), location_max(location, 50).unwrap());
        }
        let center = allocation.get(MechLocation::CenterTorso);
        assert_eq!((center.front, center.rear), (24, 8));
    }

    #[test]
    fn test_rounding_leftover_in_priority_order() {
        let allocation = optimize(100, 50).unwrap();
        assert_eq!(allocation.total(), 100);

        let center = allocation.get(MechLocation::CenterTorso);
        assert_eq!((center.front, center.rear), (15, 4));
        assert_eq!(allocation.get(MechLocation::LeftTorso).total(), 14);
        assert_eq!(allocation.get(MechLocation::RightTorso).total(), 14);
        assert_eq!(allocation.get(MechLocation::LeftLeg).total(), 13);
        assert_eq!(allocation.get(MechLocation::LeftArm).total(), 9);
    }

    #[test]
    fn test_oversized_budget_is_capped() {
        let allocation = optimize(1000, 50).unwrap();
        assert_eq!(allocation.total(), 169);
        assert!(allocation.is_within(50, 1000).unwrap());
    }

    #[test]
    fn test_set_clamped_respects_budget() {
        let mut allocation = optimize(100, 50).unwrap();
        allocation
            .set_clamped(MechLocation::LeftArm, 50, 0, 50, 100)
            .unwrap();
        // Budget already spent elsewhere; the arm keeps only what it had room for
        assert_eq!(allocation.get(MechLocation::LeftArm).total(), 9);
        assert_eq!(allocation.total(), 100);

        allocation
            .set_clamped(MechLocation::LeftArm, 50, 0, 50, 169)
            .unwrap();
        assert_eq!(allocation.get(MechLocation::LeftArm).total(), 16);
    }

    #[test]
    fn test_clamp_to_smaller_tonnage_and_budget() {
        let allocation = optimize(169, 50).unwrap();

        let lighter = allocation.clamp_to(20, 1000).unwrap();
        assert!(lighter.is_within(20, 1000).unwrap());
        assert_eq!(lighter.get(MechLocation::CenterTorso).total(), 12);

        let poorer = allocation.clamp_to(50, 100).unwrap();
        assert_eq!(poorer.total(), 100);
        assert_eq!(poorer.get(MechLocation::CenterTorso), allocation.get(MechLocation::CenterTorso));
    }
}
