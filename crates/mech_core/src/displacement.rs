//! Displacement of placed equipment after a structural footprint change.
//!
//! Displacement only clears placements. The instances stay on the unit in
//! the unallocated pool; nothing is deleted.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::equipment::{InstanceId, MountedEquipmentInstance};
use crate::footprint::StructuralFootprint;
use crate::location::MechLocation;

/// Instances whose placement became invalid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Displacement {
    /// Displaced instance ids, ascending.
    pub displaced: BTreeSet<InstanceId>,
}

impl Displacement {
    /// Whether nothing was displaced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.displaced.is_empty()
    }

    /// Check whether an instance was displaced.
    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.displaced.contains(&id)
    }
}

/// Find placed instances that no longer fit after `old` becomes `new`.
///
/// Only locations where either footprint reserves slots are examined. An
/// instance there is displaced if any of its slots is reserved by `new`, or
/// lies outside the location.
#[must_use]
pub fn displace(
    instances: &[MountedEquipmentInstance],
    old: &StructuralFootprint,
    new: &StructuralFootprint,
) -> Displacement {
    let affected: BTreeSet<MechLocation> = old.locations().chain(new.locations()).collect();

    let displaced: BTreeSet<InstanceId> = instances
        .iter()
        .filter_map(|instance| {
            let placement = instance.placement()?;
            let location = placement.location();
            if !affected.contains(&location) {
                return None;
            }
            let blocked = !placement.is_in_bounds()
                || placement
                    .slot_indices()
                    .iter()
                    .any(|&slot| new.is_reserved(location, slot));
            blocked.then_some(instance.instance_id)
        })
        .collect();

    if !displaced.is_empty() {
        tracing::debug!(count = displaced.len(), ?displaced, "Displacing equipment");
    }
    Displacement { displaced }
}

/// Clear the placement of every displaced instance. Returns how many were
/// cleared.
pub fn apply(instances: &mut [MountedEquipmentInstance], displacement: &Displacement) -> usize {
    let mut cleared = 0;
    for instance in instances
        .iter_mut()
        .filter(|instance| displacement.contains(instance.instance_id))
    {
        if instance.is_placed() {
            instance.unplace();
            cleared += 1;
        }
    }
    cleared
}
