//! Biped body locations and their fixed critical-slot layout.

use serde::{Deserialize, Serialize};

/// Critical slots over the whole unit.
pub const TOTAL_CRITICAL_SLOTS: u32 = 78;

/// A body location of a biped mech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MechLocation {
    /// Head.
    Head,
    /// Center torso.
    CenterTorso,
    /// Left torso.
    LeftTorso,
    /// Right torso.
    RightTorso,
    /// Left arm.
    LeftArm,
    /// Right arm.
    RightArm,
    /// Left leg.
    LeftLeg,
    /// Right leg.
    RightLeg,
}

impl MechLocation {
    /// All locations, in record-sheet order.
    pub const ALL: [MechLocation; 8] = [
        MechLocation::Head,
        MechLocation::CenterTorso,
        MechLocation::LeftTorso,
        MechLocation::RightTorso,
        MechLocation::LeftArm,
        MechLocation::RightArm,
        MechLocation::LeftLeg,
        MechLocation::RightLeg,
    ];

    /// The three torso locations.
    pub const TORSOS: [MechLocation; 3] = [
        MechLocation::CenterTorso,
        MechLocation::LeftTorso,
        MechLocation::RightTorso,
    ];

    /// The two side torsos.
    pub const SIDE_TORSOS: [MechLocation; 2] = [MechLocation::LeftTorso, MechLocation::RightTorso];

    /// Number of critical slots in this location.
    #[must_use]
    pub const fn slot_count(self) -> u8 {
        match self {
            MechLocation::Head | MechLocation::LeftLeg | MechLocation::RightLeg => 6,
            _ => 12,
        }
    }

    /// Whether this is one of the three torso locations.
    #[must_use]
    pub const fn is_torso(self) -> bool {
        matches!(
            self,
            MechLocation::CenterTorso | MechLocation::LeftTorso | MechLocation::RightTorso
        )
    }

    /// Whether this is a side torso.
    #[must_use]
    pub const fn is_side_torso(self) -> bool {
        matches!(self, MechLocation::LeftTorso | MechLocation::RightTorso)
    }

    /// Whether this location carries rear armor.
    #[must_use]
    pub const fn has_rear_armor(self) -> bool {
        self.is_torso()
    }

    /// Location that receives transferred damage, if any.
    #[must_use]
    pub const fn transfers_to(self) -> Option<MechLocation> {
        match self {
            MechLocation::LeftArm | MechLocation::LeftLeg => Some(MechLocation::LeftTorso),
            MechLocation::RightArm | MechLocation::RightLeg => Some(MechLocation::RightTorso),
            MechLocation::LeftTorso | MechLocation::RightTorso => Some(MechLocation::CenterTorso),
            MechLocation::Head | MechLocation::CenterTorso => None,
        }
    }

    /// Slots permanently occupied by actuators, cockpit and sensors.
    ///
    /// Engine and gyro slots are not included; they depend on the selected
    /// components (see [`crate::footprint`]).
    #[must_use]
    pub const fn fixed_slots(self) -> &'static [u8] {
        match self {
            // life support, sensors, cockpit, (free), sensors, life support
            MechLocation::Head => &[0, 1, 2, 4, 5],
            // shoulder/hip, upper, lower, hand/foot
            MechLocation::LeftArm
            | MechLocation::RightArm
            | MechLocation::LeftLeg
            | MechLocation::RightLeg => &[0, 1, 2, 3],
            MechLocation::CenterTorso | MechLocation::LeftTorso | MechLocation::RightTorso => &[],
        }
    }

    /// Record-sheet abbreviation.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            MechLocation::Head => "HD",
            MechLocation::CenterTorso => "CT",
            MechLocation::LeftTorso => "LT",
            MechLocation::RightTorso => "RT",
            MechLocation::LeftArm => "LA",
            MechLocation::RightArm => "RA",
            MechLocation::LeftLeg => "LL",
            MechLocation::RightLeg => "RL",
        }
    }
}

impl std::fmt::Display for MechLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_counts() {
        let total: u32 = MechLocation::ALL.iter().map(|l| u32::from(l.slot_count())).sum();
        assert_eq!(total, TOTAL_CRITICAL_SLOTS);
    }

    #[test]
    fn test_fixed_slots_within_bounds() {
        for location in MechLocation::ALL {
            assert!(location.fixed_slots().iter().all(|&s| s < location.slot_count()));
        }
        // One free head slot
        assert_eq!(MechLocation::Head.fixed_slots().len(), 5);
    }

    #[test]
    fn test_transfer_chain_ends_in_center_torso() {
        let mut location = MechLocation::LeftArm;
        while let Some(next) = location.transfers_to() {
            location = next;
        }
        assert_eq!(location, MechLocation::CenterTorso);
    }
}
