//! Static rulebook tables.
//!
//! Pure data: the standard fusion engine weight table and the internal
//! structure table. Lookups outside the tables are precondition violations.

use crate::error::{Result, RulesError};
use crate::location::MechLocation;

/// Highest engine rating the construction rules allow.
pub const MAX_ENGINE_RATING: u32 = 400;

/// Lowest engine rating in the standard table.
pub const MIN_ENGINE_RATING: u32 = 10;

/// Rating step between table rows.
pub const ENGINE_RATING_STEP: u32 = 5;

/// Standard fusion engine weight in half tons, ratings 10 through 400.
const STANDARD_ENGINE_HALF_TONS: [u32; 79] = [
    1, 1, 1, 1, 2, 2, 2, 2, 3, 3, // 10-55
    3, 4, 4, 4, 5, 5, 6, 6, 6, 7, // 60-105
    7, 8, 8, 8, 9, 9, 10, 10, 11, 11, // 110-155
    12, 12, 12, 14, 14, 15, 15, 16, 17, 17, // 160-205
    18, 19, 20, 20, 21, 22, 23, 24, 25, 26, // 210-255
    27, 28, 29, 31, 32, 33, 35, 36, 38, 39, // 260-305
    41, 43, 45, 47, 49, 51, 54, 57, 59, 63, // 310-355
    66, 69, 73, 77, 82, 87, 92, 98, 105, // 360-400
];

/// Standard fusion engine weight for a rating, in half tons.
///
/// # Errors
///
/// Returns [`RulesError::UnsupportedRating`] for ratings above 400, below
/// 10, or not on a 5-point step.
pub fn standard_engine_half_tons(rating: u32) -> Result<u32> {
    if rating < MIN_ENGINE_RATING
        || rating > MAX_ENGINE_RATING
        || rating % ENGINE_RATING_STEP != 0
    {
        return Err(RulesError::UnsupportedRating(rating));
    }
    let index = (rating - MIN_ENGINE_RATING) / ENGINE_RATING_STEP;
    STANDARD_ENGINE_HALF_TONS
        .get(index as usize)
        .copied()
        .ok_or(RulesError::UnsupportedRating(rating))
}

/// Internal structure points for one unit tonnage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructurePoints {
    /// Head.
    pub head: u32,
    /// Center torso.
    pub center_torso: u32,
    /// Each side torso.
    pub side_torso: u32,
    /// Each arm.
    pub arm: u32,
    /// Each leg.
    pub leg: u32,
}

impl StructurePoints {
    /// Sum over all eight biped locations.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.head + self.center_torso + 2 * (self.side_torso + self.arm + self.leg)
    }

    /// Points in one location.
    #[must_use]
    pub const fn for_location(&self, location: MechLocation) -> u32 {
        match location {
            MechLocation::Head => self.head,
            MechLocation::CenterTorso => self.center_torso,
            MechLocation::LeftTorso | MechLocation::RightTorso => self.side_torso,
            MechLocation::LeftArm | MechLocation::RightArm => self.arm,
            MechLocation::LeftLeg | MechLocation::RightLeg => self.leg,
        }
    }
}

/// Head structure is the same for every tonnage.
const HEAD_STRUCTURE: u32 = 3;

/// (center torso, side torso, arm, leg) for tonnage 20 through 100.
const STRUCTURE_TABLE: [(u32, u32, u32, u32); 17] = [
    (6, 5, 3, 4),     // 20
    (8, 6, 4, 6),     // 25
    (10, 7, 5, 7),    // 30
    (11, 8, 6, 8),    // 35
    (12, 10, 6, 10),  // 40
    (14, 11, 7, 11),  // 45
    (16, 12, 8, 12),  // 50
    (18, 13, 9, 13),  // 55
    (20, 14, 10, 14), // 60
    (21, 15, 10, 15), // 65
    (22, 15, 11, 15), // 70
    (23, 16, 12, 16), // 75
    (25, 17, 13, 17), // 80
    (27, 18, 14, 18), // 85
    (29, 19, 15, 19), // 90
    (30, 20, 16, 20), // 95
    (31, 21, 17, 21), // 100
];

/// Internal structure points for a unit tonnage.
///
/// # Errors
///
/// Returns [`RulesError::UnsupportedTonnage`] unless tonnage is 20..=100
/// in steps of 5.
pub fn structure_points(tonnage: u32) -> Result<StructurePoints> {
    if !(20..=100).contains(&tonnage) || tonnage % 5 != 0 {
        return Err(RulesError::UnsupportedTonnage(tonnage));
    }
    let (center_torso, side_torso, arm, leg) = STRUCTURE_TABLE[((tonnage - 20) / 5) as usize];
    Ok(StructurePoints {
        head: HEAD_STRUCTURE,
        center_torso,
        side_torso,
        arm,
        leg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_table_known_values() {
        assert_eq!(standard_engine_half_tons(100), Ok(6));
        assert_eq!(standard_engine_half_tons(200), Ok(17));
        assert_eq!(standard_engine_half_tons(300), Ok(38));
        assert_eq!(standard_engine_half_tons(400), Ok(105));
    }

    #[test]
    fn test_engine_table_is_monotonic() {
        let weights: Vec<u32> = (MIN_ENGINE_RATING..=MAX_ENGINE_RATING)
            .step_by(ENGINE_RATING_STEP as usize)
            .map(|r| standard_engine_half_tons(r).unwrap())
            .collect();
        assert!(weights.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_engine_table_rejects_unsupported() {
        assert_eq!(
            standard_engine_half_tons(405),
            Err(RulesError::UnsupportedRating(405))
        );
        assert_eq!(standard_engine_half_tons(0), Err(RulesError::UnsupportedRating(0)));
        assert_eq!(standard_engine_half_tons(102), Err(RulesError::UnsupportedRating(102)));
    }

    #[test]
    fn test_structure_points() {
        let atlas = structure_points(100).unwrap();
        assert_eq!(atlas.center_torso, 31);
        assert_eq!(atlas.total(), 152);

        let locust = structure_points(20).unwrap();
        assert_eq!(locust.total(), 3 + 6 + 2 * (5 + 3 + 4));

        assert_eq!(structure_points(42), Err(RulesError::UnsupportedTonnage(42)));
        assert_eq!(structure_points(105), Err(RulesError::UnsupportedTonnage(105)));
    }
}
