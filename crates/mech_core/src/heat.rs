//! Heat scale lookup.
//!
//! A static, strictly ascending threshold table. Roll values are the target
//! number needed to avoid the effect; `Some(0)` means the effect is
//! automatic, and `None` means there is no risk at that heat.

use serde::{Deserialize, Serialize};

use crate::components::HeatSinkType;

/// Effects in force at a heat level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeatScaleEffect {
    /// Lowest heat at which this row applies.
    pub threshold: u32,
    /// Walking MP modifier (zero or negative).
    pub movement_penalty: i32,
    /// To-hit modifier (zero or positive).
    pub to_hit_penalty: i32,
    /// Roll needed to avoid shutdown. `Some(0)` is automatic shutdown.
    pub shutdown_roll: Option<u8>,
    /// Roll needed to avoid an ammunition explosion. `Some(0)` is automatic.
    pub ammo_explosion_roll: Option<u8>,
}

impl HeatScaleEffect {
    /// Whether shutdown happens without a roll.
    #[must_use]
    pub const fn is_automatic_shutdown(&self) -> bool {
        matches!(self.shutdown_roll, Some(0))
    }

    /// Whether ammunition explodes without a roll.
    #[must_use]
    pub const fn is_automatic_ammo_explosion(&self) -> bool {
        matches!(self.ammo_explosion_roll, Some(0))
    }
}

const fn row(
    threshold: u32,
    movement_penalty: i32,
    to_hit_penalty: i32,
    shutdown_roll: Option<u8>,
    ammo_explosion_roll: Option<u8>,
) -> HeatScaleEffect {
    HeatScaleEffect {
        threshold,
        movement_penalty,
        to_hit_penalty,
        shutdown_roll,
        ammo_explosion_roll,
    }
}

/// The heat scale, ascending by threshold.
pub const HEAT_SCALE: [HeatScaleEffect; 12] = [
    row(0, 0, 0, None, None),
    row(5, -1, 0, None, None),
    row(10, -2, 1, None, None),
    row(15, -3, 1, Some(4), None),
    row(18, -4, 2, Some(4), None),
    row(20, -5, 2, Some(4), Some(4)),
    row(22, -6, 3, Some(6), Some(6)),
    row(24, -7, 3, Some(6), Some(8)),
    row(25, -8, 4, Some(8), Some(8)),
    row(26, -9, 4, Some(8), Some(10)),
    row(28, -10, 4, Some(10), Some(10)),
    row(30, -11, 5, Some(0), Some(0)),
];

/// Effects for a heat level: the row with the greatest threshold ≤ `heat`.
#[must_use]
pub fn heat_effect_at(heat: u32) -> HeatScaleEffect {
    let index = HEAT_SCALE.partition_point(|effect| effect.threshold <= heat);
    // threshold 0 always matches, so index ≥ 1
    HEAT_SCALE[index.saturating_sub(1)]
}

/// Heat dissipated per turn by a number of heat sinks.
#[must_use]
pub const fn heat_dissipation(heat_sink: HeatSinkType, count: u32) -> u32 {
    let per_sink = match heat_sink {
        HeatSinkType::Single => 1,
        HeatSinkType::Double | HeatSinkType::Laser => 2,
    };
    count.saturating_mul(per_sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_strictly_ascending() {
        assert!(HEAT_SCALE.windows(2).all(|w| w[0].threshold < w[1].threshold));
    }

    #[test]
    fn test_lookup_between_thresholds() {
        assert_eq!(heat_effect_at(0).threshold, 0);
        assert_eq!(heat_effect_at(4).threshold, 0);
        assert_eq!(heat_effect_at(17).threshold, 15);
        assert_eq!(heat_effect_at(27).threshold, 26);
    }

    #[test]
    fn test_heat_24() {
        let effect = heat_effect_at(24);
        assert_eq!(effect.movement_penalty, -7);
        assert_eq!(effect.shutdown_roll, Some(6));
        assert_eq!(effect.ammo_explosion_roll, Some(8));
    }

    #[test]
    fn test_automatic_at_and_above_30() {
        for heat in [30, 35, 99] {
            let effect = heat_effect_at(heat);
            assert!(effect.is_automatic_shutdown());
            assert!(effect.is_automatic_ammo_explosion());
        }
        assert!(!heat_effect_at(29).is_automatic_shutdown());
    }

    #[test]
    fn test_heat_dissipation() {
        assert_eq!(heat_dissipation(HeatSinkType::Single, 10), 10);
        assert_eq!(heat_dissipation(HeatSinkType::Double, 12), 24);
        assert_eq!(heat_dissipation(HeatSinkType::Double, u32::MAX), u32::MAX);
    }
}
