//! Rule lookups for the command line.
//!
//! Thin wrappers over the core calculators that return printable rows.
//! Weights are rendered as decimal strings so the output never goes
//! through floating point.

use mech_core::armor::{max_armor_points, optimize};
use mech_core::calculator::{component_slots, component_weight, heat_sink_split, SlotFootprint};
use mech_core::catalog::ComponentCatalog;
use mech_core::components::{ComponentId, EngineType, GyroType};
use mech_core::context::UnitContext;
use mech_core::error::Result;
use mech_core::heat::{heat_effect_at, HeatScaleEffect};
use mech_core::location::MechLocation;
use mech_core::tables::structure_points;
use mech_core::tech_base::TechBase;
use serde::Serialize;

/// Engine facts for one tonnage, walk MP and engine type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineSummary {
    /// Engine slug.
    pub engine: &'static str,
    /// Tech base label.
    pub tech_base: &'static str,
    /// Engine rating.
    pub rating: u32,
    /// Engine weight in tons.
    pub weight: String,
    /// Standard gyro weight in tons.
    pub gyro_weight: String,
    /// Center torso slots.
    pub center_slots: u8,
    /// Slots in each side torso.
    pub side_slots: u8,
    /// Heat sinks the engine carries without slots.
    pub integral_heat_sinks: u32,
}

/// Look up an engine.
///
/// # Errors
///
/// Returns an error for an untabulated tonnage or rating, or an engine the
/// tech base does not offer.
pub fn engine_summary(
    catalog: &ComponentCatalog,
    tonnage: u32,
    walk_mp: u32,
    engine: EngineType,
    tech_base: TechBase,
) -> Result<EngineSummary> {
    structure_points(tonnage)?;
    let context = UnitContext::new(tonnage, walk_mp).with_tech_base(tech_base);
    let id = ComponentId::Engine(engine);

    let weight = component_weight(catalog, id, &context)?;
    let gyro_weight = component_weight(catalog, ComponentId::Gyro(GyroType::Standard), &context)?;
    let (center_slots, side_slots) = match component_slots(catalog, id, &context)? {
        SlotFootprint::Engine(slots) => (slots.center, slots.left),
        SlotFootprint::Count(_) => (0, 0),
    };

    Ok(EngineSummary {
        engine: id.slug(),
        tech_base: tech_base.label(),
        rating: context.engine_rating,
        weight: weight.to_string(),
        gyro_weight: gyro_weight.to_string(),
        center_slots,
        side_slots,
        integral_heat_sinks: heat_sink_split(context.engine_rating, 0).internal,
    })
}

/// Heat scale row for a heat level.
#[must_use]
pub fn heat_row(heat: u32) -> HeatScaleEffect {
    heat_effect_at(heat)
}

/// Armor on one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArmorRow {
    /// Location code.
    pub location: &'static str,
    /// Front points.
    pub front: u32,
    /// Rear points.
    pub rear: u32,
}

/// Optimizer output for a point budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArmorPlan {
    /// Requested points.
    pub requested: u32,
    /// Maximum points for the tonnage.
    pub maximum: u32,
    /// Points allocated.
    pub allocated: u32,
    /// Per-location rows in record-sheet order.
    pub locations: Vec<ArmorRow>,
}

/// Spread `points` over a unit of `tonnage`.
///
/// # Errors
///
/// Returns an error for an untabulated tonnage.
pub fn armor_plan(points: u32, tonnage: u32) -> Result<ArmorPlan> {
    let allocation = optimize(points, tonnage)?;
    let locations = MechLocation::ALL
        .into_iter()
        .map(|location| {
            let armor = allocation.get(location);
            ArmorRow {
                location: location.code(),
                front: armor.front,
                rear: armor.rear,
            }
        })
        .collect();
    Ok(ArmorPlan {
        requested: points,
        maximum: max_armor_points(tonnage)?,
        allocated: allocation.total(),
        locations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mech_core::error::RulesError;

    #[test]
    fn test_engine_summary() {
        let catalog = ComponentCatalog::standard();
        let summary = engine_summary(&catalog, 50, 5, EngineType::ExtraLight, TechBase::InnerSphere).unwrap();
        assert_eq!(summary.rating, 250);
        assert_eq!(summary.weight, "6.5");
        assert_eq!(summary.gyro_weight, "3");
        assert_eq!((summary.center_slots, summary.side_slots), (6, 3));
        assert_eq!(summary.integral_heat_sinks, 10);
    }

    #[test]
    fn test_engine_summary_rejects_unavailable() {
        let catalog = ComponentCatalog::standard();
        assert!(matches!(
            engine_summary(&catalog, 50, 5, EngineType::Light, TechBase::Clan),
            Err(RulesError::ComponentUnavailable { .. })
        ));
        assert_eq!(
            engine_summary(&catalog, 52, 5, EngineType::Standard, TechBase::InnerSphere),
            Err(RulesError::UnsupportedTonnage(52))
        );
    }

    #[test]
    fn test_armor_plan() {
        let plan = armor_plan(500, 50).unwrap();
        assert_eq!(plan.maximum, 169);
        assert_eq!(plan.allocated, 169);
        assert_eq!(plan.locations.len(), 8);
        assert_eq!(plan.locations[0].location, "HD");
    }

    #[test]
    fn test_heat_row() {
        assert_eq!(heat_row(16).threshold, 15);
        assert!(heat_row(35).is_automatic_shutdown());
    }
}
