//! Weight and critical-slot calculator.
//!
//! Pure functions mapping `(component, unit context)` to weight and slot
//! footprint. The catalog supplies the rule for each variant; this module
//! evaluates it.
//!
//! # Rounding
//!
//! All intermediate values are integer half tons. Every weight rule rounds
//! **up** to the next half ton, except enhancement weights which round to
//! the nearest whole ton.

use serde::{Deserialize, Serialize};

use crate::armor::max_armor_points;
use crate::catalog::{ComponentCatalog, ComponentDefinition, SlotRule, WeightRule};
use crate::components::{ComponentCategory, ComponentId, ComponentSelections};
use crate::context::UnitContext;
use crate::error::{Result, RulesError};
use crate::math::{
    ceil_to_half, div_ceil, div_round, fixed_serde, from_half_tons, to_half_tons_ceil, Fixed,
};
use crate::tables::{standard_engine_half_tons, structure_points, MAX_ENGINE_RATING};

/// Heat sinks every unit carries without paying tonnage for them.
pub const FREE_HEAT_SINKS: u32 = 10;

/// Engine rating divisor for engine-integrated heat sinks.
pub const RATING_PER_INTEGRAL_HEAT_SINK: u32 = 25;

/// Standard cockpit weight, in half tons.
pub const COCKPIT_HALF_TONS: u32 = 6;

/// Engine rating for a tonnage and walk MP, capped at the maximum rating.
#[must_use]
pub fn engine_rating(tonnage: u32, walk_mp: u32) -> u32 {
    tonnage.saturating_mul(walk_mp).min(MAX_ENGINE_RATING)
}

/// Engine slots per torso location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EngineSlots {
    /// Center torso slots.
    pub center: u8,
    /// Left torso slots.
    pub left: u8,
    /// Right torso slots.
    pub right: u8,
}

impl EngineSlots {
    /// Total slots over all three torsos.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.center as u32 + self.left as u32 + self.right as u32
    }
}

/// Critical-slot cost of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotFootprint {
    /// A plain slot count.
    Count(u32),
    /// Per-location breakdown for engines.
    Engine(EngineSlots),
}

impl SlotFootprint {
    /// Total slots regardless of shape.
    #[must_use]
    pub const fn total(&self) -> u32 {
        match self {
            SlotFootprint::Count(count) => *count,
            SlotFootprint::Engine(slots) => slots.total(),
        }
    }
}

/// Engine-integrated versus externally mounted heat sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeatSinkSplit {
    /// Heat sinks the engine can carry internally, `floor(rating / 25)`.
    pub internal: u32,
    /// Heat sinks that need critical slots, `max(0, total − internal)`.
    pub external: u32,
}

/// Split a heat sink count between engine and critical slots.
#[must_use]
pub fn heat_sink_split(engine_rating: u32, total: u32) -> HeatSinkSplit {
    let internal = engine_rating / RATING_PER_INTEGRAL_HEAT_SINK;
    HeatSinkSplit {
        internal,
        external: total.saturating_sub(internal),
    }
}

/// Weight of one standard jump jet, in half tons, by unit tonnage class.
#[must_use]
pub const fn jump_jet_half_tons(tonnage: u32) -> u32 {
    match tonnage {
        0..=55 => 1,
        56..=85 => 2,
        _ => 4,
    }
}

/// Weight of a supercharger for a given engine weight.
#[must_use]
pub fn supercharger_weight(engine_weight: Fixed) -> Fixed {
    ceil_to_half(engine_weight / Fixed::from_num(10))
}

/// `count × factor`, rejecting counts that overflow.
fn scaled(count: u32, factor: u32, quantity: &'static str) -> Result<u32> {
    count
        .checked_mul(factor)
        .ok_or(RulesError::ValueOutOfRange {
            quantity,
            value: count,
        })
}

/// Validate that a rating is tabulated without computing anything else.
fn check_rating(rating: u32) -> Result<()> {
    standard_engine_half_tons(rating).map(|_| ())
}

/// Weight of a definition in half tons.
fn definition_half_tons(definition: &ComponentDefinition, context: &UnitContext) -> Result<u32> {
    let half_tons = match definition.weight_rule {
        WeightRule::EngineTable {
            numerator,
            denominator,
        } => {
            let standard = standard_engine_half_tons(context.engine_rating)?;
            div_ceil(standard * numerator, denominator)
        }
        WeightRule::GyroRating { percent } => {
            check_rating(context.engine_rating)?;
            let base_tons = div_ceil(context.engine_rating, 100);
            div_ceil(base_tons * 2 * percent, 100)
        }
        WeightRule::StructureFraction { permille } => {
            structure_points(context.tonnage)?;
            div_ceil(context.tonnage * permille * 2, 1000)
        }
        WeightRule::ArmorTonnage { factor_permille } => {
            let max_points = max_armor_points(context.tonnage)?;
            // points / (16 × factor) tons, doubled for half tons
            let max_half_tons = div_ceil(max_points * 2 * 1000, 16 * factor_permille);
            to_half_tons_ceil(context.armor_tonnage.min(from_half_tons(max_half_tons)))
        }
        WeightRule::HeatSinks { half_tons_per_sink } => {
            let paid = context.heat_sink_count.saturating_sub(FREE_HEAT_SINKS);
            scaled(paid, half_tons_per_sink, "heat sink count")?
        }
        WeightRule::JumpJets { multiplier } => {
            scaled(
                context.jump_mp,
                jump_jet_half_tons(context.tonnage) * multiplier,
                "jump MP",
            )?
        }
        WeightRule::TonnageDivisor { divisor } => {
            structure_points(context.tonnage)?;
            div_round(context.tonnage, divisor) * 2
        }
        WeightRule::Weightless => 0,
    };
    Ok(half_tons)
}

fn definition_slots(definition: &ComponentDefinition, context: &UnitContext) -> Result<SlotFootprint> {
    let footprint = match definition.slot_rule {
        SlotRule::None => SlotFootprint::Count(0),
        SlotRule::Fixed(count) => SlotFootprint::Count(count),
        SlotRule::Engine { center, side } => SlotFootprint::Engine(EngineSlots {
            center,
            left: side,
            right: side,
        }),
        SlotRule::PerExternalHeatSink(per_sink) => {
            let split = heat_sink_split(context.engine_rating, context.heat_sink_count);
            SlotFootprint::Count(scaled(split.external, per_sink, "heat sink count")?)
        }
        SlotRule::PerJumpJet(per_jet) => {
            SlotFootprint::Count(scaled(context.jump_mp, per_jet, "jump MP")?)
        }
        SlotRule::EqualsWeight => {
            SlotFootprint::Count(definition_half_tons(definition, context)? / 2)
        }
    };
    Ok(footprint)
}

/// Weight of a component for a unit.
///
/// The tech base comes from the context's setting for the component's
/// category.
///
/// # Errors
///
/// Returns [`crate::error::RulesError::UnsupportedRating`] when an engine or
/// gyro is weighed for a rating outside the standard table,
/// [`crate::error::RulesError::UnsupportedTonnage`] for structure and armor
/// on an untabulated tonnage, and
/// [`crate::error::RulesError::ComponentUnavailable`] if the variant does
/// not exist for the tech base.
pub fn component_weight(
    catalog: &ComponentCatalog,
    id: ComponentId,
    context: &UnitContext,
) -> Result<Fixed> {
    let definition = catalog.require(id, context.tech_base_for(id.category()))?;
    Ok(from_half_tons(definition_half_tons(definition, context)?))
}

/// Critical-slot footprint of a component for a unit.
///
/// # Errors
///
/// Returns [`crate::error::RulesError::ComponentUnavailable`] if the variant
/// does not exist for the tech base.
pub fn component_slots(
    catalog: &ComponentCatalog,
    id: ComponentId,
    context: &UnitContext,
) -> Result<SlotFootprint> {
    let definition = catalog.require(id, context.tech_base_for(id.category()))?;
    definition_slots(definition, context)
}

/// Weight of every structural component of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WeightBreakdown {
    /// Engine.
    #[serde(with = "fixed_serde")]
    pub engine: Fixed,
    /// Gyro.
    #[serde(with = "fixed_serde")]
    pub gyro: Fixed,
    /// Internal structure.
    #[serde(with = "fixed_serde")]
    pub structure: Fixed,
    /// Armor.
    #[serde(with = "fixed_serde")]
    pub armor: Fixed,
    /// Heat sinks beyond the free allotment.
    #[serde(with = "fixed_serde")]
    pub heat_sinks: Fixed,
    /// Jump jets.
    #[serde(with = "fixed_serde")]
    pub jump_jets: Fixed,
    /// Movement enhancement.
    #[serde(with = "fixed_serde")]
    pub enhancement: Fixed,
    /// Cockpit.
    #[serde(with = "fixed_serde")]
    pub cockpit: Fixed,
}

impl WeightBreakdown {
    /// Weight recorded for one category.
    #[must_use]
    pub const fn get(&self, category: ComponentCategory) -> Fixed {
        match category {
            ComponentCategory::Engine => self.engine,
            ComponentCategory::Gyro => self.gyro,
            ComponentCategory::Structure => self.structure,
            ComponentCategory::Armor => self.armor,
            ComponentCategory::HeatSink => self.heat_sinks,
            ComponentCategory::JumpJet => self.jump_jets,
            ComponentCategory::Enhancement => self.enhancement,
        }
    }

    /// Sum of all structural weights, cockpit included.
    #[must_use]
    pub fn total(&self) -> Fixed {
        ComponentCategory::ALL
            .iter()
            .fold(self.cockpit, |sum, &category| sum + self.get(category))
    }
}

/// Weigh every selected component.
///
/// # Errors
///
/// Propagates the first precondition violation from [`component_weight`].
pub fn weight_breakdown(
    catalog: &ComponentCatalog,
    selections: &ComponentSelections,
    context: &UnitContext,
) -> Result<WeightBreakdown> {
    let weigh = |category| component_weight(catalog, selections.get(category), context);
    Ok(WeightBreakdown {
        engine: weigh(ComponentCategory::Engine)?,
        gyro: weigh(ComponentCategory::Gyro)?,
        structure: weigh(ComponentCategory::Structure)?,
        armor: weigh(ComponentCategory::Armor)?,
        heat_sinks: weigh(ComponentCategory::HeatSink)?,
        jump_jets: weigh(ComponentCategory::JumpJet)?,
        enhancement: weigh(ComponentCategory::Enhancement)?,
        cockpit: from_half_tons(COCKPIT_HALF_TONS),
    })
}
