//! Component catalog.
//!
//! Immutable definitions for every structural component variant, keyed by
//! `(ComponentId, TechBase)`. The catalog is built explicitly with
//! [`ComponentCatalog::standard`] and passed by reference into every entry
//! point; there is no process-wide instance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::{
    ArmorType, ComponentCategory, ComponentId, EngineType, EnhancementType, GyroType,
    HeatSinkType, JumpJetType, StructureType,
};
use crate::error::{Result, RulesError};
use crate::tech_base::{RulesTier, TechBase};

/// How a component's weight is derived from the unit context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightRule {
    /// Standard engine table weight scaled by `numerator / denominator`.
    EngineTable {
        /// Multiplier numerator.
        numerator: u32,
        /// Multiplier denominator.
        denominator: u32,
    },
    /// `ceil(rating / 100)` scaled by a percentage.
    GyroRating {
        /// Percentage of the base gyro weight.
        percent: u32,
    },
    /// Fraction of unit tonnage, in permille.
    StructureFraction {
        /// Permille of unit tonnage.
        permille: u32,
    },
    /// Armor tonnage, with 16 points per ton scaled by a permille factor.
    ArmorTonnage {
        /// Points-per-ton factor in permille (1000 = 16 points per ton).
        factor_permille: u32,
    },
    /// Heat sinks beyond the free allotment.
    HeatSinks {
        /// Weight of each additional sink, in half tons.
        half_tons_per_sink: u32,
    },
    /// Per-jet weight from the tonnage class, times a multiplier.
    JumpJets {
        /// Weight multiplier over a standard jet.
        multiplier: u32,
    },
    /// Unit tonnage over a divisor, rounded to the nearest whole ton.
    TonnageDivisor {
        /// Divisor applied to unit tonnage.
        divisor: u32,
    },
    /// Adds no weight.
    Weightless,
}

/// How a component's critical-slot footprint is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotRule {
    /// Takes no slots.
    None,
    /// A fixed number of slots.
    Fixed(u32),
    /// Engine slots in the center torso and in each side torso.
    Engine {
        /// Center torso slots.
        center: u8,
        /// Slots in each side torso.
        side: u8,
    },
    /// Slots per heat sink not carried inside the engine.
    PerExternalHeatSink(u32),
    /// Slots per jump jet.
    PerJumpJet(u32),
    /// One slot per ton of component weight.
    EqualsWeight,
}

/// Boolean properties of a component definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentFlag {
    /// Canonical fallback variant of its category for its tech base.
    CategoryDefault,
}

/// Immutable definition of one component variant for one tech base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    /// Component variant.
    pub id: ComponentId,
    /// Tech base this definition applies to.
    pub tech_base: TechBase,
    /// Rules tier.
    pub rules_tier: RulesTier,
    /// Year the variant becomes available.
    pub introduction_year: u16,
    /// Weight derivation.
    pub weight_rule: WeightRule,
    /// Slot derivation.
    pub slot_rule: SlotRule,
    /// Flags.
    pub flags: Vec<ComponentFlag>,
}

impl ComponentDefinition {
    /// Category of this component.
    #[must_use]
    pub const fn category(&self) -> ComponentCategory {
        self.id.category()
    }

    /// Check whether the definition carries a flag.
    #[must_use]
    pub fn has_flag(&self, flag: ComponentFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Check whether the definition is the default for its category.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.has_flag(ComponentFlag::CategoryDefault)
    }

    /// Check whether the variant exists in a given year.
    #[must_use]
    pub const fn is_introduced_by(&self, year: u16) -> bool {
        self.introduction_year <= year
    }
}

/// Immutable table of component definitions.
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    definitions: BTreeMap<(ComponentId, TechBase), ComponentDefinition>,
}

impl ComponentCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, replacing any previous entry for the same key.
    pub fn insert(&mut self, definition: ComponentDefinition) {
        self.definitions
            .insert((definition.id, definition.tech_base), definition);
    }

    /// Look up a definition.
    #[must_use]
    pub fn definition(&self, id: ComponentId, tech_base: TechBase) -> Option<&ComponentDefinition> {
        self.definitions.get(&(id, tech_base))
    }

    /// Look up a definition that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::ComponentUnavailable`] if the variant does not
    /// exist for the tech base.
    pub fn require(&self, id: ComponentId, tech_base: TechBase) -> Result<&ComponentDefinition> {
        self.definition(id, tech_base)
            .ok_or(RulesError::ComponentUnavailable { id, tech_base })
    }

    /// Check whether a variant exists for a tech base.
    #[must_use]
    pub fn is_available(&self, id: ComponentId, tech_base: TechBase) -> bool {
        self.definitions.contains_key(&(id, tech_base))
    }

    /// Canonical default variant for a category and tech base.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::MissingDefault`] if the catalog has none.
    pub fn default_for(&self, category: ComponentCategory, tech_base: TechBase) -> Result<ComponentId> {
        self.variants(category, tech_base)
            .find(|definition| definition.is_default())
            .map(|definition| definition.id)
            .ok_or(RulesError::MissingDefault {
                category,
                tech_base,
            })
    }

    /// All variants of a category available for a tech base.
    pub fn variants(
        &self,
        category: ComponentCategory,
        tech_base: TechBase,
    ) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions
            .values()
            .filter(move |d| d.category() == category && d.tech_base == tech_base)
    }

    /// Iterate every definition in key order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions.values()
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Build the catalog of standard construction-rule components.
    #[must_use]
    #[rustfmt::skip]
    pub fn standard() -> Self {
        use ComponentId as C;
        use RulesTier::{Advanced, Experimental, Introductory, Standard};
        use TechBase::{Clan, InnerSphere as IS};

        let mut catalog = Self::new();
        let mut add = |id, tech_base, tier, year, weight_rule, slot_rule, is_default: bool| {
            catalog.insert(ComponentDefinition {
                id,
                tech_base,
                rules_tier: tier,
                introduction_year: year,
                weight_rule,
                slot_rule,
                flags: if is_default {
                    vec![ComponentFlag::CategoryDefault]
                } else {
                    Vec::new()
                },
            });
        };

        let engine = |numerator, denominator| WeightRule::EngineTable {
            numerator,
            denominator,
        };
        let engine_slots = |center, side| SlotRule::Engine { center, side };

        // Engines
        add(C::Engine(EngineType::Standard), IS, Introductory, 2021, engine(1, 1), engine_slots(6, 0), true);
        add(C::Engine(EngineType::Standard), Clan, Introductory, 2807, engine(1, 1), engine_slots(6, 0), true);
        add(C::Engine(EngineType::ExtraLight), IS, Standard, 2579, engine(1, 2), engine_slots(6, 3), false);
        add(C::Engine(EngineType::ExtraLight), Clan, Standard, 2827, engine(1, 2), engine_slots(6, 2), false);
        add(C::Engine(EngineType::Light), IS, Standard, 3062, engine(3, 4), engine_slots(6, 2), false);
        add(C::Engine(EngineType::ExtraExtraLight), IS, Experimental, 3055, engine(1, 3), engine_slots(6, 6), false);
        add(C::Engine(EngineType::ExtraExtraLight), Clan, Experimental, 3055, engine(1, 3), engine_slots(6, 4), false);
        add(C::Engine(EngineType::Compact), IS, Standard, 3068, engine(3, 2), engine_slots(3, 0), false);
        add(C::Engine(EngineType::InternalCombustion), IS, Introductory, 1950, engine(2, 1), engine_slots(6, 0), false);
        add(C::Engine(EngineType::InternalCombustion), Clan, Introductory, 2807, engine(2, 1), engine_slots(6, 0), false);
        add(C::Engine(EngineType::FuelCell), IS, Advanced, 2470, engine(6, 5), engine_slots(6, 0), false);
        add(C::Engine(EngineType::Fission), IS, Advanced, 2470, engine(7, 4), engine_slots(6, 0), false);

        // Gyros
        let gyro = |percent| WeightRule::GyroRating { percent };
        add(C::Gyro(GyroType::Standard), IS, Introductory, 2300, gyro(100), SlotRule::Fixed(4), true);
        add(C::Gyro(GyroType::Standard), Clan, Introductory, 2807, gyro(100), SlotRule::Fixed(4), true);
        add(C::Gyro(GyroType::ExtraLight), IS, Standard, 3067, gyro(50), SlotRule::Fixed(6), false);
        add(C::Gyro(GyroType::Compact), IS, Standard, 3068, gyro(150), SlotRule::Fixed(2), false);
        add(C::Gyro(GyroType::HeavyDuty), IS, Standard, 3067, gyro(200), SlotRule::Fixed(4), false);

        // Internal structure
        let structure = |permille| WeightRule::StructureFraction { permille };
        add(C::Structure(StructureType::Standard), IS, Introductory, 2350, structure(100), SlotRule::None, true);
        add(C::Structure(StructureType::Standard), Clan, Introductory, 2807, structure(100), SlotRule::None, true);
        add(C::Structure(StructureType::EndoSteel), IS, Standard, 2487, structure(50), SlotRule::Fixed(14), false);
        add(C::Structure(StructureType::EndoSteel), Clan, Standard, 2827, structure(50), SlotRule::Fixed(7), false);
        add(C::Structure(StructureType::EndoComposite), IS, Advanced, 3067, structure(75), SlotRule::Fixed(7), false);
        add(C::Structure(StructureType::EndoComposite), Clan, Advanced, 3073, structure(75), SlotRule::Fixed(4), false);
        add(C::Structure(StructureType::Reinforced), IS, Advanced, 3057, structure(200), SlotRule::None, false);
        add(C::Structure(StructureType::Reinforced), Clan, Advanced, 3057, structure(200), SlotRule::None, false);
        add(C::Structure(StructureType::Composite), IS, Advanced, 3061, structure(50), SlotRule::None, false);
        add(C::Structure(StructureType::Industrial), IS, Standard, 2350, structure(200), SlotRule::None, false);

        // Armor
        let armor = |factor_permille| WeightRule::ArmorTonnage { factor_permille };
        add(C::Armor(ArmorType::Standard), IS, Introductory, 2470, armor(1000), SlotRule::None, true);
        add(C::Armor(ArmorType::Standard), Clan, Introductory, 2807, armor(1000), SlotRule::None, true);
        add(C::Armor(ArmorType::FerroFibrous), IS, Standard, 2571, armor(1120), SlotRule::Fixed(14), false);
        add(C::Armor(ArmorType::FerroFibrous), Clan, Standard, 2820, armor(1200), SlotRule::Fixed(7), false);
        add(C::Armor(ArmorType::LightFerroFibrous), IS, Standard, 3067, armor(1060), SlotRule::Fixed(7), false);
        add(C::Armor(ArmorType::HeavyFerroFibrous), IS, Standard, 3069, armor(1240), SlotRule::Fixed(21), false);
        add(C::Armor(ArmorType::Stealth), IS, Standard, 3063, armor(1000), SlotRule::Fixed(12), false);
        add(C::Armor(ArmorType::Reactive), IS, Advanced, 3063, armor(1000), SlotRule::Fixed(14), false);
        add(C::Armor(ArmorType::Reactive), Clan, Advanced, 3065, armor(1000), SlotRule::Fixed(7), false);
        add(C::Armor(ArmorType::Reflective), IS, Advanced, 3058, armor(1000), SlotRule::Fixed(10), false);
        add(C::Armor(ArmorType::Reflective), Clan, Advanced, 3061, armor(1000), SlotRule::Fixed(5), false);
        add(C::Armor(ArmorType::Hardened), IS, Advanced, 3047, armor(500), SlotRule::None, false);
        add(C::Armor(ArmorType::Hardened), Clan, Advanced, 3061, armor(500), SlotRule::None, false);

        // Heat sinks
        let sinks = WeightRule::HeatSinks {
            half_tons_per_sink: 2,
        };
        add(C::HeatSink(HeatSinkType::Single), IS, Introductory, 2022, sinks, SlotRule::PerExternalHeatSink(1), true);
        add(C::HeatSink(HeatSinkType::Single), Clan, Introductory, 2807, sinks, SlotRule::PerExternalHeatSink(1), true);
        add(C::HeatSink(HeatSinkType::Double), IS, Standard, 2567, sinks, SlotRule::PerExternalHeatSink(3), false);
        add(C::HeatSink(HeatSinkType::Double), Clan, Standard, 2825, sinks, SlotRule::PerExternalHeatSink(2), false);
        add(C::HeatSink(HeatSinkType::Laser), Clan, Advanced, 3051, sinks, SlotRule::PerExternalHeatSink(2), false);

        // Jump jets
        let jets = |multiplier| WeightRule::JumpJets { multiplier };
        add(C::JumpJet(JumpJetType::Standard), IS, Introductory, 2471, jets(1), SlotRule::PerJumpJet(1), true);
        add(C::JumpJet(JumpJetType::Standard), Clan, Introductory, 2807, jets(1), SlotRule::PerJumpJet(1), true);
        add(C::JumpJet(JumpJetType::Improved), IS, Standard, 3069, jets(2), SlotRule::PerJumpJet(2), false);
        add(C::JumpJet(JumpJetType::Improved), Clan, Standard, 3069, jets(2), SlotRule::PerJumpJet(2), false);

        // Movement enhancements
        add(C::Enhancement(EnhancementType::None), IS, Introductory, 0, WeightRule::Weightless, SlotRule::None, true);
        add(C::Enhancement(EnhancementType::None), Clan, Introductory, 0, WeightRule::Weightless, SlotRule::None, true);
        add(C::Enhancement(EnhancementType::Masc), IS, Standard, 2740, WeightRule::TonnageDivisor { divisor: 20 }, SlotRule::EqualsWeight, false);
        add(C::Enhancement(EnhancementType::Masc), Clan, Standard, 2827, WeightRule::TonnageDivisor { divisor: 25 }, SlotRule::EqualsWeight, false);
        add(C::Enhancement(EnhancementType::TripleStrengthMyomer), IS, Standard, 3050, WeightRule::Weightless, SlotRule::Fixed(6), false);

        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_defaults() {
        let catalog = ComponentCatalog::standard();
        for category in ComponentCategory::ALL {
            for tech_base in TechBase::ALL {
                let default = catalog.default_for(category, tech_base).unwrap();
                assert_eq!(default.category(), category);
            }
        }
    }

    #[test]
    fn test_slot_rules_vary_by_tech_base() {
        let catalog = ComponentCatalog::standard();
        let endo = ComponentId::Structure(StructureType::EndoSteel);
        assert_eq!(
            catalog.require(endo, TechBase::InnerSphere).unwrap().slot_rule,
            SlotRule::Fixed(14)
        );
        assert_eq!(
            catalog.require(endo, TechBase::Clan).unwrap().slot_rule,
            SlotRule::Fixed(7)
        );
    }

    #[test]
    fn test_unavailable_variant() {
        let catalog = ComponentCatalog::standard();
        let light = ComponentId::Engine(EngineType::Light);
        assert!(catalog.is_available(light, TechBase::InnerSphere));
        assert!(!catalog.is_available(light, TechBase::Clan));
        assert_eq!(
            catalog.require(light, TechBase::Clan),
            Err(RulesError::ComponentUnavailable {
                id: light,
                tech_base: TechBase::Clan
            })
        );
    }

    #[test]
    fn test_variants_are_filtered() {
        let catalog = ComponentCatalog::standard();
        let clan_sinks: Vec<_> = catalog
            .variants(ComponentCategory::HeatSink, TechBase::Clan)
            .map(|d| d.id)
            .collect();
        assert_eq!(clan_sinks.len(), 3);
        assert!(clan_sinks.contains(&ComponentId::HeatSink(HeatSinkType::Laser)));
    }
}
