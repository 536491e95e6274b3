//! Structural component identifiers.
//!
//! Every configurable component category is a closed enum, and
//! [`ComponentId`] is a tagged variant over all of them. Code that needs to
//! pick a field "by category" matches on [`ComponentCategory`] exhaustively
//! instead of indexing a map by name.

use serde::{Deserialize, Serialize};

use crate::tech_base::TechBase;

/// Component categories governed by the construction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentCategory {
    /// Fusion or non-fusion power plant.
    Engine,
    /// Gyroscope.
    Gyro,
    /// Internal structure.
    Structure,
    /// Armor.
    Armor,
    /// Heat sinks.
    HeatSink,
    /// Jump jets.
    JumpJet,
    /// Movement enhancement (MASC, TSM).
    Enhancement,
}

impl ComponentCategory {
    /// All categories, in canonical order.
    pub const ALL: [ComponentCategory; 7] = [
        ComponentCategory::Engine,
        ComponentCategory::Gyro,
        ComponentCategory::Structure,
        ComponentCategory::Armor,
        ComponentCategory::HeatSink,
        ComponentCategory::JumpJet,
        ComponentCategory::Enhancement,
    ];
}

/// Engine types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EngineType {
    /// Standard fusion engine.
    Standard,
    /// Extra-light fusion engine.
    ExtraLight,
    /// Light fusion engine.
    Light,
    /// Extra-extra-light fusion engine.
    ExtraExtraLight,
    /// Compact fusion engine.
    Compact,
    /// Internal combustion engine.
    InternalCombustion,
    /// Fuel cell.
    FuelCell,
    /// Fission engine.
    Fission,
}

/// Gyro types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GyroType {
    /// Standard gyro.
    Standard,
    /// Extra-light gyro.
    ExtraLight,
    /// Compact gyro.
    Compact,
    /// Heavy-duty gyro.
    HeavyDuty,
}

/// Internal structure types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StructureType {
    /// Standard structure.
    Standard,
    /// Endo Steel.
    EndoSteel,
    /// Endo-Composite.
    EndoComposite,
    /// Reinforced.
    Reinforced,
    /// Composite.
    Composite,
    /// Industrial.
    Industrial,
}

/// Armor types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArmorType {
    /// Standard armor.
    Standard,
    /// Ferro-Fibrous.
    FerroFibrous,
    /// Light Ferro-Fibrous.
    LightFerroFibrous,
    /// Heavy Ferro-Fibrous.
    HeavyFerroFibrous,
    /// Stealth.
    Stealth,
    /// Reactive.
    Reactive,
    /// Reflective (laser-reflective).
    Reflective,
    /// Hardened.
    Hardened,
}

/// Heat sink types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeatSinkType {
    /// Single heat sink.
    Single,
    /// Double heat sink.
    Double,
    /// Laser heat sink.
    Laser,
}

/// Jump jet types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JumpJetType {
    /// Standard jump jets.
    Standard,
    /// Improved jump jets.
    Improved,
}

/// Movement enhancement types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnhancementType {
    /// No enhancement.
    None,
    /// Myomer Accelerator Signal Circuitry.
    Masc,
    /// Triple-Strength Myomer.
    TripleStrengthMyomer,
}

/// Identifier of a component variant, tagged by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentId {
    /// Engine variant.
    Engine(EngineType),
    /// Gyro variant.
    Gyro(GyroType),
    /// Structure variant.
    Structure(StructureType),
    /// Armor variant.
    Armor(ArmorType),
    /// Heat sink variant.
    HeatSink(HeatSinkType),
    /// Jump jet variant.
    JumpJet(JumpJetType),
    /// Enhancement variant.
    Enhancement(EnhancementType),
}

impl ComponentId {
    /// Category this component belongs to.
    #[must_use]
    pub const fn category(self) -> ComponentCategory {
        match self {
            ComponentId::Engine(_) => ComponentCategory::Engine,
            ComponentId::Gyro(_) => ComponentCategory::Gyro,
            ComponentId::Structure(_) => ComponentCategory::Structure,
            ComponentId::Armor(_) => ComponentCategory::Armor,
            ComponentId::HeatSink(_) => ComponentCategory::HeatSink,
            ComponentId::JumpJet(_) => ComponentCategory::JumpJet,
            ComponentId::Enhancement(_) => ComponentCategory::Enhancement,
        }
    }

    /// Stable kebab-case identifier, used for slot items the component
    /// places into the critical-slot grid.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            ComponentId::Engine(engine) => match engine {
                EngineType::Standard => "engine-standard",
                EngineType::ExtraLight => "engine-xl",
                EngineType::Light => "engine-light",
                EngineType::ExtraExtraLight => "engine-xxl",
                EngineType::Compact => "engine-compact",
                EngineType::InternalCombustion => "engine-ice",
                EngineType::FuelCell => "engine-fuel-cell",
                EngineType::Fission => "engine-fission",
            },
            ComponentId::Gyro(gyro) => match gyro {
                GyroType::Standard => "gyro-standard",
                GyroType::ExtraLight => "gyro-xl",
                GyroType::Compact => "gyro-compact",
                GyroType::HeavyDuty => "gyro-heavy-duty",
            },
            ComponentId::Structure(structure) => match structure {
                StructureType::Standard => "structure-standard",
                StructureType::EndoSteel => "endo-steel",
                StructureType::EndoComposite => "endo-composite",
                StructureType::Reinforced => "structure-reinforced",
                StructureType::Composite => "structure-composite",
                StructureType::Industrial => "structure-industrial",
            },
            ComponentId::Armor(armor) => match armor {
                ArmorType::Standard => "armor-standard",
                ArmorType::FerroFibrous => "ferro-fibrous",
                ArmorType::LightFerroFibrous => "light-ferro-fibrous",
                ArmorType::HeavyFerroFibrous => "heavy-ferro-fibrous",
                ArmorType::Stealth => "stealth-armor",
                ArmorType::Reactive => "reactive-armor",
                ArmorType::Reflective => "reflective-armor",
                ArmorType::Hardened => "hardened-armor",
            },
            ComponentId::HeatSink(heat_sink) => match heat_sink {
                HeatSinkType::Single => "heat-sink",
                HeatSinkType::Double => "double-heat-sink",
                HeatSinkType::Laser => "laser-heat-sink",
            },
            ComponentId::JumpJet(jump_jet) => match jump_jet {
                JumpJetType::Standard => "jump-jet",
                JumpJetType::Improved => "improved-jump-jet",
            },
            ComponentId::Enhancement(enhancement) => match enhancement {
                EnhancementType::None => "no-enhancement",
                EnhancementType::Masc => "masc",
                EnhancementType::TripleStrengthMyomer => "tsm",
            },
        }
    }
}

/// The currently selected variant for every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentSelections {
    /// Engine type.
    pub engine: EngineType,
    /// Gyro type.
    pub gyro: GyroType,
    /// Internal structure type.
    pub structure: StructureType,
    /// Armor type.
    pub armor: ArmorType,
    /// Heat sink type.
    pub heat_sink: HeatSinkType,
    /// Jump jet type.
    pub jump_jet: JumpJetType,
    /// Movement enhancement.
    pub enhancement: EnhancementType,
}

impl Default for ComponentSelections {
    fn default() -> Self {
        Self {
            engine: EngineType::Standard,
            gyro: GyroType::Standard,
            structure: StructureType::Standard,
            armor: ArmorType::Standard,
            heat_sink: HeatSinkType::Single,
            jump_jet: JumpJetType::Standard,
            enhancement: EnhancementType::None,
        }
    }
}

impl ComponentSelections {
    /// Selected variant for a category.
    #[must_use]
    pub const fn get(&self, category: ComponentCategory) -> ComponentId {
        match category {
            ComponentCategory::Engine => ComponentId::Engine(self.engine),
            ComponentCategory::Gyro => ComponentId::Gyro(self.gyro),
            ComponentCategory::Structure => ComponentId::Structure(self.structure),
            ComponentCategory::Armor => ComponentId::Armor(self.armor),
            ComponentCategory::HeatSink => ComponentId::HeatSink(self.heat_sink),
            ComponentCategory::JumpJet => ComponentId::JumpJet(self.jump_jet),
            ComponentCategory::Enhancement => ComponentId::Enhancement(self.enhancement),
        }
    }

    /// Replace the selection for the category `id` belongs to.
    pub fn set(&mut self, id: ComponentId) {
        match id {
            ComponentId::Engine(engine) => self.engine = engine,
            ComponentId::Gyro(gyro) => self.gyro = gyro,
            ComponentId::Structure(structure) => self.structure = structure,
            ComponentId::Armor(armor) => self.armor = armor,
            ComponentId::HeatSink(heat_sink) => self.heat_sink = heat_sink,
            ComponentId::JumpJet(jump_jet) => self.jump_jet = jump_jet,
            ComponentId::Enhancement(enhancement) => self.enhancement = enhancement,
        }
    }

    /// Iterate the selected ids in canonical category order.
    pub fn iter(&self) -> impl Iterator<Item = ComponentId> + '_ {
        ComponentCategory::ALL.into_iter().map(|category| self.get(category))
    }
}

/// Tech base per component category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct CategoryTechBases {
    /// Engine tech base.
    pub engine: TechBase,
    /// Gyro tech base.
    pub gyro: TechBase,
    /// Structure tech base.
    pub structure: TechBase,
    /// Armor tech base.
    pub armor: TechBase,
    /// Heat sink tech base.
    pub heat_sink: TechBase,
    /// Jump jet tech base.
    pub jump_jet: TechBase,
    /// Enhancement tech base.
    pub enhancement: TechBase,
}

impl CategoryTechBases {
    /// Every category on the same tech base.
    #[must_use]
    pub const fn uniform(tech_base: TechBase) -> Self {
        Self {
            engine: tech_base,
            gyro: tech_base,
            structure: tech_base,
            armor: tech_base,
            heat_sink: tech_base,
            jump_jet: tech_base,
            enhancement: tech_base,
        }
    }

    /// Tech base for a category.
    #[must_use]
    pub const fn get(&self, category: ComponentCategory) -> TechBase {
        match category {
            ComponentCategory::Engine => self.engine,
            ComponentCategory::Gyro => self.gyro,
            ComponentCategory::Structure => self.structure,
            ComponentCategory::Armor => self.armor,
            ComponentCategory::HeatSink => self.heat_sink,
            ComponentCategory::JumpJet => self.jump_jet,
            ComponentCategory::Enhancement => self.enhancement,
        }
    }

    /// Set the tech base for a category.
    pub fn set(&mut self, category: ComponentCategory, tech_base: TechBase) {
        match category {
            ComponentCategory::Engine => self.engine = tech_base,
            ComponentCategory::Gyro => self.gyro = tech_base,
            ComponentCategory::Structure => self.structure = tech_base,
            ComponentCategory::Armor => self.armor = tech_base,
            ComponentCategory::HeatSink => self.heat_sink = tech_base,
            ComponentCategory::JumpJet => self.jump_jet = tech_base,
            ComponentCategory::Enhancement => self.enhancement = tech_base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_get_set_round_trip() {
        let mut selections = ComponentSelections::default();
        selections.set(ComponentId::Engine(EngineType::ExtraLight));
        selections.set(ComponentId::Structure(StructureType::EndoSteel));

        assert_eq!(
            selections.get(ComponentCategory::Engine),
            ComponentId::Engine(EngineType::ExtraLight)
        );
        assert_eq!(
            selections.get(ComponentCategory::Structure),
            ComponentId::Structure(StructureType::EndoSteel)
        );
        assert_eq!(selections.gyro, GyroType::Standard);
    }

    #[test]
    fn test_component_id_category() {
        for id in ComponentSelections::default().iter() {
            assert_eq!(ComponentSelections::default().get(id.category()), id);
        }
    }

    #[test]
    fn test_slugs_are_distinct() {
        let ids = [
            ComponentId::Structure(StructureType::EndoSteel),
            ComponentId::Armor(ArmorType::FerroFibrous),
            ComponentId::HeatSink(HeatSinkType::Double),
            ComponentId::Enhancement(EnhancementType::Masc),
        ];
        let mut slugs: Vec<_> = ids.iter().map(|id| id.slug()).collect();
        slugs.dedup();
        assert_eq!(slugs.len(), ids.len());
        assert_eq!(ids[0].slug(), "endo-steel");
    }

    #[test]
    fn test_category_tech_bases() {
        let mut bases = CategoryTechBases::uniform(TechBase::InnerSphere);
        bases.set(ComponentCategory::HeatSink, TechBase::Clan);
        assert_eq!(bases.get(ComponentCategory::HeatSink), TechBase::Clan);
        assert_eq!(bases.get(ComponentCategory::Engine), TechBase::InnerSphere);
    }
}
