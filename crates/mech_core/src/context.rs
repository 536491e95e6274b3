//! Unit context passed into every calculator call.

use serde::{Deserialize, Serialize};

use crate::calculator::engine_rating;
use crate::components::{CategoryTechBases, ComponentCategory};
use crate::math::{fixed_serde, Fixed};
use crate::tech_base::{TechBase, TechBaseMode};

/// Default construction year for new units.
pub const DEFAULT_CONSTRUCTION_YEAR: u16 = 3025;

/// Heat sinks a new unit starts with.
pub const DEFAULT_HEAT_SINKS: u32 = 10;

/// Snapshot of the unit-level numbers the rules depend on.
///
/// Owned by the caller. The engine reads it and never keeps a reference
/// to it past the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitContext {
    /// Unit tonnage.
    pub tonnage: u32,
    /// Engine rating, `min(tonnage × walk_mp, 400)`.
    pub engine_rating: u32,
    /// Walking movement points.
    pub walk_mp: u32,
    /// Jumping movement points (one jump jet each).
    pub jump_mp: u32,
    /// Total number of heat sinks, engine-integrated included.
    pub heat_sink_count: u32,
    /// Tonnage assigned to armor.
    #[serde(with = "fixed_serde")]
    pub armor_tonnage: Fixed,
    /// Single or mixed tech base.
    pub tech_base_mode: TechBaseMode,
    /// Tech base of each component category.
    pub category_tech_bases: CategoryTechBases,
    /// In-universe construction year.
    pub construction_year: u16,
}

impl UnitContext {
    /// Create a single-tech-base Inner Sphere context.
    #[must_use]
    pub fn new(tonnage: u32, walk_mp: u32) -> Self {
        Self {
            tonnage,
            engine_rating: engine_rating(tonnage, walk_mp),
            walk_mp,
            jump_mp: 0,
            heat_sink_count: DEFAULT_HEAT_SINKS,
            armor_tonnage: Fixed::ZERO,
            tech_base_mode: TechBaseMode::default(),
            category_tech_bases: CategoryTechBases::default(),
            construction_year: DEFAULT_CONSTRUCTION_YEAR,
        }
    }

    /// Builder method to pin every category to one tech base.
    #[must_use]
    pub fn with_tech_base(mut self, tech_base: TechBase) -> Self {
        self.tech_base_mode = TechBaseMode::Single(tech_base);
        self.category_tech_bases = CategoryTechBases::uniform(tech_base);
        self
    }

    /// Builder method to switch to mixed tech with explicit per-category bases.
    #[must_use]
    pub fn with_mixed_tech(mut self, category_tech_bases: CategoryTechBases) -> Self {
        self.tech_base_mode = TechBaseMode::Mixed;
        self.category_tech_bases = category_tech_bases;
        self
    }

    /// Builder method to set jump MP.
    #[must_use]
    pub fn with_jump_mp(mut self, jump_mp: u32) -> Self {
        self.jump_mp = jump_mp;
        self
    }

    /// Builder method to set the heat sink count.
    #[must_use]
    pub fn with_heat_sinks(mut self, count: u32) -> Self {
        self.heat_sink_count = count;
        self
    }

    /// Builder method to set armor tonnage.
    #[must_use]
    pub fn with_armor_tonnage(mut self, tons: Fixed) -> Self {
        self.armor_tonnage = tons;
        self
    }

    /// Builder method to set the construction year.
    #[must_use]
    pub fn with_construction_year(mut self, year: u16) -> Self {
        self.construction_year = year;
        self
    }

    /// Tech base in effect for a category.
    #[must_use]
    pub fn tech_base_for(&self, category: ComponentCategory) -> TechBase {
        match self.tech_base_mode {
            TechBaseMode::Single(tech_base) => tech_base,
            TechBaseMode::Mixed => self.category_tech_bases.get(category),
        }
    }

    /// Recompute the engine rating from tonnage and walk MP.
    pub fn refresh_engine_rating(&mut self) {
        self.engine_rating = engine_rating(self.tonnage, self.walk_mp);
    }
}
