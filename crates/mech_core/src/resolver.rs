//! Tech-base resolution with per-category selection memory.
//!
//! When a category moves to another tech base, the variant it leaves
//! behind is remembered for the outgoing base. Moving back restores it.
//! With nothing remembered, or a remembered variant the catalog no longer
//! offers, the category falls back to its canonical default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::ComponentCatalog;
use crate::components::{CategoryTechBases, ComponentCategory, ComponentId, ComponentSelections};
use crate::error::{Result, RulesError};
use crate::tech_base::{TechBase, TechBaseMode};

/// Last-chosen variant per category and tech base.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionMemory {
    entries: BTreeMap<ComponentCategory, BTreeMap<TechBase, ComponentId>>,
}

impl SelectionMemory {
    /// Create an empty memory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `id` as the choice for its category under `tech_base`.
    pub fn remember(&mut self, tech_base: TechBase, id: ComponentId) {
        self.entries
            .entry(id.category())
            .or_default()
            .insert(tech_base, id);
    }

    /// Remembered choice, if any.
    #[must_use]
    pub fn recall(&self, category: ComponentCategory, tech_base: TechBase) -> Option<ComponentId> {
        self.entries
            .get(&category)
            .and_then(|by_base| by_base.get(&tech_base))
            .copied()
    }

    /// Number of remembered choices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Whether nothing is remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of resolving one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Variant to select.
    pub selection: ComponentId,
    /// Memory after the snapshot of the outgoing choice.
    pub memory: SelectionMemory,
}

/// Resolve the selection for `category` when it moves to `requested`.
///
/// # Errors
///
/// Returns [`RulesError::MissingDefault`] if nothing can be restored and the
/// catalog has no default for the target tech base.
pub fn resolve(
    catalog: &ComponentCatalog,
    category: ComponentCategory,
    requested: TechBase,
    selections: &ComponentSelections,
    category_tech_bases: &CategoryTechBases,
    memory: &SelectionMemory,
) -> Result<Resolution> {
    let outgoing = category_tech_bases.get(category);
    let current = selections.get(category);

    let mut memory = memory.clone();
    memory.remember(outgoing, current);

    let restored = memory
        .recall(category, requested)
        .filter(|&id| catalog.is_available(id, requested));
    let selection = match restored {
        Some(id) => {
            tracing::trace!(?category, ?requested, ?id, "Restored remembered selection");
            id
        }
        None => {
            let id = catalog.default_for(category, requested)?;
            tracing::trace!(?category, ?requested, ?id, "Falling back to default selection");
            id
        }
    };

    Ok(Resolution { selection, memory })
}

/// Reject a per-category tech base that conflicts with a single-base mode.
///
/// # Errors
///
/// Returns [`RulesError::TechBaseLocked`] when the unit is pinned to a
/// different tech base.
pub fn check_category_request(
    mode: TechBaseMode,
    category: ComponentCategory,
    requested: TechBase,
) -> Result<()> {
    match mode {
        TechBaseMode::Single(locked) if locked != requested => {
            Err(RulesError::TechBaseLocked { category, locked })
        }
        _ => Ok(()),
    }
}

/// Outcome of a tech-base mode switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSwitch {
    /// Selections after resolution.
    pub selections: ComponentSelections,
    /// Per-category tech bases after the switch.
    pub category_tech_bases: CategoryTechBases,
    /// Memory after snapshotting every category.
    pub memory: SelectionMemory,
    /// Categories whose selection changed.
    pub changed: Vec<ComponentCategory>,
}

/// Apply a tech-base mode change to every category.
///
/// `Single(tb)` moves every category to `tb`. `Mixed` keeps each category
/// on its current tech base.
///
/// # Errors
///
/// Propagates [`resolve`] failures.
pub fn switch_mode(
    catalog: &ComponentCatalog,
    new_mode: TechBaseMode,
    selections: &ComponentSelections,
    category_tech_bases: &CategoryTechBases,
    memory: &SelectionMemory,
) -> Result<ModeSwitch> {
    let mut switched = ModeSwitch {
        selections: *selections,
        category_tech_bases: *category_tech_bases,
        memory: memory.clone(),
        changed: Vec::new(),
    };

    for category in ComponentCategory::ALL {
        let target = new_mode
            .single()
            .unwrap_or_else(|| category_tech_bases.get(category));
        let resolution = resolve(
            catalog,
            category,
            target,
            &switched.selections,
            &switched.category_tech_bases,
            &switched.memory,
        )?;

        if resolution.selection != switched.selections.get(category) {
            switched.changed.push(category);
        }
        switched.selections.set(resolution.selection);
        switched.category_tech_bases.set(category, target);
        switched.memory = resolution.memory;
    }

    tracing::debug!(?new_mode, changed = switched.changed.len(), "Switched tech base mode");
    Ok(switched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{EngineType, HeatSinkType};

    fn xl_selections() -> ComponentSelections {
        ComponentSelections {
            engine: EngineType::ExtraLight,
            heat_sink: HeatSinkType::Double,
            ..ComponentSelections::default()
        }
    }

    #[test]
    fn test_first_switch_falls_back_to_default() {
        let catalog = ComponentCatalog::standard();
        let bases = CategoryTechBases::uniform(TechBase::InnerSphere);
        let resolution = resolve(
            &catalog,
            ComponentCategory::Engine,
            TechBase::Clan,
            &xl_selections(),
            &bases,
            &SelectionMemory::new(),
        )
        .unwrap();

        assert_eq!(resolution.selection, ComponentId::Engine(EngineType::Standard));
        assert_eq!(
            resolution.memory.recall(ComponentCategory::Engine, TechBase::InnerSphere),
            Some(ComponentId::Engine(EngineType::ExtraLight))
        );
    }

    #[test]
    fn test_round_trip_restores_choices() {
        let catalog = ComponentCatalog::standard();
        let inner_sphere = CategoryTechBases::uniform(TechBase::InnerSphere);

        let to_clan = switch_mode(
            &catalog,
            TechBaseMode::Single(TechBase::Clan),
            &xl_selections(),
            &inner_sphere,
            &SelectionMemory::new(),
        )
        .unwrap();
        assert_eq!(to_clan.selections, ComponentSelections::default());
        assert_eq!(
            to_clan.changed,
            vec![ComponentCategory::Engine, ComponentCategory::HeatSink]
        );

        // Pick a Clan heat sink, then go back and forth
        let mut clan_selections = to_clan.selections;
        clan_selections.heat_sink = HeatSinkType::Laser;

        let back = switch_mode(
            &catalog,
            TechBaseMode::Single(TechBase::InnerSphere),
            &clan_selections,
            &to_clan.category_tech_bases,
            &to_clan.memory,
        )
        .unwrap();
        assert_eq!(back.selections, xl_selections());

        let again = switch_mode(
            &catalog,
            TechBaseMode::Single(TechBase::Clan),
            &back.selections,
            &back.category_tech_bases,
            &back.memory,
        )
        .unwrap();
        assert_eq!(again.selections.heat_sink, HeatSinkType::Laser);
    }

    #[test]
    fn test_unavailable_memory_entry_is_ignored() {
        let catalog = ComponentCatalog::standard();
        let mut memory = SelectionMemory::new();
        // Light engines only exist for the Inner Sphere
        memory.remember(TechBase::Clan, ComponentId::Engine(EngineType::Light));

        let resolution = resolve(
            &catalog,
            ComponentCategory::Engine,
            TechBase::Clan,
            &ComponentSelections::default(),
            &CategoryTechBases::default(),
            &memory,
        )
        .unwrap();
        assert_eq!(resolution.selection, ComponentId::Engine(EngineType::Standard));
    }

    #[test]
    fn test_mixed_mode_keeps_category_bases() {
        let catalog = ComponentCatalog::standard();
        let mut bases = CategoryTechBases::uniform(TechBase::InnerSphere);
        bases.set(ComponentCategory::HeatSink, TechBase::Clan);

        let switched = switch_mode(
            &catalog,
            TechBaseMode::Mixed,
            &xl_selections(),
            &bases,
            &SelectionMemory::new(),
        )
        .unwrap();
        assert_eq!(switched.category_tech_bases, bases);
        assert_eq!(switched.selections.engine, EngineType::ExtraLight);
    }

    #[test]
    fn test_category_request_locked_in_single_mode() {
        let mode = TechBaseMode::Single(TechBase::InnerSphere);
        assert_eq!(
            check_category_request(mode, ComponentCategory::Armor, TechBase::Clan),
            Err(RulesError::TechBaseLocked {
                category: ComponentCategory::Armor,
                locked: TechBase::InnerSphere
            })
        );
        assert!(check_category_request(mode, ComponentCategory::Armor, TechBase::InnerSphere).is_ok());
        assert!(check_category_request(TechBaseMode::Mixed, ComponentCategory::Armor, TechBase::Clan).is_ok());
    }
}
