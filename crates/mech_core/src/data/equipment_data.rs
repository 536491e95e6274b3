//! Equipment data structures for data-driven equipment definitions.

use serde::{Deserialize, Serialize};

use crate::equipment::{EquipmentCategory, EquipmentDefinition, EquipmentTag};
use crate::math::{fixed_serde, Fixed};
use crate::tech_base::TechBase;

/// Data-driven equipment definition.
///
/// # Example RON
///
/// ```ron
/// EquipmentData(
///     id: "medium-laser",
///     name: "Medium Laser",
///     category: EnergyWeapon,
///     weight: 4294967296,  // Fixed-point for 1.0
///     critical_slots: 1,
///     tech_base: "Inner Sphere",
///     heat: 3,
///     introduction_year: Some(2300),
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquipmentData {
    /// Unique catalog id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Equipment category.
    pub category: EquipmentCategory,

    /// Weight in tons (fixed-point).
    #[serde(with = "fixed_serde")]
    pub weight: Fixed,

    /// Critical slots occupied.
    pub critical_slots: u32,

    /// Tech base tag, e.g. `"Inner Sphere"` or `"Clan"`.
    #[serde(default = "default_tech_base")]
    pub tech_base: String,

    /// Whether the item can explode when hit.
    #[serde(default)]
    pub explosive: bool,

    /// Heat generated per use.
    #[serde(default)]
    pub heat: u32,

    /// Year the item becomes available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction_year: Option<u16>,

    /// Rule tags.
    #[serde(default)]
    pub tags: Vec<EquipmentTag>,
}

/// Tech base tag for entries that do not name one.
fn default_tech_base() -> String {
    TechBase::InnerSphere.label().to_string()
}

impl EquipmentData {
    /// Convert to a definition, normalising the tech base tag.
    #[must_use]
    pub fn into_definition(self) -> EquipmentDefinition {
        EquipmentDefinition {
            tech_base: TechBase::from_tag(&self.tech_base),
            id: self.id,
            name: self.name,
            category: self.category,
            weight: self.weight,
            critical_slots: self.critical_slots,
            explosive: self.explosive,
            heat: self.heat,
            introduction_year: self.introduction_year,
            tags: self.tags,
        }
    }
}

/// Top-level equipment file.
///
/// # Example RON
///
/// ```ron
/// EquipmentCatalogData(
///     equipment: [...],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EquipmentCatalogData {
    /// Every equipment entry in the file.
    pub equipment: Vec<EquipmentData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_entry() {
        let text = r#"EquipmentCatalogData(
            equipment: [
                EquipmentData(
                    id: "tag",
                    name: "TAG",
                    category: Electronics,
                    weight: 4294967296,
                    critical_slots: 1,
                    tags: [ElectronicWarfare],
                ),
            ],
        )"#;
        let data: EquipmentCatalogData = ron::from_str(text).unwrap();
        let definition = data.equipment[0].clone().into_definition();

        assert_eq!(definition.tech_base, TechBase::InnerSphere);
        assert_eq!(definition.weight, Fixed::from_num(1));
        assert!(definition.has_tag(EquipmentTag::ElectronicWarfare));
        assert!(!definition.explosive);
    }

    #[test]
    fn test_tech_base_tag_normalised() {
        let mut data = EquipmentData {
            id: "er-medium-laser".to_string(),
            name: "ER Medium Laser".to_string(),
            category: EquipmentCategory::EnergyWeapon,
            weight: Fixed::from_num(1),
            critical_slots: 1,
            tech_base: "CLAN".to_string(),
            explosive: false,
            heat: 5,
            introduction_year: None,
            tags: Vec::new(),
        };
        assert_eq!(data.clone().into_definition().tech_base, TechBase::Clan);

        data.tech_base = "Mixed".to_string();
        assert_eq!(data.into_definition().tech_base, TechBase::InnerSphere);
    }
}
