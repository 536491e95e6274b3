//! Tech base, tech-base mode and rules tier.

use serde::{Deserialize, Serialize};

/// One of the two mutually exclusive equipment lineages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum TechBase {
    /// Inner Sphere technology.
    #[default]
    InnerSphere,
    /// Clan technology.
    Clan,
}

impl TechBase {
    /// Both tech bases, in canonical order.
    pub const ALL: [TechBase; 2] = [TechBase::InnerSphere, TechBase::Clan];

    /// Normalise an external tech-base tag.
    ///
    /// This is the only place external tags are interpreted. Anything that
    /// is not recognisably Clan, including `"Mixed"` and unknown tags,
    /// resolves to Inner Sphere.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "clan" | "cl" => TechBase::Clan,
            "inner sphere" | "inner_sphere" | "innersphere" | "is" => TechBase::InnerSphere,
            _ => {
                tracing::debug!(tag, "Unrecognised tech base tag, defaulting to Inner Sphere");
                TechBase::InnerSphere
            }
        }
    }

    /// Short display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TechBase::InnerSphere => "IS",
            TechBase::Clan => "Clan",
        }
    }
}

/// Whether a unit draws from one tech base or mixes them per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechBaseMode {
    /// Every component category uses the same tech base.
    Single(TechBase),
    /// Each component category picks its own tech base.
    Mixed,
}

impl Default for TechBaseMode {
    fn default() -> Self {
        TechBaseMode::Single(TechBase::InnerSphere)
    }
}

impl TechBaseMode {
    /// The tech base every category is pinned to, if any.
    #[must_use]
    pub const fn single(self) -> Option<TechBase> {
        match self {
            TechBaseMode::Single(tech_base) => Some(tech_base),
            TechBaseMode::Mixed => None,
        }
    }

    /// Whether categories may diverge.
    #[must_use]
    pub const fn is_mixed(self) -> bool {
        matches!(self, TechBaseMode::Mixed)
    }
}

/// Rules complexity tier a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RulesTier {
    /// Introductory box set rules.
    Introductory,
    /// Standard tournament-legal rules.
    Standard,
    /// Advanced rules.
    Advanced,
    /// Experimental rules.
    Experimental,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_recognises_clan() {
        assert_eq!(TechBase::from_tag("Clan"), TechBase::Clan);
        assert_eq!(TechBase::from_tag("  CLAN "), TechBase::Clan);
        assert_eq!(TechBase::from_tag("CL"), TechBase::Clan);
    }

    #[test]
    fn test_from_tag_defaults_to_inner_sphere() {
        assert_eq!(TechBase::from_tag("Inner Sphere"), TechBase::InnerSphere);
        assert_eq!(TechBase::from_tag("Mixed"), TechBase::InnerSphere);
        assert_eq!(TechBase::from_tag("Mixed (Clan Chassis)"), TechBase::InnerSphere);
        assert_eq!(TechBase::from_tag(""), TechBase::InnerSphere);
    }

    #[test]
    fn test_mode_helpers() {
        assert_eq!(TechBaseMode::Single(TechBase::Clan).single(), Some(TechBase::Clan));
        assert!(TechBaseMode::Mixed.is_mixed());
        assert_eq!(TechBaseMode::Mixed.single(), None);
    }
}
