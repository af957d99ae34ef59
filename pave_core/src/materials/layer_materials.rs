//! Structural layer coefficients (AASHTO-93 Part II, Figures 2.5–2.9).
//!
//! Keys are case-insensitive; spaces and hyphens are read as underscores,
//! so `"Crushed Stone"`, `"crushed-stone"` and `"crushed_stone"` are the same
//! material.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Coefficient returned for unknown material keys: the granular subbase
/// value, the lowest coefficient a structural layer is credited with.
pub const DEFAULT_STRUCTURAL_COEFFICIENT: f64 = 0.11;

/// Position of a layer in a flexible section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerPosition {
    Surface,
    Base,
    Subbase,
}

impl LayerPosition {
    pub fn display_name(&self) -> &'static str {
        match self {
            LayerPosition::Surface => "Surface Course",
            LayerPosition::Base => "Base Course",
            LayerPosition::Subbase => "Subbase Course",
        }
    }
}

impl std::fmt::Display for LayerPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One row of the layer material table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerMaterial {
    pub key: &'static str,
    pub display_name: &'static str,
    pub position: LayerPosition,
    /// Structural layer coefficient (per inch)
    pub coefficient: f64,
}

static LAYER_MATERIALS: [LayerMaterial; 10] = [
    LayerMaterial { key: "asphalt_concrete", display_name: "Asphalt Concrete", position: LayerPosition::Surface, coefficient: 0.44 },
    LayerMaterial { key: "asphalt_binder", display_name: "Asphalt Binder Course", position: LayerPosition::Surface, coefficient: 0.40 },
    LayerMaterial { key: "cold_mix_asphalt", display_name: "Cold Mix Asphalt", position: LayerPosition::Surface, coefficient: 0.30 },
    LayerMaterial { key: "asphalt_treated_base", display_name: "Asphalt Treated Base", position: LayerPosition::Base, coefficient: 0.30 },
    LayerMaterial { key: "cement_treated_base", display_name: "Cement Treated Base", position: LayerPosition::Base, coefficient: 0.20 },
    LayerMaterial { key: "lime_treated_base", display_name: "Lime Treated Base", position: LayerPosition::Base, coefficient: 0.15 },
    LayerMaterial { key: "crushed_stone", display_name: "Crushed Stone Base", position: LayerPosition::Base, coefficient: 0.14 },
    LayerMaterial { key: "gravel_base", display_name: "Gravel Base", position: LayerPosition::Base, coefficient: 0.12 },
    LayerMaterial { key: "stabilized_subbase", display_name: "Stabilized Subbase", position: LayerPosition::Subbase, coefficient: 0.13 },
    LayerMaterial { key: "granular_subbase", display_name: "Granular Subbase", position: LayerPosition::Subbase, coefficient: 0.11 },
];

/// Short-hand keys accepted in addition to the canonical ones
const ALIASES: [(&str, &str); 6] = [
    ("ac", "asphalt_concrete"),
    ("hma", "asphalt_concrete"),
    ("atb", "asphalt_treated_base"),
    ("ctb", "cement_treated_base"),
    ("aggregate_base", "crushed_stone"),
    ("sand_gravel", "granular_subbase"),
];

static MATERIAL_INDEX: Lazy<HashMap<&'static str, &'static LayerMaterial>> = Lazy::new(|| {
    let mut index: HashMap<&'static str, &'static LayerMaterial> =
        LAYER_MATERIALS.iter().map(|m| (m.key, m)).collect();
    for (alias, target) in ALIASES {
        if let Some(m) = LAYER_MATERIALS.iter().find(|m| m.key == target) {
            index.insert(alias, m);
        }
    }
    index
});

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Look up a material row by key
pub fn material(key: &str) -> Option<&'static LayerMaterial> {
    MATERIAL_INDEX.get(normalize_key(key).as_str()).copied()
}

/// Structural coefficient for a material key.
///
/// Unknown keys return [`DEFAULT_STRUCTURAL_COEFFICIENT`] rather than an
/// error.
pub fn default_coefficient(material_key: &str) -> f64 {
    match material(material_key) {
        Some(m) => m.coefficient,
        None => {
            warn!(
                material = material_key,
                fallback = DEFAULT_STRUCTURAL_COEFFICIENT,
                "unknown layer material, using default coefficient"
            );
            DEFAULT_STRUCTURAL_COEFFICIENT
        }
    }
}

/// All tabulated materials, in table order
pub fn all_materials() -> &'static [LayerMaterial] {
    &LAYER_MATERIALS
}
