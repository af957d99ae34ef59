//! # Traffic Categories
//!
//! Minimum layer thicknesses keyed by design traffic (W18). Flexible and
//! rigid pavements use separate tables with their own breakpoints and
//! category names; the two are never merged.
//!
//! ## Flexible (AASHTO-93 Part II, 3.5)
//!
//! | W18 (ESAL)              | Category  | Surface (in) | Base (in) |
//! |-------------------------|-----------|--------------|-----------|
//! | ≤ 50 000                | Very Low  | 1.0          | 4.0       |
//! | 50 001 – 150 000        | Low       | 2.0          | 4.0       |
//! | 150 001 – 500 000       | Medium    | 2.5          | 4.0       |
//! | 500 001 – 2 000 000     | High      | 3.0          | 6.0       |
//! | 2 000 001 – 7 000 000   | Very High | 3.5          | 6.0       |
//! | > 7 000 000             | Extreme   | 4.0          | 6.0       |
//!
//! ## Rigid
//!
//! | W18 (ESAL)              | Category   | Slab (in) |
//! |-------------------------|------------|-----------|
//! | ≤ 1 000 000             | Light      | 6.0       |
//! | 1 000 001 – 10 000 000  | Medium     | 7.0       |
//! | 10 000 001 – 30 000 000 | Heavy      | 8.0       |
//! | > 30 000 000            | Very Heavy | 9.0       |
//!
//! A W18 that cannot be placed (NaN) maps to the heaviest category, whose
//! minimums are the thickest.

use serde::{Deserialize, Serialize};

/// Flexible pavement traffic category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexibleTrafficCategory {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
    Extreme,
}

/// (inclusive upper W18 bound, category)
const FLEXIBLE_TABLE: [(f64, FlexibleTrafficCategory); 5] = [
    (50_000.0, FlexibleTrafficCategory::VeryLow),
    (150_000.0, FlexibleTrafficCategory::Low),
    (500_000.0, FlexibleTrafficCategory::Medium),
    (2_000_000.0, FlexibleTrafficCategory::High),
    (7_000_000.0, FlexibleTrafficCategory::VeryHigh),
];

impl FlexibleTrafficCategory {
    /// All categories, lightest first
    pub const ALL: [FlexibleTrafficCategory; 6] = [
        FlexibleTrafficCategory::VeryLow,
        FlexibleTrafficCategory::Low,
        FlexibleTrafficCategory::Medium,
        FlexibleTrafficCategory::High,
        FlexibleTrafficCategory::VeryHigh,
        FlexibleTrafficCategory::Extreme,
    ];

    pub fn for_esal(w18: f64) -> Self {
        FLEXIBLE_TABLE
            .iter()
            .find(|(limit, _)| w18 <= *limit)
            .map(|(_, category)| *category)
            .unwrap_or(FlexibleTrafficCategory::Extreme)
    }

    /// Minimum asphalt surface thickness (in)
    pub fn min_surface_in(&self) -> f64 {
        match self {
            FlexibleTrafficCategory::VeryLow => 1.0,
            FlexibleTrafficCategory::Low => 2.0,
            FlexibleTrafficCategory::Medium => 2.5,
            FlexibleTrafficCategory::High => 3.0,
            FlexibleTrafficCategory::VeryHigh => 3.5,
            FlexibleTrafficCategory::Extreme => 4.0,
        }
    }

    /// Minimum aggregate base thickness (in)
    pub fn min_base_in(&self) -> f64 {
        match self {
            FlexibleTrafficCategory::VeryLow
            | FlexibleTrafficCategory::Low
            | FlexibleTrafficCategory::Medium => 4.0,
            FlexibleTrafficCategory::High
            | FlexibleTrafficCategory::VeryHigh
            | FlexibleTrafficCategory::Extreme => 6.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FlexibleTrafficCategory::VeryLow => "Very Low",
            FlexibleTrafficCategory::Low => "Low",
            FlexibleTrafficCategory::Medium => "Medium",
            FlexibleTrafficCategory::High => "High",
            FlexibleTrafficCategory::VeryHigh => "Very High",
            FlexibleTrafficCategory::Extreme => "Extreme",
        }
    }
}

impl std::fmt::Display for FlexibleTrafficCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Rigid pavement traffic category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RigidTrafficCategory {
    Light,
    Medium,
    Heavy,
    VeryHeavy,
}

/// (inclusive upper W18 bound, category)
const RIGID_TABLE: [(f64, RigidTrafficCategory); 3] = [
    (1_000_000.0, RigidTrafficCategory::Light),
    (10_000_000.0, RigidTrafficCategory::Medium),
    (30_000_000.0, RigidTrafficCategory::Heavy),
];

impl RigidTrafficCategory {
    /// All categories, lightest first
    pub const ALL: [RigidTrafficCategory; 4] = [
        RigidTrafficCategory::Light,
        RigidTrafficCategory::Medium,
        RigidTrafficCategory::Heavy,
        RigidTrafficCategory::VeryHeavy,
    ];

    pub fn for_esal(w18: f64) -> Self {
        RIGID_TABLE
            .iter()
            .find(|(limit, _)| w18 <= *limit)
            .map(|(_, category)| *category)
            .unwrap_or(RigidTrafficCategory::VeryHeavy)
    }

    /// Minimum concrete slab thickness (in)
    pub fn min_slab_in(&self) -> f64 {
        match self {
            RigidTrafficCategory::Light => 6.0,
            RigidTrafficCategory::Medium => 7.0,
            RigidTrafficCategory::Heavy => 8.0,
            RigidTrafficCategory::VeryHeavy => 9.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RigidTrafficCategory::Light => "Light",
            RigidTrafficCategory::Medium => "Medium",
            RigidTrafficCategory::Heavy => "Heavy",
            RigidTrafficCategory::VeryHeavy => "Very Heavy",
        }
    }
}

impl std::fmt::Display for RigidTrafficCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flexible_breakpoints() {
        assert_eq!(FlexibleTrafficCategory::for_esal(50_000.0), FlexibleTrafficCategory::VeryLow);
        assert_eq!(FlexibleTrafficCategory::for_esal(50_001.0), FlexibleTrafficCategory::Low);
        assert_eq!(FlexibleTrafficCategory::for_esal(1.0e6), FlexibleTrafficCategory::High);
        assert_eq!(FlexibleTrafficCategory::for_esal(7.0e6), FlexibleTrafficCategory::VeryHigh);
        assert_eq!(FlexibleTrafficCategory::for_esal(7.5e6), FlexibleTrafficCategory::Extreme);
        assert_eq!(FlexibleTrafficCategory::for_esal(f64::NAN), FlexibleTrafficCategory::Extreme);
    }

    #[test]
    fn test_flexible_minimums() {
        let surface: Vec<f64> =
            FlexibleTrafficCategory::ALL.iter().map(|c| c.min_surface_in()).collect();
        let base: Vec<f64> = FlexibleTrafficCategory::ALL.iter().map(|c| c.min_base_in()).collect();
        assert_eq!(surface, vec![1.0, 2.0, 2.5, 3.0, 3.5, 4.0]);
        assert_eq!(base, vec![4.0, 4.0, 4.0, 6.0, 6.0, 6.0]);
    }

    #[test]
    fn test_rigid_breakpoints() {
        assert_eq!(RigidTrafficCategory::for_esal(800_000.0), RigidTrafficCategory::Light);
        assert_eq!(RigidTrafficCategory::for_esal(5.0e6), RigidTrafficCategory::Medium);
        assert_eq!(RigidTrafficCategory::for_esal(2.5e7), RigidTrafficCategory::Heavy);
        assert_eq!(RigidTrafficCategory::for_esal(1.0e8), RigidTrafficCategory::VeryHeavy);
        assert_eq!(RigidTrafficCategory::Medium.min_slab_in(), 7.0);
    }

    #[test]
    fn test_tables_are_independent() {
        // 1M ESAL is "High" for asphalt but "Light" for concrete
        assert_eq!(FlexibleTrafficCategory::for_esal(1.0e6).display_name(), "High");
        assert_eq!(RigidTrafficCategory::for_esal(1.0e6).display_name(), "Light");
    }

    #[test]
    fn test_minimums_grow_with_traffic() {
        for pair in FlexibleTrafficCategory::ALL.windows(2) {
            assert!(pair[0].min_surface_in() <= pair[1].min_surface_in());
        }
        for pair in RigidTrafficCategory::ALL.windows(2) {
            assert!(pair[0].min_slab_in() < pair[1].min_slab_in());
        }
    }
}
