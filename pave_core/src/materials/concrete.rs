//! Paving concrete grades.
//!
//! Grades are named by 28-day compressive strength in MPa. Elastic modulus
//! follows Ec = 4700·√f'c; modulus of rupture Sc is the mean third-point
//! flexural strength used by the AASHTO rigid design equation.
//!
//! | Grade | f'c (MPa) | Ec (MPa) | Sc (MPa) | Recommended for W18   |
//! |-------|-----------|----------|----------|-----------------------|
//! | G25   | 25        | 23 500   | 4.0      | ≤ 1 000 000           |
//! | G30   | 30        | 25 700   | 4.4      | ≤ 5 000 000           |
//! | G35   | 35        | 27 800   | 4.7      | ≤ 20 000 000          |
//! | G40   | 40        | 29 700   | 5.0      | > 20 000 000          |
//!
//! Thresholds are inclusive: a design for exactly 5 000 000 ESAL gets G30.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::units::{Mpa, Psi};

/// Concrete grade for rigid pavement slabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum ConcreteGrade {
    #[default]
    G25,
    G30,
    G35,
    G40,
}

/// Mechanical properties of a concrete grade (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteProperties {
    /// 28-day compressive strength f'c
    pub fc_mpa: f64,
    /// Elastic modulus Ec
    pub ec_mpa: f64,
    /// Modulus of rupture Sc
    pub sc_mpa: f64,
}

impl ConcreteProperties {
    pub fn ec_psi(&self) -> f64 {
        Psi::from(Mpa(self.ec_mpa)).0
    }

    pub fn sc_psi(&self) -> f64 {
        Psi::from(Mpa(self.sc_mpa)).0
    }
}

/// ESAL thresholds for grade recommendation (inclusive upper bounds)
const GRADE_THRESHOLDS: [(f64, ConcreteGrade); 3] = [
    (1.0e6, ConcreteGrade::G25),
    (5.0e6, ConcreteGrade::G30),
    (2.0e7, ConcreteGrade::G35),
];

impl ConcreteGrade {
    /// All grades for UI selection
    pub const ALL: [ConcreteGrade; 4] = [
        ConcreteGrade::G25,
        ConcreteGrade::G30,
        ConcreteGrade::G35,
        ConcreteGrade::G40,
    ];

    pub fn properties(&self) -> ConcreteProperties {
        match self {
            ConcreteGrade::G25 => ConcreteProperties { fc_mpa: 25.0, ec_mpa: 23_500.0, sc_mpa: 4.0 },
            ConcreteGrade::G30 => ConcreteProperties { fc_mpa: 30.0, ec_mpa: 25_700.0, sc_mpa: 4.4 },
            ConcreteGrade::G35 => ConcreteProperties { fc_mpa: 35.0, ec_mpa: 27_800.0, sc_mpa: 4.7 },
            ConcreteGrade::G40 => ConcreteProperties { fc_mpa: 40.0, ec_mpa: 29_700.0, sc_mpa: 5.0 },
        }
    }

    /// Recommended grade for a design traffic level:
    /// up to 1M → G25, up to 5M → G30, up to 20M → G35, otherwise G40.
    pub fn recommend_for_esal(w18: f64) -> Self {
        GRADE_THRESHOLDS
            .iter()
            .find(|(limit, _)| w18 <= *limit)
            .map(|(_, grade)| *grade)
            .unwrap_or(ConcreteGrade::G40)
    }

    pub fn code(&self) -> &'static str {
        match self {
            ConcreteGrade::G25 => "G25",
            ConcreteGrade::G30 => "G30",
            ConcreteGrade::G35 => "G35",
            ConcreteGrade::G40 => "G40",
        }
    }

    /// Parse from common string representations ("G30", "g-30", "30", "C30")
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        let cleaned = s.trim().to_uppercase().replace([' ', '-', '_'], "");
        let digits = cleaned.trim_start_matches(['G', 'C', 'K']);
        match digits {
            "25" => Some(ConcreteGrade::G25),
            "30" => Some(ConcreteGrade::G30),
            "35" => Some(ConcreteGrade::G35),
            "40" => Some(ConcreteGrade::G40),
            _ => None,
        }
    }

    /// Parse, falling back to G25 (the weakest grade) for unknown text
    pub fn lookup(s: &str) -> Self {
        Self::from_str_flexible(s).unwrap_or_else(|| {
            warn!(grade = s, "unknown concrete grade, using G25");
            ConcreteGrade::default()
        })
    }
}

impl std::fmt::Display for ConcreteGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_recommendation_thresholds() {
        assert_eq!(ConcreteGrade::recommend_for_esal(500_000.0), ConcreteGrade::G25);
        assert_eq!(ConcreteGrade::recommend_for_esal(1.0e6), ConcreteGrade::G25);
        assert_eq!(ConcreteGrade::recommend_for_esal(1.0e6 + 1.0), ConcreteGrade::G30);
        assert_eq!(ConcreteGrade::recommend_for_esal(5.0e6), ConcreteGrade::G30);
        assert_eq!(ConcreteGrade::recommend_for_esal(5.0e6 + 1.0), ConcreteGrade::G35);
        assert_eq!(ConcreteGrade::recommend_for_esal(2.0e7), ConcreteGrade::G35);
        assert_eq!(ConcreteGrade::recommend_for_esal(2.1e7), ConcreteGrade::G40);
        assert_eq!(ConcreteGrade::recommend_for_esal(1.0e9), ConcreteGrade::G40);
    }

    #[test]
    fn test_properties_increase_with_grade() {
        for pair in ConcreteGrade::ALL.windows(2) {
            let lo = pair[0].properties();
            let hi = pair[1].properties();
            assert!(hi.fc_mpa > lo.fc_mpa);
            assert!(hi.ec_mpa > lo.ec_mpa);
            assert!(hi.sc_mpa > lo.sc_mpa);
        }
    }

    #[test]
    fn test_psi_conversion() {
        let props = ConcreteGrade::G30.properties();
        assert!((props.sc_psi() - 638.17).abs() < 0.01);
        assert!((props.ec_psi() - 3_727_470.0).abs() < 100.0);
    }

    #[test]
    fn test_parse_and_fallback() {
        assert_eq!(ConcreteGrade::from_str_flexible("g-35"), Some(ConcreteGrade::G35));
        assert_eq!(ConcreteGrade::from_str_flexible("40"), Some(ConcreteGrade::G40));
        assert_eq!(ConcreteGrade::from_str_flexible("G50"), None);
        assert_eq!(ConcreteGrade::lookup("G50"), ConcreteGrade::G25);
    }
}
