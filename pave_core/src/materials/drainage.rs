//! Drainage coefficients (AASHTO-93 Part II, Tables 2.4 and 2.5).
//!
//! Values are the representative coefficients for 5–25 % of the time the
//! pavement structure is exposed to moisture levels approaching saturation.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Quality of subsurface drainage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DrainageQuality {
    /// Water removed within 2 hours
    Excellent,
    /// Water removed within 1 day
    Good,
    /// Water removed within 1 week
    #[default]
    Fair,
    /// Water removed within 1 month
    Poor,
    /// Water will not drain
    VeryPoor,
}

/// Coefficients for one drainage quality
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrainageCoefficients {
    /// Base layer coefficient m2 (flexible)
    pub m2: f64,
    /// Subbase layer coefficient m3 (flexible)
    pub m3: f64,
    /// Drainage coefficient Cd (rigid)
    pub cd: f64,
}

impl DrainageQuality {
    /// All drainage qualities for UI selection
    pub const ALL: [DrainageQuality; 5] = [
        DrainageQuality::Excellent,
        DrainageQuality::Good,
        DrainageQuality::Fair,
        DrainageQuality::Poor,
        DrainageQuality::VeryPoor,
    ];

    pub fn coefficients(&self) -> DrainageCoefficients {
        match self {
            DrainageQuality::Excellent => DrainageCoefficients { m2: 1.20, m3: 1.15, cd: 1.20 },
            DrainageQuality::Good => DrainageCoefficients { m2: 1.00, m3: 1.00, cd: 1.10 },
            DrainageQuality::Fair => DrainageCoefficients { m2: 0.80, m3: 0.80, cd: 1.00 },
            DrainageQuality::Poor => DrainageCoefficients { m2: 0.60, m3: 0.60, cd: 0.90 },
            DrainageQuality::VeryPoor => DrainageCoefficients { m2: 0.40, m3: 0.40, cd: 0.80 },
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-', '_'], "").as_str() {
            "excellent" => Some(DrainageQuality::Excellent),
            "good" => Some(DrainageQuality::Good),
            "fair" => Some(DrainageQuality::Fair),
            "poor" => Some(DrainageQuality::Poor),
            "verypoor" => Some(DrainageQuality::VeryPoor),
            _ => None,
        }
    }

    /// Parse, falling back to [`DrainageQuality::Fair`] for unknown text
    pub fn lookup(s: &str) -> Self {
        Self::from_str_flexible(s).unwrap_or_else(|| {
            warn!(drainage = s, "unknown drainage quality, using Fair");
            DrainageQuality::default()
        })
    }

    /// Serde `deserialize_with` helper that reads any string through
    /// [`DrainageQuality::lookup`], so unknown text selects Fair instead of
    /// failing the whole document.
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok(Self::lookup(&text))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DrainageQuality::Excellent => "Excellent",
            DrainageQuality::Good => "Good",
            DrainageQuality::Fair => "Fair",
            DrainageQuality::Poor => "Poor",
            DrainageQuality::VeryPoor => "Very Poor",
        }
    }
}

impl std::fmt::Display for DrainageQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_decrease_with_quality() {
        for pair in DrainageQuality::ALL.windows(2) {
            let better = pair[0].coefficients();
            let worse = pair[1].coefficients();
            assert!(better.m2 > worse.m2);
            assert!(better.m3 > worse.m3);
            assert!(better.cd > worse.cd);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(DrainageQuality::from_str_flexible("Very Poor"), Some(DrainageQuality::VeryPoor));
        assert_eq!(DrainageQuality::from_str_flexible("very_poor"), Some(DrainageQuality::VeryPoor));
        assert_eq!(DrainageQuality::from_str_flexible("GOOD"), Some(DrainageQuality::Good));
        assert_eq!(DrainageQuality::from_str_flexible("swampy"), None);
    }

    #[test]
    fn test_unknown_falls_back_to_fair() {
        let q = DrainageQuality::lookup("swampy");
        assert_eq!(q, DrainageQuality::Fair);
        let c = q.coefficients();
        assert_eq!((c.m2, c.m3, c.cd), (0.80, 0.80, 1.00));
    }

    #[test]
    fn test_lenient_deserialization() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "DrainageQuality::deserialize_lenient")]
            drainage: DrainageQuality,
        }
        let known: Holder = serde_json::from_str(r#"{"drainage": "Very Poor"}"#).unwrap();
        assert_eq!(known.drainage, DrainageQuality::VeryPoor);
        let unknown: Holder = serde_json::from_str(r#"{"drainage": "swampy"}"#).unwrap();
        assert_eq!(unknown.drainage, DrainageQuality::Fair);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&DrainageQuality::VeryPoor).unwrap();
        assert_eq!(json, "\"very_poor\"");
    }
}
