// 🎯 Score Tiers - bureau score to color and label
//
// Two tables exist for the same metric and disagree on boundaries:
// the report list uses five tiers, the detail screen three bands.
// Both are kept as-is.

// ============================================================================
// SWATCHES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swatch {
    Emerald,
    Green,
    Amber,
    Orange,
    Red,
    Neutral,
}

impl Swatch {
    pub fn hex(&self) -> &'static str {
        match self {
            Swatch::Emerald => "#059669",
            Swatch::Green => "#16a34a",
            Swatch::Amber => "#d97706",
            Swatch::Orange => "#ea580c",
            Swatch::Red => "#dc2626",
            Swatch::Neutral => "#6b7280",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

/// Missing, zero and NaN scores are all "unrated"
fn rated(score: Option<f64>) -> Option<f64> {
    score.filter(|s| *s != 0.0 && !s.is_nan())
}

// ============================================================================
// LIST SCREEN: FIVE TIERS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
    Unrated,
}

impl ScoreTier {
    pub fn from_score(score: Option<f64>) -> Self {
        match rated(score) {
            None => ScoreTier::Unrated,
            Some(s) if s >= 750.0 => ScoreTier::Excellent,
            Some(s) if s >= 700.0 => ScoreTier::Good,
            Some(s) if s >= 650.0 => ScoreTier::Fair,
            Some(s) if s >= 600.0 => ScoreTier::Poor,
            Some(_) => ScoreTier::VeryPoor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent",
            ScoreTier::Good => "Good",
            ScoreTier::Fair => "Fair",
            ScoreTier::Poor => "Poor",
            ScoreTier::VeryPoor => "Very Poor",
            ScoreTier::Unrated => "N/A",
        }
    }

    pub fn swatch(&self) -> Swatch {
        match self {
            ScoreTier::Excellent => Swatch::Emerald,
            ScoreTier::Good => Swatch::Green,
            ScoreTier::Fair => Swatch::Amber,
            ScoreTier::Poor => Swatch::Orange,
            ScoreTier::VeryPoor => Swatch::Red,
            ScoreTier::Unrated => Swatch::Neutral,
        }
    }
}

// ============================================================================
// DETAIL SCREEN: THREE BANDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
    Unrated,
}

impl ScoreBand {
    pub fn from_score(score: Option<f64>) -> Self {
        match rated(score) {
            None => ScoreBand::Unrated,
            Some(s) if s >= 750.0 => ScoreBand::High,
            Some(s) if s >= 650.0 => ScoreBand::Medium,
            Some(_) => ScoreBand::Low,
        }
    }

    pub fn swatch(&self) -> Swatch {
        match self {
            ScoreBand::High => Swatch::Emerald,
            ScoreBand::Medium => Swatch::Amber,
            ScoreBand::Low => Swatch::Red,
            ScoreBand::Unrated => Swatch::Neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ScoreTier::from_score(Some(900.0)), ScoreTier::Excellent);
        assert_eq!(ScoreTier::from_score(Some(750.0)), ScoreTier::Excellent);
        assert_eq!(ScoreTier::from_score(Some(749.0)), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(Some(700.0)), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(Some(699.9)), ScoreTier::Fair);
        assert_eq!(ScoreTier::from_score(Some(650.0)), ScoreTier::Fair);
        assert_eq!(ScoreTier::from_score(Some(649.0)), ScoreTier::Poor);
        assert_eq!(ScoreTier::from_score(Some(600.0)), ScoreTier::Poor);
        assert_eq!(ScoreTier::from_score(Some(599.0)), ScoreTier::VeryPoor);
        assert_eq!(ScoreTier::from_score(Some(300.0)), ScoreTier::VeryPoor);
    }

    #[test]
    fn test_tier_labels_and_colors() {
        assert_eq!(ScoreTier::from_score(Some(720.0)).label(), "Good");
        assert_eq!(ScoreTier::from_score(Some(720.0)).swatch(), Swatch::Green);
        assert_eq!(ScoreTier::from_score(Some(580.0)).label(), "Very Poor");
        assert_eq!(ScoreTier::from_score(Some(580.0)).swatch(), Swatch::Red);
    }

    #[test]
    fn test_tier_unrated() {
        for score in [None, Some(0.0), Some(f64::NAN)] {
            let tier = ScoreTier::from_score(score);
            assert_eq!(tier, ScoreTier::Unrated);
            assert_eq!(tier.label(), "N/A");
            assert_eq!(tier.swatch(), Swatch::Neutral);
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ScoreBand::from_score(Some(750.0)).swatch(), Swatch::Emerald);
        assert_eq!(ScoreBand::from_score(Some(749.0)).swatch(), Swatch::Amber);
        assert_eq!(ScoreBand::from_score(Some(650.0)).swatch(), Swatch::Amber);
        assert_eq!(ScoreBand::from_score(Some(649.0)).swatch(), Swatch::Red);
        assert_eq!(ScoreBand::from_score(None).swatch(), Swatch::Neutral);
        assert_eq!(ScoreBand::from_score(Some(0.0)), ScoreBand::Unrated);
    }

    #[test]
    fn test_tables_disagree_on_purpose() {
        // 720 is "Good" (green) in the list but amber on the detail screen
        assert_eq!(ScoreTier::from_score(Some(720.0)).swatch(), Swatch::Green);
        assert_eq!(ScoreBand::from_score(Some(720.0)).swatch(), Swatch::Amber);
    }

    #[test]
    fn test_swatch_rgb() {
        assert_eq!(Swatch::Red.rgb(), (0xdc, 0x26, 0x26));
        assert_eq!(Swatch::Neutral.rgb(), (0x6b, 0x72, 0x80));
    }
}
